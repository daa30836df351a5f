use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A directed note between two users. Only `read` ever changes after insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
}

impl Message {
    /// The endpoint that is not `me`.
    pub fn counterpart<'a>(&'a self, me: &str) -> &'a str {
        if self.sender_id == me {
            &self.recipient_id
        } else {
            &self.sender_id
        }
    }

    pub fn counterpart_name(&self, me: &str) -> Option<&str> {
        if self.sender_id == me {
            self.recipient_name.as_deref()
        } else {
            self.sender_name.as_deref()
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NewMessage {
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub sender_name: Option<String>,
    pub recipient_name: Option<String>,
    pub read: bool,
}
