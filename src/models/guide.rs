use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::student::Contact;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GuideStatus {
    Active,
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Guide {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub specialization: String,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    pub status: GuideStatus,
    pub parent_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewGuide {
    pub full_name: String,
    pub email: String,
    pub specialization: String,
    pub hourly_rate: Option<f64>,
    pub parent_id: String,
    pub status: GuideStatus,
}

impl From<&Guide> for Contact {
    fn from(guide: &Guide) -> Self {
        Contact {
            id: guide.id.to_string(),
            full_name: guide.full_name.clone(),
        }
    }
}
