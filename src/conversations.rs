use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Message;

/// Per-counterpart summary of a user's messages.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct Conversation {
    pub id: String,
    pub other_user_id: String,
    pub other_user_name: Option<String>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    /// Messages from the counterpart to `me` that are still unread.
    pub unread_count: usize,
}

/// Groups `messages` (newest first) into one conversation per counterpart.
///
/// The first message seen for a counterpart supplies the preview, so the output
/// keeps the recency order of the input. The unread count covers every unread
/// message addressed to `me` in the thread, not just the newest one.
pub fn group_conversations(messages: &[Message], me: &str) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for message in messages {
        let other = message.counterpart(me);
        let unread = usize::from(message.recipient_id == me && !message.read);

        match index.get(other) {
            Some(&slot) => {
                let conversation = &mut conversations[slot];
                conversation.unread_count += unread;
                if conversation.other_user_name.is_none() {
                    conversation.other_user_name =
                        message.counterpart_name(me).map(str::to_string);
                }
            }
            None => {
                index.insert(other, conversations.len());
                conversations.push(Conversation {
                    id: other.to_string(),
                    other_user_id: other.to_string(),
                    other_user_name: message.counterpart_name(me).map(str::to_string),
                    last_message: message.content.clone(),
                    last_message_time: message.created_at,
                    unread_count: unread,
                });
            }
        }
    }

    conversations
}

pub fn total_unread(conversations: &[Conversation]) -> usize {
    conversations.iter().map(|c| c.unread_count).sum()
}
