use serde::Serialize;
use tokio::join;
use tracing::{debug, info};

use crate::conversations::{group_conversations, total_unread, Conversation};
use crate::error::{require, AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Contact, Message, NewMessage};
use crate::repository::Repositories;
use crate::scope;
use crate::types::MessageForm;

#[derive(Debug, Serialize)]
pub struct Thread {
    pub other_user_id: String,
    pub other_user_name: Option<String>,
    /// Oldest first.
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct MessagesView {
    pub conversations: Vec<Conversation>,
    pub unread_total: usize,
    pub contacts: Vec<Contact>,
    pub thread: Option<Thread>,
}

pub struct MessagesPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> MessagesPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        MessagesPage { session, repos }
    }

    /// Conversation list and compose contacts, plus the thread with `with` when
    /// one is selected. Opening a thread marks the counterpart's messages read.
    pub async fn load(&self, with: Option<&str>) -> Result<MessagesView, AppError> {
        let (messages, contacts) = join!(
            self.repos.messages.find_for_user(&self.session.user_id),
            scope::contacts_for(self.session, self.repos)
        );
        let messages = messages.or_fail("Failed to load data")?;
        let contacts = contacts.or_fail("Failed to load data")?;
        let mut conversations = group_conversations(&messages, &self.session.user_id);

        let thread = match with.map(str::trim).filter(|w| !w.is_empty()) {
            Some(other) => {
                let thread = self.open_thread(other, &conversations, &contacts).await?;
                if let Some(conversation) = conversations
                    .iter_mut()
                    .find(|c| c.other_user_id == other)
                {
                    conversation.unread_count = 0;
                }
                Some(thread)
            }
            None => None,
        };

        Ok(MessagesView {
            unread_total: total_unread(&conversations),
            conversations,
            contacts,
            thread,
        })
    }

    pub async fn send(&self, form: MessageForm) -> Result<Message, AppError> {
        let Some(recipient_id) = require(&form.recipient_id) else {
            return Err(AppError::Validation("Please choose a recipient".to_string()));
        };
        let Some(content) = form.content.filter(|c| !c.trim().is_empty()) else {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        };

        let recipient_name = self.recipient_name(recipient_id).await?;

        let message = self
            .repos
            .messages
            .insert(NewMessage {
                sender_id: self.session.user_id.clone(),
                recipient_id: recipient_id.to_string(),
                content,
                sender_name: self.session.full_name.clone(),
                recipient_name,
                read: false,
            })
            .await
            .or_fail("Failed to send message")?;

        info!(message_id = %message.id, recipient_id = %message.recipient_id, "Sent message");
        Ok(message)
    }

    async fn conversations(&self) -> Result<Vec<Conversation>, AppError> {
        let messages = self
            .repos
            .messages
            .find_for_user(&self.session.user_id)
            .await
            .or_fail("Failed to load data")?;
        Ok(group_conversations(&messages, &self.session.user_id))
    }

    async fn open_thread(
        &self,
        other: &str,
        conversations: &[Conversation],
        contacts: &[Contact],
    ) -> Result<Thread, AppError> {
        let me = self.session.user_id.as_str();
        let mut messages = self
            .repos
            .messages
            .find_thread(me, other)
            .await
            .or_fail("Failed to load messages")?;

        let marked = self
            .repos
            .messages
            .mark_read(me, other)
            .await
            .or_fail("Failed to load messages")?;
        debug!(other_user_id = %other, marked, "Marked thread read");

        for message in messages
            .iter_mut()
            .filter(|m| m.sender_id == other && m.recipient_id == me)
        {
            message.read = true;
        }

        let other_user_name = conversations
            .iter()
            .find(|c| c.other_user_id == other)
            .and_then(|c| c.other_user_name.clone())
            .or_else(|| {
                contacts
                    .iter()
                    .find(|c| c.id == other)
                    .map(|c| c.full_name.clone())
            });

        Ok(Thread {
            other_user_id: other.to_string(),
            other_user_name,
            messages,
        })
    }

    /// Display name stored with the message: the compose contact, or the name
    /// already known from an earlier conversation.
    async fn recipient_name(&self, recipient_id: &str) -> Result<Option<String>, AppError> {
        let contacts = scope::contacts_for(self.session, self.repos)
            .await
            .or_fail("Failed to send message")?;
        if let Some(contact) = contacts.into_iter().find(|c| c.id == recipient_id) {
            return Ok(Some(contact.full_name));
        }

        Ok(self
            .conversations()
            .await?
            .into_iter()
            .find(|c| c.other_user_id == recipient_id)
            .and_then(|c| c.other_user_name))
    }
}
