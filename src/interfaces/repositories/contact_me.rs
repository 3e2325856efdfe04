use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact_me::ContactMessage,
    errors::AppError,
    repositories::file_repo::InMemoryContactRepo,
};

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn save(&self, message: ContactMessage) -> Result<(), AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn mark_read(&self, id: &Uuid) -> Result<ContactMessage, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}

impl InMemoryContactRepo {
    pub fn new() -> Self {
        InMemoryContactRepo::default()
    }
}

#[async_trait]
impl ContactMessageRepository for InMemoryContactRepo {
    async fn save(&self, message: ContactMessage) -> Result<(), AppError> {
        self.messages.write().push(message);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        let mut messages = self.messages.read().clone();
        messages.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        Ok(messages)
    }

    async fn mark_read(&self, id: &Uuid) -> Result<ContactMessage, AppError> {
        let mut messages = self.messages.write();
        let message = messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| AppError::NotFound("Contact message not found".to_string()))?;
        message.read = true;
        Ok(message.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let mut messages = self.messages.write();
        let before = messages.len();
        messages.retain(|m| &m.id != id);
        if messages.len() == before {
            return Err(AppError::NotFound("Contact message not found".to_string()));
        }
        Ok(())
    }
}
