use async_trait::async_trait;
use thiserror::Error;

pub mod models;
pub mod sendgrid;
pub mod twilio;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered but refused the message.
    #[error("{0}")]
    Api(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Returns the provider's message identifier.
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns the provider's message identifier.
    async fn send_email(&self, to: &str, subject: &str, text: &str)
        -> Result<String, ProviderError>;
}
