use async_trait::async_trait;

use crate::ContactSubmission;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Outbound delivery channel for contact notifications.
///
/// Each call is a single attempt; callers decide what a failure means.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tells the site owner about a new submission.
    async fn send_owner_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), DeliveryError>;

    /// Acknowledges receipt to the person who submitted the form.
    async fn send_auto_reply(&self, submission: &ContactSubmission) -> Result<(), DeliveryError>;

    /// Checks the channel is reachable and authenticated without sending anything.
    async fn test_configuration(&self) -> bool;
}
