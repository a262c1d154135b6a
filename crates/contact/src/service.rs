use std::sync::Arc;

use time::OffsetDateTime;

use crate::{
    ClientInfo, ContactForm, ContactSubmission, Error, ListQuery, Notifier, Page, Result, Stats,
    Store,
};

/// Which of the two deliveries the pipeline attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOptions {
    pub notify_owner: bool,
    pub auto_reply: bool,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            notify_owner: true,
            auto_reply: true,
        }
    }
}

/// Result of one best-effort delivery step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Sent and recorded on the submission.
    Sent,
    /// Sent, but recording the flag failed.
    Unrecorded(String),
    Failed(String),
    Skipped,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent | Self::Unrecorded(_))
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub id: String,
    pub submitted_at: OffsetDateTime,
    pub owner_notification: Delivery,
    pub auto_reply: Delivery,
}

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
    options: DeliveryOptions,
}

impl ContactService {
    pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, options: DeliveryOptions) -> Self {
        Self {
            store,
            notifier,
            options,
        }
    }

    /// Runs the submission pipeline: validate, persist, then attempt both
    /// deliveries. Only validation and persistence can fail the call.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&self, form: ContactForm, client: ClientInfo) -> Result<SubmissionReceipt> {
        let input = crate::validate(form).map_err(|errors| {
            tracing::info!(fields = errors.len(), "Contact submission rejected");
            Error::Validation(errors)
        })?;

        let submission = self
            .store
            .create(&input, &client)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to store contact submission"))?;

        tracing::info!(
            id = %submission.id,
            email = %submission.email,
            "New contact form submission"
        );

        let (owner_notification, auto_reply) = futures::join!(
            self.notify_owner(&submission),
            self.send_auto_reply(&submission)
        );

        Ok(SubmissionReceipt {
            id: submission.id,
            submitted_at: submission.created_at,
            owner_notification,
            auto_reply,
        })
    }

    async fn notify_owner(&self, submission: &ContactSubmission) -> Delivery {
        if !self.options.notify_owner {
            return Delivery::Skipped;
        }

        if let Err(e) = self.notifier.send_owner_notification(submission).await {
            tracing::error!(id = %submission.id, error = %e, "Failed to send contact notification email");
            return Delivery::Failed(e.to_string());
        }

        if let Err(e) = self.store.mark_email_sent(&submission.id).await {
            tracing::error!(id = %submission.id, error = %e, "Failed to record contact notification");
            return Delivery::Unrecorded(e.to_string());
        }

        tracing::info!(id = %submission.id, "Contact notification email sent");

        Delivery::Sent
    }

    async fn send_auto_reply(&self, submission: &ContactSubmission) -> Delivery {
        if !self.options.auto_reply {
            return Delivery::Skipped;
        }

        if let Err(e) = self.notifier.send_auto_reply(submission).await {
            tracing::error!(id = %submission.id, error = %e, "Failed to send auto-reply");
            return Delivery::Failed(e.to_string());
        }

        if let Err(e) = self.store.mark_auto_reply_sent(&submission.id).await {
            tracing::error!(id = %submission.id, error = %e, "Failed to record auto-reply");
            return Delivery::Unrecorded(e.to_string());
        }

        tracing::info!(id = %submission.id, to = %submission.email, "Auto-reply sent");

        Delivery::Sent
    }

    pub async fn get(&self, id: &str) -> Result<ContactSubmission> {
        self.store.get(id).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<ContactSubmission>> {
        self.store.list(query).await
    }

    pub async fn update_status(&self, id: &str, status: &str) -> Result<ContactSubmission> {
        self.store.update_status(id, status).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.store.stats().await
    }

    pub async fn test_configuration(&self) -> bool {
        self.notifier.test_configuration().await
    }
}
