use async_trait::async_trait;
use folio_contact::{ContactSubmission, DeliveryError, Notifier};

use crate::{
    EmailService,
    service::Outgoing,
    template::{
        AutoReply, AutoReplyHtmlTemplate, AutoReplyPlainTemplate, OwnerNotification,
        OwnerNotificationHtmlTemplate, OwnerNotificationPlainTemplate, format_timestamp, render,
    },
};

const CONTACT_FORM_SENDER: &str = "Portfolio Contact Form";

impl EmailService {
    pub(crate) fn owner_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<Outgoing, DeliveryError> {
        let contact = OwnerNotification::new(submission, self.config.dashboard_url(&submission.id));

        Ok(Outgoing {
            from: Self::mailbox(Some(CONTACT_FORM_SENDER), &self.config.from_address)?,
            to: Self::mailbox(None, &self.config.owner_address)?,
            reply_to: Some(Self::mailbox(Some(&submission.name), &submission.email)?),
            subject: format!("New Contact Form Submission: {}", submission.subject),
            html: render(&OwnerNotificationHtmlTemplate { contact: &contact })?,
            plain: render(&OwnerNotificationPlainTemplate { contact: &contact })?,
        })
    }

    pub(crate) fn auto_reply(
        &self,
        submission: &ContactSubmission,
    ) -> Result<Outgoing, DeliveryError> {
        let reply = AutoReply {
            name: &submission.name,
            subject: &submission.subject,
            submitted_at: format_timestamp(submission.created_at),
            message: &submission.message,
            owner_name: &self.config.owner_name,
            owner_title: &self.config.owner_title,
        };

        Ok(Outgoing {
            from: Self::mailbox(Some(&self.config.owner_name), &self.config.from_address)?,
            to: Self::mailbox(Some(&submission.name), &submission.email)?,
            reply_to: None,
            subject: format!("Thank you for contacting me - {}", submission.subject),
            html: render(&AutoReplyHtmlTemplate { reply: &reply })?,
            plain: render(&AutoReplyPlainTemplate { reply: &reply })?,
        })
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn send_owner_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), DeliveryError> {
        let outgoing = self.owner_notification(submission)?;
        self.send(outgoing).await
    }

    async fn send_auto_reply(&self, submission: &ContactSubmission) -> Result<(), DeliveryError> {
        let outgoing = self.auto_reply(submission)?;
        self.send(outgoing).await
    }

    async fn test_configuration(&self) -> bool {
        self.test_connection().await
    }
}
