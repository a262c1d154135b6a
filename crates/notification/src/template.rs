use folio_contact::{ContactSubmission, DeliveryError};
use time::{OffsetDateTime, macros::format_description};

const NOT_PROVIDED: &str = "Not provided";

pub(crate) fn render<T: askama::Template>(template: &T) -> Result<String, DeliveryError> {
    template
        .render()
        .map_err(|e| DeliveryError::Message(format!("failed to render template: {e}")))
}

pub(crate) fn format_timestamp(value: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

    value
        .to_offset(time::UtcOffset::UTC)
        .format(&format)
        .unwrap_or_else(|_| value.unix_timestamp().to_string())
}

/// Values shared by the HTML and plain text owner notification.
pub(crate) struct OwnerNotification<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub company: &'a str,
    pub subject: &'a str,
    pub priority: String,
    pub priority_color: &'static str,
    pub submitted_at: String,
    pub message: &'a str,
    pub ip_address: &'a str,
    pub user_agent: &'a str,
    pub dashboard_url: String,
}

impl<'a> OwnerNotification<'a> {
    pub fn new(submission: &'a ContactSubmission, dashboard_url: String) -> Self {
        let priority_color = match submission.priority {
            folio_contact::Priority::Urgent => "#dc2626",
            folio_contact::Priority::High => "#ea580c",
            _ => "#2563eb",
        };

        Self {
            name: &submission.name,
            email: &submission.email,
            phone: submission.phone.as_deref().unwrap_or(NOT_PROVIDED),
            company: submission.company.as_deref().unwrap_or(NOT_PROVIDED),
            subject: &submission.subject,
            priority: submission.priority.to_string().to_uppercase(),
            priority_color,
            submitted_at: format_timestamp(submission.created_at),
            message: &submission.message,
            ip_address: &submission.ip_address,
            user_agent: &submission.user_agent,
            dashboard_url,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "owner-notification.html")]
pub(crate) struct OwnerNotificationHtmlTemplate<'a> {
    pub contact: &'a OwnerNotification<'a>,
}

#[derive(askama::Template)]
#[template(path = "owner-notification.txt")]
pub(crate) struct OwnerNotificationPlainTemplate<'a> {
    pub contact: &'a OwnerNotification<'a>,
}

pub(crate) struct AutoReply<'a> {
    pub name: &'a str,
    pub subject: &'a str,
    pub submitted_at: String,
    pub message: &'a str,
    pub owner_name: &'a str,
    pub owner_title: &'a str,
}

#[derive(askama::Template)]
#[template(path = "auto-reply.html")]
pub(crate) struct AutoReplyHtmlTemplate<'a> {
    pub reply: &'a AutoReply<'a>,
}

#[derive(askama::Template)]
#[template(path = "auto-reply.txt")]
pub(crate) struct AutoReplyPlainTemplate<'a> {
    pub reply: &'a AutoReply<'a>,
}
