use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::OffsetDateTime;

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Read,
    Replied,
    Spam,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    JobInquiry,
    ProjectRequest,
    General,
    Collaboration,
    Feedback,
}

/// Request metadata captured alongside a submission.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        let or_unknown = |v: Option<String>| {
            v.map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| Self::UNKNOWN.to_owned())
        };

        Self {
            ip_address: or_unknown(ip_address),
            user_agent: or_unknown(user_agent),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub status: Status,
    pub priority: Priority,
    pub tags: Vec<Tag>,
    pub email_sent: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub email_sent_at: Option<OffsetDateTime>,
    pub auto_reply_sent: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub auto_reply_sent_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl ContactSubmission {
    /// Milliseconds elapsed between receipt and `now`.
    pub fn time_since_submission(&self, now: OffsetDateTime) -> i64 {
        let elapsed = (now - self.created_at).whole_milliseconds();
        i64::try_from(elapsed).unwrap_or(i64::MAX)
    }

    pub fn into_view(self, now: OffsetDateTime) -> SubmissionView {
        SubmissionView {
            time_since_submission: self.time_since_submission(now),
            contact: self,
        }
    }
}

/// Submission as returned by the admin API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    #[serde(flatten)]
    pub contact: ContactSubmission,
    pub time_since_submission: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Stats {
    pub total: i64,
    pub pending: i64,
    pub read: i64,
    pub replied: i64,
    pub urgent: i64,
}
