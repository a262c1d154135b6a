use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}$").unwrap()
});

/// Contact form body as received from the client.
///
/// Every field defaults to empty, and null or non-string values are read
/// leniently, so a bad field is reported as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "text")]
    pub subject: String,
    #[serde(deserialize_with = "text")]
    pub message: String,
    #[serde(deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub company: Option<String>,
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(v) => Some(v),
        Value::Number(v) => Some(v.to_string()),
        Value::Bool(v) => Some(v.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// Trimmed and normalized submission payload that passed validation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SubmissionInput {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(regex(path = *RE_EMAIL, message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(length(
        min = 5,
        max = 200,
        message = "Subject must be between 5 and 200 characters"
    ))]
    pub subject: String,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Message must be between 10 and 2000 characters"
    ))]
    pub message: String,
    #[validate(length(max = 20, message = "Phone number cannot exceed 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 100, message = "Company name cannot exceed 100 characters"))]
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ContactForm> for SubmissionInput {
    fn from(form: ContactForm) -> Self {
        let optional = |v: Option<String>| {
            v.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
        };

        Self {
            name: form.name.trim().to_owned(),
            email: form.email.trim().to_lowercase(),
            subject: form.subject.trim().to_owned(),
            message: form.message.trim().to_owned(),
            phone: optional(form.phone),
            company: optional(form.company),
        }
    }
}

/// Normalizes the form and checks every field, reporting all violations at once.
pub fn validate(form: ContactForm) -> Result<SubmissionInput, Vec<FieldError>> {
    let input = SubmissionInput::from(form);

    match input.validate() {
        Ok(()) => Ok(input),
        Err(errors) => Err(field_errors(&errors)),
    }
}

pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
            })
        })
        .collect::<Vec<_>>();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}
