//! Contact-form intake.
//!
//! Submissions are validated, formatted into a plain-text message and
//! handed to a [`SubmissionSink`]. The only sink shipped is [`LogSink`],
//! which writes the message to the application log; mail delivery is left
//! to whoever wires a real sink in.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields posted by the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug)]
pub enum ContactError {
    MissingFields,
    InvalidEmail,
    Delivery(anyhow::Error),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::MissingFields => f.write_str("Missing required fields"),
            ContactError::InvalidEmail => f.write_str("Invalid email address"),
            ContactError::Delivery(_) => f.write_str("Failed to process form submission"),
        }
    }
}

impl std::error::Error for ContactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContactError::Delivery(e) => Some(&**e),
            _ => None,
        }
    }
}

impl ContactForm {
    pub fn validate(&self) -> std::result::Result<(), ContactError> {
        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(ContactError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// `local@domain.tld`: no whitespace, one `@`, and a dot inside the domain
/// with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}

/// Plain-text body of the notification message.
pub fn format_submission(form: &ContactForm) -> String {
    format!(
        "New Contact Form Submission from BDA Built Website\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Company: {}\n\
         Project Type: {}\n\
         \n\
         Message:\n\
         {}\n\
         \n\
         ---\n\
         This message was sent from the BDA Built website contact form.",
        form.name,
        form.email,
        or_placeholder(&form.phone, "Not provided"),
        or_placeholder(&form.company, "Not provided"),
        or_placeholder(&form.project_type, "Not specified"),
        form.message,
    )
}

/// A validated submission ready for delivery.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub recipient: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Where accepted submissions go.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, submission: &Submission) -> Result<()>;
}

/// Writes each submission to the log at `info`.
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn deliver(&self, submission: &Submission) -> Result<()> {
        tracing::info!(
            id = %submission.id,
            to = %submission.recipient,
            from = %submission.reply_to,
            subject = %submission.subject,
            "contact form submission\n{}",
            submission.body
        );
        Ok(())
    }
}

/// Returned to the submitter.
#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub id: Uuid,
    pub recipient: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ContactIntake {
    recipient: String,
    sink: Arc<dyn SubmissionSink>,
}

impl ContactIntake {
    pub fn new(recipient: impl Into<String>, sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            recipient: recipient.into(),
            sink,
        }
    }

    /// Intake that logs submissions.
    pub fn logging(recipient: impl Into<String>) -> Self {
        Self::new(recipient, Arc::new(LogSink))
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub async fn submit(&self, form: ContactForm) -> std::result::Result<ContactReceipt, ContactError> {
        form.validate()?;

        let submission = Submission {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            recipient: self.recipient.clone(),
            reply_to: form.email.clone(),
            subject: format!("New Contact Form Submission from {}", form.name),
            body: format_submission(&form),
        };

        self.sink
            .deliver(&submission)
            .await
            .map_err(ContactError::Delivery)?;

        Ok(ContactReceipt {
            id: submission.id,
            recipient: submission.recipient,
            received_at: submission.received_at,
        })
    }
}
