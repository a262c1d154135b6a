//! Email notification service using lettre

use lettre::{
    Address, Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};

use folio_contact::DeliveryError;

use crate::EmailConfig;

/// Email service for sending notifications
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    pub(crate) config: EmailConfig,
    skip_sending: bool,
}

/// Envelope of a single outgoing email.
pub(crate) struct Outgoing {
    pub from: Mailbox,
    pub to: Mailbox,
    pub reply_to: Option<Mailbox>,
    pub subject: String,
    pub html: String,
    pub plain: String,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        if config.skip_sending {
            return Self::new_mock(config);
        }

        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );

            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            config: config.clone(),
            skip_sending: false,
        })
    }

    /// Email service that logs messages instead of sending them.
    pub fn new_mock(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = SmtpTransport::builder_dangerous("localhost")
            .port(1025)
            .build();

        tracing::info!(
            from = %config.from_address,
            "Mock email service initialized (SMTP calls skipped)"
        );

        Ok(Self {
            mailer,
            config: config.clone(),
            skip_sending: true,
        })
    }

    pub(crate) fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, DeliveryError> {
        let address = address
            .parse::<Address>()
            .map_err(|e| DeliveryError::Address(format!("{address}: {e}")))?;

        Ok(Mailbox::new(name.map(str::to_owned), address))
    }

    pub(crate) fn build(outgoing: Outgoing) -> Result<Message, DeliveryError> {
        let mut builder = Message::builder()
            .from(outgoing.from)
            .to(outgoing.to)
            .subject(outgoing.subject);

        if let Some(reply_to) = outgoing.reply_to {
            builder = builder.reply_to(reply_to);
        }

        builder
            .multipart(MultiPart::alternative_plain_html(
                outgoing.plain,
                outgoing.html,
            ))
            .map_err(|e| DeliveryError::Message(e.to_string()))
    }

    #[tracing::instrument(skip_all, fields(to, subject))]
    pub(crate) async fn send(&self, outgoing: Outgoing) -> Result<(), DeliveryError> {
        tracing::Span::current()
            .record("to", outgoing.to.email.to_string())
            .record("subject", &outgoing.subject);

        let message = Self::build(outgoing)?;

        if self.skip_sending {
            tracing::info!("Mock email service: Skipping actual SMTP send");
            return Ok(());
        }

        tracing::info!("Sending email");

        let mailer = self.mailer.clone();
        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        Ok(())
    }

    /// Opens a connection to the SMTP server without sending anything.
    pub async fn test_connection(&self) -> bool {
        if self.skip_sending {
            tracing::info!("Mock email service: Skipping SMTP connection test");
            return true;
        }

        let mailer = self.mailer.clone();
        match tokio::task::spawn_blocking(move || mailer.test_connection()).await {
            Ok(Ok(true)) => {
                tracing::info!("Email configuration is valid");
                true
            }
            Ok(Ok(false)) => {
                tracing::error!("Email configuration test failed: server rejected connection");
                false
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Email configuration test failed");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Email configuration test aborted");
                false
            }
        }
    }
}
