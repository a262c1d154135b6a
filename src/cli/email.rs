use anyhow::Result;
use folio_notification::EmailService;

use folio::Config;

/// Check the SMTP settings by opening a connection without sending anything
pub async fn test_email(config: &Config) -> Result<()> {
    let service = EmailService::new(&config.email)?;

    if !service.test_connection().await {
        anyhow::bail!(
            "SMTP connection to {}:{} failed",
            config.email.smtp_host,
            config.email.smtp_port
        );
    }

    tracing::info!(
        smtp_host = %config.email.smtp_host,
        smtp_port = config.email.smtp_port,
        "Email configuration is valid"
    );

    Ok(())
}
