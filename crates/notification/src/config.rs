use lettre::Address;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Mailbox receiving the owner notifications.
    #[serde(default = "default_owner_address")]
    pub owner_address: String,
    /// Display name used in the auto-reply sender and signature.
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    #[serde(default = "default_owner_title")]
    pub owner_title: String,
    /// Public URL of the site, used to build dashboard links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Log outgoing mail instead of talking to the SMTP server.
    #[serde(default)]
    pub skip_sending: bool,
    #[serde(default = "default_true")]
    pub notify_owner: bool,
    #[serde(default = "default_true")]
    pub auto_reply: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            owner_address: default_owner_address(),
            owner_name: default_owner_name(),
            owner_title: default_owner_title(),
            base_url: default_base_url(),
            skip_sending: false,
            notify_owner: true,
            auto_reply: true,
        }
    }
}

impl EmailConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.smtp_host.trim().is_empty() {
            anyhow::bail!("email.smtp_host must not be empty");
        }

        if self.smtp_port == 0 {
            anyhow::bail!("email.smtp_port must be greater than 0");
        }

        self.from_address
            .parse::<Address>()
            .map_err(|e| anyhow::anyhow!("email.from_address is invalid: {e}"))?;

        self.owner_address
            .parse::<Address>()
            .map_err(|e| anyhow::anyhow!("email.owner_address is invalid: {e}"))?;

        Ok(())
    }

    pub(crate) fn dashboard_url(&self, id: &str) -> String {
        format!("{}/admin/contacts/{id}", self.base_url.trim_end_matches('/'))
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_address() -> String {
    "noreply@folio.localhost".to_string()
}

fn default_owner_address() -> String {
    "owner@folio.localhost".to_string()
}

fn default_owner_name() -> String {
    "Komarthi Dileep Kumar".to_string()
}

fn default_owner_title() -> String {
    "Full-Stack Web Developer".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_true() -> bool {
    true
}
