use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_notification::EmailConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteConfig {
    /// TOML file with the portfolio content. The bundled content is served when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOLIO__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite:folio.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy environment variables without prefix
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(smtp_username) = env::var("SMTP_USERNAME") {
            builder = builder.set_override("email.smtp_username", smtp_username)?;
        }
        if let Ok(smtp_password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", smtp_password)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        self.email.validate().map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            email: EmailConfig::default(),
            observability: ObservabilityConfig::default(),
            site: SiteConfig::default(),
        }
    }

    #[test]
    fn test_validation_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_owner_address() {
        let mut config = config();
        config.email.owner_address = "owner-at-example".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("folio.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 8080

[email]
owner_address = "me@example.com"
skip_sending = true
auto_reply = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_string_lossy().into_owned())).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.email.owner_address, "me@example.com");
        assert!(config.email.skip_sending);
        assert!(config.email.notify_owner);
        assert!(!config.email.auto_reply);
        assert_eq!(config.email.smtp_port, 1025);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.site.path.is_none());
    }
}
