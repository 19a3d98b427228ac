//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HS256 secret used to verify bearer tokens.
    pub jwt_secret: String,
    /// Lifetime of tokens minted by `issue_token`.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    pub mail: MailConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// Outbound mail provider settings.
pub struct MailConfig {
    /// Base URL of the provider HTTP API.
    pub api_url: String,
    /// Emails are only logged when no key is configured.
    #[serde(default)]
    pub api_key: Option<String>,
    pub from_address: String,
    pub from_name: String,
    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Loads `config/default`, the optional `config/{APP_ENV}` profile and
    /// `APP_*` environment variables (`APP_MAIL__API_KEY` for nested keys).
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        ::config::Config::builder()
            .add_source(::config::File::with_name("config/default"))
            .add_source(::config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                ::config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_mail_timeout_secs() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_use_defaults() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "address": "127.0.0.1",
            "port": 8080,
            "database_url": "app.db",
            "jwt_secret": "secret",
            "mail": {
                "api_url": "https://api.resend.com",
                "from_address": "estimates@example.com",
                "from_name": "Estimates"
            }
        }))
        .unwrap();

        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.mail.timeout_secs, 15);
        assert!(config.mail.api_key.is_none());
    }
}
