//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `mail` - SMTP account for OTP and receipt mails
//! - `otp` - OTP lifetime, verification policy and delivery bounds
//! - `server` - HTTP server and CORS configuration
//! - `webhook` - Downstream claim workflow endpoint

pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;
pub mod webhook;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub use environment::{Environment, LoggingConfig};
pub use mail::MailConfig;
pub use otp::{OtpConfig, VerificationPolicy, DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_TTL_MINUTES};
pub use server::{CorsConfig, ServerConfig};
pub use webhook::WebhookConfig;

/// Prefix for layered environment overrides, e.g. `PREAUTH__OTP__TTL_MINUTES`
pub const ENV_PREFIX: &str = "PREAUTH";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Claim webhook configuration
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from the conventional environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = ["ENVIRONMENT", "ENV", "NODE_ENV"]
            .iter()
            .find_map(|key| lookup(key))
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or(server_defaults.host),
            port: parse_or(&lookup, "PORT", server_defaults.port),
            workers: parse_or(&lookup, "WORKERS", server_defaults.workers),
            max_payload_size: server_defaults.max_payload_size,
        };

        let cors = lookup("ALLOWED_ORIGINS")
            .map(|list| CorsConfig::from_origin_list(&list))
            .unwrap_or_default();

        let otp_defaults = OtpConfig::default();
        let otp = OtpConfig {
            ttl_minutes: parse_or(&lookup, "OTP_TTL_MINUTES", otp_defaults.ttl_minutes),
            policy: parse_or(&lookup, "OTP_POLICY", otp_defaults.policy),
            dev_echo: lookup("OTP_DEV_ECHO")
                .map(|v| parse_flag(&v))
                .unwrap_or(otp_defaults.dev_echo),
            sweep_interval_secs: parse_or(
                &lookup,
                "OTP_SWEEP_INTERVAL_SECS",
                otp_defaults.sweep_interval_secs,
            ),
            delivery_timeout_secs: parse_or(
                &lookup,
                "DELIVERY_TIMEOUT_SECS",
                otp_defaults.delivery_timeout_secs,
            ),
        };

        let mail_defaults = MailConfig::default();
        let mail = MailConfig {
            smtp_host: lookup("SMTP_HOST").unwrap_or(mail_defaults.smtp_host),
            smtp_port: parse_or(&lookup, "SMTP_PORT", mail_defaults.smtp_port),
            username: lookup("EMAIL_USER"),
            password: lookup("EMAIL_PASS"),
            from_address: lookup("MAIL_FROM"),
        };

        let webhook = WebhookConfig {
            url: lookup("WEBHOOK_URL").filter(|u| !u.trim().is_empty()),
            timeout_secs: parse_or(&lookup, "WEBHOOK_TIMEOUT_SECS", WebhookConfig::default().timeout_secs),
        };

        Self {
            environment,
            server,
            cors,
            logging: LoggingConfig::for_environment(environment),
            otp,
            mail,
            webhook,
        }
    }

    /// Load layered configuration: an optional TOML file, then `PREAUTH__*` overrides
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
