use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pa_api::{create_app, AppState};
use pa_core::services::claim::{ClaimServiceConfig, ClaimSubmissionService};
use pa_core::services::otp::{OtpService, OtpServiceConfig};
use pa_infra::{create_mailer, InMemoryOtpStore, WebhookForwarder};
use pa_shared::config::{AppConfig, LoggingConfig};

/// Optional path to a layered TOML configuration file
const CONFIG_PATH_VAR: &str = "PREAUTH_CONFIG";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => AppConfig::load(Some(&path)).with_context(|| format!("loading configuration from {}", path))?,
        Err(_) => AppConfig::from_env(),
    };

    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        policy = ?config.otp.policy,
        ttl_minutes = config.otp.ttl_minutes,
        "Starting pre-authorization API server"
    );
    if config.otp.dev_echo && config.environment.is_production() {
        tracing::warn!("OTP_DEV_ECHO is enabled in production; codes will be returned to clients");
    }

    let delivery_timeout = Duration::from_secs(config.otp.delivery_timeout_secs);
    let store = Arc::new(InMemoryOtpStore::new());
    let mailer = Arc::new(create_mailer(&config.mail, delivery_timeout, config.otp.dev_echo));
    let forwarder = Arc::new(WebhookForwarder::new(&config.webhook).context("building webhook client")?);
    if !forwarder.is_enabled() {
        tracing::info!("WEBHOOK_URL not set; accepted claims will not be forwarded");
    }

    let otp_service = Arc::new(OtpService::new(
        store,
        mailer,
        OtpServiceConfig::from(&config.otp),
    ));
    let claim_service = Arc::new(ClaimSubmissionService::new(
        Arc::clone(&otp_service),
        forwarder,
        ClaimServiceConfig {
            delivery_timeout_secs: config.otp.delivery_timeout_secs,
            webhook_timeout_secs: config.webhook.timeout_secs,
        },
    ));

    let sweeper = Arc::new(otp_service.sweeper(config.otp.sweep_interval_secs));
    let _sweeper_handle = sweeper.start_background_task();

    let app_state = web::Data::new(AppState::new(otp_service, claim_service));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let workers = config.server.workers;
    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await
        .context("server error")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(logging.with_target)
        .with_ansi(logging.colored)
        .init();
}
