//! Application factory
//!
//! Builds the actix-web `App` for both the binary and the integration tests.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use pa_core::services::claim::ClaimForwarderTrait;
use pa_core::services::otp::{MailerTrait, OtpStore, VerificationGate};
use pa_shared::config::AppConfig;

use crate::handlers::json_error_handler;
use crate::middleware::{create_cors, OtpGate};
use crate::routes::{
    health::{health_check, not_found},
    otp::{check_otp_status, send_otp, verify_otp},
    preauth::submit_preauth,
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<S, M, F>(
    app_state: web::Data<AppState<S, M, F>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    M: MailerTrait + 'static,
    F: ClaimForwarderTrait + 'static,
{
    let gate: Arc<dyn VerificationGate> = app_state.otp_service.clone();
    let cors = create_cors(config.environment, &config.cors);
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Registered last so it runs first: request span, then CORS
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/send-otp", web::post().to(send_otp::<S, M, F>))
                .route("/verify-otp", web::post().to(verify_otp::<S, M, F>))
                .route("/check-otp-status", web::post().to(check_otp_status::<S, M, F>))
                .service(
                    web::resource("/submit-preauth")
                        .wrap(OtpGate::new(gate))
                        .route(web::post().to(submit_preauth::<S, M, F>)),
                ),
        )
        .default_service(web::route().to(not_found))
}
