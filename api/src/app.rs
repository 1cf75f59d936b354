//! Application state and factory
//!
//! This module holds the state shared by every worker and provides the
//! factory for creating the Actix-web application.

use actix_web::{web, App, HttpResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use tb_core::repositories::{RefreshTokenRepository, UserRepository};
use tb_core::services::AuthGateway;
use tb_infra::database::DatabasePool;
use tb_shared::{error_codes, CorsConfig, Environment, ErrorResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::identity;

/// State shared by all handlers
pub struct AppState<R: RefreshTokenRepository, U: UserRepository> {
    pub gateway: Arc<AuthGateway<R, U>>,
    /// Upper bound on a single gateway call
    pub request_timeout: Duration,
    pub environment: Environment,
    pub cors: CorsConfig,
    /// Pool probed by `/health` when the MySQL stores are in use
    pub database: Option<DatabasePool>,
}

impl<R: RefreshTokenRepository, U: UserRepository> AppState<R, U> {
    pub fn new(gateway: Arc<AuthGateway<R, U>>, request_timeout: Duration) -> Self {
        Self {
            gateway,
            request_timeout,
            environment: Environment::default(),
            cors: CorsConfig::default(),
            database: None,
        }
    }

    /// Use the configured environment and CORS settings
    pub fn with_cors(mut self, environment: Environment, cors: CorsConfig) -> Self {
        self.environment = environment;
        self.cors = cors;
        self
    }

    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, U>(
    app_state: web::Data<AppState<R, U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    let bearer = JwtAuth::new(app_state.gateway.codec().clone());
    let cors = create_cors(app_state.environment, &app_state.cors);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(crate::handlers::error_handler::json_error_handler))
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<R, U>))
        .service(
            web::scope("/api/v1/identity")
                .route("/register", web::post().to(identity::register::<R, U>))
                .route("/login", web::post().to(identity::login::<R, U>))
                .route("/refresh", web::post().to(identity::refresh::<R, U>))
                .service(
                    web::resource("/logout")
                        .wrap(bearer.clone())
                        .route(web::post().to(identity::logout::<R, U>)),
                )
                .service(web::resource("/me").wrap(bearer).route(web::get().to(identity::me))),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Answers 503 when the configured database does not respond.
async fn health_check<R, U>(state: web::Data<AppState<R, U>>) -> HttpResponse
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    let database = match &state.database {
        None => "in-memory",
        Some(pool) => match pool.health_check().await {
            Ok(true) => "up",
            Ok(false) => "down",
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                "down"
            }
        },
    };

    let healthy = database != "down";
    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "tweetbook-identity",
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
