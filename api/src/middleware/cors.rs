//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin. Elsewhere only the origins listed in
//! `server.cors.allowed_origins` are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use tb_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the configured environment.
///
/// Set origins with `TB__SERVER__CORS__ALLOWED_ORIGINS` (comma separated) or the
/// environment's config file.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age_secs);

    if environment.is_development() {
        tracing::debug!("Configuring permissive CORS for development");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin, "Adding allowed CORS origin");
            cors.allowed_origin(origin)
        })
}
