//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use cloudinary::{CloudinaryOptions, CloudinaryService};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::domains::content::models::ContentKind;
use crate::kernel::{BaseMailer, CloudinaryAdapter, LogMailer, ResendMailer, ServerDeps};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{content, health_handler, users};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router and its dependency container.
///
/// Constructs the production service wiring (Cloudinary uploader, Resend
/// mailer when a key is configured, JWT service) around the given pool.
pub fn build_app(pool: PgPool, config: &Config) -> (Router, Arc<ServerDeps>) {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));

    let cloudinary = Arc::new(CloudinaryService::new(CloudinaryOptions {
        cloud_name: config.cloudinary_cloud_name.clone(),
        api_key: config.cloudinary_api_key.clone(),
        api_secret: config.cloudinary_api_secret.clone(),
    }));

    let mailer: Arc<dyn BaseMailer> = match &config.resend_api_key {
        Some(key) => Arc::new(ResendMailer::new(key.clone(), config.mail_from.clone())),
        None => {
            tracing::warn!("RESEND_API_KEY not set, emails will be logged instead of sent");
            Arc::new(LogMailer)
        }
    };

    let deps = Arc::new(ServerDeps::new(
        pool,
        Arc::new(CloudinaryAdapter::new(cloudinary)),
        mailer,
        jwt_service,
        config.admin_emails.clone(),
    ));

    let app = app_with_deps(deps.clone(), &config.allowed_origins);
    (app, deps)
}

/// Assemble the router around an existing dependency container.
///
/// Tests call this directly with mock dependencies.
pub fn app_with_deps(deps: Arc<ServerDeps>, allowed_origins: &[String]) -> Router {
    let app_state = AxumAppState {
        db_pool: deps.db_pool.clone(),
        deps: deps.clone(),
    };

    // CORS only admits the configured frontend origins
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring malformed CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = deps.jwt_service.clone();

    Router::new()
        .nest("/users", users::router())
        .nest("/posts", content::router(ContentKind::Post))
        .nest("/courses", content::router(ContentKind::Course))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(app_state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
