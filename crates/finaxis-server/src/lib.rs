//! Finaxis Web Server
//!
//! Axum-based REST API over the Finaxis engine.
//!
//! Security features:
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Security headers on every response
//! - Protocol requests validated against the configured limits
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use finaxis_core::goals::PROTOCOL_VERSION;
use finaxis_core::EngineConfig;

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub engine: EngineConfig,
}

/// Create the application router
pub fn create_router(engine: EngineConfig, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { engine });

    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Forecast
        .route("/forecast", post(handlers::forecast))
        .route("/forecast/year", post(handlers::forecast_year))
        .route("/forecast/update", post(handlers::forecast_update))
        // Axis analysis
        .route("/analysis", post(handlers::analysis))
        // Goals
        .route("/goals/linear", post(handlers::goal_linear))
        .route("/goals/progressive", post(handlers::goal_progressive))
        .route("/goals/optimized", post(handlers::goal_optimized))
        .route("/goals/feasibility", post(handlers::goal_feasibility))
        .route("/goals/consistency", post(handlers::goal_consistency))
        .route("/goals/challenge", post(handlers::goal_challenge))
        .route("/goals/progress", post(handlers::goal_progress))
        // Protocols
        .route("/protocols/progressive", post(handlers::protocol_progressive))
        .route("/protocols/optimized", post(handlers::protocol_optimized))
        .route("/protocols/compare", post(handlers::protocol_compare))
        .route("/protocols/simulate", post(handlers::protocol_simulate))
        .route("/protocols/info", get(handlers::protocol_info));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    // Security headers
    // CSP: JSON-only API, nothing may be embedded or executed
    let csp_value = HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'");

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(security_headers)
}

/// Start the server with default configuration
pub async fn serve(engine: EngineConfig, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(engine, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    engine: EngineConfig,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("CORS: same-origin only");
    } else {
        info!("CORS origins: {}", config.allowed_origins.join(", "));
    }

    let app = create_router(engine, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    /// Set for rejected input; the body then follows the protocol rejection shape
    suggestion: Option<String>,
    internal: Option<anyhow::Error>,
}

impl AppError {
    /// Input that fails validation (422)
    pub fn rejected(reason: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: reason.to_string(),
            suggestion: Some("Review the request parameters.".to_string()),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = match self.suggestion {
            Some(suggestion) => Json(serde_json::json!({
                "protocol_version": PROTOCOL_VERSION,
                "decision": "rejected",
                "reason": self.message,
                "suggestion": suggestion,
            })),
            None => Json(serde_json::json!({
                "error": self.message
            })),
        };

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Invalid caller input surfaces its reason; everything else stays generic
        if let Some(finaxis_core::Error::InvalidData(reason)) =
            err.downcast_ref::<finaxis_core::Error>()
        {
            return Self::rejected(reason);
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            suggestion: None,
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
