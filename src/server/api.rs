//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::core::config::ServiceConfig;
use crate::core::errors::TranslationError;
use crate::core::models::{ChatRequest, ChatResponse, ErrorBody, HealthResponse};
use crate::server::provider::OpenAiProvider;
use crate::server::service::TranslationService;

/// Application state
#[derive(Clone)]
pub struct AppState {
    service: TranslationService,
}

impl IntoResponse for TranslationError {
    fn into_response(self) -> Response {
        let status = match self {
            TranslationError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translation handler
async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, TranslationError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        TranslationError::BadRequest {
            message: rejection.body_text(),
        }
    })?;

    let response = state.service.translate(&request).await?;
    Ok(Json(response))
}

/// Build the router around a translation service
pub fn router(service: TranslationService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/", get(health_check))
        .route("/api/chat", post(chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, service: TranslationService) -> anyhow::Result<()> {
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run the HTTP server
pub async fn run_server(config: ServiceConfig) -> anyhow::Result<()> {
    let provider = Arc::new(OpenAiProvider::new(&config)?);
    let service = TranslationService::new(provider);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("Starting server on {} (model {})", addr, config.model);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, service).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
