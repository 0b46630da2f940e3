use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{
    dashboard::{DashboardData, DashboardView},
    error::{ApiError, ErrorCode},
    protocol::TtsRequest,
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod upstream;

use app_state::AppState;
use config::load_settings;
use upstream::UpstreamTts;

const MAX_BODY_BYTES: usize = 16 * 1024;
const MAX_TEXT_CHARS: usize = 2_500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    if settings.tts_api_key.is_none() {
        warn!("VOICE_ELEVEN is not set; upstream text-to-speech calls will be rejected");
    }
    let upstream = UpstreamTts::from_settings(&settings)?;
    info!(endpoint = %upstream.endpoint(), "tts upstream configured");

    let state = AppState {
        synthesizer: Arc::new(upstream),
        dashboard: Arc::new(DashboardData::sample()),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/dashboard", get(dashboard))
        .route(
            "/api/tts",
            post(synthesize_speech).fallback(method_not_allowed),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.dashboard.view())
}

async fn method_not_allowed() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiError::new(
            ErrorCode::MethodNotAllowed,
            "method not allowed",
        )),
    )
}

async fn synthesize_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let Json(req) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;

    let text = req.text.trim();
    if text.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, "text cannot be empty")),
        ));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ApiError::new(
                ErrorCode::PayloadTooLarge,
                format!("text exceeds {MAX_TEXT_CHARS} characters"),
            )),
        ));
    }

    let audio = state.synthesizer.synthesize(text).await.map_err(|e| {
        error!(error = %e, "tts upstream failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(ErrorCode::Internal, "failed to generate audio")),
        )
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        audio,
    ))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
