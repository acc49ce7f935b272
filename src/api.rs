use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::detection::{EngineError, RawDetection, DEFAULT_MIN_CONFIDENCE};
use crate::engine::{DetectResponse, GuidanceEngine, QueryDetectResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct DetectRequest {
    pub detections: Vec<RawDetection>,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryDetectRequest {
    #[serde(flatten)]
    pub detect: DetectRequest,
    #[serde(default)]
    pub query: String,
}

fn default_min_confidence() -> f32 {
    DEFAULT_MIN_CONFIDENCE
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Shared state is just the engine: it is pure and read-only, so no mutex
/// is needed around it.
pub struct ApiState {
    pub engine: GuidanceEngine,
}

impl ApiState {
    pub fn new(engine: GuidanceEngine) -> Self {
        Self { engine }
    }
}

pub fn create_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/detect", post(detect_handler))
        .route("/detect-with-query", post(detect_with_query_handler))
        .with_state(Arc::new(state))
        // Any-origin CORS: the browser frontend is served separately.
        .layer(CorsLayer::permissive())
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "Navigation guidance engine",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn detect_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = state
        .engine
        .detect(
            &request.detections,
            request.frame_width,
            request.frame_height,
            request.min_confidence,
        )
        .map_err(map_engine_error)?;
    Ok(Json(response))
}

async fn detect_with_query_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<QueryDetectRequest>,
) -> Result<Json<QueryDetectResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = state
        .engine
        .detect_with_query(
            &request.detect.detections,
            request.detect.frame_width,
            request.detect.frame_height,
            request.detect.min_confidence,
            &request.query,
        )
        .map_err(map_engine_error)?;
    Ok(Json(response))
}

fn map_engine_error(err: EngineError) -> (StatusCode, Json<ErrorResponse>) {
    error!("Detection request rejected: {}", err);
    match err {
        EngineError::InvalidFrameContext { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: err.to_string(),
                code: "INVALID_FRAME_CONTEXT".to_string(),
            }),
        ),
    }
}

pub async fn start_api_server(engine: GuidanceEngine, host: &str, port: u16) -> anyhow::Result<()> {
    let state = ApiState::new(engine);
    let app = create_api_router(state);

    let addr = format!("{host}:{port}");
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
