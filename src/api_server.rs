// Axum API Server Module
//
// Purpose: REST API for farm loan risk assessment
// Scoring is CPU-bound but cheap per farm; batches go to the blocking pool.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::assessor::RiskAssessor;
use crate::batch::BatchSummary;
use crate::scoring::load_optional_model;
use crate::types::{FarmAssessmentInput, RiskAssessmentResult};
use crate::validation::{validate, ValidationError};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub assessor: Arc<RiskAssessor>,
}

impl AppState {
    pub fn new(assessor: RiskAssessor) -> Self {
        Self {
            assessor: Arc::new(assessor),
        }
    }

    /// Load the model artifact if present, otherwise serve rule-based scores
    pub fn from_model_path(model_path: &Path) -> Self {
        tracing::info!("Loading risk model from {:?}...", model_path);
        Self::new(RiskAssessor::new(load_optional_model(model_path)))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Prediction endpoints
        .route("/predict", post(predict))
        .route("/api/predict", post(predict))
        .route("/api/predict/batch", post(predict_batch))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "FieldScore AI API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/predict": "POST - Get farm risk score prediction",
            "/api/predict/batch": "POST - Score many farms at once",
            "/health": "GET - Service and model status"
        }
    }))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "model_loaded": state.assessor.has_model(),
        "model": state.assessor.model_name(),
    }))
}

async fn predict(
    State(state): State<AppState>,
    Json(farm): Json<FarmAssessmentInput>,
) -> Result<Json<RiskAssessmentResult>, AppError> {
    validate(&farm).map_err(|e| AppError::Validation(e.0.into_iter().map(FieldError::from).collect()))?;

    let assessment = state.assessor.assess(&farm);
    tracing::info!(
        "Assessed {} farm: score {} ({})",
        farm.crop_type,
        assessment.result.risk_score,
        assessment.result.category_class
    );

    Ok(Json(assessment.result))
}

#[derive(Deserialize)]
struct BatchRequest {
    farms: Vec<FarmAssessmentInput>,
}

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<RiskAssessmentResult>,
    summary: BatchSummary,
}

async fn predict_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let mut invalid = Vec::new();
    for (index, farm) in payload.farms.iter().enumerate() {
        if let Err(e) = validate(farm) {
            invalid.extend(e.0.into_iter().map(|err| FieldError::at(index, err)));
        }
    }
    if !invalid.is_empty() {
        return Err(AppError::Validation(invalid));
    }

    tracing::info!("Scoring batch of {} farms", payload.farms.len());

    // CPU-bound work: run in blocking thread pool
    let assessor = state.assessor.clone();
    let response = tokio::task::spawn_blocking(move || {
        let assessments = assessor.assess_batch(&payload.farms);
        let summary = BatchSummary::from_assessments(&assessments);
        BatchResponse {
            results: assessments.into_iter().map(|a| a.result).collect(),
            summary,
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(response))
}

// ============================================================================
// Error Handling
// ============================================================================

/// Field-level validation failure, as reported to clients
#[derive(Debug, Serialize)]
struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    field: &'static str,
    value: f64,
    message: String,
}

impl FieldError {
    fn at(index: usize, err: ValidationError) -> Self {
        Self {
            index: Some(index),
            ..Self::from(err)
        }
    }
}

impl From<ValidationError> for FieldError {
    fn from(err: ValidationError) -> Self {
        Self {
            index: None,
            field: err.field,
            value: err.value,
            message: err.to_string(),
        }
    }
}

#[derive(Debug)]
enum AppError {
    Validation(Vec<FieldError>),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!("Rejected request with {} invalid field(s)", errors.len());
                let body = Json(serde_json::json!({
                    "error": "validation failed",
                    "detail": errors,
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                let body = Json(serde_json::json!({ "error": message }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
