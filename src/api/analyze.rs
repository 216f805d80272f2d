//! REST API endpoint for product image analysis

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::api::error::{ApiError, ErrorResponse};
use crate::app::AppState;
use crate::model::{ClassificationVerdict, ImageQuality, VerdictStatus};

/// Request body for image analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Product photo encoded as a self-contained data URI
    pub image: Option<String>,
}

/// Analyze a product image and return the classification verdict
#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Classification verdict", body = ClassificationVerdict),
        (status = 400, description = "No image provided", body = ErrorResponse),
        (status = 500, description = "Service misconfigured", body = ErrorResponse),
        (status = 502, description = "Upstream model failed", body = ErrorResponse)
    ),
    tag = "analyze"
)]
#[post("/v1/analyze")]
pub async fn analyze(
    state: web::Data<AppState>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let image = request.image.as_deref().unwrap_or("");

    tracing::info!(request_id = %request_id, image_bytes = image.len(), "Analyze request received");

    let verdict = state.classification.analyze(image).await?;

    tracing::info!(
        request_id = %request_id,
        status = %verdict.status,
        confidence = verdict.confidence,
        "Analyze request complete"
    );

    Ok(HttpResponse::Ok().json(verdict))
}

/// OpenAPI documentation for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Halal Scan API",
        description = "Classifies photographed food products as halal, haram or unknown"
    ),
    paths(
        analyze,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        AnalyzeRequest,
        ClassificationVerdict,
        VerdictStatus,
        ImageQuality,
        ErrorResponse,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus,
        crate::api::health::DependencyHealth,
    ))
)]
pub struct ApiDoc;

/// Configure analyze routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}
