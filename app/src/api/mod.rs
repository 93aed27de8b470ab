use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::services::PortfolioHandle;

mod error;
mod portfolio;

pub use error::{ApiError, ErrorBody, handle_panic};

const PORTFOLIO_TAG: &str = "portfolio";
const SYSTEM_TAG: &str = "system";

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            ErrorBody,
            HealthStatus
        )
    ),
    tags(
        (name = PORTFOLIO_TAG, description = "Read-only portfolio views"),
        (name = SYSTEM_TAG, description = "Service liveness")
    )
)]
struct ApiDoc;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Get health of the API.
#[utoipa::path(
    method(get, head),
    path = "/api/health",
    responses(
        (status = OK, description = "Service is up", body = HealthStatus)
    ),
    tag = SYSTEM_TAG
)]
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}

pub type AppState = PortfolioHandle;

/// Every `/api` route plus the OpenAPI documentation.
///
/// Unknown paths are left to the application fallback (see `web::create_app`).
pub fn create_api(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health))
        .merge(portfolio::router())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/apidoc/openapi.json", api))
        .method_not_allowed_fallback(error::method_not_allowed)
        .with_state(state)
}
