use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use domain::{
    allocation::Allocation,
    holding::Holding,
    performance::Performance,
    summary::Summary,
};
use serde::Serialize;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::AppState;
use super::error::{ApiError, ApiResult, ErrorBody};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_holdings))
        .routes(routes!(get_allocation))
        .routes(routes!(get_performance))
        .routes(routes!(get_summary))
}

/// Serializes the whole body up front so a failure never yields a partial response.
///
/// Store views always serialize; a body that does not (e.g. non-string map keys)
/// becomes a JSON 500 instead of axum's plain-text one.
fn render<T>(body: &T, view: &str) -> ApiResult<Response>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_vec(body) {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response()),
        Err(e) => {
            error!("Failed to serialize {view}: {e}");
            Err(ApiError::Internal(format!("Failed to fetch {view}")))
        }
    }
}

/// Get all holdings
///
/// Every position with its market value and unrealised gain, in portfolio order.
#[utoipa::path(
    get,
    path = "/api/portfolio/holdings",
    responses(
        (status = 200, description = "Holdings found", body = Vec<Holding>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = super::PORTFOLIO_TAG
)]
async fn get_holdings(State(state): State<AppState>) -> ApiResult<Response> {
    render(state.store().get_holdings(), "holdings")
}

/// Get allocation
///
/// Portfolio value broken down by sector and by market-cap class.
#[utoipa::path(
    get,
    path = "/api/portfolio/allocation",
    responses(
        (status = 200, description = "Allocation found", body = Allocation),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = super::PORTFOLIO_TAG
)]
async fn get_allocation(State(state): State<AppState>) -> ApiResult<Response> {
    render(state.store().get_allocation(), "allocation data")
}

/// Get performance
///
/// Monthly timeline against NIFTY 50 and gold, plus 1 month, 3 month and 1 year returns.
#[utoipa::path(
    get,
    path = "/api/portfolio/performance",
    responses(
        (status = 200, description = "Performance found", body = Performance),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = super::PORTFOLIO_TAG
)]
async fn get_performance(State(state): State<AppState>) -> ApiResult<Response> {
    render(state.store().get_performance(), "performance data")
}

/// Get summary
#[utoipa::path(
    get,
    path = "/api/portfolio/summary",
    responses(
        (status = 200, description = "Summary found", body = Summary),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = super::PORTFOLIO_TAG
)]
async fn get_summary(State(state): State<AppState>) -> ApiResult<Response> {
    render(state.store().get_summary(), "summary data")
}
