use std::path::Path;

use axum::{
    Router,
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::debug;

use crate::api::{ApiError, handle_panic};

/// Static files of a built frontend; unknown paths get `index.html` for client-side routing.
type Frontend = ServeDir<ServeFile>;

const API_PREFIX: &str = "/api";

fn is_api_path(path: &str) -> bool {
    path == API_PREFIX
        || path
            .strip_prefix(API_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Wraps the API with the fallback for unmatched paths and the HTTP middleware stack.
pub fn create_app(api: Router, static_dir: Option<&Path>) -> Router {
    let frontend = static_dir.map(|dir| {
        debug!("Serving frontend from {}", dir.display());
        ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
    });

    api.fallback(move |request: Request| fallback(frontend.clone(), request))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn fallback(frontend: Option<Frontend>, request: Request) -> Response {
    if is_api_path(request.uri().path()) {
        debug!(path = request.uri().path(), "Unknown API endpoint");
        return ApiError::EndpointNotFound.into_response();
    }

    match frontend {
        Some(frontend) => match frontend.oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        None => ApiError::NotFound.into_response(),
    }
}

#[cfg(test)]
pub(crate) fn sample_app(static_dir: Option<&Path>) -> Router {
    use crate::{api::create_api, services::PortfolioHandle};
    use domain::PortfolioStore;

    let store = PortfolioStore::with_sample_data().unwrap();
    create_app(create_api(PortfolioHandle::new(store)), static_dir)
}
