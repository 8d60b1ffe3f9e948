//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    error::{ErrorBody, NOT_FOUND_MESSAGE},
    product::{get_all_products_endpoint, search_products_endpoint},
    report::{
        get_bar_chart_endpoint, get_combined_data_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route is a `GET` and accepts requests from any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_all_products_endpoint))
        .route(endpoints::ALL, get(search_products_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED_DATA, get(get_combined_data_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The JSON response for routes that do not exist.
async fn get_404_not_found() -> Response {
    ErrorBody::response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
}
