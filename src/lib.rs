pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use routes::{
    health::health_check,
    view::{
        next_page, previous_page, set_page, set_page_size, show_view, toggle_sort, view_snapshot,
    },
};
use services::store::Store;

/// Builds the HTTP surface of the dataset view.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/", get(show_view))
        .route("/status", get(health_check))
        .route("/api/view", get(view_snapshot))
        .route("/sort/toggle", post(toggle_sort))
        .route("/page-size", post(set_page_size))
        .route("/page/previous", post(previous_page))
        .route("/page/next", post(next_page))
        .route("/page/:page", post(set_page))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
