//! HTTP API server for the page builder backend.
//!
//! Exposes page and widget management as JSON over REST, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::{PageService, WidgetService};
use metrics_exporter_prometheus::PrometheusHandle;
use page_store::PageStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: PageStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health::<S>))
        .route(
            "/pages",
            get(routes::pages::list::<S>).post(routes::pages::create::<S>),
        )
        .route(
            "/pages/{id}",
            get(routes::pages::get::<S>)
                .put(routes::pages::update::<S>)
                .delete(routes::pages::delete::<S>),
        )
        .route("/pages/{id}/widgets", post(routes::widgets::create::<S>))
        .route(
            "/pages/{id}/widgets/reorder",
            post(routes::widgets::reorder::<S>),
        )
        .route(
            "/widgets/{id}",
            put(routes::widgets::update::<S>).delete(routes::widgets::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with both services sharing one store.
pub fn create_default_state<S: PageStore + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        page_service: PageService::new(store.clone()),
        widget_service: WidgetService::new(store),
    })
}
