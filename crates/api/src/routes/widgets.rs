//! Widget endpoints, including the batch reorder of a page's widgets.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::WidgetId;
use domain::{CreateWidget, ReorderWidgets, UpdateWidget};
use page_store::{PageStore, Widget, WidgetConfig};
use serde::Deserialize;

use super::{AppState, MessageResponse, parse_page_id, parse_widget_id};
use crate::error::ApiError;

/// Body of `POST /pages/{id}/widgets` and `PUT /widgets/{id}`.
///
/// A missing `config` is stored as an empty object.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WidgetRequest {
    #[serde(rename = "type")]
    pub widget_type: String,
    pub position: i32,
    pub config: Option<WidgetConfig>,
}

/// Body of `POST /pages/{id}/widgets/reorder`. A missing list reorders nothing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReorderRequest {
    pub widget_ids: Vec<WidgetId>,
}

/// POST /pages/{id}/widgets — add a widget to a page.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(page_id): Path<String>,
    body: Result<Json<WidgetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Widget>), ApiError> {
    let Json(req) = body?;
    let page_id = parse_page_id(&page_id);
    let cmd = CreateWidget::new(page_id, req.widget_type, req.position)
        .with_config(req.config.unwrap_or_default());
    let widget = state.widget_service.create_widget(cmd).await?;
    Ok((StatusCode::CREATED, Json(widget)))
}

/// PUT /widgets/{id} — overwrite type, position and config.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<WidgetRequest>, JsonRejection>,
) -> Result<Json<Widget>, ApiError> {
    let Json(req) = body?;
    let widget_id = parse_widget_id(&id);
    let cmd = UpdateWidget::new(widget_id, req.widget_type, req.position)
        .with_config(req.config.unwrap_or_default());
    let widget = state.widget_service.update_widget(cmd).await?;
    Ok(Json(widget))
}

/// DELETE /widgets/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let widget_id = parse_widget_id(&id);
    state.widget_service.delete_widget(widget_id).await?;
    Ok(Json(MessageResponse {
        message: "Widget deleted",
    }))
}

/// POST /pages/{id}/widgets/reorder — assign positions 0..n in list order.
#[tracing::instrument(skip(state, body))]
pub async fn reorder<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(page_id): Path<String>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = body?;
    let page_id = parse_page_id(&page_id);
    state
        .widget_service
        .reorder_widgets(ReorderWidgets::new(page_id, req.widget_ids))
        .await?;
    Ok(Json(MessageResponse {
        message: "Widgets reordered",
    }))
}
