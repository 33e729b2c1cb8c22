//! Page CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{CreatePage, PageWithWidgets, UpdatePage};
use page_store::{Page, PageStore};
use serde::Deserialize;

use super::{AppState, MessageResponse, parse_page_id};
use crate::error::ApiError;

/// Body of `POST /pages` and `PUT /pages/{id}`.
///
/// Missing fields decode to their zero values so the domain reports them as
/// validation errors rather than the decoder rejecting the body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub name: String,
    pub route: String,
    pub is_home: bool,
}

/// GET /pages — list every page, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Page>>, ApiError> {
    let pages = state.page_service.list_pages().await?;
    Ok(Json(pages))
}

/// POST /pages — create a page.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<PageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Page>), ApiError> {
    let Json(req) = body?;
    let cmd = CreatePage {
        name: req.name,
        route: req.route,
        is_home: req.is_home,
    };
    let page = state.page_service.create_page(cmd).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /pages/{id} — a page together with its widgets in position order.
#[tracing::instrument(skip(state))]
pub async fn get<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<PageWithWidgets>, ApiError> {
    let page_id = parse_page_id(&id);
    let page = state.page_service.get_page_with_widgets(page_id).await?;
    Ok(Json(page))
}

/// PUT /pages/{id} — overwrite name, route and home flag.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<PageRequest>, JsonRejection>,
) -> Result<Json<Page>, ApiError> {
    let Json(req) = body?;
    let page_id = parse_page_id(&id);
    let page = state
        .page_service
        .update_page(UpdatePage::new(page_id, req.name, req.route, req.is_home))
        .await?;
    Ok(Json(page))
}

/// DELETE /pages/{id} — delete a non-home page and its widgets.
#[tracing::instrument(skip(state))]
pub async fn delete<S: PageStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let page_id = parse_page_id(&id);
    state.page_service.delete_page(page_id).await?;
    Ok(Json(MessageResponse {
        message: "Page deleted",
    }))
}
