//! HTTP handlers grouped by resource.

pub mod ops;
pub mod pages;
pub mod widgets;

use common::{PageId, WidgetId};
use domain::{PageService, WidgetService};
use page_store::PageStore;
use serde::Serialize;

/// Shared application state accessible from all handlers.
pub struct AppState<S: PageStore> {
    pub page_service: PageService<S>,
    pub widget_service: WidgetService<S>,
}

/// Body of acknowledgement responses such as `{"message": "Page deleted"}`.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// A segment that is not a UUID maps to the nil id, which names no record, so
// the domain still validates the body before reporting the miss.
fn parse_page_id(id: &str) -> PageId {
    id.parse().unwrap_or_else(|_| PageId::nil())
}

fn parse_widget_id(id: &str) -> WidgetId {
    id.parse().unwrap_or_else(|_| WidgetId::nil())
}
