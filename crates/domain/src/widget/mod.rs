//! Widgets: typed, positioned content blocks owned by a page.

mod commands;
mod service;

pub use commands::{CreateWidget, ReorderWidgets, UpdateWidget};
pub use service::WidgetService;

use common::{PageId, WidgetId};
use thiserror::Error;

use crate::ErrorKind;

/// Errors that can occur during widget operations.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The type is not one of banner, product_grid, text, image, spacer.
    #[error("invalid widget type")]
    InvalidType { widget_type: String },

    /// Positions start at zero.
    #[error("widget position must be non-negative, got {position}")]
    NegativePosition { position: i32 },

    /// The owning page does not exist.
    #[error("page not found")]
    PageNotFound { page_id: PageId },

    /// The widget does not exist.
    #[error("widget not found")]
    NotFound { id: WidgetId },

    /// A reorder named a widget owned by another page.
    #[error("widget does not belong to this page")]
    NotOnPage { widget_id: WidgetId, page_id: PageId },
}

impl WidgetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WidgetError::InvalidType { .. }
            | WidgetError::NegativePosition { .. }
            | WidgetError::NotOnPage { .. } => ErrorKind::Validation,
            WidgetError::PageNotFound { .. } | WidgetError::NotFound { .. } => {
                ErrorKind::NotFound
            }
        }
    }
}
