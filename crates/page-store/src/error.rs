use thiserror::Error;

use crate::{PageId, UnknownWidgetType, WidgetId};

/// Errors that can occur when interacting with the page store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another page already uses this route (unique constraint on `pages.route`).
    #[error("Route already exists: {0}")]
    DuplicateRoute(String),

    /// Another page already holds the home flag (single-home constraint).
    #[error("Another page is already the home page")]
    HomePageTaken,

    /// The referenced page does not exist (foreign key on `widgets.page_id`).
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    /// A widget in a reorder batch is missing or belongs to another page.
    /// The whole batch has been rolled back.
    #[error("Widget {widget_id} not found on page {page_id}")]
    WidgetNotFound { widget_id: WidgetId, page_id: PageId },

    /// A reorder batch is longer than the largest storable position.
    #[error("Reorder batch too large: index {0} exceeds the position range")]
    PositionOverflow(usize),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored widget row carries a type outside the known set.
    #[error("Corrupt widget row: {0}")]
    CorruptWidgetType(#[from] UnknownWidgetType),
}

/// Result type for page store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
