//! Shared identifier types for the page builder backend.

mod types;

pub use types::{PageId, WidgetId};
