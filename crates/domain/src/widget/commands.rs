//! Widget commands.
//!
//! The widget type arrives as raw text and is checked by the service, so an
//! unknown type is reported as a validation failure rather than a decode error.

use common::{PageId, WidgetId};
use page_store::WidgetConfig;

/// Command to add a widget to a page at a caller-chosen position.
#[derive(Debug, Clone)]
pub struct CreateWidget {
    pub page_id: PageId,
    pub widget_type: String,
    pub position: i32,
    pub config: WidgetConfig,
}

impl CreateWidget {
    pub fn new(page_id: PageId, widget_type: impl Into<String>, position: i32) -> Self {
        Self {
            page_id,
            widget_type: widget_type.into(),
            position,
            config: WidgetConfig::new(),
        }
    }

    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }
}

/// Command to replace a widget's type, position and config.
#[derive(Debug, Clone)]
pub struct UpdateWidget {
    pub id: WidgetId,
    pub widget_type: String,
    pub position: i32,
    pub config: WidgetConfig,
}

impl UpdateWidget {
    pub fn new(id: WidgetId, widget_type: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            widget_type: widget_type.into(),
            position,
            config: WidgetConfig::new(),
        }
    }

    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }
}

/// Command to assign positions 0..n to widgets in the given order.
///
/// Widgets of the page not listed keep their current position.
#[derive(Debug, Clone)]
pub struct ReorderWidgets {
    pub page_id: PageId,
    pub widget_ids: Vec<WidgetId>,
}

impl ReorderWidgets {
    pub fn new(page_id: PageId, widget_ids: impl IntoIterator<Item = WidgetId>) -> Self {
        Self {
            page_id,
            widget_ids: widget_ids.into_iter().collect(),
        }
    }
}
