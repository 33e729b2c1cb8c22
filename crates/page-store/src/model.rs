//! Records persisted by the page store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PageId, WidgetId};

/// Free-form widget configuration, stored and returned as-is.
pub type WidgetConfig = serde_json::Map<String, serde_json::Value>;

/// A screen of the app, addressed by a unique route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub route: String,
    pub is_home: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-controlled fields of a page, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageFields {
    pub name: String,
    pub route: String,
    pub is_home: bool,
}

impl PageFields {
    pub fn new(name: impl Into<String>, route: impl Into<String>, is_home: bool) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            is_home,
        }
    }
}

/// Input for inserting a page. The store assigns id and timestamps.
pub type NewPage = PageFields;

/// The closed set of widget kinds a page can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    Banner,
    ProductGrid,
    Text,
    Image,
    Spacer,
}

impl WidgetType {
    pub const ALL: [WidgetType; 5] = [
        WidgetType::Banner,
        WidgetType::ProductGrid,
        WidgetType::Text,
        WidgetType::Image,
        WidgetType::Spacer,
    ];

    /// Returns the wire name of this widget type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Banner => "banner",
            WidgetType::ProductGrid => "product_grid",
            WidgetType::Text => "text",
            WidgetType::Image => "image",
            WidgetType::Spacer => "spacer",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known widget type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown widget type: {0:?}")]
pub struct UnknownWidgetType(pub String);

impl FromStr for WidgetType {
    type Err = UnknownWidgetType;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownWidgetType(s.to_string()))
    }
}

/// A positioned content block owned by one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub page_id: PageId,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub position: i32,
    pub config: WidgetConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a widget under an existing page.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWidget {
    pub page_id: PageId,
    pub widget_type: WidgetType,
    pub position: i32,
    pub config: WidgetConfig,
}

/// Replacement values for a widget update. The owning page never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetChanges {
    pub widget_type: WidgetType,
    pub position: i32,
    pub config: WidgetConfig,
}
