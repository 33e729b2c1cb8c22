//! Page commands.

use common::PageId;
use page_store::PageFields;

/// Command to create a new page.
#[derive(Debug, Clone)]
pub struct CreatePage {
    pub name: String,
    pub route: String,
    pub is_home: bool,
}

impl CreatePage {
    pub fn new(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            is_home: false,
        }
    }

    /// Creates a command for a page that becomes the home page.
    pub fn home(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            is_home: true,
            ..Self::new(name, route)
        }
    }

    pub(crate) fn into_fields(self) -> PageFields {
        PageFields::new(self.name, self.route, self.is_home)
    }
}

/// Command to replace a page's name, route and home flag.
#[derive(Debug, Clone)]
pub struct UpdatePage {
    pub id: PageId,
    pub name: String,
    pub route: String,
    pub is_home: bool,
}

impl UpdatePage {
    pub fn new(id: PageId, name: impl Into<String>, route: impl Into<String>, is_home: bool) -> Self {
        Self {
            id,
            name: name.into(),
            route: route.into(),
            is_home,
        }
    }

    pub(crate) fn into_fields(self) -> PageFields {
        PageFields::new(self.name, self.route, self.is_home)
    }
}
