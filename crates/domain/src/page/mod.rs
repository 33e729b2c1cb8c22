//! Pages: named, uniquely routed screens, at most one of which is home.

mod commands;
mod service;

pub use commands::{CreatePage, UpdatePage};
pub use service::PageService;

use common::PageId;
use page_store::{Page, Widget};
use serde::Serialize;
use thiserror::Error;

use crate::ErrorKind;

/// A page together with its widgets in display order.
#[derive(Debug, Clone, Serialize)]
pub struct PageWithWidgets {
    pub page: Page,
    pub widgets: Vec<Widget>,
}

/// Errors that can occur during page operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// Name or route is empty.
    #[error("name and route are required")]
    NameAndRouteRequired,

    /// The page does not exist.
    #[error("page not found")]
    NotFound { id: PageId },

    /// Another page already uses the route.
    #[error("page route already exists")]
    RouteTaken { route: String },

    /// A concurrent request made another page home after the flag was cleared.
    #[error("another page became the home page concurrently")]
    HomePageTaken,

    /// The home page cannot be deleted.
    #[error("cannot delete home page")]
    CannotDeleteHome { id: PageId },
}

impl PageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PageError::NameAndRouteRequired => ErrorKind::Validation,
            PageError::NotFound { .. } => ErrorKind::NotFound,
            PageError::RouteTaken { .. }
            | PageError::HomePageTaken
            | PageError::CannotDeleteHome { .. } => ErrorKind::Conflict,
        }
    }
}
