//! Domain layer for the page builder backend.
//!
//! This crate enforces the rules that keep pages and widgets consistent:
//! - required page fields, unique routes and a single home page
//! - the closed set of widget types and widget ownership by a page
//! - all-or-nothing widget reordering
//!
//! The services are stateless; every invariant that spans records is checked
//! through the [`PageStore`](page_store::PageStore) and backed by its
//! store-level constraints.

pub mod error;
pub mod page;
pub mod widget;

pub use error::{DomainError, ErrorKind};
pub use page::{CreatePage, PageError, PageService, PageWithWidgets, UpdatePage};
pub use widget::{CreateWidget, ReorderWidgets, UpdateWidget, WidgetError, WidgetService};
