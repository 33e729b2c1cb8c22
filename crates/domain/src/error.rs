//! Domain error types.

use page_store::StoreError;
use thiserror::Error;

use crate::page::PageError;
use crate::widget::WidgetError;

/// Classification of a failure, independent of how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data breaks a stateless rule.
    Validation,
    /// A referenced identifier does not exist.
    NotFound,
    /// The request is valid on its own but breaks a cross-record invariant.
    Conflict,
    /// The store itself failed.
    Storage,
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A page rule was violated.
    #[error("{0}")]
    Page(PageError),

    /// A widget rule was violated.
    #[error("{0}")]
    Widget(WidgetError),

    /// An error occurred in the page store.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Page(err) => err.kind(),
            DomainError::Widget(err) => err.kind(),
            DomainError::Store(_) => ErrorKind::Storage,
        }
    }
}
