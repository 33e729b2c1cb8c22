//! Page service enforcing required fields, route uniqueness and the single
//! home page.

use common::PageId;
use page_store::{Page, PageFields, PageStore, StoreError};

use crate::error::DomainError;

use super::{CreatePage, PageError, PageWithWidgets, UpdatePage};

impl From<PageError> for DomainError {
    fn from(e: PageError) -> Self {
        DomainError::Page(e)
    }
}

/// Service for managing pages.
///
/// Route uniqueness and the home flag are checked with a read before the
/// write. Two concurrent writers can both pass the read; the loser is then
/// rejected by the store's constraints and reported as a conflict here.
pub struct PageService<S: PageStore> {
    store: S,
}

impl<S: PageStore> PageService<S> {
    /// Creates a new page service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every page. Empty when there are none.
    #[tracing::instrument(skip(self))]
    pub async fn list_pages(&self) -> Result<Vec<Page>, DomainError> {
        Ok(self.store.list_pages().await?)
    }

    /// Creates a page, making it the only home page if requested.
    #[tracing::instrument(skip(self))]
    pub async fn create_page(&self, cmd: CreatePage) -> Result<Page, DomainError> {
        let fields = cmd.into_fields();
        validate(&fields)?;

        if self.store.route_exists(&fields.route).await? {
            return Err(PageError::RouteTaken {
                route: fields.route,
            }
            .into());
        }

        if fields.is_home {
            self.clear_home_flag().await?;
        }

        let route = fields.route.clone();
        let page = self
            .store
            .create_page(fields)
            .await
            .map_err(|e| page_write_error(e, route))?;

        metrics::counter!("pages_created_total").increment(1);
        tracing::info!(page_id = %page.id, route = %page.route, is_home = page.is_home, "page created");
        Ok(page)
    }

    /// Loads a page with its widgets ordered by position.
    #[tracing::instrument(skip(self))]
    pub async fn get_page_with_widgets(&self, id: PageId) -> Result<PageWithWidgets, DomainError> {
        let page = self
            .store
            .get_page(id)
            .await?
            .ok_or(PageError::NotFound { id })?;

        let widgets = self.store.list_widgets_by_page(id).await?;

        Ok(PageWithWidgets { page, widgets })
    }

    /// Replaces a page's name, route and home flag.
    #[tracing::instrument(skip(self))]
    pub async fn update_page(&self, cmd: UpdatePage) -> Result<Page, DomainError> {
        let id = cmd.id;
        let fields = cmd.into_fields();
        validate(&fields)?;

        if self.store.get_page(id).await?.is_none() {
            return Err(PageError::NotFound { id }.into());
        }

        if self.store.route_exists_excluding(&fields.route, id).await? {
            return Err(PageError::RouteTaken {
                route: fields.route,
            }
            .into());
        }

        if fields.is_home {
            self.clear_home_flag().await?;
        }

        let route = fields.route.clone();
        let page = self
            .store
            .update_page(id, fields)
            .await
            .map_err(|e| page_write_error(e, route))?
            .ok_or(PageError::NotFound { id })?;

        tracing::info!(page_id = %page.id, route = %page.route, is_home = page.is_home, "page updated");
        Ok(page)
    }

    /// Deletes a page and all of its widgets. The home page cannot be deleted.
    #[tracing::instrument(skip(self))]
    pub async fn delete_page(&self, id: PageId) -> Result<(), DomainError> {
        let page = self
            .store
            .get_page(id)
            .await?
            .ok_or(PageError::NotFound { id })?;

        if page.is_home {
            return Err(PageError::CannotDeleteHome { id }.into());
        }

        if !self.store.delete_page(id).await? {
            return Err(PageError::NotFound { id }.into());
        }

        metrics::counter!("pages_deleted_total").increment(1);
        tracing::info!(page_id = %id, "page deleted with its widgets");
        Ok(())
    }

    /// Unconditionally clears the flag on all pages, however many hold it.
    async fn clear_home_flag(&self) -> Result<(), DomainError> {
        let cleared = self.store.reset_home_flag().await?;
        if cleared > 0 {
            tracing::info!(cleared, "home flag cleared from previous home page");
        }
        Ok(())
    }
}

fn validate(fields: &PageFields) -> Result<(), PageError> {
    if fields.name.is_empty() || fields.route.is_empty() {
        return Err(PageError::NameAndRouteRequired);
    }
    Ok(())
}

/// Classifies store constraint violations raised by a page insert or update.
fn page_write_error(e: StoreError, route: String) -> DomainError {
    match e {
        StoreError::DuplicateRoute(_) => PageError::RouteTaken { route }.into(),
        StoreError::HomePageTaken => PageError::HomePageTaken.into(),
        other => DomainError::Store(other),
    }
}
