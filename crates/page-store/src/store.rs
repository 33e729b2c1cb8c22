use async_trait::async_trait;

use crate::{
    NewPage, NewWidget, Page, PageFields, PageId, Result, StoreError, Widget, WidgetChanges,
    WidgetId,
};

/// Data access for pages and their widgets.
///
/// Implementations hold no business rules beyond the store-level constraints
/// (unique route, single home page, widget ownership with cascade delete).
/// Reads by id return `Ok(None)` when the record is absent so callers can
/// tell a missing record apart from a failing store.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Lists every page, oldest first.
    async fn list_pages(&self) -> Result<Vec<Page>>;

    async fn get_page(&self, id: PageId) -> Result<Option<Page>>;

    /// Inserts a page and returns it with its assigned id and timestamps.
    ///
    /// Fails with `DuplicateRoute` or `HomePageTaken` when the insert would
    /// break a store-level constraint.
    async fn create_page(&self, page: NewPage) -> Result<Page>;

    /// Overwrites name, route and home flag, refreshing `updated_at`.
    ///
    /// Returns `None` if the page no longer exists.
    async fn update_page(&self, id: PageId, fields: PageFields) -> Result<Option<Page>>;

    /// Deletes a page together with all of its widgets.
    ///
    /// Returns whether a page was removed.
    async fn delete_page(&self, id: PageId) -> Result<bool>;

    /// Checks whether any page uses `route` (exact, case-sensitive).
    async fn route_exists(&self, route: &str) -> Result<bool>;

    /// Checks whether a page other than `id` uses `route`.
    async fn route_exists_excluding(&self, route: &str, id: PageId) -> Result<bool>;

    /// Clears the home flag on every page. Returns how many pages were cleared.
    async fn reset_home_flag(&self) -> Result<u64>;

    async fn get_widget(&self, id: WidgetId) -> Result<Option<Widget>>;

    /// Lists the widgets of a page ordered by position ascending.
    async fn list_widgets_by_page(&self, page_id: PageId) -> Result<Vec<Widget>>;

    /// Inserts a widget at the given position. Positions of other widgets are
    /// left untouched.
    ///
    /// Fails with `PageNotFound` if the owning page does not exist.
    async fn create_widget(&self, widget: NewWidget) -> Result<Widget>;

    /// Overwrites type, position and config, refreshing `updated_at`.
    ///
    /// Returns `None` if the widget no longer exists.
    async fn update_widget(&self, id: WidgetId, changes: WidgetChanges) -> Result<Option<Widget>>;

    /// Returns whether a widget was removed.
    async fn delete_widget(&self, id: WidgetId) -> Result<bool>;

    /// Sets `position = index` for every id in `ordered_ids`.
    ///
    /// Applied atomically: if any id is not a widget of `page_id` the whole
    /// batch fails with `WidgetNotFound` and no position changes.
    async fn reorder_widgets(&self, page_id: PageId, ordered_ids: &[WidgetId]) -> Result<()>;
}

/// Position assigned to the widget at `index` of a reorder batch.
pub(crate) fn position_at(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|_| StoreError::PositionOverflow(index))
}

/// Extension trait providing convenience methods for page stores.
#[async_trait]
pub trait PageStoreExt: PageStore {
    async fn page_exists(&self, id: PageId) -> Result<bool> {
        Ok(self.get_page(id).await?.is_some())
    }

    async fn widget_exists(&self, id: WidgetId) -> Result<bool> {
        Ok(self.get_widget(id).await?.is_some())
    }
}

// Blanket implementation for all PageStore implementations
impl<T: PageStore + ?Sized> PageStoreExt for T {}
