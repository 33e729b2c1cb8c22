use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    NewPage, NewWidget, Page, PageFields, PageId, Result, StoreError, Widget, WidgetChanges,
    WidgetId,
    store::{PageStore, position_at},
};

/// In-memory page store for tests and local development.
///
/// Provides the same interface and constraint behaviour as the PostgreSQL
/// implementation. Both tables sit behind one lock so cascade deletes and
/// reorders are all-or-nothing.
#[derive(Clone, Default)]
pub struct InMemoryPageStore {
    tables: Arc<RwLock<Tables>>,
}

/// Rows in insertion order, which doubles as `created_at` order.
#[derive(Default)]
struct Tables {
    pages: Vec<Page>,
    widgets: Vec<Widget>,
}

impl InMemoryPageStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of widgets stored across all pages.
    pub async fn widget_count(&self) -> usize {
        self.tables.read().await.widgets.len()
    }

    /// Clears all pages and widgets.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.pages.clear();
        tables.widgets.clear();
    }
}

impl Tables {
    /// Simulates the unique route index and the single-home partial index.
    fn check_page_constraints(&self, fields: &PageFields, except: Option<PageId>) -> Result<()> {
        let others = self.pages.iter().filter(|p| Some(p.id) != except);

        for page in others {
            if page.route == fields.route {
                return Err(StoreError::DuplicateRoute(fields.route.clone()));
            }
            if fields.is_home && page.is_home {
                return Err(StoreError::HomePageTaken);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_pages(&self) -> Result<Vec<Page>> {
        Ok(self.tables.read().await.pages.clone())
    }

    async fn get_page(&self, id: PageId) -> Result<Option<Page>> {
        let tables = self.tables.read().await;
        Ok(tables.pages.iter().find(|p| p.id == id).cloned())
    }

    async fn create_page(&self, page: NewPage) -> Result<Page> {
        let mut tables = self.tables.write().await;
        tables.check_page_constraints(&page, None)?;

        let now = Utc::now();
        let created = Page {
            id: PageId::new(),
            name: page.name,
            route: page.route,
            is_home: page.is_home,
            created_at: now,
            updated_at: now,
        };
        tables.pages.push(created.clone());
        Ok(created)
    }

    async fn update_page(&self, id: PageId, fields: PageFields) -> Result<Option<Page>> {
        let mut tables = self.tables.write().await;
        if !tables.pages.iter().any(|p| p.id == id) {
            return Ok(None);
        }
        tables.check_page_constraints(&fields, Some(id))?;

        let Some(page) = tables.pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        page.name = fields.name;
        page.route = fields.route;
        page.is_home = fields.is_home;
        page.updated_at = Utc::now();
        Ok(Some(page.clone()))
    }

    async fn delete_page(&self, id: PageId) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.pages.len();
        tables.pages.retain(|p| p.id != id);
        if tables.pages.len() == before {
            return Ok(false);
        }
        tables.widgets.retain(|w| w.page_id != id);
        Ok(true)
    }

    async fn route_exists(&self, route: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.pages.iter().any(|p| p.route == route))
    }

    async fn route_exists_excluding(&self, route: &str, id: PageId) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.pages.iter().any(|p| p.route == route && p.id != id))
    }

    async fn reset_home_flag(&self) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let mut cleared = 0;
        for page in tables.pages.iter_mut().filter(|p| p.is_home) {
            page.is_home = false;
            page.updated_at = now;
            cleared += 1;
        }
        Ok(cleared)
    }

    async fn get_widget(&self, id: WidgetId) -> Result<Option<Widget>> {
        let tables = self.tables.read().await;
        Ok(tables.widgets.iter().find(|w| w.id == id).cloned())
    }

    async fn list_widgets_by_page(&self, page_id: PageId) -> Result<Vec<Widget>> {
        let tables = self.tables.read().await;
        let mut widgets: Vec<_> = tables
            .widgets
            .iter()
            .filter(|w| w.page_id == page_id)
            .cloned()
            .collect();
        // Stable sort keeps creation order among equal positions.
        widgets.sort_by_key(|w| w.position);
        Ok(widgets)
    }

    async fn create_widget(&self, widget: NewWidget) -> Result<Widget> {
        let mut tables = self.tables.write().await;
        if !tables.pages.iter().any(|p| p.id == widget.page_id) {
            return Err(StoreError::PageNotFound(widget.page_id));
        }

        let now = Utc::now();
        let created = Widget {
            id: WidgetId::new(),
            page_id: widget.page_id,
            widget_type: widget.widget_type,
            position: widget.position,
            config: widget.config,
            created_at: now,
            updated_at: now,
        };
        tables.widgets.push(created.clone());
        Ok(created)
    }

    async fn update_widget(&self, id: WidgetId, changes: WidgetChanges) -> Result<Option<Widget>> {
        let mut tables = self.tables.write().await;
        let Some(widget) = tables.widgets.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        widget.widget_type = changes.widget_type;
        widget.position = changes.position;
        widget.config = changes.config;
        widget.updated_at = Utc::now();
        Ok(Some(widget.clone()))
    }

    async fn delete_widget(&self, id: WidgetId) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.widgets.len();
        tables.widgets.retain(|w| w.id != id);
        Ok(tables.widgets.len() != before)
    }

    async fn reorder_widgets(&self, page_id: PageId, ordered_ids: &[WidgetId]) -> Result<()> {
        let mut tables = self.tables.write().await;

        // Validate the whole batch before touching any row.
        let mut moves = Vec::with_capacity(ordered_ids.len());
        for (index, &widget_id) in ordered_ids.iter().enumerate() {
            let slot = tables
                .widgets
                .iter()
                .position(|w| w.id == widget_id && w.page_id == page_id)
                .ok_or(StoreError::WidgetNotFound { widget_id, page_id })?;
            moves.push((slot, position_at(index)?));
        }

        let now = Utc::now();
        for (slot, position) in moves {
            let widget = &mut tables.widgets[slot];
            widget.position = position;
            widget.updated_at = now;
        }
        Ok(())
    }
}
