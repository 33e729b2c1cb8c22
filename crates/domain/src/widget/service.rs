//! Widget service enforcing widget types, page ownership and atomic reorders.

use common::WidgetId;
use page_store::{NewWidget, PageStore, PageStoreExt, StoreError, Widget, WidgetChanges, WidgetType};

use crate::error::DomainError;

use super::{CreateWidget, ReorderWidgets, UpdateWidget, WidgetError};

impl From<WidgetError> for DomainError {
    fn from(e: WidgetError) -> Self {
        DomainError::Widget(e)
    }
}

/// Service for managing widgets.
///
/// Positions are stored as given. Creating, deleting or partially reordering
/// widgets never renumbers the rest of the page, so gaps and duplicate
/// positions are possible.
pub struct WidgetService<S: PageStore> {
    store: S,
}

impl<S: PageStore> WidgetService<S> {
    /// Creates a new widget service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a widget to an existing page.
    #[tracing::instrument(skip(self, cmd), fields(page_id = %cmd.page_id, widget_type = %cmd.widget_type))]
    pub async fn create_widget(&self, cmd: CreateWidget) -> Result<Widget, DomainError> {
        let widget_type = parse_type(&cmd.widget_type)?;
        check_position(cmd.position)?;

        let page_id = cmd.page_id;
        if !self.store.page_exists(page_id).await? {
            return Err(WidgetError::PageNotFound { page_id }.into());
        }

        let widget = self
            .store
            .create_widget(NewWidget {
                page_id,
                widget_type,
                position: cmd.position,
                config: cmd.config,
            })
            .await
            .map_err(|e| match e {
                StoreError::PageNotFound(page_id) => {
                    DomainError::Widget(WidgetError::PageNotFound { page_id })
                }
                other => DomainError::Store(other),
            })?;

        metrics::counter!("widgets_created_total").increment(1);
        tracing::info!(widget_id = %widget.id, %page_id, position = widget.position, "widget created");
        Ok(widget)
    }

    /// Replaces a widget's type, position and config. The owning page is kept.
    #[tracing::instrument(skip(self, cmd), fields(widget_id = %cmd.id, widget_type = %cmd.widget_type))]
    pub async fn update_widget(&self, cmd: UpdateWidget) -> Result<Widget, DomainError> {
        let widget_type = parse_type(&cmd.widget_type)?;
        check_position(cmd.position)?;

        let id = cmd.id;
        if !self.store.widget_exists(id).await? {
            return Err(WidgetError::NotFound { id }.into());
        }

        let widget = self
            .store
            .update_widget(
                id,
                WidgetChanges {
                    widget_type,
                    position: cmd.position,
                    config: cmd.config,
                },
            )
            .await?
            .ok_or(WidgetError::NotFound { id })?;

        tracing::info!(widget_id = %id, position = widget.position, "widget updated");
        Ok(widget)
    }

    /// Deletes a widget. Remaining widgets keep their positions.
    #[tracing::instrument(skip(self))]
    pub async fn delete_widget(&self, id: WidgetId) -> Result<(), DomainError> {
        if !self.store.widget_exists(id).await? {
            return Err(WidgetError::NotFound { id }.into());
        }

        if !self.store.delete_widget(id).await? {
            return Err(WidgetError::NotFound { id }.into());
        }

        metrics::counter!("widgets_deleted_total").increment(1);
        tracing::info!(widget_id = %id, "widget deleted");
        Ok(())
    }

    /// Assigns positions 0..n in the given order, all at once or not at all.
    #[tracing::instrument(skip(self, cmd), fields(page_id = %cmd.page_id, count = cmd.widget_ids.len()))]
    pub async fn reorder_widgets(&self, cmd: ReorderWidgets) -> Result<(), DomainError> {
        let page_id = cmd.page_id;
        if !self.store.page_exists(page_id).await? {
            return Err(WidgetError::PageNotFound { page_id }.into());
        }

        for &widget_id in &cmd.widget_ids {
            let widget = self
                .store
                .get_widget(widget_id)
                .await?
                .ok_or(WidgetError::NotFound { id: widget_id })?;

            if widget.page_id != page_id {
                return Err(WidgetError::NotOnPage { widget_id, page_id }.into());
            }
        }

        self.store
            .reorder_widgets(page_id, &cmd.widget_ids)
            .await
            .map_err(|e| match e {
                // Deleted or moved after the checks above; nothing was written.
                StoreError::WidgetNotFound { widget_id, .. } => {
                    DomainError::Widget(WidgetError::NotFound { id: widget_id })
                }
                other => DomainError::Store(other),
            })?;

        metrics::counter!("widget_reorders_total").increment(1);
        tracing::info!(%page_id, count = cmd.widget_ids.len(), "widgets reordered");
        Ok(())
    }
}

fn parse_type(raw: &str) -> Result<WidgetType, WidgetError> {
    raw.parse().map_err(|_| WidgetError::InvalidType {
        widget_type: raw.to_string(),
    })
}

fn check_position(position: i32) -> Result<(), WidgetError> {
    if position < 0 {
        return Err(WidgetError::NegativePosition { position });
    }
    Ok(())
}
