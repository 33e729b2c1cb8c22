use async_trait::async_trait;
use sqlx::{
    PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};
use uuid::Uuid;

use crate::{
    NewPage, NewWidget, Page, PageFields, PageId, Result, StoreError, Widget, WidgetChanges,
    WidgetId, WidgetType,
    store::{PageStore, position_at},
};

const PAGE_COLUMNS: &str = "id, name, route, is_home, created_at, updated_at";
const WIDGET_COLUMNS: &str = "id, page_id, type, position, config, created_at, updated_at";

/// PostgreSQL-backed page store implementation.
///
/// Route uniqueness, the single home page and widget ownership are enforced
/// by the schema in `migrations/`, so concurrent writers that slip past the
/// domain checks still fail here.
#[derive(Clone)]
pub struct PostgresPageStore {
    pool: PgPool,
}

impl PostgresPageStore {
    /// Creates a new PostgreSQL page store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool to `database_url` and wraps it in a store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_page(row: PgRow) -> Result<Page> {
        Ok(Page {
            id: PageId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            route: row.try_get("route")?,
            is_home: row.try_get("is_home")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_widget(row: PgRow) -> Result<Widget> {
        let widget_type: String = row.try_get("type")?;
        let config: serde_json::Value = row.try_get("config")?;

        Ok(Widget {
            id: WidgetId::from_uuid(row.try_get::<Uuid, _>("id")?),
            page_id: PageId::from_uuid(row.try_get::<Uuid, _>("page_id")?),
            widget_type: widget_type.parse::<WidgetType>()?,
            position: row.try_get("position")?,
            config: serde_json::from_value(config)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Translates constraint violations on `pages` into store errors.
    fn page_write_error(e: sqlx::Error, route: &str) -> StoreError {
        if let sqlx::Error::Database(ref db_err) = e {
            match db_err.constraint() {
                Some("pages_route_key") => return StoreError::DuplicateRoute(route.to_string()),
                Some("pages_single_home") => return StoreError::HomePageTaken,
                _ => {}
            }
        }
        StoreError::Database(e)
    }
}

#[async_trait]
impl PageStore for PostgresPageStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_pages(&self) -> Result<Vec<Page>> {
        let rows = sqlx::query(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_page).collect()
    }

    async fn get_page(&self, id: PageId) -> Result<Option<Page>> {
        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Self::row_to_page).transpose()
    }

    async fn create_page(&self, page: NewPage) -> Result<Page> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO pages (id, name, route, is_home)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(PageId::new().as_uuid())
        .bind(&page.name)
        .bind(&page.route)
        .bind(page.is_home)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::page_write_error(e, &page.route))?;

        Self::row_to_page(row)
    }

    async fn update_page(&self, id: PageId, fields: PageFields) -> Result<Option<Page>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            r#"
            UPDATE pages
            SET name = $1, route = $2, is_home = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.route)
        .bind(fields.is_home)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::page_write_error(e, &fields.route))?;

        row.map(Self::row_to_page).transpose()
    }

    async fn delete_page(&self, id: PageId) -> Result<bool> {
        // Widgets go with the page through ON DELETE CASCADE in the same statement.
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn route_exists(&self, route: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pages WHERE route = $1)")
                .bind(route)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn route_exists_excluding(&self, route: &str, id: PageId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM pages WHERE route = $1 AND id <> $2)",
        )
        .bind(route)
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn reset_home_flag(&self) -> Result<u64> {
        let result =
            sqlx::query("UPDATE pages SET is_home = FALSE, updated_at = NOW() WHERE is_home")
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn get_widget(&self, id: WidgetId) -> Result<Option<Widget>> {
        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {WIDGET_COLUMNS} FROM widgets WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Self::row_to_widget).transpose()
    }

    async fn list_widgets_by_page(&self, page_id: PageId) -> Result<Vec<Widget>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {WIDGET_COLUMNS}
            FROM widgets
            WHERE page_id = $1
            ORDER BY position ASC, created_at ASC
            "#
        ))
        .bind(page_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_widget).collect()
    }

    async fn create_widget(&self, widget: NewWidget) -> Result<Widget> {
        let page_id = widget.page_id;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO widgets (id, page_id, type, position, config)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {WIDGET_COLUMNS}
            "#
        ))
        .bind(WidgetId::new().as_uuid())
        .bind(page_id.as_uuid())
        .bind(widget.widget_type.as_str())
        .bind(widget.position)
        .bind(serde_json::Value::Object(widget.config))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The page was deleted between the caller's check and this insert
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("widgets_page_id_fkey")
            {
                return StoreError::PageNotFound(page_id);
            }
            StoreError::Database(e)
        })?;

        Self::row_to_widget(row)
    }

    async fn update_widget(&self, id: WidgetId, changes: WidgetChanges) -> Result<Option<Widget>> {
        let row: Option<PgRow> = sqlx::query(&format!(
            r#"
            UPDATE widgets
            SET type = $1, position = $2, config = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {WIDGET_COLUMNS}
            "#
        ))
        .bind(changes.widget_type.as_str())
        .bind(changes.position)
        .bind(serde_json::Value::Object(changes.config))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_widget).transpose()
    }

    async fn delete_widget(&self, id: WidgetId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM widgets WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder_widgets(&self, page_id: PageId, ordered_ids: &[WidgetId]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (index, widget_id) in ordered_ids.iter().enumerate() {
            let position = position_at(index)?;
            let result = sqlx::query(
                r#"
                UPDATE widgets
                SET position = $1, updated_at = NOW()
                WHERE id = $2 AND page_id = $3
                "#,
            )
            .bind(position)
            .bind(widget_id.as_uuid())
            .bind(page_id.as_uuid())
            .execute(&mut *tx)
            .await?;

            // Dropping the transaction without commit rolls back earlier rows.
            if result.rows_affected() == 0 {
                tracing::warn!(%page_id, %widget_id, "reorder aborted, widget not on page");
                return Err(StoreError::WidgetNotFound {
                    widget_id: *widget_id,
                    page_id,
                });
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
