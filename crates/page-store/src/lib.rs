pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;

pub use common::{PageId, WidgetId};
pub use error::{Result, StoreError};
pub use memory::InMemoryPageStore;
pub use model::{
    NewPage, NewWidget, Page, PageFields, UnknownWidgetType, Widget, WidgetChanges, WidgetConfig,
    WidgetType,
};
pub use postgres::PostgresPageStore;
pub use store::{PageStore, PageStoreExt};
