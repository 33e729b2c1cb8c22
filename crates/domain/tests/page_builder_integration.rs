//! Integration tests for the page and widget services.
//!
//! These tests drive both services over one shared in-memory store and check
//! the cross-record rules: unique routes, a single home page, cascade
//! deletes, the closed widget type set and atomic reordering.

use common::{PageId, WidgetId};
use domain::{
    CreatePage, CreateWidget, DomainError, ErrorKind, PageError, PageService, ReorderWidgets,
    UpdatePage, UpdateWidget, WidgetError, WidgetService,
};
use page_store::{InMemoryPageStore, Page, PageStore, Widget, WidgetConfig, WidgetType};

struct Services {
    store: InMemoryPageStore,
    pages: PageService<InMemoryPageStore>,
    widgets: WidgetService<InMemoryPageStore>,
}

/// Helper to create both services over one store
fn create_services() -> Services {
    let store = InMemoryPageStore::new();
    Services {
        pages: PageService::new(store.clone()),
        widgets: WidgetService::new(store.clone()),
        store,
    }
}

async fn create_widgets(services: &Services, page: &Page, count: i32) -> Vec<Widget> {
    let mut widgets = Vec::new();
    for position in 0..count {
        widgets.push(
            services
                .widgets
                .create_widget(CreateWidget::new(page.id, "text", position))
                .await
                .unwrap(),
        );
    }
    widgets
}

async fn positions(services: &Services, page_id: PageId) -> Vec<(WidgetId, i32)> {
    services
        .store
        .list_widgets_by_page(page_id)
        .await
        .unwrap()
        .into_iter()
        .map(|w| (w.id, w.position))
        .collect()
}

async fn home_pages(services: &Services) -> Vec<Page> {
    services
        .pages
        .list_pages()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.is_home)
        .collect()
}

mod routes {
    use super::*;

    #[tokio::test]
    async fn same_route_twice_yields_one_success_and_one_conflict() {
        let services = create_services();

        let first = services
            .pages
            .create_page(CreatePage::new("Sale", "/sale"))
            .await;
        let second = services
            .pages
            .create_page(CreatePage::new("Sale again", "/sale"))
            .await;

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(services.pages.list_pages().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn routes_compare_case_sensitively() {
        let services = create_services();
        services
            .pages
            .create_page(CreatePage::new("Sale", "/sale"))
            .await
            .unwrap();

        services
            .pages
            .create_page(CreatePage::new("Sale", "/SALE"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_update_leaves_page_untouched() {
        let services = create_services();
        services
            .pages
            .create_page(CreatePage::new("Sale", "/sale"))
            .await
            .unwrap();
        let about = services
            .pages
            .create_page(CreatePage::new("About", "/about"))
            .await
            .unwrap();

        let err = services
            .pages
            .update_page(UpdatePage::new(about.id, "About", "/sale", false))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Page(PageError::RouteTaken { .. })
        ));

        let stored = services.store.get_page(about.id).await.unwrap().unwrap();
        assert_eq!(stored, about);
    }
}

mod home_page {
    use super::*;

    #[tokio::test]
    async fn at_most_one_home_page_after_sequential_creates() {
        let services = create_services();

        for (name, route) in [("A", "/a"), ("B", "/b"), ("C", "/c")] {
            services
                .pages
                .create_page(CreatePage::home(name, route))
                .await
                .unwrap();
            assert_eq!(home_pages(&services).await.len(), 1);
        }

        let home = home_pages(&services).await;
        assert_eq!(home[0].route, "/c");
    }

    #[tokio::test]
    async fn update_can_move_home_flag() {
        let services = create_services();
        let home = services
            .pages
            .create_page(CreatePage::home("Home", "/"))
            .await
            .unwrap();
        let landing = services
            .pages
            .create_page(CreatePage::new("Landing", "/landing"))
            .await
            .unwrap();

        let landing = services
            .pages
            .update_page(UpdatePage::new(landing.id, "Landing", "/landing", true))
            .await
            .unwrap();

        assert!(landing.is_home);
        let homes = home_pages(&services).await;
        assert_eq!(homes.len(), 1);
        assert_eq!(homes[0].id, landing.id);

        // The former home page can now be deleted.
        services.pages.delete_page(home.id).await.unwrap();
    }

    #[tokio::test]
    async fn re_marking_current_home_page_keeps_it_home() {
        let services = create_services();
        let home = services
            .pages
            .create_page(CreatePage::home("Home", "/"))
            .await
            .unwrap();

        let updated = services
            .pages
            .update_page(UpdatePage::new(home.id, "Start", "/", true))
            .await
            .unwrap();

        assert!(updated.is_home);
        assert_eq!(home_pages(&services).await.len(), 1);
    }

    #[tokio::test]
    async fn deleting_home_page_always_conflicts() {
        let services = create_services();
        let home = services
            .pages
            .create_page(CreatePage::home("Home", "/"))
            .await
            .unwrap();
        create_widgets(&services, &home, 2).await;

        let err = services.pages.delete_page(home.id).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(services.store.widget_count().await, 2);
    }
}

mod cascade {
    use super::*;

    #[tokio::test]
    async fn deleting_page_removes_its_widgets_only() {
        let services = create_services();
        let doomed = services
            .pages
            .create_page(CreatePage::new("Promo", "/promo"))
            .await
            .unwrap();
        let kept = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();
        let doomed_widgets = create_widgets(&services, &doomed, 3).await;
        create_widgets(&services, &kept, 1).await;

        services.pages.delete_page(doomed.id).await.unwrap();

        for widget in doomed_widgets {
            let err = services.widgets.delete_widget(widget.id).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
        assert_eq!(positions(&services, kept.id).await.len(), 1);
    }

    #[tokio::test]
    async fn widgets_cannot_be_added_to_deleted_page() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Promo", "/promo"))
            .await
            .unwrap();
        services.pages.delete_page(page.id).await.unwrap();

        let err = services
            .widgets
            .create_widget(CreateWidget::new(page.id, "banner", 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Widget(WidgetError::PageNotFound { page_id }) if page_id == page.id
        ));
    }
}

mod widget_types {
    use super::*;

    #[tokio::test]
    async fn every_known_type_is_accepted_on_create_and_update() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();

        for (position, widget_type) in WidgetType::ALL.into_iter().enumerate() {
            let widget = services
                .widgets
                .create_widget(CreateWidget::new(
                    page.id,
                    widget_type.as_str(),
                    position as i32,
                ))
                .await
                .unwrap();
            assert_eq!(widget.widget_type, widget_type);

            let updated = services
                .widgets
                .update_widget(UpdateWidget::new(widget.id, widget_type.as_str(), 0))
                .await
                .unwrap();
            assert_eq!(updated.widget_type, widget_type);
        }
    }

    #[tokio::test]
    async fn unknown_types_are_rejected_on_create_and_update() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();
        let widget = create_widgets(&services, &page, 1).await.remove(0);

        for bad in ["", "Banner", "video", "product-grid", "text "] {
            let err = services
                .widgets
                .create_widget(CreateWidget::new(page.id, bad, 0))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "create with {bad:?}");

            let err = services
                .widgets
                .update_widget(UpdateWidget::new(widget.id, bad, 0))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "update with {bad:?}");
        }

        let stored = services.store.get_widget(widget.id).await.unwrap().unwrap();
        assert_eq!(stored.widget_type, WidgetType::Text);
    }

    #[tokio::test]
    async fn config_is_passed_through_untouched() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();

        let config: WidgetConfig = serde_json::from_value(serde_json::json!({
            "title": "Summer",
            "nested": {"deep": [1, 2, {"x": null}]},
            "unknown_key_for_banner": true
        }))
        .unwrap();

        let widget = services
            .widgets
            .create_widget(CreateWidget::new(page.id, "banner", 0).with_config(config.clone()))
            .await
            .unwrap();

        let loaded = services.pages.get_page_with_widgets(page.id).await.unwrap();
        assert_eq!(loaded.widgets[0].id, widget.id);
        assert_eq!(loaded.widgets[0].config, config);
    }
}

mod reorder {
    use super::*;

    #[tokio::test]
    async fn reorder_assigns_positions_in_given_order() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();
        let w = create_widgets(&services, &page, 3).await;

        services
            .widgets
            .reorder_widgets(ReorderWidgets::new(page.id, [w[2].id, w[0].id, w[1].id]))
            .await
            .unwrap();

        assert_eq!(
            positions(&services, page.id).await,
            [(w[2].id, 0), (w[0].id, 1), (w[1].id, 2)]
        );

        let loaded = services.pages.get_page_with_widgets(page.id).await.unwrap();
        let order: Vec<_> = loaded.widgets.iter().map(|w| w.id).collect();
        assert_eq!(order, [w[2].id, w[0].id, w[1].id]);
    }

    #[tokio::test]
    async fn foreign_widget_fails_whole_batch() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();
        let other = services
            .pages
            .create_page(CreatePage::new("Blog", "/blog"))
            .await
            .unwrap();
        let w = create_widgets(&services, &page, 3).await;
        let foreign = create_widgets(&services, &other, 1).await.remove(0);
        let before = positions(&services, page.id).await;

        let err = services
            .widgets
            .reorder_widgets(ReorderWidgets::new(
                page.id,
                [w[2].id, w[1].id, foreign.id, w[0].id],
            ))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "widget does not belong to this page");
        assert_eq!(positions(&services, page.id).await, before);
        assert_eq!(
            services
                .store
                .get_widget(foreign.id)
                .await
                .unwrap()
                .unwrap()
                .position,
            0
        );
    }

    #[tokio::test]
    async fn partial_reorder_leaves_omitted_widgets_alone() {
        let services = create_services();
        let page = services
            .pages
            .create_page(CreatePage::new("Shop", "/shop"))
            .await
            .unwrap();
        let w = create_widgets(&services, &page, 3).await;

        services
            .widgets
            .reorder_widgets(ReorderWidgets::new(page.id, [w[2].id]))
            .await
            .unwrap();

        let mut by_id = positions(&services, page.id).await;
        by_id.sort();
        let mut expected = vec![(w[0].id, 0), (w[1].id, 1), (w[2].id, 0)];
        expected.sort();
        // Duplicate position 0 is accepted, not corrected.
        assert_eq!(by_id, expected);
    }
}

mod empty_store {
    use super::*;

    #[tokio::test]
    async fn listings_are_empty_not_absent() {
        let services = create_services();
        assert!(services.pages.list_pages().await.unwrap().is_empty());

        let page = services
            .pages
            .create_page(CreatePage::new("Blank", "/blank"))
            .await
            .unwrap();
        let loaded = services.pages.get_page_with_widgets(page.id).await.unwrap();
        assert!(loaded.widgets.is_empty());

        let json = serde_json::to_value(&loaded).unwrap();
        assert_eq!(json["widgets"], serde_json::json!([]));
    }
}

mod scenario {
    use super::*;

    #[tokio::test]
    async fn home_page_with_banner_end_to_end() {
        let services = create_services();

        let home = services
            .pages
            .create_page(CreatePage::home("Home", "/"))
            .await
            .unwrap();

        let err = services
            .pages
            .create_page(CreatePage::new("Other", "/"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let config: WidgetConfig = serde_json::from_value(serde_json::json!({
            "image_url": "https://cdn.example.com/hero.png",
            "title": "Welcome"
        }))
        .unwrap();
        let banner = services
            .widgets
            .create_widget(CreateWidget::new(home.id, "banner", 0).with_config(config))
            .await
            .unwrap();
        assert_eq!(banner.position, 0);

        let loaded = services.pages.get_page_with_widgets(home.id).await.unwrap();
        assert_eq!(loaded.page.id, home.id);
        assert_eq!(loaded.widgets.len(), 1);

        let err = services.pages.delete_page(home.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "cannot delete home page");
    }
}
