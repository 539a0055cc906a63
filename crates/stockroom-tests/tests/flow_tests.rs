//! End-to-end scenarios against a mock backend: list, paginate, mutate,
//! invalidate, re-render.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use stockroom_cache::{QueryCache, QueryKey};
use stockroom_core::category::{Category, CategoryUpdate};
use stockroom_core::product::{Product, ProductCreate};
use stockroom_core::{CategoryId, ProductId};
use stockroom_tests::fixtures::{category_json, list_json, product_json};
use stockroom_tests::helpers::{client_for, start_backend};
use stockroom_view::{CacheSet, MutationCoordinator, MutationState, PagedView};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_category_rename_invalidates_and_next_render_shows_new_name() {
    let server = start_backend().await;
    let client = client_for(&server);
    let category_id = Uuid::new_v4();

    // first listing serves the old name exactly once
    Mock::given(method("GET"))
        .and(path("/api/v1/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![category_json(category_id, "Old")],
            1,
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/categories/{}", category_id)))
        .and(body_json(json!({ "name": "New" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(category_id, "New")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![category_json(category_id, "New")],
            1,
        )))
        .mount(&server)
        .await;

    let caches = CacheSet::new();
    let mut view = PagedView::new(Category::RESOURCE, 5, caches.categories.clone());

    let table = view
        .load(1, |skip, limit| client.list_categories(skip, limit))
        .await
        .unwrap();
    assert_eq!(table.items[0].name, "Old");

    // fresh entry: a second render re-uses the cache without a request
    let table = view
        .refresh(|skip, limit| client.list_categories(skip, limit))
        .await
        .unwrap();
    assert_eq!(table.items[0].name, "Old");

    let mut coordinator = MutationCoordinator::new(
        Arc::new(caches.clone()),
        [Category::RESOURCE, Product::RESOURCE],
    );
    let id = CategoryId::from_uuid(category_id);
    let update = CategoryUpdate {
        name: Some("New".to_string()),
        parent_id: None,
    };
    {
        let client = &client;
        coordinator
            .submit(update, move |payload| async move {
                client.update_category(id, &payload).await
            })
            .await
            .unwrap();
    }
    assert_eq!(coordinator.state(), MutationState::Succeeded);
    assert!(caches.categories.get(&view.key(1)).unwrap().is_invalidated);

    let table = view
        .refresh(|skip, limit| client.list_categories(skip, limit))
        .await
        .unwrap();
    assert_eq!(table.items[0].name, "New");
}

#[tokio::test]
async fn test_deleted_product_is_absent_from_the_next_page_fetch() {
    let server = start_backend().await;
    let client = client_for(&server);
    let category_id = Uuid::new_v4();
    let doomed = Uuid::new_v4();
    let kept = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![
                product_json(doomed, "Doomed", "D1", category_id),
                product_json(kept, "Kept", "K1", category_id),
            ],
            2,
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/products/{}", doomed)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Product deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![product_json(kept, "Kept", "K1", category_id)],
            1,
        )))
        .mount(&server)
        .await;

    let caches = CacheSet::new();
    let mut view = PagedView::new(Product::RESOURCE, 10, caches.products.clone());

    let table = view
        .load(1, |skip, limit| client.list_products(skip, limit))
        .await
        .unwrap();
    let doomed_id = ProductId::from_uuid(doomed);
    assert!(table.items.iter().any(|p| p.id == doomed_id));

    let mut coordinator =
        MutationCoordinator::new(Arc::new(caches.clone()), [Product::RESOURCE]);
    {
        let client = &client;
        coordinator
            .submit(doomed_id, move |pid| async move {
                client.delete_product(pid).await
            })
            .await
            .unwrap();
    }

    let table = view
        .refresh(|skip, limit| client.list_products(skip, limit))
        .await
        .unwrap();
    assert!(table.items.iter().all(|p| p.id != doomed_id));
    assert_eq!(table.total_count, 1);
}

#[tokio::test]
async fn test_product_create_without_category_makes_no_remote_call() {
    let server = start_backend().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/v1/products/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let caches = CacheSet::new();
    let mut coordinator = MutationCoordinator::new(Arc::new(caches), [Product::RESOURCE]);

    let payload = ProductCreate {
        name: "Widget".to_string(),
        sku: "W1".to_string(),
        price: 9.99,
        quantity: 3,
        category_id: None,
        ..ProductCreate::default()
    };
    let err = {
        let client = &client;
        coordinator
            .submit(payload, move |p| async move { client.create_product(&p).await })
            .await
            .unwrap_err()
    };

    assert!(err.is_validation());
    assert!(err.to_string().contains("category_id"));
    assert_eq!(coordinator.state(), MutationState::Failed);
    server.verify().await;
}

#[tokio::test]
async fn test_concurrent_identical_fetches_make_one_request() {
    let server = start_backend().await;
    let client = client_for(&server);
    let category_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_json(
                    vec![product_json(Uuid::new_v4(), "Widget", "W1", category_id)],
                    1,
                ))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache: QueryCache<Product> = QueryCache::new();
    let key = QueryKey::new(Product::RESOURCE, 1);

    let (first, second) = tokio::join!(
        cache.fetch(&key, || client.list_products(0, 10)),
        cache.fetch(&key, || client.list_products(0, 10)),
    );

    assert_eq!(first.unwrap(), second.unwrap());
    server.verify().await;
}

#[tokio::test]
async fn test_out_of_range_category_page_clamps_to_last_page() {
    let server = start_backend().await;
    let client = client_for(&server);

    // page 4 of 12 rows at page size 5 comes back empty
    Mock::given(method("GET"))
        .and(path("/api/v1/categories/"))
        .and(query_param("skip", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(vec![], 12)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories/"))
        .and(query_param("skip", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![
                category_json(Uuid::new_v4(), "c11"),
                category_json(Uuid::new_v4(), "c12"),
            ],
            12,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let caches = CacheSet::new();
    let mut view = PagedView::new(Category::RESOURCE, 5, caches.categories.clone());

    let table = view
        .load(4, |skip, limit| client.list_categories(skip, limit))
        .await
        .unwrap();

    assert_eq!(table.page, 3);
    assert_eq!(table.page_count, 3);
    assert_eq!(table.items.len(), 2);
    assert!(table.has_prev);
    assert!(!table.has_next);
    server.verify().await;
}
