//! Wire-format and error-mapping tests for the REST client.

use serde_json::json;
use stockroom_core::category::CategoryCreate;
use stockroom_core::{Error, ProductId};
use stockroom_tests::fixtures::{category_json, list_json, product_json};
use stockroom_tests::helpers::{client_for, start_backend};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_products_sends_offsets_and_bearer_token() {
    let server = start_backend().await;
    let client = client_for(&server);
    let category_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "10"))
        .and(header("Authorization", "Bearer tok_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![product_json(Uuid::new_v4(), "Widget", "W1", category_id)],
            11,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_products(10, 10).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_count, 11);
    server.verify().await;
}

#[tokio::test]
async fn test_create_category_posts_payload() {
    let server = start_backend().await;
    let client = client_for(&server);
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/v1/categories/"))
        .and(body_json(json!({ "name": "Tools" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(id, "Tools")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_category(&CategoryCreate {
            name: "Tools".to_string(),
            parent_id: None,
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Tools");
}

#[tokio::test]
async fn test_unauthorized_maps_to_unauthorized_error() {
    let server = start_backend().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/v1/products/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Not authenticated",
        })))
        .mount(&server)
        .await;

    let err = client.list_products(0, 10).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
}

#[tokio::test]
async fn test_not_found_carries_the_backend_detail() {
    let server = start_backend().await;
    let client = client_for(&server);
    let id = ProductId::new();

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/products/{}", id.as_uuid())))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Product not found",
        })))
        .mount(&server)
        .await;

    let err = client.get_product(id).await.unwrap_err();
    match err {
        Error::NotFound(detail) => assert_eq!(detail, "Product not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_business_rule_rejection_maps_to_remote_error() {
    let server = start_backend().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/v1/categories/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "Category name already exists",
        })))
        .mount(&server)
        .await;

    let err = client
        .create_category(&CategoryCreate {
            name: "Tools".to_string(),
            parent_id: None,
        })
        .await
        .unwrap_err();
    match err {
        Error::Remote(detail) => assert_eq!(detail, "Category name already exists"),
        other => panic!("expected Remote, got {:?}", other),
    }
}
