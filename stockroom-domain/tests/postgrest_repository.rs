#![cfg(feature = "remote")]

use serde_json::json;
use std::sync::Arc;
use stockroom_domain::error::DomainError;
use stockroom_domain::form::FormInput;
use stockroom_domain::model::Product;
use stockroom_domain::mutation::{IdStrategy, MutationApplier};
use stockroom_domain::notify::InMemoryNotifier;
use stockroom_domain::persist::{PostgrestRepository, RecordRepository, RemoteConfig};
use stockroom_domain::sync::{SyncAdapter, SyncPhase};
use stockroom_domain::value_object::RecordId;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "anon-key";

fn config(server: &MockServer) -> RemoteConfig {
    RemoteConfig::builder()
        .url(format!("{}/", server.uri()))
        .api_key(KEY)
        .timeout_secs(5)
        .build()
}

fn laptop() -> Product {
    Product {
        id: RecordId::from("PRD-001"),
        name: "Laptop".into(),
        category: "Electronics".into(),
        price: Some(999.99),
        stock: Some(12),
    }
}

#[tokio::test]
async fn list_selects_all_with_auth_headers() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "*"))
        .and(header("apikey", KEY))
        .and(header("authorization", format!("Bearer {KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "PRD-001", "name": "Laptop", "category": "Electronics", "price": 999.99, "stock": 12},
            {"id": "PRD-002", "name": "Desk", "category": "Furniture", "price": null, "stock": 3}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = PostgrestRepository::<Product>::new(&config(&server))?;
    assert_eq!(repo.endpoint(), format!("{}/rest/v1/products", server.uri()));

    let rows = repo.list().await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], laptop());
    assert_eq!(rows[1].price, None);
    Ok(())
}

#[tokio::test]
async fn insert_posts_single_element_array() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .and(header("apikey", KEY))
        .and(body_json(json!([
            {"id": "PRD-001", "name": "Laptop", "category": "Electronics", "price": 999.99, "stock": 12}
        ])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let repo = PostgrestRepository::<Product>::new(&config(&server))?;
    repo.insert(&laptop()).await?;
    Ok(())
}

#[tokio::test]
async fn update_patches_by_id_without_id_in_body() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.PRD-001"))
        .and(body_json(json!(
            {"name": "Laptop", "category": "Electronics", "price": 999.99, "stock": 12}
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let repo = PostgrestRepository::<Product>::new(&config(&server))?;
    let item = laptop();
    repo.update(&item.id, &item).await?;
    Ok(())
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_returned() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.PRD-001"))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "PRD-001"}])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.PRD-404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let repo = PostgrestRepository::<Product>::new(&config(&server))?;
    assert!(repo.delete(&RecordId::from("PRD-001")).await?);
    assert!(!repo.delete(&RecordId::from("PRD-404")).await?);
    Ok(())
}

#[tokio::test]
async fn non_success_status_becomes_remote_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let repo = PostgrestRepository::<Product>::new(&config(&server))?;
    let err = repo.list().await.unwrap_err();
    match err {
        DomainError::Remote { operation, reason } => {
            assert_eq!(operation, "list");
            assert!(reason.starts_with("401"));
            assert!(reason.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn failed_remote_add_keeps_cache_and_notifies_once() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "PRD-001", "name": "Laptop", "category": "Electronics", "price": 999.99, "stock": 12}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(InMemoryNotifier::new());
    let adapter = SyncAdapter::new(
        Arc::new(PostgrestRepository::<Product>::new(&config(&server))?),
        MutationApplier::new(IdStrategy::Monotonic, Arc::new(stockroom_domain::clock::SystemClock)),
        notifier.clone(),
    );
    adapter.load().await?;

    let form = FormInput::new()
        .with("name", "Monitor")
        .with("category", "Electronics")
        .with("price", "199.5")
        .with("stock", "4");
    let err = adapter.add(&form).await.unwrap_err();
    assert!(matches!(err, DomainError::Remote { operation: "insert", .. }));

    assert_eq!(adapter.store().len(), 1);
    assert_eq!(adapter.phase(), SyncPhase::Idle);
    let last_error = adapter.last_error().unwrap_or_default();
    assert!(last_error.starts_with("Failed to add product"));
    assert!(last_error.contains("500"));

    let history = notifier.history();
    assert_eq!(history.len(), 1);
    assert!(history[0].is_error());
    assert_eq!(history[0].title(), "Error");
    assert_eq!(history[0].description(), "Failed to add product");
    Ok(())
}

#[tokio::test]
async fn successful_remote_edit_reloads_collection() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "PRD-001", "name": "Laptop", "category": "Electronics", "price": 899.0, "stock": 12}
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(query_param("id", "eq.PRD-001"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(InMemoryNotifier::new());
    let adapter = SyncAdapter::new(
        Arc::new(PostgrestRepository::<Product>::new(&config(&server))?),
        MutationApplier::default(),
        notifier.clone(),
    );
    adapter.load().await?;

    let updated = adapter
        .edit(&RecordId::from("PRD-001"), &FormInput::new().with("price", "899"))
        .await?;
    assert_eq!(updated.price, Some(899.0));
    assert_eq!(updated.stock, Some(12));

    let last = notifier.last().expect("success notice");
    assert_eq!(last.title(), "Product updated");
    assert_eq!(last.description(), "Laptop has been updated successfully.");
    Ok(())
}
