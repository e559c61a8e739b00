use axum_test::TestServer;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::Fake;
use serde_json::{json, Value};

use crate::app::{build_router, Repositories};
use crate::core::config::QueryConfig;

/// HTTP test server over fresh in-memory stores
pub fn test_server() -> TestServer {
    let router = build_router(Repositories::memory(), QueryConfig::default());
    TestServer::new(router).unwrap()
}

/// POST `body` to `path` and return the id of the created record
pub async fn create(server: &TestServer, path: &str, body: Value) -> i64 {
    let response = server.post(path).json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

pub async fn create_supplier(server: &TestServer) -> i64 {
    let name: String = CompanyName().fake();
    create(server, "/api/v1/suppliers", json!({ "name": name })).await
}

pub async fn create_location(server: &TestServer) -> i64 {
    let name: String = CityName().fake();
    create(server, "/api/v1/locations", json!({ "name": name })).await
}

pub async fn create_category(server: &TestServer, name: &str, parent: Option<i64>) -> i64 {
    create(
        server,
        "/api/v1/categories",
        json!({ "name": name, "parent_category_id": parent }),
    )
    .await
}

pub async fn create_product(server: &TestServer, sku: &str) -> i64 {
    create(
        server,
        "/api/v1/products",
        json!({ "sku": sku, "name": sku, "cost_price": "1", "sale_price": "2" }),
    )
    .await
}
