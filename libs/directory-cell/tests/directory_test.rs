// libs/directory-cell/tests/directory_test.rs
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use directory_cell::services::catalog::ServiceCatalog;
use directory_cell::services::customers::CustomerDirectory;
use directory_cell::services::staff::StaffDirectory;
use shared_config::AppConfig;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: server.uri(),
        supabase_service_key: "test-key".to_string(),
        redis_url: None,
        smtp_host: None,
        smtp_port: 587,
        smtp_username: None,
        smtp_password: None,
        smtp_from: "noreply@test.local".to_string(),
        email_enabled: false,
    }
}

#[tokio::test]
async fn roster_is_fetched_per_outlet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .and(query_param("outlet_id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            json!({
                "staff_id": 1,
                "staff_name": "Alex Chen",
                "staff_role": "mechanic",
                "staff_phone": "555-0101",
                "outlet_id": 5
            }),
            json!({
                "staff_id": 2,
                "staff_name": "Sam Rivera",
                "staff_role": "service advisor",
                "staff_phone": null,
                "outlet_id": 5
            }),
        ]))
        .mount(&server)
        .await;

    let directory = StaffDirectory::new(&test_config(&server));
    let roster = directory.list_by_outlet(5).await.unwrap();

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].staff_id, 1);
    assert_eq!(roster[1].staff_name, "Sam Rivera");
}

#[tokio::test]
async fn missing_staff_member_is_absent_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let directory = StaffDirectory::new(&test_config(&server));
    let staff = directory.find_by_id(404).await.unwrap();

    assert!(staff.is_none());
}

#[tokio::test]
async fn missing_customer_is_absent_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let directory = CustomerDirectory::new(&test_config(&server));
    let customer = directory.find_by_id(404).await.unwrap();

    assert!(customer.is_none());
}

#[tokio::test]
async fn service_catalog_lists_offerings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/service_types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "service_id": 3,
            "service_type": "Oil Change",
            "service_desc": "Full synthetic oil change",
            "service_category": "maintenance",
            "service_price": 80.0,
            "service_duration": 60
        })]))
        .mount(&server)
        .await;

    let catalog = ServiceCatalog::new(&test_config(&server));
    let services = catalog.find_all().await.unwrap();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].service_type, "Oil Change");
    assert_eq!(services[0].service_duration, Some(60));
}
