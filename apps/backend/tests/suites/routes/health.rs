use actix_web::test;
use backend::AppState;
use serde_json::Value;

use crate::support::create_test_app;

#[actix_web::test]
async fn health_reports_memory_store() {
    let app = create_test_app(AppState::in_memory())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "memory");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    assert!(body["time"].as_str().is_some_and(|t| t.ends_with('Z')));
}
