use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::{catalog, shuffle};
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::Value;

use crate::common::codes_of;
use crate::support::create_test_app;

async fn seeded_state() -> AppState {
    build_state()
        .with_randomness(shuffle::seeded_generator(11), shuffle::default_shuffler())
        .build()
        .await
        .unwrap()
}

#[actix_web::test]
async fn create_full_deck_returns_summary() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/decks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["shuffled"], false);
    assert_eq!(body["remaining"], 52);
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert!(body.get("cards").is_none());
}

#[actix_web::test]
async fn create_partial_deck_then_open_it() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/decks?cards=AS,KD,AC,2C,KH")
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["remaining"], 5);

    let req = test::TestRequest::get()
        .uri(&format!("/decks/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let deck: Value = test::read_body_json(resp).await;
    assert_eq!(deck["id"], id);
    assert_eq!(deck["shuffled"], false);
    assert_eq!(deck["remaining"], 5);
    assert_eq!(codes_of(&deck["cards"]), ["AS", "KD", "AC", "2C", "KH"]);
    assert_eq!(
        deck["cards"][0],
        serde_json::json!({"value": "ACE", "suit": "SPADE", "code": "AS"})
    );
    assert_eq!(deck["created_at"], deck["updated_at"]);
}

#[actix_web::test]
async fn shuffled_deck_is_a_permutation() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/decks?shuffled=true")
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["shuffled"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/decks/{}", created["id"].as_str().unwrap()))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;

    let mut listed = codes_of(&deck["cards"]);
    let canonical: Vec<String> = catalog::canonical_deck().iter().map(|c| c.code()).collect();
    assert_ne!(listed, canonical);
    listed.sort();
    let mut sorted = canonical;
    sorted.sort();
    assert_eq!(listed, sorted);
}

#[actix_web::test]
async fn draw_removes_cards_from_the_top() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/decks?cards=AS,KD,AC")
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/decks/{id}/cards?count=2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let drawn: Value = test::read_body_json(resp).await;
    assert_eq!(codes_of(&drawn["cards"]), ["AS", "KD"]);

    let req = test::TestRequest::get()
        .uri(&format!("/decks/{id}"))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deck["remaining"], 1);
    assert_eq!(codes_of(&deck["cards"]), ["AC"]);
}

#[actix_web::test]
async fn overdraw_is_unprocessable_and_keeps_deck() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/decks?cards=AS").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/decks/{id}/cards?count=2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "DECK_CARD_INSUFFICIENT",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("only 1 remaining"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/decks/{id}"))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deck["remaining"], 1);
}

#[actix_web::test]
async fn invalid_shuffled_is_bad_request() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/decks?shuffled=maybe")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PARAMETER",
        StatusCode::BAD_REQUEST,
        Some("shuffled"),
    )
    .await;
}

#[actix_web::test]
async fn unknown_card_code_is_unprocessable() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/decks?cards=AS,ZZ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_CARD_CODE",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("ZZ"),
    )
    .await;
}

#[actix_web::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    for uri in [
        format!("/decks/{}", uuid::Uuid::new_v4()),
        "/decks/not-a-deck".to_string(),
        format!("/decks/{}/cards?count=1", uuid::Uuid::new_v4()),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "DECK_NOT_FOUND",
            StatusCode::NOT_FOUND,
            None,
        )
        .await;
    }
}

#[actix_web::test]
async fn bad_counts_are_bad_request() {
    let app = create_test_app(seeded_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/decks").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    for (query, detail) in [
        ("", "count"),
        ("?count=abc", "count"),
        ("?count=0", "positive"),
        ("?count=-2", "positive"),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/decks/{id}/cards{query}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_PARAMETER",
            StatusCode::BAD_REQUEST,
            Some(detail),
        )
        .await;
    }
}
