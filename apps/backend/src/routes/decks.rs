//! Deck HTTP routes.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Card;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDeckQuery {
    pub shuffled: Option<String>,
    /// Comma-separated card codes, e.g. `AS,KD,10H`
    pub cards: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DrawCardsQuery {
    pub count: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateDeckResponse {
    pub id: Uuid,
    pub shuffled: bool,
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
pub struct DrawCardsResponse {
    pub cards: Vec<Card>,
}

fn invalid_param(field: &str) -> AppError {
    AppError::bad_request(
        ErrorCode::InvalidParameter,
        format!("{field} parameter is invalid"),
    )
}

/// Boolean literals accepted for `shuffled`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn parse_shuffled(raw: Option<&str>) -> Result<bool, AppError> {
    match raw {
        None | Some("") => Ok(false),
        Some(value) => parse_flag(value).ok_or_else(|| invalid_param("shuffled")),
    }
}

fn parse_card_codes(raw: Option<&str>) -> Vec<String> {
    match raw {
        None | Some("") => Vec::new(),
        Some(list) => list.split(',').map(str::to_owned).collect(),
    }
}

fn parse_count(raw: Option<&str>) -> Result<i64, AppError> {
    raw.and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| invalid_param("count"))
}

/// GET /decks?shuffled=<bool>&cards=<codes>
///
/// Creates a deck and returns its summary with `201 Created`.
async fn create_deck(
    query: web::Query<CreateDeckQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let shuffled = parse_shuffled(query.shuffled.as_deref())?;
    let codes = parse_card_codes(query.cards.as_deref());

    let deck = app_state.decks.create_deck(shuffled, &codes).await?;

    Ok(HttpResponse::Created().json(CreateDeckResponse {
        id: deck.id,
        shuffled: deck.shuffled,
        remaining: deck.remaining(),
    }))
}

/// GET /decks/{id}
async fn get_deck(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck = app_state.decks.get_deck(&path).await?;
    Ok(HttpResponse::Ok().json(deck))
}

/// GET /decks/{id}/cards?count=<n>
async fn draw_cards(
    path: web::Path<String>,
    query: web::Query<DrawCardsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let count = parse_count(query.count.as_deref())?;
    let cards = app_state.decks.draw_cards(&path, count).await?;
    Ok(HttpResponse::Ok().json(DrawCardsResponse { cards }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Malformed query string: {err}"))
            .into()
    }))
    .route("", web::get().to(create_deck))
    .route("/{id}", web::get().to(get_deck))
    .route("/{id}/cards", web::get().to(draw_cards));
}
