use actix_web::web;

pub mod decks;
pub mod health;

/// Register every route. Shared by `main.rs` and the route tests so both
/// exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Deck routes: /decks/**
    cfg.service(web::scope("/decks").configure(decks::configure_routes));
}
