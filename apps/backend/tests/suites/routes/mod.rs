pub mod decks;
pub mod health;
