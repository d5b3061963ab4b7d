//! Domain services.

pub mod decks;

pub use decks::DeckService;
