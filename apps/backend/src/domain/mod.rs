//! Domain layer: pure deck and card types and helpers.

pub mod cards_serde;
pub mod cards_types;
pub mod catalog;
pub mod deck;
pub mod shuffle;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use deck::{draw, Deck};
