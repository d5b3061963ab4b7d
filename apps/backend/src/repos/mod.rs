//! Deck store trait and the storage-independent implementations.

pub mod decks;
pub mod memory;

pub use decks::{DeckStore, StoredDeck};
pub use memory::InMemoryDeckStore;
