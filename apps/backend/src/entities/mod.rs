pub mod decks;

pub use decks::Entity as Decks;
pub use decks::Model as DeckRow;
