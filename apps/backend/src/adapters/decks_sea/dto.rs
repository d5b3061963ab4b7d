//! DTOs for decks_sea adapter.

use uuid::Uuid;

use crate::domain::Card;

/// DTO for inserting a new deck row.
#[derive(Debug, Clone)]
pub struct DeckCreate {
    pub id: Uuid,
    pub shuffled: bool,
    pub cards: Vec<Card>,
}

impl DeckCreate {
    /// New row with a freshly generated id.
    pub fn new(shuffled: bool, cards: Vec<Card>) -> Self {
        Self {
            id: Uuid::new_v4(),
            shuffled,
            cards,
        }
    }
}
