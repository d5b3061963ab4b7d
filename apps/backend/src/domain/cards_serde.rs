//! Serialization and deserialization for card types
//!
//! Cards travel (and are stored as JSONB) in the shape
//! `{"value": "ACE", "suit": "SPADE", "code": "AS"}`.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};
use super::catalog;

// Suit serde
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name() == s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid suit: {s}")))
    }
}

// Rank serde
impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rank::ALL
            .into_iter()
            .find(|rank| rank.name() == s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid rank: {s}")))
    }
}

// Card serde
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Card", 3)?;
        state.serialize_field("value", &self.rank)?;
        state.serialize_field("suit", &self.suit)?;
        state.serialize_field("code", &self.code())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct StoredCard {
    value: Rank,
    suit: Suit,
    code: String,
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = StoredCard::deserialize(deserializer)?;
        let card = catalog::resolve(&stored.code).map_err(serde::de::Error::custom)?;
        if card.rank != stored.value || card.suit != stored.suit {
            return Err(serde::de::Error::custom(format!(
                "Card code {} does not match {} of {}",
                stored.code,
                stored.value.name(),
                stored.suit.name()
            )));
        }
        Ok(card)
    }
}
