pub mod decks_sea;
