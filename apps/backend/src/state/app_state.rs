use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::repos::memory::InMemoryDeckStore;
use crate::services::decks::DeckService;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent when decks live in memory)
    db: Option<Arc<DatabaseConnection>>,
    /// Deck service wired to whichever store backs this process
    pub decks: DeckService,
}

impl AppState {
    /// Create a new AppState backed by the given database connection
    pub fn new(db: Arc<DatabaseConnection>, decks: DeckService) -> Self {
        Self {
            db: Some(db),
            decks,
        }
    }

    /// Create a new AppState without a database connection
    pub fn without_db(decks: DeckService) -> Self {
        Self { db: None, decks }
    }

    /// AppState over a fresh process-local store with default randomness
    pub fn in_memory() -> Self {
        Self::without_db(DeckService::with_store(Arc::new(InMemoryDeckStore::new())))
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }
}
