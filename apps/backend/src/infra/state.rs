use std::sync::Arc;

use crate::adapters::decks_sea::DeckStoreSea;
use crate::config::db::{DbOwner, DbProfile};
use crate::domain::shuffle::{self, CardShuffler, RandomGenerator};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::repos::decks::DeckStore;
use crate::repos::memory::InMemoryDeckStore;
use crate::services::decks::DeckService;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    store: Option<Arc<dyn DeckStore>>,
    generator: RandomGenerator,
    shuffler: CardShuffler,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: None,
            store: None,
            generator: shuffle::default_generator(),
            shuffler: shuffle::default_shuffler(),
        }
    }

    /// Back decks with Postgres, connecting as the application role.
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Use a specific store; ignored when a database profile is set.
    pub fn with_store(mut self, store: Arc<dyn DeckStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_randomness(mut self, generator: RandomGenerator, shuffler: CardShuffler) -> Self {
        self.generator = generator;
        self.shuffler = shuffler;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some(profile) = self.db_profile {
            // Migrations are owned by the migration CLI; connect only.
            let conn = Arc::new(connect_db(profile, DbOwner::App).await?);
            let store: Arc<dyn DeckStore> = Arc::new(DeckStoreSea::new(Arc::clone(&conn)));
            let decks = DeckService::new(store, self.generator, self.shuffler);
            Ok(AppState::new(conn, decks))
        } else {
            let store = self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryDeckStore::new()));
            let decks = DeckService::new(store, self.generator, self.shuffler);
            Ok(AppState::without_db(decks))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
