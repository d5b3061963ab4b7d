//! Randomness and shuffling collaborators for deck creation.
//!
//! Both are plain function values so tests can swap in a fixed seed or a
//! no-op shuffle without a trait object per call site.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cards_types::Card;

/// Random source handed to the shuffler.
pub type RandomSource = ChaCha8Rng;

/// Produces a fresh random source for one shuffle.
pub type RandomGenerator = Arc<dyn Fn() -> RandomSource + Send + Sync>;

/// Permutes cards using the given source.
pub type CardShuffler = Arc<dyn Fn(&mut RandomSource, Vec<Card>) -> Vec<Card> + Send + Sync>;

/// Fresh OS-seeded source.
pub fn os_random_source() -> RandomSource {
    ChaCha8Rng::from_os_rng()
}

/// Deterministic source for a given seed.
pub fn seeded_random_source(seed: u64) -> RandomSource {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform Fisher-Yates permutation.
pub fn fisher_yates(rng: &mut RandomSource, mut cards: Vec<Card>) -> Vec<Card> {
    cards.shuffle(rng);
    cards
}

pub fn default_generator() -> RandomGenerator {
    Arc::new(os_random_source)
}

pub fn seeded_generator(seed: u64) -> RandomGenerator {
    Arc::new(move || seeded_random_source(seed))
}

pub fn default_shuffler() -> CardShuffler {
    Arc::new(fisher_yates)
}
