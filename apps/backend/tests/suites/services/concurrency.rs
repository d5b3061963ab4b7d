use std::collections::HashSet;
use std::sync::Arc;

use backend::domain::{catalog, Card};
use backend::errors::domain::{ConflictKind, DomainError};
use backend::repos::memory::InMemoryDeckStore;
use backend::services::decks::DeckService;
use futures_util::future::join_all;

fn service() -> DeckService {
    DeckService::with_store(Arc::new(InMemoryDeckStore::new()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_single_draws_partition_the_deck() {
    let service = service();
    let deck = service.create_deck(false, &[]).await.unwrap();
    let id = deck.id.to_string();

    // One caller more than there are cards, all racing at once.
    let tasks = (0..53).map(|_| {
        let service = service.clone();
        let id = id.clone();
        tokio::spawn(async move { service.draw_cards(&id, 1).await })
    });
    let results = join_all(tasks).await;

    let mut drawn: Vec<Card> = Vec::new();
    let mut shortfalls = 0;
    for joined in results {
        match joined.unwrap() {
            Ok(cards) => {
                assert_eq!(cards.len(), 1);
                drawn.extend(cards);
            }
            Err(DomainError::Conflict(ConflictKind::InsufficientCards, _)) => shortfalls += 1,
            Err(other) => panic!("unexpected draw error: {other}"),
        }
    }
    assert_eq!(shortfalls, 1);
    assert_eq!(drawn.len(), 52);

    let unique: HashSet<Card> = drawn.iter().copied().collect();
    let all: HashSet<Card> = catalog::canonical_deck().into_iter().collect();
    assert_eq!(unique, all);

    assert_eq!(service.get_deck(&id).await.unwrap().remaining(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_overdraws_never_oversell() {
    let service = service();
    let codes: Vec<String> = ["AS", "2S", "3S", "4S", "5S"]
        .iter()
        .map(|c| (*c).to_string())
        .collect();
    let deck = service.create_deck(false, &codes).await.unwrap();
    let id = deck.id.to_string();

    // Ten callers each want two of five cards: exactly two can succeed.
    let tasks = (0..10).map(|_| {
        let service = service.clone();
        let id = id.clone();
        tokio::spawn(async move { service.draw_cards(&id, 2).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes: Vec<&Vec<Card>> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(successes.len(), 2);
    for failure in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(
            failure,
            DomainError::Conflict(ConflictKind::InsufficientCards, _)
        ));
    }

    let drawn: HashSet<Card> = successes.iter().flat_map(|c| c.iter().copied()).collect();
    assert_eq!(drawn.len(), 4);

    let left = service.get_deck(&id).await.unwrap();
    assert_eq!(left.remaining(), 1);
    assert!(!drawn.contains(&left.cards[0]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn draws_on_different_decks_are_independent() {
    let service = service();
    let a = service.create_deck(false, &[]).await.unwrap().id.to_string();
    let b = service.create_deck(false, &[]).await.unwrap().id.to_string();

    let ids: Vec<String> = (0..26).flat_map(|_| [a.clone(), b.clone()]).collect();
    let tasks = ids.into_iter().map(|id| {
        let service = service.clone();
        tokio::spawn(async move { service.draw_cards(&id, 1).await })
    });
    for joined in join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    assert_eq!(service.get_deck(&a).await.unwrap().remaining(), 26);
    assert_eq!(service.get_deck(&b).await.unwrap().remaining(), 26);
}
