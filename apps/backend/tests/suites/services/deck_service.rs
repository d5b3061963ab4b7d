use std::sync::atomic::Ordering;
use std::sync::Arc;

use backend::domain::{catalog, shuffle, Card};
use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use backend::services::decks::DeckService;

use crate::support::counting_store::CountingStore;

fn codes(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|c| (*c).to_string()).collect()
}

fn counting_service() -> (DeckService, CountingStore) {
    let store = CountingStore::new();
    let service = DeckService::new(
        Arc::new(store.clone()),
        shuffle::seeded_generator(2024),
        shuffle::default_shuffler(),
    );
    (service, store)
}

#[tokio::test]
async fn get_twice_without_draw_is_identical() {
    let (service, _) = counting_service();
    let deck = service.create_deck(true, &[]).await.unwrap();
    let id = deck.id.to_string();

    let first = service.get_deck(&id).await.unwrap();
    let second = service.get_deck(&id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, deck);
}

#[tokio::test]
async fn draws_walk_the_deck_until_empty() {
    let (service, _) = counting_service();
    let deck = service.create_deck(false, &[]).await.unwrap();
    let id = deck.id.to_string();

    let mut seen: Vec<Card> = Vec::new();
    for _ in 0..4 {
        seen.extend(service.draw_cards(&id, 13).await.unwrap());
    }
    assert_eq!(seen, catalog::canonical_deck());

    let empty = service.get_deck(&id).await.unwrap();
    assert_eq!(empty.remaining(), 0);
    assert!(empty.cards.is_empty());
    assert!(empty.updated_at >= empty.created_at);

    let err = service.draw_cards(&id, 1).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::InsufficientCards, _)
    ));
}

#[tokio::test]
async fn zero_count_never_reaches_the_store() {
    let (service, store) = counting_service();
    let deck = service.create_deck(false, &codes(&["AS"])).await.unwrap();
    let before = store.calls.total();

    let err = service
        .draw_cards(&deck.id.to_string(), 0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidParameter, _)
    ));
    assert_eq!(store.calls.total(), before);
    assert_eq!(store.calls.draw.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_or_malformed_ids_never_reach_the_store() {
    let (service, store) = counting_service();

    let blank = service.get_deck("").await.unwrap_err();
    assert!(matches!(
        blank,
        DomainError::Validation(ValidationKind::InvalidParameter, _)
    ));

    let malformed = service.draw_cards("deck-1", 1).await.unwrap_err();
    assert!(matches!(
        malformed,
        DomainError::NotFound(NotFoundKind::Deck, _)
    ));

    assert_eq!(store.calls.total(), 0);
}

#[tokio::test]
async fn invalid_code_persists_nothing() {
    let (service, store) = counting_service();

    let err = service
        .create_deck(false, &codes(&["AS", "ZZ", "KH"]))
        .await
        .unwrap_err();
    assert_eq!(err.detail(), "Invalid card code: ZZ");
    assert_eq!(store.calls.insert.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn lowercase_codes_are_rejected() {
    let (service, _) = counting_service();
    let err = service
        .create_deck(false, &codes(&["as"]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidCardCode, _)
    ));
}

#[tokio::test]
async fn duplicate_codes_are_kept() {
    let (service, _) = counting_service();
    let deck = service
        .create_deck(false, &codes(&["AS", "AS"]))
        .await
        .unwrap();
    assert_eq!(deck.remaining(), 2);
}

#[tokio::test]
async fn unshuffled_requests_skip_the_shuffler() {
    let store = CountingStore::new();
    let service = DeckService::new(
        Arc::new(store),
        shuffle::seeded_generator(1),
        Arc::new(|_: &mut shuffle::RandomSource, _: Vec<Card>| -> Vec<Card> {
            panic!("shuffler must not run for unshuffled decks")
        }),
    );

    let deck = service.create_deck(false, &[]).await.unwrap();
    assert_eq!(deck.cards, catalog::canonical_deck());
}

#[tokio::test]
async fn shuffled_partial_deck_keeps_its_cards() {
    let (service, _) = counting_service();
    let requested = codes(&["AS", "KD", "AC", "2C", "KH", "10H", "7S", "QD"]);
    let deck = service.create_deck(true, &requested).await.unwrap();

    let mut got: Vec<String> = deck.cards.iter().map(Card::code).collect();
    let mut want = requested.clone();
    got.sort();
    want.sort();
    assert_eq!(got, want);
}
