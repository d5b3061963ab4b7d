//! SeaORM adapter for the deck store - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Card;
use crate::entities::decks;

pub mod dto;
mod store;

pub use dto::DeckCreate;
pub use store::DeckStoreSea;

// Adapter functions return DbErr; the store maps to DomainError via From<DbErr>.

pub async fn create_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DeckCreate,
) -> Result<decks::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let deck = decks::ActiveModel {
        id: Set(dto.id),
        cards: Set(json!(dto.cards)),
        shuffled: Set(dto.shuffled),
        created_at: Set(now),
        updated_at: Set(now),
    };

    deck.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: Uuid,
) -> Result<Option<decks::Model>, sea_orm::DbErr> {
    decks::Entity::find_by_id(deck_id).one(conn).await
}

/// Read a deck row and hold an exclusive row lock (`SELECT ... FOR UPDATE`)
/// until the surrounding transaction ends.
///
/// Only meaningful inside a transaction; on a bare connection the lock is
/// released as soon as the statement completes.
pub async fn lock_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: Uuid,
) -> Result<Option<decks::Model>, sea_orm::DbErr> {
    decks::Entity::find_by_id(deck_id)
        .lock_exclusive()
        .one(conn)
        .await
}

/// Overwrite the remaining card sequence and bump `updated_at`.
pub async fn update_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    deck_id: Uuid,
    remaining: &[Card],
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = decks::Entity::update_many()
        .col_expr(decks::Column::Cards, Expr::value(json!(remaining)))
        .col_expr(decks::Column::UpdatedAt, Expr::value(now))
        .filter(decks::Column::Id.eq(deck_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!("DECK_NOT_FOUND:{deck_id}")));
    }

    Ok(())
}
