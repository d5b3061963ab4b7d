//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; stores convert it into
//! `crate::errors::domain::DomainError` here, and higher layers then map
//! `DomainError` to `AppError` via `From`.

use tracing::{error, warn};
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

const DECK_NOT_FOUND_PREFIX: &str = "DECK_NOT_FOUND:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_lock_or_statement_timeout(msg: &str) -> bool {
    // 55P03 lock_not_available, 57014 query_canceled (statement_timeout)
    mentions_sqlstate(msg, "55P03")
        || mentions_sqlstate(msg, "57014")
        || msg.contains("lock timeout")
        || msg.contains("statement timeout")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
///
/// Raw driver messages are logged with the current trace id but never copied
/// into the returned detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(DECK_NOT_FOUND_PREFIX) => {
            // Structured deck not found error from adapter layer
            if let Some(id) = msg
                .strip_prefix(DECK_NOT_FOUND_PREFIX)
                .and_then(|raw| Uuid::parse_str(raw).ok())
            {
                warn!(trace_id = %trace_id, deck_id = %id, "Deck vanished during update");
                return DomainError::not_found(NotFoundKind::Deck, format!("Deck {id} not found"));
            }
            warn!(trace_id = %trace_id, raw_error = %msg, "Failed to parse DECK_NOT_FOUND error");
            return DomainError::not_found(NotFoundKind::Deck, "Deck not found");
        }
        sea_orm::DbErr::Json(_) => {
            error!(trace_id = %trace_id, raw_error = %error_msg, "Stored deck failed to decode");
            return DomainError::infra(
                InfraErrorKind::DataCorruption,
                "Stored deck data is corrupted",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if is_lock_or_statement_timeout(&error_msg)
        || error_msg.contains("timeout")
        || error_msg.contains("pool")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
