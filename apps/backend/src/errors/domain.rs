//! Domain-level error type used across the catalog, stores and the deck service.
//!
//! This error type is HTTP- and DB-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::error_code::ErrorCode;

/// Caller-side validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Empty id, non-positive count, malformed boolean or integer
    InvalidParameter,
    /// Unknown card code in a creation request
    InvalidCardCode,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Deck,
    Other(String),
}

/// Requests that are well-formed but clash with the current deck state
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Draw count exceeds the cards remaining in the deck
    InsufficientCards,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Request cannot be satisfied by the current state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn invalid_parameter(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::InvalidParameter, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(ValidationKind::InvalidParameter, _) => {
                ErrorCode::InvalidParameter
            }
            DomainError::Validation(ValidationKind::InvalidCardCode, _) => {
                ErrorCode::InvalidCardCode
            }
            DomainError::Validation(ValidationKind::Other(_), _) => ErrorCode::ValidationError,
            DomainError::Conflict(ConflictKind::InsufficientCards, _) => {
                ErrorCode::DeckCardInsufficient
            }
            DomainError::Conflict(ConflictKind::Other(_), _) => ErrorCode::Conflict,
            DomainError::NotFound(NotFoundKind::Deck, _) => ErrorCode::DeckNotFound,
            DomainError::NotFound(NotFoundKind::Other(_), _) => ErrorCode::NotFound,
            DomainError::Infra(InfraErrorKind::Timeout, _) => ErrorCode::DbTimeout,
            DomainError::Infra(InfraErrorKind::DbUnavailable, _) => ErrorCode::DbUnavailable,
            DomainError::Infra(InfraErrorKind::DataCorruption, _) => ErrorCode::DataCorruption,
            DomainError::Infra(InfraErrorKind::Other(_), _) => ErrorCode::DbError,
        }
    }

    /// Human-readable detail carried by the error.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Infra(_, d) => d,
        }
    }
}
