//! Error types for deal generation and the rules engine.
//!
//! Generation itself never fails outward; these errors surface from the
//! primitives (dealing, applying moves) and from tooling-side loading.

use thiserror::Error;

use crate::state::Move;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("Invalid deck: {reason}")]
    InvalidDeck { reason: String },

    #[error("Illegal move {mv:?}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },

    #[error("Invalid options: {reason}")]
    Options { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DealError {
    #[inline]
    pub(crate) fn invalid_deck(reason: impl Into<String>) -> Self {
        DealError::InvalidDeck { reason: reason.into() }
    }

    #[inline]
    pub(crate) fn illegal(mv: Move, reason: &'static str) -> Self {
        DealError::IllegalMove { mv, reason }
    }

    #[inline]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, DealError::IllegalMove { .. })
    }
}

pub type DealResult<T> = Result<T, DealError>;
