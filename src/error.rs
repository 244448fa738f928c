//! Error types shared across the view core.

use std::path::PathBuf;

use thiserror::Error;

use crate::conversation::{SectionId, TurnId};

/// Recoverable errors raised by navigation and follow-up dispatch.
///
/// None of these end the session; the event loop turns them into toasts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("no turn with id {0}")]
    InvalidNavigationTarget(TurnId),

    #[error("unknown section id {0:?}")]
    UnknownSection(String),

    #[error("follow-up question is empty")]
    EmptySubmission,

    #[error("an answer is already pending")]
    ConcurrentSubmission,

    /// The target was selected but has not been laid out yet, so no scroll happened.
    #[error("{turn}/{section} has not been measured yet")]
    MeasurementUnavailable { turn: TurnId, section: SectionId },

    #[error("answer service failed: {0}")]
    AnswerServiceFailure(String),
}

/// Errors raised while loading turn content from a JSON payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to read payload {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid payload JSON")]
    Json(#[from] serde_json::Error),

    #[error("citation at position {position} has id {found}, expected {expected}")]
    CitationOrder {
        position: usize,
        expected: u32,
        found: u32,
    },
}
