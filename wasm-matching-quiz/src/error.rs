//! Error types for content loading, configuration and feedback delivery
//!
//! Transition requests that cannot be honoured (dragging a connected prompt,
//! dropping on a filled answer, selecting a missing level) are not errors:
//! the session ignores them and reports a rejected outcome.

use thiserror::Error;

use crate::types::Difficulty;

/// Problems found while loading or validating a content bank.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A tier has no levels.
    #[error("tier `{0}` has no levels")]
    EmptyTier(Difficulty),

    /// A puzzle inside a bank failed validation.
    #[error("{tier} level {level}: {source}")]
    InLevel {
        tier: Difficulty,
        level: usize,
        #[source]
        source: Box<ContentError>,
    },

    /// A puzzle has no prompts.
    #[error("puzzle has no prompts")]
    EmptyPuzzle,

    /// Prompt and answer columns differ in length.
    #[error("{prompts} prompts but {answers} answers")]
    CountMismatch { prompts: usize, answers: usize },

    /// `correctPairs` has no entry for a prompt.
    #[error("prompt {prompt} has no correct answer")]
    MissingPair { prompt: usize },

    /// `correctPairs` lists the same prompt more than once.
    #[error("prompt {prompt} has more than one correct answer")]
    DuplicatePrompt { prompt: usize },

    /// `correctPairs` names a prompt or answer outside `0..N`.
    #[error("pair {prompt} -> {answer} is out of range")]
    PairOutOfRange { prompt: usize, answer: usize },

    /// Two prompts map to the same answer.
    #[error("answer {answer} is claimed by more than one prompt")]
    DuplicateAnswer { answer: usize },

    /// The content document is not valid JSON for a bank.
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems found while loading widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stroke width must be positive, got {0}")]
    StrokeWidth(f64),
}

/// A feedback cue could not be delivered.
#[derive(Debug, Error)]
#[error("feedback cue failed: {0}")]
pub struct FeedbackError(pub String);

/// Top-level error for building a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An explicit presentation order does not fit the current puzzle.
    #[error("presentation order covers {found} items but the puzzle has {expected}")]
    OrderMismatch { expected: usize, found: usize },
}
