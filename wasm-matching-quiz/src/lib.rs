//! Main library entry point for wasm-matching-quiz
//!
//! This crate organizes the matching quiz into logical sub-modules:
//! - types: Core type definitions
//! - error: Error types
//! - config: Widget configuration
//! - content: Question bank (tiers, levels, puzzles)
//! - permutation: Shuffling and inverse lookups for the presentation order
//! - feedback: Correct/incorrect cue sink
//! - state: Session state machine
//! - input: Pointer event routing
//! - overlay: Connection line geometry and SVG output
//! - view: Box affordances and host snapshot
//! - bindings: wasm-bindgen surface

// Module declarations
mod bindings;
mod config;
mod content;
mod error;
mod feedback;
mod input;
mod overlay;
mod permutation;
mod state;
mod types;
mod view;

// From bindings module
pub use bindings::{get_wasm_version, init, QuizWidget};

pub use config::{Palette, QuizConfig};
pub use content::{ContentBank, Puzzle};
pub use error::{ConfigError, ContentError, FeedbackError, QuizError};
pub use feedback::{FeedbackSink, RecordingFeedback, SilentFeedback};
pub use input::{dispatch, PointerEvent};
pub use overlay::{render_svg, LayoutProvider, OverlayRenderer, StaticLayout, PENDING_KEY};
pub use permutation::{inverse_lookup, is_permutation, shuffled_indices, PresentationOrder};
pub use state::{DropOutcome, Session};
pub use types::{BoxHandle, Connection, Difficulty, DragState, LineTone, Point, Rect, Segment};
pub use view::{
    answer_state, prompt_state, AnswerBoxState, AnswerView, BoxSize, PromptBoxState, PromptView,
    SessionSnapshot,
};
