//! Session state machine
//!
//! Owns the presentation order, committed connections, drag and hover state for
//! one play-through of one puzzle. Every transition is synchronous and either
//! applies fully or leaves the session untouched.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::QuizConfig;
use crate::content::{ContentBank, Puzzle};
use crate::error::QuizError;
use crate::feedback::{self, FeedbackSink};
use crate::permutation::PresentationOrder;
use crate::types::{Connection, Difficulty, DragState, Point};

/// Result of trying to finish a drag on an answer box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new connection was committed and the drag ended
    Connected(Connection),
    /// No drag was active
    NoDrag,
    /// The answer slot is already filled; the drag is still active
    AnswerTaken,
    /// The answer position does not exist; the drag is still active
    OutOfRange,
}

/// One interactive matching session
#[derive(Debug)]
pub struct Session {
    content: ContentBank,
    rng: StdRng,
    tier: Difficulty,
    level: usize,
    order: PresentationOrder,
    connections: Vec<Connection>,
    drag: Option<DragState>,
    hover: Option<usize>,
    layout_epoch: u64,
}

impl Session {
    /// Start a session on `config.starting_tier`, level 0
    pub fn new(content: ContentBank, config: &QuizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Session {
            content,
            rng,
            tier: config.starting_tier,
            level: 0,
            order: PresentationOrder::identity(0),
            connections: Vec::new(),
            drag: None,
            hover: None,
            layout_epoch: 0,
        };
        session.reinitialize();
        session
    }

    /// Replace the current presentation order with an explicit one
    ///
    /// Connections, drag and hover are cleared as on any re-initialisation.
    pub fn with_order(mut self, order: PresentationOrder) -> Result<Self, QuizError> {
        let expected = self.puzzle().len();
        if order.len() != expected {
            return Err(QuizError::OrderMismatch {
                expected,
                found: order.len(),
            });
        }
        self.order = order;
        self.clear_progress();
        Ok(self)
    }

    /// Switch tier; level goes back to 0 and the puzzle is reshuffled
    pub fn select_tier(&mut self, tier: Difficulty) {
        self.tier = tier;
        self.level = 0;
        self.reinitialize();
    }

    /// Switch level within the current tier. Out-of-range indices are ignored.
    pub fn select_level(&mut self, index: usize) -> bool {
        let available = self.content.levels(self.tier).len();
        if index >= available {
            tracing::debug!(tier = %self.tier, index, available, "ignoring out-of-range level");
            return false;
        }
        self.level = index;
        self.reinitialize();
        true
    }

    /// Reshuffle and clear progress, keeping tier and level
    pub fn reset(&mut self) {
        self.reinitialize();
    }

    /// Begin dragging from a prompt. Rejected if the prompt is already connected.
    pub fn start_drag(&mut self, prompt_position: usize) -> bool {
        if prompt_position >= self.order.len() {
            tracing::debug!(prompt_position, "ignoring drag from unknown prompt");
            return false;
        }
        if self.prompt_connection(prompt_position).is_some() {
            tracing::debug!(prompt_position, "ignoring drag from connected prompt");
            return false;
        }
        self.drag = Some(DragState {
            source_prompt_position: prompt_position,
            pointer_location: None,
        });
        true
    }

    /// Track the pointer (viewport coordinates) while a drag is active
    pub fn update_drag_pointer(&mut self, location: Point) -> bool {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.pointer_location = Some(location);
                true
            }
            None => false,
        }
    }

    /// Set or clear the hovered answer. Filled answer slots are ignored.
    pub fn set_hover(&mut self, answer_position: Option<usize>) -> bool {
        if let Some(a) = answer_position {
            if a >= self.order.len() || self.answer_connection(a).is_some() {
                return false;
            }
        }
        self.hover = answer_position;
        true
    }

    /// Drop the active drag onto an answer box
    ///
    /// On success the connection is committed, drag and hover are cleared and
    /// the outcome is sent to `sink`. Dropping on a filled slot leaves the drag
    /// active; the caller has to cancel it explicitly.
    pub fn complete_drag(
        &mut self,
        answer_position: usize,
        sink: &mut dyn FeedbackSink,
    ) -> DropOutcome {
        let Some(drag) = self.drag else {
            return DropOutcome::NoDrag;
        };
        if answer_position >= self.order.len() {
            return DropOutcome::OutOfRange;
        }
        if self.answer_connection(answer_position).is_some() {
            tracing::debug!(answer_position, "ignoring drop on filled answer");
            return DropOutcome::AnswerTaken;
        }

        let prompt_position = drag.source_prompt_position;
        let is_correct = self.correct_answer_position(prompt_position) == Some(answer_position);
        let connection = Connection {
            prompt_position,
            answer_position,
            is_correct,
        };
        self.connections.push(connection);
        self.drag = None;
        self.hover = None;
        tracing::debug!(prompt_position, answer_position, is_correct, "connection committed");

        feedback::deliver(sink, is_correct);
        DropOutcome::Connected(connection)
    }

    /// End any drag without connecting
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.hover = None;
    }

    /// Display position of the answer that matches the prompt at `prompt_position`
    ///
    /// **Learning Point**: display -> original on the prompt side, the bijection
    /// in original space, then original -> display on the answer side. Display
    /// positions are never compared across columns directly.
    pub fn correct_answer_position(&self, prompt_position: usize) -> Option<usize> {
        let original_prompt = self.order.original_prompt(prompt_position)?;
        let expected_answer = self.puzzle().correct_answer(original_prompt)?;
        self.order.answer_display(expected_answer)
    }

    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn content(&self) -> &ContentBank {
        &self.content
    }

    pub fn puzzle(&self) -> &Puzzle {
        // tier/level are only ever set to indices that exist in the bank
        &self.content.levels(self.tier)[self.level]
    }

    pub fn order(&self) -> &PresentationOrder {
        &self.order
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Bumped on every re-initialisation; layout measured under an older epoch is stale
    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    pub fn prompt_connection(&self, prompt_position: usize) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.prompt_position == prompt_position)
    }

    pub fn answer_connection(&self, answer_position: usize) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.answer_position == answer_position)
    }

    /// Prompt text at a display position
    pub fn prompt_text(&self, prompt_position: usize) -> Option<&str> {
        let original = self.order.original_prompt(prompt_position)?;
        self.puzzle().prompts().get(original).map(String::as_str)
    }

    /// Answer text at a display position
    pub fn answer_text(&self, answer_position: usize) -> Option<&str> {
        let original = self.order.original_answer(answer_position)?;
        self.puzzle().answers().get(original).map(String::as_str)
    }

    /// Every prompt has a connection
    pub fn is_complete(&self) -> bool {
        self.connections.len() == self.order.len()
    }

    pub fn correct_count(&self) -> usize {
        self.connections.iter().filter(|c| c.is_correct).count()
    }

    fn reinitialize(&mut self) {
        let n = self.puzzle().len();
        self.order = PresentationOrder::random(n, &mut self.rng);
        self.clear_progress();
        tracing::info!(tier = %self.tier, level = self.level, size = n, "session initialised");
    }

    fn clear_progress(&mut self) {
        self.connections.clear();
        self.drag = None;
        self.hover = None;
        self.layout_epoch += 1;
    }
}
