//! Box affordances and the host-facing session snapshot

use serde::Serialize;

use crate::state::Session;
use crate::types::{Connection, Difficulty, DragState};

/// Visual state of a prompt box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptBoxState {
    Idle,
    /// Source of the active drag
    Dragging,
    /// Already matched; not draggable
    Connected,
}

/// Visual state of an answer box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerBoxState {
    Idle,
    /// Under the pointer during a drag
    Hovered,
    Correct,
    Incorrect,
}

/// Box size class; the hard tier uses compact boxes to fit six rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxSize {
    Large,
    Small,
}

impl BoxSize {
    pub fn for_tier(tier: Difficulty) -> Self {
        match tier {
            Difficulty::Hard => BoxSize::Small,
            Difficulty::Easy | Difficulty::Medium => BoxSize::Large,
        }
    }
}

pub fn prompt_state(session: &Session, prompt_position: usize) -> PromptBoxState {
    if session.prompt_connection(prompt_position).is_some() {
        PromptBoxState::Connected
    } else if session.drag().map(|d| d.source_prompt_position) == Some(prompt_position) {
        PromptBoxState::Dragging
    } else {
        PromptBoxState::Idle
    }
}

pub fn answer_state(session: &Session, answer_position: usize) -> AnswerBoxState {
    match session.answer_connection(answer_position) {
        Some(c) if c.is_correct => AnswerBoxState::Correct,
        Some(_) => AnswerBoxState::Incorrect,
        None if session.drag().is_some() && session.hover() == Some(answer_position) => {
            AnswerBoxState::Hovered
        }
        None => AnswerBoxState::Idle,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PromptView {
    pub text: String,
    pub state: PromptBoxState,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerView {
    pub text: String,
    pub state: AnswerBoxState,
}

/// Everything the host needs to draw the two columns and the menus
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub tier: Difficulty,
    pub level: usize,
    /// Number of levels in each tier, in menu order
    pub level_counts: Vec<usize>,
    pub box_size: BoxSize,
    pub prompts: Vec<PromptView>,
    pub answers: Vec<AnswerView>,
    pub connections: Vec<Connection>,
    pub drag: Option<DragState>,
    pub hover: Option<usize>,
    pub correct_count: usize,
    pub complete: bool,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        let n = session.order().len();
        let prompts = (0..n)
            .map(|p| PromptView {
                text: session.prompt_text(p).unwrap_or_default().to_string(),
                state: prompt_state(session, p),
            })
            .collect();
        let answers = (0..n)
            .map(|a| AnswerView {
                text: session.answer_text(a).unwrap_or_default().to_string(),
                state: answer_state(session, a),
            })
            .collect();
        SessionSnapshot {
            tier: session.tier(),
            level: session.level(),
            level_counts: Difficulty::ALL
                .iter()
                .map(|&tier| session.content().levels(tier).len())
                .collect(),
            box_size: BoxSize::for_tier(session.tier()),
            prompts,
            answers,
            connections: session.connections().to_vec(),
            drag: session.drag().copied(),
            hover: session.hover(),
            correct_count: session.correct_count(),
            complete: session.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use crate::content::{ContentBank, Puzzle};
    use crate::feedback::SilentFeedback;
    use crate::permutation::PresentationOrder;

    fn session() -> Session {
        let puzzle = Puzzle::new(["A", "B", "C"], ["X", "Y", "Z"], [(0, 0), (1, 1), (2, 2)]).unwrap();
        let bank = ContentBank::new(vec![puzzle.clone()], vec![puzzle.clone()], vec![puzzle]).unwrap();
        Session::new(bank, &QuizConfig::default())
            .with_order(PresentationOrder::identity(3))
            .unwrap()
    }

    #[test]
    fn box_states_follow_session() {
        let mut session = session();
        session.start_drag(0);
        session.complete_drag(0, &mut SilentFeedback);
        session.start_drag(1);
        session.complete_drag(2, &mut SilentFeedback);
        session.start_drag(2);
        session.set_hover(Some(1));

        assert_eq!(prompt_state(&session, 0), PromptBoxState::Connected);
        assert_eq!(prompt_state(&session, 2), PromptBoxState::Dragging);
        assert_eq!(answer_state(&session, 0), AnswerBoxState::Correct);
        assert_eq!(answer_state(&session, 2), AnswerBoxState::Incorrect);
        assert_eq!(answer_state(&session, 1), AnswerBoxState::Hovered);

        session.cancel_drag();
        assert_eq!(prompt_state(&session, 2), PromptBoxState::Idle);
        assert_eq!(answer_state(&session, 1), AnswerBoxState::Idle);
    }

    #[test]
    fn hover_without_drag_is_not_highlighted() {
        let mut session = session();
        session.set_hover(Some(1));
        assert_eq!(answer_state(&session, 1), AnswerBoxState::Idle);
    }

    #[test]
    fn snapshot_lists_columns_in_display_order() {
        let session = session();
        let snapshot = SessionSnapshot::capture(&session);
        let texts: Vec<&str> = snapshot.prompts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["A", "B", "C"]);
        assert_eq!(snapshot.level_counts, vec![1, 1, 1]);
        assert_eq!(snapshot.box_size, BoxSize::Large);
        assert!(!snapshot.complete);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["tier"], "easy");
        assert_eq!(json["boxSize"], "large");
        assert_eq!(json["answers"][0]["state"], "idle");
    }

    #[test]
    fn hard_tier_uses_small_boxes() {
        assert_eq!(BoxSize::for_tier(Difficulty::Hard), BoxSize::Small);
        assert_eq!(BoxSize::for_tier(Difficulty::Medium), BoxSize::Large);
    }
}
