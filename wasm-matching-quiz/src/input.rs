//! Pointer input routing
//!
//! Host pointer events arrive in order and each maps onto exactly one session
//! transition.

use crate::feedback::FeedbackSink;
use crate::state::{DropOutcome, Session};
use crate::types::Point;

/// Discrete pointer event from the host page
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on a prompt box
    DragStart { prompt: usize },
    /// Pointer moved, viewport coordinates
    Move { x: f64, y: f64 },
    /// Pointer entered an answer box
    Enter { answer: usize },
    /// Pointer left an answer box
    Leave,
    /// Pointer released over an answer box, or over nothing (`None`)
    Up { answer: Option<usize> },
}

/// Apply one event. Returns whether session state changed.
pub fn dispatch(session: &mut Session, event: PointerEvent, sink: &mut dyn FeedbackSink) -> bool {
    match event {
        PointerEvent::DragStart { prompt } => session.start_drag(prompt),
        PointerEvent::Move { x, y } => session.update_drag_pointer(Point::new(x, y)),
        PointerEvent::Enter { answer } => session.set_hover(Some(answer)),
        PointerEvent::Leave => session.set_hover(None),
        PointerEvent::Up { answer: Some(answer) } => {
            matches!(session.complete_drag(answer, sink), DropOutcome::Connected(_))
        }
        PointerEvent::Up { answer: None } => {
            let active = session.drag().is_some();
            session.cancel_drag();
            active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use crate::content::ContentBank;
    use crate::feedback::RecordingFeedback;

    #[test]
    fn full_gesture_commits_one_connection() {
        let mut session = Session::new(ContentBank::builtin(), &QuizConfig::default());
        let mut sink = RecordingFeedback::default();
        let target = session.correct_answer_position(2).unwrap();

        let events = [
            PointerEvent::DragStart { prompt: 2 },
            PointerEvent::Move { x: 40.0, y: 60.0 },
            PointerEvent::Enter { answer: target },
            PointerEvent::Up {
                answer: Some(target),
            },
        ];
        for event in events {
            assert!(dispatch(&mut session, event, &mut sink));
        }
        assert_eq!(session.connections().len(), 1);
        assert!(session.connections()[0].is_correct);
        assert_eq!(sink.signals, vec![true]);
    }

    #[test]
    fn release_outside_cancels() {
        let mut session = Session::new(ContentBank::builtin(), &QuizConfig::default());
        let mut sink = RecordingFeedback::default();
        dispatch(&mut session, PointerEvent::DragStart { prompt: 0 }, &mut sink);
        dispatch(&mut session, PointerEvent::Move { x: 1.0, y: 2.0 }, &mut sink);
        assert!(dispatch(&mut session, PointerEvent::Up { answer: None }, &mut sink));
        assert!(session.drag().is_none());
        assert!(session.connections().is_empty());
        assert!(sink.signals.is_empty());

        assert!(!dispatch(&mut session, PointerEvent::Up { answer: None }, &mut sink));
        assert!(!dispatch(&mut session, PointerEvent::Move { x: 5.0, y: 5.0 }, &mut sink));
    }
}
