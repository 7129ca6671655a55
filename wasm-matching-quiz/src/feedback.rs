//! Feedback sink seam
//!
//! The session reports each committed connection's outcome here. A failing
//! sink is logged and otherwise ignored.

use crate::error::FeedbackError;

/// Receives one correct/incorrect signal per committed connection
pub trait FeedbackSink {
    fn notify(&mut self, correct: bool) -> Result<(), FeedbackError>;
}

/// Sink that drops every signal
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn notify(&mut self, _correct: bool) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Sink that records every signal in order
#[derive(Clone, Debug, Default)]
pub struct RecordingFeedback {
    pub signals: Vec<bool>,
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&mut self, correct: bool) -> Result<(), FeedbackError> {
        self.signals.push(correct);
        Ok(())
    }
}

impl<F> FeedbackSink for F
where
    F: FnMut(bool) -> Result<(), FeedbackError>,
{
    fn notify(&mut self, correct: bool) -> Result<(), FeedbackError> {
        self(correct)
    }
}

/// Deliver a signal, swallowing and logging any sink failure
pub(crate) fn deliver(sink: &mut dyn FeedbackSink, correct: bool) {
    if let Err(err) = sink.notify(correct) {
        tracing::warn!(correct, error = %err, "feedback sink failed; session state unaffected");
    }
}
