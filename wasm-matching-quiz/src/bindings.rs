//! wasm-bindgen surface for the host page
//!
//! The host owns a `QuizWidget` handle, forwards pointer and menu events to it
//! and pulls overlay lines or a snapshot back after each event.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;

use crate::config::QuizConfig;
use crate::content::ContentBank;
use crate::error::{FeedbackError, QuizError};
use crate::feedback::FeedbackSink;
use crate::input::{self, PointerEvent};
use crate::overlay::{self, LayoutProvider, OverlayRenderer};
use crate::state::Session;
use crate::types::{BoxHandle, Difficulty, Rect, Segment};
use crate::view::SessionSnapshot;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get WASM module version for debugging and cache verification
#[wasm_bindgen]
pub fn get_wasm_version() -> String {
    concat!("wasm-matching-quiz ", env!("CARGO_PKG_VERSION")).to_string()
}

/// Layout provider that calls back into the page
///
/// The callback has the shape `(kind, index) => {left, top, width, height} | null`
/// with `kind` one of `"prompt"`, `"answer"`, `"container"`. A `DOMRect` works.
#[derive(Default)]
struct JsLayout {
    measure: Option<Function>,
}

impl JsLayout {
    fn call(&self, kind: &str, index: usize) -> Option<Rect> {
        let measure = self.measure.as_ref()?;
        let value = match measure.call2(
            &JsValue::NULL,
            &JsValue::from_str(kind),
            &JsValue::from_f64(index as f64),
        ) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(kind, index, error = ?err, "layout callback threw");
                return None;
            }
        };
        if value.is_null() || value.is_undefined() {
            return None;
        }
        let field = |name: &str| Reflect::get(&value, &JsValue::from_str(name)).ok()?.as_f64();
        Some(Rect::new(
            field("left")?,
            field("top")?,
            field("width")?,
            field("height")?,
        ))
    }
}

impl LayoutProvider for JsLayout {
    fn measure(&self, handle: BoxHandle) -> Option<Rect> {
        match handle {
            BoxHandle::Prompt(index) => self.call("prompt", index),
            BoxHandle::Answer(index) => self.call("answer", index),
        }
    }

    fn container(&self) -> Option<Rect> {
        self.call("container", 0)
    }
}

/// Feedback sink that calls `(correct: boolean) => void` on the page
#[derive(Default)]
struct JsFeedback {
    callback: Option<Function>,
}

impl FeedbackSink for JsFeedback {
    fn notify(&mut self, correct: bool) -> Result<(), FeedbackError> {
        let Some(callback) = self.callback.as_ref() else {
            return Ok(());
        };
        callback
            .call1(&JsValue::NULL, &JsValue::from_bool(correct))
            .map(|_| ())
            .map_err(|err| FeedbackError(format!("{err:?}")))
    }
}

fn to_js_error(err: impl Into<QuizError>) -> JsValue {
    JsValue::from_str(&err.into().to_string())
}

/// One embedded matching quiz
#[wasm_bindgen]
pub struct QuizWidget {
    session: Session,
    renderer: OverlayRenderer,
    layout: JsLayout,
    feedback: JsFeedback,
    config: QuizConfig,
}

impl Default for QuizWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizWidget {
    fn build(content: ContentBank, config: QuizConfig) -> QuizWidget {
        QuizWidget {
            session: Session::new(content, &config),
            renderer: OverlayRenderer::new(),
            layout: JsLayout::default(),
            feedback: JsFeedback::default(),
            config,
        }
    }

    fn dispatch(&mut self, event: PointerEvent) -> bool {
        input::dispatch(&mut self.session, event, &mut self.feedback)
    }
}

#[wasm_bindgen]
impl QuizWidget {
    /// Widget over the built-in question bank with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> QuizWidget {
        let config = QuizConfig::default();
        Self::build(ContentBank::builtin(), config)
    }

    /// Widget over custom content and settings
    ///
    /// @param content_json - content bank document; empty string for the built-in bank
    /// @param config_json - config document; empty string for defaults
    /// @returns the widget, or an error message if either document is invalid
    pub fn with_content(content_json: &str, config_json: &str) -> Result<QuizWidget, JsValue> {
        let content = if content_json.trim().is_empty() {
            ContentBank::builtin()
        } else {
            ContentBank::from_json(content_json).map_err(to_js_error)?
        };
        let config = QuizConfig::from_json(config_json).map_err(to_js_error)?;
        Ok(Self::build(content, config))
    }

    /// Install the measurement callback and measure the container immediately
    pub fn set_layout_provider(&mut self, measure: Function) {
        self.layout.measure = Some(measure);
        self.renderer.refresh_layout(&self.session, &self.layout);
    }

    /// Install the correct/incorrect cue callback
    pub fn set_feedback_sink(&mut self, callback: Function) {
        self.feedback.callback = Some(callback);
    }

    /// Re-measure the container (e.g. after the page scrolls or resizes)
    pub fn refresh_layout(&mut self) {
        self.renderer.refresh_layout(&self.session, &self.layout);
    }

    /// @param tier - 0 easy, 1 medium, 2 hard
    /// @returns false if the tier number is unknown
    pub fn select_tier(&mut self, tier: i32) -> bool {
        match Difficulty::from_i32(tier) {
            Some(tier) => {
                self.session.select_tier(tier);
                true
            }
            None => {
                tracing::debug!(tier, "ignoring unknown tier");
                false
            }
        }
    }

    pub fn select_level(&mut self, index: u32) -> bool {
        self.session.select_level(index as usize)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn drag_start(&mut self, prompt: u32) -> bool {
        self.dispatch(PointerEvent::DragStart {
            prompt: prompt as usize,
        })
    }

    /// @param x - viewport x (`clientX`)
    /// @param y - viewport y (`clientY`)
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(PointerEvent::Move { x, y })
    }

    pub fn pointer_enter(&mut self, answer: u32) -> bool {
        self.dispatch(PointerEvent::Enter {
            answer: answer as usize,
        })
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.dispatch(PointerEvent::Leave)
    }

    /// @param answer - answer display position under the pointer, or undefined to cancel the drag
    /// @returns true if a connection was committed or a drag was cancelled
    pub fn pointer_up(&mut self, answer: Option<u32>) -> bool {
        self.dispatch(PointerEvent::Up {
            answer: answer.map(|a| a as usize),
        })
    }

    /// @returns JSON array: [{"key":"perm-0","start":{"x":..,"y":..},"end":{..},"tone":"correct"},...]
    pub fn segments_json(&mut self) -> String {
        let segments: Vec<Segment> = self.renderer.segments(&self.session, &self.layout).collect();
        serde_json::to_string(&segments).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to encode segments");
            "[]".to_string()
        })
    }

    /// @returns `<svg>` overlay markup sized to the container
    pub fn overlay_svg(&mut self) -> String {
        let segments: Vec<Segment> = self.renderer.segments(&self.session, &self.layout).collect();
        overlay::render_svg(segments, self.renderer.dimensions(), &self.config)
    }

    /// @returns JSON snapshot of tier, level, both columns, connections and completion
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&SessionSnapshot::capture(&self.session)).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to encode snapshot");
            "null".to_string()
        })
    }
}
