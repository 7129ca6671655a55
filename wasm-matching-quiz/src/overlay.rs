//! Geometric overlay renderer
//!
//! Turns session state plus measured box geometry into line segments expressed
//! relative to the play-area container. The renderer only reads the session;
//! the one thing it keeps is the container rectangle and the layout epoch it
//! was measured under.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::config::QuizConfig;
use crate::state::Session;
use crate::types::{BoxHandle, Connection, LineTone, Point, Rect, Segment};

/// Render key of the provisional drag line
pub const PENDING_KEY: &str = "temp-arrow";

/// Host-side layout measurement
///
/// Returns `None` for boxes that are not mounted yet.
pub trait LayoutProvider {
    /// Viewport rectangle of a prompt or answer box
    fn measure(&self, handle: BoxHandle) -> Option<Rect>;
    /// Viewport rectangle of the play-area container
    fn container(&self) -> Option<Rect>;
}

/// Layout provider backed by measurements pushed in by the host
#[derive(Clone, Debug, Default)]
pub struct StaticLayout {
    container: Option<Rect>,
    boxes: HashMap<BoxHandle, Rect>,
}

impl StaticLayout {
    pub fn new(container: Rect) -> Self {
        StaticLayout {
            container: Some(container),
            boxes: HashMap::new(),
        }
    }

    pub fn set_container(&mut self, rect: Rect) {
        self.container = Some(rect);
    }

    pub fn set(&mut self, handle: BoxHandle, rect: Rect) {
        self.boxes.insert(handle, rect);
    }

    pub fn with(mut self, handle: BoxHandle, rect: Rect) -> Self {
        self.set(handle, rect);
        self
    }

    /// Forget all box measurements (the container is kept)
    pub fn clear_boxes(&mut self) {
        self.boxes.clear();
    }
}

impl LayoutProvider for StaticLayout {
    fn measure(&self, handle: BoxHandle) -> Option<Rect> {
        self.boxes.get(&handle).copied()
    }

    fn container(&self) -> Option<Rect> {
        self.container
    }
}

#[derive(Clone, Copy, Debug)]
struct MeasuredContainer {
    epoch: u64,
    rect: Rect,
}

/// Produces overlay segments on demand
#[derive(Clone, Debug, Default)]
pub struct OverlayRenderer {
    container: Option<MeasuredContainer>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the container rectangle for the session's current layout epoch
    ///
    /// Call after mount and after every reset/tier/level change. `segments`
    /// also calls this itself when the stored measurement is stale.
    pub fn refresh_layout<L>(&mut self, session: &Session, layout: &L) -> Option<Rect>
    where
        L: LayoutProvider + ?Sized,
    {
        self.container = layout.container().map(|rect| MeasuredContainer {
            epoch: session.layout_epoch(),
            rect,
        });
        if self.container.is_none() {
            tracing::warn!("play-area container is not measurable; overlay is empty");
        }
        self.container()
    }

    /// Last measured container rectangle
    pub fn container(&self) -> Option<Rect> {
        self.container.map(|c| c.rect)
    }

    /// Overlay width and height (the container size)
    pub fn dimensions(&self) -> (f64, f64) {
        self.container()
            .map(|rect| (rect.width, rect.height))
            .unwrap_or((0.0, 0.0))
    }

    /// True if the container was measured under an older layout epoch, or never
    pub fn is_stale(&self, session: &Session) -> bool {
        self.container
            .map_or(true, |c| c.epoch != session.layout_epoch())
    }

    /// Lazily produce every line to draw: one per committed connection, then
    /// the provisional drag line if the pointer position is known.
    ///
    /// Boxes the layout cannot measure are skipped.
    pub fn segments<'a, L>(
        &mut self,
        session: &'a Session,
        layout: &'a L,
    ) -> impl Iterator<Item = Segment> + 'a
    where
        L: LayoutProvider + ?Sized,
    {
        if self.is_stale(session) {
            self.refresh_layout(session, layout);
        }
        let origin = self.container().map(|rect| rect.origin());

        let committed = origin.into_iter().flat_map(move |origin| {
            session
                .connections()
                .iter()
                .enumerate()
                .filter_map(move |(index, connection)| {
                    committed_segment(index, connection, origin, layout)
                })
        });
        let pending = origin.and_then(|origin| pending_segment(session, origin, layout));
        committed.chain(pending)
    }
}

fn committed_segment<L>(
    index: usize,
    connection: &Connection,
    origin: Point,
    layout: &L,
) -> Option<Segment>
where
    L: LayoutProvider + ?Sized,
{
    let prompt = layout.measure(BoxHandle::Prompt(connection.prompt_position));
    let answer = layout.measure(BoxHandle::Answer(connection.answer_position));
    let (Some(prompt), Some(answer)) = (prompt, answer) else {
        tracing::debug!(
            prompt = connection.prompt_position,
            answer = connection.answer_position,
            "skipping connection with unmeasured box"
        );
        return None;
    };
    Some(Segment {
        key: format!("perm-{index}"),
        start: prompt.right_center().relative_to(origin),
        end: answer.left_center().relative_to(origin),
        tone: LineTone::from_outcome(connection.is_correct),
    })
}

fn pending_segment<L>(session: &Session, origin: Point, layout: &L) -> Option<Segment>
where
    L: LayoutProvider + ?Sized,
{
    let drag = session.drag()?;
    let pointer = drag.pointer_location?;
    let source = layout.measure(BoxHandle::Prompt(drag.source_prompt_position))?;
    Some(Segment {
        key: PENDING_KEY.to_string(),
        start: source.right_center().relative_to(origin),
        end: pointer.relative_to(origin),
        tone: LineTone::Pending,
    })
}

fn tone_id(tone: LineTone) -> &'static str {
    match tone {
        LineTone::Correct => "correct",
        LineTone::Incorrect => "incorrect",
        LineTone::Pending => "pending",
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render segments as a standalone, pointer-transparent SVG overlay
///
/// @param segments - lines in container-relative coordinates
/// @param dimensions - overlay width and height (the container size)
/// @returns `<svg>` markup with one `<line>` per segment
pub fn render_svg<I>(segments: I, dimensions: (f64, f64), config: &QuizConfig) -> String
where
    I: IntoIterator<Item = Segment>,
{
    let (width, height) = dimensions;
    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" style="position:absolute;left:0;top:0;pointer-events:none">"#
    );

    if config.arrowheads {
        svg.push_str("<defs>");
        for tone in [LineTone::Correct, LineTone::Incorrect, LineTone::Pending] {
            let _ = write!(
                svg,
                r#"<marker id="arrowhead-{id}" markerWidth="12" markerHeight="8" refX="12" refY="4" orient="auto" markerUnits="strokeWidth"><polygon points="0 0, 12 4, 0 8" fill="{fill}"/></marker>"#,
                id = tone_id(tone),
                fill = escape_attr(config.palette.color(tone)),
            );
        }
        svg.push_str("</defs>");
    }

    for segment in segments {
        let _ = write!(
            svg,
            r#"<line data-key="{key}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{width}""#,
            key = escape_attr(&segment.key),
            x1 = segment.start.x,
            y1 = segment.start.y,
            x2 = segment.end.x,
            y2 = segment.end.y,
            stroke = escape_attr(config.palette.color(segment.tone)),
            width = config.stroke_width,
        );
        if config.arrowheads {
            let _ = write!(svg, r#" marker-end="url(#arrowhead-{})""#, tone_id(segment.tone));
        }
        svg.push_str("/>");
    }

    svg.push_str("</svg>");
    svg
}
