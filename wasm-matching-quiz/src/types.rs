//! Core type definitions for the matching quiz

use serde::{Deserialize, Serialize};

/// Difficulty tier enumeration
///
/// **Learning Point**: `#[repr(i32)]` keeps the discriminants stable so the
/// host page can pass a plain number across the wasm boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Difficulty {
    #[default]
    Easy = 0,
    Medium = 1,
    Hard = 2,
}

impl Difficulty {
    /// All tiers in menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Convert a host-side discriminant into a tier
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in screen space (viewport or container-relative, depending on context)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Express this point relative to `origin`
    pub fn relative_to(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Axis-aligned bounding rectangle as reported by the host layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Midpoint of the left edge
    pub fn left_center(&self) -> Point {
        Point::new(self.left, self.top + self.height / 2.0)
    }

    /// Midpoint of the right edge
    pub fn right_center(&self) -> Point {
        Point::new(self.left + self.width, self.top + self.height / 2.0)
    }
}

/// Handle naming one measured box in the play area
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxHandle {
    /// Prompt box at a display position
    Prompt(usize),
    /// Answer box at a display position
    Answer(usize),
}

/// A committed prompt-to-answer match
///
/// Both positions are display positions, never original indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub prompt_position: usize,
    pub answer_position: usize,
    pub is_correct: bool,
}

/// In-progress drag from a prompt box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub source_prompt_position: usize,
    /// Last pointer location in viewport coordinates, if the pointer has moved
    pub pointer_location: Option<Point>,
}

/// Style tag of an overlay line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTone {
    Correct,
    Incorrect,
    Pending,
}

impl LineTone {
    pub fn from_outcome(is_correct: bool) -> Self {
        if is_correct {
            LineTone::Correct
        } else {
            LineTone::Incorrect
        }
    }
}

/// One drawable overlay line in container-relative coordinates
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    /// Stable render key: `perm-<i>` for committed lines, `temp-arrow` for the drag line
    pub key: String,
    pub start: Point,
    pub end: Point,
    pub tone: LineTone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_discriminant() {
        for tier in Difficulty::ALL {
            assert_eq!(Difficulty::from_i32(tier as i32), Some(tier));
        }
        assert_eq!(Difficulty::from_i32(3), None);
        assert_eq!(Difficulty::from_i32(-1), None);
    }

    #[test]
    fn rect_edge_anchors() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.left_center(), Point::new(10.0, 40.0));
        assert_eq!(rect.right_center(), Point::new(110.0, 40.0));
    }

    #[test]
    fn point_relative_to_origin() {
        let p = Point::new(50.0, 75.0).relative_to(Point::new(10.0, 5.0));
        assert_eq!(p, Point::new(40.0, 70.0));
    }
}
