// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable node descriptors.
//!
//! The engine's output is an ordered array of these records, ready for a generic scene
//! renderer: plain geometry plus style, with no retained references back into the engine.
//! Coordinates are local to the axis's outer rectangle. Label nodes additionally carry a
//! [`Collider`] for downstream overlap filtering and hit-testing; the collider is a simplified
//! shape, distinct from the label's visual bounds.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point};
use peniko::Brush;

use gradus_text::{TextAnchor, TextBaseline, TextStyle};

use crate::settings::StrokeStyle;

/// A simplified geometric shape attached to a label for overlap/hit-testing.
#[derive(Clone, Debug, PartialEq)]
pub enum Collider {
    /// An axis-aligned rectangle.
    Rect(kurbo::Rect),
    /// A convex polygon given by its vertices in order.
    Polygon(Vec<Point>),
}

/// The axis line (linear variant).
#[derive(Clone, Debug, PartialEq)]
pub struct LineNode {
    /// Segment start x.
    pub x1: f64,
    /// Segment start y.
    pub y1: f64,
    /// Segment end x.
    pub x2: f64,
    /// Segment end y.
    pub y2: f64,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

/// One tick mark, perpendicular to the axis line.
#[derive(Clone, Debug, PartialEq)]
pub struct TickNode {
    /// Segment start x.
    pub x1: f64,
    /// Segment start y.
    pub y1: f64,
    /// Segment end x.
    pub x2: f64,
    /// Segment end y.
    pub y2: f64,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
    /// Minor ticks are shorter and unlabeled.
    pub is_minor: bool,
    /// Rendering order hint.
    pub z_index: i32,
}

/// One tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelNode {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Label text (unshaped).
    pub text: String,
    /// Font settings the label is measured and rendered with.
    pub style: TextStyle,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchoring at `(x, y)`.
    pub anchor: TextAnchor,
    /// Vertical baseline at `(x, y)`.
    pub baseline: TextBaseline,
    /// Rotation around the anchor, in degrees.
    pub angle: f64,
    /// Maximum rendered width in pixels; longer text is truncated with an ellipsis by the
    /// renderer.
    pub max_width: f64,
    /// Overlap/hit-testing shape, if any.
    pub collider: Option<Collider>,
    /// Rendering order hint.
    pub z_index: i32,
}

/// A stroked free-form path (the arc variant's axis line).
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    /// Path geometry.
    pub path: BezPath,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

/// Any node the axis engine can emit.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisNode {
    /// The axis line.
    Line(LineNode),
    /// A tick mark.
    Tick(TickNode),
    /// A tick label.
    Label(LabelNode),
    /// An arc path.
    Path(PathNode),
}

impl AxisNode {
    /// Returns the node's rendering order hint.
    pub fn z_index(&self) -> i32 {
        match self {
            Self::Line(n) => n.z_index,
            Self::Tick(n) => n.z_index,
            Self::Label(n) => n.z_index,
            Self::Path(n) => n.z_index,
        }
    }
}

/// The literal placeholder rendered for missing or unusable label text.
pub const LABEL_PLACEHOLDER: &str = "-";

/// Returns `label`, or [`LABEL_PLACEHOLDER`] when it is empty or not renderable as a single
/// line.
pub(crate) fn label_or_placeholder(label: &str) -> String {
    if label.is_empty() || label.chars().all(char::is_whitespace) || label.contains('\n') {
        String::from(LABEL_PLACEHOLDER)
    } else {
        String::from(label)
    }
}
