// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear node building.
//!
//! Turns resolved ticks plus committed rectangles into drawable nodes for the four linear
//! alignments. All coordinates are local to the axis's outer rectangle; the plot-facing edge
//! of the inner rectangle is the origin of the cross-axis "padding" distances accumulated
//! here (line, then tick block, then labels).
//!
//! The four-way alignment dispatch lives in the placement methods on [`AxisAlign`], selected
//! once per pass. Each label is built from its own [`LabelCtx`], constructed fresh per tick so
//! sibling builds cannot leak state into one another (layered-mode depths in particular).

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use gradus_text::{TextAnchor, TextBaseline, TextMeasurer, TextMetrics};

use crate::filter::filter_overlapping_labels;
use crate::layout::{ActiveMode, LayoutState};
use crate::node::{AxisNode, Collider, LabelNode, LineNode, TickNode, label_or_placeholder};
use crate::settings::{AxisAlign, AxisSettings, StrokeStyle, TILT_COLLIDER_MARGIN};
use crate::ticks::Tick;
use crate::z_order;

impl AxisAlign {
    /// Length of the axis run, in pixels.
    pub(crate) fn along_len(self, inner: Rect) -> f64 {
        if self.is_horizontal() {
            inner.width()
        } else {
            inner.height()
        }
    }

    fn along_offset(self, inner: Rect, outer: Rect) -> f64 {
        if self.is_horizontal() {
            inner.x0 - outer.x0
        } else {
            inner.y0 - outer.y0
        }
    }

    /// Maps a normalized position along the axis into outer-local pixels.
    pub(crate) fn place_along(self, t: f64, inner: Rect, outer: Rect) -> f64 {
        t * self.along_len(inner) + self.along_offset(inner, outer)
    }

    /// Maps a cross-axis distance (measured from the plot-facing edge, growing outward) into
    /// outer-local pixels.
    pub(crate) fn place_cross(self, d: f64, inner: Rect, outer: Rect) -> f64 {
        match self {
            Self::Bottom => d + (inner.y0 - outer.y0),
            Self::Top => inner.height() - d + (inner.y0 - outer.y0),
            Self::Left => inner.width() - d + (inner.x0 - outer.x0),
            Self::Right => d + (inner.x0 - outer.x0),
        }
    }

    /// Cross-axis extent of the outer rectangle.
    pub(crate) fn cross_len(self, outer: Rect) -> f64 {
        if self.is_horizontal() {
            outer.height()
        } else {
            outer.width()
        }
    }

    /// The default label anchor for this alignment.
    pub(crate) fn anchor(self) -> TextAnchor {
        match self {
            Self::Top | Self::Bottom => TextAnchor::Middle,
            Self::Left => TextAnchor::End,
            Self::Right => TextAnchor::Start,
        }
    }

    /// The default label baseline for this alignment.
    pub(crate) fn baseline(self) -> TextBaseline {
        match self {
            Self::Bottom => TextBaseline::Hanging,
            Self::Top => TextBaseline::Ideographic,
            Self::Left | Self::Right => TextBaseline::Middle,
        }
    }
}

/// Inputs shared by one node-building pass.
pub(crate) struct BuildArgs<'a> {
    pub(crate) settings: &'a AxisSettings,
    pub(crate) ticks: &'a [Tick],
    pub(crate) state: &'a LayoutState,
    pub(crate) measurer: &'a dyn TextMeasurer,
}

/// Builds the axis line.
pub(crate) fn build_line(
    align: AxisAlign,
    inner: Rect,
    outer: Rect,
    padding: f64,
    stroke: StrokeStyle,
) -> LineNode {
    let half = 0.5 * stroke.stroke_width;
    let cross = align
        .place_cross(padding + half, inner, outer)
        .clamp(0.0, align.cross_len(outer));
    let a0 = align.place_along(0.0, inner, outer);
    let a1 = align.place_along(1.0, inner, outer);
    if align.is_horizontal() {
        LineNode {
            x1: a0,
            y1: cross,
            x2: a1,
            y2: cross,
            stroke,
            z_index: z_order::AXIS_RULES,
        }
    } else {
        LineNode {
            x1: cross,
            y1: a0,
            x2: cross,
            y2: a1,
            stroke,
            z_index: z_order::AXIS_RULES,
        }
    }
}

/// Builds one tick mark.
///
/// End ticks (normalized position 0 or 1) are nudged inward by half their stroke width so they
/// don't bleed past the rectangle corner.
pub(crate) fn build_tick(
    tick: &Tick,
    align: AxisAlign,
    inner: Rect,
    outer: Rect,
    padding: f64,
    size: f64,
    stroke: StrokeStyle,
) -> TickNode {
    let half = 0.5 * stroke.stroke_width;
    let mut along = align.place_along(tick.position, inner, outer);
    if tick.position <= 0.0 {
        along += half;
    } else if tick.position >= 1.0 {
        along -= half;
    }
    let c1 = align.place_cross(padding, inner, outer);
    let c2 = align.place_cross(padding + size, inner, outer);
    let is_minor = tick.is_minor;
    if align.is_horizontal() {
        TickNode {
            x1: along,
            y1: c1,
            x2: along,
            y2: c2,
            stroke,
            is_minor,
            z_index: z_order::AXIS_RULES,
        }
    } else {
        TickNode {
            x1: c1,
            y1: along,
            x2: c2,
            y2: along,
            stroke,
            is_minor,
            z_index: z_order::AXIS_RULES,
        }
    }
}

/// Pass-wide label building inputs.
struct LabelPass {
    align: AxisAlign,
    inner: Rect,
    outer: Rect,
    mode: ActiveMode,
    /// Configured tilt angle in degrees (already clamped).
    tilt_angle: f64,
    slider: f64,
    offset: f64,
    min_len: f64,
    max_len: f64,
    step_px: f64,
}

/// Per-tick label inputs, constructed fresh for every node.
struct LabelCtx {
    /// Cross-axis depth of this label (layered mode alternates it).
    depth: f64,
    metrics: TextMetrics,
    text: alloc::string::String,
    /// Band bounds along the axis, in outer-local pixels.
    band: (f64, f64),
    /// Along-axis clip range for the rect collider (outer rect ∩ neighbors).
    clip: (f64, f64),
}

fn build_label(pass: &LabelPass, set: &AxisSettings, tick: &Tick, ctx: &LabelCtx) -> LabelNode {
    let banded = tick.end > tick.start;
    let t = if banded {
        tick.start + pass.slider * (tick.end - tick.start)
    } else {
        tick.position
    };
    let along = pass.align.place_along(t, pass.inner, pass.outer) + pass.offset;
    let cross = pass.align.place_cross(ctx.depth, pass.inner, pass.outer);

    let tilted = pass.mode == ActiveMode::Tilted && pass.align.is_horizontal()
        && pass.tilt_angle != 0.0;

    let mut node = LabelNode {
        x: 0.0,
        y: 0.0,
        text: ctx.text.clone(),
        style: set.labels.text_style(),
        fill: set.labels.fill.clone(),
        anchor: pass.align.anchor(),
        baseline: pass.align.baseline(),
        angle: 0.0,
        max_width: pass.max_len,
        collider: None,
        z_index: z_order::AXIS_LABELS,
    };

    if tilted {
        place_tilted(pass, along, cross, &mut node);
    } else if pass.align.is_horizontal() {
        place_horizontal(pass, ctx, along, cross, banded, &mut node);
    } else {
        place_vertical(pass, ctx, along, cross, &mut node);
    }

    node.collider = collider_for(pass, ctx, tilted, banded, &node);
    node
}

fn place_horizontal(
    pass: &LabelPass,
    ctx: &LabelCtx,
    along: f64,
    cross: f64,
    banded: bool,
    node: &mut LabelNode,
) {
    let budget = if banded {
        ctx.band.1 - ctx.band.0
    } else if pass.step_px > 0.0 {
        pass.step_px
    } else {
        pass.align.along_len(pass.inner)
    };
    node.max_width = clamp_extent(budget, pass.min_len, pass.max_len);
    node.x = along;
    node.y = cross;

    // Pin labels that would cross the outer rectangle to the boundary instead of centering.
    let half = 0.5 * ctx.metrics.advance_width.min(node.max_width);
    let width = pass.outer.width();
    if node.x - half < 0.0 {
        node.anchor = TextAnchor::Start;
        node.x = 0.0;
    } else if node.x + half > width {
        node.anchor = TextAnchor::End;
        node.x = width;
    }
}

fn place_vertical(
    pass: &LabelPass,
    ctx: &LabelCtx,
    along: f64,
    cross: f64,
    node: &mut LabelNode,
) {
    let room = match pass.align {
        AxisAlign::Left => cross,
        _ => pass.outer.width() - cross,
    };
    node.max_width = clamp_extent(room, pass.min_len, pass.max_len);
    node.x = cross;
    node.y = along;

    let half = 0.5 * ctx.metrics.line_height();
    let height = pass.outer.height();
    if node.y - half < 0.0 {
        node.baseline = TextBaseline::Hanging;
        node.y = 0.0;
    } else if node.y + half > height {
        node.baseline = TextBaseline::Ideographic;
        node.y = height;
    }
}

fn place_tilted(pass: &LabelPass, along: f64, cross: f64, node: &mut LabelNode) {
    // For a bottom axis a positive tilt renders as a negative rotation with an end anchor, so
    // the text leans down and toward the axis start; a top axis mirrors the rotation.
    let lean_start = pass.tilt_angle >= 0.0;
    node.angle = match pass.align {
        AxisAlign::Bottom => -pass.tilt_angle,
        _ => pass.tilt_angle,
    };
    node.anchor = if lean_start {
        TextAnchor::End
    } else {
        TextAnchor::Start
    };
    node.x = along;
    node.y = cross;

    // The text may run until it hits the nearer outer boundary, measured along its own
    // direction.
    let (bx, by) = body_direction(node.angle, node.anchor);
    let room_h = if bx < 0.0 {
        node.x
    } else {
        pass.outer.width() - node.x
    };
    let room_v = if by > 0.0 {
        pass.outer.height() - node.y
    } else {
        node.y
    };
    let diag_h = if bx.abs() > 1e-6 {
        room_h / bx.abs()
    } else {
        f64::INFINITY
    };
    let diag_v = if by.abs() > 1e-6 {
        room_v / by.abs()
    } else {
        f64::INFINITY
    };
    node.max_width = clamp_extent(diag_h.min(diag_v), pass.min_len, pass.max_len);
}

/// Unit vector from the anchor toward the text body, in outer-local coordinates.
fn body_direction(rendered_angle: f64, anchor: TextAnchor) -> (f64, f64) {
    let phi = rendered_angle.to_radians();
    let (dx, dy) = (phi.cos(), phi.sin());
    match anchor {
        TextAnchor::End => (-dx, -dy),
        _ => (dx, dy),
    }
}

fn collider_for(
    pass: &LabelPass,
    ctx: &LabelCtx,
    tilted: bool,
    banded: bool,
    node: &LabelNode,
) -> Option<Collider> {
    if tilted {
        return Some(tilted_collider(pass, ctx, node));
    }
    if pass.mode == ActiveMode::Layered || !banded {
        let b = bounds_of(node, &ctx.metrics);
        return Some(Collider::Polygon(alloc::vec![
            Point::new(b.x0, b.y0),
            Point::new(b.x1, b.y0),
            Point::new(b.x1, b.y1),
            Point::new(b.x0, b.y1),
        ]));
    }
    let (c0, c1) = ctx.clip;
    let (b0, b1) = (ctx.band.0.max(c0), ctx.band.1.min(c1));
    let rect = if pass.align.is_horizontal() {
        Rect::new(b0, 0.0, b1, pass.outer.height())
    } else {
        Rect::new(0.0, b0, pass.outer.width(), b1)
    };
    Some(Collider::Rect(rect))
}

/// A tilted label's collider: the band edges rotated around the anchor, extended along the
/// text direction far enough to cover the rendered text plus a fixed margin.
fn tilted_collider(pass: &LabelPass, ctx: &LabelCtx, node: &LabelNode) -> Collider {
    let origin = Point::new(node.x, node.y);
    let theta = node.angle.to_radians();
    let p1 = rotate_around(Point::new(ctx.band.0, node.y), origin, theta);
    let p2 = rotate_around(Point::new(ctx.band.1, node.y), origin, theta);
    let (bx, by) = body_direction(node.angle, node.anchor);
    let reach = node.max_width + TILT_COLLIDER_MARGIN;
    Collider::Polygon(alloc::vec![
        p1,
        p2,
        Point::new(p2.x + bx * reach, p2.y + by * reach),
        Point::new(p1.x + bx * reach, p1.y + by * reach),
    ])
}

fn rotate_around(p: Point, origin: Point, theta: f64) -> Point {
    let (s, c) = (theta.sin(), theta.cos());
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    Point::new(origin.x + dx * c - dy * s, origin.y + dx * s + dy * c)
}

fn clamp_extent(v: f64, min_len: f64, max_len: f64) -> f64 {
    v.min(max_len).max(min_len)
}

fn bounds_of(node: &LabelNode, metrics: &TextMetrics) -> Rect {
    let w = metrics.advance_width.min(node.max_width);
    let h = metrics.line_height();
    let x0 = match node.anchor {
        TextAnchor::Start => node.x,
        TextAnchor::Middle => node.x - 0.5 * w,
        TextAnchor::End => node.x - w,
    };
    let y0 = match node.baseline {
        TextBaseline::Hanging => node.y,
        TextBaseline::Middle => node.y - 0.5 * h,
        TextBaseline::Ideographic => node.y - h,
    };
    if node.angle == 0.0 {
        return Rect::new(x0, y0, x0 + w, y0 + h);
    }
    let origin = Point::new(node.x, node.y);
    let theta = node.angle.to_radians();
    let corners = [
        rotate_around(Point::new(x0, y0), origin, theta),
        rotate_around(Point::new(x0 + w, y0), origin, theta),
        rotate_around(Point::new(x0 + w, y0 + h), origin, theta),
        rotate_around(Point::new(x0, y0 + h), origin, theta),
    ];
    let mut r = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
    for p in &corners[1..] {
        r = Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y));
    }
    r
}

/// Measured bounding box of a label node, including anchoring and rotation.
///
/// This is the measurement hook the overlap filter and hit-testing lean on; hosts with real
/// renderer metrics can substitute their own bounds.
pub fn label_bounds(node: &LabelNode, measurer: &dyn TextMeasurer) -> Rect {
    let metrics = measurer.measure(&node.text, node.style.clone());
    bounds_of(node, &metrics)
}

/// Builds all nodes for a linear axis pass: line, tick marks, labels, with overlapping labels
/// (and their paired ticks) filtered out.
pub(crate) fn build_nodes(args: &BuildArgs<'_>) -> Vec<AxisNode> {
    let s = args.settings;
    let align = s.align;
    let inner = args.state.inner;
    let outer = args.state.outer;

    let mut nodes = Vec::new();
    let mut padding = s.padding_start;

    if s.line.show {
        nodes.push(AxisNode::Line(build_line(
            align,
            inner,
            outer,
            padding,
            s.line.stroke.clone(),
        )));
        padding += s.line.stroke.stroke_width;
    }

    let majors: Vec<&Tick> = args.ticks.iter().filter(|t| !t.is_minor).collect();

    let mut major_nodes: Vec<TickNode> = if s.ticks.show {
        let p = padding + s.ticks.margin;
        majors
            .iter()
            .map(|t| build_tick(t, align, inner, outer, p, s.ticks.tick_size, s.ticks.stroke.clone()))
            .collect()
    } else {
        Vec::new()
    };

    let minor_nodes: Vec<TickNode> = if s.minor_ticks.show {
        let p = padding + s.minor_ticks.margin;
        args.ticks
            .iter()
            .filter(|t| t.is_minor)
            .map(|t| {
                build_tick(
                    t,
                    align,
                    inner,
                    outer,
                    p,
                    s.minor_ticks.tick_size,
                    s.minor_ticks.stroke.clone(),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut labels: Vec<LabelNode> = Vec::new();
    if s.labels.show && !majors.is_empty() {
        let mode = if align.is_horizontal() {
            args.state.active_mode
        } else {
            ActiveMode::Horizontal
        };
        let label_padding = padding
            + if s.ticks.show {
                s.ticks.margin + s.ticks.tick_size
            } else {
                0.0
            }
            + s.labels.margin;

        let style = s.labels.text_style();
        let max_line_height = majors
            .iter()
            .map(|t| args.measurer.measure(&t.label, style.clone()).line_height())
            .fold(0.0_f64, f64::max);
        let layer_gap = max_line_height + s.labels.margin;

        let along_len = align.along_len(inner);
        let step_norm = majors
            .windows(2)
            .map(|w| (w[1].position - w[0].position).abs())
            .fold(f64::INFINITY, f64::min);
        let step_px = if step_norm.is_finite() {
            step_norm * along_len
        } else {
            0.0
        };

        let pass = LabelPass {
            align,
            inner,
            outer,
            mode,
            tilt_angle: s.labels.tilt_angle,
            slider: s.labels.align,
            offset: s.labels.offset,
            min_len: s.labels.min_length_px,
            max_len: s.labels.max_length_px,
            step_px,
        };

        let outer_along = if align.is_horizontal() {
            outer.width()
        } else {
            outer.height()
        };
        for (i, tick) in majors.iter().enumerate() {
            let text = label_or_placeholder(&tick.label);
            let metrics = args.measurer.measure(&text, style.clone());
            let depth = if mode == ActiveMode::Layered && i % 2 == 1 {
                label_padding + layer_gap
            } else {
                label_padding
            };
            let band = (
                align.place_along(tick.start, inner, outer),
                align.place_along(tick.end, inner, outer),
            );
            let clip = (
                if i == 0 {
                    0.0
                } else {
                    align.place_along(majors[i - 1].end, inner, outer)
                },
                if i + 1 == majors.len() {
                    outer_along
                } else {
                    align.place_along(majors[i + 1].start, inner, outer)
                },
            );
            let ctx = LabelCtx {
                depth,
                metrics,
                text,
                band,
                clip,
            };
            labels.push(build_label(&pass, s, tick, &ctx));
        }

        if s.labels.filter_overlapping {
            let tilt = (mode == ActiveMode::Tilted).then_some(s.labels.tilt_angle);
            let paired = s.ticks.show.then_some(&mut major_nodes);
            filter_overlapping_labels(&mut labels, paired, args.measurer, tilt);
        }
    }

    nodes.extend(major_nodes.into_iter().map(AxisNode::Tick));
    nodes.extend(minor_nodes.into_iter().map(AxisNode::Tick));
    nodes.extend(labels.into_iter().map(AxisNode::Label));
    nodes
}

#[cfg(test)]
mod tests {
    extern crate std;

    use gradus_text::HeuristicTextMeasurer;

    use crate::layout::ActiveMode;
    use crate::scale::{ScaleBand, ScaleLinear};
    use crate::settings::LabelMode;
    use crate::ticks::{TickGen, discrete_ticks};

    use super::*;

    fn tick_at(position: f64) -> Tick {
        Tick {
            value: position,
            label: alloc::string::String::from("x"),
            position,
            start: position,
            end: position,
            is_minor: false,
            data: None,
        }
    }

    #[test]
    fn left_tick_geometry_matches_padding_and_size() {
        let inner = Rect::new(0.0, 0.0, 50.0, 100.0);
        let node = build_tick(
            &tick_at(0.5),
            AxisAlign::Left,
            inner,
            inner,
            10.0,
            5.0,
            StrokeStyle::default(),
        );
        assert_eq!(node.x1, 40.0);
        assert_eq!(node.x2, 35.0);
        assert_eq!(node.y1, 50.0);
        assert_eq!(node.y2, 50.0);
    }

    #[test]
    fn tick_is_perpendicular_with_configured_length_for_every_alignment() {
        let inner = Rect::new(0.0, 0.0, 80.0, 60.0);
        for align in [
            AxisAlign::Top,
            AxisAlign::Bottom,
            AxisAlign::Left,
            AxisAlign::Right,
        ] {
            let node = build_tick(
                &tick_at(0.25),
                align,
                inner,
                inner,
                2.0,
                6.0,
                StrokeStyle::default(),
            );
            let dx = (node.x2 - node.x1).abs();
            let dy = (node.y2 - node.y1).abs();
            if align.is_horizontal() {
                assert_eq!(dx, 0.0, "{align:?}");
                assert_eq!(dy, 6.0, "{align:?}");
            } else {
                assert_eq!(dx, 6.0, "{align:?}");
                assert_eq!(dy, 0.0, "{align:?}");
            }
        }
    }

    #[test]
    fn end_ticks_are_nudged_inward_by_half_their_stroke() {
        let inner = Rect::new(0.0, 0.0, 100.0, 20.0);
        let stroke = StrokeStyle::solid(peniko::color::palette::css::BLACK, 2.0);
        let first = build_tick(
            &tick_at(0.0),
            AxisAlign::Bottom,
            inner,
            inner,
            0.0,
            4.0,
            stroke.clone(),
        );
        let last = build_tick(
            &tick_at(1.0),
            AxisAlign::Bottom,
            inner,
            inner,
            0.0,
            4.0,
            stroke,
        );
        assert_eq!(first.x1, 1.0);
        assert_eq!(last.x1, 99.0);
    }

    #[test]
    fn line_sits_at_padding_plus_half_stroke() {
        let inner = Rect::new(0.0, 0.0, 100.0, 20.0);
        let stroke = StrokeStyle::solid(peniko::color::palette::css::BLACK, 2.0);
        let bottom = build_line(AxisAlign::Bottom, inner, inner, 3.0, stroke.clone());
        assert_eq!(bottom.y1, 4.0);
        assert_eq!(bottom.x1, 0.0);
        assert_eq!(bottom.x2, 100.0);

        let top = build_line(AxisAlign::Top, inner, inner, 3.0, stroke);
        assert_eq!(top.y1, 16.0);
    }

    fn linear_args_nodes(align: AxisAlign, rect: Rect) -> Vec<AxisNode> {
        let settings = crate::settings::AxisSettings::continuous(align).resolved();
        let scale = ScaleLinear::new((0.0, 10.0));
        let distance = if align.is_horizontal() {
            rect.width()
        } else {
            rect.height()
        };
        let ticks = TickGen::by_distance().generate(&scale, distance);
        let state = LayoutState {
            inner: rect,
            outer: rect,
            is_discrete: false,
            is_horizontal: align.is_horizontal(),
            ..LayoutState::default()
        };
        let measurer = HeuristicTextMeasurer;
        build_nodes(&BuildArgs {
            settings: &settings,
            ticks: &ticks,
            state: &state,
            measurer: &measurer,
        })
    }

    fn label_nodes(nodes: &[AxisNode]) -> Vec<&LabelNode> {
        nodes
            .iter()
            .filter_map(|n| match n {
                AxisNode::Label(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn left_and_right_labels_mirror_each_other() {
        let rect = Rect::new(0.0, 0.0, 40.0, 100.0);
        let left = linear_args_nodes(AxisAlign::Left, rect);
        let right = linear_args_nodes(AxisAlign::Right, rect);

        let left_labels = label_nodes(&left);
        let right_labels = label_nodes(&right);
        assert_eq!(left_labels.len(), right_labels.len());
        for (l, r) in left_labels.iter().zip(&right_labels) {
            assert!((l.x - (rect.width() - r.x)).abs() < 1e-9, "{l:?} vs {r:?}");
            assert_eq!(l.y, r.y);
            assert_eq!(l.anchor, TextAnchor::End);
            assert_eq!(r.anchor, TextAnchor::Start);
        }
    }

    #[test]
    fn horizontal_boundary_labels_are_pinned_with_flipped_anchors() {
        let rect = Rect::new(0.0, 0.0, 200.0, 30.0);
        let nodes = linear_args_nodes(AxisAlign::Bottom, rect);
        let labels = label_nodes(&nodes);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].anchor, TextAnchor::Start);
        assert_eq!(labels[0].x, 0.0);
        assert_eq!(labels[1].anchor, TextAnchor::Middle);
        assert_eq!(labels[2].anchor, TextAnchor::End);
        assert_eq!(labels[2].x, 200.0);
    }

    #[test]
    fn vertical_boundary_labels_flip_baseline_instead() {
        let rect = Rect::new(0.0, 0.0, 40.0, 100.0);
        let nodes = linear_args_nodes(AxisAlign::Left, rect);
        let labels = label_nodes(&nodes);
        assert_eq!(labels.len(), 3);
        // Scale range is normalized top-down here, so the first tick is at y = 0.
        assert_eq!(labels[0].baseline, TextBaseline::Hanging);
        assert_eq!(labels[0].y, 0.0);
        assert_eq!(labels[1].baseline, TextBaseline::Middle);
        assert_eq!(labels[2].baseline, TextBaseline::Ideographic);
        assert_eq!(labels[2].y, 100.0);
    }

    #[test]
    fn layered_labels_alternate_between_two_depths() {
        let rect = Rect::new(0.0, 0.0, 400.0, 50.0);
        let settings = crate::settings::AxisSettings::continuous(AxisAlign::Bottom)
            .with_label_mode(LabelMode::Layered)
            .resolved();
        let ticks = TickGen::by_count(4).generate(&ScaleLinear::new((0.0, 9.0)), rect.width());
        let state = LayoutState {
            inner: rect,
            outer: rect,
            is_discrete: false,
            is_horizontal: true,
            active_mode: ActiveMode::Layered,
        };
        let measurer = HeuristicTextMeasurer;
        let nodes = build_nodes(&BuildArgs {
            settings: &settings,
            ticks: &ticks,
            state: &state,
            measurer: &measurer,
        });
        let labels = label_nodes(&nodes);
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0].y, labels[2].y);
        assert_eq!(labels[1].y, labels[3].y);
        assert!(labels[1].y > labels[0].y);
        // Layered labels collide via their measured bounds.
        for l in &labels {
            assert!(matches!(l.collider, Some(Collider::Polygon(_))), "{l:?}");
        }
    }

    #[test]
    fn tilted_discrete_labels_rotate_and_carry_polygon_colliders() {
        let rect = Rect::new(0.0, 0.0, 120.0, 40.0);
        let settings = crate::settings::AxisSettings::discrete(AxisAlign::Bottom)
            .with_label_mode(LabelMode::Tilted)
            .with_tilt_angle(40.0)
            .resolved();
        let scale = ScaleBand::new(["one", "two", "three"]);
        let ticks = discrete_ticks(&scale);
        let state = LayoutState {
            inner: rect,
            outer: rect,
            is_discrete: true,
            is_horizontal: true,
            active_mode: ActiveMode::Tilted,
        };
        let measurer = HeuristicTextMeasurer;
        let nodes = build_nodes(&BuildArgs {
            settings: &settings,
            ticks: &ticks,
            state: &state,
            measurer: &measurer,
        });
        let labels = label_nodes(&nodes);
        assert!(!labels.is_empty());
        for l in &labels {
            // Bottom axis, positive tilt: rendered rotation is negative, anchored at the end.
            assert_eq!(l.angle, -40.0);
            assert_eq!(l.anchor, TextAnchor::End);
            assert!(matches!(l.collider, Some(Collider::Polygon(_))));
        }
    }

    #[test]
    fn continuous_labels_use_measured_bounds_polygons() {
        let rect = Rect::new(0.0, 0.0, 200.0, 30.0);
        let nodes = linear_args_nodes(AxisAlign::Bottom, rect);
        for l in label_nodes(&nodes) {
            assert!(matches!(l.collider, Some(Collider::Polygon(_))), "{l:?}");
        }
    }

    #[test]
    fn label_bounds_respect_anchor_and_baseline() {
        let measurer = HeuristicTextMeasurer;
        let node = LabelNode {
            x: 50.0,
            y: 0.0,
            text: alloc::string::String::from("abc"),
            style: gradus_text::TextStyle::new(10.0),
            fill: peniko::Brush::Solid(peniko::color::palette::css::BLACK),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
            angle: 0.0,
            max_width: 150.0,
            collider: None,
            z_index: crate::z_order::AXIS_LABELS,
        };
        let b = label_bounds(&node, &measurer);
        assert_eq!(b.x0, 41.0);
        assert_eq!(b.x1, 59.0);
        assert_eq!(b.y0, 0.0);
        assert_eq!(b.y1, 10.0);
    }

    #[test]
    fn rotated_label_bounds_cover_the_rotated_box() {
        let measurer = HeuristicTextMeasurer;
        let node = LabelNode {
            x: 50.0,
            y: 0.0,
            text: alloc::string::String::from("abc"),
            style: gradus_text::TextStyle::new(10.0),
            fill: peniko::Brush::Solid(peniko::color::palette::css::BLACK),
            anchor: TextAnchor::End,
            baseline: TextBaseline::Hanging,
            angle: -90.0,
            max_width: 150.0,
            collider: None,
            z_index: crate::z_order::AXIS_LABELS,
        };
        let b = label_bounds(&node, &measurer);
        // An 18x10 box rotated a quarter turn is 10 wide and 18 tall.
        assert!((b.width() - 10.0).abs() < 1e-9, "{b:?}");
        assert!((b.height() - 18.0).abs() < 1e-9, "{b:?}");
    }

    #[test]
    fn missing_labels_render_as_the_placeholder() {
        let rect = Rect::new(0.0, 0.0, 300.0, 30.0);
        let settings = crate::settings::AxisSettings::discrete(AxisAlign::Bottom).resolved();
        let scale = ScaleBand::new(["a", "", "c"]);
        let ticks = discrete_ticks(&scale);
        let state = LayoutState {
            inner: rect,
            outer: rect,
            is_discrete: true,
            is_horizontal: true,
            ..LayoutState::default()
        };
        let measurer = HeuristicTextMeasurer;
        let nodes = build_nodes(&BuildArgs {
            settings: &settings,
            ticks: &ticks,
            state: &state,
            measurer: &measurer,
        });
        let labels = label_nodes(&nodes);
        assert_eq!(labels[1].text, "-");
    }
}
