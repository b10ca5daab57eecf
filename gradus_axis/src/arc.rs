// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial node building.
//!
//! The arc variant places ticks and labels by interpolating an angle between the configured
//! start and end angles over `index / (count - 1)` and converting to Cartesian coordinates via
//! `center + radius · (cos θ, sin θ)`, in the outer rectangle's y-down local space. The axis
//! line becomes a flattened arc path.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Arc, BezPath, Point, Shape, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use gradus_text::{TextAnchor, TextBaseline};

use crate::build::{BuildArgs, label_bounds};
use crate::filter::filter_overlapping_labels;
use crate::node::{AxisNode, Collider, LabelNode, PathNode, TickNode, label_or_placeholder};
use crate::settings::ArcSettings;
use crate::z_order;

/// Curve flattening tolerance when converting the arc line to a `BezPath`.
const ARC_TOLERANCE: f64 = 0.1;

/// Angles closer than this to the vertical axis through the center count as "centered" when
/// deriving the label side.
const SIDE_EPSILON: f64 = 1e-6;

/// Builds all nodes for a radial axis pass.
pub(crate) fn build_arc_nodes(args: &BuildArgs<'_>, arc: ArcSettings) -> Vec<AxisNode> {
    let s = args.settings;
    let outer = args.state.outer;
    let center = Point::new(0.5 * outer.width(), 0.5 * outer.height());
    let radius = if arc.radius.is_finite() && arc.radius > 0.0 {
        arc.radius
    } else {
        0.4 * outer.width().min(outer.height())
    };

    let mut nodes = Vec::new();
    let mut padding = s.padding_start;

    if s.line.show {
        let r = radius + padding + 0.5 * s.line.stroke.stroke_width;
        let shape = Arc::new(
            center,
            Vec2::new(r, r),
            arc.start_angle,
            arc.end_angle - arc.start_angle,
            0.0,
        );
        let path: BezPath = shape.path_elements(ARC_TOLERANCE).collect();
        nodes.push(AxisNode::Path(PathNode {
            path,
            stroke: s.line.stroke.clone(),
            z_index: z_order::AXIS_RULES,
        }));
        padding += s.line.stroke.stroke_width;
    }

    let majors: Vec<&crate::ticks::Tick> = args.ticks.iter().filter(|t| !t.is_minor).collect();
    let n = majors.len();
    let angle_at = |i: usize| {
        if n > 1 {
            arc.start_angle + (arc.end_angle - arc.start_angle) * i as f64 / (n - 1) as f64
        } else {
            arc.start_angle
        }
    };

    let mut tick_nodes: Vec<TickNode> = Vec::new();
    if s.ticks.show {
        let r0 = radius + padding + s.ticks.margin;
        let r1 = r0 + s.ticks.tick_size;
        for i in 0..n {
            let theta = angle_at(i);
            let (dx, dy) = (theta.cos(), theta.sin());
            tick_nodes.push(TickNode {
                x1: center.x + r0 * dx,
                y1: center.y + r0 * dy,
                x2: center.x + r1 * dx,
                y2: center.y + r1 * dy,
                stroke: s.ticks.stroke.clone(),
                is_minor: false,
                z_index: z_order::AXIS_RULES,
            });
        }
    }

    let mut labels: Vec<LabelNode> = Vec::new();
    if s.labels.show {
        let r_label = radius
            + padding
            + if s.ticks.show {
                s.ticks.margin + s.ticks.tick_size
            } else {
                0.0
            }
            + s.labels.margin;
        for (i, tick) in majors.iter().enumerate() {
            let theta = angle_at(i);
            let (dx, dy) = (theta.cos(), theta.sin());
            let x = center.x + r_label * dx;
            let y = center.y + r_label * dy;

            // The label side follows which half of the circle the angle falls into, relative
            // to the vertical axis through the center.
            let anchor = if dx > SIDE_EPSILON {
                TextAnchor::Start
            } else if dx < -SIDE_EPSILON {
                TextAnchor::End
            } else {
                TextAnchor::Middle
            };
            let baseline = if dy > SIDE_EPSILON {
                TextBaseline::Hanging
            } else if dy < -SIDE_EPSILON {
                TextBaseline::Ideographic
            } else {
                TextBaseline::Middle
            };

            let room = match anchor {
                TextAnchor::Start => outer.width() - x,
                TextAnchor::End => x,
                TextAnchor::Middle => 2.0 * x.min(outer.width() - x),
            };
            let max_width = room
                .min(s.labels.max_length_px)
                .max(s.labels.min_length_px);

            let mut node = LabelNode {
                x,
                y,
                text: label_or_placeholder(&tick.label),
                style: s.labels.text_style(),
                fill: s.labels.fill.clone(),
                anchor,
                baseline,
                angle: 0.0,
                max_width,
                collider: None,
                z_index: z_order::AXIS_LABELS,
            };
            let b = label_bounds(&node, args.measurer);
            node.collider = Some(Collider::Polygon(alloc::vec![
                Point::new(b.x0, b.y0),
                Point::new(b.x1, b.y0),
                Point::new(b.x1, b.y1),
                Point::new(b.x0, b.y1),
            ]));
            labels.push(node);
        }

        if s.labels.filter_overlapping {
            let paired = s.ticks.show.then_some(&mut tick_nodes);
            filter_overlapping_labels(&mut labels, paired, args.measurer, None);
        }
    }

    nodes.extend(tick_nodes.into_iter().map(AxisNode::Tick));
    nodes.extend(labels.into_iter().map(AxisNode::Label));
    nodes
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;

    use gradus_text::HeuristicTextMeasurer;

    use crate::layout::LayoutState;
    use crate::scale::ScaleBand;
    use crate::settings::{AxisAlign, AxisSettings};
    use crate::ticks::discrete_ticks;

    use super::*;

    fn arc_state(rect: Rect) -> LayoutState {
        LayoutState {
            inner: rect,
            outer: rect,
            is_discrete: true,
            is_horizontal: true,
            ..LayoutState::default()
        }
    }

    fn arc_settings() -> AxisSettings {
        AxisSettings::discrete(AxisAlign::Bottom)
            .with_ticks(true)
            .with_line(true)
            .with_arc(ArcSettings {
                start_angle: 0.0,
                end_angle: core::f64::consts::PI,
                radius: 50.0,
            })
            .resolved()
    }

    #[test]
    fn ticks_sit_on_the_circle_at_interpolated_angles() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let scale = ScaleBand::new(["a", "b", "c"]);
        let ticks = discrete_ticks(&scale);
        let settings = arc_settings();
        let state = arc_state(rect);
        let measurer = HeuristicTextMeasurer;

        let arc = settings.arc.expect("arc settings");
        let nodes = build_arc_nodes(
            &BuildArgs {
                settings: &settings,
                ticks: &ticks,
                state: &state,
                measurer: &measurer,
            },
            arc,
        );

        let tick_nodes: Vec<&TickNode> = nodes
            .iter()
            .filter_map(|n| match n {
                AxisNode::Tick(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(tick_nodes.len(), 3);

        // Line stroke width 1 accumulates before the tick radius: r0 = 50 + 1.
        // First tick at angle 0: straight right of center (100, 100).
        let first = tick_nodes[0];
        assert!((first.x1 - 151.0).abs() < 1e-9, "got {first:?}");
        assert!((first.y1 - 100.0).abs() < 1e-9);
        // Middle tick at angle π/2: straight below center in y-down space.
        let mid = tick_nodes[1];
        assert!((mid.x1 - 100.0).abs() < 1e-6);
        assert!((mid.y1 - 151.0).abs() < 1e-9);
        // Tick length matches the configured size.
        let len = ((first.x2 - first.x1).powi(2) + (first.y2 - first.y1).powi(2)).sqrt();
        assert!((len - 4.0).abs() < 1e-9);
    }

    #[test]
    fn label_anchors_follow_the_circle_side() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let scale = ScaleBand::new(["right", "bottom", "left"]);
        let ticks = discrete_ticks(&scale);
        let settings = arc_settings();
        let state = arc_state(rect);
        let measurer = HeuristicTextMeasurer;

        let arc = settings.arc.expect("arc settings");
        let nodes = build_arc_nodes(
            &BuildArgs {
                settings: &settings,
                ticks: &ticks,
                state: &state,
                measurer: &measurer,
            },
            arc,
        );

        let labels: Vec<&LabelNode> = nodes
            .iter()
            .filter_map(|n| match n {
                AxisNode::Label(l) => Some(l),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].anchor, TextAnchor::Start);
        assert_eq!(labels[1].anchor, TextAnchor::Middle);
        assert_eq!(labels[1].baseline, TextBaseline::Hanging);
        assert_eq!(labels[2].anchor, TextAnchor::End);
        for l in labels {
            assert!(matches!(l.collider, Some(Collider::Polygon(_))));
        }
    }

    #[test]
    fn line_node_is_an_arc_path() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let scale = ScaleBand::new(["a", "b"]);
        let ticks = discrete_ticks(&scale);
        let settings = arc_settings();
        let state = arc_state(rect);
        let measurer = HeuristicTextMeasurer;

        let arc = settings.arc.expect("arc settings");
        let nodes = build_arc_nodes(
            &BuildArgs {
                settings: &settings,
                ticks: &ticks,
                state: &state,
                measurer: &measurer,
            },
            arc,
        );

        let path = nodes.iter().find_map(|n| match n {
            AxisNode::Path(p) => Some(p),
            _ => None,
        });
        let path = path.expect("missing arc line node");
        let bbox = path.path.bounding_box();
        assert!(bbox.width() > 0.0, "arc path should have extent: {bbox:?}");
    }
}
