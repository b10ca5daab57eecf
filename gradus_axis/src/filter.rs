// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy overlap removal for built label nodes.
//!
//! A single forward sweep with a small lookahead window, not a globally optimal packing. The
//! tie-break is asymmetric on purpose: the last label is usually pinned to the axis end, so
//! when a collision involves it the *earlier* label is dropped instead. Downstream behavior
//! depends on this exact bias; don't "fix" it.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::Rect;

use gradus_text::TextMeasurer;

use crate::build::label_bounds;
use crate::node::{LabelNode, TickNode};

/// How many labels ahead of the current one are tested for collision.
pub const OVERLAP_LOOKAHEAD: usize = 5;

/// Bounding boxes are expanded by this much on every side before the intersection test.
pub const OVERLAP_EXPAND_PX: f64 = 1.0;

/// Removes colliding labels (and their paired tick marks) in place.
///
/// `ticks`, when given, is kept in lock-step: removing the label at an index removes the tick
/// at the same index. In tilted mode (`tilt_angle` set), collision is judged by the
/// perpendicular distance between anchor x-coordinates instead of by bounding boxes.
///
/// The sweep is idempotent: running it on its own output removes nothing further.
pub fn filter_overlapping_labels(
    labels: &mut Vec<LabelNode>,
    mut ticks: Option<&mut Vec<TickNode>>,
    measurer: &dyn TextMeasurer,
    tilt_angle: Option<f64>,
) {
    let mut i = 0;
    'scan: while i < labels.len() {
        for k in 1..=OVERLAP_LOOKAHEAD {
            let j = i + k;
            if j >= labels.len() {
                break;
            }
            if overlapping(&labels[i], &labels[j], measurer, tilt_angle) {
                // Protect the final, boundary-anchored label: when the collision involves it,
                // drop the earlier one instead.
                let remove = if j == labels.len() - 1 { i } else { j };
                labels.remove(remove);
                if let Some(t) = ticks.as_deref_mut()
                    && remove < t.len()
                {
                    t.remove(remove);
                }
                // Step back and re-test the new neighbor pair.
                continue 'scan;
            }
        }
        i += 1;
    }
}

fn overlapping(
    a: &LabelNode,
    b: &LabelNode,
    measurer: &dyn TextMeasurer,
    tilt_angle: Option<f64>,
) -> bool {
    if let Some(angle) = tilt_angle {
        let sin_a = angle.to_radians().sin().abs();
        let h = measurer
            .measure(&a.text, a.style.clone())
            .line_height()
            .max(measurer.measure(&b.text, b.style.clone()).line_height());
        return sin_a * (b.x - a.x).abs() < h;
    }
    let ra = label_bounds(a, measurer).inflate(OVERLAP_EXPAND_PX, OVERLAP_EXPAND_PX);
    let rb = label_bounds(b, measurer).inflate(OVERLAP_EXPAND_PX, OVERLAP_EXPAND_PX);
    intersects(ra, rb)
}

fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use gradus_text::{HeuristicTextMeasurer, TextAnchor, TextBaseline, TextStyle};
    use peniko::Brush;
    use peniko::color::palette::css;

    use crate::settings::StrokeStyle;
    use crate::z_order;

    use super::*;

    fn label_at(y: f64) -> LabelNode {
        LabelNode {
            x: 0.0,
            y,
            // Ten-pixel line height under the heuristic measurer.
            text: String::from("row"),
            style: TextStyle::new(10.0),
            fill: Brush::Solid(css::BLACK),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Hanging,
            angle: 0.0,
            max_width: 150.0,
            collider: None,
            z_index: z_order::AXIS_LABELS,
        }
    }

    fn tick_at(y: f64) -> TickNode {
        TickNode {
            x1: 0.0,
            y1: y,
            x2: 4.0,
            y2: y,
            stroke: StrokeStyle::default(),
            is_minor: false,
            z_index: z_order::AXIS_RULES,
        }
    }

    #[test]
    fn middle_of_three_crowded_labels_is_removed() {
        let measurer = HeuristicTextMeasurer;
        let mut labels = alloc::vec![label_at(0.0), label_at(8.0), label_at(20.0)];
        filter_overlapping_labels(&mut labels, None, &measurer, None);

        let ys: Vec<f64> = labels.iter().map(|l| l.y).collect();
        assert_eq!(ys, alloc::vec![0.0, 20.0]);
    }

    #[test]
    fn collision_with_the_last_label_drops_the_earlier_one() {
        let measurer = HeuristicTextMeasurer;
        let mut labels = alloc::vec![label_at(0.0), label_at(30.0), label_at(36.0)];
        filter_overlapping_labels(&mut labels, None, &measurer, None);

        let ys: Vec<f64> = labels.iter().map(|l| l.y).collect();
        assert_eq!(ys, alloc::vec![0.0, 36.0]);
    }

    #[test]
    fn paired_ticks_are_removed_in_lock_step() {
        let measurer = HeuristicTextMeasurer;
        let mut labels = alloc::vec![label_at(0.0), label_at(8.0), label_at(20.0)];
        let mut ticks = alloc::vec![tick_at(0.0), tick_at(8.0), tick_at(20.0)];
        filter_overlapping_labels(&mut labels, Some(&mut ticks), &measurer, None);

        assert_eq!(labels.len(), 2);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[1].y1, 20.0);
    }

    #[test]
    fn filtering_is_idempotent() {
        let measurer = HeuristicTextMeasurer;
        let mut labels = alloc::vec![
            label_at(0.0),
            label_at(4.0),
            label_at(8.0),
            label_at(12.0),
            label_at(40.0),
        ];
        filter_overlapping_labels(&mut labels, None, &measurer, None);
        let once = labels.clone();
        filter_overlapping_labels(&mut labels, None, &measurer, None);
        assert_eq!(labels, once);
    }

    #[test]
    fn non_overlapping_labels_are_untouched() {
        let measurer = HeuristicTextMeasurer;
        let mut labels = alloc::vec![label_at(0.0), label_at(15.0), label_at(30.0)];
        filter_overlapping_labels(&mut labels, None, &measurer, None);
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn tilted_mode_uses_perpendicular_anchor_distance() {
        let measurer = HeuristicTextMeasurer;
        let mut a = label_at(0.0);
        a.x = 0.0;
        let mut b = label_at(0.0);
        b.x = 8.0;
        let mut c = label_at(0.0);
        c.x = 60.0;
        let mut labels = alloc::vec![a, b, c];
        // sin(30°) · 8 = 4 < 10 → the pair collides; sin(30°) · 52 = 26 → the far one is safe.
        filter_overlapping_labels(&mut labels, None, &measurer, Some(30.0));
        let xs: Vec<f64> = labels.iter().map(|l| l.x).collect();
        assert_eq!(xs, alloc::vec![0.0, 60.0]);
    }
}
