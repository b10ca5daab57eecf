// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridline generation.
//!
//! A resolved tick list can drive gridlines as well as axis marks: one line per tick, spanning
//! a companion plot rectangle, perpendicular to the axis the ticks came from. Coordinates are
//! in the plot rectangle's space (not axis-local), since grids belong to the plot.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use crate::node::{AxisNode, LineNode};
use crate::settings::{AxisAlign, StrokeStyle};
use crate::ticks::Tick;
use crate::z_order;

/// Gridline styling, split by tick kind.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke for lines at major ticks.
    pub major: StrokeStyle,
    /// Stroke for lines at minor ticks.
    pub minor: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            major: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
            minor: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(20.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Builds gridline nodes for `ticks` spanning `plot`.
///
/// `align` names the axis the ticks belong to: a horizontal axis yields vertical gridlines and
/// vice versa. Ticks outside the normalized `[0, 1]` range are skipped.
pub fn grid_nodes(ticks: &[Tick], align: AxisAlign, plot: Rect, style: &GridStyle) -> Vec<AxisNode> {
    let mut out = Vec::new();
    for tick in ticks {
        let t = tick.position;
        if !(-1.0e-9..=1.0 + 1.0e-9).contains(&t) {
            continue;
        }
        let stroke = if tick.is_minor {
            style.minor.clone()
        } else {
            style.major.clone()
        };
        let node = if align.is_horizontal() {
            let x = plot.x0 + t * plot.width();
            LineNode {
                x1: x,
                y1: plot.y0,
                x2: x,
                y2: plot.y1,
                stroke,
                z_index: z_order::GRID_LINES,
            }
        } else {
            let y = plot.y0 + t * plot.height();
            LineNode {
                x1: plot.x0,
                y1: y,
                x2: plot.x1,
                y2: y,
                stroke,
                z_index: z_order::GRID_LINES,
            }
        };
        out.push(AxisNode::Line(node));
    }
    out
}
