// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis instance: scale + settings + layout state, driven in two passes.
//!
//! The host layout manager negotiates space with [`Axis::measure`] (possibly several times,
//! with different tentative rectangles), commits rectangles with [`Axis::arrange`], then asks
//! for drawable nodes with [`Axis::nodes`]. Both passes are idempotent for identical inputs:
//! generation and building are pure, and the only retained state is the committed rectangles
//! plus the label-mode hysteresis documented on [`LayoutState`].

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use gradus_text::TextMeasurer;

use crate::arc::build_arc_nodes;
use crate::build::{BuildArgs, build_nodes};
use crate::estimate::{EstimateArgs, calc_required_size, resolve_active_mode};
use crate::layout::{LayoutState, SizeRequest};
use crate::node::AxisNode;
use crate::scale::AxisScale;
use crate::settings::AxisSettings;
use crate::ticks::{Tick, TickGen, discrete_ticks};

/// One axis: a scale, its settings, and the layout state the passes share.
#[derive(Clone, Debug)]
pub struct Axis {
    scale: AxisScale,
    settings: AxisSettings,
    tick_gen: TickGen,
    state: LayoutState,
}

impl Axis {
    /// Creates an axis over `scale` with the given settings.
    pub fn new(scale: impl Into<AxisScale>, settings: AxisSettings) -> Self {
        let scale = scale.into();
        let state = LayoutState {
            is_discrete: scale.is_discrete(),
            is_horizontal: settings.align.is_horizontal(),
            ..LayoutState::default()
        };
        Self {
            scale,
            settings,
            tick_gen: TickGen::default(),
            state,
        }
    }

    /// Sets the continuous tick generation policy (ignored for discrete scales).
    pub fn with_tick_gen(mut self, tick_gen: TickGen) -> Self {
        self.tick_gen = tick_gen;
        self
    }

    /// Returns the axis scale.
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Returns the axis settings.
    pub fn settings(&self) -> &AxisSettings {
        &self.settings
    }

    /// Returns a mutable reference to the axis settings.
    pub fn settings_mut(&mut self) -> &mut AxisSettings {
        &mut self.settings
    }

    /// Returns the current layout state.
    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Generates the tick list this axis would lay out in `rect`.
    pub fn ticks(&self, rect: Rect) -> Vec<Tick> {
        match &self.scale {
            AxisScale::Continuous(s) => {
                let distance = if self.settings.align.is_horizontal() {
                    rect.width()
                } else {
                    rect.height()
                };
                self.tick_gen.generate(s, distance)
            }
            AxisScale::Discrete(b) => discrete_ticks(b),
        }
    }

    /// Size-request pass: how thick does this axis need to be, were it given `rect`?
    ///
    /// The host may probe repeatedly with different rectangles before committing; identical
    /// inputs yield identical answers.
    pub fn measure(&mut self, measurer: &dyn TextMeasurer, rect: Rect) -> SizeRequest {
        let settings = self.settings.resolved();
        self.state.is_horizontal = settings.align.is_horizontal();
        let ticks = self.ticks(rect);
        calc_required_size(EstimateArgs {
            settings: &settings,
            ticks: &ticks,
            rect,
            state: &mut self.state,
            measurer,
        })
    }

    /// Commits the rectangles the host assigned.
    ///
    /// `inner` is the axis's own rectangle; `outer` additionally includes any granted edge
    /// bleed and must contain `inner`.
    pub fn arrange(&mut self, inner: Rect, outer: Rect) {
        self.state.inner = inner;
        self.state.outer = outer;
    }

    /// Render pass: builds the final node list for the committed rectangles.
    ///
    /// The label orientation is re-decided against the final inner rectangle first (the room
    /// actually granted can differ from what was probed), then nodes are built and overlapping
    /// labels filtered. The returned nodes are not cached; callers hand them straight to the
    /// renderer.
    pub fn nodes(&mut self, measurer: &dyn TextMeasurer) -> Vec<AxisNode> {
        let settings = self.settings.resolved();
        self.state.is_horizontal = settings.align.is_horizontal();
        let ticks = self.ticks(self.state.inner);
        resolve_active_mode(&settings, &ticks, self.state.inner, &mut self.state, measurer);
        let args = BuildArgs {
            settings: &settings,
            ticks: &ticks,
            state: &self.state,
            measurer,
        };
        match settings.arc {
            Some(arc) => build_arc_nodes(&args, arc),
            None => build_nodes(&args),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use gradus_text::HeuristicTextMeasurer;

    use crate::node::{AxisNode, Collider};
    use crate::scale::{ScaleBand, ScaleLinear};
    use crate::settings::{AxisAlign, LabelMode};

    use super::*;

    fn bottom_axis() -> Axis {
        Axis::new(
            ScaleLinear::new((0.0, 10.0)),
            AxisSettings::continuous(AxisAlign::Bottom),
        )
    }

    #[test]
    fn measure_then_nodes_round_trip() {
        let measurer = HeuristicTextMeasurer;
        let mut axis = bottom_axis();
        let probe = Rect::new(0.0, 0.0, 200.0, 50.0);

        let request = axis.measure(&measurer, probe);
        assert!(request.size > 0.0);
        assert!(!request.is_too_large);

        let rect = Rect::new(0.0, 0.0, 200.0, request.size);
        axis.arrange(rect, rect);
        let nodes = axis.nodes(&measurer);

        let lines = nodes
            .iter()
            .filter(|n| matches!(n, AxisNode::Line(_)))
            .count();
        let ticks = nodes
            .iter()
            .filter(|n| matches!(n, AxisNode::Tick(_)))
            .count();
        let labels = nodes
            .iter()
            .filter(|n| matches!(n, AxisNode::Label(_)))
            .count();
        assert_eq!(lines, 1);
        assert_eq!(ticks, 3);
        assert_eq!(labels, 3);
    }

    #[test]
    fn repeated_passes_with_identical_inputs_are_identical() {
        let measurer = HeuristicTextMeasurer;
        let mut axis = bottom_axis();
        let probe = Rect::new(0.0, 0.0, 200.0, 50.0);

        let a = axis.measure(&measurer, probe);
        let b = axis.measure(&measurer, probe);
        assert_eq!(a, b);

        let rect = Rect::new(0.0, 0.0, 200.0, a.size);
        axis.arrange(rect, rect);
        let first = axis.nodes(&measurer);
        let second = axis.nodes(&measurer);
        assert_eq!(first, second);
    }

    #[test]
    fn discrete_axis_emits_one_label_per_band() {
        let measurer = HeuristicTextMeasurer;
        let mut axis = Axis::new(
            ScaleBand::new(["a", "b", "c"]),
            AxisSettings::discrete(AxisAlign::Bottom),
        );
        let rect = Rect::new(0.0, 0.0, 300.0, 30.0);
        axis.arrange(rect, rect);
        let nodes = axis.nodes(&measurer);

        let labels: Vec<&str> = nodes
            .iter()
            .filter_map(|n| match n {
                AxisNode::Label(l) => Some(l.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, alloc::vec!["a", "b", "c"]);
    }

    #[test]
    fn discrete_labels_carry_band_rect_colliders() {
        let measurer = HeuristicTextMeasurer;
        let mut axis = Axis::new(
            ScaleBand::new(["a", "b", "c"]),
            AxisSettings::discrete(AxisAlign::Bottom),
        );
        let rect = Rect::new(0.0, 0.0, 300.0, 30.0);
        axis.arrange(rect, rect);
        let nodes = axis.nodes(&measurer);

        for n in nodes {
            if let AxisNode::Label(l) = n {
                assert!(
                    matches!(l.collider, Some(Collider::Rect(_))),
                    "expected band rect collider, got {:?}",
                    l.collider
                );
            }
        }
    }

    #[test]
    fn render_pass_re_decides_orientation_for_the_final_rect() {
        let measurer = HeuristicTextMeasurer;
        let mut axis = Axis::new(
            ScaleBand::new(["January", "February", "March", "April"]),
            AxisSettings::discrete(AxisAlign::Bottom).with_label_mode(LabelMode::Auto),
        );

        // Probed wide: horizontal fits.
        let wide = Rect::new(0.0, 0.0, 800.0, 40.0);
        axis.measure(&measurer, wide);
        assert_eq!(axis.state().active_mode, crate::layout::ActiveMode::Horizontal);

        // Committed narrow: the render pass re-decides and tilts.
        let narrow = Rect::new(0.0, 0.0, 40.0, 40.0);
        axis.arrange(narrow, narrow);
        let nodes = axis.nodes(&measurer);
        assert_eq!(axis.state().active_mode, crate::layout::ActiveMode::Tilted);

        let tilted_labels = nodes
            .iter()
            .filter(|n| matches!(n, AxisNode::Label(l) if l.angle != 0.0))
            .count();
        assert!(tilted_labels > 0, "expected tilted labels, got {nodes:?}");
    }
}
