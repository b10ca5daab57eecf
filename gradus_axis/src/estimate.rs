// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label size estimation: the size-request half of the layout protocol.
//!
//! Before the host commits a rectangle, the axis must report how thick it needs to be. That
//! requires resolving the label mode first (auto-tilt), detecting hopeless fits (`is_too_large`),
//! accumulating the thickness of every shown sub-element, and — for tilted labels — computing
//! how far the outermost labels will reach past the axis rectangle.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use gradus_text::{TextMeasurer, TextStyle};

use crate::layout::{ActiveMode, EdgeBleed, LayoutState, SizeRequest};
use crate::settings::{AxisSettings, LabelMode};
use crate::ticks::Tick;

/// The glyph appended when a label is truncated; fit estimates must leave room for it.
const ELLIPSIS: &str = "…";

/// The worst-case probe glyph for single-character fit checks.
const PROBE_GLYPH: &str = "M";

/// Inputs to the size-request pass.
pub(crate) struct EstimateArgs<'a> {
    /// Resolved settings for this pass.
    pub(crate) settings: &'a AxisSettings,
    pub(crate) ticks: &'a [Tick],
    /// The tentative rectangle the host is probing with.
    pub(crate) rect: Rect,
    pub(crate) state: &'a mut LayoutState,
    pub(crate) measurer: &'a dyn TextMeasurer,
}

/// Resolves the label mode for this pass, applying the auto-tilt decision and hysteresis.
///
/// Only the discrete-horizontal branch of `Auto` recomputes; any other `Auto` case keeps the
/// previous pass's answer, so a committed mode doesn't oscillate while the host is still
/// probing sizes. Explicit modes always win.
pub(crate) fn resolve_active_mode(
    settings: &AxisSettings,
    ticks: &[Tick],
    rect: Rect,
    state: &mut LayoutState,
    measurer: &dyn TextMeasurer,
) -> ActiveMode {
    let decided = match settings.labels.mode {
        LabelMode::Horizontal => ActiveMode::Horizontal,
        LabelMode::Tilted => ActiveMode::Tilted,
        LabelMode::Layered => ActiveMode::Layered,
        LabelMode::Auto => {
            if state.is_discrete && state.is_horizontal && settings.labels.show {
                if should_tilt(settings, ticks, rect, measurer) {
                    ActiveMode::Tilted
                } else {
                    ActiveMode::Horizontal
                }
            } else {
                state.active_mode
            }
        }
    };
    state.active_mode = decided;
    decided
}

/// Computes the thickness the axis requires, plus edge bleed and the too-large signal.
pub(crate) fn calc_required_size(args: EstimateArgs<'_>) -> SizeRequest {
    let EstimateArgs {
        settings: s,
        ticks,
        rect,
        state,
        measurer,
    } = args;

    let horizontal = s.align.is_horizontal();
    let style = s.labels.text_style();
    let majors: Vec<&Tick> = ticks.iter().filter(|t| !t.is_minor).collect();

    let mode = resolve_active_mode(s, ticks, rect, state, measurer);
    let tilted = mode == ActiveMode::Tilted && horizontal;
    let layered = mode == ActiveMode::Layered && horizontal;

    let too_large = SizeRequest {
        size: rect.width().max(rect.height()),
        edge_bleed: EdgeBleed::default(),
        is_too_large: true,
    };

    if state.is_discrete && s.labels.show && !majors.is_empty() {
        if !tilted {
            let band_px = band_px(&majors, rect, horizontal);
            let fits = if horizontal {
                let probe = probe_label(&majors);
                measurer.measure(&probe, style.clone()).advance_width <= band_px
            } else {
                measurer
                    .measure(PROBE_GLYPH, style.clone())
                    .line_height()
                    <= band_px
            };
            if !fits {
                return too_large;
            }
        } else {
            // A 0° tilt is degenerate, and a tilt whose perpendicular step is smaller than one
            // line of text can never separate neighbors.
            let angle = s.labels.tilt_angle;
            let sin_a = angle.to_radians().sin().abs();
            let text_h = max_line_height(&majors, measurer, &style);
            if angle == 0.0 || text_h > sin_a * step_px(&majors, rect, horizontal) {
                return too_large;
            }
        }
    }

    let mut size = 0.0;
    if s.labels.show && !majors.is_empty() {
        let text_extent = if tilted {
            let theta = s.labels.tilt_angle.to_radians();
            let (sin_a, cos_a) = (theta.sin().abs(), theta.cos().abs());
            majors
                .iter()
                .map(|t| {
                    let m = measurer.measure(&t.label, style.clone());
                    let w = clamp_extent(m.advance_width, s);
                    w * sin_a + m.line_height() * cos_a
                })
                .fold(0.0_f64, f64::max)
        } else if horizontal {
            max_line_height(&majors, measurer, &style)
        } else {
            let w = majors
                .iter()
                .map(|t| measurer.measure(&t.label, style.clone()).advance_width)
                .fold(0.0_f64, f64::max);
            clamp_extent(w, s)
        };
        size += text_extent + s.labels.margin;
        if layered {
            size *= 2.0;
        }
    }

    let mut tick_block = 0.0_f64;
    if s.ticks.show {
        tick_block = s.ticks.margin + s.ticks.tick_size;
    }
    if s.minor_ticks.show {
        tick_block = tick_block.max(s.minor_ticks.margin + s.minor_ticks.tick_size);
    }
    size += tick_block;

    if s.line.show {
        size += 0.5 * s.line.stroke.stroke_width;
    }
    size += s.padding_start + s.padding_end;

    let edge_bleed = if tilted && s.labels.show && !majors.is_empty() {
        tilted_edge_bleed(s, &majors, rect, measurer, &style)
    } else {
        EdgeBleed::default()
    };

    SizeRequest {
        size,
        edge_bleed,
        is_too_large: false,
    }
}

/// Whether discrete horizontal labels need tilting: can each band fit at least one glyph plus
/// an ellipsis?
///
/// With an explicit glyph budget the check is a single worst-case measurement; otherwise every
/// label is measured, discounted by the configured fit factor to account for ellipsis
/// truncation of long labels.
fn should_tilt(
    settings: &AxisSettings,
    ticks: &[Tick],
    rect: Rect,
    measurer: &dyn TextMeasurer,
) -> bool {
    let majors: Vec<&Tick> = ticks.iter().filter(|t| !t.is_minor).collect();
    if majors.is_empty() {
        return false;
    }
    let style = settings.labels.text_style();
    let band_px = band_px(&majors, rect, true);
    let ellipsis_w = measurer.measure(ELLIPSIS, style.clone()).advance_width;
    let glyph_w = measurer.measure(PROBE_GLYPH, style.clone()).advance_width;
    let min_fit = glyph_w + ellipsis_w;

    if settings.labels.max_glyph_count.is_some() {
        return band_px < min_fit;
    }
    majors.iter().any(|t| {
        let w = measurer.measure(&t.label, style.clone()).advance_width
            * settings.labels.tilt_threshold;
        band_px < w.min(min_fit)
    })
}

fn tilted_edge_bleed(
    s: &AxisSettings,
    majors: &[&Tick],
    rect: Rect,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> EdgeBleed {
    let theta = s.labels.tilt_angle.to_radians();
    let (sin_a, cos_a) = (theta.sin().abs(), theta.cos().abs());
    let len = rect.width();

    let mut bleed = EdgeBleed::default();
    // Positive tilt leans labels toward the axis start, so the first label can reach past the
    // left edge; negative tilt mirrors to the right edge at the last label.
    if s.labels.tilt_angle >= 0.0 {
        let first = majors[0];
        let m = measurer.measure(&first.label, style.clone());
        let proj = clamp_extent(m.advance_width, s) * cos_a + m.line_height() * sin_a;
        let anchor = label_t(first, s) * len;
        bleed.left = (proj - anchor).max(0.0).min(s.labels.max_edge_bleed);
    } else {
        let last = majors[majors.len() - 1];
        let m = measurer.measure(&last.label, style.clone());
        let proj = clamp_extent(m.advance_width, s) * cos_a + m.line_height() * sin_a;
        let anchor = label_t(last, s) * len;
        bleed.right = (proj - (len - anchor)).max(0.0).min(s.labels.max_edge_bleed);
    }
    bleed
}

fn label_t(tick: &Tick, s: &AxisSettings) -> f64 {
    if tick.end > tick.start {
        tick.start + s.labels.align * (tick.end - tick.start)
    } else {
        tick.position
    }
}

/// Band extent per major tick, in pixels along the axis.
fn band_px(majors: &[&Tick], rect: Rect, horizontal: bool) -> f64 {
    let len = if horizontal {
        rect.width()
    } else {
        rect.height()
    };
    let bw = majors
        .iter()
        .map(|t| t.end - t.start)
        .fold(0.0_f64, f64::max);
    if bw > 0.0 {
        bw * len
    } else {
        step_px(majors, rect, horizontal)
    }
}

/// Distance between adjacent major tick positions, in pixels along the axis.
fn step_px(majors: &[&Tick], rect: Rect, horizontal: bool) -> f64 {
    let len = if horizontal {
        rect.width()
    } else {
        rect.height()
    };
    let step = majors
        .windows(2)
        .map(|w| (w[1].position - w[0].position).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step * len } else { len }
}

fn max_line_height(majors: &[&Tick], measurer: &dyn TextMeasurer, style: &TextStyle) -> f64 {
    majors
        .iter()
        .map(|t| measurer.measure(&t.label, style.clone()).line_height())
        .fold(0.0_f64, f64::max)
}

fn clamp_extent(w: f64, s: &AxisSettings) -> f64 {
    w.min(s.labels.max_length_px).max(s.labels.min_length_px)
}

fn probe_label(majors: &[&Tick]) -> String {
    let first = majors[0].label.chars().next().unwrap_or('-');
    let mut probe = String::new();
    probe.push(first);
    probe.push_str(ELLIPSIS);
    probe
}
