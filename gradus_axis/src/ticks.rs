// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation.
//!
//! Continuous axes pick one of three strategies: explicit values, an exact count, or a count
//! derived from the available pixel distance (with a loose variant that keeps the scale's
//! native rounding and a tight variant that rounds the domain first so the outermost ticks land
//! on the domain edges). Discrete axes get one tick per band.
//!
//! Generation is pure: the same scale, policy, and distance always yield the same tick list.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::format_tick_with_step;
use crate::scale::{ScaleBand, ScaleLinear};

/// Pixel distance that buys one tick in the distance-based strategies.
pub const DEFAULT_UNIT_DIVIDER: f64 = 100.0;

/// Hard cap on the tick count the distance-based strategies will request.
pub const DISTANCE_TICK_CAP: usize = 1000;

/// A labelled position along an axis.
///
/// `position` is the placement point in normalized `[0, 1]` units; `start`/`end` bound the
/// occupied band (both equal to `position` for continuous scales). Ticks are never mutated
/// after generation; the overlap filter removes whole entries instead of editing them.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// The domain value (band index for discrete scales).
    pub value: f64,
    /// The formatted label text.
    pub label: String,
    /// Placement point in normalized range units.
    pub position: f64,
    /// Start of the occupied band.
    pub start: f64,
    /// End of the occupied band.
    pub end: f64,
    /// Minor ticks are drawn smaller and never labelled.
    pub is_minor: bool,
    /// Band index back-reference for discrete ticks, for hit-testing.
    pub data: Option<usize>,
}

/// A tick label formatter: `(value, step) -> label`.
///
/// The step between major ticks is passed so sibling labels can format with consistent
/// precision.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// An explicitly supplied tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplicitTick {
    /// The domain value.
    pub value: f64,
    /// Optional band start in domain units; defaults to `value`.
    pub start: Option<f64>,
    /// Optional band end in domain units; defaults to `value`.
    pub end: Option<f64>,
    /// Optional label override.
    pub label: Option<String>,
    /// Whether this entry is a minor tick.
    pub is_minor: bool,
}

impl ExplicitTick {
    /// Creates a major tick at `value` with a default-formatted label.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            start: None,
            end: None,
            label: None,
            is_minor: false,
        }
    }

    /// Sets the label override.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks this entry as a minor tick.
    pub fn minor(mut self) -> Self {
        self.is_minor = true;
        self
    }
}

impl From<f64> for ExplicitTick {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Strategy for generating continuous ticks.
#[derive(Clone, Debug)]
pub enum TickPolicy {
    /// Use the given values verbatim (filtered to the domain, de-duplicated, sorted).
    ByValues(Vec<ExplicitTick>),
    /// Request exactly `count` evenly spaced major ticks from the scale.
    ByCount(usize),
    /// Derive the count from the available pixel distance.
    ByDistance {
        /// Pixels per tick; non-finite or non-positive falls back to
        /// [`DEFAULT_UNIT_DIVIDER`].
        unit_divider: f64,
        /// Tight variants round the scale domain first so the outermost ticks land exactly on
        /// the (rounded) domain edges; loose variants keep the scale's native rounding.
        tight: bool,
    },
}

/// Continuous tick generation: a strategy plus minor-tick and bounds options.
#[derive(Clone)]
pub struct TickGen {
    /// The major tick strategy.
    pub policy: TickPolicy,
    /// Number of minor ticks interleaved between adjacent majors (and beyond the outermost
    /// majors, clipped to the domain).
    pub minor_count: usize,
    /// Insert (or promote a minor tick to) a major at each exact domain edge if absent.
    ///
    /// Only meaningful for the count/distance strategies; explicit values are used verbatim.
    pub force_bounds: bool,
    /// Optional label formatter; defaults to step-aware decimal formatting.
    pub formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for TickGen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickGen")
            .field("policy", &self.policy)
            .field("minor_count", &self.minor_count)
            .field("force_bounds", &self.force_bounds)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Default for TickGen {
    fn default() -> Self {
        Self::by_distance()
    }
}

impl TickGen {
    /// Creates a generator using the given strategy.
    pub fn new(policy: TickPolicy) -> Self {
        Self {
            policy,
            minor_count: 0,
            force_bounds: false,
            formatter: None,
        }
    }

    /// Convenience constructor for the loose distance-based strategy.
    pub fn by_distance() -> Self {
        Self::new(TickPolicy::ByDistance {
            unit_divider: DEFAULT_UNIT_DIVIDER,
            tight: false,
        })
    }

    /// Convenience constructor for the tight distance-based strategy.
    pub fn by_distance_tight() -> Self {
        Self::new(TickPolicy::ByDistance {
            unit_divider: DEFAULT_UNIT_DIVIDER,
            tight: true,
        })
    }

    /// Convenience constructor for the exact-count strategy.
    pub fn by_count(count: usize) -> Self {
        Self::new(TickPolicy::ByCount(count))
    }

    /// Convenience constructor for explicit values.
    pub fn by_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ExplicitTick>,
    {
        Self::new(TickPolicy::ByValues(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Sets the number of interleaved minor ticks.
    pub fn with_minor_count(mut self, minor_count: usize) -> Self {
        self.minor_count = minor_count;
        self
    }

    /// Enables or disables exact-bounds insertion.
    pub fn with_force_bounds(mut self, force_bounds: bool) -> Self {
        self.force_bounds = force_bounds;
        self
    }

    /// Sets a custom label formatter.
    pub fn with_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    /// Generates continuous ticks for `scale`, given the axis length in pixels.
    ///
    /// `distance` only matters for the distance-based strategies. The tight variant nices a
    /// private copy of the scale; tick positions are computed against that copy so the
    /// outermost ticks land on the rounded domain edges.
    pub fn generate(&self, scale: &ScaleLinear, distance: f64) -> Vec<Tick> {
        let mut scale = *scale;

        let majors = match &self.policy {
            TickPolicy::ByValues(values) => return self.explicit_ticks(&scale, values),
            TickPolicy::ByCount(count) => scale.evenly_spaced(*count),
            TickPolicy::ByDistance { unit_divider, tight } => {
                let count = distance_count(distance, *unit_divider);
                if *tight {
                    scale.nice(count);
                }
                scale.ticks(count)
            }
        };

        let step = tick_step(&majors);
        let mut entries: Vec<(f64, bool)> = majors.iter().map(|v| (*v, false)).collect();
        if self.minor_count > 0 {
            entries.extend(
                interleave_minors(&majors, self.minor_count, scale.domain())
                    .into_iter()
                    .map(|v| (v, true)),
            );
        }
        if self.force_bounds {
            force_bounds(&mut entries, scale.domain());
        }
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));

        entries
            .into_iter()
            .map(|(value, is_minor)| {
                let position = scale.map(value);
                Tick {
                    value,
                    label: self.format(value, step),
                    position,
                    start: position,
                    end: position,
                    is_minor,
                    data: None,
                }
            })
            .collect()
    }

    fn explicit_ticks(&self, scale: &ScaleLinear, values: &[ExplicitTick]) -> Vec<Tick> {
        let (d0, d1) = scale.domain();
        let (dmin, dmax) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };

        let mut list: Vec<&ExplicitTick> = values
            .iter()
            .filter(|t| t.value.is_finite() && t.value >= dmin && t.value <= dmax)
            .collect();
        list.sort_by(|a, b| a.value.total_cmp(&b.value));
        list.dedup_by(|a, b| a.value == b.value);

        let majors: Vec<f64> = list
            .iter()
            .filter(|t| !t.is_minor)
            .map(|t| t.value)
            .collect();
        let step = tick_step(&majors);

        list.into_iter()
            .map(|t| {
                let position = scale.map(t.value);
                let start = t.start.map_or(position, |s| scale.map(s));
                let end = t.end.map_or(position, |e| scale.map(e));
                Tick {
                    value: t.value,
                    label: t
                        .label
                        .clone()
                        .unwrap_or_else(|| self.format(t.value, step)),
                    position,
                    start,
                    end,
                    is_minor: t.is_minor,
                    data: None,
                }
            })
            .collect()
    }

    fn format(&self, value: f64, step: f64) -> String {
        match &self.formatter {
            Some(f) => (f)(value, step),
            None => format_tick_with_step(value, step),
        }
    }
}

/// One tick per band: `start`/`end` bound the band, `position` is its midpoint.
pub fn discrete_ticks(scale: &ScaleBand) -> Vec<Tick> {
    let bw = scale.band_width();
    (0..scale.count())
        .map(|i| {
            let start = scale.position(i);
            Tick {
                value: i as f64,
                label: scale.label(i).unwrap_or("").into(),
                position: start + 0.5 * bw,
                start,
                end: start + bw,
                is_minor: false,
                data: Some(i),
            }
        })
        .collect()
}

/// Returns the smallest gap between adjacent values, or `0.0` for fewer than two.
pub(crate) fn tick_step(values: &[f64]) -> f64 {
    let step = values
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn distance_count(distance: f64, unit_divider: f64) -> usize {
    let unit_divider = if unit_divider.is_finite() && unit_divider > 0.0 {
        unit_divider
    } else {
        DEFAULT_UNIT_DIVIDER
    };
    if !distance.is_finite() || distance <= 0.0 {
        return 2;
    }
    let count = (distance / unit_divider).round().max(2.0);
    let cap = DISTANCE_TICK_CAP as f64;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to [2, DISTANCE_TICK_CAP]"
    )]
    {
        count.min(cap) as usize
    }
}

fn interleave_minors(majors: &[f64], minor_count: usize, domain: (f64, f64)) -> Vec<f64> {
    if majors.len() < 2 {
        return Vec::new();
    }
    let (d0, d1) = domain;
    let (dmin, dmax) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };

    let mut out = Vec::new();
    let per = (minor_count + 1) as f64;

    // Below the first major, clipped to the domain.
    let first_gap = (majors[1] - majors[0]) / per;
    let eps = first_gap * 1e-6;
    for k in 1..=minor_count {
        let v = majors[0] - first_gap * k as f64;
        if v >= dmin - eps {
            out.push(v);
        }
    }
    // Between each adjacent pair.
    for w in majors.windows(2) {
        let gap = (w[1] - w[0]) / per;
        for k in 1..=minor_count {
            out.push(w[0] + gap * k as f64);
        }
    }
    // Beyond the last major, clipped to the domain.
    let last = majors[majors.len() - 1];
    let last_gap = (last - majors[majors.len() - 2]) / per;
    for k in 1..=minor_count {
        let v = last + last_gap * k as f64;
        if v <= dmax + eps {
            out.push(v);
        }
    }
    out
}

fn force_bounds(entries: &mut Vec<(f64, bool)>, domain: (f64, f64)) {
    let (d0, d1) = domain;
    for edge in [d0, d1] {
        if !edge.is_finite() {
            continue;
        }
        let eps = (d1 - d0).abs() * 1e-9;
        match entries.iter_mut().find(|(v, _)| (*v - edge).abs() <= eps) {
            Some(entry) => entry.1 = false,
            None => entries.push((edge, false)),
        }
    }
}
