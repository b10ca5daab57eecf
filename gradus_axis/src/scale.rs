// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The narrow scale boundary the axis engine consumes.
//!
//! The engine never owns data or inference; it only needs a mapping from domain values into
//! normalized `[0, 1]` positions, plus tick candidates. Two shapes cover every axis here:
//! a continuous linear mapping and a discrete band mapping. Scale instances are immutable for
//! the duration of a layout pass.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// The scale an axis is laid out against.
#[derive(Clone, Debug)]
pub enum AxisScale {
    /// A continuous linear scale.
    Continuous(ScaleLinear),
    /// A discrete band scale.
    Discrete(ScaleBand),
}

impl AxisScale {
    /// Returns `true` for band scales.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete(_))
    }
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Continuous(value)
    }
}

impl From<ScaleBand> for AxisScale {
    fn from(value: ScaleBand) -> Self {
        Self::Discrete(value)
    }
}

/// A linear mapping from a continuous domain to a normalized range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values onto `[0, 1]`.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: (0.0, 1.0),
        }
    }

    /// Overrides the output range.
    ///
    /// The axis engine itself always works against the normalized default.
    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns “nice” tick values covering the domain.
    ///
    /// `count` is a density hint; the generated step snaps to 1/2/5 decades, so the result may
    /// hold a few more or fewer entries than requested.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns exactly `count` evenly spaced values across the domain.
    ///
    /// Unlike [`ScaleLinear::ticks`] the values are not rounded to nice steps; the first and
    /// last always land on the domain bounds. `count < 2` yields the two bounds.
    pub fn evenly_spaced(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let count = count.max(2);
        let step = (d1 - d0) / (count - 1) as f64;
        (0..count).map(|i| d0 + step * i as f64).collect()
    }

    /// Rounds the domain outward so its bounds land on nice tick steps.
    ///
    /// After nicing, the first and last of `ticks(count)` coincide with the domain bounds, which
    /// is what the tight distance-based tick strategy relies on.
    pub fn nice(&mut self, count: usize) {
        let (mut min, mut max) = self.domain;
        if count == 0 || !min.is_finite() || !max.is_finite() || min == max {
            return;
        }
        let reversed = min > max;
        if reversed {
            core::mem::swap(&mut min, &mut max);
        }
        let step = nice_step((max - min) / count.max(1) as f64);
        if step == 0.0 {
            return;
        }
        let start = (min / step).floor() * step;
        let stop = (max / step).ceil() * step;
        self.domain = if reversed { (stop, start) } else { (start, stop) };
    }
}

/// Generates ticks inside `[min, max]` on 1/2/5-decade steps.
///
/// Unlike [`ScaleLinear::nice`], the bounds round inward: a tick is only emitted where the
/// domain actually covers it.
fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).ceil() * step;
    let stop = (max / step).floor() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powi({
        let p = power.clamp(-300.0, 300.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped well inside the i32 range"
        )]
        {
            p as i32
        }
    });
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale: labelled entries mapped onto contiguous `[0, 1]` intervals.
#[derive(Clone, Debug)]
pub struct ScaleBand {
    entries: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale over the given labelled entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the label for the band at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the width of one band in range units.
    pub fn band_width(&self) -> f64 {
        let n = self.entries.len() as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the start position of the band at `index`, in range units.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }
}
