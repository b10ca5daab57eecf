// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default tick label formatting.
//!
//! Tick generators thread a `(value, step)` pair to their formatter so sibling labels along one
//! axis use a consistent number of decimals: the step between majors implies how much precision
//! is meaningful.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Upper bound on decimals the default formatter will emit.
const MAX_DECIMALS: usize = 10;

/// Formats a tick value using the precision implied by the tick step.
///
/// A step of `10` yields integers, a step of `0.25` yields two decimals, and so on. A zero,
/// negative, or non-finite step (explicit tick values, degenerate domains) falls back to Rust's
/// shortest round-trip formatting.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return String::from("-");
    }
    // Avoid the "-0" artifact when a negative value rounds to zero.
    let value = if value == 0.0 { 0.0 } else { value };
    match step_decimals(step) {
        Some(decimals) => alloc::format!("{value:.decimals$}"),
        None => alloc::format!("{value}"),
    }
}

fn step_decimals(step: f64) -> Option<usize> {
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    // Smallest precision that represents the step itself: 0.5 → 1, 0.25 → 2, 10 → 0.
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < MAX_DECIMALS && (scaled - scaled.round()).abs() > 1.0e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    Some(decimals)
}
