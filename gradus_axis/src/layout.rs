// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis layout state and the size-negotiation records.
//!
//! An axis is laid out in two passes: a size-request pass reports how thick the axis needs to
//! be (and how far labels may bleed sideways), then — once the host has committed rectangles —
//! a render pass produces nodes. [`LayoutState`] is the only state that survives between
//! passes; each axis instance owns its state exclusively.

use kurbo::Rect;

/// The label mode a pass actually laid out with (the resolution of `LabelMode::Auto`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActiveMode {
    /// Unrotated labels.
    #[default]
    Horizontal,
    /// Labels rotated by the tilt angle.
    Tilted,
    /// Labels alternating between two depths.
    Layered,
}

/// Mutable layout state owned by one axis across its lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutState {
    /// The axis's own rectangle, as committed by the host.
    pub inner: Rect,
    /// The rectangle labels may occupy, including any granted edge bleed. Contains `inner`.
    pub outer: Rect,
    /// Whether the axis lays out against a band scale.
    pub is_discrete: bool,
    /// Whether the axis runs along x (top/bottom alignment).
    pub is_horizontal: bool,
    /// The mode the previous pass resolved to.
    ///
    /// When the configured mode is `Auto`, this persists across passes and is only recomputed
    /// by the discrete-horizontal tilt decision; keeping the previous answer otherwise stops
    /// the axis from oscillating between modes while the host is still negotiating sizes.
    pub active_mode: ActiveMode,
}

/// Pixel amounts by which tilted labels may extend outside the axis's own rectangle into
/// neighboring space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeBleed {
    /// Bleed past the left edge.
    pub left: f64,
    /// Bleed past the top edge.
    pub top: f64,
    /// Bleed past the right edge.
    pub right: f64,
    /// Bleed past the bottom edge.
    pub bottom: f64,
}

impl EdgeBleed {
    /// Returns `true` when no edge requests any bleed.
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

/// What the size-request pass reports back to the host layout manager.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeRequest {
    /// Required thickness along the axis normal, in pixels.
    pub size: f64,
    /// Requested label bleed past the axis rectangle.
    pub edge_bleed: EdgeBleed,
    /// The axis cannot render legibly in the probed rectangle; the host should hide it rather
    /// than let it overflow. `size` is then the larger rectangle dimension.
    pub is_too_large: bool,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn default_state_is_horizontal_mode() {
        let state = LayoutState::default();
        assert_eq!(state.active_mode, ActiveMode::Horizontal);
        assert!(!state.is_discrete);
    }

    #[test]
    fn edge_bleed_zero_check() {
        assert!(EdgeBleed::default().is_zero());
        let bled = EdgeBleed {
            left: 3.0,
            ..EdgeBleed::default()
        };
        assert!(!bled.is_zero());
    }
}
