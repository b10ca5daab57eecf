// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive axis layout and label placement.
//!
//! This crate turns a scale (a continuous or discrete value-to-position mapping) and a budget
//! of pixels into a concrete, non-overlapping, orientation-aware set of drawable primitives —
//! line, ticks, labels — for the four cardinal alignments plus a radial arc variant.
//!
//! The pieces, leaves first:
//! - **Tick generation** ([`TickGen`], [`discrete_ticks`]): scale + policy → ordered
//!   [`Tick`] list.
//! - **Size estimation** (driven through [`Axis::measure`]): candidate ticks + text metrics →
//!   required thickness, label orientation, and edge bleed.
//! - **Node building** (driven through [`Axis::nodes`]): resolved ticks + committed
//!   rectangles → [`AxisNode`] descriptors with colliders.
//! - **Overlap filtering** ([`filter_overlapping_labels`]): a windowed greedy scan that drops
//!   colliding labels and their paired ticks.
//!
//! Text measurement stays behind the [`gradus_text::TextMeasurer`] boundary; rendering,
//! container layout, and pixel snapping belong to the host.

#![no_std]

extern crate alloc;

mod arc;
mod axis;
mod build;
mod estimate;
mod filter;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod grid;
mod layout;
mod node;
mod scale;
mod settings;
mod ticks;
mod z_order;

pub use axis::Axis;
pub use build::label_bounds;
pub use filter::{OVERLAP_EXPAND_PX, OVERLAP_LOOKAHEAD, filter_overlapping_labels};
pub use format::format_tick_with_step;
pub use grid::{GridStyle, grid_nodes};
pub use layout::{ActiveMode, EdgeBleed, LayoutState, SizeRequest};
pub use node::{
    AxisNode, Collider, LABEL_PLACEHOLDER, LabelNode, LineNode, PathNode, TickNode,
};
pub use scale::{AxisScale, ScaleBand, ScaleLinear};
pub use settings::{
    ArcSettings, AxisAlign, AxisSettings, GLYPH_FIT_FACTOR, LabelMode, LabelSettings,
    LineSettings, StrokeStyle, TILT_COLLIDER_MARGIN, TickSettings,
};
pub use ticks::{
    DEFAULT_UNIT_DIVIDER, DISTANCE_TICK_CAP, ExplicitTick, Tick, TickFormatter, TickGen,
    TickPolicy, discrete_ticks,
};
pub use z_order::*;
