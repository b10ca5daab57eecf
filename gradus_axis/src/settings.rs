// Copyright 2025 the Gradus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis configuration.
//!
//! Settings are plain data with builder-style setters. A pass never reads user settings
//! directly: [`AxisSettings::resolved`] produces the sanitized copy a layout pass works
//! against, coercing non-finite numbers to defaults and clamping the tilt angle. The resolved
//! copy is immutable for the duration of the pass.

extern crate alloc;

use peniko::Brush;
use peniko::color::palette::css;

use gradus_text::{FontFamily, TextStyle};

/// Size-reduction factor used when estimating whether a truncated label still fits its band.
///
/// A label that overflows its band renders with an ellipsis; measuring the full text therefore
/// overestimates the needed width. This factor discounts the measurement accordingly.
pub const GLYPH_FIT_FACTOR: f64 = 0.7;

/// Extra reach added to tilted label colliders along the text direction.
pub const TILT_COLLIDER_MARGIN: f64 = 10.0;

/// A paint + width pair for stroked segments (axis lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Which side of the plot the axis docks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisAlign {
    /// A horizontal axis above the plot area.
    Top,
    /// A horizontal axis below the plot area.
    Bottom,
    /// A vertical axis left of the plot area.
    Left,
    /// A vertical axis right of the plot area.
    Right,
}

impl AxisAlign {
    /// Returns `true` for top/bottom axes.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Label layout mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelMode {
    /// Decide per pass: discrete horizontal axes tilt when bands get too narrow.
    #[default]
    Auto,
    /// Labels along the axis, unrotated.
    Horizontal,
    /// Labels rotated by the configured tilt angle (horizontal axes only).
    Tilted,
    /// Labels alternate between two depths to halve their effective density.
    Layered,
}

/// Tick label settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSettings {
    /// Whether labels are rendered at all.
    pub show: bool,
    /// Layout mode; see [`LabelMode`].
    pub mode: LabelMode,
    /// Tilt angle in degrees, clamped to `[-90, 90]` at resolve time.
    pub tilt_angle: f64,
    /// Size-reduction factor for the auto-tilt fit estimate; defaults to
    /// [`GLYPH_FIT_FACTOR`].
    pub tilt_threshold: f64,
    /// Maximum pixels a tilted label may extend past the axis rectangle.
    pub max_edge_bleed: f64,
    /// Gap between the tick block and the label text.
    pub margin: f64,
    /// Upper clamp on label extent in pixels (width for vertical axes).
    pub max_length_px: f64,
    /// Lower clamp on label extent in pixels.
    pub min_length_px: f64,
    /// Optional glyph budget per label; when set, the auto-tilt estimate skips per-label
    /// measurement.
    pub max_glyph_count: Option<usize>,
    /// Placement across a band, `0.0` (start) to `1.0` (end).
    pub align: f64,
    /// Fixed offset along the axis in pixels.
    pub offset: f64,
    /// Whether colliding labels are removed after building.
    pub filter_overlapping: bool,
    /// Label font size in pixels.
    pub font_size: f64,
    /// Label font family.
    pub font_family: FontFamily,
    /// Label fill paint.
    pub fill: Brush,
}

impl LabelSettings {
    /// Returns the text style labels are measured and rendered with.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_family: self.font_family.clone(),
            ..TextStyle::new(self.font_size)
        }
    }
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            show: true,
            mode: LabelMode::Auto,
            tilt_angle: 40.0,
            tilt_threshold: GLYPH_FIT_FACTOR,
            max_edge_bleed: f64::INFINITY,
            margin: 4.0,
            max_length_px: 150.0,
            min_length_px: 0.0,
            max_glyph_count: None,
            align: 0.5,
            offset: 0.0,
            filter_overlapping: true,
            font_size: 10.0,
            font_family: FontFamily::SansSerif,
            fill: Brush::Solid(css::BLACK),
        }
    }
}

/// Tick mark settings (majors and minors share the shape).
#[derive(Clone, Debug, PartialEq)]
pub struct TickSettings {
    /// Whether these tick marks are rendered.
    pub show: bool,
    /// Gap between the axis line and the tick start.
    pub margin: f64,
    /// Tick length in pixels, perpendicular to the axis line.
    pub tick_size: f64,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
}

impl TickSettings {
    fn major() -> Self {
        Self {
            show: true,
            margin: 0.0,
            tick_size: 4.0,
            stroke: StrokeStyle::default(),
        }
    }

    fn minor() -> Self {
        Self {
            show: false,
            margin: 0.0,
            tick_size: 3.0,
            stroke: StrokeStyle::default(),
        }
    }
}

/// Axis line settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSettings {
    /// Whether the axis line is rendered.
    pub show: bool,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
}

/// Placement settings for the radial axis variant.
///
/// Angles are in radians; a tick at angle `θ` sits at `center + radius · (cos θ, sin θ)` in the
/// axis rectangle's y-down coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSettings {
    /// Angle of the first tick.
    pub start_angle: f64,
    /// Angle of the last tick.
    pub end_angle: f64,
    /// Arc radius in pixels; non-finite values fall back to `0.4 · min(width, height)` of the
    /// axis rectangle.
    pub radius: f64,
}

/// The full axis configuration tree.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSettings {
    /// Which side of the plot the axis docks to.
    pub align: AxisAlign,
    /// Tick label settings.
    pub labels: LabelSettings,
    /// Major tick mark settings.
    pub ticks: TickSettings,
    /// Minor tick mark settings.
    pub minor_ticks: TickSettings,
    /// Axis line settings.
    pub line: LineSettings,
    /// Padding before the axis line, on the plot-facing side.
    pub padding_start: f64,
    /// Padding after the label block, on the outer side.
    pub padding_end: f64,
    /// When set, the axis renders as a radial arc instead of a linear run.
    pub arc: Option<ArcSettings>,
}

impl AxisSettings {
    /// Default settings for a continuous axis: line, ticks, and labels shown.
    pub fn continuous(align: AxisAlign) -> Self {
        Self {
            align,
            labels: LabelSettings {
                mode: LabelMode::Horizontal,
                ..LabelSettings::default()
            },
            ticks: TickSettings::major(),
            minor_ticks: TickSettings::minor(),
            line: LineSettings {
                show: true,
                stroke: StrokeStyle::default(),
            },
            padding_start: 0.0,
            padding_end: 10.0,
            arc: None,
        }
    }

    /// Default settings for a discrete axis: labels only, mode `Auto`.
    pub fn discrete(align: AxisAlign) -> Self {
        Self {
            align,
            labels: LabelSettings::default(),
            ticks: TickSettings {
                show: false,
                ..TickSettings::major()
            },
            minor_ticks: TickSettings::minor(),
            line: LineSettings {
                show: false,
                stroke: StrokeStyle::default(),
            },
            padding_start: 0.0,
            padding_end: 10.0,
            arc: None,
        }
    }

    /// Sets the label mode.
    pub fn with_label_mode(mut self, mode: LabelMode) -> Self {
        self.labels.mode = mode;
        self
    }

    /// Sets the tilt angle in degrees.
    pub fn with_tilt_angle(mut self, tilt_angle: f64) -> Self {
        self.labels.tilt_angle = tilt_angle;
        self
    }

    /// Shows or hides tick labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.labels.show = show;
        self
    }

    /// Shows or hides major tick marks.
    pub fn with_ticks(mut self, show: bool) -> Self {
        self.ticks.show = show;
        self
    }

    /// Shows or hides minor tick marks.
    pub fn with_minor_ticks(mut self, show: bool) -> Self {
        self.minor_ticks.show = show;
        self
    }

    /// Shows or hides the axis line.
    pub fn with_line(mut self, show: bool) -> Self {
        self.line.show = show;
        self
    }

    /// Sets start/end padding.
    pub fn with_padding(mut self, start: f64, end: f64) -> Self {
        self.padding_start = start;
        self.padding_end = end;
        self
    }

    /// Renders the axis as a radial arc.
    pub fn with_arc(mut self, arc: ArcSettings) -> Self {
        self.arc = Some(arc);
        self
    }

    /// Returns the sanitized copy a layout pass works against.
    ///
    /// Non-finite numbers fall back to their defaults, margins and sizes are floored at zero,
    /// the band align slider is clamped to `[0, 1]`, and the tilt angle to `[-90, 90]`.
    pub fn resolved(&self) -> Self {
        let defaults = LabelSettings::default();
        let mut out = self.clone();

        let l = &mut out.labels;
        l.tilt_angle = coerce(l.tilt_angle, defaults.tilt_angle).clamp(-90.0, 90.0);
        l.tilt_threshold = coerce(l.tilt_threshold, defaults.tilt_threshold).max(0.0);
        l.max_edge_bleed = if l.max_edge_bleed.is_nan() {
            defaults.max_edge_bleed
        } else {
            l.max_edge_bleed.max(0.0)
        };
        l.margin = coerce(l.margin, defaults.margin).max(0.0);
        l.max_length_px = coerce(l.max_length_px, defaults.max_length_px).max(0.0);
        l.min_length_px = coerce(l.min_length_px, defaults.min_length_px).max(0.0);
        l.align = coerce(l.align, defaults.align).clamp(0.0, 1.0);
        l.offset = coerce(l.offset, defaults.offset);
        l.font_size = coerce(l.font_size, defaults.font_size).max(0.0);

        for t in [&mut out.ticks, &mut out.minor_ticks] {
            t.margin = coerce(t.margin, 0.0).max(0.0);
            t.tick_size = coerce(t.tick_size, 0.0).max(0.0);
            t.stroke.stroke_width = coerce(t.stroke.stroke_width, 1.0).max(0.0);
        }
        out.line.stroke.stroke_width = coerce(out.line.stroke.stroke_width, 1.0).max(0.0);

        out.padding_start = coerce(out.padding_start, 0.0).max(0.0);
        out.padding_end = coerce(out.padding_end, 0.0).max(0.0);

        if let Some(arc) = &mut out.arc {
            arc.start_angle = coerce(arc.start_angle, 0.0);
            arc.end_angle = coerce(arc.end_angle, core::f64::consts::TAU);
        }
        out
    }
}

fn coerce(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn tilt_angle_is_clamped_to_ninety_degrees() {
        let s = AxisSettings::discrete(AxisAlign::Bottom)
            .with_tilt_angle(400.0)
            .resolved();
        assert_eq!(s.labels.tilt_angle, 90.0);

        let s = AxisSettings::discrete(AxisAlign::Bottom)
            .with_tilt_angle(-123.0)
            .resolved();
        assert_eq!(s.labels.tilt_angle, -90.0);
    }

    #[test]
    fn nan_settings_fall_back_to_defaults() {
        let mut s = AxisSettings::continuous(AxisAlign::Left);
        s.labels.margin = f64::NAN;
        s.labels.tilt_angle = f64::NAN;
        s.padding_end = f64::NAN;
        let r = s.resolved();
        assert_eq!(r.labels.margin, 4.0);
        assert_eq!(r.labels.tilt_angle, 40.0);
        assert_eq!(r.padding_end, 0.0);
    }

    #[test]
    fn infinite_edge_bleed_survives_resolution() {
        let r = AxisSettings::discrete(AxisAlign::Bottom).resolved();
        assert_eq!(r.labels.max_edge_bleed, f64::INFINITY);
    }

    #[test]
    fn align_slider_is_clamped_to_unit_interval() {
        let mut s = AxisSettings::discrete(AxisAlign::Bottom);
        s.labels.align = 3.0;
        assert_eq!(s.resolved().labels.align, 1.0);
    }
}
