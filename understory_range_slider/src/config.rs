// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration and its normalization.
//!
//! Every option has a default, and malformed values fall back to defaults
//! instead of failing. With the `serde` feature the configuration
//! deserializes from camelCase option objects such as
//! `{"startAt": [20, 60], "snap": {"points": 5, "type": "hard"}}`.

use tracing::warn;

use crate::geometry::Orientation;
use crate::grid::SnapGrid;
use crate::snap::{DEFAULT_SENSITIVITY, SnapKind, SnapMode};
use crate::value::{CustomDomain, normalize_percent_pair};

/// How [`RangeSliderConfig::width`] is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Absolute pixels.
    #[cfg_attr(feature = "serde", serde(rename = "px"))]
    Px,
    /// Percent of the container length, capped at 100.
    #[cfg_attr(feature = "serde", serde(rename = "%"))]
    Percent,
}

/// Preset knob widths, relative to the track width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HandleSize {
    /// 1 % of the track width.
    Small,
    /// 2 % of the track width.
    #[default]
    Default,
    /// 4 % of the track width.
    Big,
}

impl HandleSize {
    /// Knob width as a percentage of the track width.
    #[must_use]
    pub fn percent(self) -> f64 {
        match self {
            Self::Small => 1.0,
            Self::Default => 2.0,
            Self::Big => 4.0,
        }
    }
}

/// Snap grid options.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapConfig {
    /// Number of marks; `2..=11` enables the grid, `1` is widened to `2`.
    pub points: u32,
    /// Snapping behavior.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: SnapKind,
    /// Soft-snap sensitivity in `[0, 3]`.
    pub sensitivity: f64,
    /// Whether tick marks should be drawn.
    pub marks: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            points: 0,
            kind: SnapKind::None,
            sensitivity: DEFAULT_SENSITIVITY,
            marks: false,
        }
    }
}

/// Options recognized when creating a [`RangeSlider`](crate::RangeSlider).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RangeSliderConfig {
    /// Initial `[low, high]` in percent.
    pub start_at: [f64; 2],
    /// Track length, in [`Self::unit`]s.
    pub width: f64,
    /// Track thickness in pixels; only the renderer uses it.
    pub height: f64,
    /// Unit of [`Self::width`]. Unset means percent for horizontal sliders.
    pub unit: Option<Unit>,
    /// Lay the track out vertically, growing upwards.
    pub vertical: bool,
    /// Keep the distance between the handles fixed.
    pub locked: bool,
    /// Custom `[min, max]` domain reported alongside percentages.
    pub total_range: [f64; 2],
    /// Snap grid options.
    pub snap: SnapConfig,
    /// Ignore pointer input.
    pub disabled: bool,
    /// Preset knob width.
    pub handle_size: HandleSize,
    /// Explicit knob width in pixels, for image knobs; overrides `handle_size`.
    pub handle_width: Option<f64>,
    /// Hide the knobs and drag by the bar only.
    pub no_handle: bool,
}

impl Default for RangeSliderConfig {
    fn default() -> Self {
        Self {
            start_at: [0.0, 0.0],
            width: 100.0,
            height: 40.0,
            unit: None,
            vertical: false,
            locked: false,
            total_range: [0.0, 0.0],
            snap: SnapConfig::default(),
            disabled: false,
            handle_size: HandleSize::Default,
            handle_width: None,
            no_handle: false,
        }
    }
}

impl RangeSliderConfig {
    /// Sets the initial `[low, high]` percentages.
    #[must_use]
    pub fn with_start_at(mut self, low: f64, high: f64) -> Self {
        self.start_at = [low, high];
        self
    }

    /// Sets the track length and its unit.
    #[must_use]
    pub fn with_width(mut self, width: f64, unit: Unit) -> Self {
        self.width = width;
        self.unit = Some(unit);
        self
    }

    /// Lays the track out vertically.
    #[must_use]
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Locks the distance between the handles.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Maps reported values onto `[min, max]`.
    #[must_use]
    pub fn with_total_range(mut self, min: f64, max: f64) -> Self {
        self.total_range = [min, max];
        self
    }

    /// Sets the snap grid options.
    #[must_use]
    pub fn with_snap(mut self, snap: SnapConfig) -> Self {
        self.snap = snap;
        self
    }

    /// Starts the slider disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Uses a preset knob width.
    #[must_use]
    pub fn with_handle_size(mut self, size: HandleSize) -> Self {
        self.handle_size = size;
        self
    }

    /// Uses an explicit knob width in pixels.
    #[must_use]
    pub fn with_handle_width(mut self, width: f64) -> Self {
        self.handle_width = Some(width);
        self
    }

    /// Hides the knobs.
    #[must_use]
    pub fn without_handle(mut self) -> Self {
        self.no_handle = true;
        self
    }

    /// Track orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Effective unit: vertical sliders always use pixels, horizontal ones
    /// default to percent.
    #[must_use]
    pub fn resolved_unit(&self) -> Unit {
        if self.vertical {
            Unit::Px
        } else {
            self.unit.unwrap_or(Unit::Percent)
        }
    }

    /// Track length in pixels inside a container of `container` pixels.
    #[must_use]
    pub fn track_width(&self, container: f64) -> f64 {
        let width = if self.width.is_finite() && self.width >= 0.0 {
            self.width
        } else {
            warn!(width = self.width, "invalid width, using default");
            Self::default().width
        };
        match self.resolved_unit() {
            Unit::Px => width,
            Unit::Percent => container.max(0.0) * width.min(100.0) / 100.0,
        }
    }

    /// Knob width in pixels for a track of `track_width` pixels.
    #[must_use]
    pub fn knob_width(&self, track_width: f64) -> f64 {
        if self.no_handle {
            return 0.0;
        }
        match self.handle_width {
            Some(px) if px.is_finite() && px >= 0.0 => px,
            _ => track_width * self.handle_size.percent() / 100.0,
        }
    }

    /// Normalized snap grid size, or `None` when snapping is disabled.
    ///
    /// Logs a warning for a rejected size; callers normalize once and keep
    /// the result.
    #[must_use]
    pub fn snap_points(&self) -> Option<u32> {
        let points = SnapGrid::normalize_points(self.snap.points);
        if points.is_none() && self.snap.points != 0 {
            warn!(points = self.snap.points, "snap points out of range, snapping disabled");
        }
        points
    }

    /// Snap mode; `None` kind when the grid is disabled.
    #[must_use]
    pub fn snap_mode(&self) -> SnapMode {
        let kind = if SnapGrid::normalize_points(self.snap.points).is_some() {
            self.snap.kind
        } else {
            SnapKind::None
        };
        SnapMode::new(kind, self.snap.sensitivity)
    }

    /// The custom value domain, when `total_range` declares a valid one.
    #[must_use]
    pub fn custom_domain(&self) -> Option<CustomDomain> {
        let [min, max] = self.total_range;
        let domain = CustomDomain::new(min, max);
        if domain.is_none() && !(min == 0.0 && max == 0.0) {
            warn!(min, max, "invalid total range ignored");
        }
        domain
    }

    /// Normalized starting percentages.
    ///
    /// Non-finite entries fall back to `0`; inverted pairs collapse to the
    /// midpoint.
    #[must_use]
    pub fn start_values(&self) -> [f64; 2] {
        let finite = |v: f64| {
            if v.is_finite() {
                v
            } else {
                warn!(value = v, "non-finite start value, using 0");
                0.0
            }
        };
        normalize_percent_pair([finite(self.start_at[0]), finite(self.start_at[1])])
    }
}

#[cfg(test)]
mod tests {
    use super::{HandleSize, RangeSliderConfig, SnapConfig, Unit};
    use crate::geometry::Orientation;
    use crate::snap::SnapKind;

    #[test]
    fn defaults_match_option_defaults() {
        let config = RangeSliderConfig::default();
        assert_eq!(config.start_at, [0.0, 0.0]);
        assert_eq!(config.width, 100.0);
        assert_eq!(config.snap.sensitivity, 2.0);
        assert_eq!(config.snap_points(), None);
        assert_eq!(config.snap_mode().kind, SnapKind::None);
        assert_eq!(config.custom_domain(), None);
        assert_eq!(config.resolved_unit(), Unit::Percent);
        assert_eq!(config.orientation(), Orientation::Horizontal);
    }

    #[test]
    fn vertical_always_uses_pixels() {
        let config = RangeSliderConfig::default()
            .with_width(300.0, Unit::Percent)
            .with_vertical(true);
        assert_eq!(config.resolved_unit(), Unit::Px);
        assert_eq!(config.track_width(1_000.0), 300.0);
    }

    #[test]
    fn percent_width_resolves_against_container() {
        let config = RangeSliderConfig::default().with_width(50.0, Unit::Percent);
        assert_eq!(config.track_width(800.0), 400.0);

        let capped = RangeSliderConfig::default().with_width(150.0, Unit::Percent);
        assert_eq!(capped.track_width(800.0), 800.0);
    }

    #[test]
    fn knob_width_sources() {
        let config = RangeSliderConfig::default();
        assert_eq!(config.knob_width(500.0), 10.0);
        assert_eq!(config.with_handle_size(HandleSize::Big).knob_width(500.0), 20.0);
        assert_eq!(config.with_handle_size(HandleSize::Small).knob_width(500.0), 5.0);
        assert_eq!(config.with_handle_width(24.0).knob_width(500.0), 24.0);
        assert_eq!(config.with_handle_width(24.0).without_handle().knob_width(500.0), 0.0);
    }

    #[test]
    fn out_of_range_snap_points_disable_snapping() {
        let snap = |points| SnapConfig {
            points,
            kind: SnapKind::Hard,
            ..SnapConfig::default()
        };
        let config = RangeSliderConfig::default();
        assert_eq!(config.with_snap(snap(1)).snap_points(), Some(2));
        assert_eq!(config.with_snap(snap(11)).snap_mode().kind, SnapKind::Hard);
        assert_eq!(config.with_snap(snap(12)).snap_points(), None);
        assert_eq!(config.with_snap(snap(12)).snap_mode().kind, SnapKind::None);
    }

    #[test]
    fn start_values_are_normalized() {
        let config = RangeSliderConfig::default();
        assert_eq!(config.with_start_at(20.0, 60.0).start_values(), [20.0, 60.0]);
        assert_eq!(config.with_start_at(80.0, 10.0).start_values(), [50.0, 50.0]);
        assert_eq!(config.with_start_at(-3.0, 130.0).start_values(), [0.0, 100.0]);
        assert_eq!(config.with_start_at(f64::NAN, 30.0).start_values(), [0.0, 30.0]);
    }

    #[test]
    fn total_range_must_be_increasing() {
        let config = RangeSliderConfig::default();
        assert!(config.with_total_range(10.0, 20.0).custom_domain().is_some());
        assert!(config.with_total_range(20.0, 10.0).custom_domain().is_none());
    }
}
