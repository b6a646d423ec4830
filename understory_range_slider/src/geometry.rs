// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track geometry: conversion between track pixels, percentages and pointer offsets.
//!
//! Both handles are stored in *track coordinates*: a shared origin and a usable
//! span of `width - 2 * handle_width` pixels. The low knob is laid out with its
//! left edge at its track position; the high knob is laid out one handle width
//! further right, so two handles at the same track position touch without
//! overlapping.
//!
//! ## Minimal example
//!
//! ```
//! use understory_range_slider::{Orientation, Track};
//!
//! // 200px track with 20px knobs leaves a 160px span.
//! let track = Track::new(200.0, 20.0, Orientation::Horizontal);
//! assert_eq!(track.span(), 160.0);
//!
//! assert_eq!(track.percent_to_px(50.0), 80.0);
//! assert_eq!(track.px_to_percent(80.0), 50.0);
//! ```

use kurbo::Point;

/// Layout direction of the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Values grow from left to right.
    #[default]
    Horizontal,
    /// Values grow from bottom to top.
    Vertical,
}

/// One of the two slider endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Handle {
    /// The handle holding the lower value.
    Low,
    /// The handle holding the higher value.
    High,
}

impl Handle {
    /// Both handles, in value order.
    pub const BOTH: [Self; 2] = [Self::Low, Self::High];

    /// Index of this handle in `[low, high]` pairs.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    /// The opposite handle.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// The bounded 1D space the handles move within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    width: f64,
    handle_width: f64,
    orientation: Orientation,
}

impl Track {
    /// Creates a track of `width` pixels carrying two knobs of `handle_width` pixels.
    ///
    /// Negative or non-finite sizes degrade to zero. The handle width is capped
    /// at half the track width, which leaves an empty (zero) span rather than a
    /// negative one.
    #[must_use]
    pub fn new(width: f64, handle_width: f64, orientation: Orientation) -> Self {
        let width = sanitize_len(width);
        let handle_width = sanitize_len(handle_width).min(width * 0.5);
        Self {
            width,
            handle_width,
            orientation,
        }
    }

    /// Total track length along the primary axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Width of a single knob.
    #[must_use]
    pub fn handle_width(&self) -> f64 {
        self.handle_width
    }

    /// Track orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Usable span in track coordinates: the track width minus both knobs.
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.width - 2.0 * self.handle_width).max(0.0)
    }

    /// Converts a track position into a percentage in `[0, 100]`.
    ///
    /// An empty span maps every position to `0`.
    #[must_use]
    pub fn px_to_percent(&self, px: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        (px / span * 100.0).clamp(0.0, 100.0)
    }

    /// Converts a percentage into a track position; out-of-range input is clamped.
    #[must_use]
    pub fn percent_to_px(&self, percent: f64) -> f64 {
        self.span() * percent.clamp(0.0, 100.0) / 100.0
    }

    /// Clamps a track position into `[0, span]`.
    #[must_use]
    pub fn clamp_px(&self, px: f64) -> f64 {
        px.clamp(0.0, self.span())
    }

    /// Normalizes a raw pointer offset along the primary axis.
    ///
    /// `raw` is measured from the track's screen origin: its left edge for
    /// horizontal tracks, its top edge for vertical ones. Vertical tracks grow
    /// upwards, so the offset is measured back from the far edge.
    #[must_use]
    pub fn axis_offset(&self, raw: f64) -> f64 {
        match self.orientation {
            Orientation::Horizontal => raw,
            Orientation::Vertical => self.width - raw,
        }
    }

    /// Like [`Track::axis_offset`], picking the coordinate that matches the orientation.
    ///
    /// `pt` must already be relative to the track's top-left corner.
    #[must_use]
    pub fn axis_offset_point(&self, pt: Point) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.axis_offset(pt.x),
            Orientation::Vertical => self.axis_offset(pt.y),
        }
    }

    /// Track position that centers `handle` under a normalized axis offset.
    #[must_use]
    pub fn pointer_to_px(&self, handle: Handle, axis: f64) -> f64 {
        let centered = axis - self.handle_width * 0.5;
        match handle {
            Handle::Low => centered,
            Handle::High => centered - self.handle_width,
        }
    }

    /// Left edge of `handle`'s knob in layout coordinates for a track position.
    #[must_use]
    pub fn knob_left(&self, handle: Handle, px: f64) -> f64 {
        match handle {
            Handle::Low => px,
            Handle::High => px + self.handle_width,
        }
    }

    /// Returns a copy of this track with a different width, keeping the knobs.
    #[must_use]
    pub fn with_width(&self, width: f64) -> Self {
        Self::new(width, self.handle_width, self.orientation)
    }
}

fn sanitize_len(len: f64) -> f64 {
    if len.is_finite() { len.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Handle, Orientation, Track};

    #[test]
    fn both_handles_follow_pair_order() {
        assert_eq!(Handle::BOTH, [Handle::Low, Handle::High]);
        for (i, handle) in Handle::BOTH.into_iter().enumerate() {
            assert_eq!(handle.index(), i);
            assert_eq!(handle.other().other(), handle);
        }
    }

    #[test]
    fn span_excludes_both_knobs() {
        let track = Track::new(240.0, 20.0, Orientation::Horizontal);
        assert_eq!(track.span(), 200.0);
    }

    #[test]
    fn percent_px_roundtrip_is_tight() {
        let track = Track::new(317.0, 13.0, Orientation::Horizontal);
        for i in 0..=100 {
            let p = f64::from(i);
            let back = track.px_to_percent(track.percent_to_px(p));
            assert!((back - p).abs() < 1e-9, "{p} came back as {back}");
        }
    }

    #[test]
    fn conversions_clamp_out_of_range_input() {
        let track = Track::new(240.0, 20.0, Orientation::Horizontal);
        assert_eq!(track.percent_to_px(-10.0), 0.0);
        assert_eq!(track.percent_to_px(250.0), 200.0);
        assert_eq!(track.px_to_percent(-5.0), 0.0);
        assert_eq!(track.px_to_percent(1_000.0), 100.0);
    }

    #[test]
    fn empty_span_maps_to_zero() {
        let track = Track::new(30.0, 20.0, Orientation::Horizontal);
        assert_eq!(track.handle_width(), 15.0);
        assert_eq!(track.span(), 0.0);
        assert_eq!(track.px_to_percent(10.0), 0.0);
        assert_eq!(track.percent_to_px(50.0), 0.0);
    }

    #[test]
    fn invalid_sizes_degrade_to_zero() {
        let track = Track::new(f64::NAN, -3.0, Orientation::Horizontal);
        assert_eq!(track.width(), 0.0);
        assert_eq!(track.handle_width(), 0.0);
    }

    #[test]
    fn vertical_axis_is_measured_from_far_edge() {
        let track = Track::new(200.0, 10.0, Orientation::Vertical);
        assert_eq!(track.axis_offset(50.0), 150.0);
        assert_eq!(track.axis_offset_point(Point::new(999.0, 50.0)), 150.0);

        let horizontal = Track::new(200.0, 10.0, Orientation::Horizontal);
        assert_eq!(horizontal.axis_offset_point(Point::new(50.0, 999.0)), 50.0);
    }

    #[test]
    fn pointer_centers_knob() {
        let track = Track::new(200.0, 20.0, Orientation::Horizontal);
        assert_eq!(track.pointer_to_px(Handle::Low, 50.0), 40.0);
        assert_eq!(track.pointer_to_px(Handle::High, 50.0), 20.0);
        // The high knob is laid out one knob further right, so its center
        // ends up under the pointer as well.
        let high_left = track.knob_left(Handle::High, 20.0);
        assert_eq!(high_left + track.handle_width() * 0.5, 50.0);
    }

    #[test]
    fn touching_handles_do_not_overlap_in_layout() {
        let track = Track::new(200.0, 20.0, Orientation::Horizontal);
        let low = track.knob_left(Handle::Low, 70.0);
        let high = track.knob_left(Handle::High, 70.0);
        assert!(low <= high - track.handle_width());
    }
}
