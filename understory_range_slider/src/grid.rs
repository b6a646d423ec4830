// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap grid: evenly spaced marks along the track span.

use smallvec::SmallVec;

use crate::geometry::Track;

/// Smallest number of marks a grid can have.
pub const MIN_SNAP_POINTS: u32 = 2;

/// Largest number of marks a grid can have.
pub const MAX_SNAP_POINTS: u32 = 11;

type Marks = SmallVec<[f64; MAX_SNAP_POINTS as usize]>;

/// Ordered snap marks in track pixels and in percent.
///
/// The first mark is always at `0` / `0 %` and the last at the full span /
/// `100 %`. Marks are rebuilt whenever the track geometry changes.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapGrid {
    pixel_marks: Marks,
    percent_marks: Marks,
}

impl SnapGrid {
    /// Normalizes a requested number of snap points.
    ///
    /// A single point is widened to two (one mark at each extreme). Anything
    /// outside `2..=11` disables snapping and yields `None`.
    #[must_use]
    pub fn normalize_points(points: u32) -> Option<u32> {
        match points {
            1 => Some(MIN_SNAP_POINTS),
            MIN_SNAP_POINTS..=MAX_SNAP_POINTS => Some(points),
            _ => None,
        }
    }

    /// Builds the grid for `points` marks over `track`.
    ///
    /// Returns `None` when `points` is rejected by [`SnapGrid::normalize_points`].
    #[must_use]
    pub fn build(points: u32, track: &Track) -> Option<Self> {
        let points = Self::normalize_points(points)?;
        let span = track.span();
        let last = points - 1;
        let increment = span / f64::from(last);

        let mut pixel_marks = Marks::new();
        let mut percent_marks = Marks::new();
        for i in 0..points {
            // Pin the extremes so accumulated rounding never drifts past the span.
            let (px, pct) = if i == 0 {
                (0.0, 0.0)
            } else if i == last {
                (span, 100.0)
            } else {
                let px = increment * f64::from(i);
                (px, track.px_to_percent(px))
            };
            pixel_marks.push(px);
            percent_marks.push(pct);
        }

        Some(Self {
            pixel_marks,
            percent_marks,
        })
    }

    /// Number of marks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixel_marks.len()
    }

    /// Always `false`; a grid has at least two marks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixel_marks.is_empty()
    }

    /// Marks in track pixels, ascending.
    #[must_use]
    pub fn pixel_marks(&self) -> &[f64] {
        &self.pixel_marks
    }

    /// Marks in percent, ascending.
    #[must_use]
    pub fn percent_marks(&self) -> &[f64] {
        &self.percent_marks
    }

    /// Index of the mark closest to `px`; ties go to the lower mark.
    #[must_use]
    pub fn closest_index(&self, px: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, mark) in self.pixel_marks.iter().enumerate() {
            let dist = (mark - px).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// The mark closest to `px`; ties go to the lower mark.
    #[must_use]
    pub fn closest(&self, px: f64) -> f64 {
        self.pixel_marks[self.closest_index(px)]
    }

    /// Distance from `px` to its closest mark.
    #[must_use]
    pub fn distance_to_closest(&self, px: f64) -> f64 {
        (self.closest(px) - px).abs()
    }

    /// The closest mark that is not above `limit`.
    ///
    /// Falls back to the first mark when every mark lies above `limit`.
    #[must_use]
    pub fn closest_at_or_below(&self, px: f64, limit: f64) -> f64 {
        let closest = self.closest(px);
        if closest <= limit {
            return closest;
        }
        self.pixel_marks
            .iter()
            .rev()
            .copied()
            .find(|mark| *mark <= limit)
            .unwrap_or(self.pixel_marks[0])
    }

    /// The closest mark that is not below `limit`.
    ///
    /// Falls back to the last mark when every mark lies below `limit`.
    #[must_use]
    pub fn closest_at_or_above(&self, px: f64, limit: f64) -> f64 {
        let closest = self.closest(px);
        if closest >= limit {
            return closest;
        }
        self.pixel_marks
            .iter()
            .copied()
            .find(|mark| *mark >= limit)
            .unwrap_or(self.pixel_marks[self.pixel_marks.len() - 1])
    }

    /// Marker offsets in layout coordinates, for drawing tick marks.
    ///
    /// Each marker sits one knob width in from the track origin, so markers
    /// line up with knob centers as they travel along the span.
    pub fn marker_offsets<'a>(&'a self, track: &'a Track) -> impl Iterator<Item = f64> + 'a {
        let handle_width = track.handle_width();
        self.pixel_marks.iter().map(move |px| px + handle_width)
    }
}
