// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint resolution for candidate handle positions.
//!
//! [`resolve`] turns a candidate track position for one drag target into a
//! valid pair of handle positions. Rules are applied in order:
//!
//! 1. The candidate is clamped to the track span.
//! 2. Without a [`LockedRange`], the moving handle is pinned at the other
//!    handle when it would cross it. Handles may touch but never swap.
//! 3. With a [`LockedRange`] (or while dragging the bar), the pair moves as a
//!    unit. Near the ends of the track the whole pair is shifted, so the span
//!    between the handles stays exactly constant.
//!
//! There is no error path: out-of-range input degrades to boundary values.

use tracing::trace;

use crate::geometry::{Handle, Track};

/// Smallest separation applied to coincident handles, in percent.
pub const COINCIDENT_NUDGE_PERCENT: f64 = 1e-5;

/// What a drag session moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// A single handle.
    Handle(Handle),
    /// The bar between the handles, moving both at once.
    Bar,
}

/// A pair of handle positions in track coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ResolvedPositions {
    /// Track position of the low handle.
    pub low: f64,
    /// Track position of the high handle.
    pub high: f64,
}

impl ResolvedPositions {
    /// Creates a pair from its two positions.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Position of `handle`.
    #[must_use]
    pub fn get(self, handle: Handle) -> f64 {
        match handle {
            Handle::Low => self.low,
            Handle::High => self.high,
        }
    }

    /// Distance from the low to the high handle.
    #[must_use]
    pub fn span(self) -> f64 {
        self.high - self.low
    }

    /// Returns `true` when both handles share a position.
    #[must_use]
    pub fn is_coincident(self) -> bool {
        self.low == self.high
    }

    /// Returns `true` when the pair is ordered and inside `track`'s span.
    #[must_use]
    pub fn is_valid_for(self, track: &Track) -> bool {
        0.0 <= self.low && self.low <= self.high && self.high <= track.span()
    }
}

/// A fixed distance coupling both handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LockedRange {
    span: f64,
}

impl LockedRange {
    /// Locks the handles `span` pixels apart; negative spans are treated as zero.
    #[must_use]
    pub fn new(span: f64) -> Self {
        Self {
            span: if span.is_finite() { span.max(0.0) } else { 0.0 },
        }
    }

    /// Locks the handles at their current distance.
    #[must_use]
    pub fn from_positions(positions: ResolvedPositions) -> Self {
        Self::new(positions.span())
    }

    /// The locked distance in track pixels.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Returns this lock scaled by `factor`, as used when the track is resized.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.span * factor)
    }
}

/// Resolves a candidate position for `target` against the current positions.
///
/// For [`DragTarget::Bar`], `candidate` is the position of the low handle and
/// the pair is always coupled; without an explicit `lock` the current span is
/// used.
#[must_use]
pub fn resolve(
    track: &Track,
    target: DragTarget,
    candidate: f64,
    current: ResolvedPositions,
    lock: Option<LockedRange>,
) -> ResolvedPositions {
    let span = track.span();
    let candidate = if candidate.is_finite() {
        track.clamp_px(candidate)
    } else {
        current.get(match target {
            DragTarget::Handle(handle) => handle,
            DragTarget::Bar => Handle::Low,
        })
    };

    let lock = match target {
        DragTarget::Bar => Some(lock.unwrap_or_else(|| LockedRange::from_positions(current))),
        DragTarget::Handle(_) => lock,
    };

    let resolved = match (target, lock) {
        (DragTarget::Handle(Handle::High), Some(lock)) => {
            let width = lock.span().min(span);
            let high = candidate.clamp(width, span);
            ResolvedPositions::new(high - width, high)
        }
        (DragTarget::Handle(Handle::Low) | DragTarget::Bar, Some(lock)) => {
            let width = lock.span().min(span);
            let low = candidate.clamp(0.0, span - width);
            // Rounding in `span - width` must not push the pair past the end.
            ResolvedPositions::new(low, (low + width).min(span))
        }
        (DragTarget::Handle(Handle::Low), None) => {
            let high = track.clamp_px(current.high);
            ResolvedPositions::new(candidate.min(high), high)
        }
        (DragTarget::Handle(Handle::High), None) => {
            let low = track.clamp_px(current.low);
            ResolvedPositions::new(low, candidate.max(low))
        }
        // `Bar` always carries a lock by this point.
        (DragTarget::Bar, None) => current,
    };

    trace!(?target, candidate, low = resolved.low, high = resolved.high, "resolved");
    resolved
}

/// Separates coincident handles so a coupled drag has a defined direction.
///
/// The high handle moves up by [`COINCIDENT_NUDGE_PERCENT`]; when it already
/// sits at the end of the track the low handle moves down instead. Distinct
/// handles and empty tracks are returned unchanged.
#[must_use]
pub fn separate_coincident(track: &Track, positions: ResolvedPositions) -> ResolvedPositions {
    if !positions.is_coincident() || track.span() <= 0.0 {
        return positions;
    }
    let nudge = track.percent_to_px(COINCIDENT_NUDGE_PERCENT);
    if positions.high + nudge <= track.span() {
        ResolvedPositions::new(positions.low, positions.high + nudge)
    } else {
        ResolvedPositions::new(positions.low - nudge, positions.high)
    }
}
