// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap engine: pulls resolved positions onto grid marks and decides when to notify.
//!
//! The engine works on positions that already passed the
//! [constraint resolver](crate::resolve), and re-applies the resolver after
//! snapping so the result still honors ordering, bounds and locked spans.
//!
//! - [`SnapKind::None`] passes positions through.
//! - [`SnapKind::Hard`] snaps on every drag tick; the active handle never
//!   leaves the grid.
//! - [`SnapKind::Soft`] tracks the pointer freely and snaps on release, but
//!   only within [`sensitivity_threshold`] pixels of a mark.
//!
//! When both handles move together (locked range or bar drag) each handle is
//! measured against its own closest mark and the closer one drives the pair.
//! Equal distances resolve to the low handle.
//!
//! Notifications are deduplicated per handle: a snap is only reported when
//! the snapped value differs from the last value reported for that handle, and
//! at most one snap is reported per event.

use tracing::debug;

use crate::constraint::{self, DragTarget, LockedRange, ResolvedPositions};
use crate::geometry::{Handle, Track};
use crate::grid::SnapGrid;

/// Default soft-snap sensitivity.
pub const DEFAULT_SENSITIVITY: f64 = 2.0;

/// Distances closer than this (in pixels) count as a simultaneous snap.
const SIMULTANEOUS_SNAP_PX: f64 = 1.0;

/// Snapping behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SnapKind {
    /// No snapping; marks may still be drawn.
    #[default]
    None,
    /// Continuous snapping while dragging.
    Hard,
    /// Snapping on release, within a tolerance.
    Soft,
}

/// Snap kind plus its soft-snap sensitivity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapMode {
    /// How snapping is applied.
    pub kind: SnapKind,
    /// Soft-snap sensitivity in `[0, 3]`; ignored by the other kinds.
    pub sensitivity: f64,
}

impl Default for SnapMode {
    fn default() -> Self {
        Self {
            kind: SnapKind::None,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl SnapMode {
    /// Creates a mode of `kind` with the given sensitivity.
    #[must_use]
    pub fn new(kind: SnapKind, sensitivity: f64) -> Self {
        Self { kind, sensitivity }
    }

    /// Pixel tolerance for soft snapping.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        sensitivity_threshold(self.sensitivity)
    }
}

/// Maps a sensitivity in `[0, 3]` to a pixel tolerance: `(s + 1) * 5 - 3`.
///
/// Out-of-range sensitivities are clamped; non-finite ones use
/// [`DEFAULT_SENSITIVITY`].
#[must_use]
pub fn sensitivity_threshold(sensitivity: f64) -> f64 {
    let s = if sensitivity.is_finite() {
        sensitivity.clamp(0.0, 3.0)
    } else {
        DEFAULT_SENSITIVITY
    };
    (s + 1.0) * 5.0 - 3.0
}

/// Which part of a drag session a snap request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapPhase {
    /// A pointer move while the session is active.
    Drag,
    /// The pointer was released.
    Drop,
}

/// Result of a snap request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOutcome {
    /// Final handle positions.
    pub positions: ResolvedPositions,
    /// The handle that landed on a mark, if any.
    pub snapped: Option<Handle>,
    /// The handle whose snap should be reported, if any.
    pub notify: Option<Handle>,
}

impl SnapOutcome {
    /// An outcome that leaves `positions` untouched.
    #[must_use]
    pub fn passthrough(positions: ResolvedPositions) -> Self {
        Self {
            positions,
            snapped: None,
            notify: None,
        }
    }

    /// Track position of the snapped handle, if one snapped.
    #[must_use]
    pub fn snapped_px(&self) -> Option<f64> {
        self.snapped.map(|handle| self.positions.get(handle))
    }

    /// Returns `true` when a snap should be reported.
    #[must_use]
    pub fn should_notify(&self) -> bool {
        self.notify.is_some()
    }
}

/// Stateful snap engine for one slider.
#[derive(Clone, Debug, Default)]
pub struct SnapEngine {
    mode: SnapMode,
    last_reported: [Option<f64>; 2],
}

impl SnapEngine {
    /// Creates an engine with no reported values yet.
    #[must_use]
    pub fn new(mode: SnapMode) -> Self {
        Self {
            mode,
            last_reported: [None; 2],
        }
    }

    /// The configured mode.
    #[must_use]
    pub fn mode(&self) -> SnapMode {
        self.mode
    }

    /// The last percentage reported for `handle`.
    #[must_use]
    pub fn last_reported(&self, handle: Handle) -> Option<f64> {
        self.last_reported[handle.index()]
    }

    /// Treats `percents` as already reported, so staying on them stays silent.
    pub fn set_baseline(&mut self, percents: [f64; 2]) {
        self.last_reported = [Some(percents[0]), Some(percents[1])];
    }

    /// Moves freshly initialized positions onto the grid.
    ///
    /// Each handle is handled on its own, ignoring any lock: hard snapping
    /// always moves a handle to its closest mark, soft snapping only when it
    /// is within the threshold.
    #[must_use]
    pub fn presnap(
        &self,
        positions: ResolvedPositions,
        grid: &SnapGrid,
        track: &Track,
    ) -> ResolvedPositions {
        let snap_one = |px: f64| {
            let mark = grid.closest(px);
            match self.mode.kind {
                SnapKind::None => px,
                SnapKind::Hard => mark,
                SnapKind::Soft if (mark - px).abs() < self.mode.threshold() => mark,
                SnapKind::Soft => px,
            }
        };
        let low = snap_one(positions.low);
        let high = snap_one(positions.high).max(low);
        ResolvedPositions::new(track.clamp_px(low), track.clamp_px(high))
    }

    /// Applies snapping to `free`, the constraint-resolved positions of one event.
    ///
    /// `lock` is the coupling of the current session; it is `None` for a
    /// free single-handle drag.
    pub fn on_drag_snap(
        &mut self,
        phase: SnapPhase,
        target: DragTarget,
        free: ResolvedPositions,
        grid: &SnapGrid,
        track: &Track,
        lock: Option<LockedRange>,
    ) -> SnapOutcome {
        let active = matches!(
            (self.mode.kind, phase),
            (SnapKind::Hard, SnapPhase::Drag) | (SnapKind::Soft, SnapPhase::Drop)
        );
        if !active {
            return SnapOutcome::passthrough(free);
        }

        let coupled = match target {
            DragTarget::Bar => Some(lock.unwrap_or_else(|| LockedRange::from_positions(free))),
            DragTarget::Handle(_) => lock,
        };

        let (positions, snapped, simultaneous) = match (coupled, target) {
            (Some(lock), _) => match self.snap_coupled(free, grid, track, lock) {
                Some((positions, driver, simultaneous)) => (positions, Some(driver), simultaneous),
                None => (free, None, false),
            },
            (None, DragTarget::Handle(handle)) => match self.snap_single(handle, free, grid, track) {
                Some(positions) => (positions, Some(handle), false),
                None => (free, None, false),
            },
            (None, DragTarget::Bar) => (free, None, false),
        };

        let notify = snapped.and_then(|driver| self.record(driver, positions, track, simultaneous));
        SnapOutcome {
            positions,
            snapped,
            notify,
        }
    }

    fn snap_single(
        &self,
        handle: Handle,
        free: ResolvedPositions,
        grid: &SnapGrid,
        track: &Track,
    ) -> Option<ResolvedPositions> {
        let px = free.get(handle);
        // Never snap across the other handle; pick the nearest mark on our side.
        let mark = match handle {
            Handle::Low => grid.closest_at_or_below(px, free.high),
            Handle::High => grid.closest_at_or_above(px, free.low),
        };
        if self.mode.kind == SnapKind::Soft && (mark - px).abs() >= self.mode.threshold() {
            return None;
        }
        Some(constraint::resolve(
            track,
            DragTarget::Handle(handle),
            mark,
            free,
            None,
        ))
    }

    fn snap_coupled(
        &self,
        free: ResolvedPositions,
        grid: &SnapGrid,
        track: &Track,
        lock: LockedRange,
    ) -> Option<(ResolvedPositions, Handle, bool)> {
        let low_dist = grid.distance_to_closest(free.low);
        let high_dist = grid.distance_to_closest(free.high);
        let (driver, dist) = if low_dist <= high_dist {
            (Handle::Low, low_dist)
        } else {
            (Handle::High, high_dist)
        };
        if self.mode.kind == SnapKind::Soft && dist >= self.mode.threshold() {
            return None;
        }
        let mark = grid.closest(free.get(driver));
        let positions =
            constraint::resolve(track, DragTarget::Handle(driver), mark, free, Some(lock));
        let simultaneous = (low_dist - high_dist).abs() < SIMULTANEOUS_SNAP_PX;
        Some((positions, driver, simultaneous))
    }

    /// Records reported values and picks the single handle to notify for.
    fn record(
        &mut self,
        driver: Handle,
        positions: ResolvedPositions,
        track: &Track,
        simultaneous: bool,
    ) -> Option<Handle> {
        let percent = |handle: Handle| track.px_to_percent(positions.get(handle));
        let other = driver.other();
        let driver_pct = percent(driver);
        let other_pct = percent(other);

        let notify = if self.last_reported[driver.index()] != Some(driver_pct) {
            Some(driver)
        } else if simultaneous && self.last_reported[other.index()] != Some(other_pct) {
            Some(other)
        } else {
            None
        };

        self.last_reported[driver.index()] = Some(driver_pct);
        if simultaneous {
            self.last_reported[other.index()] = Some(other_pct);
        }
        if let Some(handle) = notify {
            debug!(?handle, percent = percent(handle), simultaneous, "snapped");
        }
        notify
    }
}
