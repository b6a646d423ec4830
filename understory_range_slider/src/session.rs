// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: which part of the slider is being dragged, and where the pointer grabbed it.
//!
//! ## Usage
//!
//! 1) Start a session with [`DragSession::begin`] when the pointer goes down on a
//!    handle or on the bar.
//! 2) On each move, call [`DragSession::candidate`] with the normalized axis
//!    offset to get the candidate track position for the target.
//! 3) End the session with [`DragSession::end`] on pointer up or cancellation.
//!
//! The session never writes handle positions itself; it only turns pointer
//! offsets into candidates for the [constraint resolver](crate::resolve).
//!
//! ## Minimal example
//!
//! ```
//! use understory_range_slider::{
//!     DragSession, DragTarget, Handle, Orientation, ResolvedPositions, SessionState, Track,
//! };
//!
//! let track = Track::new(240.0, 20.0, Orientation::Horizontal);
//! let positions = ResolvedPositions::new(40.0, 120.0);
//! let mut session = DragSession::default();
//!
//! // Grab the bar 30px right of the low handle.
//! session.begin(DragTarget::Bar, 70.0, positions, None);
//! assert_eq!(session.state(), SessionState::BarDragging);
//!
//! // Moving the pointer by 10px moves the low handle by 10px.
//! assert_eq!(session.candidate(80.0, &track), Some(50.0));
//!
//! session.end();
//! assert_eq!(session.state(), SessionState::Idle);
//! ```

use tracing::debug;

use crate::constraint::{DragTarget, LockedRange, ResolvedPositions};
use crate::geometry::{Handle, Track};

/// Coarse state of a [`DragSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No pointer is down.
    Idle,
    /// A single handle is being dragged.
    HandleDragging(Handle),
    /// The bar between the handles is being dragged.
    BarDragging,
}

/// Tracks one pointer-down to pointer-up interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    /// What the session moves, while active.
    pub target: Option<DragTarget>,
    /// Bar drag only: low handle position minus the grab offset.
    pub anchor: Option<f64>,
    /// Coupling that stays fixed for the whole session.
    pub lock: Option<LockedRange>,
    /// Whether any move arrived since the session started.
    pub moved: bool,
}

impl DragSession {
    /// Starts a session for `target` with the pointer at `axis`.
    ///
    /// A bar drag records the grab point relative to the low handle so the
    /// range does not jump to the pointer. `lock` is the coupling to keep for
    /// the session; bar drags fall back to the current span.
    pub fn begin(
        &mut self,
        target: DragTarget,
        axis: f64,
        positions: ResolvedPositions,
        lock: Option<LockedRange>,
    ) {
        let (anchor, lock) = match target {
            DragTarget::Bar => (
                Some(positions.low - axis),
                Some(lock.unwrap_or_else(|| LockedRange::from_positions(positions))),
            ),
            DragTarget::Handle(_) => (None, lock),
        };
        *self = Self {
            target: Some(target),
            anchor,
            lock,
            moved: false,
        };
        debug!(?target, axis, "drag session started");
    }

    /// Candidate track position for the target with the pointer at `axis`.
    ///
    /// Returns `None` when no session is active.
    pub fn candidate(&mut self, axis: f64, track: &Track) -> Option<f64> {
        let target = self.target?;
        self.moved = true;
        Some(match target {
            DragTarget::Handle(handle) => track.pointer_to_px(handle, axis),
            DragTarget::Bar => axis + self.anchor.unwrap_or(0.0),
        })
    }

    /// Rescales the grab anchor and lock after the track span changed by `factor`.
    pub fn rescale(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.anchor = self.anchor.map(|a| a * factor);
        self.lock = self.lock.map(|l| l.scaled(factor));
    }

    /// Ends the session, returning what it was dragging.
    pub fn end(&mut self) -> Option<DragTarget> {
        let target = self.target.take();
        if target.is_some() {
            debug!(?target, moved = self.moved, "drag session ended");
        }
        *self = Self::default();
        target
    }

    /// Current coarse state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.target {
            None => SessionState::Idle,
            Some(DragTarget::Handle(handle)) => SessionState::HandleDragging(handle),
            Some(DragTarget::Bar) => SessionState::BarDragging,
        }
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Returns `true` once the pointer moved during the active session.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;

    fn track() -> Track {
        Track::new(240.0, 20.0, Orientation::Horizontal)
    }

    #[test]
    fn new_session_is_idle() {
        let session = DragSession::default();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.is_active());
        assert!(!session.has_moved());
    }

    #[test]
    fn begin_on_handle_sets_state() {
        let mut session = DragSession::default();
        session.begin(
            DragTarget::Handle(Handle::High),
            150.0,
            ResolvedPositions::new(40.0, 120.0),
            None,
        );

        assert_eq!(session.state(), SessionState::HandleDragging(Handle::High));
        assert_eq!(session.anchor, None);
        assert_eq!(session.lock, None);
        assert!(!session.has_moved());
    }

    #[test]
    fn handle_candidate_centers_knob_under_pointer() {
        let mut session = DragSession::default();
        session.begin(
            DragTarget::Handle(Handle::Low),
            50.0,
            ResolvedPositions::new(40.0, 120.0),
            None,
        );

        assert_eq!(session.candidate(70.0, &track()), Some(60.0));
        assert!(session.has_moved());
    }

    #[test]
    fn bar_candidate_preserves_grab_point() {
        let mut session = DragSession::default();
        let positions = ResolvedPositions::new(40.0, 120.0);
        session.begin(DragTarget::Bar, 100.0, positions, None);

        assert_eq!(session.anchor, Some(-60.0));
        assert_eq!(session.lock, Some(LockedRange::new(80.0)));
        // No movement means no jump.
        assert_eq!(session.candidate(100.0, &track()), Some(40.0));
        assert_eq!(session.candidate(90.0, &track()), Some(30.0));
    }

    #[test]
    fn candidate_without_session_is_none() {
        let mut session = DragSession::default();
        assert_eq!(session.candidate(10.0, &track()), None);
        assert!(!session.has_moved());
    }

    #[test]
    fn end_resets_state() {
        let mut session = DragSession::default();
        session.begin(DragTarget::Bar, 100.0, ResolvedPositions::new(40.0, 120.0), None);
        session.candidate(110.0, &track());

        assert_eq!(session.end(), Some(DragTarget::Bar));
        assert_eq!(session, DragSession::default());
        assert_eq!(session.end(), None);
    }

    #[test]
    fn begin_overwrites_previous_session() {
        let mut session = DragSession::default();
        session.begin(DragTarget::Bar, 100.0, ResolvedPositions::new(40.0, 120.0), None);
        session.candidate(110.0, &track());

        session.begin(
            DragTarget::Handle(Handle::Low),
            10.0,
            ResolvedPositions::new(40.0, 120.0),
            None,
        );
        assert_eq!(session.state(), SessionState::HandleDragging(Handle::Low));
        assert_eq!(session.anchor, None);
        assert!(!session.has_moved());
    }

    #[test]
    fn rescale_scales_pixel_state() {
        let mut session = DragSession::default();
        session.begin(DragTarget::Bar, 100.0, ResolvedPositions::new(40.0, 120.0), None);
        session.rescale(2.0);
        assert_eq!(session.anchor, Some(-120.0));
        assert_eq!(session.lock, Some(LockedRange::new(160.0)));

        session.rescale(f64::NAN);
        assert_eq!(session.anchor, Some(-120.0));
    }
}
