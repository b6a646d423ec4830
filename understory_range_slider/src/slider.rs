// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slider controller: owns handle state and mediates between pointer input and callers.

use core::ops::Range;

use kurbo::Point;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::RangeSliderConfig;
use crate::constraint::{self, DragTarget, LockedRange, ResolvedPositions};
use crate::error::ValidationError;
use crate::geometry::{Handle, Track};
use crate::grid::{MAX_SNAP_POINTS, SnapGrid};
use crate::session::{DragSession, SessionState};
use crate::snap::{SnapEngine, SnapKind, SnapOutcome, SnapPhase};
use crate::value::{CustomDomain, ValueResult, normalize_percent_pair};

/// A notification produced by pointer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SliderEvent {
    /// The range moved during an active drag.
    Drag(ValueResult),
    /// A drag session completed.
    Drop(ValueResult),
    /// A handle reached a new snap mark.
    Snap(ValueResult),
}

impl SliderEvent {
    /// The value carried by the event.
    #[must_use]
    pub fn value(&self) -> &ValueResult {
        match self {
            Self::Drag(value) | Self::Drop(value) | Self::Snap(value) => value,
        }
    }
}

/// Events emitted by one input call, in emission order.
pub type SliderEvents = SmallVec<[SliderEvent; 2]>;

/// Where the renderer should draw the knobs and the bar.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderLayout {
    /// Left edge of the low knob along the primary axis.
    pub low_left: f64,
    /// Left edge of the high knob along the primary axis.
    pub high_left: f64,
    /// Width of each knob.
    pub handle_width: f64,
    /// Extent of the bar between the two knob centers.
    pub bar: Range<f64>,
}

/// A two-handle range slider.
///
/// Percentages are the persisted source of truth; pixel positions are derived
/// from them whenever the track changes size.
#[derive(Clone, Debug)]
pub struct RangeSlider {
    config: RangeSliderConfig,
    track: Track,
    positions: ResolvedPositions,
    percents: [f64; 2],
    snap_points: Option<u32>,
    grid: Option<SnapGrid>,
    snap: SnapEngine,
    session: DragSession,
    lock: Option<LockedRange>,
    domain: Option<CustomDomain>,
    disabled: bool,
}

impl RangeSlider {
    /// Creates a slider inside a container `container` pixels long.
    ///
    /// The container length only matters for percent-sized tracks. With
    /// snapping enabled the starting values are moved onto the grid.
    #[must_use]
    pub fn new(config: RangeSliderConfig, container: f64) -> Self {
        let width = config.track_width(container);
        let track = Track::new(width, config.knob_width(width), config.orientation());
        let snap_points = config.snap_points();
        let grid = snap_points.and_then(|points| SnapGrid::build(points, &track));
        let mut snap = SnapEngine::new(config.snap_mode());

        let start = config.start_values();
        let mut positions =
            ResolvedPositions::new(track.percent_to_px(start[0]), track.percent_to_px(start[1]));
        let mut percents = start;
        if let Some(grid) = &grid
            && snap.mode().kind != SnapKind::None
        {
            positions = snap.presnap(positions, grid, &track);
            percents = Handle::BOTH.map(|handle| track.px_to_percent(positions.get(handle)));
        }
        snap.set_baseline(percents);

        let lock = config.locked.then(|| LockedRange::from_positions(positions));
        debug!(
            width,
            handle_width = track.handle_width(),
            low = percents[0],
            high = percents[1],
            "range slider created"
        );

        Self {
            config,
            track,
            positions,
            percents,
            snap_points,
            grid,
            snap,
            session: DragSession::default(),
            lock,
            domain: config.custom_domain(),
            disabled: config.disabled,
        }
    }

    /// The configuration the slider was created with.
    #[must_use]
    pub fn config(&self) -> &RangeSliderConfig {
        &self.config
    }

    /// Current track geometry.
    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Current handle positions in track coordinates.
    #[must_use]
    pub fn positions(&self) -> ResolvedPositions {
        self.positions
    }

    /// The snap grid, when snapping is configured.
    #[must_use]
    pub fn grid(&self) -> Option<&SnapGrid> {
        self.grid.as_ref()
    }

    /// The active lock, when the range is locked.
    #[must_use]
    pub fn lock(&self) -> Option<LockedRange> {
        self.lock
    }

    /// State of the current drag session.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Returns `true` while a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// Returns `true` while pointer input is ignored.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> ValueResult {
        ValueResult::new(self.percents, self.domain.as_ref())
    }

    /// Replaces the value with `[low, high]` percent.
    ///
    /// Out-of-range values are clamped and an inverted pair collapses to the
    /// midpoint. Snapping is not applied. A locked range adopts the new
    /// distance between the handles.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`] when either value is NaN or
    /// infinite; the slider is left unchanged.
    pub fn set_value(&mut self, low: f64, high: f64) -> Result<(), ValidationError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ValidationError::NonFinite { low, high });
        }
        self.percents = normalize_percent_pair([low, high]);
        self.sync_positions();
        debug!(low = self.percents[0], high = self.percents[1], "value set");
        Ok(())
    }

    /// Resizes the track to `width` pixels.
    ///
    /// Handle positions are re-derived from the current percentages and the
    /// snap grid is rebuilt. Preset knob sizes scale with the track. Negative
    /// or non-finite widths are ignored.
    pub fn resize(&mut self, width: f64) {
        if !width.is_finite() || width < 0.0 {
            warn!(width, "ignoring invalid track width");
            return;
        }
        let old_span = self.track.span();
        self.track = Track::new(width, self.config.knob_width(width), self.config.orientation());
        self.grid = self
            .snap_points
            .and_then(|points| SnapGrid::build(points, &self.track));
        self.sync_positions();
        if old_span > 0.0 {
            self.session.rescale(self.track.span() / old_span);
        }
        debug!(width, span = self.track.span(), "track resized");
    }

    /// Resizes a track whose length follows its container.
    pub fn resize_container(&mut self, container: f64) {
        self.resize(self.config.track_width(container));
    }

    /// Starts a drag session on `target` with the pointer at `raw` along the primary axis.
    ///
    /// Returns `false` when the slider is disabled or the target cannot be
    /// dragged: the bar is not draggable under hard snapping unless the range
    /// is locked.
    pub fn pointer_down(&mut self, target: DragTarget, raw: f64) -> bool {
        self.begin(target, self.track.axis_offset(raw))
    }

    /// Like [`RangeSlider::pointer_down`], for a point relative to the track's top-left corner.
    pub fn pointer_down_at(&mut self, target: DragTarget, pt: Point) -> bool {
        self.begin(target, self.track.axis_offset_point(pt))
    }

    /// Feeds a pointer move at `raw` along the primary axis.
    ///
    /// Outside an active session this does nothing.
    pub fn pointer_move(&mut self, raw: f64) -> SliderEvents {
        self.drag_to(self.track.axis_offset(raw))
    }

    /// Like [`RangeSlider::pointer_move`], for a point relative to the track's top-left corner.
    pub fn pointer_move_at(&mut self, pt: Point) -> SliderEvents {
        self.drag_to(self.track.axis_offset_point(pt))
    }

    /// Releases the pointer, completing the session.
    ///
    /// Soft snapping resolves here. A drop is always reported for an active
    /// session.
    pub fn pointer_up(&mut self) -> SliderEvents {
        let mut events = SliderEvents::new();
        let Some(target) = self.session.target else {
            return events;
        };
        if self.session.has_moved() {
            let outcome = self.snap(SnapPhase::Drop, target, self.positions, self.session.lock);
            self.apply(outcome, &mut events);
        }
        self.session.end();
        events.push(SliderEvent::Drop(self.value()));
        events
    }

    /// Abandons the active session without reporting a drop.
    ///
    /// The last resolved position stands.
    pub fn cancel(&mut self) {
        self.session.end();
    }

    /// Ignores pointer input until [`RangeSlider::enable`]; cancels any active drag.
    pub fn disable(&mut self) {
        self.cancel();
        self.disabled = true;
    }

    /// Accepts pointer input again.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Tears the slider down, returning its final value.
    pub fn destroy(mut self) -> ValueResult {
        self.cancel();
        debug!("range slider destroyed");
        self.value()
    }

    /// Knob and bar placement for the renderer.
    #[must_use]
    pub fn layout(&self) -> SliderLayout {
        let handle_width = self.track.handle_width();
        let low_left = self.track.knob_left(Handle::Low, self.positions.low);
        let high_left = self.track.knob_left(Handle::High, self.positions.high);
        let half = handle_width * 0.5;
        SliderLayout {
            low_left,
            high_left,
            handle_width,
            bar: (low_left + half)..(high_left + half),
        }
    }

    /// Tick mark offsets in layout coordinates; empty unless marks are enabled.
    #[must_use]
    pub fn marker_offsets(&self) -> SmallVec<[f64; MAX_SNAP_POINTS as usize]> {
        match &self.grid {
            Some(grid) if self.config.snap.marks => grid.marker_offsets(&self.track).collect(),
            _ => SmallVec::new(),
        }
    }

    fn begin(&mut self, target: DragTarget, axis: f64) -> bool {
        if self.disabled || !axis.is_finite() {
            return false;
        }
        let hard = self.snap.mode().kind == SnapKind::Hard;
        if target == DragTarget::Bar && hard && self.lock.is_none() {
            return false;
        }

        let coupled = target == DragTarget::Bar || self.lock.is_some();
        if coupled && self.positions.is_coincident() {
            self.positions = constraint::separate_coincident(&self.track, self.positions);
            self.sync_percents();
            self.lock = self.lock.map(|_| LockedRange::from_positions(self.positions));
        }
        self.session.begin(target, axis, self.positions, self.lock);
        true
    }

    fn drag_to(&mut self, axis: f64) -> SliderEvents {
        let mut events = SliderEvents::new();
        let Some(target) = self.session.target else {
            return events;
        };
        if !axis.is_finite() {
            return events;
        }
        let Some(candidate) = self.session.candidate(axis, &self.track) else {
            return events;
        };

        let lock = self.session.lock;
        let free = constraint::resolve(&self.track, target, candidate, self.positions, lock);
        let outcome = self.snap(SnapPhase::Drag, target, free, lock);
        self.apply(outcome, &mut events);
        trace!(?target, low = self.percents[0], high = self.percents[1], "drag");
        events.push(SliderEvent::Drag(self.value()));
        events
    }

    fn snap(
        &mut self,
        phase: SnapPhase,
        target: DragTarget,
        free: ResolvedPositions,
        lock: Option<LockedRange>,
    ) -> SnapOutcome {
        match &self.grid {
            Some(grid) => self
                .snap
                .on_drag_snap(phase, target, free, grid, &self.track, lock),
            None => SnapOutcome::passthrough(free),
        }
    }

    fn apply(&mut self, outcome: SnapOutcome, events: &mut SliderEvents) {
        self.positions = outcome.positions;
        self.sync_percents();
        if outcome.should_notify() {
            events.push(SliderEvent::Snap(self.value()));
        }
    }

    fn sync_percents(&mut self) {
        self.percents =
            Handle::BOTH.map(|handle| self.track.px_to_percent(self.positions.get(handle)));
    }

    fn sync_positions(&mut self) {
        self.positions = ResolvedPositions::new(
            self.track.percent_to_px(self.percents[0]),
            self.track.percent_to_px(self.percents[1]),
        );
        if self.lock.is_some() {
            self.lock = Some(LockedRange::from_positions(self.positions));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeSlider, SliderEvent};
    use crate::config::{RangeSliderConfig, SnapConfig, Unit};
    use crate::constraint::DragTarget;
    use crate::geometry::Handle;
    use crate::session::SessionState;
    use crate::snap::SnapKind;

    const LOW: DragTarget = DragTarget::Handle(Handle::Low);

    // 240px track with 20px knobs: a 200px span.
    fn config() -> RangeSliderConfig {
        RangeSliderConfig::default()
            .with_width(240.0, Unit::Px)
            .with_handle_width(20.0)
    }

    #[test]
    fn new_places_handles_from_start_values() {
        let slider = RangeSlider::new(config().with_start_at(20.0, 60.0), 0.0);
        assert_eq!(slider.positions().low, 40.0);
        assert_eq!(slider.positions().high, 120.0);
        assert_eq!(slider.value().percent_range, [20.0, 60.0]);
        assert_eq!(slider.session_state(), SessionState::Idle);
    }

    #[test]
    fn drag_emits_drag_then_drop() {
        let mut slider = RangeSlider::new(config().with_start_at(20.0, 60.0), 0.0);
        assert!(slider.pointer_down(LOW, 50.0));
        let events = slider.pointer_move(70.0);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SliderEvent::Drag(v) if v.percent_range == [30.0, 60.0]));

        let events = slider.pointer_up();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SliderEvent::Drop(_)));
        assert!(!slider.is_dragging());
    }

    #[test]
    fn moves_without_session_are_ignored() {
        let mut slider = RangeSlider::new(config().with_start_at(20.0, 60.0), 0.0);
        assert!(slider.pointer_move(100.0).is_empty());
        assert!(slider.pointer_up().is_empty());
        assert_eq!(slider.value().percent_range, [20.0, 60.0]);
    }

    #[test]
    fn disabled_slider_rejects_input() {
        let mut slider = RangeSlider::new(config().with_disabled(true), 0.0);
        assert!(!slider.pointer_down(LOW, 10.0));

        slider.enable();
        assert!(slider.pointer_down(LOW, 10.0));
        slider.disable();
        assert!(!slider.is_dragging());
        assert!(slider.pointer_move(50.0).is_empty());
    }

    #[test]
    fn resize_reuses_normalized_snap_points() {
        let snap = SnapConfig {
            points: 1,
            kind: SnapKind::Hard,
            ..SnapConfig::default()
        };
        let mut slider = RangeSlider::new(config().with_snap(snap), 0.0);
        assert_eq!(slider.snap_points, Some(2));
        assert_eq!(slider.grid().map(|grid| grid.len()), Some(2));

        slider.resize(440.0);
        let grid = slider.grid().expect("grid is rebuilt");
        assert_eq!(grid.pixel_marks(), &[0.0, 400.0]);

        let rejected = SnapConfig { points: 12, ..snap };
        let mut slider = RangeSlider::new(config().with_snap(rejected), 0.0);
        assert_eq!(slider.snap_points, None);
        slider.resize(440.0);
        assert!(slider.grid().is_none());
    }

    #[test]
    fn bar_is_not_draggable_under_unlocked_hard_snap() {
        let snap = SnapConfig {
            points: 5,
            kind: SnapKind::Hard,
            ..SnapConfig::default()
        };
        let mut slider = RangeSlider::new(config().with_snap(snap), 0.0);
        assert!(!slider.pointer_down(DragTarget::Bar, 10.0));

        let mut locked = RangeSlider::new(config().with_snap(snap).with_locked(true), 0.0);
        assert!(locked.pointer_down(DragTarget::Bar, 10.0));
    }

    #[test]
    fn layout_places_high_knob_after_low() {
        let slider = RangeSlider::new(config().with_start_at(50.0, 50.0), 0.0);
        let layout = slider.layout();
        assert_eq!(layout.low_left, 100.0);
        assert_eq!(layout.high_left, 120.0);
        assert_eq!(layout.bar, 110.0..130.0);
    }

    #[test]
    fn marker_offsets_require_marks() {
        let snap = SnapConfig {
            points: 3,
            ..SnapConfig::default()
        };
        let hidden = RangeSlider::new(config().with_snap(snap), 0.0);
        assert!(hidden.marker_offsets().is_empty());

        let shown = RangeSlider::new(
            config().with_snap(SnapConfig {
                marks: true,
                ..snap
            }),
            0.0,
        );
        assert_eq!(shown.marker_offsets().as_slice(), &[20.0, 120.0, 220.0]);
    }
}
