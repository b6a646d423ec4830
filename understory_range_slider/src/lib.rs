// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_range_slider --heading-base-level=0

//! Understory Range Slider: interaction and geometry for a two-handle range slider.
//!
//! This crate turns raw pointer offsets into valid, ordered handle positions
//! and percentage values. It does **not** draw anything: a host places the
//! knobs and the bar from [`RangeSlider::layout`] and forwards pointer input.
//!
//! The pieces, bottom-up:
//!
//! - [`Track`] converts between track pixels, percentages and pointer offsets.
//! - [`SnapGrid`] holds 2 to 11 evenly spaced marks along the track.
//! - [`resolve`] clamps a candidate position and enforces ordering or a
//!   [`LockedRange`].
//! - [`SnapEngine`] pulls resolved positions onto the grid, with
//!   [hard or soft](SnapKind) snapping, and deduplicates snap notifications.
//! - [`DragSession`] tracks one pointer-down to pointer-up interaction on a
//!   handle or on the bar.
//! - [`RangeSlider`] owns the state and reports [`SliderEvent`]s.
//!
//! Percentages are the persisted source of truth. Pixel positions are derived
//! from them and re-derived when the track is resized.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_range_slider::{
//!     DragTarget, Handle, RangeSlider, RangeSliderConfig, SliderEvent, Unit,
//! };
//!
//! // 240px track with 20px knobs: handles move over a 200px span.
//! let config = RangeSliderConfig::default()
//!     .with_width(240.0, Unit::Px)
//!     .with_handle_width(20.0)
//!     .with_start_at(20.0, 60.0);
//! let mut slider = RangeSlider::new(config, 0.0);
//!
//! // Grab the low knob by its center and drag it 20px to the right.
//! assert!(slider.pointer_down(DragTarget::Handle(Handle::Low), 50.0));
//! let events = slider.pointer_move(70.0);
//! assert!(matches!(events[0], SliderEvent::Drag(_)));
//! assert_eq!(slider.value().percent_range, [30.0, 60.0]);
//!
//! let events = slider.pointer_up();
//! assert!(matches!(events[0], SliderEvent::Drop(_)));
//! ```
//!
//! ## Snapping
//!
//! ```rust
//! use understory_range_slider::{
//!     DragTarget, Handle, RangeSlider, RangeSliderConfig, SliderEvent, SnapConfig, SnapKind,
//!     Unit,
//! };
//!
//! let snap = SnapConfig {
//!     points: 5,
//!     kind: SnapKind::Hard,
//!     ..SnapConfig::default()
//! };
//! let config = RangeSliderConfig::default()
//!     .with_width(240.0, Unit::Px)
//!     .with_handle_width(20.0)
//!     .with_start_at(0.0, 100.0)
//!     .with_snap(snap);
//! let mut slider = RangeSlider::new(config, 0.0);
//!
//! slider.pointer_down(DragTarget::Handle(Handle::Low), 10.0);
//! // Dragging the knob center near 100px lands the low handle on the 50 % mark.
//! let events = slider.pointer_move(100.0);
//! assert!(matches!(events[0], SliderEvent::Snap(_)));
//! assert_eq!(slider.value().low(), 50.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`, `tracing` and `thiserror`.
//! - `libm`: `no_std` math through `kurbo`.
//! - `serde`: (de)serializes configuration and values using camelCase keys.

#![no_std]

extern crate alloc;

mod config;
mod constraint;
mod error;
mod geometry;
mod grid;
mod session;
mod slider;
mod snap;
mod value;

pub use config::{HandleSize, RangeSliderConfig, SnapConfig, Unit};
pub use constraint::{
    COINCIDENT_NUDGE_PERCENT, DragTarget, LockedRange, ResolvedPositions, resolve,
    separate_coincident,
};
pub use error::ValidationError;
pub use geometry::{Handle, Orientation, Track};
pub use grid::{MAX_SNAP_POINTS, MIN_SNAP_POINTS, SnapGrid};
pub use session::{DragSession, SessionState};
pub use slider::{RangeSlider, SliderEvent, SliderEvents, SliderLayout};
pub use snap::{
    DEFAULT_SENSITIVITY, SnapEngine, SnapKind, SnapMode, SnapOutcome, SnapPhase,
    sensitivity_threshold,
};
pub use value::{CustomDomain, INVERTED_FALLBACK_PERCENT, ValueResult, normalize_percent_pair};
