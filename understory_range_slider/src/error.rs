// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Programming errors at the slider's public boundary.
///
/// Everything else the slider accepts is normalized silently: out-of-range
/// values are clamped and inverted pairs are reset.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ValidationError {
    /// A value passed to [`RangeSlider::set_value`](crate::RangeSlider::set_value)
    /// was NaN or infinite.
    #[error("slider values must be finite numbers, got [{low}, {high}]")]
    NonFinite {
        /// The requested low value.
        low: f64,
        /// The requested high value.
        high: f64,
    },
}
