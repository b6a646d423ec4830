// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider values as reported to callers.

use tracing::warn;

/// Value both handles fall back to when a pair arrives inverted.
pub const INVERTED_FALLBACK_PERCENT: f64 = 50.0;

/// Normalizes a `[low, high]` percentage pair.
///
/// An inverted pair collapses to the midpoint on both handles; the result is
/// then clamped into `[0, 100]`.
#[must_use]
pub fn normalize_percent_pair(pair: [f64; 2]) -> [f64; 2] {
    let [low, high] = if pair[0] > pair[1] {
        warn!(low = pair[0], high = pair[1], "inverted range, resetting to midpoint");
        [INVERTED_FALLBACK_PERCENT; 2]
    } else {
        pair
    };
    [low.clamp(0.0, 100.0), high.clamp(0.0, 100.0)]
}

/// A caller-declared numeric domain that percentages are mapped onto.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomDomain {
    min: f64,
    max: f64,
}

impl CustomDomain {
    /// Creates a domain from `[min, max]`.
    ///
    /// Returns `None` for the unset domain `[0, 0]`, for `min >= max`, and for
    /// non-finite bounds.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        let unset = min == 0.0 && max == 0.0;
        if unset || !min.is_finite() || !max.is_finite() || min >= max {
            return None;
        }
        Some(Self { min, max })
    }

    /// Lower bound of the domain.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the domain.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps a percentage linearly into the domain.
    #[must_use]
    pub fn map(&self, percent: f64) -> f64 {
        self.min + (self.max - self.min) * percent / 100.0
    }
}

/// The value payload of slider notifications and queries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValueResult {
    /// `[low, high]` in percent.
    pub percent_range: [f64; 2],
    /// `[low, high]` mapped through the configured [`CustomDomain`], if any.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub custom_range: Option<[f64; 2]>,
}

impl ValueResult {
    /// Builds a result from percentages, mapping them through `domain` when present.
    #[must_use]
    pub fn new(percent_range: [f64; 2], domain: Option<&CustomDomain>) -> Self {
        Self {
            percent_range,
            custom_range: domain.map(|d| [d.map(percent_range[0]), d.map(percent_range[1])]),
        }
    }

    /// Low value in percent.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.percent_range[0]
    }

    /// High value in percent.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.percent_range[1]
    }
}
