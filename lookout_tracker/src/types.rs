// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the trackers: candidate ranking and host preferences.

use lookout_observe::Measurement;

/// Ranking key for a region that is currently intersecting.
///
/// Used by [`ActiveSection`](crate::active::ActiveSection) to pick the most
/// relevant region. Greater is more relevant:
/// - a higher intersection ratio wins;
/// - on equal ratios, the smaller top offset (closer to the top of the viewport) wins.
///
/// Inputs are sanitized on construction: a NaN ratio becomes `0`, ratios are
/// clamped into `[0, 1]`, and a NaN top offset ranks below every other
/// offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    ratio: f64,
    top: f64,
}

impl Candidate {
    /// Build a sanitized candidate.
    pub fn new(ratio: f64, top: f64) -> Self {
        Self {
            ratio: if ratio.is_nan() {
                0.0
            } else {
                ratio.clamp(0.0, 1.0)
            },
            top: if top.is_nan() { f64::INFINITY } else { top },
        }
    }

    /// Intersection ratio in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Top offset relative to the viewport.
    pub fn top(&self) -> f64 {
        self.top
    }
}

impl From<&Measurement> for Candidate {
    fn from(m: &Measurement) -> Self {
        Self::new(m.intersection_ratio, m.top_offset)
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Values are sanitized, so neither comparison sees a NaN.
        let by_ratio = self
            .ratio
            .partial_cmp(&other.ratio)
            .unwrap_or(core::cmp::Ordering::Equal);
        by_ratio.then_with(|| {
            other
                .top
                .partial_cmp(&self.top)
                .unwrap_or(core::cmp::Ordering::Equal)
        })
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(Ord::cmp(self, other))
    }
}

/// Host accessibility preference, queried once per
/// [`Reveal::attach`](crate::reveal::Reveal::attach).
pub trait MotionPreference {
    /// True when the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    #[inline]
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}
