// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for observation: handles, flags, margins, thresholds, options, and measurements.

use alloc::vec::Vec;
use kurbo::Rect;

/// Identifier for an element known to a [`Viewport`](crate::Viewport).
///
/// A small, copyable handle made of a slot index and a generation counter.
/// Removing an element frees its slot; reusing the slot bumps the generation,
/// so a stale `ElementId` never aliases a different live element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Handle for one live observation created by
/// [`ObservationSource::observe`](crate::ObservationSource::observe).
///
/// Every [`Record`] carries the handle of the subscription it was measured
/// for, which is how consumers route a shared batch to their own state.
/// Handles are generational: once released, a handle is never handed out
/// again by the same source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SubscriptionId(u32, u32);

impl SubscriptionId {
    /// Build a handle from a slot index and a generation.
    ///
    /// Sources other than [`Viewport`](crate::Viewport) (host bindings, test
    /// fakes) use this to mint their own handles.
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Slot index of this handle.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of this handle.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Element flags controlling participation in observation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is rendered. Hidden elements never intersect.
        const VISIBLE = 0b0000_0001;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Margin applied to the root (viewport) rectangle before intersecting.
///
/// Positive values grow the root outward, negative values shrink it. A
/// margin of `-50` on top and bottom means a region has to cross 50 pixels
/// into the viewport before it counts as intersecting.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    /// Top edge offset.
    pub top: f64,
    /// Right edge offset.
    pub right: f64,
    /// Bottom edge offset.
    pub bottom: f64,
    /// Left edge offset.
    pub left: f64,
}

impl Margin {
    /// No margin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Margin with explicit edges, in CSS order.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same offset on all four edges.
    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    /// Same offset on top and bottom, nothing on the sides.
    pub const fn vertical(v: f64) -> Self {
        Self::new(v, 0.0, v, 0.0)
    }

    /// Offset on the bottom edge only.
    pub const fn only_bottom(v: f64) -> Self {
        Self::new(0.0, 0.0, v, 0.0)
    }

    /// Apply the margin to `rect`.
    ///
    /// The result may be inverted when a negative margin exceeds the rect's
    /// extent; an inverted root intersects nothing.
    pub fn apply(self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 - self.left,
            rect.y0 - self.top,
            rect.x1 + self.right,
            rect.y1 + self.bottom,
        )
    }
}

/// Sorted set of intersection ratios at which a new record is reported.
///
/// Values are clamped into `[0, 1]`, NaNs are dropped, duplicates removed.
/// The set is never empty; an empty input becomes `[0]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Thresholds(Vec<f64>);

impl Thresholds {
    /// Build a normalized threshold set.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut v: Vec<f64> = values
            .into_iter()
            .filter(|t| !t.is_nan())
            .map(|t| t.clamp(0.0, 1.0))
            .collect();
        v.sort_by(f64::total_cmp);
        v.dedup();
        if v.is_empty() {
            v.push(0.0);
        }
        Self(v)
    }

    /// A single threshold.
    pub fn single(t: f64) -> Self {
        Self::new([t])
    }

    /// The normalized thresholds, ascending.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of thresholds at or below `ratio`.
    ///
    /// Two measurements with the same index sit in the same band and do not
    /// warrant a new record.
    pub fn index_of(&self, ratio: f64) -> usize {
        self.0.iter().take_while(|&&t| t <= ratio).count()
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self(alloc::vec![0.0])
    }
}

impl From<Vec<f64>> for Thresholds {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<Thresholds> for Vec<f64> {
    fn from(t: Thresholds) -> Self {
        t.0
    }
}

/// Options for one observation.
///
/// The presets mirror how a portfolio page uses the primitive:
/// [`active_section`](Self::active_section) for navigation highlighting and
/// [`preload`](Self::preload) for lazy images.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverOptions {
    /// Margin applied to the viewport before intersecting.
    pub root_margin: Margin,
    /// Ratios at which a new record is reported.
    pub thresholds: Thresholds,
}

impl ObserverOptions {
    /// Root margin used by [`active_section`](Self::active_section), on top and bottom.
    pub const ACTIVE_SECTION_INSET: f64 = -50.0;

    /// Root margin used by [`preload`](Self::preload), on every edge.
    pub const PRELOAD_OUTSET: f64 = 50.0;

    /// Section tracking: viewport shrunk by 50px top and bottom, ratios sampled
    /// at quarter steps.
    pub fn active_section() -> Self {
        Self {
            root_margin: Margin::vertical(Self::ACTIVE_SECTION_INSET),
            thresholds: Thresholds::new([0.0, 0.25, 0.5, 0.75, 1.0]),
        }
    }

    /// Image preloading: viewport grown by 50px so loading starts early,
    /// single threshold at half visibility.
    pub fn preload() -> Self {
        Self {
            root_margin: Margin::uniform(Self::PRELOAD_OUTSET),
            thresholds: Thresholds::single(0.5),
        }
    }

    /// Replace the root margin.
    pub fn with_root_margin(mut self, root_margin: Margin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Replace the thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Snapshot of one element's visibility at one point in time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Any overlap with the (margin-adjusted) root, edges included.
    pub is_intersecting: bool,
    /// Fraction of the element's area inside the root, in `[0, 1]`.
    pub intersection_ratio: f64,
    /// Element top relative to the top of the viewport (not the margin-adjusted root).
    pub top_offset: f64,
}

impl Measurement {
    /// A non-intersecting measurement at `top_offset`.
    pub const fn outside(top_offset: f64) -> Self {
        Self {
            is_intersecting: false,
            intersection_ratio: 0.0,
            top_offset,
        }
    }

    /// Measure `target` against `root`.
    ///
    /// `root` is the margin-adjusted viewport and `viewport_top` the top edge
    /// of the unadjusted viewport, both in page space. Touching edges count as
    /// intersecting with a ratio of zero. A zero-area target that intersects
    /// has a ratio of one.
    pub fn compute(root: Rect, viewport_top: f64, target: Rect) -> Self {
        let top_offset = target.y0 - viewport_top;
        let x0 = root.x0.max(target.x0);
        let x1 = root.x1.min(target.x1);
        let y0 = root.y0.max(target.y0);
        let y1 = root.y1.min(target.y1);
        if x0 > x1 || y0 > y1 {
            return Self::outside(top_offset);
        }
        let target_area = (target.x1 - target.x0) * (target.y1 - target.y0);
        let intersection_ratio = if target_area > 0.0 {
            ((x1 - x0) * (y1 - y0) / target_area).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            is_intersecting: true,
            intersection_ratio,
            top_offset,
        }
    }
}

/// One measurement delivered for one subscription.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Record {
    /// Subscription the measurement was taken for.
    pub subscription: SubscriptionId,
    /// The measurement itself.
    pub measurement: Measurement,
}
