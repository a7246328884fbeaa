// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities supplied by the hosting environment.
//!
//! Consumers never locate or measure elements themselves. They resolve
//! identifiers through an [`ElementLookup`] and subscribe through an
//! [`ObservationSource`]; measurements come back later as batches of
//! [`Record`](crate::Record)s tagged with the subscription they belong to.

use crate::types::{ObserverOptions, SubscriptionId};

/// An intersection-observation facility.
///
/// In a browser this wraps `IntersectionObserver`; [`Viewport`](crate::Viewport)
/// is a synthetic implementation over page-space rectangles.
///
/// Subscriptions are a limited resource. Whoever calls [`observe`](Self::observe)
/// owns the returned handle and must hand it back to [`release`](Self::release).
pub trait ObservationSource {
    /// Element handle understood by this source.
    type Element;

    /// Begin observing `element`. The first measurement is delivered
    /// asynchronously, never from inside this call.
    fn observe(&mut self, element: Self::Element, options: &ObserverOptions) -> SubscriptionId;

    /// Stop observing. Records for `subscription` that have not been
    /// delivered yet are dropped. Releasing a stale handle does nothing.
    fn release(&mut self, subscription: SubscriptionId);
}

/// Resolve an identifier to an element, like a DOM id lookup.
pub trait ElementLookup<K: ?Sized> {
    /// Element handle produced by this lookup.
    type Element;

    /// Returns the element for `key`, if one exists right now.
    fn element_of(&self, key: &K) -> Option<Self::Element>;
}
