// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Observe: a headless, `no_std` model of intersection observation.
//!
//! ## Overview
//!
//! This crate describes how the visibility of page elements is measured and delivered, without any browser.
//! It provides:
//! - [`ObserverOptions`]: a root [`Margin`] that grows or shrinks the viewport, and [`Thresholds`] at which ratio changes are reported.
//! - [`Measurement`] and [`Record`]: one snapshot per element, tagged with the [`SubscriptionId`] it was taken for.
//! - [`ObservationSource`] and [`ElementLookup`]: the two capabilities a host supplies to consumers such as `lookout_tracker`.
//! - [`Viewport`]: a synthetic source over Kurbo rectangles, used for tests, demos, and non-browser hosts.
//!
//! ## Delivery model
//!
//! Observation is asynchronous and batched.
//! [`ObservationSource::observe`] never measures; the first record for a subscription arrives with the next batch.
//! A batch is a plain `Vec<Record>` that the host hands to every consumer, and each consumer ignores records for subscriptions it does not own.
//! [`ObservationSource::release`] is synchronous: once it returns, no record for that subscription is delivered by the source.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size};
//! use lookout_observe::{ElementLookup, ObservationSource, ObserverOptions, Viewport};
//!
//! let mut viewport = Viewport::new(Size::new(800.0, 600.0));
//! viewport.insert_named("shoots", Rect::new(0.0, 0.0, 800.0, 400.0));
//!
//! let shoots = viewport.element_of("shoots").unwrap();
//! let sub = viewport.observe(shoots, &ObserverOptions::active_section());
//!
//! let batch = viewport.take_records();
//! assert_eq!(batch[0].subscription, sub);
//! // 350 of 400 pixels are inside the viewport once it is shrunk by 50px.
//! assert_eq!(batch[0].measurement.intersection_ratio, 0.875);
//!
//! viewport.release(sub);
//! assert_eq!(viewport.subscription_count(), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod source;
mod types;
mod viewport;

pub use source::{ElementLookup, ObservationSource};
pub use types::{
    ElementFlags, ElementId, Margin, Measurement, ObserverOptions, Record, SubscriptionId,
    Thresholds,
};
pub use viewport::Viewport;
