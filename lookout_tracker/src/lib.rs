// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookout Tracker: deterministic, `no_std` consumers of intersection records.
//!
//! ## Overview
//!
//! This crate turns batches of [`Record`](lookout_observe::Record)s into UI state.
//! It does not measure anything.
//! Instead, a host (a browser binding, or [`Viewport`](lookout_observe::Viewport) in tests and demos) supplies the records, and each consumer updates its own state from the ones it owns.
//!
//! ## Consumers
//!
//! - [`ActiveSection`](crate::active::ActiveSection): the most relevant of a set of named regions, for navigation highlighting.
//!   Ranked by intersection ratio, then by top offset. Sticky when nothing intersects.
//! - [`Reveal`](crate::reveal::Reveal): a one-shot latch per element for scroll-triggered reveal animations.
//!   Honors reduced motion through [`MotionPreference`](crate::types::MotionPreference).
//! - [`LazyImages`](crate::preload::LazyImages): promotes deferred image sources as they approach the viewport and tracks their skeleton state.
//!
//! Two helpers have no observation of their own:
//! - [`HeaderVisibility`](crate::header::HeaderVisibility): a header that hides after a quiet period.
//! - [`nav`]: link highlighting and scroll targets for anchor navigation.
//!
//! ## Workflow
//!
//! 1) Register — each consumer subscribes through an [`ObservationSource`](lookout_observe::ObservationSource) and keeps the returned handles.
//! 2) Pump — whenever the host has records, hand the same batch to every consumer.
//!    Consumers skip records they do not own, so one batch can serve them all.
//! 3) Read — query state directly, or listen through a [`Signal`](crate::signal::Signal).
//! 4) Tear down — consumers release their own subscriptions; nothing is left behind in the source.
//!
//! ## Page sketch
//!
//! ```
//! use kurbo::{Rect, Size};
//! use lookout_observe::Viewport;
//! use lookout_tracker::active::ActiveSection;
//! use lookout_tracker::nav::PORTFOLIO_SECTIONS;
//! use lookout_tracker::reveal::{Reveal, RevealOptions};
//!
//! let mut page = Viewport::new(Size::new(1280.0, 720.0));
//! let mut reveals = Vec::new();
//! for (i, id) in PORTFOLIO_SECTIONS.iter().enumerate() {
//!     let y = i as f64 * 900.0;
//!     let el = page.insert_named(*id, Rect::new(0.0, y, 1280.0, y + 900.0));
//!     reveals.push(Reveal::attach(el, &RevealOptions::section(), &false, &mut page));
//! }
//!
//! let mut active = ActiveSection::new();
//! active.register(PORTFOLIO_SECTIONS, &mut page);
//!
//! page.scroll_to(2000.0);
//! let batch = page.take_records();
//! active.process(&batch);
//! for r in &mut reveals {
//!     r.process(&batch, &mut page);
//! }
//!
//! assert_eq!(active.current(), Some(&"sketchup"));
//! assert!(reveals[2].is_revealed());
//! assert!(!reveals[3].is_revealed());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod active;
pub mod header;
pub mod nav;
pub mod preload;
pub mod reveal;
pub mod signal;
pub mod types;

#[cfg(test)]
mod testing;
