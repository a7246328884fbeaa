// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active section tracking: which registered region is the most relevant right now.
//!
//! ## Selection
//!
//! - Each record for a tracked region replaces that region's measurement.
//!   Intersecting regions are candidates; the others are dropped.
//! - After a whole batch is applied, the candidate with the highest
//!   [`Candidate`] wins: highest ratio, then smallest top offset.
//!   Exact ties go to the region registered first, so the outcome never
//!   depends on the order of records inside a batch.
//! - The selection only changes when the winner differs. When no candidate
//!   remains, the last selection is kept; navigation does not flicker to
//!   "nothing" while the user scrolls through a gap between sections.
//!
//! ## Lifecycle
//!
//! [`ActiveSection::register`] subscribes one observation per identifier
//! that resolves to an element. [`ActiveSection::unregister`] and
//! [`ActiveSection::teardown`] release subscriptions synchronously; records
//! that were already in flight for them are ignored.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use lookout_observe::Viewport;
//! use lookout_tracker::active::ActiveSection;
//!
//! let mut page = Viewport::new(Size::new(800.0, 600.0));
//! page.insert_named("shoots", Rect::new(0.0, 0.0, 800.0, 700.0));
//! page.insert_named("about-me", Rect::new(0.0, 700.0, 800.0, 1400.0));
//!
//! let mut active = ActiveSection::new();
//! active.register(["shoots", "about-me"], &mut page);
//! assert_eq!(active.current(), None); // measurements are not in yet
//!
//! active.process(&page.take_records());
//! assert_eq!(active.current(), Some(&"shoots"));
//!
//! page.scroll_to(900.0);
//! active.process(&page.take_records());
//! assert_eq!(active.current(), Some(&"about-me"));
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use log::{debug, trace};
use lookout_observe::{ElementLookup, ObservationSource, ObserverOptions, Record, SubscriptionId};

use crate::signal::{ListenerId, Signal};
use crate::types::Candidate;

#[derive(Clone, Debug)]
struct Region<K> {
    key: K,
    subscription: SubscriptionId,
    candidate: Option<Candidate>,
}

/// Tracks the most relevant of a set of named regions.
///
/// ## Usage
///
/// - Construct with [`ActiveSection::new`] (section-tracking observer
///   options) or [`ActiveSection::with_options`].
/// - [`register`](Self::register) identifiers against a host that can both
///   resolve and observe elements.
/// - Feed every batch of records from the host to [`process`](Self::process).
/// - Read [`current`](Self::current) or [`subscribe`](Self::subscribe) to
///   changes.
/// - [`teardown`](Self::teardown) when the page goes away.
pub struct ActiveSection<K> {
    options: ObserverOptions,
    regions: Vec<Region<K>>,
    selection: Signal<Option<K>>,
}

impl<K: Debug> Debug for ActiveSection<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActiveSection")
            .field("regions", &self.regions.len())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Debug> Default for ActiveSection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Debug> ActiveSection<K> {
    /// Create a tracker using [`ObserverOptions::active_section`].
    pub fn new() -> Self {
        Self::with_options(ObserverOptions::active_section())
    }

    /// Create a tracker with explicit observer options.
    pub fn with_options(options: ObserverOptions) -> Self {
        Self {
            options,
            regions: Vec::new(),
            selection: Signal::new(None),
        }
    }

    /// Observer options used for every registered region.
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Begin observing each identifier in `ids`, in order.
    ///
    /// Identifiers that do not resolve to an element, and identifiers that are
    /// already registered, are skipped. Returns the number of regions added.
    pub fn register<H>(&mut self, ids: impl IntoIterator<Item = K>, host: &mut H) -> usize
    where
        H: ObservationSource + ElementLookup<K, Element = <H as ObservationSource>::Element>,
    {
        let mut added = 0;
        for key in ids {
            if self.is_registered(&key) {
                debug!("region {key:?} already registered");
                continue;
            }
            let Some(element) = host.element_of(&key) else {
                debug!("no element for region {key:?}, skipping");
                continue;
            };
            let subscription = host.observe(element, &self.options);
            self.regions.push(Region {
                key,
                subscription,
                candidate: None,
            });
            added += 1;
        }
        added
    }

    /// Stop observing one region and drop it from consideration.
    ///
    /// If it was a candidate, the selection is recomputed over the remaining
    /// candidates (and kept as is when none remain). Returns false if `key`
    /// was not registered.
    pub fn unregister<S: ObservationSource>(&mut self, key: &K, source: &mut S) -> bool {
        let Some(pos) = self.regions.iter().position(|r| &r.key == key) else {
            return false;
        };
        let region = self.regions.remove(pos);
        source.release(region.subscription);
        if region.candidate.is_some() {
            self.reselect();
        }
        true
    }

    /// Stop observing every region. Safe to call repeatedly.
    ///
    /// The current selection is kept.
    pub fn teardown<S: ObservationSource>(&mut self, source: &mut S) {
        for region in self.regions.drain(..) {
            source.release(region.subscription);
        }
    }

    /// Apply a batch of records and recompute the selection.
    ///
    /// Records for subscriptions this tracker does not own (other consumers,
    /// or regions already unregistered) are ignored. Returns true if the
    /// selection changed.
    pub fn process(&mut self, batch: &[Record]) -> bool {
        let mut applied = 0_usize;
        for record in batch {
            let Some(region) = self
                .regions
                .iter_mut()
                .find(|r| r.subscription == record.subscription)
            else {
                continue;
            };
            region.candidate = record
                .measurement
                .is_intersecting
                .then(|| Candidate::from(&record.measurement));
            applied += 1;
        }
        if applied == 0 {
            return false;
        }
        trace!("applied {applied} of {} records", batch.len());
        self.reselect()
    }

    fn reselect(&mut self) -> bool {
        // Single pass; a later region must be strictly better to replace an
        // earlier one.
        let mut best: Option<(usize, Candidate)> = None;
        for (i, region) in self.regions.iter().enumerate() {
            let Some(candidate) = region.candidate else {
                continue;
            };
            match best {
                Some((_, b)) if candidate <= b => {}
                _ => best = Some((i, candidate)),
            }
        }
        let Some((i, _)) = best else {
            return false;
        };
        let key = &self.regions[i].key;
        if self.selection.get().as_ref() == Some(key) {
            return false;
        }
        debug!("active region -> {key:?}");
        self.selection.set(Some(key.clone()))
    }

    /// The current selection, if any region has been selected yet.
    pub fn current(&self) -> Option<&K> {
        self.selection.get().as_ref()
    }

    /// The underlying signal.
    pub fn selection(&self) -> &Signal<Option<K>> {
        &self.selection
    }

    /// Listen for selection changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&Option<K>) + 'static) -> ListenerId {
        self.selection.subscribe(listener)
    }

    /// Remove a selection listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.selection.unsubscribe(id)
    }

    /// Returns true if `key` is registered.
    pub fn is_registered(&self, key: &K) -> bool {
        self.regions.iter().any(|r| &r.key == key)
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if no region is registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Current candidates, in registration order.
    pub fn candidates(&self) -> impl Iterator<Item = (&K, Candidate)> + '_ {
        self.regions
            .iter()
            .filter_map(|r| r.candidate.map(|c| (&r.key, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn tracked(names: &[&'static str]) -> (ActiveSection<&'static str>, FakeSource) {
        let mut source = FakeSource::with_elements(names);
        let mut active = ActiveSection::new();
        active.register(names.iter().copied(), &mut source);
        (active, source)
    }

    #[test]
    fn equal_ratio_breaks_tie_by_smaller_top() {
        let (mut active, src) = tracked(&["a", "b", "c"]);
        let batch = [src.hit("a", 0.6, 120.0), src.hit("b", 0.6, 40.0), src.miss("c")];
        assert!(active.process(&batch));
        assert_eq!(active.current(), Some(&"b"));

        // Only `a` reports; `b` stays cached at 0.6.
        assert!(active.process(&[src.hit("a", 0.9, 120.0)]));
        assert_eq!(active.current(), Some(&"a"));
    }

    #[test]
    fn batch_order_does_not_matter() {
        let (mut fwd, src) = tracked(&["a", "b", "c"]);
        let batch = vec![
            src.hit("a", 0.5, 10.0),
            src.hit("b", 0.75, 300.0),
            src.hit("c", 0.75, 200.0),
        ];
        fwd.process(&batch);

        let mut rev = ActiveSection::new();
        let mut src2 = FakeSource::with_elements(&["a", "b", "c"]);
        rev.register(["a", "b", "c"], &mut src2);
        let mut reversed = vec![
            src2.hit("a", 0.5, 10.0),
            src2.hit("b", 0.75, 300.0),
            src2.hit("c", 0.75, 200.0),
        ];
        reversed.reverse();
        rev.process(&reversed);

        assert_eq!(fwd.current(), Some(&"c"));
        assert_eq!(rev.current(), fwd.current());
    }

    #[test]
    fn exact_tie_goes_to_first_registered() {
        let (mut active, src) = tracked(&["a", "b"]);
        active.process(&[src.hit("b", 0.5, 0.0), src.hit("a", 0.5, 0.0)]);
        assert_eq!(active.current(), Some(&"a"));
    }

    // Regression: the selection is sticky once nothing intersects.
    #[test]
    fn empty_candidate_set_keeps_last_selection() {
        let (mut active, src) = tracked(&["a", "b"]);
        active.process(&[src.hit("a", 1.0, 0.0)]);
        assert_eq!(active.current(), Some(&"a"));
        assert!(!active.process(&[src.miss("a"), src.miss("b")]));
        assert_eq!(active.current(), Some(&"a"));
        assert_eq!(active.candidates().count(), 0);
    }

    #[test]
    fn non_intersecting_only_batch_leaves_unset() {
        let (mut active, src) = tracked(&["a"]);
        assert!(!active.process(&[src.miss("a")]));
        assert_eq!(active.current(), None);
    }

    #[test]
    fn zero_ratio_intersecting_region_is_still_a_candidate() {
        let (mut active, src) = tracked(&["a"]);
        assert!(active.process(&[src.hit("a", 0.0, 550.0)]));
        assert_eq!(active.current(), Some(&"a"));
    }

    #[test]
    fn missing_elements_and_duplicates_are_skipped() {
        let mut source = FakeSource::with_elements(&["a", "c"]);
        let mut active = ActiveSection::new();
        assert_eq!(active.register(["a", "b", "c", "a"], &mut source), 2);
        assert!(active.is_registered(&"a"));
        assert!(!active.is_registered(&"b"));
        assert_eq!(source.live_count(), 2);
        assert_eq!(
            source.options_of("a"),
            Some(&ObserverOptions::active_section())
        );
    }

    #[test]
    fn unregistered_region_ignores_in_flight_records() {
        let (mut active, mut src) = tracked(&["a", "b"]);
        active.process(&[src.hit("a", 0.3, 0.0)]);
        let stale = src.hit("b", 1.0, 0.0);
        assert!(active.unregister(&"b", &mut src));
        assert!(!active.unregister(&"b", &mut src));
        assert!(!active.process(&[stale]));
        assert_eq!(active.current(), Some(&"a"));
        assert_eq!(src.live_count(), 1);
    }

    #[test]
    fn unregistering_the_winner_promotes_the_runner_up() {
        let (mut active, mut src) = tracked(&["a", "b"]);
        active.process(&[src.hit("a", 0.9, 0.0), src.hit("b", 0.4, 500.0)]);
        assert_eq!(active.current(), Some(&"a"));
        active.unregister(&"a", &mut src);
        assert_eq!(active.current(), Some(&"b"));
    }

    #[test]
    fn teardown_is_idempotent_and_ignores_stale_records() {
        let (mut active, mut src) = tracked(&["a", "b"]);
        active.process(&[src.hit("a", 0.5, 0.0)]);
        let stale = src.hit("b", 1.0, 0.0);
        active.teardown(&mut src);
        active.teardown(&mut src);
        assert_eq!(src.live_count(), 0);
        assert!(active.is_empty());
        assert!(!active.process(&[stale]));
        assert_eq!(active.current(), Some(&"a"));
    }

    #[test]
    fn teardown_before_any_measurement_leaks_nothing() {
        let (mut active, mut src) = tracked(&["a", "b", "c"]);
        assert_eq!(src.live_count(), 3);
        active.teardown(&mut src);
        assert_eq!(src.live_count(), 0);
        assert_eq!(active.current(), None);
    }

    #[test]
    fn listeners_see_each_change_once() {
        let (mut active, src) = tracked(&["a", "b"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        active.subscribe(move |v| sink.borrow_mut().push(*v));

        active.process(&[src.hit("a", 0.5, 0.0)]);
        active.process(&[src.hit("a", 0.75, 0.0)]); // still `a`
        active.process(&[src.hit("b", 1.0, 100.0)]);
        assert_eq!(*seen.borrow(), vec![Some("a"), Some("b")]);
    }

    #[test]
    fn later_record_for_same_region_in_one_batch_wins() {
        let (mut active, src) = tracked(&["a", "b"]);
        active.process(&[src.hit("b", 0.5, 0.0)]);
        active.process(&[src.hit("a", 1.0, 0.0), src.miss("a")]);
        assert_eq!(active.current(), Some(&"b"));
    }

    #[test]
    fn debug_shows_region_count_and_selection() {
        let (mut active, src) = tracked(&["a", "b"]);
        active.process(&[src.hit("a", 0.5, 0.0)]);
        let shown = alloc::format!("{active:?}");
        assert!(shown.starts_with("ActiveSection { regions: 2"));
        assert!(shown.contains("Some(\"a\")"));
    }
}
