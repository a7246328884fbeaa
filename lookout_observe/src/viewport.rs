// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic observation source: a scrollable viewport over page-space rectangles.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Rect, Size};

use crate::source::{ElementLookup, ObservationSource};
use crate::types::{
    ElementFlags, ElementId, Measurement, ObserverOptions, Record, SubscriptionId,
};

/// Generational slot storage shared by elements and subscriptions.
#[derive(Clone, Debug)]
struct Slots<T> {
    entries: Vec<Option<T>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles use 32-bit slot indices by design."
    )]
    fn insert(&mut self, value: T) -> (u32, u32) {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.entries[idx] = Some(value);
            (idx, generation)
        } else {
            self.entries.push(Some(value));
            self.generations.push(1);
            (self.entries.len() - 1, 1)
        };
        (idx as u32, generation)
    }

    fn is_alive(&self, idx: usize, generation: u32) -> bool {
        self.generations.get(idx) == Some(&generation)
            && self.entries.get(idx).is_some_and(Option::is_some)
    }

    fn get(&self, idx: usize, generation: u32) -> Option<&T> {
        if !self.is_alive(idx, generation) {
            return None;
        }
        self.entries[idx].as_ref()
    }

    fn get_mut(&mut self, idx: usize, generation: u32) -> Option<&mut T> {
        if !self.is_alive(idx, generation) {
            return None;
        }
        self.entries[idx].as_mut()
    }

    fn remove(&mut self, idx: usize, generation: u32) -> Option<T> {
        if !self.is_alive(idx, generation) {
            return None;
        }
        self.free_list.push(idx);
        self.entries[idx].take()
    }

    fn len(&self) -> usize {
        self.entries.len() - self.free_list.len()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles use 32-bit slot indices by design."
    )]
    fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        self.entries
            .iter()
            .zip(&self.generations)
            .enumerate()
            .filter_map(|(i, (e, &g))| e.as_ref().map(|v| (i as u32, g, v)))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles use 32-bit slot indices by design."
    )]
    fn iter_mut(&mut self) -> impl Iterator<Item = (u32, u32, &mut T)> + '_ {
        self.entries
            .iter_mut()
            .zip(&self.generations)
            .enumerate()
            .filter_map(|(i, (e, &g))| e.as_mut().map(|v| (i as u32, g, v)))
    }
}

#[derive(Clone, Debug)]
struct Element {
    bounds: Rect,
    flags: ElementFlags,
    name: Option<String>,
}

/// Last state delivered for a subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Reported {
    intersecting: bool,
    threshold: usize,
}

#[derive(Clone, Debug)]
struct Subscription {
    element: ElementId,
    options: ObserverOptions,
    last: Option<Reported>,
}

/// A vertically scrollable viewport over a page of rectangular elements.
///
/// Elements live in page space. The visible rectangle is the viewport size
/// placed at the current scroll offset. Every subscription is measured
/// against that rectangle grown or shrunk by its own root margin.
///
/// Measurement is deferred: mutating calls only change state, and
/// [`update`](Self::update) (or [`take_records`](Self::take_records), which
/// calls it) measures every subscription and queues a [`Record`] when either
/// the intersecting state or the threshold band changed since the last
/// delivered record. A fresh subscription always gets one initial record.
///
/// ```
/// use kurbo::{Rect, Size};
/// use lookout_observe::{ObservationSource, ObserverOptions, Viewport};
///
/// let mut viewport = Viewport::new(Size::new(800.0, 600.0));
/// let about = viewport.insert_named("about-me", Rect::new(0.0, 900.0, 800.0, 1500.0));
/// let sub = viewport.observe(about, &ObserverOptions::default());
///
/// // Below the fold.
/// let first = viewport.take_records();
/// assert_eq!(first.len(), 1);
/// assert!(!first[0].measurement.is_intersecting);
///
/// viewport.scroll_to(700.0);
/// let next = viewport.take_records();
/// assert_eq!(next[0].subscription, sub);
/// assert!(next[0].measurement.is_intersecting);
/// ```
pub struct Viewport {
    size: Size,
    scroll_y: f64,
    elements: Slots<Element>,
    subscriptions: Slots<Subscription>,
    pending: Vec<Record>,
}

impl core::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Viewport")
            .field("size", &self.size)
            .field("scroll_y", &self.scroll_y)
            .field("elements_alive", &self.elements.len())
            .field("subscriptions_alive", &self.subscriptions.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Viewport {
    /// Create an empty viewport of the given size, scrolled to the top.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            scroll_y: 0.0,
            elements: Slots::default(),
            subscriptions: Slots::default(),
            pending: Vec::new(),
        }
    }

    /// Insert an anonymous element with page-space `bounds`.
    pub fn insert(&mut self, bounds: Rect) -> ElementId {
        self.insert_element(Element {
            bounds,
            flags: ElementFlags::default(),
            name: None,
        })
    }

    /// Insert an element that can be found by `name` through [`ElementLookup`].
    pub fn insert_named(&mut self, name: impl Into<String>, bounds: Rect) -> ElementId {
        self.insert_element(Element {
            bounds,
            flags: ElementFlags::default(),
            name: Some(name.into()),
        })
    }

    fn insert_element(&mut self, element: Element) -> ElementId {
        let (idx, generation) = self.elements.insert(element);
        ElementId::new(idx, generation)
    }

    /// Remove an element. Subscriptions that still point at it report one
    /// final non-intersecting record (if needed) and then stay quiet.
    pub fn remove(&mut self, id: ElementId) {
        let _ = self.elements.remove(id.idx(), id.1);
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements.is_alive(id.idx(), id.1)
    }

    /// Page-space bounds of an element.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id.idx(), id.1).map(|e| e.bounds)
    }

    /// Element bounds relative to the viewport, like a client rect.
    pub fn client_rect(&self, id: ElementId) -> Option<Rect> {
        self.bounds(id).map(|b| {
            Rect::new(b.x0, b.y0 - self.scroll_y, b.x1, b.y1 - self.scroll_y)
        })
    }

    /// Move or resize an element. Returns false for a stale id.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) -> bool {
        match self.elements.get_mut(id.idx(), id.1) {
            Some(e) => {
                e.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Replace an element's flags. Returns false for a stale id.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) -> bool {
        match self.elements.get_mut(id.idx(), id.1) {
            Some(e) => {
                e.flags = flags;
                true
            }
            None => false,
        }
    }

    /// First live element carrying `name`.
    pub fn element_named(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, _, e)| e.name.as_deref() == Some(name))
            .map(|(idx, generation, _)| ElementId::new(idx, generation))
    }

    /// Number of live elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Viewport size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the viewport.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Current vertical scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll to an absolute offset. Negative and NaN offsets clamp to zero.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.scroll_y + dy);
    }

    /// The visible rectangle in page space.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.size.width,
            self.scroll_y + self.size.height,
        )
    }

    /// Measure every live subscription and queue records for the ones whose
    /// intersecting state or threshold band changed.
    pub fn update(&mut self) {
        let visible = self.visible_rect();
        let before = self.pending.len();
        let Self {
            elements,
            subscriptions,
            pending,
            ..
        } = self;
        for (idx, generation, sub) in subscriptions.iter_mut() {
            let measurement = match elements.get(sub.element.idx(), sub.element.1) {
                Some(e) if e.flags.contains(ElementFlags::VISIBLE) => Measurement::compute(
                    sub.options.root_margin.apply(visible),
                    visible.y0,
                    e.bounds,
                ),
                Some(e) => Measurement::outside(e.bounds.y0 - visible.y0),
                None => Measurement::outside(0.0),
            };
            let reported = Reported {
                intersecting: measurement.is_intersecting,
                threshold: if measurement.is_intersecting {
                    sub.options
                        .thresholds
                        .index_of(measurement.intersection_ratio)
                } else {
                    0
                },
            };
            if sub.last != Some(reported) {
                sub.last = Some(reported);
                pending.push(Record {
                    subscription: SubscriptionId::new(idx, generation),
                    measurement,
                });
            }
        }
        let queued = self.pending.len() - before;
        if queued > 0 {
            log::trace!("viewport at y={} queued {queued} records", self.scroll_y);
        }
    }

    /// Measure, then drain every queued record as one batch.
    pub fn take_records(&mut self) -> Vec<Record> {
        self.update();
        core::mem::take(&mut self.pending)
    }
}

impl ObservationSource for Viewport {
    type Element = ElementId;

    fn observe(&mut self, element: ElementId, options: &ObserverOptions) -> SubscriptionId {
        let (idx, generation) = self.subscriptions.insert(Subscription {
            element,
            options: options.clone(),
            last: None,
        });
        SubscriptionId::new(idx, generation)
    }

    fn release(&mut self, subscription: SubscriptionId) {
        let idx = subscription.slot() as usize;
        if self
            .subscriptions
            .remove(idx, subscription.generation())
            .is_some()
        {
            self.pending.retain(|r| r.subscription != subscription);
        }
    }
}

impl ElementLookup<str> for Viewport {
    type Element = ElementId;

    fn element_of(&self, key: &str) -> Option<ElementId> {
        self.element_named(key)
    }
}

impl ElementLookup<String> for Viewport {
    type Element = ElementId;

    fn element_of(&self, key: &String) -> Option<ElementId> {
        self.element_named(key)
    }
}

impl<'a> ElementLookup<&'a str> for Viewport {
    type Element = ElementId;

    fn element_of(&self, key: &&'a str) -> Option<ElementId> {
        self.element_named(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Viewport, ElementId, ElementId) {
        let mut v = Viewport::new(Size::new(800.0, 600.0));
        let a = v.insert_named("a", Rect::new(0.0, 0.0, 800.0, 400.0));
        let b = v.insert_named("b", Rect::new(0.0, 400.0, 800.0, 1000.0));
        (v, a, b)
    }

    #[test]
    fn first_measurement_is_deferred_then_always_delivered() {
        let (mut v, _a, b) = page();
        let sub = v.observe(b, &ObserverOptions::default());
        assert!(v.pending.is_empty());
        let batch = v.take_records();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].subscription, sub);
        assert_eq!(batch[0].measurement.intersection_ratio, 200.0 / 600.0);
        assert_eq!(batch[0].measurement.top_offset, 400.0);

        // Nothing changed, nothing to report.
        assert!(v.take_records().is_empty());
    }

    #[test]
    fn records_only_on_threshold_band_change() {
        let (mut v, a, b) = page();
        let opts = ObserverOptions::active_section();
        let sa = v.observe(a, &opts);
        let sb = v.observe(b, &opts);
        let initial = v.take_records();
        assert_eq!(initial.len(), 2);
        let ra = initial.iter().find(|r| r.subscription == sa).unwrap();
        assert_eq!(ra.measurement.intersection_ratio, 350.0 / 400.0);
        let rb = initial.iter().find(|r| r.subscription == sb).unwrap();
        assert_eq!(rb.measurement.intersection_ratio, 0.25);

        // a drops from 0.875 to 0.625 (band 4 -> 3); b moves within band 2.
        v.scroll_to(100.0);
        let batch = v.take_records();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].subscription, sa);
        assert_eq!(batch[0].measurement.intersection_ratio, 250.0 / 400.0);
        assert_eq!(batch[0].measurement.top_offset, -100.0);
    }

    #[test]
    fn negative_margin_requires_crossing_into_view() {
        let mut v = Viewport::new(Size::new(800.0, 600.0));
        let c = v.insert(Rect::new(0.0, 580.0, 800.0, 700.0));
        let plain = v.observe(c, &ObserverOptions::default());
        let inset = v.observe(c, &ObserverOptions::active_section());
        let batch = v.take_records();
        let m = |s| {
            batch
                .iter()
                .find(|r| r.subscription == s)
                .unwrap()
                .measurement
        };
        assert!(m(plain).is_intersecting);
        assert!(!m(inset).is_intersecting);
    }

    #[test]
    fn release_drops_pending_records() {
        let (mut v, a, b) = page();
        let sa = v.observe(a, &ObserverOptions::default());
        let sb = v.observe(b, &ObserverOptions::default());
        v.update();
        v.release(sa);
        let batch = v.take_records();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].subscription, sb);
        assert_eq!(v.subscription_count(), 1);

        // Double release is a no-op.
        v.release(sa);
        assert_eq!(v.subscription_count(), 1);
    }

    #[test]
    fn removed_element_reports_once_then_goes_quiet() {
        let (mut v, a, _b) = page();
        let sa = v.observe(a, &ObserverOptions::default());
        assert!(v.take_records()[0].measurement.is_intersecting);
        v.remove(a);
        let batch = v.take_records();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].subscription, sa);
        assert!(!batch[0].measurement.is_intersecting);
        v.scroll_to(50.0);
        assert!(v.take_records().is_empty());
    }

    #[test]
    fn hidden_elements_never_intersect() {
        let (mut v, a, _b) = page();
        let sa = v.observe(a, &ObserverOptions::default());
        let _ = v.take_records();
        assert!(v.set_flags(a, ElementFlags::empty()));
        let batch = v.take_records();
        assert_eq!(batch[0].subscription, sa);
        assert_eq!(batch[0].measurement, Measurement::outside(0.0));
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let (mut v, a, _b) = page();
        v.remove(a);
        let c = v.insert(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_ne!(a, c);
        assert!(!v.is_alive(a));
        assert!(v.is_alive(c));
        assert!(!v.set_bounds(a, Rect::ZERO));
        assert_eq!(v.bounds(c), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn lookup_by_name_and_scroll_clamp() {
        let (mut v, a, b) = page();
        assert_eq!(v.element_of("a"), Some(a));
        assert_eq!(v.element_of(&String::from("b")), Some(b));
        assert_eq!(v.element_of("missing"), None);

        v.scroll_by(-20.0);
        assert_eq!(v.scroll_y(), 0.0);
        v.scroll_to(250.0);
        assert_eq!(v.client_rect(b).map(|r| r.y0), Some(150.0));
    }
}
