// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted observation source for unit tests.

use alloc::vec::Vec;

use lookout_observe::{
    ElementLookup, Measurement, ObservationSource, ObserverOptions, Record, SubscriptionId,
};

/// Elements are plain names; records are built by hand.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    present: Vec<&'static str>,
    live: Vec<(SubscriptionId, &'static str, ObserverOptions)>,
    next_slot: u32,
}

impl FakeSource {
    pub(crate) fn with_elements(names: &[&'static str]) -> Self {
        Self {
            present: names.to_vec(),
            ..Self::default()
        }
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn subscription_of(&self, name: &str) -> Option<SubscriptionId> {
        self.live
            .iter()
            .rev()
            .find(|(_, n, _)| *n == name)
            .map(|(s, _, _)| *s)
    }

    pub(crate) fn options_of(&self, name: &str) -> Option<&ObserverOptions> {
        self.live
            .iter()
            .rev()
            .find(|(_, n, _)| *n == name)
            .map(|(_, _, o)| o)
    }

    pub(crate) fn hit(&self, name: &str, ratio: f64, top: f64) -> Record {
        Record {
            subscription: self.subscription_of(name).expect("element is observed"),
            measurement: Measurement {
                is_intersecting: true,
                intersection_ratio: ratio,
                top_offset: top,
            },
        }
    }

    pub(crate) fn miss(&self, name: &str) -> Record {
        Record {
            subscription: self.subscription_of(name).expect("element is observed"),
            measurement: Measurement::outside(900.0),
        }
    }
}

impl ObservationSource for FakeSource {
    type Element = &'static str;

    fn observe(&mut self, element: &'static str, options: &ObserverOptions) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_slot, 1);
        self.next_slot += 1;
        self.live.push((id, element, options.clone()));
        id
    }

    fn release(&mut self, subscription: SubscriptionId) {
        self.live.retain(|(s, _, _)| *s != subscription);
    }
}

impl ElementLookup<&'static str> for FakeSource {
    type Element = &'static str;

    fn element_of(&self, key: &&'static str) -> Option<&'static str> {
        self.present.iter().copied().find(|n| n == key)
    }
}
