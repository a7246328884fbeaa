// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal latch for scroll-triggered animations.
//!
//! A [`Reveal`] is `Pending` until the first record that reports its element
//! intersecting at or above the configured ratio, then `Revealed` for good.
//! The transition itself releases the subscription, so a long page with many
//! revealed elements holds no observations for them.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use lookout_observe::Viewport;
//! use lookout_tracker::reveal::{Reveal, RevealOptions};
//!
//! let mut page = Viewport::new(Size::new(800.0, 600.0));
//! let card = page.insert(Rect::new(0.0, 1000.0, 800.0, 1200.0));
//!
//! let mut reveal = Reveal::attach(card, &RevealOptions::default(), &false, &mut page);
//! reveal.process(&page.take_records(), &mut page);
//! assert!(!reveal.is_revealed());
//!
//! page.scroll_to(700.0);
//! reveal.process(&page.take_records(), &mut page);
//! assert!(reveal.is_revealed());
//! assert_eq!(page.subscription_count(), 0);
//! ```

use log::debug;
use lookout_observe::{
    Margin, ObservationSource, ObserverOptions, Record, SubscriptionId, Thresholds,
};

use crate::types::MotionPreference;

/// Configuration for a [`Reveal`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealOptions {
    /// Minimum intersection ratio that counts as revealed.
    pub threshold: f64,
    /// Root margin; the default trims 50px off the bottom so elements reveal
    /// once they are slightly inside the viewport.
    pub root_margin: Margin,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin::only_bottom(-50.0),
        }
    }
}

impl RevealOptions {
    /// Options for wrapping a whole page section, which is usually taller
    /// than the viewport and can never reach a large ratio.
    pub fn section() -> Self {
        Self {
            threshold: 0.05,
            ..Self::default()
        }
    }

    /// The threshold actually applied: NaN counts as 0, and values outside
    /// [0, 1] are clamped.
    pub fn effective_threshold(&self) -> f64 {
        if self.threshold.is_nan() {
            0.0
        } else {
            self.threshold.clamp(0.0, 1.0)
        }
    }

    /// Observer options derived from these reveal options.
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin: self.root_margin,
            thresholds: Thresholds::single(self.effective_threshold()),
        }
    }
}

/// State of a [`Reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Not revealed yet; holds the subscription while observing.
    /// `None` after [`Reveal::detach`].
    Pending(Option<SubscriptionId>),
    /// Revealed. Terminal.
    Revealed,
}

/// One-shot visibility latch for a single element.
#[derive(Clone, Debug)]
pub struct Reveal {
    state: RevealState,
    threshold: f64,
}

impl Reveal {
    /// Begin observing `element`.
    ///
    /// With reduced motion preferred, the reveal starts out revealed and
    /// nothing is observed.
    pub fn attach<S: ObservationSource>(
        element: S::Element,
        options: &RevealOptions,
        motion: &impl MotionPreference,
        source: &mut S,
    ) -> Self {
        if motion.prefers_reduced_motion() {
            debug!("reduced motion preferred, revealing without observation");
            return Self {
                state: RevealState::Revealed,
                threshold: options.effective_threshold(),
            };
        }
        let subscription = source.observe(element, &options.observer_options());
        Self {
            state: RevealState::Pending(Some(subscription)),
            threshold: options.effective_threshold(),
        }
    }

    /// Returns true once revealed.
    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Subscription held while pending.
    pub fn subscription(&self) -> Option<SubscriptionId> {
        match self.state {
            RevealState::Pending(sub) => sub,
            RevealState::Revealed => None,
        }
    }

    /// Look for a qualifying record in `batch`. Returns true only on the
    /// call that flips the latch.
    pub fn process<S: ObservationSource>(&mut self, batch: &[Record], source: &mut S) -> bool {
        let RevealState::Pending(Some(sub)) = self.state else {
            return false;
        };
        let qualifies = batch.iter().any(|r| {
            r.subscription == sub
                && r.measurement.is_intersecting
                && r.measurement.intersection_ratio >= self.threshold
        });
        if !qualifies {
            return false;
        }
        self.reveal(source);
        true
    }

    fn reveal<S: ObservationSource>(&mut self, source: &mut S) {
        if let RevealState::Pending(Some(sub)) =
            core::mem::replace(&mut self.state, RevealState::Revealed)
        {
            debug!("revealed {sub:?}");
            source.release(sub);
        }
    }

    /// Release the subscription of a pending reveal, for example when its
    /// element unmounts. A revealed latch is left alone.
    pub fn detach<S: ObservationSource>(&mut self, source: &mut S) {
        if let RevealState::Pending(Some(sub)) = self.state {
            source.release(sub);
            self.state = RevealState::Pending(None);
        }
    }
}
