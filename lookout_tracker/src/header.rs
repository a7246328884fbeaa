// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-hiding header: shown on user activity, hidden after a quiet period.
//!
//! Time is supplied by the host as a [`Duration`] since any fixed epoch, so
//! the state machine has no clock of its own.

use core::time::Duration;

use log::trace;

/// Visibility of a header that hides itself after `hide_delay` without activity.
///
/// ```
/// use core::time::Duration;
/// use lookout_tracker::header::HeaderVisibility;
///
/// let mut header = HeaderVisibility::default();
/// header.activity(Duration::from_millis(0));
/// assert!(!header.tick(Duration::from_millis(2999)));
/// assert!(header.tick(Duration::from_millis(3000)));
/// assert!(!header.is_visible());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderVisibility {
    hide_delay: Duration,
    visible: bool,
    hide_at: Option<Duration>,
}

impl Default for HeaderVisibility {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HIDE_DELAY)
    }
}

impl HeaderVisibility {
    /// Quiet period before the header hides.
    pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

    /// A visible header with no hide scheduled yet.
    pub const fn new(hide_delay: Duration) -> Self {
        Self {
            hide_delay,
            visible: true,
            hide_at: None,
        }
    }

    /// Returns true while the header is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pending hide deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.hide_at
    }

    /// Mouse move, touch or scroll at `now`: show the header and restart the
    /// hide timer. Returns true if the header was hidden before.
    pub fn activity(&mut self, now: Duration) -> bool {
        let was_hidden = !self.visible;
        self.visible = true;
        self.hide_at = Some(now.saturating_add(self.hide_delay));
        was_hidden
    }

    /// Advance to `now`. Returns true if the header hid on this call.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.hide_at {
            Some(at) if now >= at => {
                self.hide_at = None;
                let hid = self.visible;
                self.visible = false;
                if hid {
                    trace!("header hidden at {now:?}");
                }
                hid
            }
            _ => false,
        }
    }

    /// Cancel any pending hide, leaving visibility as is.
    pub fn teardown(&mut self) {
        self.hide_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn visible_until_first_activity_expires() {
        let mut h = HeaderVisibility::default();
        assert!(h.is_visible());
        assert!(!h.tick(ms(60_000)));
        assert!(h.is_visible());
    }

    #[test]
    fn activity_restarts_the_timer() {
        let mut h = HeaderVisibility::default();
        h.activity(ms(0));
        h.activity(ms(2000));
        assert!(!h.tick(ms(3000)));
        assert_eq!(h.deadline(), Some(ms(5000)));
        assert!(h.tick(ms(5000)));
        assert!(!h.is_visible());
    }

    #[test]
    fn activity_after_hide_shows_again() {
        let mut h = HeaderVisibility::new(ms(100));
        h.activity(ms(0));
        assert!(h.tick(ms(150)));
        assert!(h.activity(ms(200)));
        assert!(h.is_visible());
        assert!(!h.activity(ms(210)));
    }

    #[test]
    fn teardown_cancels_pending_hide() {
        let mut h = HeaderVisibility::default();
        h.activity(ms(0));
        h.teardown();
        assert!(!h.tick(ms(10_000)));
        assert!(h.is_visible());
    }
}
