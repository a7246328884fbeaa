// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor navigation helpers: link highlighting and scroll targets.

use alloc::vec::Vec;

/// Section identifiers of the portfolio page, in page order.
pub const PORTFOLIO_SECTIONS: [&str; 4] = ["photo-sessions", "shoots", "sketchup", "about-me"];

/// Height of the fixed header that a scrolled-to section must clear.
pub const HEADER_OFFSET: f64 = 80.0;

/// Page offset to scroll to so an element lands just below the header.
///
/// `client_top` is the element's top relative to the viewport and
/// `page_offset` the current scroll offset. Never negative.
pub fn scroll_target(client_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    (client_top + page_offset - header_offset).max(0.0)
}

/// A navigation link and whether it is highlighted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NavItem<'a, K> {
    /// Section the link points at.
    pub key: &'a K,
    /// True if the section is the active one.
    pub active: bool,
}

/// Highlight state for each link, given the active selection.
pub fn nav_state<'a, K: PartialEq>(links: &'a [K], selection: Option<&K>) -> Vec<NavItem<'a, K>> {
    links
        .iter()
        .map(|key| NavItem {
            key,
            active: selection == Some(key),
        })
        .collect()
}
