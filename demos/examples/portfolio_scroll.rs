// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active section highlighting while scrolling a portfolio page.
//!
//! Scrolls through the four sections, jumps to one through a nav link,
//! then scrolls past the end to show that the highlight stays put.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p lookout_demos --example portfolio_scroll`

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use lookout_observe::Viewport;
use lookout_tracker::active::ActiveSection;
use lookout_tracker::header::HeaderVisibility;
use lookout_tracker::nav::{HEADER_OFFSET, PORTFOLIO_SECTIONS, nav_state, scroll_target};

const WIDTH: f64 = 1280.0;

fn main() {
    env_logger::init();

    let mut page = Viewport::new(Size::new(WIDTH, 720.0));
    let heights = [1100.0, 900.0, 1200.0, 700.0];
    let mut y = 0.0;
    for (id, h) in PORTFOLIO_SECTIONS.iter().zip(heights) {
        page.insert_named(*id, Rect::new(0.0, y, WIDTH, y + h));
        y += h;
    }

    let mut active = ActiveSection::new();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    active.subscribe(move |s: &Option<&'static str>| sink.borrow_mut().push(*s));
    active.register(PORTFOLIO_SECTIONS, &mut page);

    let mut header = HeaderVisibility::default();
    let mut now = Duration::ZERO;

    let mut step = |page: &mut Viewport, active: &mut ActiveSection<&'static str>, label: &str| {
        now += Duration::from_millis(1500);
        header.activity(now);
        active.process(&page.take_records());
        let links: Vec<_> = nav_state(&PORTFOLIO_SECTIONS, active.current())
            .into_iter()
            .map(|item| if item.active { format!("[{}]", item.key) } else { item.key.to_string() })
            .collect();
        println!("{label:>14} y={:>6.0}  {}", page.scroll_y(), links.join("  "));
    };

    step(&mut page, &mut active, "load");
    page.scroll_to(800.0);
    step(&mut page, &mut active, "scroll");

    // Nav click: land the section just below the fixed header.
    let sketchup = page.element_named("sketchup").unwrap();
    let client_top = page.client_rect(sketchup).unwrap().y0;
    page.scroll_to(scroll_target(client_top, page.scroll_y(), HEADER_OFFSET));
    step(&mut page, &mut active, "nav sketchup");

    page.scroll_to(3300.0);
    step(&mut page, &mut active, "scroll");
    page.scroll_to(4000.0);
    step(&mut page, &mut active, "past the end");

    assert_eq!(
        *changes.borrow(),
        vec![
            Some("photo-sessions"),
            Some("shoots"),
            Some("sketchup"),
            Some("about-me"),
        ]
    );
    assert_eq!(active.current(), Some(&"about-me"));

    let idle = now + HeaderVisibility::DEFAULT_HIDE_DELAY;
    assert!(header.tick(idle));
    println!("header hidden after {:?} idle", HeaderVisibility::DEFAULT_HIDE_DELAY);

    active.teardown(&mut page);
    assert_eq!(page.subscription_count(), 0);
}
