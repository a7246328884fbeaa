// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveals for a column of cards, with and without reduced motion.
//!
//! Run:
//! - `cargo run -p lookout_demos --example section_reveal`

use kurbo::{Rect, Size};
use lookout_observe::Viewport;
use lookout_tracker::reveal::{Reveal, RevealOptions};

const CARDS: usize = 6;

fn run(reduced_motion: bool) {
    let mut page = Viewport::new(Size::new(800.0, 720.0));
    let mut reveals: Vec<Reveal> = (0..CARDS)
        .map(|i| {
            let y = i as f64 * 400.0;
            let card = page.insert(Rect::new(0.0, y, 800.0, y + 300.0));
            Reveal::attach(card, &RevealOptions::default(), &reduced_motion, &mut page)
        })
        .collect();

    println!("== reduced motion: {reduced_motion} ==");
    let mut revealed_before = 0;
    for scroll in (0_u32..=8).map(|s| f64::from(s) * 300.0) {
        page.scroll_to(scroll);
        let batch = page.take_records();
        for r in &mut reveals {
            r.process(&batch, &mut page);
        }
        let revealed = reveals.iter().filter(|r| r.is_revealed()).count();
        assert!(revealed >= revealed_before);
        revealed_before = revealed;
        println!(
            "  y={scroll:>6.0}  revealed {revealed}/{CARDS}  observing {}",
            page.subscription_count()
        );
    }

    assert!(reveals.iter().all(Reveal::is_revealed));
    assert_eq!(page.subscription_count(), 0);
}

fn main() {
    run(false);
    run(true);
}
