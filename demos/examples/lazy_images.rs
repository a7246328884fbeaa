// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy image grid: deferred sources are promoted as rows approach the viewport.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p lookout_demos --example lazy_images`

use kurbo::{Rect, Size};
use lookout_observe::Viewport;
use lookout_tracker::preload::{ImageState, LazyImages};

const ROWS: usize = 4;
const COLS: usize = 3;

fn main() {
    env_logger::init();

    let mut page = Viewport::new(Size::new(960.0, 720.0));
    let mut images = LazyImages::new();
    let mut keys = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            let x = col as f64 * 320.0;
            let y = row as f64 * 300.0;
            let el = page.insert(Rect::new(x, y, x + 300.0, y + 280.0));
            let src = format!("/images/photo-sessions/{row}-{col}.jpg");
            keys.push(images.watch(el, src, &mut page));
        }
    }

    for scroll in [0.0, 500.0] {
        page.scroll_to(scroll);
        let started = images.process(&page.take_records(), &mut page);
        println!("y={scroll:>5.0}  loading {} images", started.len());
        for (key, src) in started {
            println!("  {src}");
            // Pretend the network is instant.
            images.mark_loaded(key);
        }
    }

    assert_eq!(images.pending_count(), 0);
    assert!(keys.iter().all(|k| images.state(*k) == Some(ImageState::Loaded)));
    assert_eq!(page.subscription_count(), 0);

    // Unmount the gallery.
    images.clear(&mut page);
    assert!(images.is_empty());
    assert_eq!(images.state(keys[0]), None);
}
