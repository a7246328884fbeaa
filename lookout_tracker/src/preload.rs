// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy image loading with skeleton placeholders.
//!
//! Images start with a deferred source and a skeleton. When an image comes
//! within the preload margin of the viewport, its deferred source is promoted
//! to the real source, the host starts the network load, and the observation
//! is released. The skeleton stays up until the host reports the load done.
//!
//! ```text
//! Placeholder --(intersecting)--> Loading --(mark_loaded)--> Loaded
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use log::debug;
use lookout_observe::{ObservationSource, ObserverOptions, Record, SubscriptionId};

/// Handle for an image registered with [`LazyImages::watch`].
///
/// Keys from before a [`LazyImages::clear`] are stale and resolve to nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ImageKey {
    index: u32,
    epoch: u32,
}

/// Load state of a lazy image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageState {
    /// Skeleton shown, source deferred.
    Placeholder,
    /// Source set, load in progress; skeleton still shown.
    Loading,
    /// Load finished; skeleton hidden.
    Loaded,
}

#[derive(Clone, Debug)]
struct LazyImage {
    data_src: Option<String>,
    src: Option<String>,
    state: ImageState,
    subscription: Option<SubscriptionId>,
}

/// A set of lazy images sharing one set of observer options.
///
/// Entries live until [`clear`](Self::clear), which a host calls when the
/// gallery unmounts so a long-lived set does not grow across remounts.
#[derive(Clone, Debug)]
pub struct LazyImages {
    options: ObserverOptions,
    images: Vec<LazyImage>,
    epoch: u32,
}

impl Default for LazyImages {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyImages {
    /// Create an empty set using [`ObserverOptions::preload`].
    pub fn new() -> Self {
        Self::with_options(ObserverOptions::preload())
    }

    /// Create an empty set with explicit observer options.
    pub fn with_options(options: ObserverOptions) -> Self {
        Self {
            options,
            images: Vec::new(),
            epoch: 0,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "ImageKey uses 32-bit indices by design."
    )]
    fn key_at(&self, index: usize) -> ImageKey {
        ImageKey {
            index: index as u32,
            epoch: self.epoch,
        }
    }

    fn image(&self, key: ImageKey) -> Option<&LazyImage> {
        if key.epoch != self.epoch {
            return None;
        }
        self.images.get(key.index as usize)
    }

    fn image_mut(&mut self, key: ImageKey) -> Option<&mut LazyImage> {
        if key.epoch != self.epoch {
            return None;
        }
        self.images.get_mut(key.index as usize)
    }

    /// Register an image whose real source is `data_src` and start observing it.
    pub fn watch<S: ObservationSource>(
        &mut self,
        element: S::Element,
        data_src: impl Into<String>,
        source: &mut S,
    ) -> ImageKey {
        let subscription = source.observe(element, &self.options);
        let key = self.key_at(self.images.len());
        self.images.push(LazyImage {
            data_src: Some(data_src.into()),
            src: None,
            state: ImageState::Placeholder,
            subscription: Some(subscription),
        });
        key
    }

    /// Promote every image that reports intersecting in `batch`.
    ///
    /// Returns the keys and sources whose load should start now. Each image
    /// is promoted at most once; its observation is released right away.
    pub fn process<S: ObservationSource>(
        &mut self,
        batch: &[Record],
        source: &mut S,
    ) -> Vec<(ImageKey, String)> {
        let epoch = self.epoch;
        let mut started = Vec::new();
        for record in batch.iter().filter(|r| r.measurement.is_intersecting) {
            let Some((idx, image)) = self
                .images
                .iter_mut()
                .enumerate()
                .find(|(_, i)| i.subscription == Some(record.subscription))
            else {
                continue;
            };
            if let Some(sub) = image.subscription.take() {
                source.release(sub);
            }
            let Some(src) = image.data_src.take() else {
                continue;
            };
            debug!("preloading {src}");
            image.src = Some(src.clone());
            image.state = ImageState::Loading;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ImageKey uses 32-bit indices by design."
            )]
            let key = ImageKey {
                index: idx as u32,
                epoch,
            };
            started.push((key, src));
        }
        started
    }

    /// Report that an image finished loading. Returns false unless it was
    /// [`ImageState::Loading`].
    pub fn mark_loaded(&mut self, key: ImageKey) -> bool {
        match self.image_mut(key) {
            Some(image) if image.state == ImageState::Loading => {
                image.state = ImageState::Loaded;
                true
            }
            _ => false,
        }
    }

    /// Load state of an image.
    pub fn state(&self, key: ImageKey) -> Option<ImageState> {
        self.image(key).map(|i| i.state)
    }

    /// Real source of an image, once promoted.
    pub fn src(&self, key: ImageKey) -> Option<&str> {
        self.image(key)?.src.as_deref()
    }

    /// Stop observing one image. It keeps its current state.
    pub fn unwatch<S: ObservationSource>(&mut self, key: ImageKey, source: &mut S) {
        if let Some(sub) = self.image_mut(key).and_then(|i| i.subscription.take())
        {
            source.release(sub);
        }
    }

    /// Stop observing every image.
    pub fn disconnect<S: ObservationSource>(&mut self, source: &mut S) {
        for image in &mut self.images {
            if let Some(sub) = image.subscription.take() {
                source.release(sub);
            }
        }
    }

    /// Stop observing every image and drop all entries. Keys handed out so
    /// far become stale.
    pub fn clear<S: ObservationSource>(&mut self, source: &mut S) {
        self.disconnect(source);
        self.images.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if no images are registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of images still waiting to come into view.
    pub fn pending_count(&self) -> usize {
        self.images
            .iter()
            .filter(|i| i.subscription.is_some())
            .count()
    }
}
