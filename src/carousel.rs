//! Carousel navigation state.
//!
//! Every rendered gallery is a [`GalleryInstance`]: a fixed, non-empty list of
//! images and one mutable field, the active index. Instances live in a
//! [`CarouselRegistry`] keyed by [`GalleryId`]; navigation goes through the
//! registry so that a call for a gallery that no longer exists is a no-op
//! rather than an error.
//!
//! ## Views
//!
//! A transition changes three things on the page at once: which slide and
//! thumbnail carry `active`, the track offset, and the counter. All three are
//! derived from the new index in one [`CarouselView`], so there is no state in
//! which they disagree.
//!
//! ```text
//! index 0 of 3   translateX(0%)      counter "1"
//! index 2 of 3   translateX(-200%)   counter "3"
//! ```

use crate::gallery::ImageDescriptor;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a rendered gallery, unique within one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GalleryId(String);

impl GalleryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Deterministic id for the project at `position` on the page.
    ///
    /// `carousel-` followed by 9 hex digits of SHA-256 over position and
    /// title. The position makes two projects with the same title distinct;
    /// hashing keeps rebuilds byte-identical.
    pub fn for_project(position: usize, title: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((position as u64).to_le_bytes());
        hasher.update(title.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        Self(format!("carousel-{}", &hex[..9]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index before `index` in a ring of `len`, wrapping first → last.
pub fn wrap_prev(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Index after `index` in a ring of `len`, wrapping last → first.
pub fn wrap_next(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Track offset for a slide index: one slide width per step.
pub fn track_transform(index: usize) -> String {
    format!("translateX({}%)", -(index as i64) * 100)
}

/// Everything the page shows for one carousel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    /// Index of the active slide and thumbnail.
    pub active_index: usize,
    /// CSS transform for the track.
    pub track_transform: String,
    /// 1-based counter text.
    pub counter_text: String,
}

impl CarouselView {
    fn at(index: usize) -> Self {
        Self {
            active_index: index,
            track_transform: track_transform(index),
            counter_text: (index + 1).to_string(),
        }
    }
}

/// One rendered gallery: fixed images, one active index.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryInstance {
    id: GalleryId,
    images: Vec<ImageDescriptor>,
    active_index: usize,
}

impl GalleryInstance {
    /// A new gallery at index 0. `None` when `images` is empty.
    pub fn new(id: GalleryId, images: Vec<ImageDescriptor>) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self {
            id,
            images,
            active_index: 0,
        })
    }

    pub fn id(&self) -> &GalleryId {
        &self.id
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false: a gallery holds at least one image.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Prev/next controls are disabled iff there is exactly one image.
    pub fn controls_disabled(&self) -> bool {
        self.images.len() == 1
    }

    pub fn view(&self) -> CarouselView {
        CarouselView::at(self.active_index)
    }

    /// Jump to `index`. Out-of-range indices leave the state untouched.
    pub fn go_to(&mut self, index: usize) -> Option<CarouselView> {
        if index >= self.images.len() {
            return None;
        }
        self.active_index = index;
        Some(self.view())
    }

    pub fn prev(&mut self) -> CarouselView {
        self.active_index = wrap_prev(self.active_index, self.images.len());
        self.view()
    }

    pub fn next(&mut self) -> CarouselView {
        self.active_index = wrap_next(self.active_index, self.images.len());
        self.view()
    }
}

/// All galleries on the page, by id.
#[derive(Debug, Default, Clone)]
pub struct CarouselRegistry {
    galleries: BTreeMap<GalleryId, GalleryInstance>,
}

impl CarouselRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gallery, returning any instance it replaced.
    pub fn insert(&mut self, gallery: GalleryInstance) -> Option<GalleryInstance> {
        self.galleries.insert(gallery.id.clone(), gallery)
    }

    /// Forget a gallery whose fragment left the page.
    pub fn remove(&mut self, id: &GalleryId) -> Option<GalleryInstance> {
        self.galleries.remove(id)
    }

    pub fn get(&self, id: &GalleryId) -> Option<&GalleryInstance> {
        self.galleries.get(id)
    }

    pub fn len(&self) -> usize {
        self.galleries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.galleries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryInstance> {
        self.galleries.values()
    }

    pub fn go_to(&mut self, id: &GalleryId, index: usize) -> Option<CarouselView> {
        self.galleries.get_mut(id)?.go_to(index)
    }

    pub fn prev(&mut self, id: &GalleryId) -> Option<CarouselView> {
        self.galleries.get_mut(id).map(GalleryInstance::prev)
    }

    pub fn next(&mut self, id: &GalleryId) -> Option<CarouselView> {
        self.galleries.get_mut(id).map(GalleryInstance::next)
    }
}

impl FromIterator<GalleryInstance> for CarouselRegistry {
    fn from_iter<I: IntoIterator<Item = GalleryInstance>>(iter: I) -> Self {
        let mut registry = Self::new();
        for gallery in iter {
            registry.insert(gallery);
        }
        registry
    }
}
