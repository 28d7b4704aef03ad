//! Shared test utilities for the simple-folio test suite.
//!
//! Provides a scripted probe (fixed answers, optional per-image latency),
//! fixture writers for real image files, and small builders for projects and
//! galleries.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let probe = ScriptedProbe::new(&["a.png", "c.png"]).with_delay("a.png", 50);
//! let imgs = images(Some("a.png"), None, &["c.png"]);
//! let gallery = build_gallery(Some(&imgs), id("g"), &probe, None);
//! assert_eq!(srcs(gallery.as_ref().unwrap()), vec!["a.png", "c.png"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

use crate::carousel::{GalleryId, GalleryInstance};
use crate::gallery::{ImageDescriptor, ImageKind};
use crate::probe::{ImageProbe, ProbeFailure};
use crate::types::{Project, ProjectImages};

// =========================================================================
// Probes
// =========================================================================

/// Probe with scripted answers: listed sources load, everything else fails.
///
/// Delays simulate slow image loads so ordering tests can make later
/// candidates finish first.
#[derive(Debug, Default, Clone)]
pub struct ScriptedProbe {
    loadable: HashSet<String>,
    delays_ms: HashMap<String, u64>,
}

impl ScriptedProbe {
    pub fn new(loadable: &[&str]) -> Self {
        Self {
            loadable: loadable.iter().map(|s| s.to_string()).collect(),
            delays_ms: HashMap::new(),
        }
    }

    pub fn with_delay(mut self, src: &str, ms: u64) -> Self {
        self.delays_ms.insert(src.to_string(), ms);
        self
    }
}

impl ImageProbe for ScriptedProbe {
    fn check(&self, src: &str) -> Result<(), ProbeFailure> {
        if let Some(ms) = self.delays_ms.get(src) {
            std::thread::sleep(Duration::from_millis(*ms));
        }
        if self.loadable.contains(src) {
            Ok(())
        } else {
            Err(ProbeFailure::Undecodable("scripted failure".to_string()))
        }
    }
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write a real PNG of the given size, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 91, 214]));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Builders
// =========================================================================

pub fn id(value: &str) -> GalleryId {
    GalleryId::new(value)
}

pub fn images(hero: Option<&str>, demo: Option<&str>, gallery: &[&str]) -> ProjectImages {
    ProjectImages {
        hero: hero.map(str::to_string),
        demo: demo.map(str::to_string),
        gallery: gallery.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn project(title: &str, images: Option<ProjectImages>) -> Project {
    Project {
        title: title.to_string(),
        description: format!("About {title}."),
        technologies: vec![],
        highlights: vec![],
        url: "https://example.com/project".to_string(),
        images,
    }
}

/// A gallery with `n` gallery-kind images named `0.png`, `1.png`, ...
pub fn gallery_of(gallery_id: &str, n: usize) -> GalleryInstance {
    let descriptors = (0..n)
        .map(|i| ImageDescriptor::new(format!("{i}.png"), ImageKind::Gallery))
        .collect();
    GalleryInstance::new(id(gallery_id), descriptors).expect("n must be non-zero")
}

/// Image sources of a gallery, in order.
pub fn srcs(gallery: &GalleryInstance) -> Vec<&str> {
    gallery.images().iter().map(|d| d.src.as_str()).collect()
}
