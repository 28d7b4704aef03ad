//! Gallery building: from a project's image slots to a rendered carousel.
//!
//! ## Candidate Order
//!
//! ```text
//! hero?  →  demo?  →  gallery[0]  →  gallery[1]  →  ...
//! ```
//!
//! Every candidate is probed, failures are dropped, and the survivors keep
//! this relative order. Probes run in parallel on the rayon pool; the results
//! come back through an indexed `collect`, so a slow hero image still ends up
//! first even when every gallery image answers before it.
//!
//! ## Failure Handling
//!
//! A failing candidate never aborts the batch and is never reported to the
//! caller as an error. Projects legitimately leave slots empty, so a gallery
//! where nothing survives simply does not exist (`None`) and the card renders
//! without one.
//!
//! ## Markup
//!
//! [`render_gallery`] produces the inline carousel. Behaviour is bound through
//! `data-action` attributes that the page script (and [`crate::viewer::Action`])
//! understand, never through inline handler text.

use crate::carousel::{GalleryId, GalleryInstance, track_transform};
use crate::config::GalleryConfig;
use crate::probe::{ImageProbe, ProbeEvent, probe_reported};
use crate::types::ProjectImages;
use maud::{Markup, html};
use rayon::prelude::*;
use std::fmt;
use std::sync::mpsc::Sender;

/// The slot an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Hero,
    Demo,
    Gallery,
}

impl ImageKind {
    /// Value of the `data-type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Hero => "hero",
            ImageKind::Demo => "demo",
            ImageKind::Gallery => "gallery",
        }
    }

    /// Human label shown in the modal badge.
    pub fn label(self) -> &'static str {
        match self {
            ImageKind::Hero => "Hero Image",
            ImageKind::Demo => "Demo",
            ImageKind::Gallery => "Screenshot",
        }
    }

    pub fn default_alt(self) -> &'static str {
        match self {
            ImageKind::Hero => "Project hero image",
            ImageKind::Demo => "Project demo",
            ImageKind::Gallery => "Project screenshot",
        }
    }

    /// Parse a `data-type` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hero" => Some(ImageKind::Hero),
            "demo" => Some(ImageKind::Demo),
            "gallery" => Some(ImageKind::Gallery),
            _ => None,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image confirmed loadable, with its role and alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub src: String,
    pub kind: ImageKind,
    pub alt: String,
}

impl ImageDescriptor {
    pub fn new(src: impl Into<String>, kind: ImageKind) -> Self {
        Self {
            src: src.into(),
            kind,
            alt: kind.default_alt().to_string(),
        }
    }
}

/// Candidate references in gallery order.
pub fn candidates(images: &ProjectImages) -> Vec<(&str, ImageKind)> {
    let mut list = Vec::with_capacity(images.gallery.len() + 2);
    if let Some(hero) = &images.hero {
        list.push((hero.as_str(), ImageKind::Hero));
    }
    if let Some(demo) = &images.demo {
        list.push((demo.as_str(), ImageKind::Demo));
    }
    list.extend(
        images
            .gallery
            .iter()
            .map(|src| (src.as_str(), ImageKind::Gallery)),
    );
    list
}

/// Probe a project's images and build its gallery.
///
/// Returns `None` when `images` is absent or nothing survives probing.
pub fn build_gallery<P: ImageProbe + ?Sized>(
    images: Option<&ProjectImages>,
    id: GalleryId,
    probe: &P,
    events: Option<&Sender<ProbeEvent>>,
) -> Option<GalleryInstance> {
    let candidates = candidates(images?);

    // One slot per candidate; `collect` on an indexed iterator keeps positions.
    let loadable: Vec<bool> = candidates
        .par_iter()
        .map(|(src, _)| probe_reported(probe, src, events))
        .collect();

    let survivors = candidates
        .into_iter()
        .zip(loadable)
        .filter(|(_, ok)| *ok)
        .map(|((src, kind), _)| ImageDescriptor::new(src, kind))
        .collect();

    GalleryInstance::new(id, survivors)
}

/// Render the inline carousel for a gallery in its current state.
pub fn render_gallery(gallery: &GalleryInstance, config: &GalleryConfig) -> Markup {
    let id = gallery.id().as_str();
    let count = gallery.len();
    let active = gallery.active_index();
    let disabled = gallery.controls_disabled();
    let centered = count <= config.center_thumbnails_max;
    let loading = config.lazy_loading.then_some("lazy");

    html! {
        div.project-image-carousel id=(id) data-carousel=(id) tabindex="0" {
            div.carousel-header {
                h5 { "Project Gallery (" (count) " images)" }
                div.carousel-controls {
                    button.carousel-btn.prev type="button" data-action="prev" data-carousel=(id)
                        aria-label="Previous image" disabled[disabled] { "‹" }
                    span.carousel-counter {
                        span.current-image { (active + 1) }
                        " / " (count)
                    }
                    button.carousel-btn.next type="button" data-action="next" data-carousel=(id)
                        aria-label="Next image" disabled[disabled] { "›" }
                }
            }
            div.carousel-container {
                div.carousel-track style={ "transform: " (track_transform(active)) } {
                    @for (index, image) in gallery.images().iter().enumerate() {
                        div.carousel-slide.active[index == active] data-type=(image.kind.as_str()) {
                            img src=(image.src) alt=(image.alt) loading=[loading]
                                data-action="open-modal" data-carousel=(id) data-index=(index);
                        }
                    }
                }
            }
            div.carousel-thumbnails.center-thumbnails[centered] {
                @for (index, image) in gallery.images().iter().enumerate() {
                    div.thumbnail.active[index == active]
                        data-action="go-to" data-carousel=(id) data-index=(index) {
                        img src=(image.src) alt=(image.alt);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedProbe, gallery_of, id, images, srcs};
    use std::sync::mpsc;

    fn kinds(gallery: &GalleryInstance) -> Vec<ImageKind> {
        gallery.images().iter().map(|d| d.kind).collect()
    }

    #[test]
    fn candidates_in_slot_order() {
        let imgs = images(Some("h.png"), Some("d.gif"), &["1.png", "2.png"]);
        let list = candidates(&imgs);
        assert_eq!(
            list,
            vec![
                ("h.png", ImageKind::Hero),
                ("d.gif", ImageKind::Demo),
                ("1.png", ImageKind::Gallery),
                ("2.png", ImageKind::Gallery),
            ]
        );
    }

    #[test]
    fn mixed_failures_keep_survivor_order() {
        let imgs = images(Some("a.png"), Some("b.png"), &["c.png", "d.png"]);
        let probe = ScriptedProbe::new(&["a.png", "c.png"]);

        let gallery = build_gallery(Some(&imgs), id("g"), &probe, None).unwrap();

        assert_eq!(srcs(&gallery), vec!["a.png", "c.png"]);
        assert_eq!(kinds(&gallery), vec![ImageKind::Hero, ImageKind::Gallery]);
        assert_eq!(gallery.len(), 2);
        assert!(!gallery.controls_disabled());
        assert_eq!(gallery.active_index(), 0);
    }

    #[test]
    fn order_survives_out_of_order_completion() {
        // Earlier candidates answer last.
        let imgs = images(Some("h.png"), Some("d.png"), &["1.png", "2.png", "3.png"]);
        let probe = ScriptedProbe::new(&["h.png", "d.png", "1.png", "2.png", "3.png"])
            .with_delay("h.png", 120)
            .with_delay("d.png", 80)
            .with_delay("1.png", 40);

        let gallery = build_gallery(Some(&imgs), id("g"), &probe, None).unwrap();

        assert_eq!(
            srcs(&gallery),
            vec!["h.png", "d.png", "1.png", "2.png", "3.png"]
        );
    }

    #[test]
    fn absent_images_build_nothing() {
        let probe = ScriptedProbe::new(&[]);
        assert!(build_gallery(None, id("g"), &probe, None).is_none());
    }

    #[test]
    fn empty_images_build_nothing() {
        let probe = ScriptedProbe::new(&[]);
        let imgs = ProjectImages::default();
        assert!(build_gallery(Some(&imgs), id("g"), &probe, None).is_none());
    }

    #[test]
    fn all_failures_build_nothing() {
        let probe = ScriptedProbe::new(&[]);
        let imgs = images(Some("a.png"), None, &["b.png"]);
        assert!(build_gallery(Some(&imgs), id("g"), &probe, None).is_none());
    }

    #[test]
    fn duplicate_references_are_kept() {
        let probe = ScriptedProbe::new(&["a.png"]);
        let imgs = images(Some("a.png"), None, &["a.png"]);
        let gallery = build_gallery(Some(&imgs), id("g"), &probe, None).unwrap();
        assert_eq!(kinds(&gallery), vec![ImageKind::Hero, ImageKind::Gallery]);
    }

    #[test]
    fn build_reports_every_candidate() {
        let probe = ScriptedProbe::new(&["a.png"]);
        let imgs = images(Some("a.png"), Some("b.png"), &[]);
        let (tx, rx) = mpsc::channel();

        build_gallery(Some(&imgs), id("g"), &probe, Some(&tx));
        drop(tx);

        let events: Vec<ProbeEvent> = rx.into_iter().collect();
        assert_eq!(events.len(), 4);
        assert!(events.contains(&ProbeEvent::Loaded {
            src: "a.png".into()
        }));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, ProbeEvent::Failed { src, .. } if src == "b.png"))
        );
    }

    #[test]
    fn descriptor_alt_follows_kind() {
        assert_eq!(
            ImageDescriptor::new("a", ImageKind::Hero).alt,
            "Project hero image"
        );
        assert_eq!(ImageDescriptor::new("a", ImageKind::Demo).alt, "Project demo");
        assert_eq!(
            ImageDescriptor::new("a", ImageKind::Gallery).alt,
            "Project screenshot"
        );
    }

    #[test]
    fn image_kind_parse_roundtrips_data_type() {
        for kind in [ImageKind::Hero, ImageKind::Demo, ImageKind::Gallery] {
            assert_eq!(ImageKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ImageKind::parse("poster"), None);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn render_header_counter_and_first_active() {
        let html = render_gallery(&gallery_of("carousel-abc", 3), &GalleryConfig::default())
            .into_string();

        assert!(html.contains("Project Gallery (3 images)"));
        assert!(html.contains(r#"<span class="current-image">1</span> / 3"#));
        assert!(html.contains(r#"id="carousel-abc""#));
        assert!(html.contains("transform: translateX(0%)"));
        assert_eq!(html.matches(r#"class="carousel-slide active""#).count(), 1);
        assert_eq!(html.matches(r#"class="thumbnail active""#).count(), 1);
        assert_eq!(html.matches(r#"class="carousel-slide""#).count(), 2);
    }

    #[test]
    fn render_disables_controls_only_for_single_image() {
        let one = render_gallery(&gallery_of("g", 1), &GalleryConfig::default()).into_string();
        let two = render_gallery(&gallery_of("g", 2), &GalleryConfig::default()).into_string();

        assert_eq!(one.matches("disabled").count(), 2);
        assert!(!two.contains("disabled"));
    }

    #[test]
    fn render_centers_small_thumbnail_strips() {
        let config = GalleryConfig::default();
        let four = render_gallery(&gallery_of("g", 4), &config).into_string();
        let five = render_gallery(&gallery_of("g", 5), &config).into_string();

        assert!(four.contains("carousel-thumbnails center-thumbnails"));
        assert!(!five.contains("center-thumbnails"));
    }

    #[test]
    fn render_binds_actions_through_data_attributes() {
        let html = render_gallery(&gallery_of("g1", 2), &GalleryConfig::default()).into_string();

        assert!(html.contains(r#"data-action="prev" data-carousel="g1""#));
        assert!(html.contains(r#"data-action="next" data-carousel="g1""#));
        assert!(html.contains(r#"data-action="open-modal" data-carousel="g1" data-index="1""#));
        assert!(html.contains(r#"data-action="go-to" data-carousel="g1" data-index="0""#));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn render_marks_slide_types() {
        let gallery = GalleryInstance::new(
            id("g"),
            vec![
                ImageDescriptor::new("h.png", ImageKind::Hero),
                ImageDescriptor::new("d.png", ImageKind::Demo),
            ],
        )
        .unwrap();
        let html = render_gallery(&gallery, &GalleryConfig::default()).into_string();

        assert!(html.contains(r#"data-type="hero""#));
        assert!(html.contains(r#"data-type="demo""#));
        assert!(html.contains(r#"alt="Project hero image""#));
    }

    #[test]
    fn render_lazy_loading_follows_config() {
        let gallery = gallery_of("g", 2);
        let lazy = render_gallery(&gallery, &GalleryConfig::default()).into_string();
        let eager = render_gallery(
            &gallery,
            &GalleryConfig {
                lazy_loading: false,
                ..Default::default()
            },
        )
        .into_string();

        assert_eq!(lazy.matches(r#"loading="lazy""#).count(), 2);
        assert!(!eager.contains("loading="));
    }

    #[test]
    fn render_reflects_current_state() {
        let mut gallery = gallery_of("g", 3);
        gallery.go_to(2);
        let html = render_gallery(&gallery, &GalleryConfig::default()).into_string();

        assert!(html.contains("transform: translateX(-200%)"));
        assert!(html.contains(r#"<span class="current-image">3</span>"#));
    }

    #[test]
    fn render_escapes_sources() {
        let gallery = GalleryInstance::new(
            id("g"),
            vec![ImageDescriptor::new(
                r#"a.png" onerror="alert(1)"#,
                ImageKind::Gallery,
            )],
        )
        .unwrap();
        let html = render_gallery(&gallery, &GalleryConfig::default()).into_string();

        assert!(!html.contains(r#"onerror="alert(1)""#));
        assert!(html.contains("&quot;"));
    }
}
