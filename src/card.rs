//! Project cards.
//!
//! A card is the unit the page is built from: title with an icon, markdown
//! description, technology badges, highlights, the optional image carousel
//! and a call-to-action link. [`build_project_card`] runs the gallery builder
//! for one project; [`render_project_card`] is pure markup over its result.

use crate::carousel::{GalleryId, GalleryInstance};
use crate::config::GalleryConfig;
use crate::gallery::{build_gallery, render_gallery};
use crate::probe::{ImageProbe, ProbeEvent};
use crate::types::Project;
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::sync::mpsc::Sender;

/// Keyword table for card icons, checked in order against the lower-cased title.
const ICONS: &[(&[&str], &str)] = &[
    (&["ml", "machine learning"], "🤖"),
    (&["ai", "artificial intelligence"], "🧠"),
    (&["data", "analytics"], "📊"),
    (&["analysis", "dashboard"], "📈"),
];

const FALLBACK_ICON: &str = "🚀";

/// Icon for a project title. Substring match, first entry wins.
///
/// Matching is on raw substrings, so "html" picks up "ml".
pub fn project_icon(title: &str) -> &'static str {
    let title = title.to_lowercase();
    ICONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

/// Render markdown to an HTML string.
pub fn markdown_to_html(source: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    out
}

/// A project card with the gallery it owns, if any survived probing.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub gallery: Option<GalleryInstance>,
    pub markup: Markup,
}

/// Probe a project's images and render its card.
///
/// `position` is the project's place on the page and feeds the gallery id.
pub fn build_project_card<P: ImageProbe + ?Sized>(
    position: usize,
    project: &Project,
    probe: &P,
    config: &GalleryConfig,
    events: Option<&Sender<ProbeEvent>>,
) -> ProjectCard {
    let id = GalleryId::for_project(position, &project.title);
    let gallery = build_gallery(project.images.as_ref(), id, probe, events);
    let markup = render_project_card(project, gallery.as_ref(), config);
    ProjectCard { gallery, markup }
}

pub fn render_project_card(
    project: &Project,
    gallery: Option<&GalleryInstance>,
    config: &GalleryConfig,
) -> Markup {
    html! {
        div.project-card {
            div.project-content {
                div.project-info {
                    h3.project-title {
                        span.project-icon { (project_icon(&project.title)) }
                        " " (project.title)
                    }
                    div.project-description {
                        (PreEscaped(markdown_to_html(&project.description)))
                    }
                    @if !project.technologies.is_empty() {
                        div.project-technologies {
                            @for tech in &project.technologies {
                                span.tech-badge { (tech) }
                            }
                        }
                    }
                    @if !project.highlights.is_empty() {
                        div.project-highlights {
                            h4 { "Key Features:" }
                            ul {
                                @for highlight in &project.highlights {
                                    li { (highlight) }
                                }
                            }
                        }
                    }
                    a.project-link href=(project.url) target="_blank" rel="noopener noreferrer" {
                        span.link-icon { "🚀" }
                        " Explore Project"
                    }
                }
                div.project-gallery-section {
                    @if let Some(gallery) = gallery {
                        (render_gallery(gallery, config))
                    }
                }
            }
        }
    }
}
