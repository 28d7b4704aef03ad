//! Page generation.
//!
//! Reads the content directory, probes every referenced image and writes a
//! single static page:
//!
//! ```text
//! content/                     dist/
//! ├── config.json      ──▶     ├── index.html
//! ├── config.toml              ├── images/...      (surviving local images + avatar)
//! ├── images/...               └── assets/...      (copied verbatim)
//! └── assets/...
//! ```
//!
//! ## Steps
//!
//! 1. Load `config.toml` over stock defaults.
//! 2. Load `config.json`. On failure the error page is still written, then
//!    the error is returned.
//! 3. Probe the avatar; unloadable or absent means initials.
//! 4. Build project cards in parallel. Each card's own probes are joined
//!    before it renders, and cards come back in document order.
//! 5. Render the page, copy images and assets.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined into the page:
//! - `static/style.css`: layout, carousel and modal styles (colors and
//!   theme variables are prepended from config)
//! - `static/gallery.js`: binds `data-action` controls and arrow/escape keys

use crate::card::{ProjectCard, build_project_card, markdown_to_html};
use crate::carousel::GalleryInstance;
use crate::config::{self, ConfigError, SiteConfig};
use crate::gallery::ImageDescriptor;
use crate::modal::render_modal_template;
use crate::probe::{
    BoundedProbe, FsProbe, ImageProbe, ProbeEvent, is_remote, local_path, probe_reported,
};
use crate::types::{Portfolio, PortfolioError, initials, load_portfolio};
use crate::viewer::Viewer;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

const ERROR_NAME: &str = "Error Loading Portfolio";
const ERROR_BIO: &str = "Unable to load portfolio data. Please check the config.json file.";

/// One project as it ended up on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub title: String,
    pub gallery_id: Option<String>,
    pub images: Vec<ImageDescriptor>,
}

/// What a build or check produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub name: String,
    /// Avatar reference when it probed loadable.
    pub avatar: Option<String>,
    pub projects: Vec<ProjectSummary>,
    /// Files copied to the output (images and assets). Zero for `check`.
    pub copied_files: usize,
}

/// A rendered page plus the interaction state it starts in.
#[derive(Debug, Clone)]
pub struct RenderedSite {
    pub markup: Markup,
    pub viewer: Viewer,
    pub report: BuildReport,
}

/// The probe a build uses: filesystem checks, bounded when a timeout is set.
pub fn make_probe(source: &Path, config: &SiteConfig) -> Box<dyn ImageProbe + Send> {
    let fs_probe = FsProbe::new(source, config.gallery.trust_remote);
    match config.gallery.probe_timeout() {
        Some(timeout) => Box::new(BoundedProbe::new(fs_probe, timeout)),
        None => Box::new(fs_probe),
    }
}

/// Build the site from `source` into `output`.
pub fn build(
    source: &Path,
    output: &Path,
    events: Option<Sender<ProbeEvent>>,
) -> Result<BuildReport, GenerateError> {
    let config = config::load_config(source)?;
    let css = site_css(&config);
    fs::create_dir_all(output)?;

    let portfolio = match load_portfolio(source) {
        Ok(portfolio) => portfolio,
        Err(err) => {
            fs::write(
                output.join("index.html"),
                render_error_page(&css).into_string(),
            )?;
            return Err(err.into());
        }
    };

    let probe = make_probe(source, &config);
    let site = render_site(&portfolio, &*probe, &config, &css, events.as_ref());
    fs::write(output.join("index.html"), site.markup.into_string())?;

    let mut copied = copy_images(source, output, &site.report)?;
    copied += copy_assets(&source.join(&config.assets_dir), &output.join(&config.assets_dir))?;

    Ok(BuildReport {
        copied_files: copied,
        ..site.report
    })
}

/// Probe everything the portfolio references without writing output.
pub fn check(
    source: &Path,
    events: Option<Sender<ProbeEvent>>,
) -> Result<BuildReport, GenerateError> {
    let config = config::load_config(source)?;
    let portfolio = load_portfolio(source)?;
    let probe = make_probe(source, &config);
    let site = render_site(&portfolio, &*probe, &config, "", events.as_ref());
    Ok(site.report)
}

/// Render the full page for a portfolio.
pub fn render_site<P: ImageProbe + ?Sized>(
    portfolio: &Portfolio,
    probe: &P,
    config: &SiteConfig,
    css: &str,
    events: Option<&Sender<ProbeEvent>>,
) -> RenderedSite {
    let avatar = portfolio
        .avatar
        .as_deref()
        .filter(|src| probe_reported(probe, src, events))
        .map(str::to_string);

    let cards: Vec<ProjectCard> = portfolio
        .projects
        .par_iter()
        .enumerate()
        .map(|(position, project)| {
            build_project_card(position, project, probe, &config.gallery, events)
        })
        .collect();

    let projects = portfolio
        .projects
        .iter()
        .zip(&cards)
        .map(|(project, card)| summarize(&project.title, card.gallery.as_ref()))
        .collect();

    let markup = render_page(portfolio, avatar.as_deref(), &cards, css);
    let viewer = Viewer::new(cards.into_iter().filter_map(|card| card.gallery));

    RenderedSite {
        markup,
        viewer,
        report: BuildReport {
            name: portfolio.name.clone(),
            avatar,
            projects,
            copied_files: 0,
        },
    }
}

fn summarize(title: &str, gallery: Option<&GalleryInstance>) -> ProjectSummary {
    ProjectSummary {
        title: title.to_string(),
        gallery_id: gallery.map(|g| g.id().to_string()),
        images: gallery.map(|g| g.images().to_vec()).unwrap_or_default(),
    }
}

/// Stylesheet: generated custom properties followed by the static rules.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    )
}

// ============================================================================
// Output files
// ============================================================================

/// Copy the avatar and every surviving local gallery image, keeping their
/// relative paths. References that name the same file are copied once.
/// Remote references are left alone.
fn copy_images(
    source: &Path,
    output: &Path,
    report: &BuildReport,
) -> Result<usize, GenerateError> {
    let references = report
        .avatar
        .iter()
        .map(String::as_str)
        .chain(
            report
                .projects
                .iter()
                .flat_map(|p| p.images.iter().map(|d| d.src.as_str())),
        );

    let mut relatives: Vec<PathBuf> = references
        .filter(|src| !is_remote(src))
        .filter_map(|src| local_path(src).ok())
        .collect();
    relatives.sort();
    relatives.dedup();

    for relative in &relatives {
        let dst = output.join(relative);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source.join(relative), dst)?;
    }
    Ok(relatives.len())
}

/// Copy a directory tree verbatim. A missing directory copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Avatar image, or the initials badge when there is no loadable avatar.
fn render_avatar(name: &str, avatar: Option<&str>) -> Markup {
    html! {
        div.avatar-container {
            @if let Some(src) = avatar {
                img.avatar #avatar src=(src) alt=(name);
            } @else {
                div.avatar-fallback #avatar-fallback { (initials(name)) }
            }
        }
    }
}

fn social_link(icon: &str, href: &str, text: &str) -> Markup {
    html! {
        a.social-link href=(href) target="_blank" rel="noopener noreferrer" {
            span { (icon) }
            span { (text) }
        }
    }
}

/// Email, phone, GitHub and LinkedIn links; phone and GitHub only when set.
pub fn render_social_links(portfolio: &Portfolio) -> Markup {
    html! {
        div.social-links #social-links {
            (social_link("✉️", &format!("mailto:{}", portfolio.email), "Email"))
            @if let Some(phone) = &portfolio.phone {
                (social_link("📱", &format!("tel:{phone}"), "Phone"))
            }
            @if let Some(github) = &portfolio.github {
                (social_link("🔗", github, "GitHub"))
            }
            (social_link("💼", &portfolio.linkedin, "LinkedIn"))
        }
    }
}

fn render_header(name: &str, bio: Markup, avatar: Markup, social: Option<Markup>) -> Markup {
    html! {
        header.header {
            div.header-content {
                (avatar)
                h1.name #name { (name) }
                div.bio #bio { (bio) }
                @if let Some(social) = social {
                    (social)
                }
            }
        }
    }
}

fn render_footer(portfolio: &Portfolio) -> Markup {
    html! {
        footer.footer {
            div.footer-content {
                h2 { "Get In Touch" }
                div.contact-info {
                    a.contact-item #footer-email href={ "mailto:" (portfolio.email) } {
                        span { "✉️" }
                        span #contact-email { (portfolio.email) }
                    }
                    @if let Some(phone) = &portfolio.phone {
                        a.contact-item #footer-phone href={ "tel:" (phone) } {
                            span { "📱" }
                            span #contact-phone { (phone) }
                        }
                    }
                    a.contact-item #footer-linkedin href=(portfolio.linkedin)
                        target="_blank" rel="noopener noreferrer" {
                        span { "💼" }
                        span #contact-linkedin-text { (portfolio.linkedin) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the portfolio page from already-built cards.
pub fn render_page(
    portfolio: &Portfolio,
    avatar: Option<&str>,
    cards: &[ProjectCard],
    css: &str,
) -> Markup {
    let bio = PreEscaped(markdown_to_html(&portfolio.bio));
    let header = render_header(
        &portfolio.name,
        bio,
        render_avatar(&portfolio.name, avatar),
        Some(render_social_links(portfolio)),
    );

    let content = html! {
        (header)
        main.main {
            section.projects-section #projects {
                h2.section-title { "Projects" }
                div.projects-grid #projects-grid {
                    @for (index, card) in cards.iter().enumerate() {
                        div.project-slot style={ "--card-index: " (index) } {
                            (card.markup)
                        }
                    }
                }
            }
        }
        (render_footer(portfolio))
        (render_modal_template())
        script { (PreEscaped(JS)) }
    };

    base_document(&portfolio.name, css, content)
}

/// Page written when `config.json` cannot be loaded.
pub fn render_error_page(css: &str) -> Markup {
    let avatar = html! {
        div.avatar-container {
            div.avatar-fallback #avatar-fallback { "⚠️" }
        }
    };
    let content = html! {
        (render_header(ERROR_NAME, html! { (ERROR_BIO) }, avatar, None))
        main.main {}
    };
    base_document(ERROR_NAME, css, content)
}

// ============================================================================
// Tests
// ============================================================================
