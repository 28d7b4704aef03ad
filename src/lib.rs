//! # Simple Folio
//!
//! A static generator for single-page project portfolios. One JSON document
//! describes the person and their projects; the build probes every image the
//! document references and writes a page where each project carries a
//! carousel of the images that actually load.
//!
//! # Architecture: Probe, Build, Interact
//!
//! ```text
//! config.json ─▶ Project ─▶ probe candidates ─▶ GalleryInstance ─▶ card markup
//!                              (parallel)            │
//!                                                    ▼
//!                                  Viewer { carousels, modal } ◀── Action / key
//! ```
//!
//! - **Probe** answers "is this image loadable?" and never fails loudly.
//! - **Build** turns survivors into an ordered, non-empty gallery or nothing.
//! - **Interact** is a pair of small state machines (carousel index, optional
//!   modal) owned by a [`viewer::Viewer`]. The page script applies the same
//!   transitions in the browser; the Rust side is the model it is tested
//!   against.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`probe`] | Image loadability checks: filesystem, remote policy, timeout bound |
//! | [`gallery`] | Candidate ordering, parallel probing, carousel markup |
//! | [`carousel`] | Gallery ids, per-gallery active index, registry |
//! | [`modal`] | The single full-screen viewer over a snapshot of a gallery |
//! | [`keyboard`] | Arrow/escape routing with modal priority |
//! | [`viewer`] | Owner of carousel and modal state; `data-action` parsing |
//! | [`card`] | Project card markup, keyword icons |
//! | [`generate`] | Whole-page rendering, error page, output copying |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | The portfolio document (`Portfolio`, `Project`, `ProjectImages`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Probing at Build Time
//!
//! A broken image reference is a content problem, so it is found once when
//! the page is built rather than by every visitor's browser. The page never
//! shows a broken slide and never reorders slides as probes complete.
//!
//! ## Ordered Parallel Probes
//!
//! Probes of one project run concurrently, but results are collected by
//! candidate position. Completion order never leaks into gallery order.
//!
//! ## Deterministic Gallery Ids
//!
//! Ids are derived from the project's position and title, so two builds of
//! the same content are byte-identical.
//!
//! ## Declarative Event Binding
//!
//! Controls carry `data-action`, `data-carousel` and `data-index`
//! attributes. A single delegated listener maps them to actions; there is no
//! handler code inside the markup and no global function namespace.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error and all interpolation is escaped.

pub mod card;
pub mod carousel;
pub mod config;
pub mod gallery;
pub mod generate;
pub mod keyboard;
pub mod modal;
pub mod output;
pub mod probe;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
