//! The portfolio document read from `config.json`.
//!
//! These types describe *content*: who the page is about and which projects
//! it shows. Build settings live in [`crate::config`].
//!
//! ```json
//! {
//!   "name": "Ada Lovelace",
//!   "bio": "Analyst of engines.",
//!   "avatar": "images/avatar.jpg",
//!   "email": "ada@example.com",
//!   "phone": "+44 20 0000 0000",
//!   "github": "https://github.com/ada",
//!   "linkedin": "https://linkedin.com/in/ada",
//!   "projects": [{
//!     "title": "ML Notes",
//!     "description": "Annotated translations.",
//!     "technologies": ["Rust"],
//!     "highlights": ["First published program"],
//!     "url": "https://example.com/notes",
//!     "images": { "hero": "images/notes/hero.png", "gallery": ["images/notes/1.png"] }
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The whole portfolio document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub bio: String,
    /// Avatar image reference. Falls back to initials when absent or unloadable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub linkedin: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// One project card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ProjectImages>,
}

/// Candidate images for a project, by role. Every slot is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
}

/// Read and parse `config.json` from the content root.
pub fn load_portfolio(root: &Path) -> Result<Portfolio, PortfolioError> {
    let content = fs::read_to_string(root.join("config.json"))?;
    Ok(serde_json::from_str(&content)?)
}

/// Initials shown when there is no usable avatar: first letter of each word, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
