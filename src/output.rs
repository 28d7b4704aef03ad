//! CLI output formatting.
//!
//! Each output has a `format_*` function (returns lines, no I/O) for
//! testability and a `print_*` wrapper that writes to stdout.
//!
//! # Probe Events
//!
//! Streamed while probing, one line per event:
//!
//! ```text
//! Testing images/notes/hero.png
//! Loaded  images/notes/hero.png
//! Failed  images/notes/demo.gif (file not found: content/images/notes/demo.gif)
//! ```
//!
//! # Build Report
//!
//! Projects are listed by position and title; the gallery follows as
//! indented context:
//!
//! ```text
//! Ada Lovelace
//!     Avatar: images/avatar.png
//! 001 ML Notes (2 images)
//!     Gallery: carousel-3f0a9c21b
//!     hero     images/notes/hero.png
//!     gallery  images/notes/1.png
//! 002 Compiler (no gallery)
//!
//! Rendered 2 projects, 1 gallery, 2 images; copied 3 files
//! ```

use crate::generate::BuildReport;
use crate::probe::ProbeEvent;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format one probe event.
pub fn format_probe_event(event: &ProbeEvent) -> String {
    match event {
        ProbeEvent::Testing { src } => format!("Testing {src}"),
        ProbeEvent::Loaded { src } => format!("Loaded  {src}"),
        ProbeEvent::Failed { src, reason } => format!("Failed  {src} ({reason})"),
    }
}

/// Format the project inventory of a build or check.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![report.name.clone()];
    match &report.avatar {
        Some(src) => lines.push(format!("{}Avatar: {src}", indent(1))),
        None => lines.push(format!("{}Avatar: initials", indent(1))),
    }

    for (i, project) in report.projects.iter().enumerate() {
        let header = format!("{} {}", format_index(i + 1), project.title);
        match &project.gallery_id {
            Some(id) => {
                lines.push(format!(
                    "{header} ({})",
                    plural(project.images.len(), "image", "images")
                ));
                lines.push(format!("{}Gallery: {id}", indent(1)));
                for image in &project.images {
                    lines.push(format!("{}{:<8} {}", indent(1), image.kind.as_str(), image.src));
                }
            }
            None => lines.push(format!("{header} (no gallery)")),
        }
    }

    let galleries = report
        .projects
        .iter()
        .filter(|p| p.gallery_id.is_some())
        .count();
    let images: usize = report.projects.iter().map(|p| p.images.len()).sum();
    let mut summary = format!(
        "Rendered {}, {}, {}",
        plural(report.projects.len(), "project", "projects"),
        plural(galleries, "gallery", "galleries"),
        plural(images, "image", "images"),
    );
    if report.copied_files > 0 {
        summary.push_str(&format!(
            "; copied {}",
            plural(report.copied_files, "file", "files")
        ));
    }
    lines.push(String::new());
    lines.push(summary);
    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}
