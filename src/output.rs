//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what an author recognises (page titles, link text)
//! and shows ids, urls, and files as secondary context on the same line or
//! on indented lines below.
//!
//! # Output Format
//!
//! ## Pages
//!
//! ```text
//! Pages
//! 001 Navigation → /navigation
//!     Layout: navigation
//! 002 About us → /about
//!     Layout: article
//! ```
//!
//! ## Navigation
//!
//! ```text
//! Navigation
//! 001 About → /about
//! 002 Programs (3 links)
//!     Energy
//!         001 Fusion → /fusion
//!         002 Fission → /fission
//!     Research
//!         001 Labs → /labs
//! 003 Careers → /careers
//!
//! Warnings
//!     link at 4 has no href, using '#'
//! ```
//!
//! ## Check
//!
//! ```text
//! 2 slug layouts and 3 pages
//!
//! Issues
//!     about: required Heading at position 0 has no value
//!
//! Found 1 issue and 0 navigation warnings
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::carousel::Transform;
use crate::copy::{ContentIssue, check_page};
use crate::navigation::{DropdownPresentation, NavEntry, NavWarning, Navigation};
use crate::store::ContentStore;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with a target.
///
/// ```text
/// 001 About → /about
/// ```
fn entity_header(index: usize, title: &str, target: &str) -> String {
    format!("{} {} → {}", format_index(index), title, target)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Format every page in document order.
///
/// Untitled pages are shown by id in parentheses.
pub fn format_pages(store: &ContentStore) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, (id, page)) in store.pages().iter().enumerate() {
        let title = if page.title.is_empty() {
            format!("({id})")
        } else {
            page.title.clone()
        };
        lines.push(entity_header(i + 1, &title, &page.url));
        lines.push(format!("{}Layout: {}", indent(1), page.slug_layout));
    }
    if store.pages().is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    lines
}

pub fn print_pages(store: &ContentStore) {
    for line in format_pages(store) {
        println!("{}", line);
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Format extracted navigation as it will render, followed by warnings.
///
/// Dropdowns that collapse to a single link are shown as plain links.
pub fn format_navigation(navigation: &Navigation) -> Vec<String> {
    let mut lines = vec!["Navigation".to_string()];

    for (i, entry) in navigation.entries.iter().enumerate() {
        match entry {
            NavEntry::Link(link) => lines.push(entity_header(i + 1, &link.title, &link.href)),
            NavEntry::Dropdown(dropdown) => match dropdown.presentation() {
                DropdownPresentation::Fallback(link) | DropdownPresentation::Single(link) => {
                    lines.push(entity_header(i + 1, &link.title, &link.href))
                }
                DropdownPresentation::Menu(menu) => {
                    lines.push(format!(
                        "{} {} ({})",
                        format_index(i + 1),
                        menu.title,
                        plural(menu.link_count(), "link")
                    ));
                    for column in menu.columns() {
                        lines.push(format!("{}{}", indent(1), column.title));
                        for (j, link) in column.links.iter().enumerate() {
                            lines.push(format!(
                                "{}{}",
                                indent(2),
                                entity_header(j + 1, &link.title, &link.href)
                            ));
                        }
                    }
                }
            },
        }
    }
    if navigation.entries.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    lines.extend(format_warnings(&navigation.warnings));
    lines
}

/// A blank line and a `Warnings` section, or nothing when there are none.
pub fn format_warnings(warnings: &[NavWarning]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Warnings".to_string()];
    lines.extend(warnings.iter().map(|w| format!("{}{}", indent(1), w)));
    lines
}

pub fn print_navigation(navigation: &Navigation) {
    for line in format_navigation(navigation) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Every structural issue in the store, keyed by page id.
pub fn collect_issues(store: &ContentStore) -> Vec<(String, ContentIssue)> {
    store
        .pages()
        .iter()
        .flat_map(|(id, page)| {
            check_page(page, store.layout_for(page))
                .into_iter()
                .map(move |issue| (id.clone(), issue))
        })
        .collect()
}

/// Format the result of checking the store and its navigation.
pub fn format_check_output(store: &ContentStore, navigation: &Navigation) -> Vec<String> {
    let issues = collect_issues(store);
    let mut lines = vec![format!(
        "{} and {}",
        plural(store.slug_layouts().len(), "slug layout"),
        plural(store.pages().len(), "page"),
    )];

    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Issues".to_string());
        for (id, issue) in &issues {
            lines.push(format!("{}{}: {}", indent(1), id, issue));
        }
    }

    lines.extend(format_warnings(&navigation.warnings));

    lines.push(String::new());
    lines.push(
        if issues.is_empty() && navigation.warnings.is_empty() {
            "Content is valid".to_string()
        } else {
            format!(
                "Found {} and {}",
                plural(issues.len(), "issue"),
                plural(navigation.warnings.len(), "navigation warning")
            )
        },
    );
    lines
}

pub fn print_check_output(store: &ContentStore, navigation: &Navigation) {
    for line in format_check_output(store, navigation) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

/// Format the files written by a render, relative to the output directory.
pub fn format_render_output(written: &[PathBuf], output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = written
        .iter()
        .map(|path| {
            let relative = path.strip_prefix(output_dir).unwrap_or(path);
            format!("{}{}", indent(1), relative.display())
        })
        .collect();
    lines.insert(0, "Rendered".to_string());
    lines.push(format!("Wrote {}", plural(written.len(), "file")));
    lines
}

pub fn print_render_output(written: &[PathBuf], output_dir: &Path) {
    for line in format_render_output(written, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Carousel
// ============================================================================

/// Format sampled carousel poses, one block per sample time.
///
/// ```text
/// 0.50s
///     001 translate3d(...) scale(...)
/// ```
pub fn format_carousel_frames(frames: &[(f64, Vec<Transform>)]) -> Vec<String> {
    let mut lines = Vec::new();
    for (time, poses) in frames {
        lines.push(format!("{time:.2}s"));
        for (i, pose) in poses.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), pose.to_css()));
        }
    }
    lines
}

pub fn print_carousel_frames(frames: &[(f64, Vec<Transform>)]) {
    for line in format_carousel_frames(frames) {
        println!("{}", line);
    }
}
