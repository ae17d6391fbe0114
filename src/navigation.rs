//! Navigation extraction from the navigation page's content tree.
//!
//! The navigation page is authored as a flat list of top-level components:
//!
//! ```text
//! Heading / Image          → logo, not navigation (skipped)
//! URL                      → simple link
//! ComponentList rigid=true → dropdown
//!   ├── Text               → dropdown title
//!   ├── ComponentList      → column 1 (main)
//!   │   ├── Text           → column title
//!   │   └── ComponentList  → one link record
//!   │       ├── Text       → link title
//!   │       └── URL        → link href
//!   ├── ComponentList      → column 2..4 (extra)
//!   └── ...                → columns past the 4th are dropped
//! ```
//!
//! Extraction is best-effort and never fails. Missing hrefs become `#`,
//! missing link text becomes `Link`, untitled columns become `Column N`,
//! untitled dropdowns and incomplete link records are left out. Each of
//! these is reported as a [`NavWarning`] next to the result so authoring
//! mistakes can be surfaced without changing what renders.
//!
//! The output is recomputed on every call and borrows nothing from the
//! input, which is only read.

use crate::copy::{Component, ComponentList, ComponentNode};
use crate::store::ContentStore;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Columns a dropdown may carry besides its main column.
pub const MAX_EXTRA_COLUMNS: usize = 3;

/// Href used when an authored link has none.
pub const FALLBACK_HREF: &str = "#";

/// Text used for a top-level link without any.
pub const FALLBACK_LINK_TEXT: &str = "Link";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

impl NavLink {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// A titled group of links inside a dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropdownColumn {
    pub title: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub title: String,
    /// First nested list. Empty (no title, no links) when the dropdown had
    /// no nested lists at all.
    pub main_column: DropdownColumn,
    /// Up to [`MAX_EXTRA_COLUMNS`] further columns.
    pub extra_columns: Vec<DropdownColumn>,
}

/// How a consumer should present a [`Dropdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownPresentation<'a> {
    /// No links anywhere: a plain link to `#` titled with the dropdown title.
    Fallback(NavLink),
    /// Exactly one link and no extra columns: a plain link titled with the
    /// dropdown title, pointing at that link.
    Single(NavLink),
    /// An interactive menu.
    Menu(&'a Dropdown),
}

impl Dropdown {
    /// Links across every column.
    pub fn link_count(&self) -> usize {
        self.columns().map(|c| c.links.len()).sum()
    }

    /// Main column followed by the extra columns.
    pub fn columns(&self) -> impl Iterator<Item = &DropdownColumn> {
        std::iter::once(&self.main_column).chain(self.extra_columns.iter())
    }

    /// Apply the collapse rule consumers render with.
    pub fn presentation(&self) -> DropdownPresentation<'_> {
        match self.link_count() {
            0 => DropdownPresentation::Fallback(NavLink::new(&self.title, FALLBACK_HREF)),
            1 if self.extra_columns.is_empty() => {
                let href = self
                    .main_column
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_else(|| FALLBACK_HREF.to_string());
                DropdownPresentation::Single(NavLink::new(&self.title, href))
            }
            _ => DropdownPresentation::Menu(self),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavEntry {
    Link(NavLink),
    Dropdown(Dropdown),
}

impl NavEntry {
    pub fn title(&self) -> &str {
        match self {
            NavEntry::Link(link) => &link.title,
            NavEntry::Dropdown(dropdown) => &dropdown.title,
        }
    }
}

/// Something in the authored navigation that extraction had to paper over.
///
/// Positions are indices into the page's top-level components; columns and
/// records are 0-based within their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavWarning {
    /// A top-level URL with no href; it links to `#`.
    LinkWithoutHref { position: usize },
    /// A top-level URL with no text; it reads `Link`.
    LinkWithoutText { position: usize },
    /// A rigid list with no Text title; the whole dropdown is left out.
    DropdownWithoutTitle { position: usize },
    /// A column with no Text title; it is named `Column N`.
    UntitledColumn { position: usize, column: usize },
    /// A link record whose URL has no href; it links to `#`.
    RecordWithoutHref {
        position: usize,
        column: usize,
        record: usize,
    },
    /// A link record missing its Text or URL; it is left out.
    IncompleteRecord {
        position: usize,
        column: usize,
        record: usize,
    },
    /// Nested lists past the fourth; they are left out.
    ColumnsDropped { position: usize, dropped: usize },
}

impl fmt::Display for NavWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavWarning::LinkWithoutHref { position } => {
                write!(f, "link at {position} has no href, using '{FALLBACK_HREF}'")
            }
            NavWarning::LinkWithoutText { position } => {
                write!(f, "link at {position} has no text, using '{FALLBACK_LINK_TEXT}'")
            }
            NavWarning::DropdownWithoutTitle { position } => {
                write!(f, "dropdown at {position} has no title and was skipped")
            }
            NavWarning::UntitledColumn { position, column } => write!(
                f,
                "dropdown at {position}: column {} has no title, using 'Column {}'",
                column + 1,
                column + 1
            ),
            NavWarning::RecordWithoutHref {
                position,
                column,
                record,
            } => write!(
                f,
                "dropdown at {position}: column {} link {} has no href, using '{FALLBACK_HREF}'",
                column + 1,
                record + 1
            ),
            NavWarning::IncompleteRecord {
                position,
                column,
                record,
            } => write!(
                f,
                "dropdown at {position}: column {} link {} lacks a title or url and was skipped",
                column + 1,
                record + 1
            ),
            NavWarning::ColumnsDropped { position, dropped } => write!(
                f,
                "dropdown at {position}: {dropped} column(s) beyond {} were dropped",
                MAX_EXTRA_COLUMNS + 1
            ),
        }
    }
}

/// Extracted navigation plus whatever was papered over to produce it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub entries: Vec<NavEntry>,
    pub warnings: Vec<NavWarning>,
}

/// Extract navigation entries, discarding warnings.
pub fn extract_navigation(components: &[Component]) -> Vec<NavEntry> {
    extract(components).entries
}

/// Navigation of the page `page_id`, or an empty navigation when the store
/// has no such page.
pub fn navigation_for(store: &ContentStore, page_id: &str) -> Navigation {
    match store.page(page_id) {
        Some(page) => extract(&page.components),
        None => {
            debug!(page_id, "no navigation page, rendering empty navigation");
            Navigation::default()
        }
    }
}

/// Walk the top-level components and build navigation entries in order.
pub fn extract(components: &[Component]) -> Navigation {
    let mut nav = Navigation::default();

    for (position, slot) in components.iter().enumerate() {
        match &slot.component {
            // Logo path, not navigation.
            ComponentNode::Heading { .. } | ComponentNode::Image { .. } => {}
            ComponentNode::Url { value } => {
                let href = value.as_ref().and_then(|v| non_empty(v.href.as_deref()));
                let text = value.as_ref().and_then(|v| non_empty(v.text.as_deref()));
                if href.is_none() {
                    nav.warnings.push(NavWarning::LinkWithoutHref { position });
                }
                if text.is_none() {
                    nav.warnings.push(NavWarning::LinkWithoutText { position });
                }
                nav.entries.push(NavEntry::Link(NavLink::new(
                    text.unwrap_or(FALLBACK_LINK_TEXT),
                    href.unwrap_or(FALLBACK_HREF),
                )));
            }
            ComponentNode::ComponentList(list) if list.rigid => {
                if let Some(dropdown) = extract_dropdown(list, position, &mut nav.warnings) {
                    nav.entries.push(NavEntry::Dropdown(dropdown));
                }
            }
            _ => {}
        }
    }

    for warning in &nav.warnings {
        warn!("navigation: {warning}");
    }
    nav
}

fn extract_dropdown(
    list: &ComponentList,
    position: usize,
    warnings: &mut Vec<NavWarning>,
) -> Option<Dropdown> {
    let entries = list.populated();

    let Some(title) = entries.iter().find_map(|c| c.component.text()) else {
        warnings.push(NavWarning::DropdownWithoutTitle { position });
        return None;
    };

    let nested: Vec<&ComponentList> = entries
        .iter()
        .filter_map(|c| c.component.as_list())
        .collect();

    let mut columns = nested
        .iter()
        .take(MAX_EXTRA_COLUMNS + 1)
        .enumerate()
        .map(|(column, nested)| extract_column(nested, position, column, warnings));

    let main_column = columns.next().unwrap_or_default();
    let extra_columns: Vec<DropdownColumn> = columns.collect();

    let dropped = nested.len().saturating_sub(MAX_EXTRA_COLUMNS + 1);
    if dropped > 0 {
        warnings.push(NavWarning::ColumnsDropped { position, dropped });
    }

    Some(Dropdown {
        title: title.to_string(),
        main_column,
        extra_columns,
    })
}

fn extract_column(
    list: &ComponentList,
    position: usize,
    column: usize,
    warnings: &mut Vec<NavWarning>,
) -> DropdownColumn {
    let entries = list.populated();

    let title = match entries.iter().find_map(|c| c.component.text()) {
        Some(title) => title.to_string(),
        None => {
            warnings.push(NavWarning::UntitledColumn { position, column });
            format!("Column {}", column + 1)
        }
    };

    let links = entries
        .iter()
        .filter_map(|c| c.component.as_list())
        .enumerate()
        .filter_map(|(record, record_list)| {
            extract_link_record(record_list, position, column, record, warnings)
        })
        .collect();

    DropdownColumn { title, links }
}

/// One link from a nested list holding a Text (title) and a URL (href).
fn extract_link_record(
    list: &ComponentList,
    position: usize,
    column: usize,
    record: usize,
    warnings: &mut Vec<NavWarning>,
) -> Option<NavLink> {
    let entries = list.populated();

    let title = entries.iter().find_map(|c| c.component.text());
    let url = entries.iter().find_map(|c| match &c.component {
        ComponentNode::Url { value } => Some(value),
        _ => None,
    });

    let (Some(title), Some(url)) = (title, url) else {
        warnings.push(NavWarning::IncompleteRecord {
            position,
            column,
            record,
        });
        return None;
    };

    let href = match url.as_ref().and_then(|v| non_empty(v.href.as_deref())) {
        Some(href) => href,
        None => {
            warnings.push(NavWarning::RecordWithoutHref {
                position,
                column,
                record,
            });
            FALLBACK_HREF
        }
    };

    Some(NavLink::new(title, href))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
