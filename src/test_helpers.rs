//! Shared test utilities for the copydeck test suite.
//!
//! Provides fixture setup and terse builders for populated content trees,
//! so tests can spell out a navigation page the way an author would:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let components = vec![
//!     heading("Brand"),
//!     url("/about", "About"),
//!     dropdown("Programs", vec![
//!         column("Main", vec![("Fusion", "/fusion"), ("Fission", "/fission")]),
//!     ]),
//! ];
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::copy::{Component, ComponentList, ComponentNode, FileValue, ImageValue, UrlValue};
use crate::store::ContentStore;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Load the fixture store with the default document names.
pub fn fixture_store() -> (TempDir, ContentStore) {
    let tmp = setup_fixtures();
    let store = ContentStore::load(tmp.path(), &Default::default()).unwrap();
    (tmp, store)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Atomic components (populated, not required)
// =========================================================================

fn slot(component: ComponentNode) -> Component {
    Component {
        required: false,
        component,
    }
}

pub fn heading(value: &str) -> Component {
    slot(ComponentNode::Heading {
        value: Some(value.to_string()),
    })
}

pub fn text(value: &str) -> Component {
    slot(ComponentNode::Text {
        value: Some(value.to_string()),
    })
}

pub fn image(src: &str, alt: &str) -> Component {
    slot(ComponentNode::Image {
        value: Some(ImageValue {
            src: Some(src.to_string()),
            alt: Some(alt.to_string()),
            ..Default::default()
        }),
    })
}

pub fn url(href: &str, text: &str) -> Component {
    slot(ComponentNode::Url {
        value: Some(UrlValue {
            href: Some(href.to_string()),
            text: Some(text.to_string()),
            ..Default::default()
        }),
    })
}

/// A `URL` slot straight from a layout, with no value.
pub fn url_template() -> Component {
    slot(ComponentNode::Url { value: None })
}

pub fn file(url: &str, filename: &str) -> Component {
    slot(ComponentNode::File {
        value: Some(FileValue {
            url: Some(url.to_string()),
            filename: Some(filename.to_string()),
            ..Default::default()
        }),
    })
}

// =========================================================================
// Lists
// =========================================================================

/// A list with `children` populated in `value`.
pub fn list(rigid: bool, children: Vec<Component>) -> Component {
    slot(ComponentNode::ComponentList(ComponentList {
        rigid,
        components: Vec::new(),
        value: Some(children),
    }))
}

pub fn rigid_list(children: Vec<Component>) -> Component {
    list(true, children)
}

/// A list whose entries were authored in `components`, with no `value`.
pub fn list_in_components(children: Vec<Component>) -> Component {
    slot(ComponentNode::ComponentList(ComponentList {
        rigid: false,
        components: children,
        value: None,
    }))
}

/// Link record: `[Text(title), URL(href, title)]`.
pub fn link_record(title: &str, href: &str) -> Component {
    list(false, vec![text(title), url(href, title)])
}

/// Dropdown column: a title followed by link records.
pub fn column(title: &str, links: Vec<(&str, &str)>) -> Component {
    let mut children = vec![text(title)];
    children.extend(links.into_iter().map(|(t, h)| link_record(t, h)));
    list(false, children)
}

/// Rigid dropdown: a title followed by columns.
pub fn dropdown(title: &str, columns: Vec<Component>) -> Component {
    let mut children = vec![text(title)];
    children.extend(columns);
    rigid_list(children)
}
