//! Typed shape of CMS copy.
//!
//! Content is a tree. Leaves are atomic components (`Heading`, `Text`,
//! `Image`, `URL`, `File`); the only composite is `ComponentList`, whose
//! entries are themselves [`Component`] wrappers and may nest to any depth.
//!
//! The same types describe both a [`SlugLayout`] (the template, where every
//! `value` is absent) and a [`Page`] (the template with values populated).
//!
//! ## JSON shape
//!
//! ```json
//! {
//!   "required": true,
//!   "component": {
//!     "type": "ComponentList",
//!     "rigid": true,
//!     "components": [],
//!     "value": [
//!       { "required": true, "component": { "type": "Text", "value": "Programs" } },
//!       { "required": false, "component": { "type": "URL", "value": { "href": "/a", "text": "A" } } }
//!     ]
//!   }
//! }
//! ```
//!
//! Value payloads are read leniently: a payload of the wrong shape loads as
//! `None` instead of failing the whole document, and unknown keys inside
//! object payloads are kept in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One slot in a content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Whether the slot must be populated in a page.
    #[serde(default)]
    pub required: bool,
    pub component: ComponentNode,
}

/// The content carried by a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentNode {
    Heading {
        #[serde(
            default,
            deserialize_with = "lenient",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<String>,
    },
    Text {
        #[serde(
            default,
            deserialize_with = "lenient",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<String>,
    },
    Image {
        #[serde(
            default,
            deserialize_with = "lenient",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<ImageValue>,
    },
    #[serde(rename = "URL")]
    Url {
        #[serde(
            default,
            deserialize_with = "lenient",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<UrlValue>,
    },
    File {
        #[serde(
            default,
            deserialize_with = "lenient",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<FileValue>,
    },
    ComponentList(ComponentList),
}

/// Discriminant of a [`ComponentNode`], named as it appears in the JSON tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Heading,
    Text,
    Image,
    Url,
    File,
    ComponentList,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Heading => "Heading",
            ComponentKind::Text => "Text",
            ComponentKind::Image => "Image",
            ComponentKind::Url => "URL",
            ComponentKind::File => "File",
            ComponentKind::ComponentList => "ComponentList",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Image` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `URL` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `File` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Recursive composite node.
///
/// `rigid` lists have a fixed slot structure (dropdown menus); open lists
/// accept any number of entries (link collections).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentList {
    #[serde(default)]
    pub rigid: bool,
    /// Template entries.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Populated entries, present in pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<Component>>,
}

impl ComponentList {
    /// Entries to read content from: `value` when it holds anything,
    /// otherwise the template `components`.
    ///
    /// Authored copy puts populated entries in either place, so readers go
    /// through this instead of picking a field.
    pub fn populated(&self) -> &[Component] {
        match &self.value {
            Some(entries) if !entries.is_empty() => entries,
            _ => &self.components,
        }
    }
}

impl ComponentNode {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentNode::Heading { .. } => ComponentKind::Heading,
            ComponentNode::Text { .. } => ComponentKind::Text,
            ComponentNode::Image { .. } => ComponentKind::Image,
            ComponentNode::Url { .. } => ComponentKind::Url,
            ComponentNode::File { .. } => ComponentKind::File,
            ComponentNode::ComponentList(_) => ComponentKind::ComponentList,
        }
    }

    /// The string payload of a `Text` node, if it has a non-empty one.
    pub fn text(&self) -> Option<&str> {
        match self {
            ComponentNode::Text { value: Some(v) } if !v.is_empty() => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ComponentList> {
        match self {
            ComponentNode::ComponentList(list) => Some(list),
            _ => None,
        }
    }

    /// Whether this node carries a value. Lists count as populated when they
    /// have a `value` sequence.
    pub fn is_populated(&self) -> bool {
        match self {
            ComponentNode::Heading { value } | ComponentNode::Text { value } => value.is_some(),
            ComponentNode::Image { value } => value.is_some(),
            ComponentNode::Url { value } => value.is_some(),
            ComponentNode::File { value } => value.is_some(),
            ComponentNode::ComponentList(list) => list.value.is_some(),
        }
    }
}

/// A page template: structure without values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugLayout {
    pub title: String,
    /// Slug URL
    pub url: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// A concrete page: its layout's structure with values populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    /// Slug URL
    pub url: String,
    /// Id of the [`SlugLayout`] this page follows.
    #[serde(rename = "slugLayout")]
    pub slug_layout: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// A structural problem found when comparing a page to its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    /// The page names a layout id the store doesn't have.
    UnknownLayout { layout: String },
    /// A required top-level slot has no value.
    RequiredSlotEmpty { position: usize, kind: ComponentKind },
    /// The page's slot type differs from the layout's at the same position.
    KindMismatch {
        position: usize,
        layout: ComponentKind,
        page: ComponentKind,
    },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentIssue::UnknownLayout { layout } => write!(f, "unknown slug layout '{layout}'"),
            ContentIssue::RequiredSlotEmpty { position, kind } => {
                write!(f, "required {kind} at position {position} has no value")
            }
            ContentIssue::KindMismatch {
                position,
                layout,
                page,
            } => write!(
                f,
                "position {position}: layout expects {layout}, page has {page}"
            ),
        }
    }
}

/// Compare a page's top-level slots against its layout.
///
/// `layout` is `None` when the page's layout id could not be resolved.
/// Only reports; rendering never depends on this.
pub fn check_page(page: &Page, layout: Option<&SlugLayout>) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    let Some(layout) = layout else {
        issues.push(ContentIssue::UnknownLayout {
            layout: page.slug_layout.clone(),
        });
        return issues;
    };

    for (position, slot) in page.components.iter().enumerate() {
        if let Some(template) = layout.components.get(position) {
            let (expected, actual) = (template.component.kind(), slot.component.kind());
            if expected != actual {
                issues.push(ContentIssue::KindMismatch {
                    position,
                    layout: expected,
                    page: actual,
                });
            }
        }
        if slot.required && !slot.component.is_populated() {
            issues.push(ContentIssue::RequiredSlotEmpty {
                position,
                kind: slot.component.kind(),
            });
        }
    }

    issues
}

/// Deserialize an optional payload, turning a wrongly-shaped one into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Component {
        serde_json::from_value(value).unwrap()
    }

    // =========================================================================
    // Deserialization
    // =========================================================================

    #[test]
    fn parses_every_atomic_kind() {
        let kinds: Vec<ComponentKind> = [
            json!({"required": true, "component": {"type": "Heading", "value": "Hi"}}),
            json!({"required": true, "component": {"type": "Text", "value": "Body"}}),
            json!({"required": true, "component": {"type": "Image", "value": {"src": "/a.png", "alt": "A"}}}),
            json!({"required": true, "component": {"type": "URL", "value": {"href": "/a", "text": "A"}}}),
            json!({"required": true, "component": {"type": "File", "value": {"url": "/f.pdf", "filename": "f.pdf"}}}),
        ]
        .into_iter()
        .map(|v| parse(v).component.kind())
        .collect();

        assert_eq!(
            kinds,
            vec![
                ComponentKind::Heading,
                ComponentKind::Text,
                ComponentKind::Image,
                ComponentKind::Url,
                ComponentKind::File,
            ]
        );
    }

    #[test]
    fn template_nodes_have_no_value() {
        let c = parse(json!({"required": false, "component": {"type": "URL"}}));
        assert_eq!(c.component, ComponentNode::Url { value: None });
        assert!(!c.component.is_populated());
    }

    #[test]
    fn nested_lists_parse_recursively() {
        let c = parse(json!({
            "required": true,
            "component": {
                "type": "ComponentList",
                "rigid": true,
                "components": [],
                "value": [
                    {"required": true, "component": {"type": "ComponentList", "rigid": false, "components": [
                        {"required": true, "component": {"type": "Text", "value": "deep"}}
                    ]}}
                ]
            }
        }));

        let outer = c.component.as_list().unwrap();
        assert!(outer.rigid);
        let inner = outer.populated()[0].component.as_list().unwrap();
        assert!(!inner.rigid);
        assert_eq!(inner.populated()[0].component.text(), Some("deep"));
    }

    #[test]
    fn malformed_payload_loads_as_none() {
        let c = parse(json!({"required": true, "component": {"type": "URL", "value": "not-an-object"}}));
        assert_eq!(c.component, ComponentNode::Url { value: None });

        let c = parse(json!({"required": true, "component": {"type": "Text", "value": 42}}));
        assert_eq!(c.component, ComponentNode::Text { value: None });
    }

    #[test]
    fn unknown_payload_keys_are_kept() {
        let c = parse(json!({"component": {"type": "URL", "value": {"href": "/a", "target": "_blank"}}}));
        let ComponentNode::Url { value: Some(url) } = c.component else {
            panic!("expected URL");
        };
        assert_eq!(url.href.as_deref(), Some("/a"));
        assert_eq!(url.text, None);
        assert_eq!(url.extra.get("target"), Some(&json!("_blank")));
    }

    #[test]
    fn required_defaults_to_false() {
        let c = parse(json!({"component": {"type": "Text", "value": "x"}}));
        assert!(!c.required);
    }

    #[test]
    fn page_uses_camel_case_layout_reference() {
        let page: Page = serde_json::from_value(json!({
            "title": "About",
            "url": "/about",
            "slugLayout": "basic",
            "components": []
        }))
        .unwrap();
        assert_eq!(page.slug_layout, "basic");
    }

    #[test]
    fn serialization_keeps_type_tag() {
        let c = Component {
            required: true,
            component: ComponentNode::Url {
                value: Some(UrlValue {
                    href: Some("/x".into()),
                    text: None,
                    extra: Default::default(),
                }),
            },
        };
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["component"]["type"], "URL");
        assert_eq!(v["component"]["value"]["href"], "/x");
    }

    // =========================================================================
    // populated / text helpers
    // =========================================================================

    #[test]
    fn populated_prefers_value() {
        let list = ComponentList {
            rigid: false,
            components: vec![Component {
                required: false,
                component: ComponentNode::Text { value: None },
            }],
            value: Some(vec![Component {
                required: false,
                component: ComponentNode::Text {
                    value: Some("filled".into()),
                },
            }]),
        };
        assert_eq!(list.populated()[0].component.text(), Some("filled"));
    }

    #[test]
    fn populated_falls_back_to_components_when_value_empty() {
        let list = ComponentList {
            rigid: false,
            components: vec![Component {
                required: false,
                component: ComponentNode::Text {
                    value: Some("template".into()),
                },
            }],
            value: Some(vec![]),
        };
        assert_eq!(list.populated()[0].component.text(), Some("template"));
    }

    #[test]
    fn empty_text_is_not_text() {
        assert_eq!(
            ComponentNode::Text {
                value: Some(String::new())
            }
            .text(),
            None
        );
    }

    // =========================================================================
    // check_page
    // =========================================================================

    fn layout_with(kinds: Vec<ComponentNode>) -> SlugLayout {
        SlugLayout {
            title: "Layout".into(),
            url: "/l".into(),
            components: kinds
                .into_iter()
                .map(|component| Component {
                    required: true,
                    component,
                })
                .collect(),
        }
    }

    #[test]
    fn check_page_reports_unknown_layout() {
        let page = Page {
            title: "P".into(),
            url: "/p".into(),
            slug_layout: "missing".into(),
            components: vec![],
        };
        assert_eq!(
            check_page(&page, None),
            vec![ContentIssue::UnknownLayout {
                layout: "missing".into()
            }]
        );
    }

    #[test]
    fn check_page_reports_empty_required_and_mismatch() {
        let layout = layout_with(vec![
            ComponentNode::Heading { value: None },
            ComponentNode::Text { value: None },
        ]);
        let page = Page {
            title: "P".into(),
            url: "/p".into(),
            slug_layout: "l".into(),
            components: vec![
                Component {
                    required: true,
                    component: ComponentNode::Heading { value: None },
                },
                Component {
                    required: false,
                    component: ComponentNode::Url { value: None },
                },
            ],
        };

        let issues = check_page(&page, Some(&layout));
        assert_eq!(
            issues,
            vec![
                ContentIssue::RequiredSlotEmpty {
                    position: 0,
                    kind: ComponentKind::Heading
                },
                ContentIssue::KindMismatch {
                    position: 1,
                    layout: ComponentKind::Text,
                    page: ComponentKind::Url
                },
            ]
        );
    }
}
