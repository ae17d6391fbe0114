//! Static HTML rendering.
//!
//! Turns the content store into a static site: every page id becomes a
//! route, the navigation page becomes the nav bar on every document, and
//! anything else renders the not-found view.
//!
//! ## Routes
//!
//! | Path | Renders |
//! |------|---------|
//! | `/` | the `home_page` page if the store has it, otherwise the hero |
//! | `/{pageId}` | that page, or not-found when the id is unknown |
//! | anything deeper | not-found |
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # Home
//! ├── 404.html            # Not-found view
//! ├── about/
//! │   └── index.html      # One directory per page id
//! └── ...
//! ```
//!
//! ## Navigation
//!
//! The desktop bar and the mobile sidebar carry the same entries. Which one
//! shows is decided by a CSS media query at `navigation.mobile_breakpoint`.
//! Dropdowns go through [`Dropdown::presentation`], so a dropdown without
//! links renders as a link to `#` and a single-link dropdown as a plain link.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::copy::{Component, ComponentNode, ImageValue, Page};
use crate::gradient::{GradientOptions, build_gradient};
use crate::navbar::{NavBarState, NavVariant};
use crate::navigation::{
    Dropdown, DropdownColumn, DropdownPresentation, FALLBACK_HREF, NavEntry, NavLink,
    navigation_for,
};
use crate::rotation::RotationSchedule;
use crate::store::ContentStore;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Where a request path leads.
#[derive(Debug, Clone, PartialEq)]
pub enum Route<'a> {
    Home,
    Page { id: &'a str, page: &'a Page },
    NotFound,
}

/// Map a request path onto a route.
///
/// Leading and trailing slashes are ignored. A single segment is looked up
/// as a page id.
pub fn resolve_route<'a>(store: &'a ContentStore, path: &str) -> Route<'a> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Route::Home;
    }
    if trimmed.contains('/') {
        return Route::NotFound;
    }
    match store.pages().get_key_value(trimmed) {
        Some((id, page)) => Route::Page {
            id: id.as_str(),
            page,
        },
        None => Route::NotFound,
    }
}

/// Everything a document needs besides its own content.
pub struct Site<'a> {
    store: &'a ContentStore,
    config: &'a SiteConfig,
    entries: Vec<NavEntry>,
    navbar: NavBarState,
    css: String,
}

impl<'a> Site<'a> {
    pub fn new(store: &'a ContentStore, config: &'a SiteConfig) -> Self {
        let navigation = navigation_for(store, &config.content.navigation_page);
        Self {
            store,
            config,
            entries: navigation.entries,
            navbar: NavBarState::new(),
            css: site_css(config),
        }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn navbar(&self) -> &NavBarState {
        &self.navbar
    }

    /// An active override wins over the configured variant.
    fn variant(&self) -> NavVariant {
        match self.navbar.variant() {
            NavVariant::Default => self.config.navigation.variant,
            overridden => overridden,
        }
    }

    /// Render whatever `path` resolves to.
    pub fn render_path(&self, path: &str) -> Markup {
        match resolve_route(self.store, path) {
            Route::Home => self.render_home(),
            Route::Page { id, page } => self.render_page(id, page),
            Route::NotFound => self.render_not_found(),
        }
    }

    /// The home page: the configured home page when it exists, otherwise
    /// the hero. The hero sits under a glass nav bar.
    pub fn render_home(&self) -> Markup {
        if let Some(page) = self.store.page(&self.config.content.home_page) {
            return self.render_page(&self.config.content.home_page, page);
        }
        let _glass = self.navbar.override_variant(NavVariant::Glass);
        self.document("Home", render_hero(self.config))
    }

    pub fn render_page(&self, id: &str, page: &Page) -> Markup {
        let title = if page.title.is_empty() { id } else { &page.title };
        let content = html! {
            main.page {
                h1.page-title { (title) }
                @for component in &page.components {
                    (render_component(component))
                }
                a.button href="/" { "Go Home" }
            }
        };
        self.document(title, content)
    }

    pub fn render_not_found(&self) -> Markup {
        self.document("Page not found", render_not_found())
    }

    fn document(&self, title: &str, content: Markup) -> Markup {
        let header = if self.navbar.hidden() {
            html! {}
        } else {
            html! {
                (render_nav(&self.entries, self.variant(), self.logo()))
                (render_sidebar(&self.entries, self.variant()))
            }
        };
        base_document(title, &self.css, html! { (header) (content) })
    }

    /// First image on the navigation page.
    fn logo(&self) -> Option<&ImageValue> {
        let page = self.store.page(&self.config.content.navigation_page)?;
        page.components.iter().find_map(|c| match &c.component {
            ComponentNode::Image { value } => value.as_ref(),
            _ => None,
        })
    }
}

/// Color tokens, breakpoint rules, then the static stylesheet.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_breakpoint_css(&config.navigation),
        CSS_STATIC
    )
}

/// Render every route into `output_dir` and return the files written.
pub fn write_site(
    store: &ContentStore,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let site = Site::new(store, config);
    let mut written = Vec::new();

    fs::create_dir_all(output_dir)?;

    let index = output_dir.join("index.html");
    fs::write(&index, site.render_home().into_string())?;
    written.push(index);

    for (id, page) in store.pages() {
        let dir = output_dir.join(id);
        fs::create_dir_all(&dir)?;
        let path = dir.join("index.html");
        fs::write(&path, site.render_page(id, page).into_string())?;
        debug!(page = %id, "rendered page");
        written.push(path);
    }

    let not_found = output_dir.join("404.html");
    fs::write(&not_found, site.render_not_found().into_string())?;
    written.push(not_found);

    info!(files = written.len(), dir = %output_dir.display(), "site written");
    Ok(written)
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

/// Desktop nav bar.
pub fn render_nav(
    entries: &[NavEntry],
    variant: NavVariant,
    logo: Option<&ImageValue>,
) -> Markup {
    html! {
        nav class=(variant.class()) {
            div.navbar-container {
                a.logo href="/" {
                    @if let Some(src) = logo.and_then(|l| l.src.as_deref()) {
                        img.logo-image src=(src) alt=(logo.and_then(|l| l.alt.as_deref()).unwrap_or("Logo"));
                    }
                }
                label.hamburger for="nav-toggle" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                div.navbar-links {
                    @for entry in entries {
                        (render_entry(entry))
                    }
                }
            }
        }
    }
}

/// Mobile sidebar with the same entries, opened by the hamburger.
pub fn render_sidebar(entries: &[NavEntry], variant: NavVariant) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.sidebar-overlay for="nav-toggle" aria-hidden="true" {}
        aside.sidebar.glass[variant == NavVariant::Glass] aria-label="Navigation menu" {
            label.sidebar-close for="nav-toggle" { "×" }
            div.sidebar-content {
                @for entry in entries {
                    (render_entry(entry))
                }
            }
        }
    }
}

fn render_entry(entry: &NavEntry) -> Markup {
    match entry {
        NavEntry::Link(link) => render_link(link),
        NavEntry::Dropdown(dropdown) => match dropdown.presentation() {
            DropdownPresentation::Fallback(link) | DropdownPresentation::Single(link) => {
                render_link(&link)
            }
            DropdownPresentation::Menu(dropdown) => render_dropdown(dropdown),
        },
    }
}

fn render_link(link: &NavLink) -> Markup {
    html! {
        a.nav-link href=(link.href) { (link.title) }
    }
}

fn render_dropdown(dropdown: &Dropdown) -> Markup {
    let trigger = dropdown
        .main_column
        .links
        .first()
        .map_or(FALLBACK_HREF, |l| l.href.as_str());
    let titled = !dropdown.extra_columns.is_empty();
    html! {
        div.dropdown {
            a.nav-link.has-dropdown href=(trigger) { (dropdown.title) }
            div.dropdown-menu {
                div.dropdown-columns {
                    (render_column(&dropdown.main_column, titled))
                    @for column in &dropdown.extra_columns {
                        (render_column(column, true))
                    }
                }
            }
        }
    }
}

fn render_column(column: &DropdownColumn, titled: bool) -> Markup {
    html! {
        div.dropdown-column {
            @if titled {
                div.column-title { (column.title) }
            }
            @for link in &column.links {
                a.dropdown-link href=(link.href) { (link.title) }
            }
        }
    }
}

/// Render one populated content node. Empty slots render nothing.
pub fn render_component(component: &Component) -> Markup {
    match &component.component {
        ComponentNode::Heading { value } => html! {
            @if let Some(text) = value { h2 { (text) } }
        },
        ComponentNode::Text { value } => html! {
            @if let Some(text) = value { p { (text) } }
        },
        ComponentNode::Image { value } => html! {
            @if let Some(src) = value.as_ref().and_then(|v| v.src.as_deref()) {
                img src=(src) alt=(value.as_ref().and_then(|v| v.alt.as_deref()).unwrap_or_default());
            }
        },
        ComponentNode::Url { value } => match value {
            Some(url) => {
                let href = url.href.as_deref().filter(|h| !h.is_empty()).unwrap_or(FALLBACK_HREF);
                let text = url.text.as_deref().unwrap_or(href);
                html! { a href=(href) { (text) } }
            }
            None => html! {},
        },
        ComponentNode::File { value } => html! {
            @if let Some(url) = value.as_ref().and_then(|v| v.url.as_deref()) {
                @let name = value.as_ref().and_then(|v| v.filename.as_deref()).unwrap_or(url);
                a.download href=(url) download=(name) { (name) }
            }
        },
        ComponentNode::ComponentList(list) => html! {
            ul.component-list {
                @for child in list.populated() {
                    li { (render_component(child)) }
                }
            }
        },
    }
}

/// One hero background layer. An invalid gradient is logged and the layer
/// is left without a background.
fn layer(options: &GradientOptions) -> String {
    build_gradient(options).unwrap_or_else(|e| {
        warn!(error = %e, colors = ?options.colors, "hero gradient skipped");
        String::new()
    })
}

/// Hero block: gradient layers, headline, and rotating words.
fn render_hero(config: &SiteConfig) -> Markup {
    let [base, glow, highlight] =
        config::hero_gradients(&config.colors).map(|options| layer(&options));
    let hero = &config.hero;
    html! {
        section.hero style={ "background: " (base) } {
            div.hero-gradient-1 style={ "background: " (glow) } {}
            div.hero-gradient-2 style={ "background: " (highlight) } {}
            div.hero-content {
                h2.hero-title {
                    span.hero-headline { (hero.headline) }
                    (render_rotating_text(&hero.schedule()))
                }
                p.hero-description { (hero.description) }
            }
        }
    }
}

/// Every word of the schedule, stacked, with per-letter delays as CSS
/// variables. Only the first word starts visible; the schedule's timings
/// are exposed as data attributes for the animation script.
pub fn render_rotating_text(schedule: &RotationSchedule) -> Markup {
    if schedule.is_empty() {
        return html! {};
    }
    html! {
        span.rotating-text
            data-interval=(schedule.interval.as_millis())
            data-emphasis=(schedule.emphasis.as_millis()) {
            @for (index, _) in schedule.words().iter().enumerate() {
                span.letter-container.current[index == 0] data-index=(index) {
                    @for letter in schedule.letters(index) {
                        span.letter style={ "--sequentialDelay: " (letter.delay.as_millis()) "ms" } {
                            (letter.glyph)
                        }
                    }
                }
            }
            span.sizing-text aria-hidden="true" { (schedule.measurement_text()) }
        }
    }
}

/// The not-found view.
pub fn render_not_found() -> Markup {
    html! {
        main.not-found {
            h1.not-found-title { "404" }
            p { "Page not found" }
            a.button.button-error href="/" { "Go Home" }
        }
    }
}
