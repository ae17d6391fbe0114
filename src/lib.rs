//! # Copydeck
//!
//! The presentation core of a marketing site whose copy lives in a headless
//! CMS. Content arrives as two JSON documents, a set of slug layouts
//! (templates) and a set of pages (populated instances of those
//! templates), and everything on screen is derived from them.
//!
//! # Architecture
//!
//! ```text
//! slugs.json + pages.json ──► ContentStore ──► navigation ──► render ──► dist/
//!                                   │                           ▲
//!                                   └────────── pages ──────────┘
//! config.toml ──► SiteConfig ──► colors, breakpoint, hero, carousel
//! ```
//!
//! Loading is the only fallible step. Past that point every derivation is
//! best-effort: navigation extraction papers over authoring gaps with
//! defaults and reports them as warnings, and unknown routes render the
//! not-found view.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`copy`] | Content tree schema: components, slug layouts, pages, structural checks |
//! | [`store`] | Loads and indexes the two content documents; page and layout lookups |
//! | [`navigation`] | Turns the navigation page into links and dropdowns |
//! | [`carousel`] | Coin carousel motion models and their start/stop controller |
//! | [`gradient`] | CSS gradient builder with validation |
//! | [`rotation`] | Rotating headline word schedule |
//! | [`navbar`] | Nav bar variant and visibility with scoped overrides |
//! | [`config`] | Layered `config.toml` loading, validation, and CSS generation |
//! | [`render`] | Static HTML for every route using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Template variables are Rust expressions and every
//! interpolation is escaped, which matters here because all text comes from
//! CMS authors.
//!
//! ## Lenient Content, Strict Config
//!
//! Content documents deserialize leniently: a value that does not fit its
//! slot becomes an empty slot instead of failing the whole load. Config is
//! the opposite. Unknown keys and invalid values are errors, because config
//! is written by the developer running the build.
//!
//! ## Motion Without a Clock
//!
//! Carousel models are pure functions of time or progress. The
//! [`carousel::CarouselController`] is the only stateful piece, and it takes
//! its frame scheduler as a parameter, so tests drive it with a
//! [`carousel::TickRegistry`] instead of a real animation loop.

pub mod carousel;
pub mod config;
pub mod copy;
pub mod gradient;
pub mod navbar;
pub mod navigation;
pub mod output;
pub mod render;
pub mod rotation;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
