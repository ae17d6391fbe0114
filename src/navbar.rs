//! Shared nav bar presentation state.
//!
//! Pages can ask for the glass variant or hide the bar while they are on
//! screen. Overrides are scoped: each returns a guard, and dropping the
//! guard puts the bar back to its default look.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavVariant {
    #[default]
    Default,
    Glass,
}

impl NavVariant {
    /// CSS class applied to the nav container.
    pub fn class(self) -> &'static str {
        match self {
            NavVariant::Default => "navbar",
            NavVariant::Glass => "navbar navbar-glass",
        }
    }
}

impl fmt::Display for NavVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavVariant::Default => "default",
            NavVariant::Glass => "glass",
        })
    }
}

#[derive(Debug, Default)]
pub struct NavBarState {
    variant: Cell<NavVariant>,
    hidden: Cell<bool>,
}

impl NavBarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(&self) -> NavVariant {
        self.variant.get()
    }

    pub fn hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn set_variant(&self, variant: NavVariant) {
        self.variant.set(variant);
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    /// Use `variant` until the guard drops, then go back to
    /// [`NavVariant::Default`].
    #[must_use = "the override ends when the guard is dropped"]
    pub fn override_variant(&self, variant: NavVariant) -> VariantGuard<'_> {
        self.variant.set(variant);
        VariantGuard { state: self }
    }

    /// Hide (or show) the bar until the guard drops, then show it again.
    #[must_use = "the override ends when the guard is dropped"]
    pub fn override_hidden(&self, hidden: bool) -> HiddenGuard<'_> {
        self.hidden.set(hidden);
        HiddenGuard { state: self }
    }
}

pub struct VariantGuard<'a> {
    state: &'a NavBarState,
}

impl Drop for VariantGuard<'_> {
    fn drop(&mut self) {
        self.state.variant.set(NavVariant::Default);
    }
}

pub struct HiddenGuard<'a> {
    state: &'a NavBarState,
}

impl Drop for HiddenGuard<'_> {
    fn drop(&mut self) {
        self.state.hidden.set(false);
    }
}
