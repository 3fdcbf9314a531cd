//! Component/directive library and the resolved theme it carries.

use std::collections::BTreeSet;

use crate::app::{Result, RiffleError};
use crate::config::{Blueprint, ThemeColors, ThemeConfig};

use super::{Application, Plugin};

/// Components every application gets from the library.
pub const DEFAULT_COMPONENTS: &[&str] = &[
    "app-bar", "btn", "card", "chip", "dialog", "list", "navigation-drawer", "progress-linear",
    "snackbar", "text-field",
];

/// Directives every application gets from the library.
pub const DEFAULT_DIRECTIVES: &[&str] = &["click-outside", "intersect", "ripple", "scroll"];

/// The active theme: a name and its palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

impl ThemeConfig {
    /// Resolve the default theme into a concrete palette.
    pub fn resolve(&self) -> Result<Theme> {
        let colors = self.default_colors().ok_or_else(|| {
            RiffleError::Theme(format!(
                "default theme {:?} is not defined (available: {})",
                self.default_theme,
                self.themes.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })?;

        Ok(Theme {
            name: self.default_theme.clone(),
            colors: colors.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ComponentLibrary {
    components: BTreeSet<String>,
    directives: BTreeSet<String>,
    blueprint: Blueprint,
    theme: Theme,
}

impl ComponentLibrary {
    /// Build the library with the default component and directive sets.
    pub fn new(theme: &ThemeConfig) -> Result<Self> {
        Ok(Self {
            components: DEFAULT_COMPONENTS.iter().map(|s| s.to_string()).collect(),
            directives: DEFAULT_DIRECTIVES.iter().map(|s| s.to_string()).collect(),
            blueprint: theme.blueprint,
            theme: theme.resolve()?,
        })
    }

    pub fn with_component(mut self, name: impl Into<String>) -> Self {
        self.components.insert(name.into());
        self
    }

    pub fn with_directive(mut self, name: impl Into<String>) -> Self {
        self.directives.insert(name.into());
        self
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains(name)
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.contains(name)
    }

    pub fn blueprint(&self) -> Blueprint {
        self.blueprint
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Plugin for ComponentLibrary {
    fn install(self, app: &mut Application) {
        tracing::debug!(
            components = self.components.len(),
            directives = self.directives.len(),
            blueprint = %self.blueprint,
            theme = %self.theme.name,
            "installing component library"
        );
        app.library = Some(self);
    }
}
