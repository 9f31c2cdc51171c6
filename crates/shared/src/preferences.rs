//! Display preferences persisted across restarts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub high_contrast: bool,
}

impl Preferences {
    /// Resolve startup preferences.
    ///
    /// Theme: persisted value, else the system preference, else light.
    /// High contrast only ever comes from the persisted value.
    pub fn resolve(
        persisted_theme: Option<Theme>,
        system_theme: Option<Theme>,
        persisted_high_contrast: Option<bool>,
    ) -> Self {
        Self {
            theme: persisted_theme.or(system_theme).unwrap_or_default(),
            high_contrast: persisted_high_contrast.unwrap_or(false),
        }
    }

    /// Screen-reader text describing the combined state.
    pub fn announcement(&self) -> String {
        format!(
            "Theme changed to {} mode{}",
            self.theme.as_str(),
            if self.high_contrast {
                " with high contrast"
            } else {
                ""
            }
        )
    }
}
