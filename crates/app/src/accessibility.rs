//! Theme and contrast state, kept in step with the preference store.

use crate::store::{StoreHandle, KEY_HIGH_CONTRAST, KEY_THEME};
use shared::preferences::{Preferences, Theme};
use tracing::info;

/// App-wide attributes the presentation layer selects styles by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub data_theme: &'static str,
    pub data_high_contrast: &'static str,
}

pub struct AccessibilityState {
    prefs: Preferences,
    store: StoreHandle,
    /// Screen-reader announcements, oldest first; the last one is live
    announcements: Vec<String>,
}

impl AccessibilityState {
    /// Resolve startup preferences from the store, falling back to the
    /// system theme for the theme only.
    pub fn load(store: StoreHandle, system_theme: Option<Theme>) -> Self {
        let prefs = {
            let guard = store.lock();
            Preferences::resolve(
                guard.get::<Theme>(KEY_THEME),
                system_theme,
                guard.get::<bool>(KEY_HIGH_CONTRAST),
            )
        };
        Self {
            prefs,
            store,
            announcements: Vec::new(),
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn high_contrast(&self) -> bool {
        self.prefs.high_contrast
    }

    pub fn attributes(&self) -> DocumentAttributes {
        DocumentAttributes {
            data_theme: self.prefs.theme.as_str(),
            data_high_contrast: if self.prefs.high_contrast {
                "true"
            } else {
                "false"
            },
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.prefs.theme = self.prefs.theme.toggled();
        self.store.lock().set(KEY_THEME, &self.prefs.theme);
        self.announce();
        self.prefs.theme
    }

    pub fn toggle_high_contrast(&mut self) -> bool {
        self.prefs.high_contrast = !self.prefs.high_contrast;
        self.store.lock().set(KEY_HIGH_CONTRAST, &self.prefs.high_contrast);
        self.announce();
        self.prefs.high_contrast
    }

    fn announce(&mut self) {
        let message = self.prefs.announcement();
        info!("{}", message);
        self.announcements.push(message);
    }

    pub fn announcements(&self) -> &[String] {
        &self.announcements
    }

    pub fn live_announcement(&self) -> Option<&str> {
        self.announcements.last().map(String::as_str)
    }
}
