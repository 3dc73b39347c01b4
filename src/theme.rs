//! Light/dark theme toggle.

use crate::dom::{Document, NodeId};
use crate::preferences::{PreferenceKey, PreferenceStore};
use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::info;

pub const TOGGLE_ID: &str = "theme-toggle";
pub const MOBILE_TOGGLE_ID: &str = "mobile-theme-toggle";

/// Class on the root element that switches the stylesheet to dark mode.
const DARK_CLASS: &str = "dark";
const HIDDEN_CLASS: &str = "hidden";

/// (sun, moon) icon ids for the desktop and mobile toggles.
const ICON_PAIRS: [(&str, &str); 2] = [
    ("sun-icon", "moon-icon"),
    ("mobile-sun-icon", "mobile-moon-icon"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
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
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => bail!("Unknown theme: '{}'", other),
        }
    }
}

#[derive(Debug)]
pub struct ThemeManager {
    theme: Theme,
}

impl ThemeManager {
    /// Read the saved theme (falling back to `default`) and apply it.
    ///
    /// Anything other than `"dark"` in storage renders the light theme.
    pub fn init(doc: &mut Document, prefs: &PreferenceStore, default: Theme) -> Self {
        let theme = prefs
            .get(PreferenceKey::Theme, default.as_str())
            .parse()
            .unwrap_or(Theme::Light);
        let manager = Self { theme };
        manager.apply(doc);
        manager
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn apply(&self, doc: &mut Document) {
        let root = doc.root();
        let dark = self.theme == Theme::Dark;
        if dark {
            doc.add_class(root, DARK_CLASS);
        } else {
            doc.remove_class(root, DARK_CLASS);
        }

        // The sun offers a way back to light, so it shows while dark
        for (sun, moon) in ICON_PAIRS {
            set_hidden(doc, sun, !dark);
            set_hidden(doc, moon, dark);
        }
    }

    pub fn toggle(&mut self, doc: &mut Document, prefs: &mut PreferenceStore) {
        self.theme = self.theme.toggled();
        info!("Theme switched to {}", self.theme);
        prefs.set(PreferenceKey::Theme, self.theme.as_str());
        self.apply(doc);
    }

    /// The toggle buttons present on the page.
    pub fn triggers(doc: &Document) -> Vec<NodeId> {
        [TOGGLE_ID, MOBILE_TOGGLE_ID]
            .into_iter()
            .filter_map(|id| doc.get_element_by_id(id))
            .collect()
    }
}

fn set_hidden(doc: &mut Document, id: &str, hidden: bool) {
    let Some(node) = doc.get_element_by_id(id) else {
        return;
    };
    if hidden {
        doc.add_class(node, HIDDEN_CLASS);
    } else {
        doc.remove_class(node, HIDDEN_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn page() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let toggle = doc.build("button").id(TOGGLE_ID).append_to(body);
        doc.build("svg").id("sun-icon").append_to(toggle);
        doc.build("svg").id("moon-icon").append_to(toggle);
        doc
    }

    fn hidden(doc: &Document, id: &str) -> bool {
        doc.has_class(doc.get_element_by_id(id).unwrap(), HIDDEN_CLASS)
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }

    #[test]
    fn test_defaults_to_light() {
        let mut doc = page();
        let manager = ThemeManager::init(&mut doc, &PreferenceStore::in_memory(), Theme::Light);

        assert_eq!(manager.theme(), Theme::Light);
        assert!(!doc.has_class(doc.root(), DARK_CLASS));
        assert!(hidden(&doc, "sun-icon"));
        assert!(!hidden(&doc, "moon-icon"));
    }

    #[test]
    fn test_saved_dark_theme_applied() {
        let mut doc = page();
        let prefs = PreferenceStore::new(Box::new(MemoryStorage::with_items([("theme", "dark")])));
        let manager = ThemeManager::init(&mut doc, &prefs, Theme::Light);

        assert_eq!(manager.theme(), Theme::Dark);
        assert!(doc.has_class(doc.root(), DARK_CLASS));
        assert!(!hidden(&doc, "sun-icon"));
        assert!(hidden(&doc, "moon-icon"));
    }

    #[test]
    fn test_unknown_saved_theme_renders_light() {
        let mut doc = page();
        let prefs = PreferenceStore::new(Box::new(MemoryStorage::with_items([("theme", "sepia")])));
        let manager = ThemeManager::init(&mut doc, &prefs, Theme::Dark);
        assert_eq!(manager.theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let mut doc = page();
        let mut prefs = PreferenceStore::in_memory();
        let mut manager = ThemeManager::init(&mut doc, &prefs, Theme::Light);

        manager.toggle(&mut doc, &mut prefs);
        assert_eq!(manager.theme(), Theme::Dark);
        assert_eq!(prefs.get(PreferenceKey::Theme, "light"), "dark");
        assert!(doc.has_class(doc.root(), DARK_CLASS));

        manager.toggle(&mut doc, &mut prefs);
        assert_eq!(prefs.get(PreferenceKey::Theme, "dark"), "light");
        assert!(!doc.has_class(doc.root(), DARK_CLASS));
    }

    #[test]
    fn test_missing_icons_are_ignored() {
        let mut doc = Document::new();
        let mut prefs = PreferenceStore::in_memory();
        let mut manager = ThemeManager::init(&mut doc, &prefs, Theme::Light);
        manager.toggle(&mut doc, &mut prefs);
        assert!(ThemeManager::triggers(&doc).is_empty());
    }
}
