//! A site language code checked against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A registered, enabled site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    config: &'static LanguageConfig,
}

impl Language {
    /// Parse a stored `lang` value.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err` if the code is unknown or disabled
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { config }),
            Some(_) => bail!("Language '{}' is not offered", code),
            None => bail!("Unknown site language '{}'", code),
        }
    }

    /// The language the page markup is written in.
    pub fn canonical() -> Language {
        Language {
            config: LanguageRegistry::get().canonical(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.config.code
    }

    /// Name in the language's own script (e.g. "हिन्दी").
    pub fn native_name(&self) -> &'static str {
        self.config.native_name
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config.code)
    }
}
