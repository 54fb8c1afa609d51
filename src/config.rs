//! Process-wide defaults.
//!
//! Locale-sensitive operations that are not handed an explicit locale fall
//! back to the default held here. The default is read from the environment
//! the first time it is needed and can be replaced at any point with
//! [`set_default_locale`] or [`set_config`].

use crate::locale::Locale;
use crate::unicode::Strength;
use std::env;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Defaults applied when a call does not specify its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Locale used for collation, case mapping and search.
    pub locale: Locale,
    /// Strength used by [`UString::collate`](crate::UString::collate).
    pub strength: Strength,
}

impl Config {
    /// Build defaults from `UNITEXT_LOCALE`, `LC_ALL`, `LC_COLLATE` and `LANG`,
    /// in that order of precedence.
    #[must_use]
    pub fn from_env() -> Self {
        let locale = ["UNITEXT_LOCALE", "LC_ALL", "LC_COLLATE", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty())
            .map(|value| Locale::new(&value))
            .unwrap_or_default();

        Self {
            locale,
            strength: Strength::default(),
        }
    }
}

fn global() -> &'static RwLock<Config> {
    static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();
    CONFIG.get_or_init(|| {
        let config = Config::from_env();
        tracing::debug!(locale = %config.locale, "initialised default config");
        RwLock::new(config)
    })
}

/// Current process-wide defaults.
#[must_use]
pub fn config() -> Config {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide defaults.
pub fn set_config(config: Config) {
    *global().write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Default locale for locale-sensitive operations.
#[must_use]
pub fn default_locale() -> Locale {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .locale
        .clone()
}

/// Set the default locale.
pub fn set_default_locale(locale: impl Into<Locale>) {
    let locale = locale.into();
    tracing::debug!(%locale, "default locale changed");
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .locale = locale;
}
