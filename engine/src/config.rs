use serde::Deserialize;
use std::{env, path::PathBuf};
use thiserror::Error;

use wallet_types::ui::UiOptions;

/// Environment variable naming a deck file; wins over `[deck].path`.
pub const DECK_ENV_VAR: &str = "WALLET_DECK";

#[derive(Debug, Default, Deserialize)]
pub struct WalletConfig {
    pub app: Option<AppConfig>,
    pub deck: Option<DeckConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for markers and hints.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable flip and selection animations.
    #[serde(default)]
    pub reduced_motion: bool,
}

impl AppConfig {
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        UiOptions {
            ascii_only: self.ascii_only,
            high_contrast: self.high_contrast,
            reduced_motion: self.reduced_motion,
        }
    }
}

/// Which deck to show.
///
/// ```toml
/// [deck]
/// path = "${HOME}/cards.toml"
/// selected_index = 0
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DeckConfig {
    /// Deck file; `${VAR}` references are expanded.
    pub path: Option<String>,
    /// Card selected at startup. Defaults to the first card.
    pub selected_index: Option<usize>,
}

/// Where the deck comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSource {
    /// The sample deck compiled into the binary.
    BuiltIn,
    File(PathBuf),
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl WalletConfig {
    /// Load `~/.wallet/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(config: Option<&Self>) -> UiOptions {
        config
            .and_then(|cfg| cfg.app.as_ref())
            .map(AppConfig::ui_options)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn selected_index(config: Option<&Self>) -> usize {
        config
            .and_then(|cfg| cfg.deck.as_ref())
            .and_then(|deck| deck.selected_index)
            .unwrap_or(0)
    }

    /// Resolve the deck: `env_override` (the value of [`DECK_ENV_VAR`]) first, then the
    /// configured path, then the built-in sample deck. Blank values are ignored.
    #[must_use]
    pub fn deck_source(config: Option<&Self>, env_override: Option<String>) -> DeckSource {
        let configured = config
            .and_then(|cfg| cfg.deck.as_ref())
            .and_then(|deck| deck.path.clone());

        env_override
            .into_iter()
            .chain(configured)
            .map(|raw| expand_env_vars(raw.trim()))
            .find(|path| !path.is_empty())
            .map_or(DeckSource::BuiltIn, |path| DeckSource::File(PathBuf::from(path)))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wallet").join("config.toml"))
}
