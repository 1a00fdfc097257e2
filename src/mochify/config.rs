use crate::error::{MochifyError, Result};
use crate::model::DeckNaming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CARD_TAG: &str = "card";

pub const CONFIG_KEYS: [&str; 4] = [
    "use-default-save-location",
    "card-tag",
    "deck-naming",
    "default-save-location",
];

/// User settings, stored in `config.json` in the per-user config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Write straight to `default_save_location` instead of asking for a folder
    #[serde(default)]
    pub use_default_save_location: bool,

    /// Tag (without `#`) that marks a card, matched case-insensitively
    #[serde(default = "default_card_tag")]
    pub card_tag: String,

    #[serde(default, rename = "deckNamingOption")]
    pub deck_naming: DeckNaming,

    /// Unset until the first run fills it with the home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_save_location: Option<PathBuf>,
}

fn default_card_tag() -> String {
    DEFAULT_CARD_TAG.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            use_default_save_location: false,
            card_tag: default_card_tag(),
            deck_naming: DeckNaming::default(),
            default_save_location: None,
        }
    }
}

impl ExportConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MochifyError::Io)?;
        let config: ExportConfig =
            serde_json::from_str(&content).map_err(MochifyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MochifyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MochifyError::Serialization)?;
        fs::write(config_path, content).map_err(MochifyError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "use-default-save-location" => Some(self.use_default_save_location.to_string()),
            "card-tag" => Some(self.card_tag.clone()),
            "deck-naming" => Some(self.deck_naming.to_string()),
            "default-save-location" => Some(
                self.default_save_location
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Sets a key from its textual form. Errors are user-facing messages.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "use-default-save-location" => {
                self.use_default_save_location = parse_bool(value)?;
            }
            "card-tag" => {
                let tag = value.trim().trim_start_matches('#');
                if tag.is_empty() {
                    return Err("Tag should not be empty".to_string());
                }
                self.card_tag = tag.to_string();
            }
            "deck-naming" => {
                self.deck_naming = value.parse()?;
            }
            "default-save-location" => {
                let value = value.trim();
                self.default_save_location = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("Expected true or false, got '{}'", other)),
    }
}

/// A config with every value the exporter needs filled in.
///
/// The core only ever sees this; filling in defaults (and persisting them) is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub use_default_save_location: bool,
    pub card_tag: String,
    pub deck_naming: DeckNaming,
    pub default_save_location: PathBuf,
}

impl ResolvedConfig {
    /// Fills an unset save location with `home` and validates the tag.
    pub fn resolve(config: &ExportConfig, home: &Path) -> Result<Self> {
        let card_tag = config.card_tag.trim().trim_start_matches('#').to_string();
        if card_tag.is_empty() {
            return Err(MochifyError::Config("Tag should not be empty".to_string()));
        }
        Ok(Self {
            use_default_save_location: config.use_default_save_location,
            card_tag,
            deck_naming: config.deck_naming,
            default_save_location: config
                .default_save_location
                .clone()
                .unwrap_or_else(|| home.to_path_buf()),
        })
    }
}
