use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::speech::default_speech_command;

const MIN_CARD_WIDTH: u16 = 8;
const MAX_CARD_WIDTH: u16 = 40;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// JSON word catalog to study instead of the bundled one.
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    #[serde(default = "default_speech_command")]
    pub speech_command: String,
    #[serde(default)]
    pub speech_args: Vec<String>,
    #[serde(default = "default_confirm_resets")]
    pub confirm_resets: bool,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_card_width() -> u16 {
    18
}
fn default_confirm_resets() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            catalog_path: None,
            card_width: default_card_width(),
            speech_command: default_speech_command(),
            speech_args: Vec::new(),
            confirm_resets: default_confirm_resets(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordmem")
            .join("config.toml")
    }

    /// Clamp out-of-range values and fall back to the default theme when the
    /// configured one is not among `themes`.
    pub fn validate(&mut self, themes: &[String]) {
        self.card_width = self.card_width.clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
        if !themes.iter().any(|t| *t == self.theme) {
            log::warn!("unknown theme '{}', using {}", self.theme, default_theme());
            self.theme = default_theme();
        }
        if self.speech_command.trim().is_empty() {
            self.speech_command = default_speech_command();
        }
    }
}
