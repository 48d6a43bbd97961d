use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Editor configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// General editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Editor settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Tab size
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Show line numbers
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,
}

/// UI settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    /// Show the file-tree panel at startup
    #[serde(default = "default_show_tree_panel")]
    pub show_tree_panel: bool,

    /// Tree panel width in columns
    #[serde(default = "default_tree_panel_width")]
    pub tree_panel_width: u16,

    /// Show status bar
    #[serde(default = "default_show_status_bar")]
    pub show_status_bar: bool,

    /// Show the word count on the status bar
    #[serde(default = "default_show_word_count")]
    pub show_word_count: bool,

    /// Show the character count on the status bar
    #[serde(default = "default_show_char_count")]
    pub show_char_count: bool,
}

// Default values
fn default_tab_size() -> usize {
    4
}
fn default_show_line_numbers() -> bool {
    true
}
fn default_show_tree_panel() -> bool {
    true
}
fn default_tree_panel_width() -> u16 {
    28
}
fn default_show_status_bar() -> bool {
    true
}
fn default_show_word_count() -> bool {
    true
}
fn default_show_char_count() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            show_line_numbers: default_show_line_numbers(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_tree_panel: default_show_tree_panel(),
            tree_panel_width: default_tree_panel_width(),
            show_status_bar: default_show_status_bar(),
            show_word_count: default_show_word_count(),
            show_char_count: default_show_char_count(),
        }
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// The config
    config: Config,

    /// The path to the config file
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager
    pub fn new(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");

        Self {
            config: Config::default(),
            config_path,
        }
    }

    /// Load the config
    pub fn load(&mut self) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Load config if it exists, otherwise use defaults
        if self.config_path.exists() {
            let config_str = fs::read_to_string(&self.config_path)?;
            self.config = serde_json::from_str(&config_str)
                .map_err(|e| anyhow!("Failed to parse config: {}", e))?;
        }

        Ok(())
    }

    /// Save the config
    pub fn save(&self) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_str)?;
        Ok(())
    }

    /// Get the config
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the config
    pub fn get_config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
