use anyhow::{Context, Result};
use pagecraft_editor::{EditorConfig, StaticRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Session options (history limit, last-page deletion)
    #[serde(default)]
    pub editor: EditorConfig,

    /// Widget refs the renderer provides. Empty disables the widget check.
    #[serde(default)]
    pub known_widgets: Vec<String>,
}

impl Config {
    /// Load `explicit`, or `pagecraft.config.json` from `cwd` if present
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let config_path = cwd.join(DEFAULT_CONFIG_NAME);
                if config_path.exists() {
                    Self::read(&config_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn registry(&self) -> StaticRegistry {
        StaticRegistry::from_refs(self.known_widgets.iter().cloned())
    }
}
