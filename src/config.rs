use crate::error::{Result, SilhouetteError};
use crate::params::{SilhouetteParams, INTENSITY_DEFAULT};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for the command-line host, loadable from a TOML file.
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Silhouette intensity, clamped by the host before use.
    pub intensity: f64,
    /// Appended to the source file stem: `moon.jpg` -> `moon-<suffix>.png`.
    pub suffix: String,
    /// Descend into subdirectories when the input is a folder.
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intensity: INTENSITY_DEFAULT,
            suffix: "silhouette".to_string(),
            recursive: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SilhouetteError::io(path, e))?;
        Self::from_toml_str(&text).map_err(|source| SilhouetteError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn params(&self) -> SilhouetteParams {
        SilhouetteParams::new(self.intensity)
    }
}
