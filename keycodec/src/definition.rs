//! Keyboard definitions and device tables as read from JSON files.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::byte_map::NameToByte;

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Unable to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Neither a v2 `lighting` nor a v3 `keycodes` entry.
    #[error("Definition declares no keycodes")]
    MissingKeycodes,
}

/// Which lighting keycodes a keyboard accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeycodeType {
    #[default]
    None,
    Qmk,
    Wt,
}

impl KeycodeType {
    /// Maps a named lighting preset. Unknown presets accept no lighting
    /// keycodes.
    pub fn from_preset(preset: &str) -> Self {
        match preset {
            "none" => KeycodeType::None,
            "qmk_backlight" | "qmk_rgblight" | "qmk_backlight_rgblight" => KeycodeType::Qmk,
            "wt_rgb_backlight" | "wt_mono_backlight" => KeycodeType::Wt,
            _ => {
                log::warn!("Unknown lighting preset {preset:?}");
                KeycodeType::None
            }
        }
    }
}

/// The v2 `lighting` entry: a preset name or an inline description that may
/// extend a preset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Lighting {
    Preset(String),
    Inline {
        #[serde(default)]
        extends: Option<String>,
        #[serde(default)]
        keycodes: Option<KeycodeType>,
    },
}

impl Lighting {
    pub fn keycode_type(&self) -> KeycodeType {
        match self {
            Lighting::Preset(preset) => KeycodeType::from_preset(preset),
            Lighting::Inline { keycodes: Some(k), .. } => *k,
            Lighting::Inline {
                extends: Some(preset),
                ..
            } => KeycodeType::from_preset(preset),
            Lighting::Inline { .. } => KeycodeType::None,
        }
    }
}

/// Where a definition takes its keycode menus from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeycodeSource<'a> {
    V2(&'a Lighting),
    V3(&'a [String]),
}

/// The parts of a keyboard definition that decide its keycode menus.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct KeyboardDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lighting: Option<Lighting>,
    /// v3 keycode module names.
    #[serde(default)]
    pub keycodes: Option<Vec<String>>,
}

impl KeyboardDefinition {
    pub fn v2(lighting: Lighting) -> Self {
        Self {
            lighting: Some(lighting),
            ..Default::default()
        }
    }

    pub fn v3<S: Into<String>>(modules: impl IntoIterator<Item = S>) -> Self {
        Self {
            keycodes: Some(modules.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// A v2 `lighting` entry takes precedence over v3 `keycodes`.
    pub fn keycode_source(&self) -> Result<KeycodeSource<'_>, DefinitionError> {
        match (&self.lighting, &self.keycodes) {
            (Some(lighting), _) => Ok(KeycodeSource::V2(lighting)),
            (None, Some(modules)) => Ok(KeycodeSource::V3(modules)),
            (None, None) => Err(DefinitionError::MissingKeycodes),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.keycode_source()?;
        Ok(definition)
    }
}

fn read(path: &Path) -> Result<String, DefinitionError> {
    fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_definition(path: &Path) -> Result<KeyboardDefinition, DefinitionError> {
    KeyboardDefinition::from_json(&read(path)?)
}

/// Reads a device's name to value table, a JSON object whose key order is
/// kept.
pub fn load_table(path: &Path) -> Result<NameToByte, DefinitionError> {
    let table: NameToByte = serde_json::from_str(&read(path)?)?;
    log::debug!("loaded {} names from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod test;
