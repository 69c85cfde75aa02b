//! Game constants and the runtime settings file.

use crate::controller::Key;
use crate::error::{read_json, write_json};
use crate::Result;
use serde::{Deserialize, Serialize};
use spacegame_api::ActionKind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Nominal frame length in seconds.
pub const TICK_LENGTH: f64 = 1.0 / 60.0;
/// Heading error (radians) below which an engine stops steering.
pub const ALIGN_DEAD_ZONE: f64 = 0.05;
/// Width and length of a vessel with no record.
pub const DEFAULT_VESSEL_SIZE: f64 = 32.0;
pub const DEFAULT_CELESTIAL_RADIUS: f64 = 64.0;
pub const STARTING_CREDITS: u64 = 10000;
pub const DEFAULT_PLAYER: &str = "Cap'n Hector";
pub const DEFAULT_SHIP: &str = "Starbridge";
pub const DEFAULT_SYSTEM: &str = "Vera";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Root of the resource pack.
    pub resource_path: PathBuf,
    pub player_name: String,
    /// Ship file name (without extension) under `entities/ships`.
    pub ship: String,
    pub start_system: String,
    /// Key to action token. Replaces the default bindings when present.
    pub bindings: Option<BTreeMap<Key, String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            resource_path: PathBuf::from("resources"),
            player_name: DEFAULT_PLAYER.to_string(),
            ship: DEFAULT_SHIP.to_string(),
            start_system: DEFAULT_SYSTEM.to_string(),
            bindings: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings> {
        let settings: Settings = read_json(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    pub fn ship_path(&self) -> PathBuf {
        self.resource_path
            .join("entities")
            .join("ships")
            .join(format!("{}.json", self.ship))
    }

    pub fn systems_path(&self) -> PathBuf {
        self.resource_path.join("universe").join("systems")
    }

    /// Resolves the configured action tokens.
    pub fn key_bindings(&self) -> Result<Option<BTreeMap<Key, ActionKind>>> {
        let Some(bindings) = self.bindings.as_ref() else {
            return Ok(None);
        };
        let mut resolved = BTreeMap::new();
        for (key, token) in bindings {
            resolved.insert(*key, token.parse::<ActionKind>()?);
        }
        Ok(Some(resolved))
    }
}
