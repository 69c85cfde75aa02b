//! Solar system records.

use crate::celestial::Celestial;
use crate::error::{read_json, write_json};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named set of celestials, stored as one JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SolarSystem {
    pub name: String,
    #[serde(default)]
    pub celestials: Vec<Celestial>,
}

impl SolarSystem {
    pub fn new(name: &str, celestials: Vec<Celestial>) -> SolarSystem {
        SolarSystem {
            name: name.to_string(),
            celestials,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn celestials(&self) -> &[Celestial] {
        &self.celestials
    }

    pub fn celestial(&self, name: &str) -> Option<&Celestial> {
        self.celestials.iter().find(|c| c.name == name)
    }

    pub fn load(path: &Path) -> Result<SolarSystem> {
        let system: SolarSystem = read_json(path)?;
        log::info!(
            "Loaded solar system {} ({} celestials) from {}",
            system.name,
            system.celestials.len(),
            path.display()
        );
        Ok(system)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)?;
        log::info!("Saved solar system {} to {}", self.name, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn test_decode_keeps_order() {
        let system: SolarSystem = serde_json::from_str(
            r#"{
                "name": "Vera",
                "celestials": [
                    {"name": "Vera", "image_path": "planets/planet27.png", "coordinates": [30.0, 60.0]},
                    {"name": "Vera II", "image_path": "planets/planet3.png", "coordinates": [-400.0, 10.0], "radius": 20.0}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(system.name(), "Vera");
        let names: Vec<&str> = system.celestials().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Vera", "Vera II"]);
        assert_eq!(system.celestial("Vera II").unwrap().radius, 20.0);
        assert_eq!(
            system.celestial("Vera").unwrap().coordinates,
            vector![30.0, 60.0]
        );
        assert!(system.celestial("Sol").is_none());
    }

    #[test]
    fn test_empty_system() {
        let system: SolarSystem = serde_json::from_str(r#"{"name": "Void"}"#).unwrap();
        assert!(system.celestials().is_empty());
    }
}
