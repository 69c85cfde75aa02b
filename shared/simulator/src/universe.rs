//! The graph of solar systems a game takes place in.

use crate::celestial::Celestial;
use crate::config::DEFAULT_SYSTEM;
use crate::error::Error;
use crate::solar_system::SolarSystem;
use crate::{Result, Vec2};
use nalgebra::vector;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    systems: BTreeMap<String, SolarSystem>,
    coordinates: BTreeMap<String, Vec2>,
}

impl Default for Universe {
    fn default() -> Self {
        Universe::new()
    }
}

impl Universe {
    /// The starting universe: the Vera system with its single planet.
    pub fn new() -> Universe {
        let mut universe = Universe::empty();
        let vera = Celestial::new(DEFAULT_SYSTEM, "planets/planet27.png", vector![30.0, 60.0]);
        universe.add_system(
            SolarSystem::new(DEFAULT_SYSTEM, vec![vera]),
            Vec2::zeros(),
        );
        universe
    }

    pub fn empty() -> Universe {
        Universe {
            systems: BTreeMap::new(),
            coordinates: BTreeMap::new(),
        }
    }

    /// Adds or replaces the system with `system`'s name.
    pub fn add_system(&mut self, system: SolarSystem, coordinates: Vec2) {
        let name = system.name.clone();
        self.systems.insert(name.clone(), system);
        self.coordinates.insert(name, coordinates);
    }

    pub fn system(&self, name: &str) -> Result<&SolarSystem> {
        self.systems
            .get(name)
            .ok_or_else(|| Error::UnknownSystem(name.to_string()))
    }

    pub fn systems(&self) -> &BTreeMap<String, SolarSystem> {
        &self.systems
    }

    pub fn system_coordinates(&self) -> &BTreeMap<String, Vec2> {
        &self.coordinates
    }

    /// Reads every `*.json` system record in `dir`, in file name order.
    ///
    /// Map placement is not part of the record, so every loaded system sits
    /// at the origin.
    pub fn load_dir(dir: &Path) -> Result<Universe> {
        let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(dir, e))?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut universe = Universe::empty();
        for path in paths {
            universe.add_system(SolarSystem::load(&path)?, Vec2::zeros());
        }
        log::info!(
            "Loaded {} solar systems from {}",
            universe.systems.len(),
            dir.display()
        );
        Ok(universe)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_new_has_vera() {
        let universe = Universe::new();
        let vera = universe.system("Vera").unwrap();
        assert_eq!(vera.celestials().len(), 1);
        assert_eq!(vera.celestials()[0].coordinates, vector![30.0, 60.0]);
        assert_eq!(universe.system_coordinates()["Vera"], Vec2::zeros());
    }

    #[test]
    fn test_unknown_system() {
        let universe = Universe::new();
        match universe.system("Sol") {
            Err(Error::UnknownSystem(name)) => assert_eq!(name, "Sol"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_add_system_replaces() {
        let mut universe = Universe::new();
        universe.add_system(SolarSystem::new("Vera", vec![]), vector![5.0, 5.0]);
        universe.add_system(SolarSystem::new("Sol", vec![]), vector![-5.0, 0.0]);
        assert_eq!(universe.systems().len(), 2);
        assert!(universe.system("Vera").unwrap().celestials().is_empty());
        assert_eq!(universe.system_coordinates()["Vera"], vector![5.0, 5.0]);
    }
}
