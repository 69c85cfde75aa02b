//! The per-tick update loop.

use crate::entity::Entity;
use crate::snapshot::SceneInformation;
use crate::solar_system::SolarSystem;
use crate::vessel::Vessel;
use rayon::prelude::*;

/// A solar system in play: its celestials plus everything flying through it.
pub struct Scene {
    system: SolarSystem,
    entities: Vec<Box<dyn Entity>>,
    tick: u64,
    time: f64,
}

impl Scene {
    pub fn new(system: SolarSystem) -> Scene {
        log::info!("Entering solar system {}", system.name());
        Scene {
            system,
            entities: Vec::new(),
            tick: 0,
            time: 0.0,
        }
    }

    pub fn spawn(&mut self, entity: impl Entity + 'static) {
        log::debug!("spawning {} in {}", entity.name(), self.system.name());
        self.entities.push(Box::new(entity));
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn entities(&self) -> &[Box<dyn Entity>] {
        &self.entities
    }

    pub fn vessel(&self, name: &str) -> Option<&Vessel> {
        self.entities
            .iter()
            .filter_map(|e| e.as_vessel())
            .find(|v| v.name() == name)
    }

    pub fn vessel_mut(&mut self, name: &str) -> Option<&mut Vessel> {
        self.entities
            .iter_mut()
            .filter_map(|e| e.as_vessel_mut())
            .find(|v| v.name() == name)
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// What every entity looks like right now.
    pub fn information(&self) -> SceneInformation {
        SceneInformation::new(&self.entities, self.system.celestials())
    }

    /// Advances the scene by one frame.
    ///
    /// Vessels update in parallel against a snapshot taken before any of
    /// them runs. Once all of them are done, every entity moves by its
    /// velocity.
    pub fn tick(&mut self, dt: f64) {
        let info = self.information();

        self.entities
            .par_iter_mut()
            .filter_map(|e| e.as_vessel_mut())
            .for_each(|vessel| vessel.update(&info));

        for entity in self.entities.iter_mut() {
            let velocity = entity.velocity();
            entity.translate(velocity);
        }

        self.tick += 1;
        self.time += dt;
    }
}
