//! Planets, stations and other bodies a vessel can target and land on.

use crate::config::DEFAULT_CELESTIAL_RADIUS;
use crate::entity::{Entity, Rect};
use crate::vessel::Vessel;
use crate::Vec2;
use serde::{Deserialize, Serialize};

fn default_radius() -> f64 {
    DEFAULT_CELESTIAL_RADIUS
}

/// A body resident in a solar system. Celestials do not move on their own.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Celestial {
    pub name: String,
    pub image_path: String,
    pub coordinates: Vec2,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl Celestial {
    pub fn new(name: &str, image_path: &str, coordinates: Vec2) -> Celestial {
        Celestial {
            name: name.to_string(),
            image_path: image_path.to_string(),
            coordinates,
            radius: DEFAULT_CELESTIAL_RADIUS,
        }
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Asks for docking clearance. Returns true if the vessel has docked.
    ///
    /// No celestial grants clearance until landed scenes exist.
    pub fn land(&self, vessel: &Vessel) -> bool {
        log::info!("{} requested docking at {}: denied", vessel.name(), self.name);
        false
    }
}

impl Entity for Celestial {
    fn name(&self) -> &str {
        &self.name
    }

    fn angle(&self) -> f64 {
        0.0
    }

    /// Centred on the celestial's origin.
    fn bounds(&self) -> Rect {
        Rect::new(-self.radius, -self.radius, self.radius, self.radius)
    }

    fn coordinates(&self) -> Vec2 {
        self.coordinates
    }

    fn velocity(&self) -> Vec2 {
        Vec2::zeros()
    }

    fn translate(&mut self, by: Vec2) {
        self.coordinates += by;
    }
}
