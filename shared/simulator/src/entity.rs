//! The minimal view the simulator has of anything placed in a scene.

use crate::vessel::Vessel;
use crate::Vec2;
use nalgebra::vector;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect {
            min: vector![x0.min(x1), y0.min(y1)],
            max: vector![x0.max(x1), y0.max(y1)],
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// Anything with a name, a place and a motion.
///
/// Entities are moved by the scene once per tick, so they must be safe to
/// hand to a worker thread.
pub trait Entity: Send {
    fn name(&self) -> &str;
    fn angle(&self) -> f64;
    fn bounds(&self) -> Rect;
    fn coordinates(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn translate(&mut self, by: Vec2);

    /// The pilotable side of this entity, if it has one.
    fn as_vessel(&self) -> Option<&Vessel> {
        None
    }

    fn as_vessel_mut(&mut self) -> Option<&mut Vessel> {
        None
    }
}

/// An inert entity: debris, beacons, stars.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicEntity {
    name: String,
    angle: f64,
    coordinates: Vec2,
    velocity: Vec2,
    bounds: Rect,
}

impl BasicEntity {
    pub fn new(name: &str, bounds: Rect) -> BasicEntity {
        BasicEntity {
            name: name.to_string(),
            angle: 0.0,
            coordinates: Vec2::zeros(),
            velocity: Vec2::zeros(),
            bounds,
        }
    }

    pub fn at(mut self, coordinates: Vec2) -> BasicEntity {
        self.coordinates = coordinates;
        self
    }

    pub fn drifting(mut self, velocity: Vec2) -> BasicEntity {
        self.velocity = velocity;
        self
    }
}

impl Entity for BasicEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn coordinates(&self) -> Vec2 {
        self.coordinates
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn translate(&mut self, by: Vec2) {
        self.coordinates += by;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rect() {
        let r = Rect::new(32.0, 32.0, 0.0, 0.0);
        assert_eq!(r.min, vector![0.0, 0.0]);
        assert_eq!(r.width(), 32.0);
        assert_eq!(r.height(), 32.0);
        assert_eq!(r.center(), vector![16.0, 16.0]);
        assert!(r.contains(vector![0.0, 31.9]));
        assert!(!r.contains(vector![32.0, 1.0]));
    }

    #[test]
    fn test_basic_entity_translate() {
        let mut e = BasicEntity::new("debris", Rect::new(0.0, 0.0, 4.0, 4.0))
            .at(vector![1.0, 1.0])
            .drifting(vector![0.5, -0.5]);
        let v = e.velocity();
        e.translate(v);
        assert_eq!(e.coordinates(), vector![1.5, 0.5]);
        assert!(e.as_vessel().is_none());
    }
}
