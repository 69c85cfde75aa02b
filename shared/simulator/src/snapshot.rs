use crate::celestial::Celestial;
use crate::entity::{Entity, Rect};
use crate::Vec2;
use serde::{Deserialize, Serialize};

/// What a scanner saw of one entity at the start of a tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Contact {
    pub name: String,
    pub angle: f64,
    pub bounds: Rect,
    pub coordinates: Vec2,
    pub velocity: Vec2,
}

impl Contact {
    pub fn observe(entity: &dyn Entity) -> Contact {
        Contact {
            name: entity.name().to_string(),
            angle: entity.angle(),
            bounds: entity.bounds(),
            coordinates: entity.coordinates(),
            velocity: entity.velocity(),
        }
    }
}

/// Immutable view of a scene, built once per tick and shared by every
/// vessel's update.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SceneInformation {
    pub entities: Vec<Contact>,
    pub celestials: Vec<Contact>,
}

impl SceneInformation {
    pub fn new(entities: &[Box<dyn Entity>], celestials: &[Celestial]) -> SceneInformation {
        SceneInformation {
            entities: entities.iter().map(|e| Contact::observe(e.as_ref())).collect(),
            celestials: celestials.iter().map(|c| Contact::observe(c)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.celestials.is_empty()
    }
}
