//! Installable ship systems and their persisted form.
//!
//! A ship carries its systems in a [ShipSystems] map keyed by system name.
//! Each entry is stored as `{"type": <name>, "system": {<tunables>}}` so that
//! a ship file can mix system kinds under one record.

mod engine;
mod scanner;

pub use engine::{heading_of, Engine};
pub use scanner::Scanner;

use crate::snapshot::SceneInformation;
use crate::vessel::Kinematics;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use spacegame_api::PilotAction;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "system")]
pub enum ShipSystem {
    #[serde(rename = "engine")]
    Engine(Engine),
    #[serde(rename = "scanner")]
    Scanner(Scanner),
}

impl ShipSystem {
    /// Stable name, also the persisted discriminant.
    pub fn name(&self) -> &'static str {
        match self {
            ShipSystem::Engine(_) => Engine::NAME,
            ShipSystem::Scanner(_) => Scanner::NAME,
        }
    }

    /// Binds this system to the ship named `owner`. Safe to repeat.
    pub fn install(&mut self, owner: &str) {
        match self {
            ShipSystem::Engine(engine) => engine.install(owner),
            ShipSystem::Scanner(scanner) => scanner.install(owner),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            ShipSystem::Engine(engine) => engine.owner(),
            ShipSystem::Scanner(scanner) => scanner.owner(),
        }
    }

    /// Reacts to `action`. Kinds the system does not handle are ignored.
    pub fn activate(&mut self, action: PilotAction, body: &mut Kinematics) {
        match self {
            ShipSystem::Engine(engine) => engine.activate(action, body),
            ShipSystem::Scanner(scanner) => scanner.activate(action),
        }
    }

    /// Refreshes observations from this tick's snapshot.
    pub fn update(&mut self, info: &SceneInformation) {
        match self {
            ShipSystem::Engine(_) => {}
            ShipSystem::Scanner(scanner) => scanner.update(info),
        }
    }

    pub fn as_engine(&self) -> Option<&Engine> {
        match self {
            ShipSystem::Engine(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn as_scanner(&self) -> Option<&Scanner> {
        match self {
            ShipSystem::Scanner(scanner) => Some(scanner),
            _ => None,
        }
    }

    pub fn as_scanner_mut(&mut self) -> Option<&mut Scanner> {
        match self {
            ShipSystem::Scanner(scanner) => Some(scanner),
            _ => None,
        }
    }
}

impl From<Engine> for ShipSystem {
    fn from(engine: Engine) -> Self {
        ShipSystem::Engine(engine)
    }
}

impl From<Scanner> for ShipSystem {
    fn from(scanner: Scanner) -> Self {
        ShipSystem::Scanner(scanner)
    }
}

/// Systems installed on one ship, keyed by name.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ShipSystems(BTreeMap<String, ShipSystem>);

impl ShipSystems {
    pub fn new() -> ShipSystems {
        ShipSystems(BTreeMap::new())
    }

    /// The standard fit: a default engine and a default scanner.
    pub fn defaults() -> ShipSystems {
        let mut systems = ShipSystems::new();
        systems.insert(Engine::default());
        systems.insert(Scanner::default());
        systems
    }

    /// Adds `system` under its own name, returning any system it replaces.
    pub fn insert(&mut self, system: impl Into<ShipSystem>) -> Option<ShipSystem> {
        let system = system.into();
        self.0.insert(system.name().to_string(), system)
    }

    pub fn insert_named(&mut self, name: &str, system: impl Into<ShipSystem>) -> Option<ShipSystem> {
        self.0.insert(name.to_string(), system.into())
    }

    pub fn get(&self, name: &str) -> Option<&ShipSystem> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ShipSystem> {
        self.0.get_mut(name)
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.get(Engine::NAME).and_then(ShipSystem::as_engine)
    }

    pub fn scanner(&self) -> Option<&Scanner> {
        self.get(Scanner::NAME).and_then(ShipSystem::as_scanner)
    }

    pub fn scanner_mut(&mut self) -> Option<&mut Scanner> {
        self.get_mut(Scanner::NAME)
            .and_then(ShipSystem::as_scanner_mut)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShipSystem)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ShipSystem)> {
        self.0.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Replaces every entry with the ones decoded from `json`.
    ///
    /// Existing entries are dropped first, so decoding the same text twice
    /// yields the same collection.
    pub fn decode_from(&mut self, json: &str) -> crate::Result<()> {
        let decoded: ShipSystems = serde_json::from_str(json)?;
        self.0.clear();
        self.0.extend(decoded.0);
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawSystem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    system: serde_json::Value,
}

impl<'de> Deserialize<'de> for ShipSystems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawSystem>::deserialize(deserializer)?;
        let mut systems = BTreeMap::new();
        for (name, raw) in raw {
            let system = match raw.kind.as_str() {
                Engine::NAME => ShipSystem::Engine(
                    Engine::deserialize(raw.system).map_err(D::Error::custom)?,
                ),
                Scanner::NAME => ShipSystem::Scanner(
                    Scanner::deserialize(raw.system).map_err(D::Error::custom)?,
                ),
                unknown => {
                    log::warn!("dropping system {:?} of unknown type {:?}", name, unknown);
                    continue;
                }
            };
            systems.insert(name, system);
        }
        Ok(ShipSystems(systems))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::Rect;
    use crate::snapshot::Contact;
    use crate::Vec2;
    use serde_json::json;
    use spacegame_api::ActionKind;
    use test_log::test;

    fn custom() -> ShipSystems {
        let mut systems = ShipSystems::new();
        systems.insert(Engine::new(4.5, 2.0, 1.5));
        systems.insert(Scanner::new(75.0, 1234.0));
        systems
    }

    #[test]
    fn test_encoded_shape() {
        let value = serde_json::to_value(custom()).unwrap();
        assert_eq!(
            value,
            json!({
                "engine": {
                    "type": "engine",
                    "system": {"acceleration": 4.5, "max_velocity": 2.0, "turn_speed": 1.5}
                },
                "scanner": {
                    "type": "scanner",
                    "system": {"accuracy": 75.0, "range": 1234.0}
                }
            })
        );
    }

    #[test]
    fn test_round_trip_keeps_tunables_only() {
        let mut systems = custom();
        let scanner = systems.scanner_mut().unwrap();
        scanner.update(&SceneInformation {
            entities: vec![Contact {
                name: "a".to_string(),
                angle: 0.0,
                bounds: Rect::default(),
                coordinates: Vec2::zeros(),
                velocity: Vec2::zeros(),
            }],
            celestials: vec![],
        });
        scanner.next_target();
        assert!(systems.scanner().unwrap().target().is_some());

        let text = serde_json::to_string(&systems).unwrap();
        let decoded: ShipSystems = serde_json::from_str(&text).unwrap();

        let engine = decoded.engine().unwrap();
        assert_eq!(engine.acceleration, 4.5);
        assert_eq!(engine.max_velocity, 2.0);
        assert_eq!(engine.turn_speed, 1.5);
        let scanner = decoded.scanner().unwrap();
        assert_eq!(scanner.accuracy, 75.0);
        assert_eq!(scanner.range, 1234.0);
        assert!(scanner.target().is_none());
        assert!(scanner.targets().is_empty());
        assert!(scanner.owner().is_none());
    }

    #[test]
    fn test_unknown_type_is_dropped() {
        let text = json!({
            "engine": {"type": "engine", "system": {"acceleration": 1.0, "max_velocity": 1.0, "turn_speed": 1.0}},
            "cloak": {"type": "cloak", "system": {"power": 9000}}
        })
        .to_string();
        let decoded: ShipSystems = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.names().collect::<Vec<_>>(), vec!["engine"]);
    }

    #[test]
    fn test_malformed_system_is_an_error() {
        let text = json!({
            "engine": {"type": "engine", "system": {"acceleration": "fast"}}
        })
        .to_string();
        assert!(serde_json::from_str::<ShipSystems>(&text).is_err());
    }

    #[test]
    fn test_key_is_independent_of_type() {
        let text = json!({
            "aft": {"type": "engine", "system": {"acceleration": 1.0, "max_velocity": 1.0, "turn_speed": 1.0}}
        })
        .to_string();
        let decoded: ShipSystems = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.get("aft").unwrap().name(), "engine");
        assert!(decoded.engine().is_none());
    }

    #[test]
    fn test_decode_from_clears_existing() {
        let text = serde_json::to_string(&custom()).unwrap();
        let mut systems = ShipSystems::new();
        systems.insert_named("spare", Engine::default());
        systems.decode_from(&text).unwrap();
        assert_eq!(systems, custom());
        systems.decode_from(&text).unwrap();
        assert_eq!(systems, custom());
        assert!(systems.get("spare").is_none());
    }

    #[test]
    fn test_install_is_repeatable() {
        let mut system = ShipSystem::from(Engine::default());
        system.install("Starbridge");
        system.install("Starbridge");
        assert_eq!(system.owner(), Some("Starbridge"));
        let mut body = Kinematics::new(Rect::default());
        system.activate(PilotAction::new(ActionKind::TurnLeft, 0.1), &mut body);
        assert!(body.angle() > 0.0);
    }
}
