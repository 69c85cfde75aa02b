//! Pilotable ships.

use crate::config::DEFAULT_VESSEL_SIZE;
use crate::entity::{Entity, Rect};
use crate::error::{read_json, write_json};
use crate::snapshot::SceneInformation;
use crate::system::{Engine, Scanner, ShipSystem, ShipSystems};
use crate::{Result, Vec2};
use crossbeam::channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use spacegame_api::math::normalize_angle;
use spacegame_api::{ActionKind, PilotAction};
use std::path::Path;

/// Cloneable handle for queueing actions on a vessel.
pub type ActionSender = Sender<PilotAction>;

/// Kinematic state of a vessel. Only the vessel and its engine write it.
#[derive(Clone, Debug, PartialEq)]
pub struct Kinematics {
    pub(crate) angle: f64,
    pub(crate) coordinates: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) bounds: Rect,
}

impl Kinematics {
    pub fn new(bounds: Rect) -> Kinematics {
        Kinematics {
            angle: 0.0,
            coordinates: Vec2::zeros(),
            velocity: Vec2::zeros(),
            bounds,
        }
    }

    /// Heading in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn coordinates(&self) -> Vec2 {
        self.coordinates
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// The ship file format.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VesselRecord {
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub systems: ShipSystems,
}

#[derive(Debug)]
pub struct Vessel {
    name: String,
    body: Kinematics,
    systems: ShipSystems,
    sender: Sender<PilotAction>,
    receiver: Receiver<PilotAction>,
}

impl Vessel {
    /// A default-sized vessel carrying the standard engine and scanner.
    pub fn new(name: &str) -> Vessel {
        Vessel::with_systems(
            name,
            DEFAULT_VESSEL_SIZE,
            DEFAULT_VESSEL_SIZE,
            ShipSystems::defaults(),
        )
    }

    pub fn with_systems(name: &str, width: f64, length: f64, mut systems: ShipSystems) -> Vessel {
        for (_, system) in systems.iter_mut() {
            system.install(name);
        }
        let (sender, receiver) = crossbeam::channel::unbounded();
        Vessel {
            name: name.to_string(),
            body: Kinematics::new(Rect::new(0.0, 0.0, width, length)),
            systems,
            sender,
            receiver,
        }
    }

    pub fn from_record(record: VesselRecord) -> Vessel {
        Vessel::with_systems(&record.name, record.width, record.length, record.systems)
    }

    pub fn record(&self) -> VesselRecord {
        VesselRecord {
            name: self.name.clone(),
            length: self.body.bounds.height(),
            width: self.body.bounds.width(),
            systems: self.systems.clone(),
        }
    }

    pub fn load(path: &Path) -> Result<Vessel> {
        let record: VesselRecord = read_json(path)?;
        log::info!("Loaded ship {} from {}", record.name, path.display());
        Ok(Vessel::from_record(record))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, &self.record())?;
        log::info!("Saved ship {} to {}", self.name, path.display());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Kinematics {
        &self.body
    }

    pub fn systems(&self) -> &ShipSystems {
        &self.systems
    }

    /// Replaces the installed systems with the ones decoded from `json` and
    /// installs each of them on this vessel.
    pub fn decode_systems(&mut self, json: &str) -> Result<()> {
        self.systems.decode_from(json)?;
        for (_, system) in self.systems.iter_mut() {
            system.install(&self.name);
        }
        Ok(())
    }

    /// Installs `system` on this vessel, replacing any system of the same name.
    pub fn install(&mut self, system: impl Into<ShipSystem>) {
        let mut system = system.into();
        system.install(&self.name);
        self.systems.insert(system);
    }

    pub fn set_coordinates(&mut self, coordinates: Vec2) {
        self.body.coordinates = coordinates;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.body.velocity = velocity;
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.body.angle = normalize_angle(angle);
    }

    /// Queue handle for controllers. Queued actions run on the next update.
    pub fn action_sender(&self) -> ActionSender {
        self.sender.clone()
    }

    /// Hands `action` to the system called `name`. A missing system drops the
    /// action and returns false.
    pub fn activate_system(&mut self, name: &str, action: PilotAction) -> bool {
        match self.systems.get_mut(name) {
            Some(system) => {
                system.activate(action, &mut self.body);
                true
            }
            None => {
                log::warn!(
                    "ship {} has no system {:?}, dropping {:?}",
                    self.name,
                    name,
                    action.kind
                );
                false
            }
        }
    }

    /// Routes `action` to the system responsible for its kind.
    pub fn process(&mut self, action: PilotAction) {
        match action.kind {
            ActionKind::Accelerate
            | ActionKind::TurnLeft
            | ActionKind::TurnRight
            | ActionKind::Reverse => {
                self.activate_system(Engine::NAME, action);
            }
            ActionKind::TargetNext
            | ActionKind::TargetPrevious
            | ActionKind::TargetCelestialNext
            | ActionKind::ClearTarget
            | ActionKind::Land => {
                self.activate_system(Scanner::NAME, action);
            }
            ActionKind::Align => self.align(action.dt),
        }
    }

    /// Steers one step towards the scanner's selection, if any.
    fn align(&mut self, dt: f64) {
        let target = self
            .systems
            .scanner()
            .and_then(Scanner::selection)
            .map(|contact| contact.coordinates);
        if target.is_none() {
            log::debug!("ship {} has nothing to align to", self.name);
            return;
        }
        match self.systems.engine() {
            Some(engine) => engine.align(&mut self.body, target, dt),
            None => log::warn!("ship {} has no engine to align with", self.name),
        }
    }

    /// Refreshes every system from `info`, then runs the queued actions in
    /// arrival order.
    pub fn update(&mut self, info: &SceneInformation) {
        for (_, system) in self.systems.iter_mut() {
            system.update(info);
        }
        while let Ok(action) = self.receiver.try_recv() {
            self.process(action);
        }
    }
}

impl Entity for Vessel {
    fn name(&self) -> &str {
        &self.name
    }

    fn angle(&self) -> f64 {
        self.body.angle
    }

    fn bounds(&self) -> Rect {
        self.body.bounds
    }

    fn coordinates(&self) -> Vec2 {
        self.body.coordinates
    }

    fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    fn translate(&mut self, by: Vec2) {
        self.body.coordinates += by;
    }

    fn as_vessel(&self) -> Option<&Vessel> {
        Some(self)
    }

    fn as_vessel_mut(&mut self) -> Option<&mut Vessel> {
        Some(self)
    }
}
