//! Whoever flies a vessel.

use crate::config::STARTING_CREDITS;
use crate::controller::{Controller, InputState};
use crate::vessel::ActionSender;

/// A controlling agent. For players a tick is input handling, for AI it is
/// thinking. Either way the result is actions queued on a vessel.
pub trait Pilot {
    fn name(&self) -> &str;
    fn tick(&mut self, input: &dyn InputState, dt: f64);
}

pub struct Player {
    name: String,
    credits: u64,
    controller: Controller,
}

impl Player {
    pub fn new(name: &str, ship: ActionSender) -> Player {
        Player {
            name: name.to_string(),
            credits: STARTING_CREDITS,
            controller: Controller::new(ship),
        }
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }
}

impl Pilot for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, input: &dyn InputState, dt: f64) {
        self.controller.relay(input, dt);
    }
}
