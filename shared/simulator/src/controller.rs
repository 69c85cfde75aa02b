//! Turns held and pressed keys into pilot actions.

use crate::error::Error;
use crate::vessel::ActionSender;
use crate::Result;
use serde::{Deserialize, Serialize};
use spacegame_api::{ActionKind, PilotAction};
use std::collections::BTreeMap;

/// Keys the game can bind.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Tab,
    Space,
    Enter,
    Escape,
    A,
    C,
    L,
    P,
}

/// Keyboard state for the current frame, provided by the window layer.
pub trait InputState {
    /// The key is held down.
    fn pressed(&self, key: Key) -> bool;
    /// The key went down since the previous frame.
    fn just_pressed(&self, key: Key) -> bool;
}

pub struct Controller {
    bindings: BTreeMap<Key, ActionKind>,
    sender: ActionSender,
}

impl Controller {
    /// A controller with the default bindings, feeding the vessel behind
    /// `sender`.
    pub fn new(sender: ActionSender) -> Controller {
        let mut controller = Controller {
            bindings: BTreeMap::new(),
            sender,
        };
        controller.reset_bindings();
        controller
    }

    pub fn reset_bindings(&mut self) {
        self.bindings = BTreeMap::from([
            (Key::Up, ActionKind::Accelerate),
            (Key::Left, ActionKind::TurnLeft),
            (Key::Right, ActionKind::TurnRight),
            (Key::Down, ActionKind::Reverse),
            (Key::Tab, ActionKind::TargetNext),
            (Key::A, ActionKind::Align),
            (Key::L, ActionKind::Land),
            (Key::C, ActionKind::ClearTarget),
        ]);
    }

    /// Replaces every binding with `bindings`.
    pub fn apply_bindings(&mut self, bindings: BTreeMap<Key, ActionKind>) {
        self.bindings = bindings;
    }

    pub fn set_key(&mut self, key: Key, action: ActionKind) -> Result<()> {
        if let Some(&bound) = self.bindings.get(&key) {
            return Err(Error::KeyAlreadyBound { key, action: bound });
        }
        self.bindings.insert(key, action);
        Ok(())
    }

    pub fn unbind(&mut self, key: Key) -> Option<ActionKind> {
        self.bindings.remove(&key)
    }

    pub fn bindings(&self) -> &BTreeMap<Key, ActionKind> {
        &self.bindings
    }

    /// Queues an action for every bound key that fires this frame. Repeating
    /// actions fire while held, the rest only on the press.
    pub fn relay(&self, input: &dyn InputState, dt: f64) {
        for (&key, &kind) in self.bindings.iter() {
            let fired = if kind.repeats() {
                input.pressed(key)
            } else {
                input.just_pressed(key)
            };
            if !fired {
                continue;
            }
            if self.sender.send(PilotAction::new(kind, dt)).is_err() {
                log::warn!("vessel is gone, dropping {}", kind);
            }
        }
    }
}
