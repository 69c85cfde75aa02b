#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
mod action;
pub mod math;

pub use action::{ActionKind, ParseActionError, PilotAction, ACTIONS};

/// Commonly used items, for glob import by controllers and pilots.
pub mod prelude {
    pub use crate::action::{ActionKind, PilotAction};
    pub use crate::math::*;
}
