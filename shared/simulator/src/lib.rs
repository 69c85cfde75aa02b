pub mod celestial;
pub mod config;
pub mod controller;
pub mod entity;
mod error;
pub mod game;
pub mod player;
pub mod scene;
pub mod snapshot;
pub mod solar_system;
pub mod system;
pub mod universe;
pub mod vessel;

pub use error::{Error, Result};
pub use spacegame_api as api;

pub type Vec2 = nalgebra::Vector2<f64>;
