//! Headless game session: a universe, the scene the player is in, and the
//! player's controls.

use crate::config::Settings;
use crate::controller::InputState;
use crate::player::{Pilot, Player};
use crate::scene::Scene;
use crate::universe::Universe;
use crate::vessel::Vessel;
use crate::Result;

pub struct Game {
    settings: Settings,
    universe: Universe,
    scene: Scene,
    player: Player,
    ship_name: String,
}

impl Game {
    /// Builds a session from `settings`.
    ///
    /// Missing resource files fall back to the built-in universe and a
    /// default ship. Files that exist but do not parse are errors, as are
    /// unknown systems and action tokens.
    pub fn new(settings: Settings) -> Result<Game> {
        let systems_path = settings.systems_path();
        let universe = if systems_path.is_dir() {
            Universe::load_dir(&systems_path)?
        } else {
            log::info!(
                "No systems at {}, using the default universe",
                systems_path.display()
            );
            Universe::new()
        };

        let ship_path = settings.ship_path();
        let ship = if ship_path.is_file() {
            Vessel::load(&ship_path)?
        } else {
            log::info!(
                "No ship file at {}, using a default {}",
                ship_path.display(),
                settings.ship
            );
            Vessel::new(&settings.ship)
        };

        let ship_name = ship.name().to_string();
        let mut player = Player::new(&settings.player_name, ship.action_sender());
        if let Some(bindings) = settings.key_bindings()? {
            player.controller_mut().apply_bindings(bindings);
        }

        let mut scene = Scene::new(universe.system(&settings.start_system)?.clone());
        scene.spawn(ship);

        Ok(Game {
            settings,
            universe,
            scene,
            player,
            ship_name,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The ship the player flies.
    pub fn ship(&self) -> Option<&Vessel> {
        self.scene.vessel(&self.ship_name)
    }

    /// Reads input, then advances the scene one tick.
    pub fn frame(&mut self, input: &dyn InputState, dt: f64) {
        self.player.tick(input, dt);
        self.scene.tick(dt);
    }
}
