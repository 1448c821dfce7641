use cityrun_core::config::{CityRunConfig, FALL_LIMIT_Y, PLAYER_SPAWN_X, RESPAWN_Y};
use cityrun_core::input::Input;

use crate::camera::Camera;
use crate::cities::{self, City};
use crate::events::GameEvent;
use crate::level::LevelWorld;
use crate::player::Player;

/// Celebration runs this long before auto-advancing.
const CELEBRATION_MS: f32 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Menu,
    CitySelect,
    Gameplay,
    Celebration,
}

/// Title screen: Start Game / Quit.
#[derive(Debug, Default)]
pub struct MenuState {
    pub selected: usize,
    pub done: bool,
    pub next_state: Option<StateId>,
    pub quit: bool,
}

impl MenuState {
    const OPTION_COUNT: usize = 2;

    pub fn update(&mut self, edges: &Input) {
        if edges.up {
            self.selected = (self.selected + Self::OPTION_COUNT - 1) % Self::OPTION_COUNT;
        }
        if edges.down {
            self.selected = (self.selected + 1) % Self::OPTION_COUNT;
        }
        if edges.confirm {
            match self.selected {
                0 => {
                    self.next_state = Some(StateId::CitySelect);
                    self.done = true;
                }
                _ => self.quit = true,
            }
        }
    }
}

/// City picker with unlock gating.
#[derive(Debug, Default)]
pub struct CitySelectState {
    pub selected: usize,
    pub done: bool,
    pub next_state: Option<StateId>,
    pub chosen: Option<City>,
}

impl CitySelectState {
    pub fn update(&mut self, edges: &Input, unlocked: &[City]) {
        let count = City::ALL.len();
        if edges.left {
            self.selected = (self.selected + count - 1) % count;
        }
        if edges.right {
            self.selected = (self.selected + 1) % count;
        }
        if edges.confirm {
            let city = City::ALL[self.selected];
            if unlocked.contains(&city) {
                self.chosen = Some(city);
                self.next_state = Some(StateId::Gameplay);
                self.done = true;
            } else {
                tracing::debug!(%city, "city locked");
            }
        }
        if edges.back {
            self.next_state = Some(StateId::Menu);
            self.done = true;
        }
    }
}

/// Active level play.
#[derive(Debug)]
pub struct GameplayState {
    pub player: Player,
    pub level: LevelWorld,
    pub camera: Camera,
    pub paused: bool,
    pub done: bool,
    pub next_state: Option<StateId>,
    pub restart_requested: bool,
}

impl GameplayState {
    pub fn new(city: City, seed: u64, config: &CityRunConfig) -> Self {
        let level = cities::build_level(city, seed);
        let player = Player::new(PLAYER_SPAWN_X, RESPAWN_Y, &config.physics);
        let camera = Camera::new(level.level_width, &config.camera);
        Self {
            player,
            level,
            camera,
            paused: false,
            done: false,
            next_state: None,
            restart_requested: false,
        }
    }

    /// One simulation tick. `input` is the held-key snapshot, `edges` the
    /// keys newly pressed this tick.
    pub fn update(&mut self, dt_ms: f32, input: &Input, edges: &Input) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if edges.pause {
            self.paused = !self.paused;
        }
        if self.player.is_dead() && edges.restart {
            self.restart_requested = true;
            return events;
        }
        // Both freezes leave entity state untouched
        if self.paused || self.player.is_dead() {
            return events;
        }

        self.player.handle_input(input);
        events.extend(
            self.player
                .update(dt_ms, Some(self.level.collision_rects())),
        );

        self.level.update(dt_ms);

        let (_, pickup_events) = self.level.check_collectibles(&mut self.player);
        events.extend(pickup_events);

        if let Some(event) = self.level.check_enemy_contact(&mut self.player) {
            let died = matches!(event, GameEvent::Damaged { remaining_health: 0 });
            events.push(event);
            if died {
                events.push(GameEvent::PlayerDied);
            }
        }

        events.extend(self.level.check_checkpoint(self.player.body.x));

        if let Some(event) = self.level.check_landmark(self.player.body.x) {
            events.push(event);
            self.next_state = Some(StateId::Celebration);
            self.done = true;
        }

        if self.player.body.y > FALL_LIMIT_Y {
            events.extend(self.respawn());
        }

        self.camera
            .update(self.player.body.x, self.player.body.vx);

        events
    }

    /// Haul the player back to the checkpoint anchor at the cost of one hit.
    fn respawn(&mut self) -> Vec<GameEvent> {
        let (x, y) = self.level.respawn_position();
        self.player.reset_position(x, y);

        let mut events = vec![GameEvent::Respawned { x, y }];
        if let Some(event) = self.player.take_damage(1) {
            let died = matches!(event, GameEvent::Damaged { remaining_health: 0 });
            events.push(event);
            if died {
                events.push(GameEvent::PlayerDied);
            }
        }
        events
    }
}

/// Landmark arrival fanfare; advances to the city picker.
#[derive(Debug)]
pub struct CelebrationState {
    pub city: City,
    pub timer_ms: f32,
    pub done: bool,
    pub next_state: Option<StateId>,
}

impl CelebrationState {
    pub fn new(city: City) -> Self {
        Self {
            city,
            timer_ms: 0.0,
            done: false,
            next_state: None,
        }
    }

    pub fn update(&mut self, dt_ms: f32, edges: &Input) {
        self.timer_ms += dt_ms;
        if self.timer_ms >= CELEBRATION_MS || edges.confirm {
            self.next_state = Some(StateId::CitySelect);
            self.done = true;
        }
    }
}
