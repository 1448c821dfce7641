//! City Runner: Coast to Coast — simulation core.
//!
//! A fixed-tick side-scroller: the host feeds [`Game::tick`] an input
//! snapshot each frame and renders from the returned state, reacting to the
//! [`GameEvent`]s the tick emitted. Nothing here draws or sleeps.

pub mod camera;
pub mod cities;
pub mod collectible;
pub mod enemy;
pub mod events;
pub mod level;
pub mod player;
pub mod powerups;
pub mod states;

use cityrun_core::config::CityRunConfig;
use cityrun_core::input::Input;

use crate::cities::City;
use crate::events::GameEvent;
use crate::states::{
    CelebrationState, CitySelectState, GameplayState, MenuState, StateId,
};

/// Top-level state machine driver.
///
/// Owns the cross-state progression (current city, unlock list) and the
/// per-state structs, and consumes their `done`/`next_state` flags after
/// each tick.
pub struct Game {
    pub config: CityRunConfig,
    pub running: bool,
    pub current_city: City,
    pub unlocked_cities: Vec<City>,
    state: StateId,
    menu: MenuState,
    city_select: CitySelectState,
    gameplay: Option<GameplayState>,
    celebration: Option<CelebrationState>,
    prev_input: Input,
    level_seed: u64,
}

impl Game {
    pub fn new(config: CityRunConfig, level_seed: u64) -> Self {
        Self {
            config,
            running: true,
            current_city: City::Boston,
            unlocked_cities: vec![City::Boston],
            state: StateId::Menu,
            menu: MenuState::default(),
            city_select: CitySelectState::default(),
            gameplay: None,
            celebration: None,
            prev_input: Input::default(),
            level_seed,
        }
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn gameplay(&self) -> Option<&GameplayState> {
        self.gameplay.as_ref()
    }

    /// Advance the whole game one tick.
    pub fn tick(&mut self, dt_ms: f32, input: &Input) -> Vec<GameEvent> {
        let edges = input.rising_edges(&self.prev_input);
        self.prev_input = *input;

        let mut events = Vec::new();
        match self.state {
            StateId::Menu => {
                self.menu.update(&edges);
                if self.menu.quit {
                    self.running = false;
                }
            }
            StateId::CitySelect => {
                self.city_select.update(&edges, &self.unlocked_cities);
                if let Some(city) = self.city_select.chosen.take() {
                    self.current_city = city;
                }
            }
            StateId::Gameplay => {
                if let Some(gameplay) = &mut self.gameplay {
                    events = gameplay.update(dt_ms, input, &edges);
                    if gameplay.restart_requested {
                        tracing::info!(city = %self.current_city, "level restarted");
                        self.gameplay = Some(GameplayState::new(
                            self.current_city,
                            self.level_seed,
                            &self.config,
                        ));
                    }
                }
            }
            StateId::Celebration => {
                if let Some(celebration) = &mut self.celebration {
                    celebration.update(dt_ms, &edges);
                }
            }
        }

        if let Some(next) = self.take_transition() {
            events.extend(self.enter(next));
        }
        events
    }

    /// Pull a pending transition out of the active state, resetting its
    /// flags for the next visit.
    fn take_transition(&mut self) -> Option<StateId> {
        match self.state {
            StateId::Menu => {
                if self.menu.done {
                    self.menu.done = false;
                    return self.menu.next_state.take();
                }
            }
            StateId::CitySelect => {
                if self.city_select.done {
                    self.city_select.done = false;
                    return self.city_select.next_state.take();
                }
            }
            StateId::Gameplay => {
                if let Some(gameplay) = &mut self.gameplay
                    && gameplay.done
                {
                    gameplay.done = false;
                    return gameplay.next_state.take();
                }
            }
            StateId::Celebration => {
                if let Some(celebration) = &mut self.celebration
                    && celebration.done
                {
                    celebration.done = false;
                    return celebration.next_state.take();
                }
            }
        }
        None
    }

    /// Run a state's entry side effects and switch to it.
    fn enter(&mut self, next: StateId) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match next {
            StateId::Menu => self.menu = MenuState::default(),
            StateId::CitySelect => self.city_select = CitySelectState::default(),
            StateId::Gameplay => {
                tracing::info!(city = %self.current_city, "entering level");
                self.gameplay = Some(GameplayState::new(
                    self.current_city,
                    self.level_seed,
                    &self.config,
                ));
            }
            StateId::Celebration => {
                self.celebration = Some(CelebrationState::new(self.current_city));
                if let Some(city) = self.current_city.next()
                    && !self.unlocked_cities.contains(&city)
                {
                    self.unlocked_cities.push(city);
                    tracing::info!(%city, "city unlocked");
                    events.push(GameEvent::CityUnlocked { city });
                }
            }
        }
        self.state = next;
        events
    }
}
