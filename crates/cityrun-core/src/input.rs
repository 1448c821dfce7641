use serde::{Deserialize, Serialize};

/// Per-tick snapshot of held keys.
///
/// The simulation treats this as an opaque predicate set; how keys map to
/// these flags is the host's business. `up`/`down`/`confirm`/`back` exist
/// for menu navigation, the rest drive gameplay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub sprint: bool,
    pub confirm: bool,
    pub back: bool,
    pub pause: bool,
    pub restart: bool,
}

impl Input {
    /// Keys held this tick that were not held in `prev`. Menus and the
    /// pause/restart latches are edge-triggered; movement reads held state.
    pub fn rising_edges(&self, prev: &Input) -> Input {
        Input {
            left: self.left && !prev.left,
            right: self.right && !prev.right,
            up: self.up && !prev.up,
            down: self.down && !prev.down,
            jump: self.jump && !prev.jump,
            sprint: self.sprint && !prev.sprint,
            confirm: self.confirm && !prev.confirm,
            back: self.back && !prev.back,
            pause: self.pause && !prev.pause,
            restart: self.restart && !prev.restart,
        }
    }
}
