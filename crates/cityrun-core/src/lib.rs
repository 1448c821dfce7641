pub mod body;
pub mod collision;
pub mod config;
pub mod input;
pub mod powerup;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::input::Input;

    /// Held-right input snapshot.
    pub fn input_right() -> Input {
        Input {
            right: true,
            ..Input::default()
        }
    }

    /// Held-left input snapshot.
    pub fn input_left() -> Input {
        Input {
            left: true,
            ..Input::default()
        }
    }

    /// Jump tap snapshot.
    pub fn input_jump() -> Input {
        Input {
            jump: true,
            ..Input::default()
        }
    }

    /// Confirm tap snapshot (menus).
    pub fn input_confirm() -> Input {
        Input {
            confirm: true,
            ..Input::default()
        }
    }
}
