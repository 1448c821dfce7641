use serde::{Deserialize, Serialize};

use cityrun_core::powerup;

/// Timed capability grants the player can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedSneakers,
    Shield,
    Magnet,
    ScoreMultiplier,
    DoubleJump,
}

impl powerup::PowerUpKind for PowerUpKind {
    fn duration_ms(&self) -> f32 {
        match self {
            PowerUpKind::SpeedSneakers => 10_000.0,
            PowerUpKind::Shield => 15_000.0,
            PowerUpKind::Magnet => 12_000.0,
            PowerUpKind::ScoreMultiplier => 15_000.0,
            // No tuned duration for this one; it takes the default grant length.
            PowerUpKind::DoubleJump => 10_000.0,
        }
    }
}

/// Active power-up effect on the player.
pub type ActivePowerUp = powerup::ActivePowerUp<PowerUpKind>;
