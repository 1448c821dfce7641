use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Trait for game-specific power-up kind enums.
pub trait PowerUpKind: Clone + Copy + PartialEq + Serialize + DeserializeOwned {
    /// Duration in milliseconds for this power-up.
    fn duration_ms(&self) -> f32;
}

/// A timed capability grant, generic over the kind enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ActivePowerUp<K: PowerUpKind> {
    pub kind: K,
    pub remaining_ms: f32,
}

impl<K: PowerUpKind> ActivePowerUp<K> {
    pub fn new(kind: K) -> Self {
        Self {
            remaining_ms: kind.duration_ms(),
            kind,
        }
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.remaining_ms -= dt_ms;
        if self.remaining_ms < 0.0 {
            self.remaining_ms = 0.0;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    /// Refresh the timer back to the full duration.
    pub fn refresh(&mut self) {
        self.remaining_ms = self.kind.duration_ms();
    }
}
