use serde::{Deserialize, Serialize};

use crate::cities::City;
use crate::collectible::CollectibleKind;
use crate::enemy::EnemyKind;
use crate::powerups::PowerUpKind;

/// Discrete events emitted by the simulation during a tick.
///
/// The audio and HUD collaborators consume these; nothing feeds back into
/// the simulation within the same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Collected {
        kind: CollectibleKind,
        points: i32,
    },
    Stomped {
        kind: EnemyKind,
        points: i32,
    },
    Damaged {
        remaining_health: i32,
    },
    CheckpointReached {
        index: usize,
    },
    LandmarkReached,
    PowerUpActivated {
        kind: PowerUpKind,
    },
    PowerUpExpired {
        kind: PowerUpKind,
    },
    PlayerDied,
    Respawned {
        x: f32,
        y: f32,
    },
    CityUnlocked {
        city: City,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_json_roundtrip() {
        let events = vec![
            GameEvent::Collected {
                kind: CollectibleKind::Pizza,
                points: 30,
            },
            GameEvent::Stomped {
                kind: EnemyKind::Rat,
                points: 30,
            },
            GameEvent::CheckpointReached { index: 2 },
            GameEvent::CityUnlocked { city: City::Nyc },
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }
}
