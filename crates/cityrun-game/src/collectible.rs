use serde::{Deserialize, Serialize};

use cityrun_core::body::KinematicBody;

/// Collectible hitbox side length.
const COLLECTIBLE_SIZE: f32 = 24.0;
/// Bob animation phase advance per tick.
const BOB_RATE: f32 = 0.05;
/// Bob animation amplitude in pixels.
const BOB_AMPLITUDE: f32 = 5.0;

/// Pickup items, grouped by city. Values are fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    // Boston
    Teacup,
    Book,
    // NYC
    Pizza,
    Metrocard,
    Bagel,
    // Chicago
    DeepDish,
    HotDog,
    JazzNote,
}

impl CollectibleKind {
    pub const fn value(self) -> i32 {
        match self {
            CollectibleKind::Teacup => 10,
            CollectibleKind::Book => 25,
            CollectibleKind::Pizza => 15,
            CollectibleKind::Metrocard => 20,
            CollectibleKind::Bagel => 10,
            CollectibleKind::DeepDish => 20,
            CollectibleKind::HotDog => 15,
            CollectibleKind::JazzNote => 25,
        }
    }
}

/// A pickup item. Once collected it is permanently excluded from further
/// pickup checks but keeps its state for the renderer until level teardown.
#[derive(Debug, Clone)]
pub struct Collectible {
    pub body: KinematicBody,
    pub kind: CollectibleKind,
    pub value: i32,
    pub collected: bool,
    base_y: f32,
    bob_phase: f32,
}

impl Collectible {
    pub fn new(x: f32, y: f32, kind: CollectibleKind) -> Self {
        Self {
            body: KinematicBody::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
            kind,
            value: kind.value(),
            collected: false,
            base_y: y,
            bob_phase: 0.0,
        }
    }

    /// Idle bob animation.
    pub fn update(&mut self, _dt_ms: f32) {
        if self.collected {
            return;
        }
        self.bob_phase += BOB_RATE;
        self.body.y = self.base_y + self.bob_phase.sin() * BOB_AMPLITUDE;
    }

    /// Mark collected and return the base value.
    pub fn collect(&mut self) -> i32 {
        self.collected = true;
        self.body.active = false;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_match_table() {
        assert_eq!(CollectibleKind::Teacup.value(), 10);
        assert_eq!(CollectibleKind::Book.value(), 25);
        assert_eq!(CollectibleKind::Pizza.value(), 15);
        assert_eq!(CollectibleKind::Metrocard.value(), 20);
        assert_eq!(CollectibleKind::Bagel.value(), 10);
        assert_eq!(CollectibleKind::DeepDish.value(), 20);
        assert_eq!(CollectibleKind::HotDog.value(), 15);
        assert_eq!(CollectibleKind::JazzNote.value(), 25);
    }

    #[test]
    fn collect_deactivates_body() {
        let mut c = Collectible::new(100.0, 200.0, CollectibleKind::Bagel);
        assert_eq!(c.collect(), 10);
        assert!(c.collected);
        assert!(!c.body.active, "Collected items leave collision queries");
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let mut c = Collectible::new(100.0, 200.0, CollectibleKind::Teacup);
        for _ in 0..500 {
            c.update(16.0);
            assert!(
                (c.body.y - 200.0).abs() <= BOB_AMPLITUDE + 1e-4,
                "Bob must stay within amplitude of base y, got {}",
                c.body.y
            );
        }
    }

    #[test]
    fn collected_item_stops_bobbing() {
        let mut c = Collectible::new(100.0, 200.0, CollectibleKind::Teacup);
        c.collect();
        let y = c.body.y;
        c.update(16.0);
        assert_eq!(c.body.y, y);
    }
}
