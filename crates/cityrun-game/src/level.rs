use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use cityrun_core::body::Rect;
use cityrun_core::config::{
    CHECKPOINT_RESPAWN_OFFSET, PLAYER_SPAWN_X, RESPAWN_Y, STOMP_BOUNCE_VY,
};

use crate::cities::City;
use crate::collectible::Collectible;
use crate::enemy::{Enemy, INVINCIBLE_HEALTH, RushPhase};
use crate::events::GameEvent;
use crate::player::Player;

/// Type tag for the renderer; collision treats all platforms alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Stoop,
    Awning,
    FireEscape,
    Rooftop,
    Bench,
    Ledge,
    TrainTrack,
}

/// Immutable platform geometry, created once at level construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
        }
    }
}

/// One city's worth of world: static geometry, enemies, collectibles, and
/// progression (checkpoints + landmark).
#[derive(Debug)]
pub struct LevelWorld {
    pub city: City,
    pub level_width: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub checkpoints: Vec<f32>,
    pub landmark_x: f32,
    pub current_checkpoint: usize,
    pub completed: bool,
    collision_rects: Vec<Rect>,
    rush_timer_ms: f32,
    rng: StdRng,
}

impl LevelWorld {
    pub fn new(
        city: City,
        level_width: f32,
        platforms: Vec<Platform>,
        enemies: Vec<Enemy>,
        collectibles: Vec<Collectible>,
        checkpoints: Vec<f32>,
        landmark_x: f32,
        mut rng: StdRng,
    ) -> Self {
        let collision_rects = platforms.iter().map(|p| p.rect).collect();
        let rush_timer_ms = rng.random_range(4000.0..8000.0);
        Self {
            city,
            level_width,
            platforms,
            enemies,
            collectibles,
            checkpoints,
            landmark_x,
            current_checkpoint: 0,
            completed: false,
            collision_rects,
            rush_timer_ms,
            rng,
        }
    }

    /// Platform rectangles in collision form.
    pub fn collision_rects(&self) -> &[Rect] {
        &self.collision_rects
    }

    /// Tick every live entity and drive the taxi rush cycle.
    pub fn update(&mut self, dt_ms: f32) {
        self.rush_timer_ms -= dt_ms;
        if self.rush_timer_ms <= 0.0 {
            self.rush_timer_ms = self.rng.random_range(4000.0..8000.0);
            if let Some(taxi) = self
                .enemies
                .iter_mut()
                .find(|e| e.rush_phase() == Some(RushPhase::Idle) && e.body.active)
            {
                taxi.trigger_warning();
            }
        }

        for enemy in &mut self.enemies {
            if enemy.body.active {
                enemy.update(dt_ms, Some(&self.collision_rects));
            }
        }
        for collectible in &mut self.collectibles {
            if !collectible.collected {
                collectible.update(dt_ms);
            }
        }
    }

    /// Collect every uncollected item the player overlaps, crediting score
    /// through the player so an active multiplier applies.
    pub fn check_collectibles(&mut self, player: &mut Player) -> (i32, Vec<GameEvent>) {
        let mut total = 0;
        let mut events = Vec::new();
        for collectible in &mut self.collectibles {
            if !collectible.collected && player.body.overlaps(&collectible.body) {
                collectible.collect();
                let points = player.collect_item(collectible.kind);
                total += points;
                events.push(GameEvent::Collected {
                    kind: collectible.kind,
                    points,
                });
            }
        }
        (total, events)
    }

    /// Resolve contact with at most one enemy per tick (the first active
    /// overlap in roster order).
    ///
    /// Falling onto an enemy's upper half is a stomp: the player always
    /// bounces and scores, and the enemy additionally takes damage unless
    /// it is undefeatable. Any other contact is a hit on the player, which
    /// the invincibility window may suppress.
    pub fn check_enemy_contact(&mut self, player: &mut Player) -> Option<GameEvent> {
        for enemy in &mut self.enemies {
            if !enemy.body.active || !player.body.overlaps(&enemy.body) {
                continue;
            }

            if player.body.vy > 0.0 && player.body.bottom() <= enemy.body.center_y() {
                let points = enemy.points;
                if enemy.health < INVINCIBLE_HEALTH {
                    enemy.take_damage(1);
                }
                player.body.vy = STOMP_BOUNCE_VY;
                player.score += points;
                return Some(GameEvent::Stomped {
                    kind: enemy.kind,
                    points,
                });
            }
            return player.take_damage(1);
        }
        None
    }

    /// Record checkpoint thresholds crossed so far. Crossing
    /// `checkpoints[i]` advances `current_checkpoint` to `i + 1`; progress
    /// never moves backward and each threshold reports exactly once, in
    /// ascending order when a single step clears several at a time.
    pub fn check_checkpoint(&mut self, player_x: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for (i, &checkpoint_x) in self.checkpoints.iter().enumerate() {
            if player_x >= checkpoint_x && i + 1 > self.current_checkpoint {
                self.current_checkpoint = i + 1;
                tracing::info!(city = %self.city, index = i + 1, "checkpoint reached");
                events.push(GameEvent::CheckpointReached { index: i + 1 });
            }
        }
        events
    }

    /// One-way completion latch at the landmark.
    pub fn check_landmark(&mut self, player_x: f32) -> Option<GameEvent> {
        if !self.completed && player_x >= self.landmark_x {
            self.completed = true;
            tracing::info!(city = %self.city, "landmark reached");
            return Some(GameEvent::LandmarkReached);
        }
        None
    }

    /// Where a respawn puts the player: the level start before any
    /// checkpoint, otherwise just past the latest one.
    pub fn respawn_position(&self) -> (f32, f32) {
        if self.current_checkpoint == 0 {
            return (PLAYER_SPAWN_X, RESPAWN_Y);
        }
        match self.checkpoints.get(self.current_checkpoint - 1) {
            Some(&x) => (x + CHECKPOINT_RESPAWN_OFFSET, RESPAWN_Y),
            None => (PLAYER_SPAWN_X, RESPAWN_Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectible::CollectibleKind;
    use crate::enemy::EnemyKind;
    use crate::powerups::PowerUpKind;
    use cityrun_core::config::{
        CHECKPOINT_POSITIONS, GROUND_PLANE_Y, LANDMARK_INSET, LEVEL_WIDTH, PLAYER_HEIGHT,
        PLAYER_MAX_HEALTH, PhysicsConfig, SCREEN_HEIGHT,
    };
    use rand::SeedableRng;

    fn world_with(enemies: Vec<Enemy>, collectibles: Vec<Collectible>) -> LevelWorld {
        let platforms = vec![Platform::new(
            0.0,
            GROUND_PLANE_Y,
            LEVEL_WIDTH,
            100.0,
            PlatformKind::Ground,
        )];
        LevelWorld::new(
            City::Boston,
            LEVEL_WIDTH,
            platforms,
            enemies,
            collectibles,
            CHECKPOINT_POSITIONS.to_vec(),
            LEVEL_WIDTH - LANDMARK_INSET,
            StdRng::seed_from_u64(1),
        )
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(x, y, &PhysicsConfig::default())
    }

    // ================================================================
    // Collectibles
    // ================================================================

    #[test]
    fn overlapping_collectible_is_picked_up_once() {
        let mut world = world_with(
            vec![],
            vec![Collectible::new(100.0, 400.0, CollectibleKind::Teacup)],
        );
        let mut player = player_at(100.0, 400.0);

        let (points, events) = world.check_collectibles(&mut player);
        assert_eq!(points, 10);
        assert_eq!(player.score, 10);
        assert_eq!(events.len(), 1);

        let (points, events) = world.check_collectibles(&mut player);
        assert_eq!(points, 0, "Collected items never report again");
        assert!(events.is_empty());
    }

    #[test]
    fn multiplier_applies_through_pickup() {
        let mut world = world_with(
            vec![],
            vec![Collectible::new(100.0, 400.0, CollectibleKind::Book)],
        );
        let mut player = player_at(100.0, 400.0);
        player.activate_powerup(PowerUpKind::ScoreMultiplier);

        let (points, events) = world.check_collectibles(&mut player);
        assert_eq!(points, 50);
        assert_eq!(
            events[0],
            GameEvent::Collected {
                kind: CollectibleKind::Book,
                points: 50
            }
        );
    }

    // ================================================================
    // Enemy contact
    // ================================================================

    /// Stomp geometry: player falling with its bottom in the enemy's upper
    /// half while the hitboxes overlap.
    fn stomping_player_over(enemy: &Enemy) -> Player {
        let mut player = player_at(
            enemy.body.x,
            enemy.body.y - PLAYER_HEIGHT + enemy.body.height * 0.25,
        );
        player.body.vy = 5.0;
        player
    }

    #[test]
    fn stomp_defeats_enemy_and_bounces() {
        let enemy = Enemy::cyclist(300.0, 560.0, 100.0);
        let mut player = stomping_player_over(&enemy);
        let mut world = world_with(vec![enemy], vec![]);

        let event = world.check_enemy_contact(&mut player);
        assert_eq!(
            event,
            Some(GameEvent::Stomped {
                kind: EnemyKind::Cyclist,
                points: 50
            })
        );
        assert_eq!(player.body.vy, STOMP_BOUNCE_VY);
        assert_eq!(player.score, 50);
        assert_eq!(player.health, PLAYER_MAX_HEALTH, "Stomps are free");
        assert!(!world.enemies[0].body.active);
    }

    #[test]
    fn stomping_undefeatable_enemy_still_bounces() {
        let enemy = Enemy::vendor(300.0, 560.0);
        let mut player = stomping_player_over(&enemy);
        let mut world = world_with(vec![enemy], vec![]);

        let event = world.check_enemy_contact(&mut player);
        assert_eq!(
            event,
            Some(GameEvent::Stomped {
                kind: EnemyKind::Vendor,
                points: 0
            })
        );
        assert_eq!(player.body.vy, STOMP_BOUNCE_VY);
        assert!(world.enemies[0].body.active, "Vendor survives the stomp");
        assert_eq!(
            world.enemies[0].health, INVINCIBLE_HEALTH,
            "Undefeatable health untouched"
        );
    }

    #[test]
    fn side_contact_damages_player() {
        let enemy = Enemy::cyclist(300.0, 560.0, 100.0);
        let mut player = player_at(300.0, 562.0);
        player.body.vy = 0.0;
        let mut world = world_with(vec![enemy], vec![]);

        let event = world.check_enemy_contact(&mut player);
        assert_eq!(
            event,
            Some(GameEvent::Damaged {
                remaining_health: PLAYER_MAX_HEALTH - 1
            })
        );
        assert!(player.invincible);
    }

    #[test]
    fn invincible_player_reports_no_contact_event() {
        let enemy = Enemy::cyclist(300.0, 560.0, 100.0);
        let mut player = player_at(300.0, 562.0);
        player.take_damage(1);
        let health = player.health;
        let mut world = world_with(vec![enemy], vec![]);

        assert_eq!(world.check_enemy_contact(&mut player), None);
        assert_eq!(player.health, health);
    }

    // Only the first overlapping enemy resolves in a tick, even when two
    // share the player's hitbox.
    #[test]
    fn one_enemy_resolves_per_tick() {
        let a = Enemy::cyclist(300.0, 560.0, 100.0);
        let b = Enemy::cyclist(305.0, 560.0, 100.0);
        let mut player = stomping_player_over(&a);
        let mut world = world_with(vec![a, b], vec![]);

        world.check_enemy_contact(&mut player);
        assert!(!world.enemies[0].body.active, "First overlap resolves");
        assert!(world.enemies[1].body.active, "Second waits for next tick");
    }

    #[test]
    fn inactive_enemy_is_skipped() {
        let mut enemy = Enemy::cyclist(300.0, 560.0, 100.0);
        enemy.take_damage(1);
        let mut player = player_at(300.0, 562.0);
        let mut world = world_with(vec![enemy], vec![]);

        assert_eq!(world.check_enemy_contact(&mut player), None);
    }

    // ================================================================
    // Checkpoints and landmark
    // ================================================================

    #[test]
    fn first_checkpoint_reports_index_one() {
        let mut world = world_with(vec![], vec![]);
        assert!(world.check_checkpoint(500.0).is_empty());
        assert_eq!(
            world.check_checkpoint(1000.0),
            vec![GameEvent::CheckpointReached { index: 1 }]
        );
        assert_eq!(world.current_checkpoint, 1);
    }

    #[test]
    fn checkpoint_reports_once_and_never_regresses() {
        let mut world = world_with(vec![], vec![]);
        world.check_checkpoint(1500.0);
        assert_eq!(world.current_checkpoint, 1);

        // Walking back and re-crossing stays silent
        assert!(world.check_checkpoint(500.0).is_empty());
        assert!(world.check_checkpoint(1500.0).is_empty());
        assert_eq!(world.current_checkpoint, 1);
    }

    #[test]
    fn skipping_ahead_reports_each_threshold() {
        // A teleport-sized step past two thresholds reports both, in order.
        let mut world = world_with(vec![], vec![]);
        assert_eq!(
            world.check_checkpoint(2500.0),
            vec![
                GameEvent::CheckpointReached { index: 1 },
                GameEvent::CheckpointReached { index: 2 },
            ]
        );
        assert_eq!(world.current_checkpoint, 2);

        // Already-reported thresholds stay quiet on the next step
        assert_eq!(
            world.check_checkpoint(3200.0),
            vec![GameEvent::CheckpointReached { index: 3 }]
        );
    }

    #[test]
    fn landmark_latch_fires_once() {
        let mut world = world_with(vec![], vec![]);
        let landmark_x = world.landmark_x;
        assert_eq!(world.check_landmark(landmark_x - 1.0), None);
        assert_eq!(
            world.check_landmark(landmark_x),
            Some(GameEvent::LandmarkReached)
        );
        assert!(world.completed);
        assert_eq!(world.check_landmark(landmark_x + 100.0), None);
    }

    #[test]
    fn respawn_follows_latest_checkpoint() {
        let mut world = world_with(vec![], vec![]);
        assert_eq!(world.respawn_position(), (PLAYER_SPAWN_X, SCREEN_HEIGHT - 200.0));

        world.check_checkpoint(2100.0);
        assert_eq!(
            world.respawn_position(),
            (2000.0 + CHECKPOINT_RESPAWN_OFFSET, SCREEN_HEIGHT - 200.0)
        );
    }

    // ================================================================
    // Rush cycle
    // ================================================================

    #[test]
    fn rush_timer_eventually_warns_an_idle_taxi() {
        let taxi = Enemy::taxi(100.0, 580.0);
        let mut world = world_with(vec![taxi], vec![]);

        // First trigger fires within the 8000ms ceiling
        let mut warned = false;
        for _ in 0..600 {
            world.update(16.0);
            if world.enemies[0].rush_phase() != Some(RushPhase::Idle) {
                warned = true;
                break;
            }
        }
        assert!(warned, "Rush cycle must trigger within its interval ceiling");
    }

    #[test]
    fn rush_timer_without_taxi_is_harmless() {
        let mut world = world_with(vec![Enemy::cyclist(300.0, 560.0, 100.0)], vec![]);
        for _ in 0..1000 {
            world.update(16.0);
        }
        assert!(world.enemies[0].body.active);
    }

    // ================================================================
    // Property tests
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn checkpoint_index_is_monotonic(
                xs in proptest::collection::vec(0f32..4000.0, 1..100)
            ) {
                let mut world = world_with(vec![], vec![]);
                let mut last = 0;
                for x in xs {
                    world.check_checkpoint(x);
                    prop_assert!(
                        world.current_checkpoint >= last,
                        "Checkpoint index regressed"
                    );
                    prop_assert!(world.current_checkpoint <= CHECKPOINT_POSITIONS.len());
                    last = world.current_checkpoint;
                }
            }
        }
    }
}
