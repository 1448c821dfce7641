use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use cityrun_core::body::{KinematicBody, Rect};
use cityrun_core::collision;
use cityrun_core::config::{GRAVITY, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Health at or above this marks an enemy as undefeatable: stomps bounce
/// the player but deal no damage.
pub const INVINCIBLE_HEALTH: i32 = 999;

/// Lead time between a taxi's horn warning and the rush itself.
const TAXI_WARNING_MS: f32 = 1000.0;
/// Sine-flight phase advance per tick.
const SINE_FLIGHT_RATE: f32 = 0.05;
/// Paper wobble phase advance per tick.
const WIND_WOBBLE_RATE: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: i32,
    pub points: i32,
    pub width: f32,
    pub height: f32,
}

/// Enemy roster across all three cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Cyclist,
    Pigeon,
    Taxi,
    Rat,
    Vendor,
    FlyingPaper,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Cyclist => EnemyStats {
                speed: 2.0,
                health: 1,
                points: 50,
                width: 40.0,
                height: 50.0,
            },
            EnemyKind::Pigeon => EnemyStats {
                speed: 1.5,
                health: 1,
                points: 25,
                width: 30.0,
                height: 20.0,
            },
            EnemyKind::Taxi => EnemyStats {
                speed: 8.0,
                health: INVINCIBLE_HEALTH,
                points: 0,
                width: 80.0,
                height: 40.0,
            },
            EnemyKind::Rat => EnemyStats {
                speed: 3.0,
                health: 1,
                points: 30,
                width: 25.0,
                height: 15.0,
            },
            EnemyKind::Vendor => EnemyStats {
                speed: 1.0,
                health: INVINCIBLE_HEALTH,
                points: 0,
                width: 60.0,
                height: 50.0,
            },
            EnemyKind::FlyingPaper => EnemyStats {
                speed: 2.5,
                health: 1,
                points: 20,
                width: 20.0,
                height: 20.0,
            },
        }
    }

    /// Walkers get gravity and platform resolution; fliers and the taxi
    /// steer their own vertical position.
    pub const fn applies_gravity(self) -> bool {
        matches!(self, EnemyKind::Cyclist | EnemyKind::Rat | EnemyKind::Vendor)
    }
}

/// Taxi rush lifecycle. The level drives the transition into `Warning`;
/// the enemy itself counts the warning down and launches the rush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushPhase {
    Idle,
    Warning,
    Rushing,
}

/// Per-kind movement pattern. All randomness flows through a per-enemy
/// seeded RNG so level replays are deterministic.
#[derive(Debug, Clone)]
enum Behavior {
    /// Walk between two x bounds, flipping at each.
    Patrol {
        left: f32,
        right: f32,
        direction: f32,
    },
    /// Patrol horizontally while oscillating around a base altitude.
    SineFlight {
        left: f32,
        right: f32,
        direction: f32,
        base_y: f32,
        amplitude: f32,
        phase: f32,
    },
    /// Scurry, flipping direction half the time whenever a randomized
    /// interval elapses.
    ErraticTurn {
        direction: f32,
        timer_ms: f32,
        interval_ms: f32,
        rng: StdRng,
    },
    /// Park off-screen left of a post until warned, then rush right across
    /// the screen and reset once two screen-widths out.
    TimedRush {
        phase: RushPhase,
        warning_remaining_ms: f32,
        reset_x: f32,
    },
    /// Tumble on the wind with a randomized strength and vertical drift.
    WindDrift {
        direction: f32,
        wind_strength: f32,
        vertical_speed: f32,
        wobble: f32,
        level_width: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: KinematicBody,
    pub kind: EnemyKind,
    pub health: i32,
    pub points: i32,
    behavior: Behavior,
}

impl Enemy {
    fn new(x: f32, y: f32, kind: EnemyKind, behavior: Behavior) -> Self {
        let stats = kind.stats();
        Self {
            body: KinematicBody::new(x, y, stats.width, stats.height),
            kind,
            health: stats.health,
            points: stats.points,
            behavior,
        }
    }

    pub fn cyclist(x: f32, y: f32, patrol_distance: f32) -> Self {
        Self::new(
            x,
            y,
            EnemyKind::Cyclist,
            Behavior::Patrol {
                left: x - patrol_distance,
                right: x + patrol_distance,
                direction: 1.0,
            },
        )
    }

    pub fn pigeon(x: f32, y: f32, amplitude: f32) -> Self {
        Self::new(
            x,
            y,
            EnemyKind::Pigeon,
            Behavior::SineFlight {
                left: x - 200.0,
                right: x + 200.0,
                direction: 1.0,
                base_y: y,
                amplitude,
                phase: 0.0,
            },
        )
    }

    pub fn taxi(x: f32, y: f32) -> Self {
        let reset_x = x - SCREEN_WIDTH - 100.0;
        Self::new(
            reset_x,
            y,
            EnemyKind::Taxi,
            Behavior::TimedRush {
                phase: RushPhase::Idle,
                warning_remaining_ms: 0.0,
                reset_x,
            },
        )
    }

    pub fn rat(x: f32, y: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let interval_ms = rng.random_range(1000.0..3000.0);
        Self::new(
            x,
            y,
            EnemyKind::Rat,
            Behavior::ErraticTurn {
                direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                timer_ms: 0.0,
                interval_ms,
                rng,
            },
        )
    }

    pub fn vendor(x: f32, y: f32) -> Self {
        Self::new(
            x,
            y,
            EnemyKind::Vendor,
            Behavior::Patrol {
                left: x - 150.0,
                right: x + 150.0,
                direction: 1.0,
            },
        )
    }

    pub fn flying_paper(x: f32, y: f32, level_width: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(
            x,
            y,
            EnemyKind::FlyingPaper,
            Behavior::WindDrift {
                direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                wind_strength: rng.random_range(0.5..1.5),
                vertical_speed: rng.random_range(-1.0..1.0),
                wobble: 0.0,
                level_width,
            },
        )
    }

    /// Advance one tick. Walkers get gravity and the shared platform
    /// resolution; the rest steer their own vertical position.
    pub fn update(&mut self, dt_ms: f32, platforms: Option<&[Rect]>) {
        if !self.body.active {
            return;
        }

        let speed = self.kind.stats().speed;
        match &mut self.behavior {
            Behavior::Patrol {
                left,
                right,
                direction,
            } => {
                if *direction > 0.0 && self.body.x >= *right {
                    *direction = -1.0;
                } else if *direction < 0.0 && self.body.x <= *left {
                    *direction = 1.0;
                }
                self.body.vx = speed * *direction;
                self.body.facing_right = *direction > 0.0;
            }
            Behavior::SineFlight {
                left,
                right,
                direction,
                base_y,
                amplitude,
                phase,
            } => {
                if *direction > 0.0 && self.body.x >= *right {
                    *direction = -1.0;
                } else if *direction < 0.0 && self.body.x <= *left {
                    *direction = 1.0;
                }
                self.body.vx = speed * *direction;
                *phase += SINE_FLIGHT_RATE;
                self.body.y = *base_y + phase.sin() * *amplitude;
                self.body.facing_right = *direction > 0.0;
            }
            Behavior::ErraticTurn {
                direction,
                timer_ms,
                interval_ms,
                rng,
            } => {
                *timer_ms += dt_ms;
                if *timer_ms >= *interval_ms {
                    *timer_ms = 0.0;
                    *interval_ms = rng.random_range(1000.0..3000.0);
                    if rng.random_bool(0.5) {
                        *direction = -*direction;
                    }
                }
                self.body.vx = speed * *direction;
                self.body.facing_right = *direction > 0.0;
            }
            Behavior::TimedRush {
                phase,
                warning_remaining_ms,
                reset_x,
            } => match phase {
                RushPhase::Idle => self.body.vx = 0.0,
                RushPhase::Warning => {
                    self.body.vx = 0.0;
                    *warning_remaining_ms -= dt_ms;
                    if *warning_remaining_ms <= 0.0 {
                        *phase = RushPhase::Rushing;
                    }
                }
                RushPhase::Rushing => {
                    self.body.vx = speed;
                    if self.body.x > *reset_x + SCREEN_WIDTH * 2.0 {
                        self.body.x = *reset_x;
                        self.body.vx = 0.0;
                        *phase = RushPhase::Idle;
                    }
                }
            },
            Behavior::WindDrift {
                direction,
                wind_strength,
                vertical_speed,
                wobble,
                level_width,
            } => {
                *wobble += WIND_WOBBLE_RATE;
                self.body.vx = speed * *wind_strength * *direction;
                self.body.y += wobble.sin() * 0.5 + *vertical_speed;

                // Bounce the drift off the altitude band
                if self.body.y < 100.0 {
                    *vertical_speed = vertical_speed.abs();
                } else if self.body.y > SCREEN_HEIGHT - 200.0 {
                    *vertical_speed = -vertical_speed.abs();
                }

                if self.body.x < -100.0 || self.body.x > *level_width + 100.0 {
                    self.body.active = false;
                }
            }
        }

        self.body.x += self.body.vx;

        if self.kind.applies_gravity() {
            self.body.apply_gravity(GRAVITY);
            self.body.y += self.body.vy;
            collision::resolve(&mut self.body, platforms);
        }
    }

    /// Damage is ignored entirely at invincible health. Returns true when
    /// this hit defeated the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.health >= INVINCIBLE_HEALTH {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.body.active = false;
            return true;
        }
        false
    }

    /// Start the taxi's horn warning. No effect mid-rush or on other kinds.
    pub fn trigger_warning(&mut self) {
        if let Behavior::TimedRush {
            phase,
            warning_remaining_ms,
            ..
        } = &mut self.behavior
            && *phase == RushPhase::Idle
        {
            *phase = RushPhase::Warning;
            *warning_remaining_ms = TAXI_WARNING_MS;
        }
    }

    pub fn rush_phase(&self) -> Option<RushPhase> {
        match &self.behavior {
            Behavior::TimedRush { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
