use cityrun_core::body::{KinematicBody, Rect};
use cityrun_core::collision;
use cityrun_core::config::{
    DAMAGE_KNOCKBACK_VY, PLAYER_HEIGHT, PLAYER_STOP_EPSILON, PLAYER_WIDTH, PhysicsConfig,
};
use cityrun_core::input::Input;

use crate::collectible::CollectibleKind;
use crate::events::GameEvent;
use crate::powerups::{ActivePowerUp, PowerUpKind};

/// Double jump launches at this fraction of the full jump impulse.
const DOUBLE_JUMP_FACTOR: f32 = 0.8;

/// The runner. Wraps a kinematic body with health, score, jump state, and
/// the active power-up table.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: KinematicBody,
    pub health: i32,
    pub score: i32,
    pub invincible: bool,
    pub invincibility_remaining_ms: f32,
    pub is_jumping: bool,
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
    active_powerups: Vec<ActivePowerUp>,
    physics: PhysicsConfig,
}

impl Player {
    pub fn new(x: f32, y: f32, physics: &PhysicsConfig) -> Self {
        Self {
            body: KinematicBody::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            health: physics.max_health,
            score: 0,
            invincible: false,
            invincibility_remaining_ms: 0.0,
            is_jumping: false,
            can_double_jump: false,
            has_double_jumped: false,
            active_powerups: Vec::new(),
            physics: physics.clone(),
        }
    }

    /// Map the held-key snapshot to horizontal velocity and jump attempts.
    pub fn handle_input(&mut self, input: &Input) {
        let mut moving = false;

        if input.left {
            self.body.vx = -self.physics.player_speed;
            self.body.facing_right = false;
            moving = true;
        } else if input.right {
            self.body.vx = self.physics.player_speed;
            self.body.facing_right = true;
            moving = true;
        } else {
            // Glide to a stop
            self.body.vx *= self.physics.friction;
            if self.body.vx.abs() < PLAYER_STOP_EPSILON {
                self.body.vx = 0.0;
            }
        }

        if input.sprint && moving {
            self.body.vx *= self.physics.sprint_multiplier;
        }

        if input.jump {
            self.jump();
        }
    }

    /// Ground jump, or the one air jump a double-jump grant allows.
    pub fn jump(&mut self) {
        if self.body.on_ground && !self.is_jumping {
            self.body.vy = self.physics.jump_strength;
            self.is_jumping = true;
            self.body.on_ground = false;
            self.has_double_jumped = false;
        } else if self.can_double_jump && !self.has_double_jumped && !self.body.on_ground {
            self.body.vy = self.physics.jump_strength * DOUBLE_JUMP_FACTOR;
            self.has_double_jumped = true;
        }
    }

    /// Integrate one tick: gravity, move, resolve against platforms (or the
    /// implicit ground plane), then advance the invincibility and power-up
    /// timers. Returns expiry events.
    pub fn update(&mut self, dt_ms: f32, platforms: Option<&[Rect]>) -> Vec<GameEvent> {
        self.body.apply_gravity(self.physics.gravity);

        self.body.x += self.body.vx;
        self.body.y += self.body.vy;

        let contacts = collision::resolve(&mut self.body, platforms);
        if contacts.landed {
            self.is_jumping = false;
        }

        // Level starts at x=0; there is no running off the left edge.
        if self.body.x < 0.0 {
            self.body.x = 0.0;
            self.body.vx = 0.0;
        }

        if self.invincible {
            self.invincibility_remaining_ms -= dt_ms;
            if self.invincibility_remaining_ms <= 0.0 {
                self.invincible = false;
                self.invincibility_remaining_ms = 0.0;
            }
        }

        self.update_powerups(dt_ms)
    }

    /// Apply damage unless an invincibility window is open. An active Shield
    /// absorbs the hit in place of health. Either way a fresh invincibility
    /// window opens and the player is knocked upward slightly.
    pub fn take_damage(&mut self, amount: i32) -> Option<GameEvent> {
        if self.invincible {
            return None;
        }

        if self.has_powerup(PowerUpKind::Shield) {
            self.active_powerups
                .retain(|pu| pu.kind != PowerUpKind::Shield);
        } else {
            self.health -= amount;
            if self.health < 0 {
                self.health = 0;
            }
        }

        self.invincible = true;
        self.invincibility_remaining_ms = self.physics.invincibility_ms;
        self.body.vy = DAMAGE_KNOCKBACK_VY;

        Some(GameEvent::Damaged {
            remaining_health: self.health,
        })
    }

    /// Credit a pickup's value, doubled under an active score multiplier.
    /// Returns the points actually credited.
    pub fn collect_item(&mut self, kind: CollectibleKind) -> i32 {
        let mut points = kind.value();
        if self.has_powerup(PowerUpKind::ScoreMultiplier) {
            points *= 2;
        }
        self.score += points;
        points
    }

    /// Grant a power-up, refreshing the timer if the kind is already active.
    pub fn activate_powerup(&mut self, kind: PowerUpKind) -> GameEvent {
        match self.active_powerups.iter_mut().find(|pu| pu.kind == kind) {
            Some(existing) => existing.refresh(),
            None => self.active_powerups.push(ActivePowerUp::new(kind)),
        }
        if kind == PowerUpKind::DoubleJump {
            self.can_double_jump = true;
        }
        GameEvent::PowerUpActivated { kind }
    }

    pub fn has_powerup(&self, kind: PowerUpKind) -> bool {
        self.active_powerups.iter().any(|pu| pu.kind == kind)
    }

    pub fn active_powerups(&self) -> &[ActivePowerUp] {
        &self.active_powerups
    }

    fn update_powerups(&mut self, dt_ms: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for pu in &mut self.active_powerups {
            pu.tick(dt_ms);
        }
        for pu in &self.active_powerups {
            if pu.is_expired() {
                if pu.kind == PowerUpKind::DoubleJump {
                    self.can_double_jump = false;
                }
                events.push(GameEvent::PowerUpExpired { kind: pu.kind });
            }
        }
        self.active_powerups.retain(|pu| !pu.is_expired());
        events
    }

    /// In-place respawn: position and velocity only, everything else persists.
    pub fn reset_position(&mut self, x: f32, y: f32) {
        self.body.x = x;
        self.body.y = y;
        self.body.vx = 0.0;
        self.body.vy = 0.0;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}
