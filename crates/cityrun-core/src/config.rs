use serde::{Deserialize, Serialize};

/// Screen width in pixels.
pub const SCREEN_WIDTH: f32 = 1280.0;
/// Screen height in pixels.
pub const SCREEN_HEIGHT: f32 = 720.0;
/// Gravity per tick (pixels/tick^2, downward; +y is down).
pub const GRAVITY: f32 = 0.8;
/// Maximum downward velocity.
pub const TERMINAL_VELOCITY: f32 = 15.0;
/// Top edge of the implicit ground plane used when no platform list is supplied.
pub const GROUND_PLANE_Y: f32 = SCREEN_HEIGHT - 100.0;
/// Penetration depth within which a falling body still counts as landed.
pub const LANDING_TOLERANCE: f32 = 15.0;

/// Player hitbox width.
pub const PLAYER_WIDTH: f32 = 32.0;
/// Player hitbox height.
pub const PLAYER_HEIGHT: f32 = 48.0;
/// Horizontal move speed (pixels/tick).
pub const PLAYER_SPEED: f32 = 5.0;
/// Speed multiplier while sprint is held.
pub const PLAYER_SPRINT_MULTIPLIER: f32 = 1.5;
/// Jump impulse. Negative is up.
pub const PLAYER_JUMP_STRENGTH: f32 = -15.0;
/// Horizontal friction multiplier applied each tick without directional input.
pub const PLAYER_FRICTION: f32 = 0.85;
/// Velocity magnitude below which friction snaps vx to exactly zero.
pub const PLAYER_STOP_EPSILON: f32 = 0.1;
/// Maximum (and starting) player health.
pub const PLAYER_MAX_HEALTH: i32 = 5;
/// Invincibility window after taking a hit, in milliseconds.
pub const PLAYER_INVINCIBILITY_MS: f32 = 2000.0;
/// Upward knockback applied on taking damage.
pub const DAMAGE_KNOCKBACK_VY: f32 = -5.0;
/// Upward bounce applied on stomping an enemy.
pub const STOMP_BOUNCE_VY: f32 = -8.0;

/// Camera keeps the player this far from the left screen edge.
pub const CAMERA_PLAYER_OFFSET_X: f32 = SCREEN_WIDTH / 3.0;
/// Camera bias in the direction of horizontal movement.
pub const CAMERA_LOOKAHEAD: f32 = 100.0;
/// Fraction of the remaining distance the camera covers each tick.
pub const CAMERA_SMOOTHING: f32 = 0.1;

/// Level width in pixels.
pub const LEVEL_WIDTH: f32 = 4000.0;
/// Checkpoint x thresholds, ascending.
pub const CHECKPOINT_POSITIONS: [f32; 3] = [1000.0, 2000.0, 3000.0];
/// Landmark sits this far before the level's right edge.
pub const LANDMARK_INSET: f32 = 300.0;
/// Respawn lands this far past the checkpoint threshold.
pub const CHECKPOINT_RESPAWN_OFFSET: f32 = 50.0;
/// Level start spawn position.
pub const PLAYER_SPAWN_X: f32 = 100.0;
/// Respawn height (start and checkpoints alike).
pub const RESPAWN_Y: f32 = SCREEN_HEIGHT - 200.0;
/// Falling below this y counts as falling off the map.
pub const FALL_LIMIT_Y: f32 = SCREEN_HEIGHT + 100.0;

/// Physics tunables, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub player_speed: f32,
    pub sprint_multiplier: f32,
    pub jump_strength: f32,
    pub friction: f32,
    pub max_health: i32,
    pub invincibility_ms: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            player_speed: PLAYER_SPEED,
            sprint_multiplier: PLAYER_SPRINT_MULTIPLIER,
            jump_strength: PLAYER_JUMP_STRENGTH,
            friction: PLAYER_FRICTION,
            max_health: PLAYER_MAX_HEALTH,
            invincibility_ms: PLAYER_INVINCIBILITY_MS,
        }
    }
}

/// Camera tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub player_offset_x: f32,
    pub lookahead: f32,
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            player_offset_x: CAMERA_PLAYER_OFFSET_X,
            lookahead: CAMERA_LOOKAHEAD,
            smoothing: CAMERA_SMOOTHING,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityRunConfig {
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
}

impl CityRunConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("CITYRUN_CONFIG")
            .unwrap_or_else(|_| "config/cityrun.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<CityRunConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    CityRunConfig::default()
                },
            },
            Err(_) => CityRunConfig::default(),
        }
    }

    /// Reject values that would break the simulation invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physics.gravity <= 0.0 {
            return Err(ConfigError::new("physics.gravity must be positive"));
        }
        if self.physics.terminal_velocity <= 0.0 {
            return Err(ConfigError::new("physics.terminal_velocity must be positive"));
        }
        if self.physics.player_speed <= 0.0 {
            return Err(ConfigError::new("physics.player_speed must be positive"));
        }
        if self.physics.jump_strength >= 0.0 {
            return Err(ConfigError::new(
                "physics.jump_strength must be negative (up)",
            ));
        }
        if !(0.0..1.0).contains(&self.physics.friction) {
            return Err(ConfigError::new("physics.friction must be in [0, 1)"));
        }
        if self.physics.max_health <= 0 {
            return Err(ConfigError::new("physics.max_health must be positive"));
        }
        if !(0.0..=1.0).contains(&self.camera.smoothing) {
            return Err(ConfigError::new("camera.smoothing must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Configuration rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid config: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
