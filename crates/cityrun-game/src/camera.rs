use cityrun_core::config::{CameraConfig, SCREEN_WIDTH};

/// Smoothed side-scrolling camera. Tracks a single horizontal offset;
/// vertical framing is fixed.
#[derive(Debug, Clone)]
pub struct Camera {
    pub offset_x: f32,
    level_width: f32,
    config: CameraConfig,
}

impl Camera {
    pub fn new(level_width: f32, config: &CameraConfig) -> Self {
        Self {
            offset_x: 0.0,
            level_width,
            config: config.clone(),
        }
    }

    /// Ease toward the player, biased ahead of their movement, clamped to
    /// the level bounds.
    pub fn update(&mut self, player_x: f32, player_vx: f32) {
        let mut target = player_x - self.config.player_offset_x;
        if player_vx > 0.0 {
            target += self.config.lookahead;
        } else if player_vx < 0.0 {
            target -= self.config.lookahead;
        }

        self.offset_x += (target - self.offset_x) * self.config.smoothing;

        let max_offset = (self.level_width - SCREEN_WIDTH).max(0.0);
        self.offset_x = self.offset_x.clamp(0.0, max_offset);
    }

    /// World x to screen x.
    pub fn apply_x(&self, world_x: f32) -> f32 {
        world_x - self.offset_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityrun_core::config::{CAMERA_LOOKAHEAD, CAMERA_PLAYER_OFFSET_X, LEVEL_WIDTH};

    fn camera() -> Camera {
        Camera::new(LEVEL_WIDTH, &CameraConfig::default())
    }

    #[test]
    fn camera_stays_at_left_bound_near_spawn() {
        let mut cam = camera();
        for _ in 0..100 {
            cam.update(100.0, 0.0);
        }
        assert_eq!(cam.offset_x, 0.0, "Target is negative, clamp holds at 0");
    }

    #[test]
    fn camera_converges_on_standing_player() {
        let mut cam = camera();
        for _ in 0..500 {
            cam.update(2000.0, 0.0);
        }
        let expected = 2000.0 - CAMERA_PLAYER_OFFSET_X;
        assert!(
            (cam.offset_x - expected).abs() < 0.5,
            "Expected convergence near {expected}, got {}",
            cam.offset_x
        );
    }

    #[test]
    fn lookahead_biases_toward_movement() {
        let mut right = camera();
        let mut still = camera();
        for _ in 0..500 {
            right.update(2000.0, 5.0);
            still.update(2000.0, 0.0);
        }
        assert!(
            (right.offset_x - still.offset_x - CAMERA_LOOKAHEAD).abs() < 1.0,
            "Rightward movement shifts the camera ahead by the lookahead"
        );
    }

    #[test]
    fn camera_clamps_at_right_bound() {
        let mut cam = camera();
        for _ in 0..500 {
            cam.update(LEVEL_WIDTH - 10.0, 5.0);
        }
        assert_eq!(cam.offset_x, LEVEL_WIDTH - SCREEN_WIDTH);
    }

    #[test]
    fn narrow_level_never_scrolls() {
        let mut cam = Camera::new(800.0, &CameraConfig::default());
        for _ in 0..100 {
            cam.update(700.0, 5.0);
        }
        assert_eq!(cam.offset_x, 0.0, "Level narrower than the screen is static");
    }

    #[test]
    fn apply_x_translates_world_to_screen() {
        let mut cam = camera();
        cam.offset_x = 500.0;
        assert_eq!(cam.apply_x(800.0), 300.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_always_within_level_bounds(
                positions in proptest::collection::vec((0f32..4000.0, -8f32..8.0), 1..200)
            ) {
                let mut cam = camera();
                for (x, vx) in positions {
                    cam.update(x, vx);
                    prop_assert!(cam.offset_x >= 0.0);
                    prop_assert!(cam.offset_x <= LEVEL_WIDTH - SCREEN_WIDTH);
                }
            }
        }
    }
}
