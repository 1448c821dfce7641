use serde::{Deserialize, Serialize};

use crate::config::TERMINAL_VELOCITY;

/// Axis-aligned rectangle in world pixels. +y points down the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Position, velocity, and AABB shared by every dynamic actor.
///
/// An inactive body is excluded from all collision and rendering queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub facing_right: bool,
    pub active: bool,
    pub on_ground: bool,
}

impl KinematicBody {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            facing_right: true,
            active: true,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Accumulate gravity, capped at terminal velocity.
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vy += gravity;
        if self.vy > TERMINAL_VELOCITY {
            self.vy = TERMINAL_VELOCITY;
        }
    }

    /// AABB overlap test. Inactive bodies never overlap anything.
    pub fn overlaps(&self, other: &KinematicBody) -> bool {
        self.active && other.active && self.rect().overlaps(&other.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b), "Edge-touching rects must not count as overlap");
    }

    #[test]
    fn penetrating_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn gravity_caps_at_terminal_velocity() {
        let mut body = KinematicBody::new(0.0, 0.0, 32.0, 48.0);
        for _ in 0..100 {
            body.apply_gravity(0.8);
        }
        assert_eq!(body.vy, TERMINAL_VELOCITY);
    }

    #[test]
    fn inactive_body_never_overlaps() {
        let a = KinematicBody::new(0.0, 0.0, 10.0, 10.0);
        let mut b = KinematicBody::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        b.active = false;
        assert!(!a.overlaps(&b), "Inactive bodies are excluded from collision");
    }
}
