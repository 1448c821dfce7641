use crate::body::{KinematicBody, Rect};
use crate::config::{GROUND_PLANE_Y, LANDING_TOLERANCE};

/// Contact flags produced by one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub landed: bool,
    pub bonked: bool,
}

/// Resolve a body that has already been moved this tick against static
/// platform rectangles.
///
/// A fast-falling body can end the move partially inside a platform; any
/// bottom-edge penetration shallower than `LANDING_TOLERANCE` is treated as
/// a landing rather than a pass-through. The mirrored rule applies to upward
/// movement into a platform's underside.
pub fn resolve_platforms(body: &mut KinematicBody, platforms: &[Rect]) -> Contacts {
    let mut contacts = Contacts::default();
    body.on_ground = false;

    for platform in platforms {
        if !body.rect().overlaps(platform) {
            continue;
        }

        if body.vy > 0.0 && body.bottom() <= platform.top() + LANDING_TOLERANCE {
            // Landing on top
            body.y = platform.top() - body.height;
            body.vy = 0.0;
            body.on_ground = true;
            contacts.landed = true;
        } else if body.vy < 0.0 && body.y >= platform.bottom() - LANDING_TOLERANCE {
            // Head bonk on the underside
            body.y = platform.bottom();
            body.vy = 0.0;
            contacts.bonked = true;
        }
    }

    contacts
}

/// Resolve against the implicit ground plane, used when no platform list is
/// supplied (the simplest enemy variants don't need per-platform behavior).
pub fn resolve_ground_plane(body: &mut KinematicBody) -> Contacts {
    let mut contacts = Contacts::default();
    if body.bottom() >= GROUND_PLANE_Y {
        body.y = GROUND_PLANE_Y - body.height;
        body.vy = 0.0;
        body.on_ground = true;
        contacts.landed = true;
    } else {
        body.on_ground = false;
    }
    contacts
}

/// Resolve against platforms when present, else the implicit ground plane.
pub fn resolve(body: &mut KinematicBody, platforms: Option<&[Rect]>) -> Contacts {
    match platforms {
        Some(platforms) => resolve_platforms(body, platforms),
        None => resolve_ground_plane(body),
    }
}
