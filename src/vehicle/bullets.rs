use nalgebra::Vector2;

use super::craft::{heading_vector, Craft};
use crate::arena::FixedArena;

pub const MAX_BULLETS: usize = 1000;
/// Firing is refused once fewer than this many slots remain free.
pub const BULLET_HEADROOM: usize = 5;
/// Lateral offset of each barrel on a twin-gun craft.
pub const TWIN_GUN_OFFSET: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub traveled: f64,
}

pub type Bullets = FixedArena<Bullet>;

pub fn bullet_arena() -> Bullets {
    FixedArena::new(MAX_BULLETS)
}

/// Spawn one volley from the craft's guns. Returns how many bullets were added.
pub fn fire(bullets: &mut Bullets, craft: &Craft, muzzle_speed: f64) -> usize {
    if bullets.free() <= BULLET_HEADROOM {
        return 0;
    }
    let dir = heading_vector(craft.angle);
    let vel = craft.vel + dir * muzzle_speed;
    // perpendicular to the heading, to the craft's right
    let side = Vector2::new(-dir.y, dir.x);

    let offsets: &[f64] = match craft.weapon_level {
        2 => &[-TWIN_GUN_OFFSET, TWIN_GUN_OFFSET],
        _ => &[0.0],
    };
    let mut added = 0;
    for &o in offsets {
        if bullets.push(Bullet { pos: craft.pos + side * o, vel, traveled: 0.0 }) {
            added += 1;
        }
    }
    added
}

/// Move every bullet one frame and drop those past `range`.
pub fn advance(bullets: &mut Bullets, range: f64) {
    for b in bullets.iter_mut() {
        b.pos += b.vel;
        b.traveled += b.vel.norm();
    }
    bullets.retain(|b| b.traveled <= range);
}
