//! Motion integration and wall reflection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::World;

/// Wall handling after a player moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Flip the velocity component, leave the position where it is. A sprite
    /// can sit up to one step outside the canvas for a frame.
    #[default]
    Reflect,
    /// Clamp the position back inside, then point the component inward
    ClampReflect,
}

/// Move every player by its velocity, then reflect per axis
pub fn step_motion(world: &mut World, policy: BoundaryPolicy) {
    let bounds = world.bounds();
    let size = world.entity_size;

    for player in &mut world.players {
        player.pos += player.vel;

        // Axes are independent: a corner hit flips both components
        for axis in 0..2 {
            let (pos, vel) = reflect_axis(
                player.pos[axis],
                player.vel[axis],
                size[axis],
                bounds[axis],
                policy,
            );
            player.pos[axis] = pos;
            player.vel[axis] = vel;
        }
    }
}

/// Returns the corrected `(pos, vel)` for one axis
#[inline]
fn reflect_axis(pos: f32, vel: f32, size: f32, bound: f32, policy: BoundaryPolicy) -> (f32, f32) {
    let below = pos < 0.0;
    let above = pos + size > bound;
    if !below && !above {
        return (pos, vel);
    }

    match policy {
        BoundaryPolicy::Reflect => (pos, -vel),
        BoundaryPolicy::ClampReflect => {
            if below {
                (0.0, vel.abs())
            } else {
                (bound - size, -vel.abs())
            }
        }
    }
}

/// True if the bounding box at `pos` lies fully on the canvas
pub fn within_bounds(pos: Vec2, size: Vec2, bounds: Vec2) -> bool {
    pos.x >= 0.0 && pos.y >= 0.0 && pos.x + size.x <= bounds.x && pos.y + size.y <= bounds.y
}
