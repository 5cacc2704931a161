//! One simulation step
//!
//! Motion, then collisions, then aggregation. All three finish before the
//! caller sees the result, so a tick is atomic from the driver's side.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionPolicy, CollisionReport, resolve_collisions};
use super::motion::{BoundaryPolicy, step_motion};
use super::state::{PopulationCounts, World};
use super::tally::{Verdict, aggregate};

/// Rule switches applied every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub collision: CollisionPolicy,
    pub boundary: BoundaryPolicy,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based tick number since the last init/restart
    pub tick: u64,
    pub collisions: CollisionReport,
    pub counts: PopulationCounts,
    pub verdict: Verdict,
}

/// Advance the world by one step and evaluate it
pub fn step_world(world: &mut World, rules: Rules, tick: u64) -> TickReport {
    step_motion(world, rules.boundary);
    let collisions = resolve_collisions(world, rules.collision);
    let (counts, verdict) = aggregate(world.players(), false);

    log::trace!(
        "tick {}: {} contacts, {} conversions, counts {:?}",
        tick,
        collisions.contacts,
        collisions.conversions,
        counts
    );

    TickReport {
        tick,
        collisions,
        counts,
        verdict,
    }
}
