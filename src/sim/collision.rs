//! Pairwise collision detection and type conversion
//!
//! Every ordered pair of distinct players is tested for bounding-box overlap.
//! On overlap the subject takes the other player's kind if that kind beats
//! its own. This is O(n²) per tick and is the dominant cost of a frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Player, PlayerKind, World};

/// How conversions made earlier in a tick affect later comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Subjects are visited in population order and see every conversion
    /// already made this tick, including their own. Outcomes depend on order.
    #[default]
    Sequential,
    /// Every comparison reads the kinds from the start of the step;
    /// conversions are applied together at the end.
    Snapshot,
}

/// Result of one collision step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Overlapping ordered pairs found
    pub contacts: u32,
    /// Kind changes applied
    pub conversions: u32,
}

/// Axis-aligned overlap test for two boxes of the same size
#[inline]
pub fn overlaps(a: Vec2, b: Vec2, size: Vec2) -> bool {
    a.x < b.x + size.x && a.x + size.x > b.x && a.y < b.y + size.y && a.y + size.y > b.y
}

/// Run the collision step over the whole population
pub fn resolve_collisions(world: &mut World, policy: CollisionPolicy) -> CollisionReport {
    let size = world.entity_size;
    match policy {
        CollisionPolicy::Sequential => resolve_sequential(&mut world.players, size),
        CollisionPolicy::Snapshot => resolve_snapshot(&mut world.players, size),
    }
}

fn resolve_sequential(players: &mut [Player], size: Vec2) -> CollisionReport {
    let mut report = CollisionReport::default();

    for i in 0..players.len() {
        for j in 0..players.len() {
            if i == j {
                continue;
            }
            let other_pos = players[j].pos;
            let other_kind = players[j].kind;
            let subject = &mut players[i];

            if !overlaps(subject.pos, other_pos, size) {
                continue;
            }
            report.contacts += 1;

            if subject.kind.is_beaten_by(other_kind) {
                subject.kind = other_kind;
                report.conversions += 1;
            }
        }
    }

    report
}

fn resolve_snapshot(players: &mut [Player], size: Vec2) -> CollisionReport {
    let mut report = CollisionReport::default();
    let before: Vec<(Vec2, PlayerKind)> = players.iter().map(|p| (p.pos, p.kind)).collect();
    let mut converted: Vec<Option<PlayerKind>> = vec![None; players.len()];

    for (i, &(pos, kind)) in before.iter().enumerate() {
        for (j, &(other_pos, other_kind)) in before.iter().enumerate() {
            if i == j || !overlaps(pos, other_pos, size) {
                continue;
            }
            report.contacts += 1;

            // Only one kind beats `kind`, so every hit agrees on the result
            if kind.is_beaten_by(other_kind) {
                converted[i] = Some(other_kind);
            }
        }
    }

    for (player, new_kind) in players.iter_mut().zip(converted) {
        if let Some(new_kind) = new_kind {
            player.kind = new_kind;
            report.conversions += 1;
        }
    }

    report
}
