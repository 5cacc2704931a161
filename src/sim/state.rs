//! World and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// The three player types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Rock,
    Paper,
    Scissors,
}

impl PlayerKind {
    /// Spawn order for round-robin seeding
    pub const ALL: [PlayerKind; 3] = [PlayerKind::Rock, PlayerKind::Paper, PlayerKind::Scissors];

    /// Kind assigned to the player at `index` (index mod 3)
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 3) as usize]
    }

    /// The kind that beats this one
    pub fn beaten_by(self) -> Self {
        match self {
            PlayerKind::Rock => PlayerKind::Paper,
            PlayerKind::Paper => PlayerKind::Scissors,
            PlayerKind::Scissors => PlayerKind::Rock,
        }
    }

    /// True if `other` beats `self`
    #[inline]
    pub fn is_beaten_by(self, other: PlayerKind) -> bool {
        self.beaten_by() == other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Rock => "rock",
            PlayerKind::Paper => "paper",
            PlayerKind::Scissors => "scissors",
        }
    }

    /// Sprite asset for this kind
    pub fn sprite_path(&self) -> &'static str {
        match self {
            PlayerKind::Rock => "assets/rock.svg",
            PlayerKind::Paper => "assets/paper.svg",
            PlayerKind::Scissors => "assets/scissors.svg",
        }
    }
}

/// A single sprite on the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Stable position in the population, assigned once at spawn
    pub index: u32,
    pub kind: PlayerKind,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

/// Canvas bounds plus the player collection.
///
/// Only built through `World::new` or `World::from_layout`, so bounds are
/// always validated and indices always match positions.
#[derive(Debug, Clone, Serialize)]
pub struct World {
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Bounding box shared by every player
    pub(crate) entity_size: Vec2,
    /// Ordered by index; only the spawn functions push here
    pub(crate) players: Vec<Player>,
}

fn check_bounds(width: f32, height: f32, entity_size: Vec2) -> Result<(), SimError> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(SimError::InvalidConfiguration(
            "world bounds must be positive",
        ));
    }
    if !entity_size.is_finite() || entity_size.x <= 0.0 || entity_size.y <= 0.0 {
        return Err(SimError::InvalidConfiguration(
            "entity size must be positive",
        ));
    }
    if width <= entity_size.x || height <= entity_size.y {
        return Err(SimError::InvalidConfiguration(
            "world bounds must be larger than the entity size",
        ));
    }
    Ok(())
}

impl World {
    /// Empty world with validated bounds
    pub fn new(width: f32, height: f32, entity_size: Vec2) -> Result<Self, SimError> {
        check_bounds(width, height, entity_size)?;
        Ok(Self {
            width,
            height,
            entity_size,
            players: Vec::new(),
        })
    }

    /// Build a world from explicit `(kind, pos, vel)` entries; indices follow
    /// iteration order
    pub fn from_layout(
        width: f32,
        height: f32,
        entity_size: Vec2,
        layout: impl IntoIterator<Item = (PlayerKind, Vec2, Vec2)>,
    ) -> Result<Self, SimError> {
        let mut world = Self::new(width, height, entity_size)?;
        world.players = layout
            .into_iter()
            .enumerate()
            .map(|(index, (kind, pos, vel))| Player {
                index: index as u32,
                kind,
                pos,
                vel,
            })
            .collect();
        Ok(world)
    }

    /// Re-check bounds and index order on a world handed in from outside
    pub fn validate(&self) -> Result<(), SimError> {
        check_bounds(self.width, self.height, self.entity_size)?;
        let ordered = self
            .players
            .iter()
            .enumerate()
            .all(|(i, p)| p.index as usize == i);
        if !ordered {
            return Err(SimError::InvalidConfiguration(
                "player indices must be unique and in order",
            ));
        }
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn entity_size(&self) -> Vec2 {
        self.entity_size
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn population(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Per-kind population snapshot, recomputed every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub rock: u32,
    pub paper: u32,
    pub scissors: u32,
}

impl PopulationCounts {
    /// Count every player by kind
    pub fn tally(players: &[Player]) -> Self {
        let mut counts = Self::default();
        for player in players {
            counts.add(player.kind);
        }
        counts
    }

    pub fn add(&mut self, kind: PlayerKind) {
        match kind {
            PlayerKind::Rock => self.rock += 1,
            PlayerKind::Paper => self.paper += 1,
            PlayerKind::Scissors => self.scissors += 1,
        }
    }

    pub fn get(&self, kind: PlayerKind) -> u32 {
        match kind {
            PlayerKind::Rock => self.rock,
            PlayerKind::Paper => self.paper,
            PlayerKind::Scissors => self.scissors,
        }
    }

    pub fn total(&self) -> u32 {
        self.rock + self.paper + self.scissors
    }
}

/// Driver-visible state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking every frame
    Running,
    /// Frozen until the next pause toggle
    Paused,
    /// One kind owns the population; only a restart leaves this phase
    Won,
}
