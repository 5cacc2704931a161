//! Headless renderer that remembers what it was asked to draw

use super::Renderer;
use crate::sim::{PlayerKind, PopulationCounts, World};

/// Counts frames and keeps the kinds of the last one
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames: u64,
    pub last_kinds: Vec<PlayerKind>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts as seen in the last drawn frame
    pub fn last_counts(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for &kind in &self.last_kinds {
            counts.add(kind);
        }
        counts
    }
}

impl Renderer for FrameRecorder {
    fn render(&mut self, world: &World) {
        self.frames += 1;
        self.last_kinds.clear();
        self.last_kinds.extend(world.players().iter().map(|p| p.kind));
    }
}
