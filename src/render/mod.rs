//! Rendering boundary
//!
//! The simulation calls a `Renderer` once per completed tick. It never owns
//! the drawing surface and never stores sprites on players: the sprite for a
//! player is looked up from its kind at draw time.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recorder;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use recorder::FrameRecorder;

use crate::sim::{PlayerKind, World};

/// Draws a full frame (clear + redraw) from the post-tick world
pub trait Renderer {
    fn render(&mut self, world: &World);
}

/// One asset per player kind
#[derive(Debug, Clone)]
pub struct SpriteSheet<T> {
    rock: T,
    paper: T,
    scissors: T,
}

impl<T> SpriteSheet<T> {
    /// Build every sprite with `load`
    pub fn load(mut load: impl FnMut(PlayerKind) -> T) -> Self {
        Self {
            rock: load(PlayerKind::Rock),
            paper: load(PlayerKind::Paper),
            scissors: load(PlayerKind::Scissors),
        }
    }

    pub fn try_load<E>(mut load: impl FnMut(PlayerKind) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            rock: load(PlayerKind::Rock)?,
            paper: load(PlayerKind::Paper)?,
            scissors: load(PlayerKind::Scissors)?,
        })
    }

    pub fn get(&self, kind: PlayerKind) -> &T {
        match kind {
            PlayerKind::Rock => &self.rock,
            PlayerKind::Paper => &self.paper,
            PlayerKind::Scissors => &self.scissors,
        }
    }
}
