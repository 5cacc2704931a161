//! Canvas 2D renderer for the browser build

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Renderer, SpriteSheet};
use crate::error::SimError;
use crate::sim::{PlayerKind, World};

/// Placeholder colour while a sprite is still loading
fn fallback_color(kind: PlayerKind) -> &'static str {
    match kind {
        PlayerKind::Rock => "#8d8d8d",
        PlayerKind::Paper => "#f2f2f2",
        PlayerKind::Scissors => "#e04848",
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet<HtmlImageElement>,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading the sprite images
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, SimError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SimError::Platform(format!("get_context failed: {:?}", e)))?
            .ok_or_else(|| SimError::Platform("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SimError::Platform("2d context has unexpected type".into()))?;

        let sprites = SpriteSheet::try_load(|kind| {
            let image = HtmlImageElement::new()
                .map_err(|e| SimError::Platform(format!("image creation failed: {:?}", e)))?;
            image.set_src(kind.sprite_path());
            Ok::<_, SimError>(image)
        })?;

        Ok(Self { ctx, sprites })
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, world: &World) {
        let size = world.entity_size();
        self.ctx
            .clear_rect(0.0, 0.0, world.width() as f64, world.height() as f64);

        for player in world.players() {
            let (x, y) = (player.pos.x as f64, player.pos.y as f64);
            let (w, h) = (size.x as f64, size.y as f64);
            let image = self.sprites.get(player.kind);

            if image.complete() && image.natural_width() > 0 {
                if let Err(e) = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
                {
                    log::warn!("drawImage failed: {:?}", e);
                }
            } else {
                self.ctx.set_fill_style_str(fallback_color(player.kind));
                self.ctx.fill_rect(x, y, w, h);
            }
        }
    }
}
