//! Canvas 2D renderer

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{OBSTACLE_BANDS, Palette};
use crate::config::Playfield;
use crate::sim::{Aabb, Snapshot};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    playfield: Playfield,
    palette: Palette,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, playfield: Playfield) -> Result<Self, JsValue> {
        canvas.set_width(playfield.width as u32);
        canvas.set_height(playfield.height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            playfield,
            palette: Palette::default(),
        })
    }

    pub fn draw(&self, snapshot: &Snapshot) {
        let ctx = &self.ctx;
        let p = &self.playfield;

        ctx.set_fill_style_str(self.palette.sky);
        ctx.fill_rect(0.0, 0.0, p.width as f64, p.height as f64);

        ctx.set_fill_style_str(self.palette.ground);
        ctx.fill_rect(
            0.0,
            p.ground_y() as f64,
            p.width as f64,
            p.ground_inset as f64,
        );

        for b in &snapshot.obstacle_boxes {
            self.draw_obstacle(b);
        }
        self.draw_character(&snapshot.character_box);
    }

    fn draw_obstacle(&self, b: &Aabb) {
        let size = b.size();
        self.ctx.set_fill_style_str(self.palette.obstacle);
        self.ctx
            .fill_rect(b.left() as f64, b.top() as f64, size.x as f64, size.y as f64);

        self.ctx.set_fill_style_str(self.palette.obstacle_band);
        for band in OBSTACLE_BANDS {
            let y = b.top() + size.y * band;
            self.ctx
                .fill_rect(b.left() as f64, y as f64, size.x as f64, 4.0);
        }
    }

    fn draw_character(&self, b: &Aabb) {
        let size = b.size();
        self.ctx.set_fill_style_str(self.palette.character);
        self.ctx
            .fill_rect(b.left() as f64, b.top() as f64, size.x as f64, size.y as f64);

        // Eye near the leading edge
        let eye = size.x * 0.125;
        self.ctx.set_fill_style_str(self.palette.character_eye);
        self.ctx.fill_rect(
            (b.right() - eye * 2.5) as f64,
            (b.top() + eye) as f64,
            eye as f64,
            eye as f64,
        );
    }
}
