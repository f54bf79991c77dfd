//! Canvas 2-D drawing for the starfield.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::controller::Surface;
use super::particles::Particle;
use crate::error::EffectsError;

/// A canvas element with its 2-D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquire the 2-D context. Fails if the browser has none to give.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EffectsError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(EffectsError::Unsupported("canvas 2d context"))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| EffectsError::Unsupported("canvas 2d context"))?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}

	fn clear(&mut self) {
		let (w, h) = self.size();
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}

	fn draw_star(&mut self, star: &Particle) {
		self.ctx.set_global_alpha(star.alpha);
		self.ctx.set_fill_style_str(&star.color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(star.x, star.y, star.size, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn finish(&mut self) {
		self.ctx.set_global_alpha(1.0);
	}
}
