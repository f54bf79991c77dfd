//! Floating decorations that drift against the scroll.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};

use crate::browser::{EventListener, query_all};
use crate::error::EffectsError;

const SPEED_STEP: f64 = 0.2;

/// Vertical offset for the `index`-th decoration; later ones move faster.
pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
	-scroll_y * (index as f64 + 1.0) * SPEED_STEP
}

pub fn attach(window: &Window, selector: &str) -> Result<Option<EventListener>, EffectsError> {
	let decorations: Vec<HtmlElement> = query_all(window, selector)
		.into_iter()
		.filter_map(|el| el.dyn_into::<HtmlElement>().ok())
		.collect();
	if decorations.is_empty() {
		return Ok(None);
	}

	let win = window.clone();
	let listener = EventListener::new(window, "scroll", move |_| {
		let scroll_y = win.scroll_y().unwrap_or(0.0);
		for (index, el) in decorations.iter().enumerate() {
			let _ = el.style().set_property(
				"transform",
				&format!("translateY({:.1}px)", parallax_offset(scroll_y, index)),
			);
		}
	})?;
	Ok(Some(listener))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deeper_layers_move_faster() {
		assert_eq!(parallax_offset(0.0, 3), 0.0);
		assert!((parallax_offset(100.0, 0) + 20.0).abs() < 1e-9);
		assert!((parallax_offset(100.0, 2) + 60.0).abs() < 1e-9);
	}
}
