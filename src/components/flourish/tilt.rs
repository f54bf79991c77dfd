//! Pointer-following 3-D tilt on cards.

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, Window};

use crate::browser::{EventListener, query_all};
use crate::error::EffectsError;

/// Pixels of pointer offset per degree of rotation.
const TILT_DIVISOR: f64 = 20.0;

pub const NEUTRAL_TRANSFORM: &str =
	"perspective(1000px) rotateX(0deg) rotateY(0deg) translateY(0px)";

/// Client-space rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

/// Card rotation, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
	pub rotate_x: f64,
	pub rotate_y: f64,
}

impl Tilt {
	pub fn to_css(&self) -> String {
		format!(
			"perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg) translateY(-5px)",
			self.rotate_x, self.rotate_y
		)
	}
}

/// Tilt towards the pointer while it is over the card; `None` outside.
pub fn tilt_for((px, py): (f64, f64), rect: Rect) -> Option<Tilt> {
	let (x, y) = (px - rect.left, py - rect.top);
	if !(0.0..=rect.width).contains(&x) || !(0.0..=rect.height).contains(&y) {
		return None;
	}
	let (cx, cy) = (rect.width / 2.0, rect.height / 2.0);
	Some(Tilt {
		rotate_x: (y - cy) / TILT_DIVISOR,
		rotate_y: (cx - x) / TILT_DIVISOR,
	})
}

/// Tilt every card matching `selector` as the mouse moves.
pub fn attach(window: &Window, selector: &str) -> Result<EventListener, EffectsError> {
	let cards: Vec<HtmlElement> = query_all(window, selector)
		.into_iter()
		.filter_map(|el| el.dyn_into::<HtmlElement>().ok())
		.collect();
	if cards.is_empty() {
		return Err(EffectsError::MissingElement(selector.to_string()));
	}
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;

	EventListener::new(&document, "mousemove", move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let pointer = (ev.client_x() as f64, ev.client_y() as f64);
		for card in &cards {
			let r = card.get_bounding_client_rect();
			let rect = Rect {
				left: r.left(),
				top: r.top(),
				width: r.width(),
				height: r.height(),
			};
			let transform = tilt_for(pointer, rect).map(|t| t.to_css());
			let _ = card
				.style()
				.set_property("transform", transform.as_deref().unwrap_or(NEUTRAL_TRANSFORM));
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const CARD: Rect = Rect {
		left: 100.0,
		top: 50.0,
		width: 200.0,
		height: 100.0,
	};

	#[test]
	fn centre_is_flat() {
		let t = tilt_for((200.0, 100.0), CARD).unwrap();
		assert_eq!(t, Tilt { rotate_x: 0.0, rotate_y: 0.0 });
	}

	#[test]
	fn corners_tilt_towards_pointer() {
		let t = tilt_for((100.0, 50.0), CARD).unwrap();
		assert_eq!(t.rotate_x, -2.5);
		assert_eq!(t.rotate_y, 5.0);
	}

	#[test]
	fn outside_is_none() {
		assert_eq!(tilt_for((99.0, 60.0), CARD), None);
		assert_eq!(tilt_for((150.0, 151.0), CARD), None);
	}

	#[test]
	fn css_is_rounded() {
		let t = Tilt {
			rotate_x: 1.0 / 3.0,
			rotate_y: -2.0,
		};
		assert_eq!(
			t.to_css(),
			"perspective(1000px) rotateX(0.33deg) rotateY(-2.00deg) translateY(-5px)"
		);
	}
}
