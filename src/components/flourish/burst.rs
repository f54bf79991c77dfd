//! Little spray of dots wherever the visitor clicks.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Window};

use crate::browser::{EventListener, set_timeout};
use crate::components::starfield::theme::StarPalette;
use crate::error::EffectsError;

pub const BURST_CLASS: &str = "effects-burst";
pub const BURST_DOTS: usize = 6;
/// Matches the `effects-burst` keyframe duration.
const BURST_LIFETIME_MS: u32 = 800;

/// Evenly spaced directions, each thrown 30–50 px.
pub fn burst_offsets<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<(f64, f64)> {
	(0..count)
		.map(|i| {
			let angle = TAU * i as f64 / count as f64;
			let distance = 30.0 + rng.gen_range(0.0..20.0);
			(angle.cos() * distance, angle.sin() * distance)
		})
		.collect()
}

fn spawn_burst(
	window: &Window,
	(x, y): (f64, f64),
	palette: &StarPalette,
	rng: &mut SmallRng,
) -> Result<(), EffectsError> {
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let body = document
		.body()
		.ok_or_else(|| EffectsError::MissingElement("body".into()))?;

	for (dx, dy) in burst_offsets(BURST_DOTS, rng) {
		let dot = document.create_element("div")?;
		dot.set_class_name(BURST_CLASS);
		dot.set_attribute(
			"style",
			&format!(
				"left: {x}px; top: {y}px; background: {}; --dx: {dx:.1}px; --dy: {dy:.1}px;",
				palette.pick(rng).to_css()
			),
		)?;
		body.append_child(&dot)?;
		set_timeout(window, BURST_LIFETIME_MS, move || dot.remove());
	}
	Ok(())
}

pub fn attach(window: &Window, palette: StarPalette) -> Result<EventListener, EffectsError> {
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let win = window.clone();
	let mut rng = SmallRng::from_entropy();
	EventListener::new(&document, "click", move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let at = (ev.client_x() as f64, ev.client_y() as f64);
		if let Err(e) = spawn_burst(&win, at, &palette, &mut rng) {
			debug!("site-effects: burst skipped: {}", e);
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offsets_fan_out_evenly() {
		let mut rng = SmallRng::seed_from_u64(11);
		let offsets = burst_offsets(BURST_DOTS, &mut rng);
		assert_eq!(offsets.len(), BURST_DOTS);
		for (i, (dx, dy)) in offsets.iter().enumerate() {
			let distance = dx.hypot(*dy);
			assert!((30.0..50.0).contains(&distance));
			let expected = TAU * i as f64 / BURST_DOTS as f64;
			let angle = dy.atan2(*dx).rem_euclid(TAU);
			assert!((angle - expected).abs() < 1e-9 || (angle - expected).abs() > TAU - 1e-9);
		}
	}

	#[test]
	fn zero_dots_is_empty() {
		let mut rng = SmallRng::seed_from_u64(0);
		assert!(burst_offsets(0, &mut rng).is_empty());
	}
}
