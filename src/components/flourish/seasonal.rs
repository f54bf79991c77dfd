//! Seasonal emoji showers.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_sys::Window;

use crate::browser::set_timeout;
use crate::error::EffectsError;

pub const DROP_CLASS: &str = "effects-shower-drop";

/// Used when no season applies, e.g. for the Konami shower.
pub const SPARKLES: &[&str] = &["✨", "🌟", "⭐"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
	Winter,
	Valentine,
	Spring,
	Halloween,
}

impl Season {
	/// `month` is 1-based.
	pub fn for_date(month: u32, day: u32) -> Option<Self> {
		match (month, day) {
			(2, 14) => Some(Season::Valentine),
			(12, _) | (1, _) => Some(Season::Winter),
			(4, _) => Some(Season::Spring),
			(10, _) => Some(Season::Halloween),
			_ => None,
		}
	}

	pub fn emoji(self) -> &'static [&'static str] {
		match self {
			Season::Winter => &["❄️", "☃️", "🌨️"],
			Season::Valentine => &["💖", "💕", "💗"],
			Season::Spring => &["🌸", "🌷", "🌼"],
			Season::Halloween => &["🎃", "👻", "🦇"],
		}
	}
}

/// Today's (1-based month, day) from the browser clock.
pub fn today() -> (u32, u32) {
	let now = js_sys::Date::new_0();
	(now.get_month() + 1, now.get_date())
}

/// One falling emoji.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowerDrop {
	pub emoji: &'static str,
	/// Horizontal start, percent of viewport width.
	pub left_pct: f64,
	pub delay_ms: u32,
	pub duration_ms: u32,
}

impl ShowerDrop {
	pub fn lifetime_ms(&self) -> u32 {
		self.delay_ms + self.duration_ms
	}
}

pub fn plan_shower<R: Rng + ?Sized>(
	emoji: &[&'static str],
	count: usize,
	rng: &mut R,
) -> Vec<ShowerDrop> {
	if emoji.is_empty() {
		return Vec::new();
	}
	(0..count)
		.map(|_| ShowerDrop {
			emoji: emoji[rng.gen_range(0..emoji.len())],
			left_pct: rng.gen_range(0.0..100.0),
			delay_ms: rng.gen_range(0..2000),
			duration_ms: rng.gen_range(3000..6000),
		})
		.collect()
}

/// Drop `count` emoji down the page; each removes itself when done.
pub fn shower(window: &Window, emoji: &[&'static str], count: usize) -> Result<(), EffectsError> {
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let body = document
		.body()
		.ok_or_else(|| EffectsError::MissingElement("body".into()))?;

	let mut rng = SmallRng::from_entropy();
	for drop in plan_shower(emoji, count, &mut rng) {
		let el = document.create_element("span")?;
		el.set_class_name(DROP_CLASS);
		el.set_attribute("aria-hidden", "true")?;
		el.set_attribute(
			"style",
			&format!(
				"left: {:.1}%; animation-delay: {}ms; animation-duration: {}ms;",
				drop.left_pct, drop.delay_ms, drop.duration_ms
			),
		)?;
		el.set_text_content(Some(drop.emoji));
		body.append_child(&el)?;
		set_timeout(window, drop.lifetime_ms(), move || el.remove());
	}
	Ok(())
}
