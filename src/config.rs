//! Page-supplied configuration.
//!
//! The host page may embed a JSON object in
//! `<script id="effects-config" type="application/json">`. Every key is
//! optional; anything absent keeps its default.

use std::collections::HashMap;

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::components::starfield::device::RESIZE_DEBOUNCE_MS;
use crate::components::starfield::driver::ThrottlePolicy;
use crate::components::starfield::theme::StarPalette;

/// Element id of the embedded JSON config.
pub const CONFIG_ELEMENT_ID: &str = "effects-config";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
	pub starfield: StarfieldSettings,
	pub reveal: RevealSettings,
	pub contact: ContactSettings,
	pub flourishes: FlourishSettings,
}

impl EffectsConfig {
	/// Parse a JSON document, e.g. the body of the config script tag.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}

/// Background starfield settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldSettings {
	pub enabled: bool,
	/// CSS hex colors stars are drawn from.
	pub palette: Vec<String>,
	/// Quiet period before a resize re-profiles the device.
	pub resize_debounce_ms: u32,
	pub throttle: ThrottleSettings,
}

impl Default for StarfieldSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			palette: StarPalette::meadow().colors.iter().map(|c| c.to_css()).collect(),
			resize_debounce_ms: RESIZE_DEBOUNCE_MS,
			throttle: ThrottleSettings::default(),
		}
	}
}

impl StarfieldSettings {
	pub fn palette(&self) -> StarPalette {
		StarPalette::from_hex_list(&self.palette)
	}

	/// The debounce never drops below the 250 ms floor.
	pub fn debounce_ms(&self) -> u32 {
		self.resize_debounce_ms.max(RESIZE_DEBOUNCE_MS)
	}
}

/// Frame-rate throttle settings, see [`ThrottlePolicy`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThrottleSettings {
	pub enabled: bool,
	pub sample_every: u32,
	pub min_fps: f64,
	pub floor: usize,
	pub step: usize,
}

impl Default for ThrottleSettings {
	fn default() -> Self {
		let p = ThrottlePolicy::default();
		Self {
			enabled: p.enabled,
			sample_every: p.sample_every,
			min_fps: p.min_fps,
			floor: p.floor,
			step: p.step,
		}
	}
}

impl From<&ThrottleSettings> for ThrottlePolicy {
	fn from(s: &ThrottleSettings) -> Self {
		ThrottlePolicy {
			enabled: s.enabled,
			sample_every: s.sample_every,
			min_fps: s.min_fps,
			floor: s.floor,
			step: s.step.max(1),
		}
	}
}

/// Scroll reveal settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealSettings {
	/// Elements revealed once on entering the viewport.
	pub selector: String,
	/// Visible fraction that counts as "entered".
	pub threshold: f64,
	/// Fraction of the viewport bottom excluded from the visible area.
	pub bottom_margin: f64,
	/// Class added on reveal.
	pub revealed_class: String,
	/// Elements given a staggered entrance on load.
	pub entrance_selector: String,
}

impl Default for RevealSettings {
	fn default() -> Self {
		Self {
			selector: ".magical-card".into(),
			threshold: 0.1,
			bottom_margin: 0.1,
			revealed_class: "revealed".into(),
			entrance_selector: ".magical-header".into(),
		}
	}
}

/// Contact form settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactSettings {
	pub form_id: String,
	/// Address the mail client is pointed at.
	pub recipient: String,
	pub subject: String,
	/// Simulated send latency. Clamped to 1500..=2000 ms.
	pub submit_delay_ms: u32,
	/// How long the "sent" state lingers before the form resets.
	pub reset_delay_ms: u32,
	/// Minimum lengths keyed by field name.
	pub min_lengths: HashMap<String, usize>,
	pub success_message: String,
}

impl Default for ContactSettings {
	fn default() -> Self {
		Self {
			form_id: "contactForm".into(),
			recipient: "hello@example.com".into(),
			subject: "Website enquiry".into(),
			submit_delay_ms: 1500,
			reset_delay_ms: 2000,
			min_lengths: [("name".to_string(), 2), ("message".to_string(), 10)]
				.into_iter()
				.collect(),
			success_message: "Your message is ready to send!".into(),
		}
	}
}

/// Optional visual extras.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlourishSettings {
	pub tilt: bool,
	pub click_bursts: bool,
	/// Decorations that drift against the scroll direction.
	pub parallax_selector: String,
	pub konami: bool,
	pub seasonal: bool,
	/// Emoji dropped per shower.
	pub shower_size: usize,
}

impl Default for FlourishSettings {
	fn default() -> Self {
		Self {
			tilt: true,
			click_bursts: true,
			parallax_selector: ".floating-leaf, .magical-sparkle".into(),
			konami: true,
			seasonal: true,
			shower_size: 24,
		}
	}
}

/// Load the page config, falling back to defaults when absent or malformed.
pub fn load_config(window: &Window) -> EffectsConfig {
	let text = window
		.document()
		.and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|script| script.text().ok());

	let Some(text) = text else {
		info!("site-effects: no #{CONFIG_ELEMENT_ID}, using defaults");
		return EffectsConfig::default();
	};

	match EffectsConfig::from_json(&text) {
		Ok(config) => config,
		Err(e) => {
			warn!("site-effects: failed to parse config: {}", e);
			EffectsConfig::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_all_defaults() {
		assert_eq!(EffectsConfig::from_json("{}").unwrap(), EffectsConfig::default());
	}

	#[test]
	fn debounce_has_a_floor() {
		let s = StarfieldSettings {
			resize_debounce_ms: 10,
			..Default::default()
		};
		assert_eq!(s.debounce_ms(), RESIZE_DEBOUNCE_MS);
	}

	#[test]
	fn zero_step_is_bumped() {
		let s = ThrottleSettings {
			step: 0,
			..Default::default()
		};
		assert_eq!(ThrottlePolicy::from(&s).step, 1);
	}
}
