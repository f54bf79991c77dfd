//! Viewport and hardware profiling.
//!
//! Classifies the device into a [`Tier`] from the viewport width, then picks
//! particle density and size from a fixed table. Hardware signals are advisory:
//! any signal the browser refuses to report is treated as "low power".

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Widths below this are phones.
pub const TABLET_MIN_WIDTH: f64 = 768.0;
/// Widths at or above this are desktops.
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

/// Minimum quiet period before a resize re-profiles the device.
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Coarse device class driving particle density.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
	Mobile,
	Tablet,
	Desktop,
}

impl Tier {
	pub fn for_width(width: f64) -> Self {
		if width < TABLET_MIN_WIDTH {
			Tier::Mobile
		} else if width < DESKTOP_MIN_WIDTH {
			Tier::Tablet
		} else {
			Tier::Desktop
		}
	}
}

/// Rendering quality. `Low` stars drift without twinkling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quality {
	Low,
	Medium,
	High,
}

/// Derived starfield configuration for the current device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceConfig {
	pub tier: Tier,
	pub particle_count: usize,
	pub max_size: f64,
	pub quality: Quality,
}

/// Best-effort hardware hints. `None` means the browser did not say.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HardwareSignals {
	/// `navigator.hardwareConcurrency`
	pub cores: Option<u32>,
	/// `navigator.deviceMemory`, in gigabytes (Chromium only, and rounded).
	pub memory_gb: Option<f64>,
	/// Whether a throwaway WebGL context could be created.
	pub accelerated_graphics: Option<bool>,
}

impl HardwareSignals {
	/// All three signals must be present and meet the bar.
	pub fn is_high_performance(&self) -> bool {
		self.accelerated_graphics == Some(true)
			&& self.cores.is_some_and(|c| c >= 4)
			&& self.memory_gb.is_some_and(|m| m >= 4.0)
	}

	/// Read whatever the browser exposes. Never fails.
	pub fn probe(window: &Window) -> Self {
		let navigator = window.navigator();

		let cores = match navigator.hardware_concurrency() {
			n if n >= 1.0 => Some(n as u32),
			_ => None,
		};

		let memory_gb = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
			.ok()
			.and_then(|v| v.as_f64())
			.filter(|m| *m > 0.0);

		let accelerated_graphics = window
			.document()
			.and_then(|doc| doc.create_element("canvas").ok())
			.and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
			.map(|canvas| {
				canvas.get_context("webgl").ok().flatten().is_some()
					|| canvas.get_context("experimental-webgl").ok().flatten().is_some()
			});

		Self {
			cores,
			memory_gb,
			accelerated_graphics,
		}
	}
}

/// Pure classification: viewport width plus hardware hints to a config.
pub fn classify(width: f64, signals: &HardwareSignals) -> DeviceConfig {
	let tier = Tier::for_width(width);
	let high = signals.is_high_performance();

	let (particle_count, max_size, quality) = match (tier, high) {
		(Tier::Mobile, false) => (30, 1.5, Quality::Low),
		(Tier::Mobile, true) => (50, 2.0, Quality::Medium),
		(Tier::Tablet, _) => (if high { 80 } else { 60 }, 2.5, Quality::Medium),
		(Tier::Desktop, false) => (100, 3.0, Quality::Medium),
		(Tier::Desktop, true) => (150, 3.5, Quality::High),
	};

	DeviceConfig {
		tier,
		particle_count,
		max_size,
		quality,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn strong() -> HardwareSignals {
		HardwareSignals {
			cores: Some(8),
			memory_gb: Some(8.0),
			accelerated_graphics: Some(true),
		}
	}

	#[test]
	fn tier_boundaries() {
		assert_eq!(Tier::for_width(0.0), Tier::Mobile);
		assert_eq!(Tier::for_width(767.9), Tier::Mobile);
		assert_eq!(Tier::for_width(768.0), Tier::Tablet);
		assert_eq!(Tier::for_width(1023.0), Tier::Tablet);
		assert_eq!(Tier::for_width(1024.0), Tier::Desktop);
	}

	#[test]
	fn any_missing_signal_is_low_power() {
		let mut s = strong();
		assert!(s.is_high_performance());
		s.memory_gb = None;
		assert!(!s.is_high_performance());

		let mut s = strong();
		s.cores = Some(2);
		assert!(!s.is_high_performance());

		let mut s = strong();
		s.accelerated_graphics = None;
		assert!(!s.is_high_performance());

		assert!(!HardwareSignals::default().is_high_performance());
	}

	#[test]
	fn mobile_stays_small_even_on_strong_hardware() {
		for signals in [HardwareSignals::default(), strong()] {
			let cfg = classify(400.0, &signals);
			assert_eq!(cfg.tier, Tier::Mobile);
			assert!((30..=50).contains(&cfg.particle_count));
			assert!(cfg.max_size <= 2.0);
		}
	}

	#[test]
	fn desktop_is_dense() {
		for signals in [HardwareSignals::default(), strong()] {
			let cfg = classify(1200.0, &signals);
			assert_eq!(cfg.tier, Tier::Desktop);
			assert!((100..=150).contains(&cfg.particle_count));
			assert!(cfg.max_size >= 3.0);
		}
		assert_eq!(classify(1200.0, &strong()).quality, Quality::High);
	}

	#[test]
	fn classification_is_deterministic() {
		assert_eq!(classify(900.0, &strong()), classify(900.0, &strong()));
	}
}
