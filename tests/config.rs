//! Parsing the embedded page config.

#![allow(unused_crate_dependencies)]

use pretty_assertions::assert_eq;
use site_effects::components::starfield::driver::ThrottlePolicy;
use site_effects::components::starfield::theme::{Color, StarPalette};
use site_effects::config::{ContactSettings, EffectsConfig, FlourishSettings, RevealSettings};

#[test]
fn partial_sections_keep_defaults() {
	let config = EffectsConfig::from_json(
		r##"{
			"starfield": { "palette": ["#ffffff", "nonsense"], "throttle": { "min_fps": 24 } },
			"contact": { "recipient": "studio@example.org" },
			"flourishes": { "konami": false }
		}"##,
	)
	.unwrap();

	assert_eq!(config.starfield.palette(), StarPalette {
		colors: vec![Color::rgb(255, 255, 255)],
	});
	assert_eq!(ThrottlePolicy::from(&config.starfield.throttle), ThrottlePolicy {
		min_fps: 24.0,
		..ThrottlePolicy::default()
	});
	assert_eq!(config.contact, ContactSettings {
		recipient: "studio@example.org".into(),
		..ContactSettings::default()
	});
	assert_eq!(config.flourishes, FlourishSettings {
		konami: false,
		..FlourishSettings::default()
	});
	assert_eq!(config.reveal, RevealSettings::default());
}

#[test]
fn default_palette_round_trips_through_hex() {
	let config = EffectsConfig::default();
	assert_eq!(config.starfield.palette(), StarPalette::meadow());
}

#[test]
fn malformed_json_is_an_error() {
	assert!(EffectsConfig::from_json("{ starfield: ").is_err());
	assert!(EffectsConfig::from_json(r#"{ "reveal": { "threshold": "high" } }"#).is_err());
}

#[test]
fn unknown_keys_are_ignored() {
	let json = r#"{ "debug": true, "reveal": { "extra": 1 } }"#;
	let config = EffectsConfig::from_json(json).unwrap();
	assert_eq!(config, EffectsConfig::default());
}
