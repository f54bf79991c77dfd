//! ↑ ↑ ↓ ↓ ← → ← → B A

use std::collections::VecDeque;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, Window};

use crate::browser::EventListener;
use crate::error::EffectsError;

pub const KONAMI_SEQUENCE: [&str; 10] = [
	"ArrowUp",
	"ArrowUp",
	"ArrowDown",
	"ArrowDown",
	"ArrowLeft",
	"ArrowRight",
	"ArrowLeft",
	"ArrowRight",
	"b",
	"a",
];

/// Watches a key stream for the Konami code.
#[derive(Clone, Debug, Default)]
pub struct KonamiDetector {
	recent: VecDeque<String>,
}

impl KonamiDetector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Feed one `KeyboardEvent.key`. Returns `true` when it completes the code.
	pub fn push(&mut self, key: &str) -> bool {
		let key = if key.chars().count() == 1 {
			key.to_lowercase()
		} else {
			key.to_string()
		};
		self.recent.push_back(key);
		if self.recent.len() > KONAMI_SEQUENCE.len() {
			self.recent.pop_front();
		}
		let done = self.recent.len() == KONAMI_SEQUENCE.len()
			&& self.recent.iter().zip(KONAMI_SEQUENCE).all(|(got, want)| got.as_str() == want);
		if done {
			self.recent.clear();
		}
		done
	}
}

pub fn attach(
	window: &Window,
	on_code: impl Fn() + 'static,
) -> Result<EventListener, EffectsError> {
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let mut detector = KonamiDetector::new();
	EventListener::new(&document, "keydown", move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
			return;
		};
		if detector.push(&ev.key()) {
			info!("site-effects: konami!");
			on_code();
		}
	})
}
