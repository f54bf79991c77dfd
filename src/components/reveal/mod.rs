//! One-shot scroll reveals and the staggered header entrance.
//!
//! Targets start with the `reveal-pending` class; the page stylesheet owns the
//! actual transition. Revealing swaps it for the configured revealed class.

mod observer;
pub mod tracker;

use std::rc::Rc;

use log::info;
use web_sys::{Element, Window};

pub use observer::{
	IntersectionWatcher, PollingWatcher, RevealAction, RevealArea, VisibilityObserver,
	select_observer,
};
pub use tracker::{RevealState, RevealTracker, entrance_delay_ms, visible_ratio};

use crate::browser::{query_all, set_timeout};
use crate::config::RevealSettings;
use crate::error::EffectsError;

const PENDING_CLASS: &str = "reveal-pending";
const ENTRANCE_PENDING_CLASS: &str = "entrance-pending";
const ENTERED_CLASS: &str = "entered";

fn swap_class(el: &Element, from: &str, to: &str) {
	let classes = el.class_list();
	let _ = classes.remove_1(from);
	let _ = classes.add_1(to);
}

/// Start watching the configured reveal targets. Under reduced motion
/// everything is revealed immediately and no observer is kept.
pub fn attach(
	window: &Window,
	settings: &RevealSettings,
	reduced_motion: bool,
) -> Result<Option<Box<dyn VisibilityObserver>>, EffectsError> {
	let targets = query_all(window, &settings.selector);
	if targets.is_empty() {
		return Err(EffectsError::MissingElement(settings.selector.clone()));
	}

	if reduced_motion {
		for target in &targets {
			let _ = target.class_list().add_1(&settings.revealed_class);
		}
		return Ok(None);
	}

	for target in &targets {
		let _ = target.class_list().add_1(PENDING_CLASS);
	}

	let revealed_class = settings.revealed_class.clone();
	let on_reveal: RevealAction = Rc::new(move |el: &Element| {
		swap_class(el, PENDING_CLASS, &revealed_class);
	});
	let area = RevealArea {
		threshold: settings.threshold,
		bottom_margin: settings.bottom_margin,
	};

	let count = targets.len();
	let mut observer = select_observer(window, area, on_reveal);
	observer.watch(targets)?;
	info!("site-effects: watching {} reveal targets", count);
	Ok(Some(observer))
}

/// Fade headers in one after another on load.
pub fn stagger_entrance(window: &Window, selector: &str, reduced_motion: bool) {
	for (index, el) in query_all(window, selector).into_iter().enumerate() {
		if reduced_motion {
			let _ = el.class_list().add_1(ENTERED_CLASS);
			continue;
		}
		let _ = el.class_list().add_1(ENTRANCE_PENDING_CLASS);
		set_timeout(window, entrance_delay_ms(index), move || {
			swap_class(&el, ENTRANCE_PENDING_CLASS, ENTERED_CLASS);
		});
	}
}
