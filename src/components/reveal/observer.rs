//! Visibility sources for the reveal controller.
//!
//! [`IntersectionWatcher`] receives pushes from the native
//! `IntersectionObserver`. [`PollingWatcher`] samples bounding rects on scroll
//! and resize for browsers without it. Both feed a [`RevealTracker`] and call
//! the same reveal action.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use super::tracker::{RevealTracker, visible_ratio};
use crate::browser::{EventListener, viewport_size};
use crate::error::EffectsError;

/// Attribute carrying a target's index into the tracker.
const INDEX_ATTR: &str = "data-reveal-index";

/// Runs once per target when it is revealed.
pub type RevealAction = Rc<dyn Fn(&Element)>;

/// A source of "this element entered the viewport" notifications.
pub trait VisibilityObserver {
	/// Begin watching `targets`. Each is revealed at most once.
	fn watch(&mut self, targets: Vec<Element>) -> Result<(), EffectsError>;
	/// Stop watching everything.
	fn disconnect(&mut self);
}

/// Visible-area parameters shared by both implementations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealArea {
	/// Fraction of the element that must be visible.
	pub threshold: f64,
	/// Fraction of the viewport bottom that does not count as visible.
	pub bottom_margin: f64,
}

impl RevealArea {
	/// CSS `rootMargin` equivalent of `bottom_margin`.
	pub fn root_margin(&self) -> String {
		format!("0px 0px -{}% 0px", (self.bottom_margin.clamp(0.0, 1.0) * 100.0).round())
	}
}

/// Pick the native observer when the browser has one, else poll.
pub fn select_observer(
	window: &Window,
	area: RevealArea,
	on_reveal: RevealAction,
) -> Box<dyn VisibilityObserver> {
	let native = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))
		.unwrap_or(false);
	if native {
		Box::new(IntersectionWatcher::new(area, on_reveal))
	} else {
		debug!("site-effects: no IntersectionObserver, polling on scroll");
		Box::new(PollingWatcher::new(window.clone(), area, on_reveal))
	}
}

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Push-based watcher over `IntersectionObserver`.
pub struct IntersectionWatcher {
	area: RevealArea,
	on_reveal: RevealAction,
	observer: Option<IntersectionObserver>,
	callback: Option<EntriesCallback>,
}

impl IntersectionWatcher {
	pub fn new(area: RevealArea, on_reveal: RevealAction) -> Self {
		Self {
			area,
			on_reveal,
			observer: None,
			callback: None,
		}
	}
}

impl VisibilityObserver for IntersectionWatcher {
	fn watch(&mut self, targets: Vec<Element>) -> Result<(), EffectsError> {
		self.disconnect();

		let tracker = RefCell::new(RevealTracker::new(targets.len(), self.area.threshold));
		let on_reveal = self.on_reveal.clone();
		let callback: EntriesCallback = Closure::wrap(Box::new(
			move |entries: Array, observer: IntersectionObserver| {
				for entry in entries.iter() {
					let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
						continue;
					};
					let target = entry.target();
					let Some(index) = target_index(&target) else {
						continue;
					};
					let ratio = if entry.is_intersecting() {
						entry.intersection_ratio()
					} else {
						0.0
					};
					if tracker.borrow_mut().report(index, ratio) {
						on_reveal(&target);
						observer.unobserve(&target);
					}
				}
			},
		)
			as Box<dyn FnMut(Array, IntersectionObserver)>);

		let init = IntersectionObserverInit::new();
		init.set_root_margin(&self.area.root_margin());
		init.set_threshold(&JsValue::from_f64(self.area.threshold));
		let observer =
			IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

		for (index, target) in targets.iter().enumerate() {
			target.set_attribute(INDEX_ATTR, &index.to_string())?;
			observer.observe(target);
		}

		self.observer = Some(observer);
		self.callback = Some(callback);
		Ok(())
	}

	fn disconnect(&mut self) {
		if let Some(observer) = self.observer.take() {
			observer.disconnect();
		}
		self.callback = None;
	}
}

fn target_index(target: &Element) -> Option<usize> {
	target.get_attribute(INDEX_ATTR)?.parse().ok()
}

/// Pull-based fallback: re-measure every pending target on scroll/resize.
pub struct PollingWatcher {
	window: Window,
	area: RevealArea,
	on_reveal: RevealAction,
	listeners: Vec<EventListener>,
}

impl PollingWatcher {
	pub fn new(window: Window, area: RevealArea, on_reveal: RevealAction) -> Self {
		Self {
			window,
			area,
			on_reveal,
			listeners: Vec::new(),
		}
	}
}

impl VisibilityObserver for PollingWatcher {
	fn watch(&mut self, targets: Vec<Element>) -> Result<(), EffectsError> {
		self.disconnect();

		let tracker = Rc::new(RefCell::new(RevealTracker::new(targets.len(), self.area.threshold)));
		let (window, area, on_reveal) = (self.window.clone(), self.area, self.on_reveal.clone());
		let sample: Rc<dyn Fn()> = Rc::new(move || {
			let (_, viewport_height) = viewport_size(&window);
			let mut tracker = tracker.borrow_mut();
			if tracker.all_revealed() {
				return;
			}
			for (index, target) in targets.iter().enumerate() {
				if tracker.is_revealed(index) {
					continue;
				}
				let rect = target.get_bounding_client_rect();
				let ratio =
					visible_ratio(rect.top(), rect.bottom(), viewport_height, area.bottom_margin);
				if tracker.report(index, ratio) {
					on_reveal(target);
				}
			}
		});

		sample();
		for event in ["scroll", "resize"] {
			let sample = sample.clone();
			self.listeners
				.push(EventListener::new(&self.window, event, move |_| sample())?);
		}
		Ok(())
	}

	fn disconnect(&mut self) {
		self.listeners.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn root_margin_matches_bottom_margin() {
		let area = RevealArea {
			threshold: 0.1,
			bottom_margin: 0.1,
		};
		assert_eq!(area.root_margin(), "0px 0px -10% 0px");
	}
}
