//! Thin helpers over `web-sys` shared by the effect components.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, MediaQueryList, NodeList, Window};

use crate::error::EffectsError;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const HIGH_CONTRAST_QUERY: &str = "(prefers-contrast: more)";

/// `innerWidth` × `innerHeight`, zero when unavailable.
pub fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

pub fn media_query(window: &Window, query: &str) -> Option<MediaQueryList> {
	window.match_media(query).ok().flatten()
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
	media_query(window, REDUCED_MOTION_QUERY).is_some_and(|m| m.matches())
}

pub fn elements(list: NodeList) -> Vec<Element> {
	(0..list.length())
		.filter_map(|i| list.get(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

/// Elements matching `selector` anywhere in the document.
pub fn query_all(window: &Window, selector: &str) -> Vec<Element> {
	window
		.document()
		.and_then(|doc| doc.query_selector_all(selector).ok())
		.map(elements)
		.unwrap_or_default()
}

/// Fire-once timer. Returns the timeout id for `clearTimeout`.
pub fn set_timeout(window: &Window, ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
	let callback = Closure::once_into_js(f);
	window
		.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms as i32)
		.ok()
}

/// An event listener removed again when dropped.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		f: impl FnMut(Event) + 'static,
	) -> Result<Self, EffectsError> {
		let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let callback = self.callback.as_ref().unchecked_ref();
		let _ = self.target.remove_event_listener_with_callback(self.event, callback);
	}
}

/// Trailing-edge debounce over `setTimeout`.
pub struct Debouncer {
	window: Window,
	delay_ms: u32,
	pending: Cell<Option<i32>>,
	callback: Closure<dyn FnMut()>,
}

impl Debouncer {
	pub fn new(window: Window, delay_ms: u32, f: impl FnMut() + 'static) -> Self {
		Self {
			window,
			delay_ms,
			pending: Cell::new(None),
			callback: Closure::wrap(Box::new(f) as Box<dyn FnMut()>),
		}
	}

	/// (Re)arm the timer; the callback runs once things stay quiet.
	pub fn trigger(&self) {
		if let Some(id) = self.pending.take() {
			self.window.clear_timeout_with_handle(id);
		}
		let id = self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				self.callback.as_ref().unchecked_ref(),
				self.delay_ms as i32,
			)
			.ok();
		self.pending.set(id);
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		if let Some(id) = self.pending.take() {
			self.window.clear_timeout_with_handle(id);
		}
	}
}
