//! site-effects: progressive-enhancement effects for a static landing page.
//!
//! The crate mounts an adaptive starfield behind the page and then enhances
//! the existing markup: one-shot scroll reveals, a mock contact form that hands
//! off to the mail client, and a handful of optional flourishes. Everything is
//! configured from an embedded JSON script tag and honours
//! `prefers-reduced-motion`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use web_sys::Window;

// Linked only for its `js` feature, which gives `rand` entropy on wasm32.
use getrandom as _;

pub mod browser;
pub mod components;
pub mod config;
pub mod error;

pub use components::starfield::StarfieldCanvas;
pub use config::{EffectsConfig, load_config};
pub use error::EffectsError;

use browser::{EventListener, prefers_reduced_motion};
use components::contact_form::{self, ContactForm};
use components::flourish::seasonal::{self, SPARKLES, Season};
use components::flourish::{FLOURISH_STYLES, burst, konami, parallax, tilt};
use components::reveal::{self, VisibilityObserver};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("site-effects: logging initialized");
}

/// Everything attached to the host page. Dropping it detaches the lot.
#[derive(Default)]
struct PageEnhancements {
	reveal: Option<Box<dyn VisibilityObserver>>,
	// Held so its listeners stay attached.
	_contact: Option<ContactForm>,
	listeners: Vec<EventListener>,
}

impl Drop for PageEnhancements {
	fn drop(&mut self) {
		if let Some(observer) = self.reveal.as_mut() {
			observer.disconnect();
		}
	}
}

fn keep<T>(what: &str, result: Result<T, EffectsError>) -> Option<T> {
	match result {
		Ok(value) => Some(value),
		Err(e) => {
			debug!("site-effects: {} skipped: {}", what, e);
			None
		}
	}
}

fn enhance_page(window: &Window, config: &EffectsConfig) -> PageEnhancements {
	let reduced_motion = prefers_reduced_motion(window);
	let mut page = PageEnhancements::default();

	page.reveal = keep("reveal", reveal::attach(window, &config.reveal, reduced_motion)).flatten();
	reveal::stagger_entrance(window, &config.reveal.entrance_selector, reduced_motion);

	match contact_form::attach(window, &config.contact) {
		Ok(form) => page._contact = form,
		Err(e) => warn!("site-effects: contact form not enhanced: {}", e),
	}

	if reduced_motion {
		info!("site-effects: reduced motion, skipping flourishes");
		return page;
	}

	let flourishes = &config.flourishes;
	if flourishes.tilt {
		page.listeners
			.extend(keep("tilt", tilt::attach(window, &config.reveal.selector)));
	}
	if flourishes.click_bursts {
		page.listeners
			.extend(keep("bursts", burst::attach(window, config.starfield.palette())));
	}
	page.listeners.extend(
		keep("parallax", parallax::attach(window, &flourishes.parallax_selector)).flatten(),
	);
	if flourishes.konami {
		let (win, size) = (window.clone(), flourishes.shower_size);
		page.listeners.extend(keep(
			"konami",
			konami::attach(window, move || {
				keep("shower", seasonal::shower(&win, SPARKLES, size));
			}),
		));
	}
	if flourishes.seasonal {
		let (month, day) = seasonal::today();
		if let Some(season) = Season::for_date(month, day) {
			info!("site-effects: {:?} shower", season);
			keep(
				"seasonal shower",
				seasonal::shower(window, season.emoji(), flourishes.shower_size),
			);
		}
	}
	page
}

/// Main application component.
/// Reads the page config, injects styles, mounts the starfield and enhances
/// the surrounding markup once mounted.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = web_sys::window().map(|w| load_config(&w)).unwrap_or_default();
	let starfield = config.starfield.clone();
	let enhancements: Rc<RefCell<Option<PageEnhancements>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		if enhancements.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("site-effects: no window, nothing to enhance");
			return;
		};
		*enhancements.borrow_mut() = Some(enhance_page(&window, &config));
	});

	view! {
		<Style id="site-effects">{FLOURISH_STYLES}</Style>
		<StarfieldCanvas settings=starfield />
	}
}
