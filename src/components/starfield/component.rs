//! Leptos component hosting the starfield canvas.
//!
//! The component creates a fixed, click-through canvas behind the page and
//! wires the controller to the browser: `requestAnimationFrame` drives frames,
//! a debounced resize re-profiles the device, and page visibility plus the
//! reduced-motion and high-contrast media queries gate or restyle the loop.
//! `pagehide` tears the loop down and `pageshow` brings it back.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::controller::{Starfield, Surface};
use super::device::HardwareSignals;
use super::driver::{FrameHandle, FrameScheduler, ThrottlePolicy};
use super::render::CanvasSurface;
use crate::browser::{
	Debouncer, EventListener, HIGH_CONTRAST_QUERY, REDUCED_MOTION_QUERY, media_query,
	viewport_size,
};
use crate::config::StarfieldSettings;
use crate::error::EffectsError;

/// Fixed, full-viewport and click-through, behind the page content.
const CANVAS_STYLE: &str = "position: fixed; inset: 0; width: 100vw; height: 100vh; \
	display: block; pointer-events: none; z-index: -1;";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type BrowserStarfield = Starfield<RafScheduler, CanvasSurface, SmallRng>;
type SharedStarfield = Rc<RefCell<Option<BrowserStarfield>>>;

/// [`FrameScheduler`] over `requestAnimationFrame`.
pub struct RafScheduler {
	window: Window,
	callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
	fn request(&mut self) -> Option<FrameHandle> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
	}

	fn cancel(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

/// Browser resources that must outlive the mount call.
#[derive(Default)]
struct Bindings {
	listeners: Vec<EventListener>,
	_resize: Option<Rc<Debouncer>>,
}

fn with_starfield(slot: &SharedStarfield, f: impl FnOnce(&mut BrowserStarfield)) {
	if let Some(ref mut sf) = *slot.borrow_mut() {
		f(sf);
	}
}

/// Renders the animated starfield behind the page content.
#[component]
pub fn StarfieldCanvas(settings: StarfieldSettings) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let starfield: SharedStarfield = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let bindings: Rc<RefCell<Bindings>> = Rc::new(RefCell::new(Bindings::default()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if !settings.enabled || starfield.borrow().is_some() {
			return;
		}
		if let Err(e) = mount(canvas.into(), &settings, &starfield, &animate, &bindings) {
			warn!("site-effects: starfield disabled: {}", e);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="effects-starfield"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}

fn mount(
	canvas: HtmlCanvasElement,
	settings: &StarfieldSettings,
	slot: &SharedStarfield,
	animate: &FrameCallback,
	bindings: &Rc<RefCell<Bindings>>,
) -> Result<(), EffectsError> {
	let window = web_sys::window().ok_or(EffectsError::Unsupported("window"))?;
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let (w, h) = viewport_size(&window);

	let surface = match CanvasSurface::new(canvas) {
		Ok(mut surface) => {
			surface.resize(w, h);
			Some(surface)
		}
		Err(e) => {
			warn!("site-effects: {}", e);
			None
		}
	};

	let base_palette = settings.palette();
	let contrast = media_query(&window, HIGH_CONTRAST_QUERY);
	let palette = if contrast.as_ref().is_some_and(|m| m.matches()) {
		base_palette.high_contrast()
	} else {
		base_palette.clone()
	};
	let reduced_motion = media_query(&window, REDUCED_MOTION_QUERY);

	let mut sf = Starfield::new(
		RafScheduler {
			window: window.clone(),
			callback: animate.clone(),
		},
		surface,
		w,
		HardwareSignals::probe(&window),
		palette,
		ThrottlePolicy::from(&settings.throttle),
		SmallRng::from_entropy(),
	);
	sf.set_reduced_motion(reduced_motion.as_ref().is_some_and(|m| m.matches()));
	sf.set_page_hidden(document.hidden());
	*slot.borrow_mut() = Some(sf);

	let frame_slot = slot.clone();
	*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
		with_starfield(&frame_slot, |sf| sf.frame(now));
	}));

	let mut b = bindings.borrow_mut();

	if let Some(mql) = reduced_motion {
		let (sf_slot, query) = (slot.clone(), mql.clone());
		b.listeners.push(EventListener::new(&mql, "change", move |_| {
			with_starfield(&sf_slot, |sf| sf.set_reduced_motion(query.matches()));
		})?);
	}

	if let Some(mql) = contrast {
		let (sf_slot, query) = (slot.clone(), mql.clone());
		b.listeners.push(EventListener::new(&mql, "change", move |_| {
			let palette = if query.matches() {
				base_palette.high_contrast()
			} else {
				base_palette.clone()
			};
			with_starfield(&sf_slot, |sf| sf.set_palette(palette));
		})?);
	}

	let (sf_slot, doc) = (slot.clone(), document.clone());
	b.listeners.push(EventListener::new(&document, "visibilitychange", move |_| {
		with_starfield(&sf_slot, |sf| sf.set_page_hidden(doc.hidden()));
	})?);

	let (sf_slot, win) = (slot.clone(), window.clone());
	let debouncer = Rc::new(Debouncer::new(window.clone(), settings.debounce_ms(), move || {
		let (nw, nh) = viewport_size(&win);
		with_starfield(&sf_slot, |sf| sf.on_resize(nw, (nw, nh)));
	}));
	for event in ["resize", "orientationchange"] {
		let debouncer = debouncer.clone();
		b.listeners
			.push(EventListener::new(&window, event, move |_| debouncer.trigger())?);
	}
	b._resize = Some(debouncer);

	let sf_slot = slot.clone();
	b.listeners.push(EventListener::new(&window, "pagehide", move |_| {
		with_starfield(&sf_slot, |sf| sf.stop());
	})?);
	// Back/forward cache restores a page that was torn down on pagehide.
	let sf_slot = slot.clone();
	b.listeners.push(EventListener::new(&window, "pageshow", move |_| {
		with_starfield(&sf_slot, |sf| sf.start());
	})?);

	with_starfield(slot, |sf| sf.start());
	Ok(())
}
