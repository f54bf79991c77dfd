//! Browser side of the contact form: reading controls, inline errors, the
//! busy button and the async submit.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
	Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
	HtmlTextAreaElement, Window,
};

use super::submit::{SubmitHost, submit_form};
use super::validation::{FieldKind, FormField, ValidationRules, validate_all, validate_field};
use crate::browser::{EventListener, elements};
use crate::components::flourish::show_toast;
use crate::config::ContactSettings;
use crate::error::EffectsError;

const CONTROLS: &str = "input, textarea, select";
const FOCUSED_CLASS: &str = "is-focused";
const LABEL_ATTR: &str = "data-label";
const SENDING_LABEL: &str = "Sending…";
const SENT_LABEL: &str = "Sent!";

/// `setTimeout` and `location.href`.
pub struct BrowserHost {
	window: Window,
}

impl BrowserHost {
	pub fn new(window: Window) -> Self {
		Self { window }
	}
}

impl SubmitHost for BrowserHost {
	type Sleep = Pin<Box<dyn Future<Output = ()>>>;

	fn sleep(&self, ms: u32) -> Self::Sleep {
		let window = self.window.clone();
		let promise = js_sys::Promise::new(&mut |resolve, _reject| {
			if let Err(e) = window
				.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
			{
				warn!("site-effects: setTimeout failed: {:?}", e);
				let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
			}
		});
		Box::pin(async move {
			let _ = JsFuture::from(promise).await;
		})
	}

	fn open_mail_client(&self, uri: &str) {
		if let Err(e) = self.window.location().set_href(uri) {
			warn!("site-effects: could not open mail client: {:?}", e);
		}
	}
}

/// Snapshot a control. Buttons and hidden inputs are skipped.
pub fn read_field(el: &Element) -> Option<FormField> {
	let label = el.get_attribute(LABEL_ATTR);
	let field = if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
		let ty = input.type_();
		if matches!(ty.as_str(), "submit" | "button" | "hidden" | "reset") {
			return None;
		}
		let field = FormField::new(input.name(), FieldKind::from_input_type(&ty), input.value());
		if input.required() { field.required() } else { field }
	} else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
		let field = FormField::new(area.name(), FieldKind::TextArea, area.value());
		if area.required() { field.required() } else { field }
	} else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
		let field = FormField::new(select.name(), FieldKind::Select, select.value());
		if select.required() { field.required() } else { field }
	} else {
		return None;
	};
	if field.name.is_empty() {
		return None;
	}
	Some(match label {
		Some(label) => field.with_label(label),
		None => field,
	})
}

fn controls(form: &HtmlFormElement) -> Vec<Element> {
	form.query_selector_all(CONTROLS)
		.map(elements)
		.unwrap_or_default()
}

fn read_fields(form: &HtmlFormElement) -> Vec<FormField> {
	controls(form).iter().filter_map(read_field).collect()
}

/// Write (or clear, with an empty message) the inline error for `name`.
fn show_error(form: &HtmlFormElement, name: &str, message: &str) {
	let invalid = if message.is_empty() { "false" } else { "true" };
	if let Ok(Some(slot)) = form.query_selector(&format!("[data-error-for=\"{name}\"]")) {
		slot.set_text_content(Some(message));
	}
	if let Ok(Some(control)) = form.query_selector(&format!("[name=\"{name}\"]")) {
		let _ = control.set_attribute("aria-invalid", invalid);
	}
}

fn clear_errors(form: &HtmlFormElement) {
	for field in read_fields(form) {
		show_error(form, &field.name, "");
	}
}

/// The submit button and its resting label.
struct SubmitButton {
	button: HtmlButtonElement,
	idle_label: String,
}

impl SubmitButton {
	fn find(form: &HtmlFormElement) -> Option<Self> {
		let button = form
			.query_selector("button[type=\"submit\"], button:not([type])")
			.ok()
			.flatten()?
			.dyn_into::<HtmlButtonElement>()
			.ok()?;
		let idle_label = button.text_content().unwrap_or_default();
		Some(Self { button, idle_label })
	}

	fn busy(&self, label: &str) {
		self.button.set_text_content(Some(label));
		self.button.set_disabled(true);
	}

	fn restore(&self) {
		self.button.set_text_content(Some(&self.idle_label));
		self.button.set_disabled(false);
	}
}

/// Live listeners for an enhanced form. Dropping it detaches them.
pub struct ContactForm {
	_listeners: Vec<EventListener>,
}

/// Enhance the form with id `settings.form_id`. `Ok(None)` when the page has
/// no such form.
pub fn attach(
	window: &Window,
	settings: &ContactSettings,
) -> Result<Option<ContactForm>, EffectsError> {
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let Some(form) = document
		.get_element_by_id(&settings.form_id)
		.and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
	else {
		debug!("site-effects: no #{} form on this page", settings.form_id);
		return Ok(None);
	};

	let rules = Rc::new(ValidationRules::from(settings));
	let mut listeners = Vec::new();

	for control in controls(&form) {
		if read_field(&control).is_none() {
			continue;
		}
		let focused = control.clone();
		listeners.push(EventListener::new(&control, "focus", move |_| {
			if let Some(parent) = focused.parent_element() {
				let _ = parent.class_list().add_1(FOCUSED_CLASS);
			}
		})?);

		let blurred = control.clone();
		let blur_form = form.clone();
		let blur_rules = rules.clone();
		listeners.push(EventListener::new(&control, "blur", move |_| {
			if let Some(parent) = blurred.parent_element() {
				let _ = parent.class_list().remove_1(FOCUSED_CLASS);
			}
			if let Some(field) = read_field(&blurred) {
				let outcome = validate_field(&field, &blur_rules);
				show_error(&blur_form, &field.name, &outcome.message);
			}
		})?);
	}

	let busy = Rc::new(Cell::new(false));
	let settings = Rc::new(settings.clone());
	let win = window.clone();
	let submit_form_el = form.clone();
	listeners.push(EventListener::new(&form, "submit", move |ev: Event| {
		ev.prevent_default();
		if busy.get() {
			return;
		}
		let form = submit_form_el.clone();
		let fields = read_fields(&form);

		clear_errors(&form);
		let errors = validate_all(&fields, &rules);
		if !errors.is_empty() {
			for (name, message) in &errors {
				show_error(&form, name, message);
			}
			return;
		}

		busy.set(true);
		let button = SubmitButton::find(&form);
		if let Some(b) = &button {
			b.busy(SENDING_LABEL);
		}

		let busy = busy.clone();
		let settings = settings.clone();
		let window = win.clone();
		spawn_local(async move {
			let host = BrowserHost::new(window.clone());
			let outcome = submit_form(&fields, &settings, &host).await;
			if outcome.success {
				if let Some(b) = &button {
					b.busy(SENT_LABEL);
				}
				host.sleep(settings.reset_delay_ms).await;
				form.reset();
				if let Some(b) = &button {
					b.restore();
				}
				if let Err(e) = show_toast(&window, &settings.success_message) {
					warn!("site-effects: toast failed: {}", e);
				}
			} else {
				for (name, message) in &outcome.errors {
					show_error(&form, name, message);
				}
				if let Some(b) = &button {
					b.restore();
				}
			}
			busy.set(false);
		});
	})?);

	Ok(Some(ContactForm { _listeners: listeners }))
}
