//! Transient corner notification.

use web_sys::Window;

use crate::browser::set_timeout;
use crate::error::EffectsError;

pub const TOAST_CLASS: &str = "effects-toast";
const VISIBLE_CLASS: &str = "visible";

const SHOW_AFTER_MS: u32 = 100;
const HIDE_AFTER_MS: u32 = 3000;
const REMOVE_AFTER_HIDE_MS: u32 = 500;

/// Slide a message in, hold it, slide it out and remove it.
pub fn show_toast(window: &Window, message: &str) -> Result<(), EffectsError> {
	let document = window.document().ok_or(EffectsError::Unsupported("document"))?;
	let body = document
		.body()
		.ok_or_else(|| EffectsError::MissingElement("body".into()))?;

	let toast = document.create_element("div")?;
	toast.set_class_name(TOAST_CLASS);
	toast.set_attribute("role", "status")?;
	toast.set_attribute("aria-live", "polite")?;
	toast.set_text_content(Some(message));
	body.append_child(&toast)?;

	let shown = toast.clone();
	set_timeout(window, SHOW_AFTER_MS, move || {
		let _ = shown.class_list().add_1(VISIBLE_CLASS);
	});

	let win = window.clone();
	set_timeout(window, HIDE_AFTER_MS, move || {
		let _ = toast.class_list().remove_1(VISIBLE_CLASS);
		set_timeout(&win, REMOVE_AFTER_HIDE_MS, move || toast.remove());
	});
	Ok(())
}
