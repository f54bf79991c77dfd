//! Error type shared by the effect subsystems.
//!
//! None of these reach the visitor. The composition root logs them and the
//! affected effect simply does not appear.

use std::fmt;

use wasm_bindgen::JsValue;

/// Why an effect could not be set up.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectsError {
	/// An expected DOM element (canvas, form, button...) is absent.
	MissingElement(String),
	/// The browser lacks a capability the effect needs.
	Unsupported(&'static str),
	/// A browser call threw.
	Js(String),
}

impl fmt::Display for EffectsError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingElement(what) => write!(f, "missing element: {what}"),
			Self::Unsupported(what) => write!(f, "unsupported: {what}"),
			Self::Js(msg) => write!(f, "browser error: {msg}"),
		}
	}
}

impl std::error::Error for EffectsError {}

impl From<JsValue> for EffectsError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_culprit() {
		assert_eq!(
			EffectsError::MissingElement("#contactForm".into()).to_string(),
			"missing element: #contactForm"
		);
		assert_eq!(
			EffectsError::Unsupported("IntersectionObserver").to_string(),
			"unsupported: IntersectionObserver"
		);
	}
}
