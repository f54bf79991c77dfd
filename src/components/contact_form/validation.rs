//! Field-local validation rules.

use std::collections::HashMap;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// What kind of control a field came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
	Text,
	Email,
	TextArea,
	Select,
}

impl FieldKind {
	/// Map an `<input type=...>` value.
	pub fn from_input_type(input_type: &str) -> Self {
		if input_type.eq_ignore_ascii_case("email") {
			FieldKind::Email
		} else {
			FieldKind::Text
		}
	}
}

/// A snapshot of one form control.
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
	pub name: String,
	/// Human label used in the mail body. Falls back to `name`.
	pub label: Option<String>,
	pub kind: FieldKind,
	pub value: String,
	pub required: bool,
}

impl FormField {
	pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			kind,
			value: value.into(),
			required: false,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}
}

/// Outcome of validating one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldValidation {
	pub valid: bool,
	/// Empty when valid.
	pub message: String,
}

impl FieldValidation {
	fn ok() -> Self {
		Self {
			valid: true,
			message: String::new(),
		}
	}

	fn invalid(message: impl Into<String>) -> Self {
		Self {
			valid: false,
			message: message.into(),
		}
	}
}

/// Per-name minimum lengths, counted in characters after trimming.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationRules {
	pub min_lengths: HashMap<String, usize>,
}

/// `^[^\s@]+@[^\s@]+\.[^\s@]+$`
pub fn is_email(value: &str) -> bool {
	if value.chars().any(char::is_whitespace) {
		return false;
	}
	let Some((local, domain)) = value.split_once('@') else {
		return false;
	};
	if local.is_empty() || domain.contains('@') {
		return false;
	}
	// Some dot with at least one character on each side.
	domain
		.char_indices()
		.any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_field(field: &FormField, rules: &ValidationRules) -> FieldValidation {
	let value = field.value.trim();

	if value.is_empty() {
		return if field.required {
			FieldValidation::invalid(REQUIRED_MESSAGE)
		} else {
			FieldValidation::ok()
		};
	}

	if field.kind == FieldKind::Email && !is_email(value) {
		return FieldValidation::invalid(EMAIL_MESSAGE);
	}

	if let Some(&min) = rules.min_lengths.get(&field.name)
		&& value.chars().count() < min
	{
		return FieldValidation::invalid(format!("Please enter at least {min} characters."));
	}

	FieldValidation::ok()
}

/// Validate every field, returning `(name, message)` for each failure.
pub fn validate_all(fields: &[FormField], rules: &ValidationRules) -> Vec<(String, String)> {
	fields
		.iter()
		.filter_map(|f| {
			let v = validate_field(f, rules);
			(!v.valid).then(|| (f.name.clone(), v.message))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rules() -> ValidationRules {
		ValidationRules {
			min_lengths: [("name".to_string(), 2), ("message".to_string(), 10)]
				.into_iter()
				.collect(),
		}
	}

	#[test]
	fn email_shape() {
		assert!(is_email("a@b.com"));
		assert!(is_email("first.last@sub.example.org"));
		assert!(is_email("a@b..c"));
		assert!(!is_email("not-an-email"));
		assert!(!is_email("a@b"));
		assert!(!is_email("a@b."));
		assert!(!is_email("a@.b"));
		assert!(!is_email("@b.com"));
		assert!(!is_email("a@@b.com"));
		assert!(!is_email("a b@c.com"));
	}

	#[test]
	fn empty_required_field_is_invalid_with_message() {
		let f = FormField::new("name", FieldKind::Text, "   ").required();
		let v = validate_field(&f, &rules());
		assert!(!v.valid);
		assert_eq!(v.message, REQUIRED_MESSAGE);
	}

	#[test]
	fn empty_optional_field_is_fine() {
		let f = FormField::new("company", FieldKind::Text, "");
		assert!(validate_field(&f, &rules()).valid);
	}

	#[test]
	fn email_fields_are_checked() {
		let good = FormField::new("email", FieldKind::Email, "a@b.com").required();
		let bad = FormField::new("email", FieldKind::Email, "not-an-email").required();
		assert!(validate_field(&good, &rules()).valid);
		let v = validate_field(&bad, &rules());
		assert!(!v.valid);
		assert_eq!(v.message, EMAIL_MESSAGE);
	}

	#[test]
	fn min_length_counts_characters() {
		let short = FormField::new("message", FieldKind::TextArea, "too short");
		let v = validate_field(&short, &rules());
		assert_eq!(v.message, "Please enter at least 10 characters.");

		// Ten characters, more than ten bytes.
		let accented = FormField::new("message", FieldKind::TextArea, "éééééééééé");
		assert!(validate_field(&accented, &rules()).valid);
	}

	#[test]
	fn input_type_mapping() {
		assert_eq!(FieldKind::from_input_type("EMAIL"), FieldKind::Email);
		assert_eq!(FieldKind::from_input_type("tel"), FieldKind::Text);
	}
}
