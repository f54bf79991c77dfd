//! The mock "send": validate, wait, hand off to the mail client.
//!
//! There is no server round-trip. Success means the `mailto:` URI was handed
//! to the browser, nothing more.

use std::future::Future;

use log::info;

use super::validation::{FormField, ValidationRules, validate_all};
use crate::config::ContactSettings;

pub const MIN_SUBMIT_DELAY_MS: u32 = 1500;
pub const MAX_SUBMIT_DELAY_MS: u32 = 2000;

/// Platform hooks the submit flow needs.
pub trait SubmitHost {
	type Sleep: Future<Output = ()>;

	/// Resolve after `ms` milliseconds.
	fn sleep(&self, ms: u32) -> Self::Sleep;

	/// Navigate to a `mailto:` URI.
	fn open_mail_client(&self, uri: &str);
}

/// Result of one submission attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
	pub success: bool,
	/// `(field name, message)` for every invalid field.
	pub errors: Vec<(String, String)>,
	/// The URI handed to the mail client on success.
	pub mailto: Option<String>,
}

pub fn submit_delay_ms(configured: u32) -> u32 {
	configured.clamp(MIN_SUBMIT_DELAY_MS, MAX_SUBMIT_DELAY_MS)
}

impl From<&ContactSettings> for ValidationRules {
	fn from(settings: &ContactSettings) -> Self {
		ValidationRules {
			min_lengths: settings.min_lengths.clone(),
		}
	}
}

/// Validate, simulate latency, then open the mail client.
///
/// Invalid input resolves immediately without sleeping.
pub async fn submit_form<H: SubmitHost>(
	fields: &[FormField],
	settings: &ContactSettings,
	host: &H,
) -> Submission {
	let errors = validate_all(fields, &ValidationRules::from(settings));
	if !errors.is_empty() {
		return Submission {
			success: false,
			errors,
			mailto: None,
		};
	}

	host.sleep(submit_delay_ms(settings.submit_delay_ms)).await;

	let uri = mailto_uri(&settings.recipient, &settings.subject, fields);
	info!("site-effects: handing contact form to the mail client");
	host.open_mail_client(&uri);

	Submission {
		success: true,
		errors: Vec::new(),
		mailto: Some(uri),
	}
}

/// `mailto:` URI with the filled-in fields as the body, one `Label: value`
/// line each. Lines end in CRLF, as `mailto:` bodies require.
pub fn mailto_uri(recipient: &str, subject: &str, fields: &[FormField]) -> String {
	let body = fields
		.iter()
		.filter(|f| !f.value.trim().is_empty())
		.map(|f| format!("{}: {}", f.display_label(), f.value.trim()))
		.collect::<Vec<_>>()
		.join("\r\n");
	format!(
		"mailto:{}?subject={}&body={}",
		percent_encode(recipient.trim()),
		percent_encode(subject),
		percent_encode(&body)
	)
}

/// RFC 3986 percent-encoding; only unreserved characters pass through.
/// `@` is kept so addresses stay readable.
pub fn percent_encode(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for byte in input.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'@' => {
				out.push(byte as char)
			}
			_ => out.push_str(&format!("%{byte:02X}")),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::contact_form::validation::FieldKind;

	#[test]
	fn delay_is_clamped() {
		assert_eq!(submit_delay_ms(0), 1500);
		assert_eq!(submit_delay_ms(1800), 1800);
		assert_eq!(submit_delay_ms(10_000), 2000);
	}

	#[test]
	fn encodes_reserved_characters() {
		assert_eq!(percent_encode("a b&c=d?"), "a%20b%26c%3Dd%3F");
		assert_eq!(percent_encode("line\nbreak"), "line%0Abreak");
		assert_eq!(percent_encode("é"), "%C3%A9");
		assert_eq!(percent_encode("me@example.com"), "me@example.com");
	}

	#[test]
	fn mailto_skips_empty_fields_and_uses_labels() {
		let fields = vec![
			FormField::new("name", FieldKind::Text, "Ada").with_label("Name"),
			FormField::new("company", FieldKind::Text, ""),
			FormField::new("email", FieldKind::Email, "ada@example.com"),
		];
		let uri = mailto_uri("hello@example.com", "Hi there", &fields);
		assert_eq!(
			uri,
			"mailto:hello@example.com?subject=Hi%20there&body=Name%3A%20Ada%0D%0Aemail%3A%20ada@example.com"
		);
	}
}
