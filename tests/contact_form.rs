//! Submit-flow tests with a fake host whose sleep is released by hand.

#![allow(unused_crate_dependencies)]

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::executor::block_on;
use futures::task::noop_waker_ref;
use pretty_assertions::assert_eq;
use site_effects::components::contact_form::validation::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
use site_effects::components::contact_form::{
	FieldKind, FormField, SubmitHost, Submission, submit_form,
};
use site_effects::config::ContactSettings;

/// Pending until the shared gate opens.
struct Gate(Rc<Cell<bool>>);

impl Future for Gate {
	type Output = ();

	fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
		if self.0.get() { Poll::Ready(()) } else { Poll::Pending }
	}
}

#[derive(Default)]
struct FakeHost {
	gate: Rc<Cell<bool>>,
	slept: RefCell<Vec<u32>>,
	opened: RefCell<Vec<String>>,
}

impl SubmitHost for FakeHost {
	type Sleep = Gate;

	fn sleep(&self, ms: u32) -> Gate {
		self.slept.borrow_mut().push(ms);
		Gate(self.gate.clone())
	}

	fn open_mail_client(&self, uri: &str) {
		self.opened.borrow_mut().push(uri.to_string());
	}
}

fn valid_fields() -> Vec<FormField> {
	vec![
		FormField::new("name", FieldKind::Text, "Ada Lovelace")
			.required()
			.with_label("Name"),
		FormField::new("email", FieldKind::Email, "ada@example.com")
			.required()
			.with_label("Email"),
		FormField::new("message", FieldKind::TextArea, "Let's build an engine together.")
			.required()
			.with_label("Message"),
	]
}

#[test]
fn valid_form_waits_then_opens_mail_client() {
	let host = FakeHost::default();
	let settings = ContactSettings::default();
	let fields = valid_fields();
	let mut fut = Box::pin(submit_form(&fields, &settings, &host));
	let mut cx = Context::from_waker(noop_waker_ref());

	assert!(fut.as_mut().poll(&mut cx).is_pending());
	assert!(fut.as_mut().poll(&mut cx).is_pending());
	assert!(host.opened.borrow().is_empty());

	host.gate.set(true);
	let Poll::Ready(outcome) = fut.as_mut().poll(&mut cx) else {
		panic!("submission should finish once the delay elapses");
	};

	assert!(outcome.success);
	assert_eq!(*host.slept.borrow(), vec![1500]);
	assert_eq!(host.opened.borrow().len(), 1);
	let uri = outcome.mailto.unwrap();
	assert_eq!(host.opened.borrow()[0], uri);
	assert!(uri.starts_with("mailto:hello@example.com?subject=Website%20enquiry&body="));
	assert!(uri.contains("Name%3A%20Ada%20Lovelace%0D%0AEmail%3A%20ada@example.com"));
}

#[test]
fn invalid_form_resolves_without_sleeping() {
	let host = FakeHost::default();
	let settings = ContactSettings::default();
	let fields = vec![
		FormField::new("name", FieldKind::Text, "A").required(),
		FormField::new("email", FieldKind::Email, "not-an-email").required(),
		FormField::new("message", FieldKind::TextArea, "   ").required(),
	];

	let outcome = block_on(submit_form(&fields, &settings, &host));
	assert_eq!(
		outcome,
		Submission {
			success: false,
			errors: vec![
				("name".to_string(), "Please enter at least 2 characters.".to_string()),
				("email".to_string(), EMAIL_MESSAGE.to_string()),
				("message".to_string(), REQUIRED_MESSAGE.to_string()),
			],
			mailto: None,
		}
	);
	assert!(host.slept.borrow().is_empty());
	assert!(host.opened.borrow().is_empty());
}

#[test]
fn configured_delay_is_clamped() {
	let host = FakeHost::default();
	host.gate.set(true);
	let settings = ContactSettings {
		submit_delay_ms: 60_000,
		..ContactSettings::default()
	};
	let outcome = block_on(submit_form(&valid_fields(), &settings, &host));
	assert!(outcome.success);
	assert_eq!(*host.slept.borrow(), vec![2000]);
}

#[test]
fn optional_empty_fields_are_left_out_of_the_body() {
	let host = FakeHost::default();
	host.gate.set(true);
	let mut fields = valid_fields();
	fields.push(FormField::new("company", FieldKind::Text, "").with_label("Company"));
	let outcome = block_on(submit_form(&fields, &ContactSettings::default(), &host));
	assert!(outcome.success);
	assert!(!outcome.mailto.unwrap().contains("Company"));
}
