//! Mock contact form: client-side validation, a simulated send, and a
//! hand-off to the visitor's mail client.

mod dom;
pub mod submit;
pub mod validation;

pub use dom::{BrowserHost, ContactForm, attach, read_field};
pub use submit::{SubmitHost, Submission, mailto_uri, submit_form};
pub use validation::{FieldKind, FieldValidation, FormField, ValidationRules, validate_field};
