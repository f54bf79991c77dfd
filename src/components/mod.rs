//! The page effects, one module per subsystem.

pub mod contact_form;
pub mod flourish;
pub mod reveal;
pub mod starfield;
