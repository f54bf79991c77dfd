//! Adaptive starfield background.
//!
//! Draws a field of drifting, twinkling stars on a fixed canvas behind the page:
//! - Device profiling picks star count and size per viewport tier
//! - Frame time is measured, so speed is independent of display refresh rate
//! - Pauses while the page is hidden or reduced motion is requested
//! - Steps the star count down when the frame rate stays low
//!
//! # Example
//!
//! ```ignore
//! use site_effects::components::starfield::StarfieldCanvas;
//!
//! view! { <StarfieldCanvas settings=StarfieldSettings::default() /> }
//! ```

mod component;
pub mod controller;
pub mod device;
pub mod driver;
pub mod particles;
mod render;
pub mod theme;

pub use component::StarfieldCanvas;
pub use controller::{Starfield, Surface};
pub use device::{DeviceConfig, HardwareSignals, Tier, classify};
pub use driver::{AnimationDriver, DriverState, FrameScheduler, ThrottlePolicy};
pub use particles::Particle;
