//! The starfield controller: device profile, star set, driver and surface.
//!
//! Created once when the canvas mounts, then fed frame callbacks, resize
//! notifications and preference changes by the component. Everything here is
//! platform-agnostic; the browser pieces sit behind [`Surface`] and
//! [`FrameScheduler`].

use log::{debug, info};
use rand::Rng;

use super::device::{DeviceConfig, HardwareSignals, Quality, classify};
use super::driver::{AnimationDriver, DriverState, FrameScheduler, ThrottlePolicy};
use super::particles::{self, Particle};
use super::theme::StarPalette;

/// A 2-D drawing target for stars.
pub trait Surface {
	/// Current drawable size in surface units.
	fn size(&self) -> (f64, f64);
	/// Change the drawable size. Clears the surface as a side effect.
	fn resize(&mut self, width: f64, height: f64);
	/// Wipe the whole surface.
	fn clear(&mut self);
	/// Draw one star at its current position and render alpha.
	fn draw_star(&mut self, star: &Particle);
	/// Restore any state touched while drawing.
	fn finish(&mut self) {}
}

/// Owns everything the background animation needs.
pub struct Starfield<S: FrameScheduler, D: Surface, R: Rng> {
	driver: AnimationDriver<S>,
	surface: Option<D>,
	particles: Vec<Particle>,
	profile: DeviceConfig,
	signals: HardwareSignals,
	particle_count: usize,
	/// Lowest count the throttle has stepped down to. Never raised again.
	ceiling: Option<usize>,
	/// Surface size waiting for the loop to run again.
	pending_size: Option<(f64, f64)>,
	stale: bool,
	palette: StarPalette,
	rng: R,
}

impl<S: FrameScheduler, D: Surface, R: Rng> Starfield<S, D, R> {
	/// Profile the device and build the first star set. A `None` surface
	/// yields a controller that never animates.
	pub fn new(
		scheduler: S,
		surface: Option<D>,
		viewport_width: f64,
		signals: HardwareSignals,
		palette: StarPalette,
		throttle: ThrottlePolicy,
		rng: R,
	) -> Self {
		let profile = classify(viewport_width, &signals);
		info!(
			"site-effects: {:?} profile, {} stars (quality {:?})",
			profile.tier, profile.particle_count, profile.quality
		);
		let mut field = Self {
			driver: AnimationDriver::new(scheduler, throttle),
			surface,
			particles: Vec::new(),
			profile,
			signals,
			particle_count: profile.particle_count,
			ceiling: None,
			pending_size: None,
			stale: false,
			palette,
			rng,
		};
		field.rebuild();
		field
	}

	fn rebuild(&mut self) {
		let Some(surface) = self.surface.as_ref() else {
			return;
		};
		let config = DeviceConfig {
			particle_count: self.particle_count,
			..self.profile
		};
		self.particles = particles::rebuild(&config, surface.size(), &self.palette, &mut self.rng);
	}

	pub fn start(&mut self) {
		self.driver.start(self.surface.is_some());
		self.apply_pending();
	}

	pub fn stop(&mut self) {
		self.driver.stop();
	}

	pub fn set_reduced_motion(&mut self, reduced: bool) {
		self.driver.set_reduced_motion(reduced);
		self.apply_pending();
	}

	pub fn set_page_hidden(&mut self, hidden: bool) {
		self.driver.set_page_hidden(hidden);
		self.apply_pending();
	}

	/// Resize and rebuild deferred while the loop was not running.
	fn apply_pending(&mut self) {
		if self.driver.state() != DriverState::Running {
			return;
		}
		if let (Some((w, h)), Some(surface)) = (self.pending_size.take(), self.surface.as_mut()) {
			surface.resize(w, h);
		}
		if std::mem::take(&mut self.stale) {
			self.rebuild();
		}
	}

	/// Swap the palette and recolor by rebuilding.
	pub fn set_palette(&mut self, palette: StarPalette) {
		if palette != self.palette {
			self.palette = palette;
			self.rebuild();
		}
	}

	/// Re-profile after a (debounced) resize. Rebuilds when the tier or the
	/// surface size changed. A tier change adopts the new tier's count, capped
	/// by any earlier throttling. The surface is only touched while running;
	/// otherwise the change waits for the loop to resume.
	pub fn on_resize(&mut self, viewport_width: f64, surface_size: (f64, f64)) {
		let profile = classify(viewport_width, &self.signals);
		if profile.tier != self.profile.tier {
			let count = self
				.ceiling
				.map_or(profile.particle_count, |c| c.min(profile.particle_count));
			info!(
				"site-effects: tier {:?} -> {:?}, {} stars",
				self.profile.tier, profile.tier, count
			);
			self.particle_count = count;
			self.stale = true;
		}
		self.profile = profile;

		let Some(surface) = self.surface.as_ref() else {
			return;
		};
		if surface.size() != surface_size {
			self.pending_size = Some(surface_size);
			self.stale = true;
		} else {
			self.pending_size = None;
		}
		self.apply_pending();
	}

	/// Frame callback body: advance, throttle, draw.
	pub fn frame(&mut self, now_ms: f64) {
		let Some(tick) = self.driver.on_frame(now_ms) else {
			return;
		};
		let Some(surface) = self.surface.as_mut() else {
			return;
		};

		if self.profile.quality == Quality::Low {
			particles::drift(&mut self.particles, tick.dt, surface.size());
		} else {
			particles::advance(&mut self.particles, tick.dt, tick.clock, surface.size());
		}

		surface.clear();
		for star in self.particles.iter().filter(|p| p.is_visible()) {
			surface.draw_star(star);
		}
		surface.finish();

		let stepped = tick
			.sampled_fps
			.and_then(|fps| self.driver.throttle().step_down(fps, self.particle_count));
		if let Some(count) = stepped {
			debug!(
				"site-effects: low frame rate, {} -> {} stars",
				self.particle_count, count
			);
			self.particle_count = count;
			self.ceiling = Some(count);
			self.rebuild();
		}
	}

	pub fn state(&self) -> DriverState {
		self.driver.state()
	}

	pub fn clock(&self) -> f64 {
		self.driver.clock()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particle_count(&self) -> usize {
		self.particle_count
	}

	pub fn profile(&self) -> &DeviceConfig {
		&self.profile
	}

	pub fn surface(&self) -> Option<&D> {
		self.surface.as_ref()
	}

	pub fn driver(&self) -> &AnimationDriver<S> {
		&self.driver
	}
}
