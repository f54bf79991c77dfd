//! Twinkling background stars.

use std::f64::consts::TAU;

use rand::Rng;

use super::device::DeviceConfig;
use super::theme::{Color, StarPalette};

/// Stars dimmer than this are skipped when drawing (they still move).
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Smallest star radius.
pub const MIN_SIZE: f64 = 0.5;

/// Per-axis drift bound, in pixels per nominal 60 Hz frame.
pub const MAX_DRIFT: f64 = 0.05;

/// A single star.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	/// Fixed alpha in [0.2, 1.0] that the twinkle modulates.
	pub base_opacity: f64,
	pub color: Color,
	pub phase: f64,
	/// Twinkle angular speed, radians per second of clock.
	pub frequency: f64,
	/// Render alpha from the last [`advance`].
	pub alpha: f64,
}

impl Particle {
	pub fn is_visible(&self) -> bool {
		self.alpha >= VISIBILITY_THRESHOLD
	}

	/// alpha = base × (0.5 + 0.5·sin(clock·frequency + phase))
	pub fn twinkle_alpha(&self, clock: f64) -> f64 {
		let twinkle = (clock * self.frequency + self.phase).sin() * 0.5 + 0.5;
		self.base_opacity * twinkle
	}
}

/// Produce a fresh star set for the given device profile and surface size.
pub fn rebuild<R: Rng + ?Sized>(
	config: &DeviceConfig,
	(width, height): (f64, f64),
	palette: &StarPalette,
	rng: &mut R,
) -> Vec<Particle> {
	let max_size = config.max_size.max(MIN_SIZE);
	let mut particles = Vec::with_capacity(config.particle_count);

	for _ in 0..config.particle_count {
		let base_opacity = rng.gen_range(0.2..=1.0);
		let phase = rng.gen_range(0.0..TAU);
		particles.push(Particle {
			x: uniform(rng, width),
			y: uniform(rng, height),
			vx: rng.gen_range(-MAX_DRIFT..=MAX_DRIFT),
			vy: rng.gen_range(-MAX_DRIFT..=MAX_DRIFT),
			size: rng.gen_range(MIN_SIZE..=max_size),
			base_opacity,
			color: palette.pick(rng),
			phase,
			frequency: rng.gen_range(0.5..=2.0),
			alpha: base_opacity * (phase.sin() * 0.5 + 0.5),
		});
	}

	particles
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
	if extent > 0.0 { rng.gen_range(0.0..extent) } else { 0.0 }
}

/// Move every star by its drift, wrap it back onto the surface and refresh
/// its render alpha from the shared clock.
pub fn advance(particles: &mut [Particle], dt: f64, clock: f64, size: (f64, f64)) {
	drift(particles, dt, size);
	for p in particles.iter_mut() {
		p.alpha = p.twinkle_alpha(clock);
	}
}

/// Movement only; alpha keeps whatever it was. Used at [`Quality::Low`].
///
/// [`Quality::Low`]: super::device::Quality::Low
pub fn drift(particles: &mut [Particle], dt: f64, (width, height): (f64, f64)) {
	let step = dt * 60.0;
	for p in particles.iter_mut() {
		p.x = wrap(p.x + p.vx * step, width);
		p.y = wrap(p.y + p.vy * step, height);
	}
}

/// Wrap into `[0, extent)`, re-entering from the opposite edge.
pub fn wrap(value: f64, extent: f64) -> f64 {
	if !(extent > 0.0) || !value.is_finite() {
		return 0.0;
	}
	let r = value.rem_euclid(extent);
	// rem_euclid of a tiny negative can round up to `extent` itself.
	if r >= extent { 0.0 } else { r }
}
