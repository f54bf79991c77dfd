//! Frame scheduling state machine for the starfield.
//!
//! The driver owns no drawing state. It decides *whether* a frame should be
//! scheduled, measures the time between frames, advances the shared clock and
//! samples the frame rate for the adaptive throttle. The browser
//! binding implements [`FrameScheduler`] on top of `requestAnimationFrame`.

use log::{debug, info, warn};

/// Nominal frame time used for the first frame after a (re)start.
pub const NOMINAL_DT: f64 = 1.0 / 60.0;

/// Largest step the clock may take in one frame, in seconds.
pub const MAX_DT: f64 = 0.1;

/// Opaque handle for a scheduled frame callback.
pub type FrameHandle = i32;

/// Something that can schedule and cancel one-shot frame callbacks.
pub trait FrameScheduler {
	/// Schedule the next frame. `None` if the platform refused.
	fn request(&mut self) -> Option<FrameHandle>;
	/// Cancel a previously scheduled frame.
	fn cancel(&mut self, handle: FrameHandle);
}

/// Lifecycle of the animation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
	/// Initial and terminal state; nothing scheduled.
	Stopped,
	/// A frame callback is scheduled or executing.
	Running,
	/// Suspended by reduced motion or a hidden page; nothing scheduled.
	Paused,
}

/// Adaptive quality step-down settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrottlePolicy {
	pub enabled: bool,
	/// Sample the frame rate once every this many frames.
	pub sample_every: u32,
	/// Below this FPS the particle count is stepped down.
	pub min_fps: f64,
	/// Never go below this many particles.
	pub floor: usize,
	/// How many particles to drop per step.
	pub step: usize,
}

impl Default for ThrottlePolicy {
	fn default() -> Self {
		Self {
			enabled: true,
			sample_every: 60,
			min_fps: 30.0,
			floor: 20,
			step: 10,
		}
	}
}

impl ThrottlePolicy {
	/// The reduced particle count, if a sampled `fps` warrants one.
	///
	/// One-way: this never returns a count larger than `current`.
	pub fn step_down(&self, fps: f64, current: usize) -> Option<usize> {
		if !self.enabled || fps >= self.min_fps || current <= self.floor {
			return None;
		}
		Some(current.saturating_sub(self.step).max(self.floor))
	}
}

/// What one frame should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
	/// Measured seconds since the previous frame (clamped).
	pub dt: f64,
	/// Shared animation clock after this frame.
	pub clock: f64,
	/// Instantaneous frame rate, present on sampling frames only.
	pub sampled_fps: Option<f64>,
}

/// The animation loop state machine.
pub struct AnimationDriver<S: FrameScheduler> {
	scheduler: S,
	state: DriverState,
	pending: Option<FrameHandle>,
	reduced_motion: bool,
	page_hidden: bool,
	clock: f64,
	last_frame_ms: Option<f64>,
	frames: u64,
	throttle: ThrottlePolicy,
}

impl<S: FrameScheduler> AnimationDriver<S> {
	pub fn new(scheduler: S, throttle: ThrottlePolicy) -> Self {
		Self {
			scheduler,
			state: DriverState::Stopped,
			pending: None,
			reduced_motion: false,
			page_hidden: false,
			clock: 0.0,
			last_frame_ms: None,
			frames: 0,
			throttle,
		}
	}

	pub fn state(&self) -> DriverState {
		self.state
	}

	pub fn clock(&self) -> f64 {
		self.clock
	}

	pub fn has_pending_frame(&self) -> bool {
		self.pending.is_some()
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	fn gates_open(&self) -> bool {
		!self.reduced_motion && !self.page_hidden
	}

	/// Leave `Stopped`. Without a drawing surface the driver stays put.
	pub fn start(&mut self, surface_available: bool) {
		if self.state != DriverState::Stopped {
			return;
		}
		if !surface_available {
			warn!("site-effects: no drawing surface, starfield disabled");
			return;
		}
		if self.gates_open() {
			self.resume();
		} else {
			info!("site-effects: starfield paused at start (reduced motion or hidden page)");
			self.state = DriverState::Paused;
		}
	}

	pub fn set_reduced_motion(&mut self, reduced: bool) {
		self.reduced_motion = reduced;
		self.reconcile();
	}

	pub fn set_page_hidden(&mut self, hidden: bool) {
		self.page_hidden = hidden;
		self.reconcile();
	}

	fn reconcile(&mut self) {
		match self.state {
			DriverState::Running if !self.gates_open() => self.pause(),
			DriverState::Paused if self.gates_open() => self.resume(),
			_ => {}
		}
	}

	fn pause(&mut self) {
		self.cancel_pending();
		self.state = DriverState::Paused;
		debug!("site-effects: starfield paused");
	}

	fn resume(&mut self) {
		// A paused stretch must not show up as one giant frame.
		self.last_frame_ms = None;
		self.state = DriverState::Running;
		self.pending = self.scheduler.request();
		if self.pending.is_none() {
			warn!("site-effects: frame scheduling refused, starfield stopped");
			self.state = DriverState::Stopped;
		}
	}

	/// Explicit teardown.
	pub fn stop(&mut self) {
		self.cancel_pending();
		self.state = DriverState::Stopped;
	}

	fn cancel_pending(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
	}

	/// Frame callback body. Returns `None` for a stale callback that fired
	/// after a pause or stop.
	pub fn on_frame(&mut self, now_ms: f64) -> Option<FrameTick> {
		if self.state != DriverState::Running {
			return None;
		}
		self.pending = None;

		let delta_ms = self.last_frame_ms.map(|last| now_ms - last);
		let dt = match delta_ms {
			Some(ms) => (ms / 1000.0).clamp(0.0, MAX_DT),
			None => NOMINAL_DT,
		};
		self.last_frame_ms = Some(now_ms);
		self.clock += dt;
		self.frames += 1;

		let sample_every = self.throttle.sample_every as u64;
		let sampled_fps = (sample_every > 0 && self.frames % sample_every == 0)
			.then_some(delta_ms)
			.flatten()
			.filter(|ms| *ms > 0.0)
			.map(|ms| 1000.0 / ms);
		if let Some(fps) = sampled_fps {
			debug!("site-effects: sampled {fps:.1} fps");
		}

		let tick = FrameTick {
			dt,
			clock: self.clock,
			sampled_fps,
		};

		self.pending = self.scheduler.request();
		if self.pending.is_none() {
			warn!("site-effects: frame scheduling refused, starfield stopped");
			self.state = DriverState::Stopped;
		}
		Some(tick)
	}

	pub fn throttle(&self) -> &ThrottlePolicy {
		&self.throttle
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct FakeScheduler {
		next: FrameHandle,
		live: Vec<FrameHandle>,
		refuse: bool,
	}

	impl FrameScheduler for FakeScheduler {
		fn request(&mut self) -> Option<FrameHandle> {
			if self.refuse {
				return None;
			}
			self.next += 1;
			self.live.push(self.next);
			Some(self.next)
		}

		fn cancel(&mut self, handle: FrameHandle) {
			self.live.retain(|h| *h != handle);
		}
	}

	fn driver() -> AnimationDriver<FakeScheduler> {
		AnimationDriver::new(FakeScheduler::default(), ThrottlePolicy::default())
	}

	#[test]
	fn missing_surface_never_leaves_stopped() {
		let mut d = driver();
		d.start(false);
		assert_eq!(d.state(), DriverState::Stopped);
		assert!(d.scheduler().live.is_empty());
		assert_eq!(d.on_frame(16.0), None);
	}

	#[test]
	fn start_schedules_one_frame() {
		let mut d = driver();
		d.start(true);
		assert_eq!(d.state(), DriverState::Running);
		assert_eq!(d.scheduler().live.len(), 1);
	}

	#[test]
	fn reduced_motion_at_start_never_runs() {
		let mut d = driver();
		d.set_reduced_motion(true);
		d.start(true);
		assert_eq!(d.state(), DriverState::Paused);
		assert!(!d.has_pending_frame());
		d.set_page_hidden(true);
		d.set_page_hidden(false);
		assert_eq!(d.state(), DriverState::Paused);
		assert_eq!(d.on_frame(100.0), None);
	}

	#[test]
	fn hidden_page_pauses_and_cancels() {
		let mut d = driver();
		d.start(true);
		d.set_page_hidden(true);
		assert_eq!(d.state(), DriverState::Paused);
		assert!(d.scheduler().live.is_empty());

		d.set_page_hidden(false);
		assert_eq!(d.state(), DriverState::Running);
		assert_eq!(d.scheduler().live.len(), 1);
	}

	#[test]
	fn stop_is_terminal_until_restarted() {
		let mut d = driver();
		d.start(true);
		d.stop();
		assert_eq!(d.state(), DriverState::Stopped);
		assert!(d.scheduler().live.is_empty());
		d.set_reduced_motion(false);
		assert_eq!(d.state(), DriverState::Stopped);
	}

	#[test]
	fn dt_follows_wall_clock() {
		let mut d = driver();
		d.start(true);
		let first = d.on_frame(1000.0).unwrap();
		assert_eq!(first.dt, NOMINAL_DT);

		// 120 Hz and 60 Hz displays advance the clock by the same wall time.
		let t = d.on_frame(1000.0 + 8.0).unwrap();
		assert!((t.dt - 0.008).abs() < 1e-9);
		let t = d.on_frame(1000.0 + 8.0 + 16.0).unwrap();
		assert!((t.dt - 0.016).abs() < 1e-9);

		// Long stalls are clamped.
		let t = d.on_frame(10_000.0).unwrap();
		assert_eq!(t.dt, MAX_DT);
		assert!(t.clock > first.clock);
	}

	#[test]
	fn resume_resets_frame_delta() {
		let mut d = driver();
		d.start(true);
		d.on_frame(0.0);
		d.set_page_hidden(true);
		d.set_page_hidden(false);
		let t = d.on_frame(60_000.0).unwrap();
		assert_eq!(t.dt, NOMINAL_DT);
	}

	#[test]
	fn fps_is_sampled_every_sixty_frames() {
		let mut d = driver();
		d.start(true);
		let mut samples = Vec::new();
		for i in 0..120 {
			let tick = d.on_frame(i as f64 * 50.0).unwrap();
			if let Some(fps) = tick.sampled_fps {
				samples.push((i, fps));
			}
		}
		assert_eq!(samples.len(), 2);
		assert_eq!(samples[0].0, 59);
		assert!((samples[0].1 - 20.0).abs() < 1e-9);
	}

	#[test]
	fn refused_scheduling_stops() {
		let mut d = AnimationDriver::new(
			FakeScheduler {
				refuse: true,
				..Default::default()
			},
			ThrottlePolicy::default(),
		);
		d.start(true);
		assert_eq!(d.state(), DriverState::Stopped);
	}

	#[test]
	fn throttle_is_a_one_way_ratchet() {
		let policy = ThrottlePolicy::default();
		assert_eq!(policy.step_down(25.0, 100), Some(90));
		assert_eq!(policy.step_down(25.0, 25), Some(20));
		assert_eq!(policy.step_down(25.0, 20), None);
		assert_eq!(policy.step_down(59.0, 100), None);
		let off = ThrottlePolicy {
			enabled: false,
			..policy
		};
		assert_eq!(off.step_down(1.0, 100), None);
	}
}
