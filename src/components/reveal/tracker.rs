//! Reveal bookkeeping, independent of how visibility is measured.

/// Per-element reveal state. `Revealed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
	Pending,
	Revealed,
}

/// Tracks which of a fixed set of targets have been revealed.
#[derive(Clone, Debug)]
pub struct RevealTracker {
	states: Vec<RevealState>,
	threshold: f64,
}

impl RevealTracker {
	pub fn new(count: usize, threshold: f64) -> Self {
		Self {
			states: vec![RevealState::Pending; count],
			threshold,
		}
	}

	/// Feed a visibility sample for target `index`. Returns `true` exactly
	/// once per target: on the first sample that reaches the threshold.
	pub fn report(&mut self, index: usize, ratio: f64) -> bool {
		let Some(state) = self.states.get_mut(index) else {
			return false;
		};
		if *state == RevealState::Revealed || !(ratio > 0.0 && ratio >= self.threshold) {
			return false;
		}
		*state = RevealState::Revealed;
		true
	}

	pub fn state(&self, index: usize) -> Option<RevealState> {
		self.states.get(index).copied()
	}

	pub fn is_revealed(&self, index: usize) -> bool {
		self.state(index) == Some(RevealState::Revealed)
	}

	pub fn all_revealed(&self) -> bool {
		self.states.iter().all(|s| *s == RevealState::Revealed)
	}
}

/// Fraction of an element's height inside the effective viewport
/// `[0, viewport_height × (1 − bottom_margin)]`.
pub fn visible_ratio(top: f64, bottom: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
	let visible_bottom = viewport_height * (1.0 - bottom_margin.clamp(0.0, 1.0));
	let height = bottom - top;
	if height <= 0.0 {
		return if top >= 0.0 && top <= visible_bottom { 1.0 } else { 0.0 };
	}
	let overlap = (bottom.min(visible_bottom) - top.max(0.0)).max(0.0);
	(overlap / height).clamp(0.0, 1.0)
}

/// Delay before the `index`-th header plays its entrance.
pub fn entrance_delay_ms(index: usize) -> u32 {
	200 + 150 * index as u32
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reveals_once_and_never_reverts() {
		let mut t = RevealTracker::new(2, 0.1);
		assert!(!t.report(0, 0.05));
		assert!(t.report(0, 0.5));
		assert!(!t.report(0, 0.9));
		assert!(!t.report(0, 0.0));
		assert!(t.is_revealed(0));
		assert!(!t.is_revealed(1));
		assert!(!t.all_revealed());
	}

	#[test]
	fn out_of_range_index_is_ignored() {
		let mut t = RevealTracker::new(1, 0.1);
		assert!(!t.report(5, 1.0));
		assert_eq!(t.state(5), None);
	}

	#[test]
	fn margin_shrinks_the_viewport() {
		// Element spanning 850..950 in a 1000px viewport: the bottom 10% (900..1000) is excluded.
		let r = visible_ratio(850.0, 950.0, 1000.0, 0.1);
		assert!((r - 0.5).abs() < 1e-9);
		assert_eq!(visible_ratio(910.0, 990.0, 1000.0, 0.1), 0.0);
		assert_eq!(visible_ratio(100.0, 200.0, 1000.0, 0.1), 1.0);
	}

	#[test]
	fn partly_scrolled_past_the_top() {
		let r = visible_ratio(-75.0, 25.0, 800.0, 0.1);
		assert!((r - 0.25).abs() < 1e-9);
		assert_eq!(visible_ratio(-200.0, -100.0, 800.0, 0.1), 0.0);
	}

	#[test]
	fn stagger_grows_linearly() {
		assert_eq!(entrance_delay_ms(0), 200);
		assert_eq!(entrance_delay_ms(3), 650);
	}
}
