//! Frame-rate throttling on top of the host's animation callback.

/// Slack for timestamps that land a rounding error short of the interval.
const TOLERANCE_MS: f64 = 1e-3;

/// Decides which host ticks actually execute a frame.
///
/// Executed frames are anchored to a grid of `interval_ms` steps starting at
/// the first executed tick. A tick executes once it reaches the next grid
/// point, and the reference time snaps to the latest grid point it passed.
/// A host frame that arrives slightly early therefore delays one frame
/// instead of pushing every later frame back. The first tick after a reset
/// always executes.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePacer {
	interval_ms: f64,
	last_frame_ms: Option<f64>,
}

impl FramePacer {
	/// Pacer that executes at most one frame per `interval_ms`.
	pub fn new(interval_ms: f64) -> Self {
		Self {
			interval_ms,
			last_frame_ms: None,
		}
	}

	/// Minimum milliseconds between executed frames.
	pub fn interval_ms(&self) -> f64 {
		self.interval_ms
	}

	/// Returns `true` when the tick at `now_ms` should execute a frame.
	pub fn ready(&mut self, now_ms: f64) -> bool {
		let Some(last) = self.last_frame_ms else {
			self.last_frame_ms = Some(now_ms);
			return true;
		};

		let elapsed_steps = ((now_ms - last + TOLERANCE_MS) / self.interval_ms).floor();
		if elapsed_steps < 1.0 {
			return false;
		}
		// Frames missed during a stall are dropped, not replayed.
		self.last_frame_ms = Some(last + elapsed_steps * self.interval_ms);
		true
	}

	/// Forget the reference time so the next tick executes.
	pub fn reset(&mut self) {
		self.last_frame_ms = None;
	}
}
