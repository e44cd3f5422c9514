//! Particles and the fixed-size population that owns them.

use std::ops::RangeInclusive;

use rand::Rng;

use super::theme::Color;
use super::viewport::Viewport;

/// A single drifting, shrinking point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity per executed tick.
	pub vx: f64,
	/// Vertical velocity per executed tick.
	pub vy: f64,
	/// Radius. Alive while above the configured minimum.
	pub size: f64,
	/// Fill color, also used for links starting at this particle.
	pub color: Color,
}

impl Particle {
	/// Whether the particle is still above `min_size`.
	pub fn is_alive(&self, min_size: f64) -> bool {
		self.size > min_size
	}
}

/// Randomized construction parameters for fresh particles.
#[derive(Clone, Debug)]
pub struct Spawner {
	/// Area positions are drawn from.
	pub viewport: Viewport,
	/// Colors are picked uniformly from here.
	pub palette: &'static [Color],
	/// Initial size bounds.
	pub size_range: RangeInclusive<f64>,
	/// Maximum absolute speed per axis, device scale already applied.
	pub speed: f64,
}

impl Spawner {
	/// A fresh particle with uniformly random position, velocity, size and color.
	pub fn spawn<R: Rng>(&self, rng: &mut R) -> Particle {
		Particle {
			x: sample_span(rng, self.viewport.width()),
			y: sample_span(rng, self.viewport.height()),
			vx: rng.gen_range(-1.0..=1.0) * self.speed,
			vy: rng.gen_range(-1.0..=1.0) * self.speed,
			size: rng.gen_range(self.size_range.clone()),
			color: self.palette[rng.gen_range(0..self.palette.len())],
		}
	}
}

/// Uniform in `[0, span)`, or 0 on a collapsed surface.
fn sample_span<R: Rng>(rng: &mut R, span: f64) -> f64 {
	if span > 0.0 { rng.gen_range(0.0..span) } else { 0.0 }
}

/// Ordered particle storage with a live count.
///
/// Slots past `live` hold expired particles and are overwritten in place by
/// [`Population::replenish`], so the backing buffer only grows when the target
/// population grows.
#[derive(Clone, Debug, Default)]
pub struct Population {
	slots: Vec<Particle>,
	live: usize,
}

impl Population {
	/// Discard everything and spawn `target` fresh particles.
	pub fn initialize(&mut self, target: usize, spawn: impl FnMut() -> Particle) {
		self.slots.clear();
		self.slots.reserve(target);
		self.live = 0;
		self.replenish(target, spawn);
	}

	/// Append fresh particles until exactly `target` are live.
	pub fn replenish(&mut self, target: usize, mut spawn: impl FnMut() -> Particle) {
		self.live = self.live.min(target);
		while self.live < target {
			let particle = spawn();
			match self.slots.get_mut(self.live) {
				Some(slot) => *slot = particle,
				None => self.slots.push(particle),
			}
			self.live += 1;
		}
	}

	/// Drop particles at or below `min_size`, keeping survivors in order.
	/// Returns how many were removed.
	pub fn cull(&mut self, min_size: f64) -> usize {
		let mut kept = 0;
		for i in 0..self.live {
			if self.slots[i].is_alive(min_size) {
				self.slots.swap(kept, i);
				kept += 1;
			}
		}
		let removed = self.live - kept;
		self.live = kept;
		removed
	}

	/// Rescale every position, used to carry the field across a resize.
	pub fn scale_positions(&mut self, sx: f64, sy: f64) {
		for p in self.as_mut_slice() {
			p.x *= sx;
			p.y *= sy;
		}
	}

	/// Number of live particles.
	pub fn len(&self) -> usize {
		self.live
	}

	/// Live particles in order.
	pub fn as_slice(&self) -> &[Particle] {
		&self.slots[..self.live]
	}

	/// Live particles in order, mutable.
	pub fn as_mut_slice(&mut self) -> &mut [Particle] {
		&mut self.slots[..self.live]
	}
}
