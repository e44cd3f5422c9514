//! Drawable surface dimensions.

/// Surface width/height in pixels. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	width: f64,
	height: f64,
}

impl Viewport {
	/// Negative and non-finite dimensions become 0.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width: clamp_dimension(width),
			height: clamp_dimension(height),
		}
	}

	/// Width in pixels.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Height in pixels.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Apply a host resize. Returns `true` when the drawing buffer must be
	/// resized to match.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		let next = Self::new(width, height);
		let changed = next != *self;
		*self = next;
		changed
	}
}

fn clamp_dimension(value: f64) -> f64 {
	if value.is_finite() { value.max(0.0) } else { 0.0 }
}
