//! Device-class classification and the per-class simulation budget.
//!
//! Narrow viewports are treated as constrained devices and get a cheaper
//! simulation: fewer particles, a lower frame rate, slower motion and a
//! shorter link radius. Classification happens once when the engine starts;
//! resizing the viewport afterwards does not move a session between classes.

use serde::Deserialize;

use super::config::FieldConfig;

/// Coarse viewport classification used to scale simulation cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
	/// Viewport narrower than the configured breakpoint.
	Constrained,
	/// Everything else.
	Standard,
}

impl DeviceClass {
	/// Classify by viewport width in logical pixels.
	pub fn classify(width: f64, breakpoint: f64) -> Self {
		if width < breakpoint {
			Self::Constrained
		} else {
			Self::Standard
		}
	}
}

/// Simulation budget derived from a [`DeviceClass`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DeviceProfile {
	/// Target executed frames per second.
	pub frames_per_second: f64,
	/// Number of particles kept alive at the end of every step.
	pub population: usize,
	/// Multiplier applied to spawn velocities.
	pub velocity_scale: f64,
	/// Particles closer than this are joined by a link.
	pub link_radius: f64,
}

impl DeviceProfile {
	/// Default budget for constrained devices.
	pub const CONSTRAINED: Self = Self {
		frames_per_second: 15.0,
		population: 50,
		velocity_scale: 1.0,
		link_radius: 10.0,
	};

	/// Default budget for standard devices.
	pub const STANDARD: Self = Self {
		frames_per_second: 30.0,
		population: 100,
		velocity_scale: 1.5,
		link_radius: 30.0,
	};

	/// Minimum milliseconds between two executed frames.
	pub fn frame_interval_ms(&self) -> f64 {
		1000.0 / self.frames_per_second
	}

	/// Pick the profile for `width` from `config`.
	pub fn for_width(width: f64, config: &FieldConfig) -> (DeviceClass, Self) {
		let class = DeviceClass::classify(width, config.constrained_breakpoint);
		let profile = match class {
			DeviceClass::Constrained => config.constrained,
			DeviceClass::Standard => config.standard,
		};
		(class, profile)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn narrow_viewport_selects_constrained_budget() {
		let (class, profile) = DeviceProfile::for_width(500.0, &FieldConfig::default());
		assert_eq!(class, DeviceClass::Constrained);
		assert_eq!(profile.frame_interval_ms(), 1000.0 / 15.0);
		assert_eq!(profile.population, 50);
		assert_eq!(profile.velocity_scale, 1.0);
		assert_eq!(profile.link_radius, 10.0);
	}

	#[test]
	fn wide_viewport_selects_standard_budget() {
		let (class, profile) = DeviceProfile::for_width(1024.0, &FieldConfig::default());
		assert_eq!(class, DeviceClass::Standard);
		assert_eq!(profile.frame_interval_ms(), 1000.0 / 30.0);
		assert_eq!(profile.population, 100);
		assert_eq!(profile.velocity_scale, 1.5);
		assert_eq!(profile.link_radius, 30.0);
	}

	#[test]
	fn breakpoint_itself_is_standard() {
		assert_eq!(DeviceClass::classify(768.0, 768.0), DeviceClass::Standard);
		assert_eq!(DeviceClass::classify(767.9, 768.0), DeviceClass::Constrained);
	}
}
