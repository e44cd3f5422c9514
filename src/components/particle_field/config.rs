//! Tunable parameters for the particle field.
//!
//! Defaults reproduce the stock look. A host page can override any subset by
//! embedding JSON in a `<script id="particle-config">` element; missing keys
//! keep their defaults.

use std::ops::RangeInclusive;

use log::warn;
use serde::Deserialize;

use super::device::DeviceProfile;
use super::theme::ThemeMode;

/// Complete field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Viewports narrower than this (logical px) are constrained devices.
	pub constrained_breakpoint: f64,
	/// A particle at or below this size is expired.
	pub min_size: f64,
	/// Size lost per executed tick while above `min_size`.
	pub size_decay: f64,
	/// Smallest spawn size.
	pub size_min: f64,
	/// Largest spawn size (inclusive).
	pub size_max: f64,
	/// Spawn speed per axis before the device velocity scale.
	pub base_speed: f64,
	/// Stroke width of proximity links.
	pub link_width: f64,
	/// Budget for [`DeviceClass::Constrained`](super::device::DeviceClass::Constrained).
	pub constrained: DeviceProfile,
	/// Budget for [`DeviceClass::Standard`](super::device::DeviceClass::Standard).
	pub standard: DeviceProfile,
	/// Initial theme. `None` defers to the system preference.
	pub theme: Option<ThemeMode>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			constrained_breakpoint: 768.0,
			min_size: 0.2,
			size_decay: 0.02,
			size_min: 1.0,
			size_max: 3.0,
			base_speed: 1.0,
			link_width: 0.2,
			constrained: DeviceProfile::CONSTRAINED,
			standard: DeviceProfile::STANDARD,
			theme: None,
		}
	}
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::normalized)
	}

	/// Spawn size range. Strictly above `min_size` once normalized.
	pub fn size_range(&self) -> RangeInclusive<f64> {
		self.size_min..=self.size_max
	}

	/// Repair values that would break the population invariants.
	///
	/// Spawned particles must start alive, sizes must never grow, and frame
	/// rates must be positive. Anything else is left untouched.
	pub fn normalized(mut self) -> Self {
		let defaults = Self::default();

		if !(self.min_size >= 0.0) {
			warn!("particle-field: invalid min_size {}, using default", self.min_size);
			self.min_size = defaults.min_size;
		}
		if !(self.size_decay > 0.0) {
			warn!(
				"particle-field: size_decay must be positive (got {}), using default",
				self.size_decay
			);
			self.size_decay = defaults.size_decay;
		}
		if self.size_max < self.size_min {
			std::mem::swap(&mut self.size_min, &mut self.size_max);
		}
		if !(self.size_min > self.min_size) {
			warn!(
				"particle-field: spawn size {} would be born expired, raising above {}",
				self.size_min, self.min_size
			);
			self.size_min = self.min_size + self.size_decay;
			self.size_max = self.size_max.max(self.size_min);
		}
		for profile in [&mut self.constrained, &mut self.standard] {
			if !(profile.frames_per_second > 0.0) {
				profile.frames_per_second = 1.0;
			}
			profile.link_radius = profile.link_radius.max(0.0);
		}
		self
	}
}
