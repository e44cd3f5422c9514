//! Theme modes and their particle palettes.
//!
//! The surrounding application owns the theme; the field only observes it.
//! Each mode maps to a fixed palette and the two palettes share no colors.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Saturated accents that read well on a dark page.
const DARK_PALETTE: [Color; 5] = [
	Color::rgb(0, 229, 255),   // Cyan
	Color::rgb(124, 77, 255),  // Electric violet
	Color::rgb(255, 64, 129),  // Hot pink
	Color::rgb(105, 240, 174), // Mint
	Color::rgb(255, 215, 64),  // Amber
];

/// Deeper, translucent tones that stay visible on a light page.
const LIGHT_PALETTE: [Color; 5] = [
	Color::rgba(25, 118, 210, 0.7), // Blue
	Color::rgba(123, 31, 162, 0.7), // Purple
	Color::rgba(0, 137, 123, 0.7),  // Teal
	Color::rgba(230, 81, 0, 0.7),   // Burnt orange
	Color::rgba(69, 90, 100, 0.7),  // Blue grey
];

/// Light/dark theme signal supplied by the host application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	/// Light page background.
	Light,
	/// Dark page background.
	#[default]
	Dark,
}

impl ThemeMode {
	/// Parse a `data-theme` style attribute value.
	pub fn from_attribute(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"light" => Some(Self::Light),
			"dark" => Some(Self::Dark),
			_ => None,
		}
	}

	/// Attribute spelling, inverse of [`from_attribute`](Self::from_attribute).
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	/// The fixed palette particles sample their color from.
	pub fn palette(self) -> &'static [Color] {
		match self {
			Self::Light => &LIGHT_PALETTE,
			Self::Dark => &DARK_PALETTE,
		}
	}
}
