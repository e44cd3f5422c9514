//! Frame rendering: clear, particles, then proximity links.
//!
//! Drawing goes through [`DrawSurface`] so the same pass runs against a
//! browser canvas or a recording double in tests.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::Particle;
use super::theme::Color;
use super::viewport::Viewport;

/// Minimal immediate-mode 2D drawing context.
pub trait DrawSurface {
	/// Erase the `width` x `height` area at the origin.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill a circle centered on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl DrawSurface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Per-frame link styling.
#[derive(Clone, Copy, Debug)]
pub struct LinkStyle {
	/// Pairs strictly closer than this are linked.
	pub radius: f64,
	/// Stroke width.
	pub width: f64,
}

/// Draw one frame of `particles` onto `surface`.
pub fn render<S: DrawSurface + ?Sized>(
	surface: &mut S,
	viewport: &Viewport,
	particles: &[Particle],
	links: LinkStyle,
) {
	surface.clear(viewport.width(), viewport.height());

	for p in particles {
		surface.fill_circle(p.x, p.y, p.size, p.color);
	}

	draw_links(surface, particles, links);
}

/// Link every pair closer than the link radius.
///
/// The inner loop starts at the outer index, so each unordered pair is
/// visited once and every particle is also paired with itself, producing a
/// zero-length stroke.
fn draw_links<S: DrawSurface + ?Sized>(surface: &mut S, particles: &[Particle], links: LinkStyle) {
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			if (dx * dx + dy * dy).sqrt() < links.radius {
				surface.stroke_line((a.x, a.y), (b.x, b.y), links.width, a.color);
			}
		}
	}
}
