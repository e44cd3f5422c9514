//! The particle-field engine and its run state.
//!
//! The engine owns everything a frame touches: viewport, population, pacing
//! and randomness. The host drives it by calling [`ParticleEngine::tick`] from
//! its animation callback and scheduling another callback only while the
//! engine answers [`Control::Reschedule`].

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::device::{DeviceClass, DeviceProfile};
use super::frame::FramePacer;
use super::particles::{Particle, Population, Spawner};
use super::render::{self, DrawSurface, LinkStyle};
use super::simulation;
use super::theme::ThemeMode;
use super::viewport::Viewport;

/// Run state of an engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	/// Ticks are ignored and answer [`Control::Stop`].
	Stopped,
	/// Ticks step and draw at the device frame rate.
	Running,
}

/// What the host should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
	/// Schedule another animation callback.
	Reschedule,
	/// Stop scheduling.
	Stop,
}

/// A particle field bound to one viewport and theme.
///
/// Owns the population, pacing and randomness for the current run. Rebuilt
/// in place by [`restart`](Self::restart) on theme changes.
pub struct ParticleEngine {
	config: FieldConfig,
	theme: ThemeMode,
	class: DeviceClass,
	profile: DeviceProfile,
	viewport: Viewport,
	population: Population,
	pacer: FramePacer,
	rng: SmallRng,
	state: EngineState,
}

impl ParticleEngine {
	/// Build a stopped engine with a full population.
	///
	/// The device class is decided here from the initial viewport width and
	/// kept until the next [`restart`](Self::restart).
	pub fn new(config: FieldConfig, theme: ThemeMode, viewport: Viewport, seed: u64) -> Self {
		let config = config.normalized();
		let (class, profile) = DeviceProfile::for_width(viewport.width(), &config);

		let mut engine = Self {
			pacer: FramePacer::new(profile.frame_interval_ms()),
			config,
			theme,
			class,
			profile,
			viewport,
			population: Population::default(),
			rng: SmallRng::seed_from_u64(seed),
			state: EngineState::Stopped,
		};
		engine.populate();
		engine
	}

	fn spawner(&self) -> Spawner {
		Spawner {
			viewport: self.viewport,
			palette: self.theme.palette(),
			size_range: self.config.size_range(),
			speed: self.config.base_speed * self.profile.velocity_scale,
		}
	}

	fn populate(&mut self) {
		let spawner = self.spawner();
		let rng = &mut self.rng;
		self.population
			.initialize(self.profile.population, || spawner.spawn(rng));
	}

	/// `Stopped -> Running`. No-op when already running.
	pub fn start(&mut self) {
		if self.state == EngineState::Running {
			return;
		}
		self.state = EngineState::Running;
		self.pacer.reset();
		info!(
			"particle-field: started ({:?}, {} particles, {} theme, {:.1}ms frames)",
			self.class,
			self.population.len(),
			self.theme.as_str(),
			self.pacer.interval_ms()
		);
	}

	/// `Running -> Stopped`. Safe to call any number of times.
	pub fn stop(&mut self) {
		if self.state == EngineState::Stopped {
			return;
		}
		self.state = EngineState::Stopped;
		info!("particle-field: stopped");
	}

	/// Tear down and start again with a new theme.
	///
	/// Palette, device class, pacing and population are all rebuilt from
	/// scratch rather than patched.
	pub fn restart(&mut self, theme: ThemeMode, viewport: Viewport) {
		self.stop();
		info!(
			"particle-field: restarting with {} theme at {}x{}",
			theme.as_str(),
			viewport.width(),
			viewport.height()
		);

		let (class, profile) = DeviceProfile::for_width(viewport.width(), &self.config);
		self.theme = theme;
		self.viewport = viewport;
		self.class = class;
		self.profile = profile;
		self.pacer = FramePacer::new(profile.frame_interval_ms());
		self.populate();
		self.start();
	}

	/// Track a host resize. Returns `true` when the drawing buffer must be
	/// resized to match.
	///
	/// Particles keep their relative placement; the device class is not
	/// re-evaluated.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		let old = self.viewport;
		if !self.viewport.resize(width, height) {
			return false;
		}

		let sx = ratio(self.viewport.width(), old.width());
		let sy = ratio(self.viewport.height(), old.height());
		self.population.scale_positions(sx, sy);

		debug!(
			"particle-field: resized to {}x{}",
			self.viewport.width(),
			self.viewport.height()
		);
		true
	}

	/// Handle one host animation callback at `now_ms`.
	///
	/// Ticks arriving sooner than the frame interval after the last executed
	/// frame are skipped without touching the simulation or the surface.
	pub fn tick<S: DrawSurface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> Control {
		if self.state == EngineState::Stopped {
			return Control::Stop;
		}
		if !self.pacer.ready(now_ms) {
			return Control::Reschedule;
		}

		self.step();
		render::render(
			surface,
			&self.viewport,
			self.population.as_slice(),
			LinkStyle {
				radius: self.profile.link_radius,
				width: self.config.link_width,
			},
		);
		Control::Reschedule
	}

	fn step(&mut self) -> usize {
		let spawner = self.spawner();
		simulation::step(
			&mut self.population,
			&spawner,
			&self.config,
			self.profile.population,
			&mut self.rng,
		)
	}

	/// Current run state.
	pub fn state(&self) -> EngineState {
		self.state
	}

	/// Theme of the current run.
	pub fn theme(&self) -> ThemeMode {
		self.theme
	}

	/// Class decided at the last start or restart.
	pub fn device_class(&self) -> DeviceClass {
		self.class
	}

	/// Budget in effect for the current run.
	pub fn profile(&self) -> &DeviceProfile {
		&self.profile
	}

	/// Current drawing area.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Live particles in draw order.
	pub fn particles(&self) -> &[Particle] {
		self.population.as_slice()
	}
}

fn ratio(new: f64, old: f64) -> f64 {
	if old > 0.0 { new / old } else { 1.0 }
}

#[cfg(test)]
mod tests {
	use super::super::render::tests::RecordingSurface;
	use super::*;

	fn engine(width: f64, theme: ThemeMode) -> ParticleEngine {
		ParticleEngine::new(
			FieldConfig::default(),
			theme,
			Viewport::new(width, 768.0),
			0x5eed,
		)
	}

	/// Run `frames` ticks spaced far enough apart that every one executes.
	fn run(engine: &mut ParticleEngine, surface: &mut RecordingSurface, frames: usize) {
		for i in 0..frames {
			assert_eq!(engine.tick(i as f64 * 100.0, surface), Control::Reschedule);
		}
	}

	#[test]
	fn standard_scenario_keeps_population_and_size_bounds() {
		let mut engine = engine(1024.0, ThemeMode::Light);
		assert_eq!(engine.device_class(), DeviceClass::Standard);
		assert_eq!(engine.particles().len(), 100);

		engine.start();
		let mut surface = RecordingSurface::default();
		run(&mut engine, &mut surface, 10);

		assert_eq!(engine.particles().len(), 100);
		assert!(
			engine
				.particles()
				.iter()
				.all(|p| p.size > 0.2 && p.size <= 3.0)
		);
	}

	#[test]
	fn population_holds_across_many_generations() {
		let mut engine = engine(500.0, ThemeMode::Dark);
		engine.start();
		let mut surface = RecordingSurface::default();

		for i in 0..400 {
			engine.tick(i as f64 * 100.0, &mut surface);
			assert_eq!(engine.particles().len(), 50);
		}
	}

	#[test]
	fn rendered_particles_are_never_expired() {
		let mut engine = engine(500.0, ThemeMode::Dark);
		engine.start();
		let mut surface = RecordingSurface::default();
		run(&mut engine, &mut surface, 300);

		assert!(surface.circles().all(|call| match call {
			render::tests::DrawCall::Circle { radius, .. } => *radius > 0.2,
			_ => false,
		}));
	}

	#[test]
	fn stopped_engine_neither_steps_nor_draws() {
		let mut engine = engine(1024.0, ThemeMode::Dark);
		let before = engine.particles().to_vec();
		let mut surface = RecordingSurface::default();

		assert_eq!(engine.tick(1000.0, &mut surface), Control::Stop);
		assert!(surface.calls.is_empty());
		assert_eq!(engine.particles(), &before[..]);
	}

	#[test]
	fn throttled_tick_leaves_state_untouched() {
		let mut engine = engine(1024.0, ThemeMode::Dark);
		engine.start();
		let mut surface = RecordingSurface::default();

		engine.tick(0.0, &mut surface);
		let calls = surface.calls.len();
		let snapshot = engine.particles().to_vec();

		assert_eq!(engine.tick(10.0, &mut surface), Control::Reschedule);
		assert_eq!(surface.calls.len(), calls);
		assert_eq!(engine.particles(), &snapshot[..]);
	}

	#[test]
	fn stop_is_idempotent_even_before_start() {
		let mut engine = engine(1024.0, ThemeMode::Dark);
		engine.stop();
		engine.stop();
		assert_eq!(engine.state(), EngineState::Stopped);

		engine.start();
		engine.stop();
		engine.stop();
		assert_eq!(engine.state(), EngineState::Stopped);
	}

	#[test]
	fn theme_restart_uses_only_the_new_palette() {
		let mut engine = engine(1024.0, ThemeMode::Dark);
		engine.start();
		assert!(
			engine
				.particles()
				.iter()
				.all(|p| ThemeMode::Dark.palette().contains(&p.color))
		);

		engine.restart(ThemeMode::Light, *engine.viewport());
		assert_eq!(engine.state(), EngineState::Running);
		assert_eq!(engine.theme(), ThemeMode::Light);

		let mut surface = RecordingSurface::default();
		run(&mut engine, &mut surface, 50);
		assert!(
			engine
				.particles()
				.iter()
				.all(|p| ThemeMode::Light.palette().contains(&p.color))
		);
	}

	#[test]
	fn restart_reclassifies_from_the_new_viewport() {
		let mut engine = engine(1024.0, ThemeMode::Dark);
		engine.restart(ThemeMode::Dark, Viewport::new(400.0, 700.0));

		assert_eq!(engine.device_class(), DeviceClass::Constrained);
		assert_eq!(engine.particles().len(), 50);
	}

	#[test]
	fn resize_keeps_device_class_and_rescales_positions() {
		let mut engine = engine(1024.0, ThemeMode::Dark);
		let before: Vec<f64> = engine.particles().iter().map(|p| p.x).collect();

		assert!(engine.resize(512.0, 768.0));
		assert!(!engine.resize(512.0, 768.0));

		assert_eq!(engine.device_class(), DeviceClass::Standard);
		assert_eq!(engine.profile().population, 100);
		for (p, x) in engine.particles().iter().zip(before) {
			assert!((p.x - x * 0.5).abs() < 1e-9);
			assert!(p.x <= 512.0);
		}
	}
}
