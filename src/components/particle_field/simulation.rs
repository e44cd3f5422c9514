//! One executed simulation tick: move, shrink, bounce, cull, replenish.

use rand::Rng;

use super::config::FieldConfig;
use super::particles::{Particle, Population, Spawner};
use super::viewport::Viewport;

/// Integrate one particle by one tick.
///
/// Position moves by velocity, size shrinks while alive, and each axis that
/// ends up outside the surface has its velocity negated. Corners reflect both
/// axes independently.
pub fn advance(p: &mut Particle, viewport: &Viewport, config: &FieldConfig) {
	p.x += p.vx;
	p.y += p.vy;

	if p.is_alive(config.min_size) {
		p.size -= config.size_decay;
	}

	if p.x < 0.0 || p.x > viewport.width() {
		p.vx = -p.vx;
	}
	if p.y < 0.0 || p.y > viewport.height() {
		p.vy = -p.vy;
	}
}

/// Advance every particle, remove the expired ones and top the population
/// back up to `target` with fresh spawns. Returns how many expired.
pub fn step<R: Rng>(
	population: &mut Population,
	spawner: &Spawner,
	config: &FieldConfig,
	target: usize,
	rng: &mut R,
) -> usize {
	for p in population.as_mut_slice() {
		advance(p, &spawner.viewport, config);
	}

	let expired = population.cull(config.min_size);
	population.replenish(target, || spawner.spawn(rng));
	expired
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::theme::{Color, ThemeMode};
	use super::*;

	fn particle(x: f64, y: f64, vx: f64, vy: f64, size: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			size,
			color: Color::rgb(255, 255, 255),
		}
	}

	fn spawner(width: f64, height: f64) -> Spawner {
		Spawner {
			viewport: Viewport::new(width, height),
			palette: ThemeMode::Light.palette(),
			size_range: 1.0..=3.0,
			speed: 1.5,
		}
	}

	#[test]
	fn crossing_left_edge_flips_x_velocity() {
		let viewport = Viewport::new(100.0, 100.0);
		let mut p = particle(1.0, 50.0, -2.0, 0.5, 2.0);
		advance(&mut p, &viewport, &FieldConfig::default());

		assert_eq!(p.x, -1.0);
		assert_eq!(p.vx, 2.0);
		assert_eq!(p.vy, 0.5);
	}

	#[test]
	fn crossing_top_edge_flips_y_velocity() {
		let viewport = Viewport::new(100.0, 100.0);
		let mut p = particle(50.0, 1.0, 0.5, -2.0, 2.0);
		advance(&mut p, &viewport, &FieldConfig::default());

		assert_eq!(p.y, -1.0);
		assert_eq!(p.vy, 2.0);
		assert_eq!(p.vx, 0.5);
	}

	#[test]
	fn crossing_right_edge_flips_only_x_velocity() {
		let viewport = Viewport::new(100.0, 100.0);
		let mut p = particle(99.5, 50.0, 1.0, 0.5, 2.0);
		advance(&mut p, &viewport, &FieldConfig::default());

		assert_eq!(p.x, 100.5);
		assert_eq!((p.vx, p.vy), (-1.0, 0.5));
	}

	#[test]
	fn corner_reflects_both_axes() {
		let viewport = Viewport::new(100.0, 80.0);
		let mut p = particle(99.5, 79.5, 1.0, 1.0, 2.0);
		advance(&mut p, &viewport, &FieldConfig::default());

		assert_eq!((p.vx, p.vy), (-1.0, -1.0));
	}

	#[test]
	fn interior_motion_keeps_velocity() {
		let viewport = Viewport::new(100.0, 100.0);
		let mut p = particle(50.0, 50.0, 1.0, -1.0, 2.0);
		advance(&mut p, &viewport, &FieldConfig::default());

		assert_eq!((p.x, p.y), (51.0, 49.0));
		assert_eq!((p.vx, p.vy), (1.0, -1.0));
		assert!((p.size - 1.98).abs() < 1e-12);
	}

	#[test]
	fn expired_particles_stop_shrinking() {
		let viewport = Viewport::new(100.0, 100.0);
		let mut p = particle(50.0, 50.0, 0.0, 0.0, 0.2);
		advance(&mut p, &viewport, &FieldConfig::default());
		assert_eq!(p.size, 0.2);
	}

	#[test]
	fn step_replaces_expired_particles() {
		let config = FieldConfig::default();
		let spawner = spawner(200.0, 200.0);
		let mut rng = SmallRng::seed_from_u64(3);
		let mut population = Population::default();
		let mut seeds = [0.21, 2.0, 0.21].into_iter();
		population.initialize(3, || particle(10.0, 10.0, 0.0, 0.0, seeds.next().unwrap()));

		let expired = step(&mut population, &spawner, &config, 3, &mut rng);

		assert_eq!(expired, 2);
		assert_eq!(population.len(), 3);
		assert!((population.as_slice()[0].size - 1.98).abs() < 1e-12);
		assert!(population.as_slice().iter().all(|p| p.is_alive(config.min_size)));
	}

	#[test]
	fn survivors_shrink_monotonically_in_order() {
		let config = FieldConfig::default();
		let spawner = spawner(320.0, 240.0);
		let mut rng = SmallRng::seed_from_u64(11);
		let mut population = Population::default();
		population.initialize(40, || spawner.spawn(&mut rng));

		for _ in 0..200 {
			let expected: Vec<f64> = population
				.as_slice()
				.iter()
				.map(|p| p.size - config.size_decay)
				.filter(|&size| size > config.min_size)
				.collect();

			step(&mut population, &spawner, &config, 40, &mut rng);

			assert_eq!(population.len(), 40);
			let survivors: Vec<f64> = population.as_slice()[..expected.len()]
				.iter()
				.map(|p| p.size)
				.collect();
			assert_eq!(survivors, expected);
			assert!(population.as_slice().iter().all(|p| p.size > config.min_size));
		}
	}
}
