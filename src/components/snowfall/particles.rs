//! Snowflake particles and the fixed-size field that animates them.
//!
//! Particles are never added or removed after the field is created. A flake
//! that leaves the viewport re-enters from the opposite edge, which keeps the
//! snowfall continuous with a constant particle budget.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::input::{Axis, KeyState};
use super::theme::Color;
use super::vector::Vector2;

/// Divides `radius * axis` to get the per-tick change in horizontal velocity.
pub const DEFAULT_DRIFT_DIVISOR: f64 = 500.0;

/// A single snowflake.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub position: Vector2,
	pub velocity: Vector2,
	pub radius: f64,
	pub color: Color,
}

impl Particle {
	/// Random flake somewhere inside the viewport, drifting downward.
	pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, color: Color) -> Self {
		Self {
			position: Vector2::new(sample_span(rng, width), sample_span(rng, height)),
			velocity: Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(2.0..8.0)),
			radius: rng.gen_range(1.0..6.0),
			color,
		}
	}
}

/// Uniform in `[0, upper)`, or exactly 0 when the span is empty.
fn sample_span<R: Rng>(rng: &mut R, upper: f64) -> f64 {
	let upper = extent(upper);
	if upper > 0.0 {
		rng.gen_range(0.0..upper)
	} else {
		0.0
	}
}

/// Viewport extents that are negative or not finite count as zero.
fn extent(value: f64) -> f64 {
	if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// The edge a particle re-enters from after leaving the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reentry {
	/// Fell below the bottom edge.
	Top,
	/// Rose above the top edge.
	Bottom,
	/// Left through the left edge.
	Right,
	/// Left through the right edge.
	Left,
}

impl Reentry {
	/// Decide whether `particle` must wrap, checking bottom, top, left, right
	/// in that order. Only the first match counts.
	///
	/// All comparisons are strict, so a particle sitting exactly on a bound
	/// stays put.
	pub fn classify(particle: &Particle, width: f64, height: f64) -> Option<Reentry> {
		let Vector2 { x, y } = particle.position;
		let r = particle.radius;

		if y > height {
			Some(Reentry::Top)
		} else if y < -r {
			Some(Reentry::Bottom)
		} else if x < -r {
			Some(Reentry::Right)
		} else if x > width + r {
			Some(Reentry::Left)
		} else {
			None
		}
	}

	/// Where a particle of the given radius lands when re-entering.
	pub fn target<R: Rng>(self, radius: f64, width: f64, height: f64, rng: &mut R) -> Vector2 {
		match self {
			Reentry::Top => Vector2::new(sample_span(rng, width), -radius),
			Reentry::Bottom => Vector2::new(sample_span(rng, width), height),
			Reentry::Right => Vector2::new(width, sample_span(rng, height)),
			Reentry::Left => Vector2::new(-radius, sample_span(rng, height)),
		}
	}
}

/// Owns a fixed number of particles and advances them one tick at a time.
pub struct ParticleField {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	drift_divisor: f64,
	rng: StdRng,
}

impl ParticleField {
	/// `count` white flakes, randomised from OS entropy.
	pub fn new(width: f64, height: f64, count: usize) -> Self {
		Self::create(width, height, count, Color::WHITE, StdRng::from_entropy())
	}

	/// Like [`ParticleField::new`], but reproducible: the same seed and the
	/// same inputs give the same trajectory.
	pub fn seeded(seed: u64, width: f64, height: f64, count: usize) -> Self {
		Self::create(width, height, count, Color::WHITE, StdRng::seed_from_u64(seed))
	}

	/// `count` flakes of the given color, spread uniformly over the viewport
	/// and drifting downward. A count of zero gives an empty field.
	pub fn create(width: f64, height: f64, count: usize, color: Color, mut rng: StdRng) -> Self {
		let (width, height) = (extent(width), extent(height));
		let particles = (0..count)
			.map(|_| Particle::spawn(&mut rng, width, height, color))
			.collect();

		info!("snowfall: created {count} particles in {width}x{height} viewport");

		Self {
			particles,
			width,
			height,
			drift_divisor: DEFAULT_DRIFT_DIVISOR,
			rng,
		}
	}

	/// Build a field around existing particles. `rng` supplies the random
	/// offsets used when particles wrap.
	pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64, rng: StdRng) -> Self {
		Self {
			particles,
			width: extent(width),
			height: extent(height),
			drift_divisor: DEFAULT_DRIFT_DIVISOR,
			rng,
		}
	}

	/// Change how strongly wind pushes flakes. Non-finite or non-positive
	/// divisors would poison velocities, so they fall back to
	/// [`DEFAULT_DRIFT_DIVISOR`].
	pub fn set_drift_divisor(&mut self, divisor: f64) {
		if divisor.is_finite() && divisor > 0.0 {
			self.drift_divisor = divisor;
		} else {
			warn!("snowfall: drift divisor {divisor} is unusable, keeping {DEFAULT_DRIFT_DIVISOR}");
			self.drift_divisor = DEFAULT_DRIFT_DIVISOR;
		}
	}

	pub fn drift_divisor(&self) -> f64 {
		self.drift_divisor
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Viewport size seen by the most recent tick (or creation).
	pub fn viewport(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Advance one tick, taking lateral wind from the horizontal key axis.
	pub fn step(&mut self, width: f64, height: f64, input: &KeyState) {
		self.advance(width, height, f64::from(input.axis(Axis::Horizontal)));
	}

	/// Advance one tick with an explicit horizontal wind in `[-1, 1]`.
	///
	/// Per particle: wrap if out of bounds, push velocity by the wind scaled by
	/// radius, then add velocity to position.
	pub fn advance(&mut self, width: f64, height: f64, wind: f64) {
		let (width, height) = (extent(width), extent(height));
		if (width, height) != (self.width, self.height) {
			debug!(
				"snowfall: viewport changed from {}x{} to {width}x{height}",
				self.width, self.height
			);
			self.width = width;
			self.height = height;
		}

		for p in self.particles.iter_mut() {
			if let Some(edge) = Reentry::classify(p, width, height) {
				p.position = edge.target(p.radius, width, height, &mut self.rng);
			}
			if wind != 0.0 {
				p.velocity = p.velocity + Vector2::new(wind * p.radius / self.drift_divisor, 0.0);
			}
			p.position = p.position + p.velocity;
		}
	}
}
