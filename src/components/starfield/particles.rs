//! The fixed-size star pool.

use std::ops::Range;

use rand::Rng;

use super::stepper::MAX_DEPTH;

/// A single star in the virtual plane ahead of the viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
	/// Planar x, drawn over the surface width at seed or recycle time.
	pub x: f64,
	/// Planar y, drawn over the surface height at seed or recycle time.
	pub y: f64,
	/// Distance from the viewer, larger is farther away.
	pub z: f64,
	/// Depth lost per tick, fixed at creation.
	pub speed: f64,
}

/// Star records mutated in place every tick. The pool never grows or shrinks.
#[derive(Clone, Debug)]
pub struct StarPool {
	stars: Vec<Star>,
}

impl StarPool {
	/// Seed `count` stars uniformly over the surface with a random depth and speed.
	pub fn seed<R: Rng>(
		count: usize,
		width: f64,
		height: f64,
		speed: Range<f64>,
		rng: &mut R,
	) -> Self {
		let span = speed.end - speed.start;
		let stars = (0..count)
			.map(|_| Star {
				x: rng.r#gen::<f64>() * width,
				y: rng.r#gen::<f64>() * height,
				z: rng.r#gen::<f64>() * MAX_DEPTH,
				speed: speed.start + rng.r#gen::<f64>() * span,
			})
			.collect();

		Self { stars }
	}

	/// Number of stars, fixed at seeding.
	pub fn len(&self) -> usize {
		self.stars.len()
	}

	/// True only for a pool seeded with zero stars.
	pub fn is_empty(&self) -> bool {
		self.stars.is_empty()
	}

	/// Stars in pool order.
	pub fn stars(&self) -> &[Star] {
		&self.stars
	}

	/// Mutable access for stepping in place.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Star> {
		self.stars.iter_mut()
	}

	#[cfg(test)]
	pub(crate) fn from_stars(stars: Vec<Star>) -> Self {
		Self { stars }
	}
}
