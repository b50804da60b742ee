//! Per-tick star motion and perspective projection.
//!
//! Each star moves toward the viewer by its speed. Its planar position is
//! scaled away from the surface center by `FOCAL_LENGTH / z`, so near stars
//! spread out fast while far stars barely move. A star that reaches the viewer
//! is recycled to maximum depth at a fresh random position.

use rand::Rng;

use super::particles::Star;

/// Depth assigned to recycled stars; seeded depths lie below it.
pub const MAX_DEPTH: f64 = 1000.0;

/// Distance from the eye to the projection plane.
pub const FOCAL_LENGTH: f64 = 1000.0;

/// Stars at or below this apparent size get no trail.
pub const TRAIL_THRESHOLD: f64 = 0.1;

/// Screen-space result of stepping one star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	/// Screen x of the star.
	pub x: f64,
	/// Screen y of the star.
	pub y: f64,
	/// Apparent size in `[0, 1)`, growing as the star approaches.
	pub size: f64,
	/// Start of the trail segment when the star is close enough to show one.
	pub trail: Option<(f64, f64)>,
}

/// Project a planar position at depth `z` onto the surface.
pub fn project(x: f64, y: f64, z: f64, width: f64, height: f64) -> (f64, f64) {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let scale = FOCAL_LENGTH / z;
	((x - cx) * scale + cx, (y - cy) * scale + cy)
}

/// `(MAX_DEPTH - z) / MAX_DEPTH`: 0 at full depth, approaching 1 at the viewer.
pub fn apparent_size(z: f64) -> f64 {
	(MAX_DEPTH - z) / MAX_DEPTH
}

/// Advance one star by a tick and project it onto a `width` x `height` surface.
pub fn step<R: Rng>(star: &mut Star, width: f64, height: f64, rng: &mut R) -> Projection {
	star.z -= star.speed;
	if star.z <= 0.0 {
		star.z = MAX_DEPTH;
		star.x = rng.r#gen::<f64>() * width;
		star.y = rng.r#gen::<f64>() * height;
	}

	let (x, y) = project(star.x, star.y, star.z, width, height);
	let size = apparent_size(star.z);

	// Previous point reuses the current x/y at last tick's depth.
	let trail = (size > TRAIL_THRESHOLD)
		.then(|| project(star.x, star.y, star.z + star.speed, width, height));

	Projection { x, y, size, trail }
}
