//! Frame painting for the star field.
//!
//! Frames are never fully cleared. A translucent rect dims the previous frame
//! so stars leave fading streaks, then every star is stepped and painted in
//! pool order:
//! 1. Fade rect over the whole surface
//! 2. Star core (filled circle, alpha = size)
//! 3. Amber trail segment for stars above the trail threshold

use rand::Rng;

use super::particles::StarPool;
use super::platform::{PaintError, Surface};
use super::stepper::{self, Projection};
use super::theme::StarfieldConfig;

/// Step every star and paint one frame.
///
/// The first failed paint call aborts the frame; stars after it are left
/// untouched.
pub fn render_frame<S, R>(
	surface: &mut S,
	pool: &mut StarPool,
	config: &StarfieldConfig,
	rng: &mut R,
) -> Result<(), PaintError>
where
	S: Surface + ?Sized,
	R: Rng,
{
	let (width, height) = surface.size();

	draw_fade(surface, width, height, config)?;

	for star in pool.iter_mut() {
		let projection = stepper::step(star, width, height, rng);
		draw_star(surface, &projection, config)?;
	}

	Ok(())
}

fn draw_fade<S: Surface + ?Sized>(
	surface: &mut S,
	width: f64,
	height: f64,
	config: &StarfieldConfig,
) -> Result<(), PaintError> {
	let color = config.background.with_alpha(config.fade_alpha);
	surface.fill_rect(0.0, 0.0, width, height, color)
}

fn draw_star<S: Surface + ?Sized>(
	surface: &mut S,
	p: &Projection,
	config: &StarfieldConfig,
) -> Result<(), PaintError> {
	surface.fill_circle(
		p.x,
		p.y,
		p.size * config.star_radius_scale,
		config.star_color.with_alpha(p.size),
	)?;

	if let Some(from) = p.trail {
		surface.stroke_line(
			from,
			(p.x, p.y),
			p.size,
			config.trail_color.with_alpha(p.size * config.trail_alpha_scale),
		)?;
	}

	Ok(())
}
