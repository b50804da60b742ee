//! Visual configuration for the star field.
//!
//! Defaults reproduce the hyperspace look: 800 stars, a 10% black fade per
//! frame, white star cores and amber trails. Pages can override any field by
//! embedding JSON in a `<script id="starfield-config">` element.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`, opaque when omitted from JSON.
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
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

	/// Same channels, different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string. Only an alpha of exactly 1.0 collapses to hex, so
	/// near-opaque stars keep their fractional opacity.
	pub fn to_css(self) -> String {
		if self.a == 1.0 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Rejected configuration overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The JSON could not be parsed into a config.
	#[error("invalid star field config JSON: {0}")]
	Parse(#[from] serde_json::Error),
	/// `star_count` was zero.
	#[error("star_count must be at least 1")]
	EmptyPool,
	/// Speeds were non-positive or reversed.
	#[error("speed range {min}..{max} must be positive and non-decreasing")]
	SpeedRange {
		/// Configured `speed_min`.
		min: f64,
		/// Configured `speed_max`.
		max: f64,
	},
	/// Fade opacity outside `(0, 1]`.
	#[error("fade_alpha {0} must lie in (0, 1]")]
	FadeAlpha(f64),
	/// A size or opacity multiplier was negative or NaN.
	#[error("{field} {value} must be non-negative")]
	NegativeScale {
		/// Name of the offending field.
		field: &'static str,
		/// Rejected value.
		value: f64,
	},
}

/// Tunables for seeding and painting the star field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Fixed pool size for the lifetime of one mount.
	pub star_count: usize,
	/// Lower bound (inclusive) of the per-tick depth decrement.
	pub speed_min: f64,
	/// Upper bound (exclusive) of the per-tick depth decrement.
	pub speed_max: f64,
	/// Opacity of the rect painted over the previous frame.
	pub fade_alpha: f64,
	/// Color of the per-frame fade rect.
	pub background: Color,
	/// Star core color; opacity comes from apparent size.
	pub star_color: Color,
	/// Trail color; opacity comes from apparent size.
	pub trail_color: Color,
	/// Trail opacity is `size * trail_alpha_scale`.
	pub trail_alpha_scale: f64,
	/// Star radius is `size * star_radius_scale`.
	pub star_radius_scale: f64,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			star_count: 800,
			speed_min: 0.5,
			speed_max: 2.5,
			fade_alpha: 0.1,
			background: Color::rgb(0, 0, 0),
			star_color: Color::rgb(255, 255, 255),
			trail_color: Color::rgb(242, 181, 22),
			trail_alpha_scale: 0.5,
			star_radius_scale: 2.0,
		}
	}
}

impl StarfieldConfig {
	/// Parse overrides on top of the defaults and validate the result.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reject values the renderer cannot paint with.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.star_count == 0 {
			return Err(ConfigError::EmptyPool);
		}
		if !(self.speed_min > 0.0 && self.speed_min <= self.speed_max) {
			return Err(ConfigError::SpeedRange {
				min: self.speed_min,
				max: self.speed_max,
			});
		}
		if !(self.fade_alpha > 0.0 && self.fade_alpha <= 1.0) {
			return Err(ConfigError::FadeAlpha(self.fade_alpha));
		}
		for (field, value) in [
			("star_radius_scale", self.star_radius_scale),
			("trail_alpha_scale", self.trail_alpha_scale),
		] {
			// A negative arc radius makes the canvas throw on the first frame.
			if value.is_nan() || value < 0.0 {
				return Err(ConfigError::NegativeScale { field, value });
			}
		}
		Ok(())
	}
}
