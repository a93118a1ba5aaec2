//! Snow overlay configuration, read from the page as JSON.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use super::particles::DEFAULT_DRIFT_DIVISOR;
use super::theme::SnowStyle;

/// Every field is optional in the JSON; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnowConfig {
	/// Number of snowflakes
	pub count: usize,
	/// Fixed seed for a reproducible snowfall; random when absent
	pub seed: Option<u64>,
	pub style: SnowStyle,
	/// Larger values make keyboard wind gentler
	pub drift_divisor: f64,
	/// Subtracted from the window width to get the viewport width
	pub margin_x: f64,
	/// Subtracted from the window height to get the viewport height
	pub margin_y: f64,
	/// Wipe the canvas before drawing each frame
	pub clear_each_frame: bool,
	/// Let the arrow keys / WASD push the snow sideways
	pub wind: bool,
}

impl SnowConfig {
	/// Viewport for a window of the given inner size.
	pub fn viewport(&self, window_width: f64, window_height: f64) -> (f64, f64) {
		(
			(window_width - self.margin_x).max(0.0),
			(window_height - self.margin_y).max(0.0),
		)
	}

	/// Random source for the field: seeded when `seed` is set.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		}
	}
}

impl Default for SnowConfig {
	fn default() -> Self {
		Self {
			count: 20,
			seed: None,
			style: SnowStyle::default(),
			drift_divisor: DEFAULT_DRIFT_DIVISOR,
			margin_x: 17.0,
			margin_y: 4.0,
			clear_each_frame: false,
			wind: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::snowfall::theme::Color;

	#[test]
	fn empty_object_is_default() {
		let config: SnowConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, SnowConfig::default());
		assert_eq!(config.count, 20);
		assert_eq!(config.drift_divisor, 500.0);
	}

	#[test]
	fn partial_config_keeps_other_defaults() {
		let config: SnowConfig = serde_json::from_str(
			r##"{ "count": 120, "seed": 7, "style": { "color": "#e0f0ff" }, "wind": false }"##,
		)
		.unwrap();
		assert_eq!(config.count, 120);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.style.color, Color::rgb(0xe0, 0xf0, 0xff));
		assert_eq!(config.style.glow_blur, 5.0);
		assert!(!config.wind);
		assert_eq!(config.margin_x, 17.0);
	}

	#[test]
	fn background_color_parses() {
		let config: SnowConfig =
			serde_json::from_str(r#"{ "style": { "background": "skyblue" }, "clear_each_frame": true }"#)
				.unwrap();
		assert_eq!(config.style.background, Some(Color::rgb(135, 206, 235)));
		assert!(config.clear_each_frame);
	}

	#[test]
	fn invalid_color_is_rejected() {
		let result = serde_json::from_str::<SnowConfig>(r#"{ "style": { "color": "snowy" } }"#);
		assert!(result.is_err());
	}

	#[test]
	fn negative_count_is_rejected() {
		assert!(serde_json::from_str::<SnowConfig>(r#"{ "count": -1 }"#).is_err());
	}

	#[test]
	fn seeded_config_gives_repeatable_rng() {
		use rand::Rng;

		let config = SnowConfig {
			seed: Some(99),
			..SnowConfig::default()
		};
		let (mut a, mut b) = (config.rng(), config.rng());
		for _ in 0..8 {
			assert_eq!(a.gen_range(0..1_000_000), b.gen_range(0..1_000_000));
		}
	}

	#[test]
	fn viewport_subtracts_margins() {
		let config = SnowConfig::default();
		assert_eq!(config.viewport(1280.0, 720.0), (1263.0, 716.0));
		assert_eq!(config.viewport(10.0, 2.0), (0.0, 0.0));
	}
}
