//! Visual styling for the snow overlay.
//!
//! Provides the CSS-backed [`Color`] type and the [`SnowStyle`] applied when
//! painting snowflakes.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::WHITE
	}
}

/// Returned when a string is not a color this crate understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl fmt::Display for InvalidColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid color: {:?}", self.0)
	}
}

impl std::error::Error for InvalidColor {}

/// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and a few
/// named colors.
impl FromStr for Color {
	type Err = InvalidColor;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		let invalid = || InvalidColor(s.to_string());

		if let Some(hex) = trimmed.strip_prefix('#') {
			if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
				return Err(invalid());
			}
			let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
			return match hex.len() {
				3 => {
					let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
					Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
				}
				6 => Ok(Color::rgb(
					channel(&hex[0..2])?,
					channel(&hex[2..4])?,
					channel(&hex[4..6])?,
				)),
				_ => Err(invalid()),
			};
		}

		if let Some(body) = trimmed
			.strip_prefix("rgba(")
			.or_else(|| trimmed.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
		{
			let parts: Vec<&str> = body.split(',').map(str::trim).collect();
			let byte = |i: usize| -> Result<u8, InvalidColor> {
				parts
					.get(i)
					.and_then(|p| p.parse().ok())
					.ok_or_else(invalid)
			};
			let a = match parts.len() {
				3 => 1.0,
				4 => parts[3]
					.parse::<f64>()
					.ok()
					.filter(|a| (0.0..=1.0).contains(a))
					.ok_or_else(invalid)?,
				_ => return Err(invalid()),
			};
			return Ok(Color::rgba(byte(0)?, byte(1)?, byte(2)?, a));
		}

		match trimmed.to_ascii_lowercase().as_str() {
			"white" => Ok(Color::WHITE),
			"black" => Ok(Color::rgb(0, 0, 0)),
			"skyblue" => Ok(Color::rgb(135, 206, 235)),
			"transparent" => Ok(Color::rgba(0, 0, 0, 0.0)),
			_ => Err(invalid()),
		}
	}
}

impl TryFrom<String> for Color {
	type Error = InvalidColor;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// How snowflakes are painted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnowStyle {
	/// Fill color given to every new snowflake
	pub color: Color,
	/// Blur radius of the glow around each flake, in pixels
	pub glow_blur: f64,
	/// Painted by an explicit clear; `None` leaves the canvas transparent
	pub background: Option<Color>,
}

impl SnowStyle {
	/// White flakes with a soft glow on a transparent canvas.
	pub fn winter() -> Self {
		Self {
			color: Color::WHITE,
			glow_blur: 5.0,
			background: None,
		}
	}
}

impl Default for SnowStyle {
	fn default() -> Self {
		Self::winter()
	}
}
