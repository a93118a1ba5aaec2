//! Two-dimensional value vector used for particle positions and velocities.

use std::fmt;
use std::ops::{Add, Mul};

/// An immutable 2D vector. Arithmetic always yields a new value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
	pub x: f64,
	pub y: f64,
}

impl Vector2 {
	/// The origin.
	pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Vector2 {
	type Output = Vector2;

	fn add(self, other: Vector2) -> Vector2 {
		Vector2::new(self.x + other.x, self.y + other.y)
	}
}

impl Mul<f64> for Vector2 {
	type Output = Vector2;

	fn mul(self, n: f64) -> Vector2 {
		Vector2::new(self.x * n, self.y * n)
	}
}

impl fmt::Display for Vector2 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}, {}>", self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_produces_new_value() {
		let a = Vector2::new(1.0, 2.0);
		let b = Vector2::new(0.5, -4.0);
		let c = a + b;
		assert_eq!(c, Vector2::new(1.5, -2.0));
		assert_eq!(a, Vector2::new(1.0, 2.0));
	}

	#[test]
	fn scalar_multiply() {
		assert_eq!(Vector2::new(3.0, -1.5) * 2.0, Vector2::new(6.0, -3.0));
		assert_eq!(Vector2::new(3.0, -1.5) * 0.0, Vector2::ZERO);
	}

	#[test]
	fn display_uses_angle_brackets() {
		assert_eq!(Vector2::new(1.0, 2.5).to_string(), "<1, 2.5>");
	}
}
