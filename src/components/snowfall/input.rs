//! Keyboard state owned by the host loop.
//!
//! Event handlers record which keys are held; the simulation reads the
//! resulting axis values once per tick.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const KEY_LEFT: u32 = 37;
const KEY_UP: u32 = 38;
const KEY_RIGHT: u32 = 39;
const KEY_DOWN: u32 = 40;
const KEY_A: u32 = 65;
const KEY_D: u32 = 68;
const KEY_S: u32 = 83;
const KEY_W: u32 = 87;

/// A directional input axis driven by the arrow keys or WASD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	Horizontal,
	Vertical,
}

/// Returned when parsing an axis name other than `Horizontal` or `Vertical`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAxis(pub String);

impl fmt::Display for UnknownAxis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown axis {:?}", self.0)
	}
}

impl std::error::Error for UnknownAxis {}

impl FromStr for Axis {
	type Err = UnknownAxis;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Horizontal" => Ok(Axis::Horizontal),
			"Vertical" => Ok(Axis::Vertical),
			other => Err(UnknownAxis(other.to_string())),
		}
	}
}

/// The set of currently held key codes.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
	down: HashSet<u32>,
}

impl KeyState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a key as held. Repeated presses are idempotent.
	pub fn press(&mut self, key_code: u32) {
		self.down.insert(key_code);
	}

	/// Record a key as no longer held.
	pub fn release(&mut self, key_code: u32) {
		self.down.remove(&key_code);
	}

	/// Whether the key is currently held.
	pub fn is_down(&self, key_code: u32) -> bool {
		self.down.contains(&key_code)
	}

	/// Forget every held key, e.g. when the window loses focus.
	pub fn clear(&mut self) {
		self.down.clear();
	}

	/// Returns -1, 0 or 1 for the given axis.
	///
	/// The negative direction wins when both directions are held.
	pub fn axis(&self, axis: Axis) -> i8 {
		let (negative, positive) = match axis {
			Axis::Horizontal => ([KEY_LEFT, KEY_A], [KEY_RIGHT, KEY_D]),
			Axis::Vertical => ([KEY_UP, KEY_W], [KEY_DOWN, KEY_S]),
		};

		if negative.iter().any(|k| self.is_down(*k)) {
			-1
		} else if positive.iter().any(|k| self.is_down(*k)) {
			1
		} else {
			0
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn idle_keys_give_zero() {
		let keys = KeyState::new();
		assert_eq!(keys.axis(Axis::Horizontal), 0);
		assert_eq!(keys.axis(Axis::Vertical), 0);
	}

	#[test]
	fn arrows_and_wasd_drive_horizontal() {
		let mut keys = KeyState::new();
		keys.press(KEY_LEFT);
		assert_eq!(keys.axis(Axis::Horizontal), -1);
		keys.release(KEY_LEFT);
		keys.press(KEY_D);
		assert_eq!(keys.axis(Axis::Horizontal), 1);
		keys.release(KEY_D);
		keys.press(KEY_A);
		assert_eq!(keys.axis(Axis::Horizontal), -1);
		assert_eq!(keys.axis(Axis::Vertical), 0);
	}

	#[test]
	fn arrows_and_wasd_drive_vertical() {
		let mut keys = KeyState::new();
		keys.press(KEY_W);
		assert_eq!(keys.axis(Axis::Vertical), -1);
		keys.clear();
		keys.press(KEY_DOWN);
		assert_eq!(keys.axis(Axis::Vertical), 1);
		keys.clear();
		keys.press(KEY_S);
		assert_eq!(keys.axis(Axis::Vertical), 1);
	}

	#[test]
	fn negative_direction_wins_when_both_held() {
		let mut keys = KeyState::new();
		keys.press(KEY_RIGHT);
		keys.press(KEY_LEFT);
		assert_eq!(keys.axis(Axis::Horizontal), -1);
	}

	#[test]
	fn releasing_unheld_key_is_harmless() {
		let mut keys = KeyState::new();
		keys.release(KEY_UP);
		keys.press(KEY_UP);
		keys.press(KEY_UP);
		keys.release(KEY_UP);
		assert!(!keys.is_down(KEY_UP));
	}

	#[test]
	fn clear_releases_everything() {
		let mut keys = KeyState::new();
		keys.press(KEY_RIGHT);
		keys.press(KEY_S);
		keys.clear();
		assert_eq!(keys.axis(Axis::Horizontal), 0);
		assert_eq!(keys.axis(Axis::Vertical), 0);
	}

	#[test]
	fn axis_names_parse() {
		assert_eq!("Horizontal".parse::<Axis>(), Ok(Axis::Horizontal));
		assert_eq!("Vertical".parse::<Axis>(), Ok(Axis::Vertical));
		assert_eq!(
			"horizontal".parse::<Axis>(),
			Err(UnknownAxis("horizontal".to_string()))
		);
	}
}
