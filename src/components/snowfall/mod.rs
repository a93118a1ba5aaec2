//! Animated snowfall overlay.
//!
//! A fixed number of snowflakes fall across a canvas sized to the window.
//! Flakes leaving the viewport re-enter from the opposite edge, and the arrow
//! keys (or A/D) blow them sideways, bigger flakes more than small ones.
//!
//! The simulation ([`ParticleField`]) and drawing ([`Renderer`]) are plain
//! Rust. [`SnowCanvas`] wires them to the browser's frame loop.
//!
//! # Example
//!
//! ```ignore
//! use snowfall::{SnowCanvas, SnowConfig};
//!
//! let config = SnowConfig { count: 80, ..SnowConfig::default() };
//! view! { <SnowCanvas config=config /> }
//! ```

mod component;
mod config;
mod input;
mod particles;
mod render;
pub mod theme;
mod vector;

pub use component::SnowCanvas;
pub use config::SnowConfig;
pub use input::{Axis, KeyState, UnknownAxis};
pub use particles::{DEFAULT_DRIFT_DIVISOR, Particle, ParticleField, Reentry};
pub use render::{CanvasSurface, Glow, Renderer, Surface};
pub use theme::{Color, SnowStyle};
pub use vector::Vector2;
