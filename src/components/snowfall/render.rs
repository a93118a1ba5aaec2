//! Drawing the particle field.
//!
//! [`Renderer`] decides what to paint; a [`Surface`] knows how. The browser
//! build paints onto a 2D canvas through [`CanvasSurface`].

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::particles::Particle;
use super::theme::{Color, SnowStyle};
use super::vector::Vector2;

/// Soft halo drawn around a filled shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	pub blur: f64,
	pub color: Color,
}

/// Something snowflakes can be painted on.
pub trait Surface {
	/// Match the drawing area to the viewport, in whole pixels.
	fn set_size(&mut self, width: u32, height: u32);

	/// Erase everything painted so far.
	fn clear(&mut self);

	fn fill_circle(&mut self, center: Vector2, radius: f64, fill: Color, glow: Glow);
}

/// Paints particles as glowing filled circles.
#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
	pub glow_blur: f64,
	/// Clear before each draw.
	///
	/// Off by default: resizing the canvas every frame already wipes it, and
	/// overlapping glow from earlier paints is part of the look.
	pub clear_each_frame: bool,
}

impl Renderer {
	/// Renderer using the style's glow; never clears unless asked to.
	pub fn new(style: &SnowStyle) -> Self {
		Self {
			glow_blur: style.glow_blur,
			clear_each_frame: false,
		}
	}

	/// Size the surface to the viewport. Call before every frame's draw since
	/// the window may have changed.
	pub fn resize<S: Surface>(&self, surface: &mut S, width: f64, height: f64) {
		surface.set_size(pixels(width), pixels(height));
	}

	/// Paint each particle as a filled circle of its own color, with a glow
	/// of the same color.
	pub fn draw<S: Surface>(&self, surface: &mut S, particles: &[Particle]) {
		if self.clear_each_frame {
			surface.clear();
		}

		for p in particles {
			let glow = Glow {
				blur: self.glow_blur,
				color: p.color,
			};
			surface.fill_circle(p.position, p.radius, p.color, glow);
		}
	}
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new(&SnowStyle::default())
	}
}

/// Canvas dimensions are whole, non-negative pixels.
fn pixels(extent: f64) -> u32 {
	if extent.is_finite() && extent > 0.0 {
		extent.min(u32::MAX as f64) as u32
	} else {
		0
	}
}

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	background: Option<Color>,
}

impl CanvasSurface {
	pub fn new(
		canvas: HtmlCanvasElement,
		ctx: CanvasRenderingContext2d,
		background: Option<Color>,
	) -> Self {
		Self {
			canvas,
			ctx,
			background,
		}
	}
}

impl Surface for CanvasSurface {
	fn set_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn clear(&mut self) {
		let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
		self.ctx.clear_rect(0.0, 0.0, w, h);
		if let Some(bg) = self.background {
			self.ctx.set_shadow_blur(0.0);
			self.ctx.set_fill_style_str(&bg.to_css());
			self.ctx.fill_rect(0.0, 0.0, w, h);
		}
	}

	fn fill_circle(&mut self, center: Vector2, radius: f64, fill: Color, glow: Glow) {
		self.ctx.set_shadow_blur(glow.blur);
		self.ctx.set_shadow_color(&glow.color.to_css());
		self.ctx.set_fill_style_str(&fill.to_css());

		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0);
		self.ctx.close_path();
		self.ctx.fill();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, PartialEq)]
	enum Call {
		SetSize(u32, u32),
		Clear,
		FillCircle(Vector2, f64, Color, Glow),
	}

	#[derive(Default)]
	struct Recorder {
		calls: Vec<Call>,
	}

	impl Surface for Recorder {
		fn set_size(&mut self, width: u32, height: u32) {
			self.calls.push(Call::SetSize(width, height));
		}

		fn clear(&mut self) {
			self.calls.push(Call::Clear);
		}

		fn fill_circle(&mut self, center: Vector2, radius: f64, fill: Color, glow: Glow) {
			self.calls.push(Call::FillCircle(center, radius, fill, glow));
		}
	}

	fn flake(x: f64, y: f64, radius: f64, color: Color) -> Particle {
		Particle {
			position: Vector2::new(x, y),
			velocity: Vector2::new(0.0, 3.0),
			radius,
			color,
		}
	}

	#[test]
	fn draws_each_particle_with_matching_glow() {
		let blue = Color::rgb(0, 0, 255);
		let particles = [
			flake(10.0, 20.0, 2.0, Color::WHITE),
			flake(30.0, 40.0, 5.5, blue),
		];
		let mut surface = Recorder::default();
		Renderer::default().draw(&mut surface, &particles);

		assert_eq!(
			surface.calls,
			vec![
				Call::FillCircle(
					Vector2::new(10.0, 20.0),
					2.0,
					Color::WHITE,
					Glow { blur: 5.0, color: Color::WHITE },
				),
				Call::FillCircle(
					Vector2::new(30.0, 40.0),
					5.5,
					blue,
					Glow { blur: 5.0, color: blue },
				),
			]
		);
	}

	#[test]
	fn default_draw_leaves_previous_frame() {
		let mut surface = Recorder::default();
		Renderer::default().draw(&mut surface, &[flake(1.0, 1.0, 1.0, Color::WHITE)]);
		assert!(!surface.calls.contains(&Call::Clear));
	}

	#[test]
	fn clearing_renderer_clears_first() {
		let renderer = Renderer {
			clear_each_frame: true,
			..Renderer::default()
		};
		let mut surface = Recorder::default();
		renderer.draw(&mut surface, &[flake(1.0, 1.0, 1.0, Color::WHITE)]);
		assert_eq!(surface.calls.first(), Some(&Call::Clear));
		assert_eq!(surface.calls.len(), 2);
	}

	#[test]
	fn empty_field_draws_nothing() {
		let mut surface = Recorder::default();
		Renderer::default().draw(&mut surface, &[]);
		assert!(surface.calls.is_empty());
	}

	#[test]
	fn style_sets_glow_blur() {
		let style = SnowStyle {
			glow_blur: 12.0,
			..SnowStyle::default()
		};
		let mut surface = Recorder::default();
		Renderer::new(&style).draw(&mut surface, &[flake(0.0, 0.0, 3.0, Color::WHITE)]);
		match &surface.calls[0] {
			Call::FillCircle(_, _, _, glow) => assert_eq!(glow.blur, 12.0),
			other => panic!("unexpected call {other:?}"),
		}
	}

	#[test]
	fn resize_truncates_to_pixels() {
		let mut surface = Recorder::default();
		let renderer = Renderer::default();
		renderer.resize(&mut surface, 1263.7, 716.2);
		renderer.resize(&mut surface, -4.0, f64::NAN);
		assert_eq!(
			surface.calls,
			vec![Call::SetSize(1263, 716), Call::SetSize(0, 0)]
		);
	}
}
