//! Leptos component hosting the snow overlay.
//!
//! The component owns the frame loop. Each `requestAnimationFrame` callback
//! reads the viewport, resizes the canvas, steps the particle field and draws
//! it, then requests the next frame. Keyboard listeners on the window update a
//! shared [`KeyState`] that the field reads for wind. Unmounting removes the
//! listeners and cancels the pending frame.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};

use super::config::SnowConfig;
use super::input::KeyState;
use super::particles::ParticleField;
use super::render::{CanvasSurface, Renderer};

/// Everything one frame needs: simulation, renderer and the canvas.
struct SnowScene {
	field: ParticleField,
	renderer: Renderer,
	surface: CanvasSurface,
	config: SnowConfig,
}

impl SnowScene {
	fn tick(&mut self, window: &Window, keys: &KeyState) {
		let (ww, wh) = inner_size(window);
		let (w, h) = self.config.viewport(ww, wh);

		self.renderer.resize(&mut self.surface, w, h);
		if self.config.wind {
			self.field.step(w, h, keys);
		} else {
			self.field.advance(w, h, 0.0);
		}
		self.renderer.draw(&mut self.surface, self.field.particles());
	}
}

/// Window listeners registered while the component is mounted.
struct KeyListeners {
	down: Closure<dyn FnMut(KeyboardEvent)>,
	up: Closure<dyn FnMut(KeyboardEvent)>,
	blur: Closure<dyn FnMut()>,
}

impl KeyListeners {
	fn events(&self) -> [(&'static str, &JsValue); 3] {
		[
			("keydown", self.down.as_ref()),
			("keyup", self.up.as_ref()),
			("blur", self.blur.as_ref()),
		]
	}

	fn detach(&self, window: &Window) {
		for (event, callback) in self.events() {
			let _ = window.remove_event_listener_with_callback(event, callback.unchecked_ref());
		}
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser handles owned by one mounted [`SnowCanvas`].
struct SnowRun {
	window: Window,
	listeners: Option<KeyListeners>,
	animate: FrameCallback,
	frame: Rc<Cell<Option<i32>>>,
}

impl SnowRun {
	fn stop(self) {
		if let Some(handle) = self.frame.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		// With the callback gone the loop cannot reschedule itself.
		self.animate.borrow_mut().take();
		if let Some(listeners) = self.listeners {
			listeners.detach(&self.window);
		}
	}
}

// Cleanup callbacks must be `Send`, so JS handles are parked here by id.
thread_local! {
	static RUNS: RefCell<HashMap<usize, SnowRun>> = RefCell::new(HashMap::new());
}

static NEXT_RUN: AtomicUsize = AtomicUsize::new(0);

fn stop_run(id: usize) {
	if let Some(run) = RUNS.with(|runs| runs.borrow_mut().remove(&id)) {
		run.stop();
		info!("snowfall: stopped");
	}
}

fn inner_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

fn install_key_listeners(window: &Window, keys: &Rc<RefCell<KeyState>>) -> KeyListeners {
	let keys_down = keys.clone();
	let down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
		keys_down.borrow_mut().press(ev.key_code());
	});
	let keys_up = keys.clone();
	let up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
		keys_up.borrow_mut().release(ev.key_code());
	});
	// Key-up events are lost while another window has focus.
	let keys_blur = keys.clone();
	let blur = Closure::<dyn FnMut()>::new(move || {
		keys_blur.borrow_mut().clear();
	});

	let listeners = KeyListeners { down, up, blur };
	for (event, callback) in listeners.events() {
		if let Err(e) = window.add_event_listener_with_callback(event, callback.unchecked_ref()) {
			warn!("snowfall: failed to listen for {event}: {e:?}");
		}
	}
	listeners
}

/// Full-window canvas with falling snow.
///
/// The canvas tracks the window size (minus the configured margins) on every
/// frame, and arrow keys or WASD blow the flakes sideways unless
/// `config.wind` is off.
#[component]
pub fn SnowCanvas(#[prop(into)] config: Signal<SnowConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let run_id = NEXT_RUN.fetch_add(1, Ordering::Relaxed);
	let scene: Rc<RefCell<Option<SnowScene>>> = Rc::new(RefCell::new(None));
	let keys: Rc<RefCell<KeyState>> = Rc::new(RefCell::new(KeyState::new()));

	on_cleanup(move || stop_run(run_id));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if scene.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("snowfall: no window, snow disabled");
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("snowfall: canvas has no 2d context, snow disabled");
			return;
		};

		let config = config.get_untracked();
		let (ww, wh) = inner_size(&window);
		let (w, h) = config.viewport(ww, wh);

		let mut field = ParticleField::create(w, h, config.count, config.style.color, config.rng());
		field.set_drift_divisor(config.drift_divisor);
		let renderer = Renderer {
			clear_each_frame: config.clear_each_frame,
			..Renderer::new(&config.style)
		};
		let mut surface = CanvasSurface::new(canvas, ctx, config.style.background);
		renderer.resize(&mut surface, w, h);

		let listeners = config.wind.then(|| install_key_listeners(&window, &keys));
		info!(
			"snowfall: starting with {} flakes (wind {})",
			config.count,
			if config.wind { "on" } else { "off" }
		);

		*scene.borrow_mut() = Some(SnowScene {
			field,
			renderer,
			surface,
			config,
		});

		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let (scene_anim, keys_anim, animate_inner, frame_inner) =
			(scene.clone(), keys.clone(), animate.clone(), frame.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			frame_inner.set(None);
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref mut s) = *scene_anim.borrow_mut() {
				s.tick(&window, &keys_anim.borrow());
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				frame_inner.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		RUNS.with(|runs| {
			runs.borrow_mut().insert(
				run_id,
				SnowRun {
					window,
					listeners,
					animate,
					frame,
				},
			)
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="snowCanvas"
			class="snow-canvas"
			style="position: fixed; top: 0; left: 0; pointer-events: none;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use wasm_bindgen_test::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn active_runs() -> usize {
		RUNS.with(|runs| runs.borrow().len())
	}

	#[wasm_bindgen_test]
	async fn unmount_stops_loop_and_listeners() {
		let document = web_sys::window().unwrap().document().unwrap();
		let host: web_sys::HtmlElement = document.create_element("div").unwrap().unchecked_into();
		document.body().unwrap().append_child(&host).unwrap();

		let before = active_runs();
		let handle = leptos::mount::mount_to(host, || {
			view! { <SnowCanvas config=Signal::derive(SnowConfig::default) /> }
		});
		leptos::task::tick().await;
		assert_eq!(active_runs(), before + 1);

		drop(handle);
		assert_eq!(active_runs(), before);
	}
}
