//! snowfall: an animated snow overlay for the browser.
//!
//! This crate provides a WASM-based canvas component that renders a fixed
//! budget of glowing snowflakes, wrapping them around the window edges and
//! letting the keyboard push them sideways.

use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::snowfall::{
	Color, KeyState, Particle, ParticleField, Renderer, SnowCanvas, SnowConfig, SnowStyle, Vector2,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("snowfall: logging initialized");
}

/// Parse snow settings from JSON text.
pub fn parse_config(json_text: &str) -> Result<SnowConfig, serde_json::Error> {
	serde_json::from_str::<SnowConfig>(json_text)
}

/// Load snow settings from a script element with id="snow-config".
/// Falls back to defaults when the element is absent or malformed.
pub fn load_config() -> SnowConfig {
	let Some(json_text) = config_script_text() else {
		return SnowConfig::default();
	};

	match parse_config(&json_text) {
		Ok(config) => {
			info!("snowfall: loaded config with {} flakes", config.count);
			config
		}
		Err(e) => {
			warn!("snowfall: failed to parse config: {}", e);
			SnowConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("snow-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Loads snow settings from the DOM and lays the snow over the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Snowfall" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div id="Home" class="snow-home">
			<SnowCanvas config=config_signal />
		</div>
	}
}
