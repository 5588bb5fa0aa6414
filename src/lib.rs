//! bubble-backdrop: animated rising-bubble background for a portfolio page.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! slowly rising bubbles, releases bursts of small bubbles on click, and keeps
//! the number of live bubbles bounded.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::animated_background::{
	AnimatedBackground, BackgroundConfig, BackgroundEngine, ConfigError, Particle, ParticleId,
	Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("bubble-backdrop: logging initialized");
}

/// Load background settings from a script element with id="background-config".
/// Expected format: JSON matching [`BackgroundConfig`]; missing fields take defaults.
fn load_config() -> Option<BackgroundConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("background-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match BackgroundConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"bubble-backdrop: loaded config (capacity {}, every {}ms, theme {})",
				config.capacity, config.interval_ms, config.theme
			);
			Some(config)
		}
		Err(e) => {
			warn!("bubble-backdrop: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads settings from the DOM and renders the background behind the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="page">
			<AnimatedBackground config=config />
			<div class="background-overlay">
				<p class="subtitle">"Click anywhere to release bubbles."</p>
			</div>
		</div>
	}
}
