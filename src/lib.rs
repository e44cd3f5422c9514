//! particle-field: animated, theme-aware particle background for the web.
//!
//! This crate provides a WASM canvas component that renders a drifting
//! particle field with proximity links, throttled to a device-dependent frame
//! rate and restarted whenever the page theme changes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, ParticleEngine, ParticleFieldCanvas, ThemeMode};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load configuration overrides from a script element with id="particle-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] keys.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded configuration overrides");
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse configuration: {}", e);
			None
		}
	}
}

/// Theme declared by the host page on `<html data-theme="...">`.
fn document_theme() -> Option<ThemeMode> {
	let window: Window = web_sys::window()?;
	let root = window.document()?.document_element()?;
	ThemeMode::from_attribute(&root.get_attribute("data-theme")?)
}

/// Theme from the `prefers-color-scheme` media query, if the browser has one.
fn system_theme() -> Option<ThemeMode> {
	let window: Window = web_sys::window()?;
	let query = window.match_media("(prefers-color-scheme: dark)").ok()??;
	Some(if query.matches() {
		ThemeMode::Dark
	} else {
		ThemeMode::Light
	})
}

/// Main application component.
/// Renders the particle background with a theme toggle on top.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let initial_theme = config
		.theme
		.or_else(document_theme)
		.or_else(system_theme)
		.unwrap_or_default();
	let theme = RwSignal::new(initial_theme);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || theme.get().as_str() />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas theme=theme config=config />
		<main class="particle-field-overlay">
			<h1>"Particle Field"</h1>
			<button on:click=move |_| theme.update(|t| *t = t.toggled())>
				{move || format!("Switch to {} theme", theme.get().toggled().as_str())}
			</button>
		</main>
	}
}
