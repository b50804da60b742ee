//! hyperspace-starfield: animated star field background for the Prophecy Sunya
//! landing page.
//!
//! This crate provides a WASM canvas component that simulates stars rushing
//! toward the viewer, with perspective projection, fading streaks and amber
//! motion trails.

use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{StarfieldCanvas, StarfieldConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load config overrides from a script element with id="starfield-config".
/// Missing element means defaults; unparsable or invalid JSON is logged and
/// ignored.
fn load_config() -> StarfieldConfig {
	let Some(json_text) = config_script_text() else {
		return StarfieldConfig::default();
	};

	match StarfieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("starfield: loaded config overrides ({} stars)", config.star_count);
			config
		}
		Err(e) => {
			warn!("starfield: ignoring config overrides: {}", e);
			StarfieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Hosts the star field canvas behind the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let (loaded, set_loaded) = signal(false);
	Effect::new(move |_| set_loaded.set(true));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Prophecy Sunya" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta
			name="description"
			content="Pioneering the future of decentralized finance with quantum-resistant cryptography, institutional-grade security protocols, and cross-chain interoperability."
		/>

		<main class="container" class:loaded=move || loaded.get()>
			<StarfieldCanvas config=config />
			<div class="hero-overlay">
				<h1>"Prophecy Sunya"</h1>
			</div>
		</main>
	}
}
