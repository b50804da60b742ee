//! Leptos component wrapping the star field canvas.
//!
//! The canvas is started from an effect once its node ref is mounted and
//! stopped from `on_cleanup`. Running handles live in a thread-local registry
//! keyed by mount id, so the cleanup closure only captures a plain integer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use log::debug;
use web_sys::HtmlCanvasElement;

use super::theme::StarfieldConfig;
use super::web::{self, WebStarfield};

static NEXT_MOUNT_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
	static MOUNTED: RefCell<HashMap<u64, WebStarfield>> = RefCell::new(HashMap::new());
}

/// Full-window canvas painting the hyperspace star field.
///
/// The canvas tracks the window size; stars are seeded once and keep their
/// positions across resizes.
#[component]
pub fn StarfieldCanvas(
	/// Overrides for the default look; defaults when omitted.
	#[prop(optional)]
	config: Option<StarfieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mount_id = NEXT_MOUNT_ID.fetch_add(1, Ordering::Relaxed);
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if MOUNTED.with(|m| m.borrow().contains_key(&mount_id)) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(handle) = web::mount(canvas, config.clone()) {
			MOUNTED.with(|m| m.borrow_mut().insert(mount_id, handle));
		}
	});

	on_cleanup(move || {
		let handle = MOUNTED.with(|m| m.borrow_mut().remove(&mount_id));
		if let Some(handle) = handle {
			handle.stop();
			debug!("starfield: unmounted canvas {}", mount_id);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="star-field"
			style="position: fixed; inset: 0; display: block; z-index: 0; pointer-events: none;"
		/>
	}
}
