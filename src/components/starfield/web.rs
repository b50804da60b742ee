//! Browser implementations of the star field seams.
//!
//! `CanvasSurface` paints through `CanvasRenderingContext2d`, `AnimationFrames`
//! drives ticks with `requestAnimationFrame`, and `WindowViewport` listens for
//! window `resize` events.

use std::f64::consts::PI;

use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::platform::{FrameHandle, FrameScheduler, ListenerHandle, PaintError, Surface, Viewport};
use super::state::{self, StarfieldHandle};
use super::theme::{Color, StarfieldConfig};

/// A star field running in the browser.
pub type WebStarfield = StarfieldHandle<CanvasSurface, AnimationFrames, WindowViewport, SmallRng>;

fn js_message(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Canvas element plus its 2-D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// `None` when the canvas cannot hand out a 2-D context.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()??
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn set_size(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn fill_rect(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		color: Color,
	) -> Result<(), PaintError> {
		// Every frame opens with the fade, so a detached canvas is caught here.
		if !self.canvas.is_connected() {
			return Err(PaintError::Disposed);
		}
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(x, y, width, height);
		Ok(())
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), PaintError> {
		self.ctx.begin_path();
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx
			.arc(x, y, radius, 0.0, PI * 2.0)
			.map_err(|e| PaintError::Canvas {
				op: "arc",
				message: js_message(&e),
			})?;
		self.ctx.fill();
		Ok(())
	}

	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		line_width: f64,
		color: Color,
	) -> Result<(), PaintError> {
		self.ctx.begin_path();
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(line_width);
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
		Ok(())
	}
}

/// `requestAnimationFrame` scheduler holding the bound tick closure.
pub struct AnimationFrames {
	window: Window,
	callback: Option<Closure<dyn FnMut()>>,
}

impl AnimationFrames {
	/// Scheduler for `window`; bind a callback before requesting frames.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			callback: None,
		}
	}
}

impl FrameScheduler for AnimationFrames {
	fn bind(&mut self, callback: Box<dyn FnMut()>) {
		self.callback = Some(Closure::wrap(callback));
	}

	fn request_frame(&mut self) -> Result<FrameHandle, PaintError> {
		let Some(ref cb) = self.callback else {
			return Err(PaintError::Schedule("no frame callback bound".into()));
		};
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map(FrameHandle)
			.map_err(|e| PaintError::Schedule(js_message(&e)))
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if let Err(e) = self.window.cancel_animation_frame(handle.0) {
			warn!("starfield: cancelAnimationFrame failed: {}", js_message(&e));
		}
	}
}

/// Window size source and `resize` event registration.
pub struct WindowViewport {
	window: Window,
	listeners: Vec<(ListenerHandle, Closure<dyn FnMut()>)>,
	next_id: u32,
}

impl WindowViewport {
	/// Viewport tracking `window`.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			listeners: Vec::new(),
			next_id: 0,
		}
	}
}

impl Viewport for WindowViewport {
	fn inner_size(&self) -> Option<(f64, f64)> {
		Some((
			self.window.inner_width().ok()?.as_f64()?,
			self.window.inner_height().ok()?.as_f64()?,
		))
	}

	fn add_resize_listener(&mut self, callback: Box<dyn FnMut()>) -> Option<ListenerHandle> {
		let closure = Closure::wrap(callback);
		self.window
			.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
			.ok()?;
		self.next_id += 1;
		let handle = ListenerHandle(self.next_id);
		self.listeners.push((handle, closure));
		Some(handle)
	}

	fn remove_resize_listener(&mut self, handle: ListenerHandle) {
		let Some(pos) = self.listeners.iter().position(|(id, _)| *id == handle) else {
			return;
		};
		let (_, closure) = self.listeners.remove(pos);
		if let Err(e) = self
			.window
			.remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
		{
			warn!("starfield: removing resize listener failed: {}", js_message(&e));
		}
	}
}

/// Start a star field on `canvas`, sized to the window.
///
/// Returns `None` when there is no window or the canvas has no 2-D context.
pub fn mount(canvas: HtmlCanvasElement, config: StarfieldConfig) -> Option<WebStarfield> {
	let Some(window) = web_sys::window() else {
		warn!("starfield: no window, not starting");
		return None;
	};
	let Some(surface) = CanvasSurface::new(canvas) else {
		warn!("starfield: canvas has no 2d context, not starting");
		return None;
	};

	state::start(
		surface,
		AnimationFrames::new(window.clone()),
		WindowViewport::new(window),
		config,
		SmallRng::from_entropy(),
	)
}
