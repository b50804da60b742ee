//! Seams between the star field and its host.
//!
//! The simulator only ever talks to a [`Surface`] it paints into, a
//! [`FrameScheduler`] that drives the tick loop, and a [`Viewport`] that reports
//! window size changes. The browser implementations live in `web`; tests use
//! in-memory fakes.

use super::theme::Color;

/// Failure while painting a frame or scheduling the next one.
#[derive(Debug, thiserror::Error)]
pub enum PaintError {
	/// The 2-D context rejected a drawing call.
	#[error("canvas rejected {op}: {message}")]
	Canvas {
		/// Name of the failing call.
		op: &'static str,
		/// Host error text.
		message: String,
	},
	/// The surface was torn down while the loop still referenced it.
	#[error("drawing surface is no longer attached")]
	Disposed,
	/// The host refused to schedule another frame.
	#[error("frame scheduling failed: {0}")]
	Schedule(String),
}

/// Pixel-addressable drawing surface with a 2-D paint context.
pub trait Surface {
	/// Current pixel dimensions as `(width, height)`.
	fn size(&self) -> (f64, f64);

	/// Resize the pixel buffer. Hosts clear the buffer as a side effect.
	fn set_size(&mut self, width: f64, height: f64);

	/// Fill an axis-aligned rect with `color`.
	fn fill_rect(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		color: Color,
	) -> Result<(), PaintError>;

	/// Fill a circle centered on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color)
	-> Result<(), PaintError>;

	/// Stroke a straight segment from `from` to `to`.
	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		line_width: f64,
		color: Color,
	) -> Result<(), PaintError>;
}

/// Opaque id of a requested frame, usable to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(
	/// Host request id.
	pub i32,
);

/// Opaque id of a registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerHandle(
	/// Registration id.
	pub u32,
);

/// Display-refresh driven scheduler.
///
/// A single callback is bound up front; each `request_frame` arranges for it
/// to run once on the next refresh.
pub trait FrameScheduler {
	/// Install the callback every later frame runs.
	fn bind(&mut self, callback: Box<dyn FnMut()>);
	/// Run the bound callback once on the next refresh.
	fn request_frame(&mut self) -> Result<FrameHandle, PaintError>;
	/// Drop a requested frame before it runs.
	fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The window hosting the surface.
pub trait Viewport {
	/// Inner window size, or `None` when the host cannot report one.
	fn inner_size(&self) -> Option<(f64, f64)>;
	/// Call `callback` on every window resize. `None` if the host refuses.
	fn add_resize_listener(&mut self, callback: Box<dyn FnMut()>) -> Option<ListenerHandle>;
	/// Stop delivering resize events to a listener.
	fn remove_resize_listener(&mut self, handle: ListenerHandle);
}
