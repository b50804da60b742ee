//! In-memory hosts for exercising the simulator without a browser.
//!
//! Every fake is a cheap handle over shared state so a test can keep one clone
//! while the simulator owns another.

use std::cell::RefCell;
use std::rc::Rc;

use super::platform::{FrameHandle, FrameScheduler, ListenerHandle, PaintError, Surface, Viewport};
use super::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintOp {
	Resize {
		width: f64,
		height: f64,
	},
	FillRect {
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		color: Color,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
	},
	Line {
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: Color,
	},
}

#[derive(Default)]
struct SurfaceLog {
	width: f64,
	height: f64,
	ops: Vec<PaintOp>,
	size_reads: usize,
	paints_left: Option<usize>,
	disposed: bool,
}

/// Surface that records every call instead of drawing.
#[derive(Clone, Default)]
pub struct RecordingSurface {
	log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		let surface = Self::default();
		{
			let mut log = surface.log.borrow_mut();
			log.width = width;
			log.height = height;
		}
		surface
	}

	pub fn ops(&self) -> Vec<PaintOp> {
		self.log.borrow().ops.clone()
	}

	/// Paint and resize calls plus size reads seen so far.
	pub fn calls(&self) -> usize {
		let log = self.log.borrow();
		log.ops.len() + log.size_reads
	}

	pub fn current_size(&self) -> (f64, f64) {
		let log = self.log.borrow();
		(log.width, log.height)
	}

	/// Let `n` more paint calls succeed, then fail the rest.
	pub fn fail_after(&self, n: usize) {
		self.log.borrow_mut().paints_left = Some(n);
	}

	/// Simulate the host tearing the surface down.
	pub fn dispose(&self) {
		self.log.borrow_mut().disposed = true;
	}

	fn paint(&self, op: PaintOp) -> Result<(), PaintError> {
		let mut log = self.log.borrow_mut();
		if log.disposed {
			return Err(PaintError::Disposed);
		}
		match &mut log.paints_left {
			Some(0) => {
				return Err(PaintError::Canvas {
					op: "paint",
					message: "injected failure".into(),
				});
			}
			Some(n) => *n -= 1,
			None => {}
		}
		log.ops.push(op);
		Ok(())
	}
}

impl Surface for RecordingSurface {
	fn size(&self) -> (f64, f64) {
		let mut log = self.log.borrow_mut();
		log.size_reads += 1;
		(log.width, log.height)
	}

	fn set_size(&mut self, width: f64, height: f64) {
		let mut log = self.log.borrow_mut();
		log.width = width;
		log.height = height;
		log.ops.push(PaintOp::Resize { width, height });
	}

	fn fill_rect(
		&mut self,
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		color: Color,
	) -> Result<(), PaintError> {
		self.paint(PaintOp::FillRect {
			x,
			y,
			width,
			height,
			color,
		})
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), PaintError> {
		self.paint(PaintOp::Circle { x, y, radius, color })
	}

	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		line_width: f64,
		color: Color,
	) -> Result<(), PaintError> {
		self.paint(PaintOp::Line {
			from,
			to,
			width: line_width,
			color,
		})
	}
}

#[derive(Default)]
struct SchedulerLog {
	callback: Option<Box<dyn FnMut()>>,
	pending: Option<FrameHandle>,
	next_id: i32,
	requests: usize,
	cancelled: Vec<FrameHandle>,
	refuse: bool,
}

/// Scheduler whose frames only fire when the test says so.
#[derive(Clone, Default)]
pub struct ManualScheduler {
	log: Rc<RefCell<SchedulerLog>>,
}

impl ManualScheduler {
	/// Run the pending frame, if any. Returns whether a frame ran.
	pub fn fire(&self) -> bool {
		if self.log.borrow_mut().pending.take().is_none() {
			return false;
		}
		self.invoke();
		true
	}

	/// Invoke the bound callback even though no frame is pending, as a stale
	/// host handle would.
	pub fn fire_stale(&self) {
		self.invoke();
	}

	pub fn is_pending(&self) -> bool {
		self.log.borrow().pending.is_some()
	}

	pub fn requests(&self) -> usize {
		self.log.borrow().requests
	}

	pub fn cancelled(&self) -> Vec<FrameHandle> {
		self.log.borrow().cancelled.clone()
	}

	/// Make every later `request_frame` fail.
	pub fn refuse_requests(&self) {
		self.log.borrow_mut().refuse = true;
	}

	fn invoke(&self) {
		let callback = self.log.borrow_mut().callback.take();
		if let Some(mut callback) = callback {
			callback();
			let mut log = self.log.borrow_mut();
			if log.callback.is_none() {
				log.callback = Some(callback);
			}
		}
	}
}

impl FrameScheduler for ManualScheduler {
	fn bind(&mut self, callback: Box<dyn FnMut()>) {
		self.log.borrow_mut().callback = Some(callback);
	}

	fn request_frame(&mut self) -> Result<FrameHandle, PaintError> {
		let mut log = self.log.borrow_mut();
		if log.refuse {
			return Err(PaintError::Schedule("refused".into()));
		}
		log.next_id += 1;
		log.requests += 1;
		let handle = FrameHandle(log.next_id);
		log.pending = Some(handle);
		Ok(handle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		let mut log = self.log.borrow_mut();
		if log.pending == Some(handle) {
			log.pending = None;
		}
		log.cancelled.push(handle);
	}
}

#[derive(Default)]
struct ViewportLog {
	size: Option<(f64, f64)>,
	listeners: Vec<(ListenerHandle, Box<dyn FnMut()>)>,
	removed: Vec<ListenerHandle>,
	next_id: u32,
}

/// Window stand-in with a settable inner size.
#[derive(Clone, Default)]
pub struct FakeViewport {
	log: Rc<RefCell<ViewportLog>>,
}

impl FakeViewport {
	pub fn new(width: f64, height: f64) -> Self {
		let viewport = Self::default();
		viewport.log.borrow_mut().size = Some((width, height));
		viewport
	}

	/// A host that cannot report a window size.
	pub fn unavailable() -> Self {
		Self::default()
	}

	/// Change the window size and dispatch a resize event to every listener.
	pub fn resize_to(&self, width: f64, height: f64) {
		let mut listeners = {
			let mut log = self.log.borrow_mut();
			log.size = Some((width, height));
			std::mem::take(&mut log.listeners)
		};
		for (_, callback) in listeners.iter_mut() {
			callback();
		}
		let mut log = self.log.borrow_mut();
		let removed = std::mem::take(&mut log.removed);
		listeners.retain(|(id, _)| !removed.contains(id));
		listeners.append(&mut log.listeners);
		log.listeners = listeners;
	}

	pub fn listener_count(&self) -> usize {
		self.log.borrow().listeners.len()
	}
}

impl Viewport for FakeViewport {
	fn inner_size(&self) -> Option<(f64, f64)> {
		self.log.borrow().size
	}

	fn add_resize_listener(&mut self, callback: Box<dyn FnMut()>) -> Option<ListenerHandle> {
		let mut log = self.log.borrow_mut();
		log.next_id += 1;
		let handle = ListenerHandle(log.next_id);
		log.listeners.push((handle, callback));
		Some(handle)
	}

	fn remove_resize_listener(&mut self, handle: ListenerHandle) {
		let mut log = self.log.borrow_mut();
		log.listeners.retain(|(id, _)| *id != handle);
		log.removed.push(handle);
	}
}
