//! Star field state and the mount lifecycle around it.
//!
//! [`StarfieldState`] is the pool plus what a frame needs (config, RNG, frame
//! counter). [`start`] wraps it with the host seams and drives it: it sizes
//! the surface, seeds once, paints the first frame and hands back a
//! [`StarfieldHandle`]. From then on the scheduler runs one tick per display
//! refresh and resize events only touch the surface size.
//!
//! Host callbacks hold a `Weak` reference, so once the handle is gone a stale
//! callback finds nothing to run.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use rand::Rng;

use super::particles::{Star, StarPool};
use super::platform::{
	FrameHandle, FrameScheduler, ListenerHandle, PaintError, Surface, Viewport,
};
use super::render;
use super::theme::StarfieldConfig;

/// Whether the tick loop is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
	/// Before mount or after stop; callbacks do nothing.
	Stopped,
	/// Tick loop active.
	Running,
}

/// Seeded star pool plus everything needed to paint a frame.
pub struct StarfieldState<R> {
	pool: StarPool,
	config: StarfieldConfig,
	rng: R,
	frames: u64,
}

impl<R: Rng> StarfieldState<R> {
	/// Seed `config.star_count` stars over a `width` x `height` surface.
	pub fn new(config: StarfieldConfig, width: f64, height: f64, mut rng: R) -> Self {
		let pool = StarPool::seed(
			config.star_count,
			width,
			height,
			config.speed_min..config.speed_max,
			&mut rng,
		);
		Self {
			pool,
			config,
			rng,
			frames: 0,
		}
	}

	/// Step and paint one frame onto `surface`.
	pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), PaintError> {
		render::render_frame(surface, &mut self.pool, &self.config, &mut self.rng)?;
		self.frames += 1;
		Ok(())
	}

	/// The star pool.
	pub fn pool(&self) -> &StarPool {
		&self.pool
	}

	/// Frames painted so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}
}

struct Simulation<S: Surface, F: FrameScheduler, V: Viewport, R: Rng> {
	surface: S,
	scheduler: F,
	viewport: V,
	stars: StarfieldState<R>,
	state: SimState,
	pending: Option<FrameHandle>,
	listener: Option<ListenerHandle>,
}

impl<S: Surface, F: FrameScheduler, V: Viewport, R: Rng> Simulation<S, F, V, R> {
	fn on_frame(&mut self) {
		if self.state != SimState::Running {
			return;
		}
		self.pending = None;

		if let Err(err) = self.stars.tick(&mut self.surface) {
			warn!("starfield: frame aborted, stopping: {}", err);
			self.shutdown();
			return;
		}

		match self.scheduler.request_frame() {
			Ok(handle) => self.pending = Some(handle),
			Err(err) => {
				warn!("starfield: could not schedule next frame: {}", err);
				self.shutdown();
			}
		}
	}

	fn on_resize(&mut self) {
		if self.state != SimState::Running {
			return;
		}
		let Some((width, height)) = self.viewport.inner_size() else {
			return;
		};
		if self.surface.size() == (width, height) {
			return;
		}
		self.surface.set_size(width, height);
		debug!("starfield: surface resized to {}x{}", width, height);
	}

	/// Cancel the pending frame and drop the resize listener together.
	fn shutdown(&mut self) {
		if self.state == SimState::Stopped {
			return;
		}
		self.state = SimState::Stopped;
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
		if let Some(listener) = self.listener.take() {
			self.viewport.remove_resize_listener(listener);
		}
		info!("starfield: stopped after {} frames", self.stars.frames());
	}
}

fn with_live<T>(target: &Weak<RefCell<T>>, f: impl FnOnce(&mut T)) {
	if let Some(inner) = target.upgrade() {
		f(&mut *inner.borrow_mut());
	}
}

/// A mounted, running star field. Dropping the handle stops it.
pub struct StarfieldHandle<S: Surface, F: FrameScheduler, V: Viewport, R: Rng> {
	inner: Rc<RefCell<Simulation<S, F, V, R>>>,
}

impl<S: Surface, F: FrameScheduler, V: Viewport, R: Rng> StarfieldHandle<S, F, V, R> {
	/// Stop the tick loop and stop listening for resizes. Safe to call twice.
	pub fn stop(&self) {
		self.inner.borrow_mut().shutdown();
	}

	/// Current lifecycle state.
	pub fn state(&self) -> SimState {
		self.inner.borrow().state
	}

	/// Frames painted since start.
	pub fn frame_count(&self) -> u64 {
		self.inner.borrow().stars.frames()
	}

	/// Pool size, constant for the life of the mount.
	pub fn star_count(&self) -> usize {
		self.inner.borrow().stars.pool().len()
	}

	/// Snapshot of the pool in pool order.
	pub fn stars(&self) -> Vec<Star> {
		self.inner.borrow().stars.pool().stars().to_vec()
	}
}

impl<S: Surface, F: FrameScheduler, V: Viewport, R: Rng> Drop for StarfieldHandle<S, F, V, R> {
	fn drop(&mut self) {
		if let Ok(mut sim) = self.inner.try_borrow_mut() {
			sim.shutdown();
		}
	}
}

/// Mount the star field onto `surface`.
///
/// Returns `None` without touching the surface when the viewport cannot
/// report a size, and `None` after cleaning up if the first frame fails.
pub fn start<S, F, V, R>(
	mut surface: S,
	scheduler: F,
	viewport: V,
	config: StarfieldConfig,
	rng: R,
) -> Option<StarfieldHandle<S, F, V, R>>
where
	S: Surface + 'static,
	F: FrameScheduler + 'static,
	V: Viewport + 'static,
	R: Rng + 'static,
{
	let Some((width, height)) = viewport.inner_size() else {
		warn!("starfield: viewport size unavailable, not starting");
		return None;
	};
	surface.set_size(width, height);
	let (width, height) = surface.size();

	let stars = StarfieldState::new(config, width, height, rng);
	info!(
		"starfield: seeded {} stars on {}x{}",
		stars.pool().len(),
		width,
		height
	);

	let inner = Rc::new(RefCell::new(Simulation {
		surface,
		scheduler,
		viewport,
		stars,
		state: SimState::Running,
		pending: None,
		listener: None,
	}));

	{
		let mut guard = inner.borrow_mut();
		let sim = &mut *guard;

		let frame_target = Rc::downgrade(&inner);
		sim.scheduler
			.bind(Box::new(move || with_live(&frame_target, |sim| sim.on_frame())));

		let resize_target = Rc::downgrade(&inner);
		sim.listener = sim
			.viewport
			.add_resize_listener(Box::new(move || with_live(&resize_target, |sim| sim.on_resize())));
		if sim.listener.is_none() {
			warn!("starfield: resize listener unavailable, surface size is fixed");
		}

		sim.on_frame();
	}

	let handle = StarfieldHandle { inner };
	(handle.state() == SimState::Running).then_some(handle)
}
