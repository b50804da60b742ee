//! Hyperspace star field background.
//!
//! Renders a particle simulation of stars flying toward the viewer onto an
//! HTML canvas:
//! - A fixed pool of stars seeded once per mount
//! - Perspective projection around the canvas center each frame
//! - Fading streaks from a translucent per-frame overlay instead of a clear
//! - Amber motion trails on stars close to the viewer
//!
//! # Example
//!
//! ```ignore
//! use hyperspace_starfield::{StarfieldCanvas, StarfieldConfig};
//!
//! view! { <StarfieldCanvas config=StarfieldConfig::default() /> }
//! ```

mod component;
mod particles;
mod platform;
mod render;
mod state;
mod stepper;
#[cfg(test)]
mod testing;
pub mod theme;
pub mod web;

pub use component::StarfieldCanvas;
pub use particles::{Star, StarPool};
pub use platform::{FrameHandle, FrameScheduler, ListenerHandle, PaintError, Surface, Viewport};
pub use state::{SimState, StarfieldHandle, StarfieldState, start};
pub use stepper::{Projection, project, step};
pub use theme::{Color, ConfigError, StarfieldConfig};
