//! An interactive editor for CSS `cubic-bezier()` timing functions.
//!
//! The [`Controller`] owns the editing state and reacts to pointer and
//! keyboard input; the page it drives is described by a [`UiContext`].
//! In the browser that is a set of canvases (see `App`); natively, any
//! [`Surface`](cubic_bezier::Surface) will do.

mod config;
mod controller;
mod edit_session;
mod error;
mod save;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::ToyConfig;
pub use controller::{Controller, Direction, HistorySink, Readout, TimingSink, UiContext};
pub use edit_session::{EditSession, Handle};
pub use error::ToyError;
pub use save::SessionState;

#[cfg(target_arch = "wasm32")]
pub use web::{wasm_main, App, CanvasSurface};
