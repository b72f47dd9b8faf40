//! Contract between the runtime loop and the application.
//!
//! The studio implements [`App`]; the runtime hands it a [`FrameCtx`] per
//! redraw and never exposes its own internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
