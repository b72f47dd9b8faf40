//! meshgrad engine crate.
//!
//! Owns the geometry, paint and raster pieces used by the canvas layer, plus
//! the platform + GPU runtime that puts finished frames on screen.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
