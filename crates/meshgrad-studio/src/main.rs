//! meshgrad studio: an interactive mesh-gradient canvas.
//!
//! Click empty canvas to add a point, drag to move, drag the +X handle to
//! resize and the focus handle to aim gradients. Space/Alt/middle-drag pans,
//! the wheel zooms. Ctrl+Z/Y undo and redo, Ctrl+D duplicates, Delete removes,
//! Ctrl+S exports a PNG, Ctrl+Shift+S / Ctrl+O save and open the document.
//! Dropping an image fills the selected point with it.

mod config;
mod shortcuts;
mod studio;

use anyhow::Result;
use meshgrad_engine::device::GpuInit;
use meshgrad_engine::logging::{init_logging, LoggingConfig};
use meshgrad_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::config::StudioConfig;
use crate::studio::Studio;

fn main() -> Result<()> {
    let config = StudioConfig::load()?;
    init_logging(LoggingConfig { env_filter: config.log_filter.clone(), ..Default::default() });
    log::info!("meshgrad studio starting");

    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.width, config.height),
        ..Default::default()
    };
    Runtime::run(runtime, GpuInit::default(), Studio::new(config))
}
