//! Rendering subsystem.
//!
//! Two halves:
//! - `SoftRenderer` rasterizes `scene` draw streams on the CPU into
//!   premultiplied [`Pixmap`] layer surfaces; this is what the canvas and the
//!   exporter use, and it has no GPU dependency.
//! - `Presenter` uploads finished layer surfaces to wgpu textures and
//!   composites them onto the window surface.
//!
//! Convention: geometry is in logical pixels (top-left origin, +Y down).

mod ctx;
mod pixmap;
mod present;
mod soft;
pub mod shapes;

pub use ctx::{clear_value, RenderCtx, RenderTarget};
pub use pixmap::Pixmap;
pub use present::Presenter;
pub use soft::SoftRenderer;
