//! GPU device + surface management.
//!
//! The studio renders on the CPU; this layer only owns what is needed to put
//! the finished layer surfaces on screen: adapter, device, queue and a
//! configured swapchain.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
