//! meshgrad canvas crate.
//!
//! The interactive point canvas: gradient points and their stops, the point
//! store with its undo history, pointer hit-testing and drag handling, and the
//! pipeline that turns the points into composited layer surfaces.
//!
//! Everything here is platform-free. The studio binary feeds pointer and key
//! events into a [`Session`] and presents the [`LayerSurfaces`] it renders.

pub mod document;
pub mod error;
pub mod export;
pub mod hit;
pub mod history;
pub mod images;
pub mod interaction;
pub mod pipeline;
pub mod point;
pub mod session;
pub mod stops;
pub mod store;
pub mod view;

mod hex;

pub use document::Document;
pub use error::{CanvasError, Result, TargetKind};
pub use hit::HitTarget;
pub use history::History;
pub use images::{ImageKey, ImageStatus, ImageStore};
pub use interaction::{InteractionConfig, InteractionState};
pub use pipeline::{LabelSettings, LayerSurfaces, Pipeline, RenderSettings, Scene};
pub use point::{EdgeType, GradientType, Point, PointId, PointPatch, Shape};
pub use session::Session;
pub use stops::{GradientStop, StopId, StopList};
pub use store::PointStore;
pub use view::View;
