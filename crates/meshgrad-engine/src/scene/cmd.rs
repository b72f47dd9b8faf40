use crate::scene::shapes::fill::FillCmd;
use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::ring::RingCmd;
use crate::scene::shapes::stroke::StrokeCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - add a matching rasterizer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FillCmd),
    Ring(RingCmd),
    Image(ImageCmd),
    Stroke(StrokeCmd),
    Line(LineCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Short name used in trace logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::Fill(_) => "fill",
            DrawCmd::Ring(_) => "ring",
            DrawCmd::Image(_) => "image",
            DrawCmd::Stroke(_) => "stroke",
            DrawCmd::Line(_) => "line",
            DrawCmd::Text(_) => "text",
        }
    }
}
