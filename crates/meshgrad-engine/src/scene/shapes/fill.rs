use crate::coords::Outline;
use crate::paint::{BlendMode, Color, Falloff, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Area fill payload: `paint` inside `outline`, optionally faded by a radial
/// falloff, composited with `blend`.
#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub outline: Outline,
    pub paint: Paint,
    pub falloff: Option<Falloff>,
    pub blend: BlendMode,
}

impl FillCmd {
    #[inline]
    pub fn new(outline: Outline, paint: Paint) -> Self {
        Self { outline, paint, falloff: None, blend: BlendMode::SourceOver }
    }

    #[inline]
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = Some(falloff);
        self
    }

    #[inline]
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

impl DrawList {
    #[inline]
    pub fn push_fill(&mut self, z: ZIndex, cmd: FillCmd) {
        self.push(z, DrawCmd::Fill(cmd));
    }

    /// Records an opaque-edged solid fill composited source-over.
    #[inline]
    pub fn push_solid_fill(&mut self, z: ZIndex, outline: Outline, color: Color) {
        self.push_fill(z, FillCmd::new(outline, Paint::Solid(color)));
    }
}
