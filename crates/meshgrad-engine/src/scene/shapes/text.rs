use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Quarter-turn rotation applied to a text block around its center.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextRotation {
    #[default]
    None,
    /// Reads top-to-bottom.
    Clockwise,
    /// Reads bottom-to-top.
    CounterClockwise,
}

/// Single-line text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Center of the (rotated) text block in logical pixels.
    pub center: Vec2,
    pub rotation: TextRotation,
}

impl DrawList {
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        center: Vec2,
        rotation: TextRotation,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            center,
            rotation,
        }));
    }
}
