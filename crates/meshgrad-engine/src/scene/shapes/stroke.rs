use crate::coords::Outline;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Dash;

/// Outline stroke centered on the boundary of `outline`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCmd {
    pub outline: Outline,
    pub width: f32,
    pub color: Color,
    pub dash: Option<Dash>,
}

impl DrawList {
    #[inline]
    pub fn push_stroke(&mut self, z: ZIndex, outline: Outline, width: f32, color: Color) {
        self.push(z, DrawCmd::Stroke(StrokeCmd { outline, width, color, dash: None }));
    }

    #[inline]
    pub fn push_dashed_stroke(&mut self, z: ZIndex, outline: Outline, width: f32, color: Color, dash: Dash) {
        self.push(z, DrawCmd::Stroke(StrokeCmd { outline, width, color, dash: Some(dash) }));
    }
}
