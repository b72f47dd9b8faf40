use crate::coords::Outline;
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Band between `outline` and `outline` inset by `thickness`, filled with
/// `paint`. A positive `blur` softens the ring on its own surface before it is
/// composited, so nothing else drawn on the layer is blurred with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RingCmd {
    pub outline: Outline,
    pub thickness: f32,
    pub paint: Paint,
    pub blur: f32,
}

impl DrawList {
    pub fn push_ring(&mut self, z: ZIndex, outline: Outline, thickness: f32, paint: Paint, blur: f32) {
        self.push(z, DrawCmd::Ring(RingCmd { outline, thickness, paint, blur }));
    }
}
