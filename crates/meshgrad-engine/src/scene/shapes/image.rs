use std::sync::Arc;

use crate::coords::{Outline, Rect};
use crate::render::Pixmap;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Raster image payload.
///
/// The image is stretched onto `dest` and only shows inside `clip`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub image: Arc<Pixmap>,
    pub dest: Rect,
    pub clip: Outline,
    pub opacity: f32,
}

impl DrawList {
    pub fn push_image(&mut self, z: ZIndex, image: Arc<Pixmap>, dest: Rect, clip: Outline, opacity: f32) {
        self.push(z, DrawCmd::Image(ImageCmd { image, dest, clip, opacity }));
    }
}
