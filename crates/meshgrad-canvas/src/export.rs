//! PNG export: flatten the layer surfaces and encode.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use meshgrad_engine::paint::{BlendMode, Rgb};
use meshgrad_engine::render::Pixmap;

use crate::error::{CanvasError, Result};
use crate::pipeline::{LayerSurfaces, Pipeline};
use crate::session::Session;

/// Background, gradient layer and label layer, source-over, in that order.
/// The result is fully opaque.
pub fn flatten(background: Rgb, layers: &LayerSurfaces) -> Pixmap {
    let (w, h) = layers.size();
    let mut out = Pixmap::filled(w, h, background.to_color(1.0));
    for layer in layers.layers() {
        out.draw_pixmap(layer, 0, 0, BlendMode::SourceOver);
    }
    out
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(&pixmap.to_rgba8(), pixmap.width(), pixmap.height(), ExtendedColorType::Rgba8)
        .map_err(|e| CanvasError::Export(e.to_string()))?;
    Ok(bytes)
}

/// Renders the session without handles or guides and flattens the result.
pub fn render_for_export(pipeline: &mut Pipeline, session: &Session, scale: f32) -> Result<Pixmap> {
    let mut scene = session
        .scene(scale)
        .ok_or_else(|| CanvasError::Export("no surface attached".into()))?;
    scene.overlays = false;
    scene.guides = false;
    let settings = session.settings();
    let surfaces = pipeline.render(&scene, settings);
    Ok(flatten(settings.background, surfaces))
}

pub fn export_png(pipeline: &mut Pipeline, session: &Session, scale: f32) -> Result<Vec<u8>> {
    let flat = render_for_export(pipeline, session, scale)?;
    let png = encode_png(&flat)?;
    log::info!("exported {}x{} png, {} bytes", flat.width(), flat.height(), png.len());
    Ok(png)
}
