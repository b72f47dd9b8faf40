//! Render pipeline: points → draw lists → layer surfaces.
//!
//! Each run records screen-space commands into two engine [`DrawList`]s and
//! rasterizes them with the CPU [`SoftRenderer`]:
//!
//! - gradient layer: background, guides, point gradients (screen blend),
//!   image fills, selection overlay
//! - label layer: up to four edge labels
//!
//! The pipeline is deterministic in its inputs; callers re-run it whenever the
//! session reports itself dirty.

mod background;
mod labels;
mod overlay;
mod points;

use meshgrad_engine::coords::Viewport;
use meshgrad_engine::paint::{Color, Rgb};
use meshgrad_engine::render::{Pixmap, SoftRenderer};
use meshgrad_engine::scene::{DrawList, ZIndex};
use meshgrad_engine::text::{FontId, FontLoadError, FontSystem};
use serde::{Deserialize, Serialize};

use crate::images::ImageStore;
use crate::interaction::InteractionState;
use crate::point::{Point, PointId};
use crate::view::View;

// ── layers ────────────────────────────────────────────────────────────────

pub(crate) const Z_BACKGROUND: ZIndex = ZIndex(0);
pub(crate) const Z_GRID: ZIndex = ZIndex(1);
pub(crate) const Z_CROSSHAIR: ZIndex = ZIndex(2);
pub(crate) const Z_POINTS: ZIndex = ZIndex(10);
pub(crate) const Z_IMAGES: ZIndex = ZIndex(20);
pub(crate) const Z_OVERLAY: ZIndex = ZIndex(30);
pub(crate) const Z_LABELS: ZIndex = ZIndex(0);

// ── settings ──────────────────────────────────────────────────────────────

/// Canvas look, saved with documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    #[serde(with = "crate::hex")]
    pub background: Rgb,
    pub show_grid: bool,
    /// Canvas units between grid lines.
    pub grid_spacing: f32,
    pub grid_opacity: f32,
    pub show_handles: bool,
    pub labels: LabelSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgb::new(0x0f, 0x11, 0x17),
            show_grid: true,
            grid_spacing: 50.0,
            grid_opacity: 0.08,
            show_handles: true,
            labels: LabelSettings::default(),
        }
    }
}

/// Edge labels. Empty strings are not drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSettings {
    pub size: f32,
    #[serde(with = "crate::hex")]
    pub color: Rgb,
    /// Distance from the surface edge to the near side of the text.
    pub margin: f32,
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Rgb::new(0xff, 0xff, 0xff),
            margin: 16.0,
            top: String::new(),
            right: String::new(),
            bottom: String::new(),
            left: String::new(),
        }
    }
}

impl LabelSettings {
    pub fn is_empty(&self) -> bool {
        [&self.top, &self.right, &self.bottom, &self.left]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

// ── inputs ────────────────────────────────────────────────────────────────

/// Everything one pipeline run reads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub points: &'a [Point],
    pub selected: Option<PointId>,
    pub state: InteractionState,
    pub view: View,
    pub images: &'a ImageStore,
    /// Logical pixels.
    pub viewport: Viewport,
    pub scale: f32,
    /// Selection handles and markers.
    pub overlays: bool,
    /// Grid and center crosshair.
    pub guides: bool,
}

// ── output ────────────────────────────────────────────────────────────────

/// Rendered layers at physical resolution, bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSurfaces {
    pub gradient: Pixmap,
    pub labels: Pixmap,
}

impl LayerSurfaces {
    fn new(width: u32, height: u32) -> Self {
        Self { gradient: Pixmap::new(width, height), labels: Pixmap::new(width, height) }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.gradient.width(), self.gradient.height())
    }

    /// Layers in compositing order.
    pub fn layers(&self) -> [&Pixmap; 2] {
        [&self.gradient, &self.labels]
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Owns the renderer, draw lists, fonts and surfaces between runs.
pub struct Pipeline {
    renderer: SoftRenderer,
    fonts: FontSystem,
    label_font: Option<FontId>,

    gradient_list: DrawList,
    label_list: DrawList,

    surfaces: Option<LayerSurfaces>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            renderer: SoftRenderer::new(),
            fonts: FontSystem::new(),
            label_font: None,
            gradient_list: DrawList::new(),
            label_list: DrawList::new(),
            surfaces: None,
        }
    }

    /// Loads a TTF/OTF face and makes it the label font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.fonts.load_font(bytes)?;
        self.label_font = Some(id);
        Ok(id)
    }

    pub fn has_label_font(&self) -> bool {
        self.label_font.is_some()
    }

    /// Last rendered surfaces, if any.
    pub fn surfaces(&self) -> Option<&LayerSurfaces> {
        self.surfaces.as_ref()
    }

    /// Runs every pass and returns the refreshed surfaces.
    pub fn render(&mut self, scene: &Scene<'_>, settings: &RenderSettings) -> &LayerSurfaces {
        let (w, h) = scene.viewport.physical_size(scene.scale);
        let surfaces = match self.surfaces.take() {
            Some(mut s) if s.size() == (w, h) => {
                s.gradient.fill(Color::TRANSPARENT);
                s.labels.fill(Color::TRANSPARENT);
                s
            }
            _ => {
                log::debug!("allocating layer surfaces {w}x{h}");
                LayerSurfaces::new(w, h)
            }
        };
        let surfaces = self.surfaces.insert(surfaces);

        self.gradient_list.clear();
        background::record(&mut self.gradient_list, scene, settings);
        points::record_gradients(&mut self.gradient_list, scene);
        points::record_images(&mut self.gradient_list, scene);
        if scene.overlays {
            overlay::record(&mut self.gradient_list, scene);
        }

        self.label_list.clear();
        if let Some(font) = self.label_font {
            labels::record(&mut self.label_list, scene.viewport, &settings.labels, font);
        }

        self.renderer
            .render(&mut self.gradient_list, &self.fonts, &mut surfaces.gradient, scene.scale);
        self.renderer
            .render(&mut self.label_list, &self.fonts, &mut surfaces.labels, scene.scale);

        log::trace!(
            "pipeline: {} gradient items, {} label items",
            self.gradient_list.len(),
            self.label_list.len()
        );
        surfaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{sample_point, EdgeType};
    use meshgrad_engine::coords::Vec2;

    pub(crate) fn scene<'a>(points: &'a [Point], images: &'a ImageStore) -> Scene<'a> {
        Scene {
            points,
            selected: None,
            state: InteractionState::Idle,
            view: View::default(),
            images,
            viewport: Viewport::new(200.0, 100.0),
            scale: 1.0,
            overlays: false,
            guides: false,
        }
    }

    fn black() -> RenderSettings {
        RenderSettings { background: Rgb::new(0, 0, 0), ..Default::default() }
    }

    fn hard(id: u64, x: f32, y: f32) -> Point {
        let mut p = sample_point(id, x, y);
        p.radius = 50.0;
        p.edge_type = EdgeType::Hard;
        p
    }

    fn px(pm: &Pixmap, x: u32, y: u32) -> Color {
        pm.get(x, y).unwrap_or(Color::TRANSPARENT)
    }

    // ── surfaces ──────────────────────────────────────────────────────────

    #[test]
    fn surfaces_follow_viewport_and_scale() {
        let images = ImageStore::new();
        let mut pipeline = Pipeline::new();
        let mut s = scene(&[], &images);
        s.scale = 2.0;
        assert_eq!(pipeline.render(&s, &black()).size(), (400, 200));
        s.viewport = Viewport::new(50.0, 50.0);
        assert_eq!(pipeline.render(&s, &black()).size(), (100, 100));
    }

    #[test]
    fn background_is_opaque() {
        let images = ImageStore::new();
        let mut pipeline = Pipeline::new();
        let surfaces = pipeline.render(&scene(&[], &images), &RenderSettings::default());
        assert!(surfaces.gradient.pixels().iter().all(|c| (c.a - 1.0).abs() < 1e-6));
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn overlapping_points_are_brighter_than_either() {
        let images = ImageStore::new();
        let points = vec![hard(1, 70.0, 50.0), hard(2, 130.0, 50.0)];
        let mut pipeline = Pipeline::new();
        let surfaces = pipeline.render(&scene(&points, &images), &black());

        let alone = px(&surfaces.gradient, 40, 50);
        let overlap = px(&surfaces.gradient, 100, 50);
        assert!(alone.b > 0.1);
        assert!(overlap.b > alone.b);
        assert!(overlap.luma() > alone.luma());
    }

    #[test]
    fn points_outside_their_footprint_leave_background() {
        let images = ImageStore::new();
        let points = vec![hard(1, 30.0, 50.0)];
        let mut pipeline = Pipeline::new();
        let surfaces = pipeline.render(&scene(&points, &images), &black());
        assert_eq!(px(&surfaces.gradient, 150, 50), Color::BLACK);
    }

    #[test]
    fn pan_moves_points_on_screen() {
        let images = ImageStore::new();
        let points = vec![hard(1, 0.0, 50.0)];
        let mut s = scene(&points, &images);
        s.view = View::new(Vec2::new(100.0, 0.0), 1.0);
        let mut pipeline = Pipeline::new();
        let surfaces = pipeline.render(&s, &black());
        assert!(px(&surfaces.gradient, 100, 50).b > 0.1);
        assert_eq!(px(&surfaces.gradient, 5, 50), Color::BLACK);
    }

    // ── labels ────────────────────────────────────────────────────────────

    #[test]
    fn labels_are_skipped_without_a_font() {
        let images = ImageStore::new();
        let mut settings = black();
        settings.labels.top = "Top".into();
        let mut pipeline = Pipeline::new();
        assert!(!pipeline.has_label_font());
        let surfaces = pipeline.render(&scene(&[], &images), &settings);
        assert!(surfaces.labels.pixels().iter().all(|c| c.a == 0.0));
    }

    #[test]
    fn label_settings_emptiness_ignores_whitespace() {
        let mut labels = LabelSettings::default();
        assert!(labels.is_empty());
        labels.left = "  ".into();
        assert!(labels.is_empty());
        labels.left = "L".into();
        assert!(!labels.is_empty());
    }

    #[test]
    fn settings_json_fills_missing_fields() {
        let s: RenderSettings = serde_json::from_str(r##"{"background":"#102030"}"##).unwrap();
        assert_eq!(s.background, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(s.grid_spacing, 50.0);
        assert!(s.show_handles);
    }
}
