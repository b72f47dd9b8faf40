//! Background fill, canvas grid and the center crosshair.

use meshgrad_engine::coords::{Outline, Vec2};
use meshgrad_engine::paint::Color;
use meshgrad_engine::scene::shapes::Dash;
use meshgrad_engine::scene::DrawList;

use super::{RenderSettings, Scene, Z_BACKGROUND, Z_CROSSHAIR, Z_GRID};

/// Grid lines closer than this on screen are not drawn.
const MIN_GRID_STEP: f32 = 4.0;
const CROSSHAIR_DASH: Dash = Dash::new(6.0, 6.0);

pub(super) fn record(list: &mut DrawList, scene: &Scene<'_>, settings: &RenderSettings) {
    let rect = scene.viewport.rect();
    list.push_solid_fill(Z_BACKGROUND, Outline::rect(rect), settings.background.to_color(1.0));

    if !scene.guides {
        return;
    }
    if settings.show_grid && settings.grid_opacity > 0.0 {
        grid(list, scene, settings);
    }

    let center = scene.viewport.center();
    let color = Color::WHITE.scaled(0.25);
    list.push_dashed_line(
        Z_CROSSHAIR,
        Vec2::new(center.x, 0.0),
        Vec2::new(center.x, rect.size.y),
        1.0,
        color,
        CROSSHAIR_DASH,
    );
    list.push_dashed_line(
        Z_CROSSHAIR,
        Vec2::new(0.0, center.y),
        Vec2::new(rect.size.x, center.y),
        1.0,
        color,
        CROSSHAIR_DASH,
    );
}

/// Lines sit on canvas-space multiples of the spacing, so they move with pan.
fn grid(list: &mut DrawList, scene: &Scene<'_>, settings: &RenderSettings) {
    let step = settings.grid_spacing * scene.view.zoom;
    if !step.is_finite() || step < MIN_GRID_STEP {
        return;
    }
    let origin = scene.view.to_screen(Vec2::zero());
    let (w, h) = (scene.viewport.width, scene.viewport.height);
    let color = Color::WHITE.scaled(settings.grid_opacity.clamp(0.0, 1.0));

    for x in grid_lines(origin.x, step, w) {
        list.push_line(Z_GRID, Vec2::new(x, 0.0), Vec2::new(x, h), 1.0, color);
    }
    for y in grid_lines(origin.y, step, h) {
        list.push_line(Z_GRID, Vec2::new(0.0, y), Vec2::new(w, y), 1.0, color);
    }
}

/// Screen positions of grid lines in `[0, len]` for a lattice through `origin`.
fn grid_lines(origin: f32, step: f32, len: f32) -> impl Iterator<Item = f32> {
    let first = origin.rem_euclid(step);
    let count = ((len - first) / step).floor().max(-1.0) as i64 + 1;
    (0..count).map(move |i| first + i as f32 * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageStore;
    use crate::pipeline::tests::scene;
    use crate::view::View;
    use meshgrad_engine::scene::DrawCmd;

    fn lines(list: &DrawList) -> usize {
        list.items()
            .iter()
            .filter(|i| matches!(i.cmd, DrawCmd::Line(_)))
            .count()
    }

    // ── lattice ───────────────────────────────────────────────────────────

    #[test]
    fn grid_lines_follow_the_origin() {
        let xs: Vec<f32> = grid_lines(130.0, 50.0, 200.0).collect();
        assert_eq!(xs, vec![30.0, 80.0, 130.0, 180.0]);
        let xs: Vec<f32> = grid_lines(-20.0, 50.0, 100.0).collect();
        assert_eq!(xs, vec![30.0, 80.0]);
    }

    #[test]
    fn grid_lines_include_both_edges() {
        let xs: Vec<f32> = grid_lines(0.0, 50.0, 100.0).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
    }

    // ── recording ─────────────────────────────────────────────────────────

    #[test]
    fn guides_off_leaves_only_the_fill() {
        let images = ImageStore::new();
        let s = scene(&[], &images);
        let mut list = DrawList::new();
        record(&mut list, &s, &RenderSettings::default());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn dense_grids_are_dropped() {
        let images = ImageStore::new();
        let mut s = scene(&[], &images);
        s.guides = true;
        s.view = View::new(Vec2::zero(), 0.5);
        let settings = RenderSettings { grid_spacing: 6.0, ..Default::default() };
        let mut list = DrawList::new();
        record(&mut list, &s, &settings);
        // Crosshair only.
        assert_eq!(lines(&list), 2);
    }

    #[test]
    fn grid_and_crosshair_when_guides_on() {
        let images = ImageStore::new();
        let mut s = scene(&[], &images);
        s.guides = true;
        let mut list = DrawList::new();
        record(&mut list, &s, &RenderSettings::default());
        // 200×100 viewport, 50 spacing: 5 vertical + 3 horizontal + crosshair.
        assert_eq!(lines(&list), 5 + 3 + 2);
    }
}
