//! Selection and handle overlay. Sizes are in screen pixels, independent of zoom.

use meshgrad_engine::coords::{Outline, Vec2};
use meshgrad_engine::paint::{Color, Rgb};
use meshgrad_engine::scene::shapes::Dash;
use meshgrad_engine::scene::DrawList;

use super::{Scene, Z_OVERLAY};
use crate::interaction::InteractionState;
use crate::point::Point;

const ACCENT: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
const MARKER_RADIUS: f32 = 5.0;
const HANDLE_RADIUS: f32 = 5.0;
const FOCUS_RADIUS: f32 = 6.0;
const FOCUS_RADIUS_ACTIVE: f32 = 9.0;
const OUTLINE_DASH: Dash = Dash::new(6.0, 4.0);

pub(super) fn record(list: &mut DrawList, scene: &Scene<'_>) {
    let mut selected = None;
    for point in scene.points {
        let is_selected = scene.selected == Some(point.id);
        center_marker(list, scene.view.to_screen(point.center()), is_selected);
        if is_selected {
            selected = Some(point);
        }
    }
    if let Some(point) = selected {
        selection(list, scene, point);
    }
}

fn center_marker(list: &mut DrawList, at: Vec2, selected: bool) {
    let marker = Outline::circle(at, MARKER_RADIUS);
    if selected {
        list.push_solid_fill(Z_OVERLAY, marker, ACCENT.to_color(1.0));
        list.push_stroke(Z_OVERLAY, marker, 2.0, Color::WHITE);
    } else {
        list.push_stroke(Z_OVERLAY, marker, 1.5, Color::WHITE.scaled(0.7));
    }
}

fn selection(list: &mut DrawList, scene: &Scene<'_>, point: &Point) {
    let view = &scene.view;
    let center = view.to_screen(point.center());
    let outline = point.footprint().transformed(view.pan, view.zoom);
    list.push_dashed_stroke(Z_OVERLAY, outline, 1.0, Color::WHITE.scaled(0.6), OUTLINE_DASH);

    let handle = Outline::circle(view.to_screen(point.radius_handle()), HANDLE_RADIUS);
    list.push_solid_fill(Z_OVERLAY, handle, Color::WHITE);
    list.push_stroke(Z_OVERLAY, handle, 1.5, ACCENT.to_color(1.0));

    let focus = view.to_screen(point.focus_handle());
    list.push_line(Z_OVERLAY, center, focus, 1.0, Color::WHITE.scaled(0.7));
    let radius = match scene.state {
        InteractionState::RedirectingFocus(id) if id == point.id => FOCUS_RADIUS_ACTIVE,
        _ => FOCUS_RADIUS,
    };
    let marker = Outline::circle(focus, radius);
    list.push_solid_fill(Z_OVERLAY, marker, ACCENT.to_color(0.9));
    list.push_stroke(Z_OVERLAY, marker, 1.5, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageStore;
    use crate::pipeline::tests::scene;
    use crate::point::sample_point;
    use meshgrad_engine::scene::DrawCmd;

    fn focus_radius(list: &DrawList) -> f32 {
        // The focus marker is the last fill recorded.
        list.items()
            .iter()
            .rev()
            .find_map(|i| match &i.cmd {
                DrawCmd::Fill(f) => match f.outline {
                    Outline::Circle { radius, .. } => Some(radius),
                    _ => None,
                },
                _ => None,
            })
            .unwrap_or(0.0)
    }

    // ── markers ───────────────────────────────────────────────────────────

    #[test]
    fn unselected_points_get_only_a_marker() {
        let images = ImageStore::new();
        let points = vec![sample_point(1, 0.0, 0.0), sample_point(2, 50.0, 0.0)];
        let mut list = DrawList::new();
        record(&mut list, &scene(&points, &images));
        assert_eq!(list.len(), 2);
        assert!(list.items().iter().all(|i| matches!(i.cmd, DrawCmd::Stroke(_))));
    }

    #[test]
    fn selection_adds_outline_handles_and_focus_line() {
        let images = ImageStore::new();
        let points = vec![sample_point(1, 0.0, 0.0), sample_point(2, 50.0, 0.0)];
        let mut s = scene(&points, &images);
        s.selected = Some(points[1].id);
        let mut list = DrawList::new();
        record(&mut list, &s);
        assert!(list.items().iter().any(|i| matches!(i.cmd, DrawCmd::Line(_))));
        assert!(list.len() > 2 + 5);
    }

    #[test]
    fn focus_marker_grows_while_dragged() {
        let images = ImageStore::new();
        let points = vec![sample_point(1, 0.0, 0.0)];
        let mut s = scene(&points, &images);
        s.selected = Some(points[0].id);
        let mut list = DrawList::new();
        record(&mut list, &s);
        assert_eq!(focus_radius(&list), FOCUS_RADIUS);

        s.state = InteractionState::RedirectingFocus(points[0].id);
        list.clear();
        record(&mut list, &s);
        assert_eq!(focus_radius(&list), FOCUS_RADIUS_ACTIVE);
    }
}
