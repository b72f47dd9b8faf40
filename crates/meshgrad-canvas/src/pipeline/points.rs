//! Per-point passes: gradient fills and image fills.

use meshgrad_engine::coords::{Outline, Rect, Vec2};
use meshgrad_engine::paint::{
    BlendMode, ColorStop, EdgeProfile, Falloff, LinearGradient, Paint, RadialGradient,
};
use meshgrad_engine::scene::shapes::FillCmd;
use meshgrad_engine::scene::DrawList;

use super::{Scene, Z_IMAGES, Z_POINTS};
use crate::point::{GradientType, Point};
use crate::view::View;

/// Gradient pass, store order, screen-blended.
///
/// Points showing a decoded image are left to [`record_images`].
pub(super) fn record_gradients(list: &mut DrawList, scene: &Scene<'_>) {
    for point in scene.points {
        if has_ready_image(point, scene) || !point.has_valid_stops() || point.opacity <= 0.0 {
            continue;
        }
        let outline = screen_footprint(point, &scene.view);
        let cmd = match point.gradient_type {
            GradientType::Solid => {
                let falloff = Falloff::new(
                    scene.view.to_screen(point.center()),
                    point.radius * scene.view.zoom,
                    point.edge_type.into(),
                );
                FillCmd::new(outline, Paint::Solid(point.color.to_color(point.opacity))).with_falloff(falloff)
            }
            _ => FillCmd::new(outline, gradient_paint(point, &scene.view)),
        };
        list.push_fill(Z_POINTS, cmd.with_blend(BlendMode::Screen));
    }
}

/// Image pass: optional blurred border ring, then the image clipped to the
/// interior of the footprint.
pub(super) fn record_images(list: &mut DrawList, scene: &Scene<'_>) {
    for point in scene.points {
        let Some(image) = point.image.and_then(|key| scene.images.get(key)) else {
            continue;
        };
        let zoom = scene.view.zoom;
        let outline = screen_footprint(point, &scene.view);
        let thickness = point.border_thickness * zoom;

        let clip = if thickness > 0.0 {
            list.push_ring(Z_IMAGES, outline, thickness, gradient_paint(point, &scene.view), point.border_blur * zoom);
            outline.inset(thickness)
        } else {
            outline
        };

        let dest = cover_rect(outline.bounds(), image.width(), image.height(), point.image_scale);
        list.push_image(Z_IMAGES, image.clone(), dest, clip, point.opacity);
    }
}

fn has_ready_image(point: &Point, scene: &Scene<'_>) -> bool {
    point.image.is_some_and(|key| scene.images.get(key).is_some())
}

fn screen_footprint(point: &Point, view: &View) -> Outline {
    point.footprint().transformed(view.pan, view.zoom)
}

/// Stops with the point's opacity and edge falloff folded into alpha.
fn color_stops(point: &Point) -> Vec<ColorStop> {
    let profile: EdgeProfile = point.edge_type.into();
    point
        .gradient_stops
        .sorted()
        .into_iter()
        .map(|stop| {
            let t = stop.position / 100.0;
            let alpha = point.opacity * stop.alpha / 100.0 * profile.weight(t);
            ColorStop::new(t, stop.color.to_color(alpha.clamp(0.0, 1.0)))
        })
        .collect()
}

/// The point's paint in screen space, without the solid-fill falloff.
fn gradient_paint(point: &Point, view: &View) -> Paint {
    let center = view.to_screen(point.center());
    let extent = point.extent() * view.zoom;
    match point.gradient_type {
        GradientType::Solid => Paint::Solid(point.color.to_color(point.opacity)),
        GradientType::Linear => Paint::LinearGradient(LinearGradient::along_axis(
            center,
            point.gradient_angle(),
            extent,
            color_stops(point),
        )),
        GradientType::Radial => Paint::RadialGradient(RadialGradient::new(
            view.to_screen(point.focus_handle()),
            center,
            extent,
            color_stops(point),
        )),
    }
}

/// Destination that covers `bounds` with the image's aspect, scaled about the
/// center.
fn cover_rect(bounds: Rect, width: u32, height: u32, scale: f32) -> Rect {
    let (iw, ih) = (width.max(1) as f32, height.max(1) as f32);
    let fit = (bounds.size.x / iw).max(bounds.size.y / ih) * scale;
    Rect::from_center_size(bounds.center(), Vec2::new(iw * fit, ih * fit))
}
