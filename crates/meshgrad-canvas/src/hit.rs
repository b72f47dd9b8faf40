//! Pointer hit-testing against the point store, in canvas space.

use meshgrad_engine::coords::Vec2;

use crate::interaction::InteractionConfig;
use crate::point::{Point, PointId};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HitTarget {
    FocusHandle(PointId),
    RadiusHandle(PointId),
    Body(PointId),
    Empty,
}

impl HitTarget {
    pub fn point(self) -> Option<PointId> {
        match self {
            HitTarget::FocusHandle(id) | HitTarget::RadiusHandle(id) | HitTarget::Body(id) => Some(id),
            HitTarget::Empty => None,
        }
    }
}

/// Resolves what lies under canvas position `p`.
///
/// The selected point's handles come first (focus, then radius), then the
/// bodies of all points from topmost down. A body is hit near its center or
/// near its footprint boundary.
pub fn hit_test(points: &[Point], selected: Option<PointId>, p: Vec2, cfg: &InteractionConfig) -> HitTarget {
    if let Some(sel) = selected.and_then(|id| points.iter().find(|pt| pt.id == id)) {
        if p.distance(sel.focus_handle()) <= cfg.focus_handle_radius {
            return HitTarget::FocusHandle(sel.id);
        }
        if p.distance(sel.radius_handle()) <= cfg.radius_handle_radius {
            return HitTarget::RadiusHandle(sel.id);
        }
    }

    points
        .iter()
        .rev()
        .find(|pt| {
            p.distance(pt.center()) <= cfg.body_radius
                || pt.footprint().boundary_distance(p) <= cfg.boundary_band
        })
        .map_or(HitTarget::Empty, |pt| HitTarget::Body(pt.id))
}
