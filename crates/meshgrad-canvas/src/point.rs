//! Gradient point data model.

use meshgrad_engine::coords::{Outline, Rect, Vec2};
use meshgrad_engine::paint::{EdgeProfile, Rgb};
use serde::{Deserialize, Serialize};

use crate::images::ImageKey;
use crate::stops::{StopList, MIN_STOPS};

pub const MIN_RADIUS: f32 = 20.0;
pub const MIN_IMAGE_SCALE: f32 = 0.1;
pub const MAX_IMAGE_SCALE: f32 = 10.0;

/// Stable point identifier, never reused within a store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Blob,
    Circle,
    /// Side is twice the radius.
    Square,
    /// Three radii wide, one and a half tall.
    Rectangle,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    #[default]
    Soft,
    Hard,
}

impl From<EdgeType> for EdgeProfile {
    fn from(edge: EdgeType) -> Self {
        match edge {
            EdgeType::Soft => EdgeProfile::Soft,
            EdgeType::Hard => EdgeProfile::Hard,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    #[default]
    Solid,
    Linear,
    Radial,
}

/// One freeform gradient node, in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(with = "crate::hex")]
    pub color: Rgb,
    pub opacity: f32,
    pub radius: f32,
    pub edge_type: EdgeType,
    pub shape: Shape,
    pub focus_x: f32,
    pub focus_y: f32,
    pub gradient_type: GradientType,
    pub gradient_stops: StopList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageKey>,
    #[serde(default = "unit_scale")]
    pub image_scale: f32,
    #[serde(default)]
    pub border_thickness: f32,
    #[serde(default)]
    pub border_blur: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

fn unit_scale() -> f32 {
    1.0
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

impl Point {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_center(&mut self, c: Vec2) {
        self.x = c.x;
        self.y = c.y;
    }

    /// Focus handle offset from the center.
    pub fn focus(&self) -> Vec2 {
        Vec2::new(self.focus_x, self.focus_y)
    }

    pub fn set_focus(&mut self, offset: Vec2) {
        self.focus_x = offset.x;
        self.focus_y = offset.y;
    }

    pub fn focus_handle(&self) -> Vec2 {
        self.center() + self.focus()
    }

    pub fn radius_handle(&self) -> Vec2 {
        self.center() + Vec2::new(self.radius, 0.0)
    }

    /// Footprint box size. Square and rectangle honor explicit overrides.
    pub fn box_size(&self) -> Vec2 {
        let r = self.radius;
        let (w, h) = match self.shape {
            Shape::Blob | Shape::Circle => return Vec2::new(r * 2.0, r * 2.0),
            Shape::Square => (r * 2.0, r * 2.0),
            Shape::Rectangle => (r * 3.0, r * 1.5),
        };
        Vec2::new(self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    pub fn footprint(&self) -> Outline {
        match self.shape {
            Shape::Blob | Shape::Circle => Outline::circle(self.center(), self.radius),
            Shape::Square | Shape::Rectangle => {
                Outline::rect(Rect::from_center_size(self.center(), self.box_size()))
            }
        }
    }

    /// Half-length of the gradient axis.
    pub fn extent(&self) -> f32 {
        match self.shape {
            Shape::Blob | Shape::Circle => self.radius,
            Shape::Square | Shape::Rectangle => {
                let size = self.box_size();
                size.x.max(size.y) * 0.5
            }
        }
    }

    /// Direction of linear gradients, `atan2(focus_y, focus_x)`.
    pub fn gradient_angle(&self) -> f32 {
        self.focus_y.atan2(self.focus_x)
    }

    pub fn is_gradient(&self) -> bool {
        self.gradient_type != GradientType::Solid
    }

    /// Pulls every field back into its valid range.
    pub fn clamp(&mut self) {
        self.x = finite_or(self.x, 0.0);
        self.y = finite_or(self.y, 0.0);
        self.focus_x = finite_or(self.focus_x, 0.0);
        self.focus_y = finite_or(self.focus_y, 0.0);
        self.opacity = finite_or(self.opacity, 1.0).clamp(0.0, 1.0);
        self.radius = finite_or(self.radius, MIN_RADIUS).max(MIN_RADIUS);
        self.image_scale = finite_or(self.image_scale, 1.0).clamp(MIN_IMAGE_SCALE, MAX_IMAGE_SCALE);
        self.border_thickness = finite_or(self.border_thickness, 0.0).max(0.0);
        self.border_blur = finite_or(self.border_blur, 0.0).max(0.0);
        self.width = self.width.filter(|w| w.is_finite()).map(|w| w.max(1.0));
        self.height = self.height.filter(|h| h.is_finite()).map(|h| h.max(1.0));
    }

    /// False when a gradient point has fewer than two stops.
    pub fn has_valid_stops(&self) -> bool {
        !self.is_gradient() || self.gradient_stops.len() >= MIN_STOPS
    }
}

/// Shallow update: every `Some` field replaces the point's value.
///
/// `width` / `height` are doubly optional so a patch can clear an override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointPatch {
    pub name: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub color: Option<Rgb>,
    pub opacity: Option<f32>,
    pub radius: Option<f32>,
    pub edge_type: Option<EdgeType>,
    pub shape: Option<Shape>,
    pub focus_x: Option<f32>,
    pub focus_y: Option<f32>,
    pub gradient_type: Option<GradientType>,
    pub gradient_stops: Option<StopList>,
    pub image: Option<Option<ImageKey>>,
    pub image_scale: Option<f32>,
    pub border_thickness: Option<f32>,
    pub border_blur: Option<f32>,
    pub width: Option<Option<f32>>,
    pub height: Option<Option<f32>>,
}

impl PointPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The point as it would be after this patch, clamped.
    pub fn applied_to(&self, point: &Point) -> Point {
        let mut p = point.clone();
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = &self.$field { p.$field = v.clone(); })*
            };
        }
        merge!(
            name, x, y, color, opacity, radius, edge_type, shape, focus_x, focus_y,
            gradient_type, gradient_stops, image, image_scale, border_thickness,
            border_blur, width, height,
        );
        p.clamp();
        p
    }
}

#[cfg(test)]
pub(crate) fn sample_point(id: u64, x: f32, y: f32) -> Point {
    Point {
        id: PointId(id),
        name: format!("Point {id}"),
        x,
        y,
        color: Rgb::new(0x3b, 0x82, 0xf6),
        opacity: 1.0,
        radius: 150.0,
        edge_type: EdgeType::Soft,
        shape: Shape::Blob,
        focus_x: 0.0,
        focus_y: 0.0,
        gradient_type: GradientType::Solid,
        gradient_stops: StopList::two(Rgb::new(0x3b, 0x82, 0xf6), Rgb::new(0x8b, 0x5c, 0xf6)),
        image: None,
        image_scale: 1.0,
        border_thickness: 0.0,
        border_blur: 0.0,
        width: None,
        height: None,
    }
}
