//! Gradient stops and the editable stop list of a point.

use meshgrad_engine::paint::Rgb;
use meshgrad_engine::paint::rgb::{lerp_alpha, lerp_rgb};
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result, TargetKind};

/// Fewest stops a linear or radial gradient may have.
pub const MIN_STOPS: usize = 2;

/// Stop ids are unique within one stop list.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub u64);

/// One color sample along a gradient.
///
/// `position` and `alpha` are percentages in `[0, 100]`. Positions need not
/// be unique or ordered.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub id: StopId,
    #[serde(with = "crate::hex")]
    pub color: Rgb,
    pub position: f32,
    #[serde(default = "full_alpha")]
    pub alpha: f32,
}

fn full_alpha() -> f32 {
    100.0
}

#[inline]
fn clamp_percent(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

impl GradientStop {
    pub fn new(id: StopId, color: Rgb, position: f32) -> Self {
        Self { id, color, position: clamp_percent(position), alpha: 100.0 }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = clamp_percent(alpha);
        self
    }

    fn sanitized(mut self) -> Self {
        self.position = clamp_percent(self.position);
        self.alpha = clamp_percent(self.alpha);
        self
    }
}

/// Color and alpha (0–100) of `stops` at `position`.
///
/// Before the first stop (by position) the first stop is returned, after the
/// last the last one; in between the bracketing pair is interpolated. An
/// empty list samples as opaque black.
pub fn sample(stops: &[GradientStop], position: f32) -> (Rgb, f32) {
    let sorted = sorted_copy(stops);
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return (Rgb::new(0, 0, 0), 100.0);
    };
    if position <= first.position {
        return (first.color, first.alpha);
    }
    if position >= last.position {
        return (last.color, last.alpha);
    }

    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if position >= a.position && position <= b.position {
            let span = b.position - a.position;
            let t = if span > 0.0 { (position - a.position) / span } else { 0.0 };
            return (lerp_rgb(a.color, b.color, t), lerp_alpha(a.alpha, b.alpha, t));
        }
    }
    (last.color, last.alpha)
}

fn sorted_copy(stops: &[GradientStop]) -> Vec<GradientStop> {
    let mut sorted = stops.to_vec();
    // `sort_by` is stable, so equal positions keep insertion order.
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
    sorted
}

/// Editable stop list in insertion order.
///
/// Every edit clamps its inputs. Removal is refused below [`MIN_STOPS`];
/// the point store enforces the same bound for patches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopList {
    stops: Vec<GradientStop>,
}

impl StopList {
    pub fn new(stops: impl IntoIterator<Item = GradientStop>) -> Self {
        Self { stops: stops.into_iter().map(GradientStop::sanitized).collect() }
    }

    /// Two full-alpha stops at 0 and 100.
    pub fn two(from: Rgb, to: Rgb) -> Self {
        Self::new([GradientStop::new(StopId(1), from, 0.0), GradientStop::new(StopId(2), to, 100.0)])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn get(&self, id: StopId) -> Option<&GradientStop> {
        self.stops.iter().find(|s| s.id == id)
    }

    pub fn sample(&self, position: f32) -> (Rgb, f32) {
        sample(&self.stops, position)
    }

    /// Copy ordered by position; equal positions keep insertion order.
    pub fn sorted(&self) -> Vec<GradientStop> {
        sorted_copy(&self.stops)
    }

    /// Adds a stop at `position` carrying the color the gradient has there.
    pub fn insert_at(&mut self, position: f32) -> StopId {
        let position = clamp_percent(position);
        let (color, alpha) = self.sample(position);
        self.push(color, position, alpha)
    }

    /// Adds a white stop at the middle.
    pub fn add_default(&mut self) -> StopId {
        self.push(Rgb::new(0xff, 0xff, 0xff), 50.0, 100.0)
    }

    pub fn move_stop(&mut self, id: StopId, position: f32) -> Result<()> {
        self.stop_mut(id)?.position = clamp_percent(position);
        Ok(())
    }

    /// Parses `hex` first; on failure the stop keeps its color.
    pub fn set_color(&mut self, id: StopId, hex: &str) -> Result<()> {
        let color = Rgb::from_hex(hex)?;
        self.stop_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_alpha(&mut self, id: StopId, alpha: f32) -> Result<()> {
        self.stop_mut(id)?.alpha = clamp_percent(alpha);
        Ok(())
    }

    pub fn remove(&mut self, id: StopId) -> Result<GradientStop> {
        let index = self
            .stops
            .iter()
            .position(|s| s.id == id)
            .ok_or(CanvasError::MissingTarget(TargetKind::Stop, id.0))?;
        if self.stops.len() <= MIN_STOPS {
            return Err(CanvasError::DegenerateGradient);
        }
        Ok(self.stops.remove(index))
    }

    fn push(&mut self, color: Rgb, position: f32, alpha: f32) -> StopId {
        let id = self.next_id();
        self.stops.push(GradientStop::new(id, color, position).with_alpha(alpha));
        id
    }

    fn next_id(&self) -> StopId {
        StopId(self.stops.iter().map(|s| s.id.0).max().map_or(1, |m| m + 1))
    }

    fn stop_mut(&mut self, id: StopId) -> Result<&mut GradientStop> {
        self.stops
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CanvasError::MissingTarget(TargetKind::Stop, id.0))
    }
}
