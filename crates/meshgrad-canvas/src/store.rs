//! Ordered point collection with selection and change notification.

use std::fmt;

use meshgrad_engine::paint::Rgb;

use crate::error::{CanvasError, Result, TargetKind};
use crate::point::{EdgeType, GradientType, Point, PointId, PointPatch, Shape};
use crate::stops::StopList;

const DEFAULT_COLOR: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
const DEFAULT_END_COLOR: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);
const DEFAULT_RADIUS: f32 = 150.0;
const DUPLICATE_OFFSET: f32 = 20.0;

type Observer = Box<dyn FnMut(&[Point])>;

/// Owns every point, in paint order (last is topmost).
///
/// Each mutation bumps [`PointStore::revision`] and calls the subscribed
/// observers with the full list.
pub struct PointStore {
    points: Vec<Point>,
    selected: Option<PointId>,
    next_id: u64,
    created: u64,
    revision: u64,
    observers: Vec<Observer>,
}

impl Default for PointStore {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            selected: None,
            next_id: 1,
            created: 0,
            revision: 0,
            observers: Vec::new(),
        }
    }
}

impl fmt::Debug for PointStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointStore")
            .field("points", &self.points)
            .field("selected", &self.selected)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[Point]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Direct access for drag updates. Call [`PointStore::mark_changed`] after
    /// writing through it.
    pub(crate) fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn mark_changed(&mut self) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer(&self.points);
        }
    }

    pub fn selected(&self) -> Option<PointId> {
        self.selected
    }

    pub fn selected_point(&self) -> Option<&Point> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Selects `id`, or clears the selection with `None`.
    pub fn select(&mut self, id: Option<PointId>) -> Result<()> {
        if let Some(id) = id {
            self.require(id)?;
        }
        if self.selected != id {
            self.selected = id;
            self.mark_changed();
        }
        Ok(())
    }

    /// Adds a default point centered at `(x, y)` and selects it.
    pub fn create(&mut self, x: f32, y: f32) -> PointId {
        self.created += 1;
        let id = self.allocate_id();
        let mut point = Point {
            id,
            name: format!("Point {}", self.created),
            x,
            y,
            color: DEFAULT_COLOR,
            opacity: 1.0,
            radius: DEFAULT_RADIUS,
            edge_type: EdgeType::Soft,
            shape: Shape::Blob,
            focus_x: 0.0,
            focus_y: 0.0,
            gradient_type: GradientType::Solid,
            gradient_stops: StopList::two(DEFAULT_COLOR, DEFAULT_END_COLOR),
            image: None,
            image_scale: 1.0,
            border_thickness: 0.0,
            border_blur: 0.0,
            width: None,
            height: None,
        };
        point.clamp();
        self.points.push(point);
        self.selected = Some(id);
        log::debug!("created {id:?} at ({x}, {y})");
        self.mark_changed();
        id
    }

    /// Applies `patch`. Does not touch history.
    pub fn update(&mut self, id: PointId, patch: &PointPatch) -> Result<()> {
        let current = self.require(id)?;
        let next = patch.applied_to(current);
        if !next.has_valid_stops() {
            return Err(CanvasError::DegenerateGradient);
        }
        if next != *current {
            if let Some(slot) = self.get_mut(id) {
                *slot = next;
            }
            self.mark_changed();
        }
        Ok(())
    }

    /// Runs `edit` on the point's stops, keeping the two-stop rule.
    pub fn edit_stops<R>(&mut self, id: PointId, edit: impl FnOnce(&mut StopList) -> Result<R>) -> Result<R> {
        let point = self.get_mut(id).ok_or(CanvasError::MissingTarget(TargetKind::Point, id.0))?;
        let mut stops = point.gradient_stops.clone();
        let out = edit(&mut stops)?;
        if point.is_gradient() && stops.len() < crate::stops::MIN_STOPS {
            return Err(CanvasError::DegenerateGradient);
        }
        if stops != point.gradient_stops {
            point.gradient_stops = stops;
            self.mark_changed();
        }
        Ok(out)
    }

    /// Copies a point under a new id, offset down-right, and selects the copy.
    pub fn duplicate(&mut self, id: PointId) -> Result<PointId> {
        let mut copy = self.require(id)?.clone();
        let new_id = self.allocate_id();
        copy.id = new_id;
        copy.name.push_str(" copy");
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        self.points.push(copy);
        self.selected = Some(new_id);
        self.mark_changed();
        Ok(new_id)
    }

    pub fn delete(&mut self, id: PointId) -> Result<Point> {
        let index = self
            .points
            .iter()
            .position(|p| p.id == id)
            .ok_or(CanvasError::MissingTarget(TargetKind::Point, id.0))?;
        let removed = self.points.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("deleted {id:?}");
        self.mark_changed();
        Ok(removed)
    }

    /// Swaps in a full snapshot (undo/redo, document load).
    ///
    /// The selection survives only if its point is still present. Id
    /// allocation stays monotonic past every id in the snapshot.
    pub fn replace_all(&mut self, snapshot: Vec<Point>) {
        let max_id = snapshot.iter().map(|p| p.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.created = self.created.max(snapshot.len() as u64);
        self.points = snapshot;
        if let Some(sel) = self.selected
            && self.get(sel).is_none()
        {
            self.selected = None;
        }
        self.mark_changed();
    }

    fn allocate_id(&mut self) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        id
    }

    fn require(&self, id: PointId) -> Result<&Point> {
        self.get(id).ok_or(CanvasError::MissingTarget(TargetKind::Point, id.0))
    }
}
