//! Editing session: the single owner of canvas state.
//!
//! Pointer and key handlers, discrete edits and view changes all go through
//! here. Discrete edits and finished drags are committed to the history;
//! live edits (`update_point`) are not until [`Session::commit`] is called.

use meshgrad_engine::coords::{Vec2, Viewport};
use meshgrad_engine::input::{Key, Modifiers};
use meshgrad_engine::paint::Rgb;

use crate::document::Document;
use crate::error::{CanvasError, Result, TargetKind};
use crate::hit::{hit_test, HitTarget};
use crate::history::History;
use crate::images::{ImageKey, ImageStore};
use crate::interaction::{Interaction, InteractionConfig, InteractionState, Outcome};
use crate::pipeline::{RenderSettings, Scene};
use crate::point::{Point, PointId, PointPatch};
use crate::stops::{StopId, StopList};
use crate::store::PointStore;
use crate::view::View;

#[derive(Debug)]
pub struct Session {
    store: PointStore,
    history: History,
    view: View,
    interaction: Interaction,
    config: InteractionConfig,
    images: ImageStore,
    settings: RenderSettings,
    surface: Option<Viewport>,

    selected_stop: Option<(PointId, StopId)>,
    stop_editor_focused: bool,

    clean_revision: u64,
    view_dirty: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(InteractionConfig::default(), RenderSettings::default())
    }
}

impl Session {
    pub fn new(config: InteractionConfig, settings: RenderSettings) -> Self {
        let mut history = History::new();
        // Empty baseline so the first edit can be undone.
        history.commit(&[]);
        Self {
            store: PointStore::new(),
            history,
            view: View::default(),
            interaction: Interaction::default(),
            config,
            images: ImageStore::new(),
            settings,
            surface: None,
            selected_stop: None,
            stop_editor_focused: false,
            clean_revision: 0,
            view_dirty: true,
        }
    }

    // ── accessors ──────────────────────────────────────────────────────────

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn points(&self) -> &[Point] {
        self.store.points()
    }

    pub fn selected(&self) -> Option<PointId> {
        self.store.selected()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
        self.view_dirty = true;
    }

    pub fn selected_stop(&self) -> Option<(PointId, StopId)> {
        self.selected_stop
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[Point]) + 'static) {
        self.store.subscribe(observer);
    }

    /// True when something visible changed since [`Session::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.view_dirty || self.store.revision() != self.clean_revision
    }

    pub fn mark_clean(&mut self) {
        self.clean_revision = self.store.revision();
        self.view_dirty = false;
    }

    // ── surface ────────────────────────────────────────────────────────────

    /// Pointer handlers are no-ops until a surface is attached.
    pub fn attach_surface(&mut self, viewport: Viewport) {
        if self.surface != Some(viewport) {
            self.surface = viewport.is_valid().then_some(viewport);
            self.view_dirty = true;
        }
    }

    pub fn detach_surface(&mut self) {
        self.surface = None;
        self.interaction.cancel(&mut self.store);
    }

    pub fn surface(&self) -> Option<Viewport> {
        self.surface
    }

    /// Inputs for one pipeline run; `None` without a surface.
    pub fn scene(&self, scale: f32) -> Option<Scene<'_>> {
        let viewport = self.surface?;
        Some(Scene {
            points: self.store.points(),
            selected: self.store.selected(),
            state: self.interaction.state(),
            view: self.view,
            images: &self.images,
            viewport,
            scale,
            overlays: self.settings.show_handles,
            guides: true,
        })
    }

    // ── pointer ────────────────────────────────────────────────────────────

    /// Alt held turns the press into a pan.
    pub fn pointer_down(&mut self, screen: Vec2, modifiers: Modifiers) {
        self.press(screen, modifiers, modifiers.alt);
    }

    /// Starts a pan regardless of modifiers (middle button, held space).
    pub fn pan_down(&mut self, screen: Vec2) {
        self.press(screen, Modifiers::default(), true);
    }

    fn press(&mut self, screen: Vec2, modifiers: Modifiers, pan: bool) {
        if self.surface.is_none() {
            return;
        }
        let before = self.store.selected();
        self.interaction
            .pointer_down(&mut self.store, &self.view, &self.config, screen, modifiers, pan);
        if self.store.selected() != before {
            self.selected_stop = None;
        }
    }

    pub fn pointer_move(&mut self, screen: Vec2) {
        if self.surface.is_none() {
            return;
        }
        let view = self.view;
        self.interaction
            .pointer_move(&mut self.store, &mut self.view, &self.config, screen);
        if self.view != view {
            self.view_dirty = true;
        }
    }

    pub fn pointer_up(&mut self, screen: Vec2) {
        if self.surface.is_none() {
            return;
        }
        let outcome = self
            .interaction
            .pointer_up(&mut self.store, &self.view, &self.config, screen);
        if outcome == Outcome::Commit {
            self.commit();
        }
    }

    /// Abandons the gesture in progress, for input lost mid-drag.
    pub fn cancel_gesture(&mut self) {
        self.interaction.cancel(&mut self.store);
    }

    /// What a press at `screen` would grab.
    pub fn hover(&self, screen: Vec2) -> HitTarget {
        if self.surface.is_none() {
            return HitTarget::Empty;
        }
        let canvas = self.view.to_canvas(screen);
        hit_test(self.store.points(), self.store.selected(), canvas, &self.config)
    }

    // ── keyboard ───────────────────────────────────────────────────────────

    /// Handles editor shortcuts. Returns whether the key was consumed.
    pub fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let command = modifiers.command();
        match key {
            Key::Char('z') if command && modifiers.shift => {
                self.redo();
                true
            }
            Key::Char('z') if command => {
                self.undo();
                true
            }
            Key::Char('y') if command => {
                self.redo();
                true
            }
            Key::Char('d') if command => {
                if let Some(id) = self.store.selected()
                    && let Err(err) = self.duplicate_point(id)
                {
                    log::debug!("duplicate refused: {err}");
                }
                true
            }
            Key::Delete | Key::Backspace => {
                self.delete_key();
                true
            }
            Key::Escape => {
                let _ = self.store.select(None);
                self.selected_stop = None;
                true
            }
            _ => false,
        }
    }

    fn delete_key(&mut self) {
        let selected = self.store.selected();
        if self.stop_editor_focused {
            if let Some((point, stop)) = self.selected_stop
                && Some(point) == selected
                && let Err(err) = self.remove_stop(point, stop)
            {
                log::debug!("stop removal refused: {err}");
            }
            return;
        }
        if let Some(id) = selected
            && let Err(err) = self.delete_point(id)
        {
            log::warn!("delete failed: {err}");
        }
    }

    // ── history ────────────────────────────────────────────────────────────

    /// Records the current points as an undo step.
    pub fn commit(&mut self) {
        self.history.commit(self.store.points());
        log::trace!("history commit, {} entries", self.history.len());
    }

    pub fn undo(&mut self) -> bool {
        if !self.interaction.state().is_idle() {
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if !self.interaction.state().is_idle() {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, snapshot: Vec<Point>) {
        self.store.replace_all(snapshot);
        if let Some((point, _)) = self.selected_stop
            && self.store.get(point).is_none()
        {
            self.selected_stop = None;
        }
    }

    // ── point edits ────────────────────────────────────────────────────────

    pub fn create_point(&mut self, at: Vec2) -> PointId {
        let id = self.store.create(at.x, at.y);
        self.commit();
        id
    }

    pub fn select(&mut self, id: Option<PointId>) -> Result<()> {
        self.store.select(id)
    }

    /// Patch + commit.
    pub fn edit_point(&mut self, id: PointId, patch: &PointPatch) -> Result<()> {
        let rev = self.store.revision();
        self.store.update(id, patch)?;
        if self.store.revision() != rev {
            self.commit();
        }
        Ok(())
    }

    /// Patch without committing, for continuous controls. Follow with
    /// [`Session::commit`] when the control is released.
    pub fn update_point(&mut self, id: PointId, patch: &PointPatch) -> Result<()> {
        self.store.update(id, patch)
    }

    pub fn set_point_color(&mut self, id: PointId, hex: &str) -> Result<()> {
        let color = Rgb::from_hex(hex)?;
        self.edit_point(id, &PointPatch { color: Some(color), ..Default::default() })
    }

    pub fn delete_point(&mut self, id: PointId) -> Result<()> {
        self.store.delete(id)?;
        if self.selected_stop.is_some_and(|(p, _)| p == id) {
            self.selected_stop = None;
        }
        self.commit();
        Ok(())
    }

    pub fn duplicate_point(&mut self, id: PointId) -> Result<PointId> {
        let copy = self.store.duplicate(id)?;
        self.commit();
        Ok(copy)
    }

    // ── stop edits ─────────────────────────────────────────────────────────

    fn stop_edit<R>(&mut self, id: PointId, edit: impl FnOnce(&mut StopList) -> Result<R>) -> Result<R> {
        let rev = self.store.revision();
        let out = self.store.edit_stops(id, edit)?;
        if self.store.revision() != rev {
            self.commit();
        }
        Ok(out)
    }

    /// Adds a stop at `position` with the gradient's color there, and selects it.
    pub fn insert_stop_at(&mut self, id: PointId, position: f32) -> Result<StopId> {
        let stop = self.stop_edit(id, |stops| Ok(stops.insert_at(position)))?;
        self.selected_stop = Some((id, stop));
        Ok(stop)
    }

    pub fn add_stop(&mut self, id: PointId) -> Result<StopId> {
        let stop = self.stop_edit(id, |stops| Ok(stops.add_default()))?;
        self.selected_stop = Some((id, stop));
        Ok(stop)
    }

    pub fn move_stop(&mut self, id: PointId, stop: StopId, position: f32) -> Result<()> {
        self.stop_edit(id, |stops| stops.move_stop(stop, position))
    }

    pub fn set_stop_color(&mut self, id: PointId, stop: StopId, hex: &str) -> Result<()> {
        self.stop_edit(id, |stops| stops.set_color(stop, hex))
    }

    pub fn set_stop_alpha(&mut self, id: PointId, stop: StopId, alpha: f32) -> Result<()> {
        self.stop_edit(id, |stops| stops.set_alpha(stop, alpha))
    }

    pub fn remove_stop(&mut self, id: PointId, stop: StopId) -> Result<()> {
        self.stop_edit(id, |stops| stops.remove(stop).map(|_| ()))?;
        if self.selected_stop == Some((id, stop)) {
            self.selected_stop = None;
        }
        Ok(())
    }

    pub fn select_stop(&mut self, id: PointId, stop: Option<StopId>) -> Result<()> {
        let point = self
            .store
            .get(id)
            .ok_or(CanvasError::MissingTarget(TargetKind::Point, id.0))?;
        self.selected_stop = match stop {
            Some(s) if point.gradient_stops.get(s).is_none() => {
                return Err(CanvasError::MissingTarget(TargetKind::Stop, s.0));
            }
            Some(s) => Some((id, s)),
            None => None,
        };
        Ok(())
    }

    pub fn set_stop_editor_focus(&mut self, focused: bool) {
        self.stop_editor_focused = focused;
    }

    // ── images ─────────────────────────────────────────────────────────────

    pub fn attach_image(&mut self, id: PointId, key: ImageKey) -> Result<()> {
        if !self.images.contains(key) {
            return Err(CanvasError::MissingTarget(TargetKind::Image, key.0));
        }
        self.edit_point(id, &PointPatch { image: Some(Some(key)), ..Default::default() })
    }

    /// Decodes `bytes` in the background and attaches the result to `id`.
    pub fn import_image(&mut self, id: PointId, bytes: Vec<u8>) -> Result<ImageKey> {
        if self.store.get(id).is_none() {
            return Err(CanvasError::MissingTarget(TargetKind::Point, id.0));
        }
        let key = self.images.request_decode(bytes);
        self.attach_image(id, key)?;
        Ok(key)
    }

    pub fn clear_image(&mut self, id: PointId) -> Result<()> {
        self.edit_point(id, &PointPatch { image: Some(None), ..Default::default() })
    }

    /// Absorbs finished decodes. Returns true when a ready image is attached
    /// to some point, i.e. the canvas needs a redraw.
    pub fn poll_images(&mut self) -> bool {
        let ready = self.images.poll();
        let visible = ready
            .iter()
            .any(|key| self.store.points().iter().any(|p| p.image == Some(*key)));
        if visible {
            self.view_dirty = true;
        }
        visible
    }

    // ── view ───────────────────────────────────────────────────────────────

    pub fn set_view(&mut self, pan: Vec2, zoom: f32) {
        self.view = View::new(pan, zoom);
        self.view_dirty = true;
    }

    pub fn zoom_at(&mut self, screen: Vec2, factor: f32) {
        self.view.zoom_at(screen, factor);
        self.view_dirty = true;
    }

    pub fn reset_view(&mut self) {
        self.view = View::default();
        self.view_dirty = true;
    }

    // ── documents ──────────────────────────────────────────────────────────

    pub fn document(&self) -> Document {
        Document::new(self.store.points().to_vec(), self.settings.clone())
    }

    /// Replaces points and settings and starts a fresh history.
    ///
    /// Image references unknown to this session are dropped.
    pub fn load_document(&mut self, doc: Document) {
        self.interaction.cancel(&mut self.store);
        let Document { mut points, settings, .. } = doc;
        for p in &mut points {
            if p.image.is_some_and(|k| !self.images.contains(k)) {
                p.image = None;
            }
        }
        self.store.replace_all(points);
        self.settings = settings;
        self.selected_stop = None;
        self.history.clear();
        self.commit();
        self.view_dirty = true;
        log::info!("loaded document with {} points", self.store.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgrad_engine::render::Pixmap;

    fn session() -> Session {
        let mut s = Session::default();
        s.attach_surface(Viewport::new(800.0, 600.0));
        s
    }

    fn click(s: &mut Session, x: f32, y: f32) {
        s.pointer_down(Vec2::new(x, y), Modifiers::default());
        s.pointer_up(Vec2::new(x, y));
    }

    fn ctrl() -> Modifiers {
        Modifiers { ctrl: true, ..Default::default() }
    }

    // ── pointer flow ──────────────────────────────────────────────────────

    #[test]
    fn handlers_are_inert_without_surface() {
        let mut s = Session::default();
        click(&mut s, 10.0, 10.0);
        assert!(s.points().is_empty());
        assert_eq!(s.hover(Vec2::zero()), HitTarget::Empty);
    }

    #[test]
    fn first_click_is_undoable() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        assert_eq!(s.points().len(), 1);
        assert!(s.undo());
        assert!(s.points().is_empty());
        assert!(s.redo());
        assert_eq!(s.points().len(), 1);
    }

    #[test]
    fn radius_drag_commits_once() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        let entries = s.history().len();
        s.pointer_down(Vec2::new(250.0, 100.0), Modifiers::default());
        s.pointer_move(Vec2::new(180.0, 100.0));
        s.pointer_move(Vec2::new(120.0, 100.0));
        s.pointer_up(Vec2::new(120.0, 100.0));
        assert_eq!(s.history().len(), entries + 1);
        assert_eq!(s.points()[0].radius, 20.0);
    }

    #[test]
    fn alt_drag_pans_the_view() {
        let mut s = session();
        let alt = Modifiers { alt: true, ..Default::default() };
        s.pointer_down(Vec2::new(0.0, 0.0), alt);
        s.pointer_move(Vec2::new(30.0, 0.0));
        s.pointer_up(Vec2::new(30.0, 0.0));
        assert_eq!(s.view().pan, Vec2::new(30.0, 0.0));
        assert!(s.points().is_empty());
    }

    #[test]
    fn cancelled_press_on_empty_canvas_adds_nothing() {
        let mut s = session();
        let entries = s.history().len();
        s.pointer_down(Vec2::new(100.0, 100.0), Modifiers::default());
        s.cancel_gesture();
        s.pointer_up(Vec2::new(100.0, 100.0));
        assert!(s.points().is_empty());
        assert_eq!(s.history().len(), entries);
    }

    #[test]
    fn cancelled_move_matches_history() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        let before = s.points().to_vec();
        s.pointer_down(Vec2::new(100.0, 100.0), Modifiers::default());
        s.pointer_move(Vec2::new(300.0, 200.0));
        assert_ne!(s.points(), before.as_slice());
        s.cancel_gesture();
        assert_eq!(s.points(), before.as_slice());
        s.pointer_up(Vec2::new(300.0, 200.0));
        assert!(!s.redo());
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn delete_then_undo_restores_all_points() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        click(&mut s, 400.0, 100.0);
        click(&mut s, 700.0, 100.0);
        let second = s.points()[1].id;
        s.select(Some(second)).unwrap();
        assert!(s.key_pressed(Key::Delete, Modifiers::default()));
        assert_eq!(s.points().len(), 2);
        assert!(s.key_pressed(Key::Char('z'), ctrl()));
        assert_eq!(s.points().len(), 3);
        assert_eq!(s.points()[1].id, second);
    }

    #[test]
    fn redo_shortcuts() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        s.key_pressed(Key::Char('z'), ctrl());
        let shift_cmd = Modifiers { meta: true, shift: true, ..Default::default() };
        s.key_pressed(Key::Char('z'), shift_cmd);
        assert_eq!(s.points().len(), 1);
        s.key_pressed(Key::Char('z'), ctrl());
        s.key_pressed(Key::Char('y'), ctrl());
        assert_eq!(s.points().len(), 1);
    }

    #[test]
    fn ctrl_d_duplicates_and_escape_deselects() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        s.key_pressed(Key::Char('d'), ctrl());
        assert_eq!(s.points().len(), 2);
        assert_eq!(s.selected(), Some(s.points()[1].id));
        s.key_pressed(Key::Escape, Modifiers::default());
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn delete_in_stop_editor_removes_the_stop_not_the_point() {
        let mut s = session();
        click(&mut s, 100.0, 100.0);
        let id = s.points()[0].id;
        let stop = s.add_stop(id).unwrap();
        s.set_stop_editor_focus(true);
        s.key_pressed(Key::Backspace, Modifiers::default());
        assert_eq!(s.points()[0].gradient_stops.len(), 2);
        assert_eq!(s.selected_stop(), None);

        // Down to two: refused, point survives.
        s.select_stop(id, Some(s.points()[0].gradient_stops.as_slice()[0].id)).unwrap();
        s.key_pressed(Key::Delete, Modifiers::default());
        assert_eq!(s.points()[0].gradient_stops.len(), 2);
        assert_eq!(s.points().len(), 1);
        assert!(s.points()[0].gradient_stops.get(stop).is_none());
    }

    // ── edits ─────────────────────────────────────────────────────────────

    #[test]
    fn invalid_point_color_is_rejected() {
        let mut s = session();
        let id = s.create_point(Vec2::new(5.0, 5.0));
        let entries = s.history().len();
        assert!(matches!(s.set_point_color(id, "blue"), Err(CanvasError::InvalidColorFormat(_))));
        assert_eq!(s.history().len(), entries);
        s.set_point_color(id, "#FF0000").unwrap();
        assert_eq!(s.points()[0].color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn live_updates_commit_on_request() {
        let mut s = session();
        let id = s.create_point(Vec2::zero());
        let entries = s.history().len();
        for r in [160.0, 170.0, 180.0] {
            s.update_point(id, &PointPatch { radius: Some(r), ..Default::default() }).unwrap();
        }
        assert_eq!(s.history().len(), entries);
        s.commit();
        s.undo();
        assert_eq!(s.points()[0].radius, 150.0);
    }

    #[test]
    fn attaching_unknown_images_fails() {
        let mut s = session();
        let id = s.create_point(Vec2::zero());
        assert!(matches!(
            s.attach_image(id, ImageKey(42)),
            Err(CanvasError::MissingTarget(TargetKind::Image, 42))
        ));
        let key = s.images_mut().insert(Pixmap::new(2, 2));
        s.attach_image(id, key).unwrap();
        assert_eq!(s.points()[0].image, Some(key));
        s.clear_image(id).unwrap();
        assert_eq!(s.points()[0].image, None);
    }

    #[test]
    fn dirty_tracks_store_and_view() {
        let mut s = session();
        s.mark_clean();
        assert!(!s.is_dirty());
        s.zoom_at(Vec2::zero(), 2.0);
        assert!(s.is_dirty());
        s.mark_clean();
        s.create_point(Vec2::zero());
        assert!(s.is_dirty());
    }

    #[test]
    fn document_load_resets_history() {
        let mut s = session();
        s.create_point(Vec2::zero());
        let doc = s.document();
        let mut other = session();
        other.load_document(doc);
        assert_eq!(other.points().len(), 1);
        assert!(!other.can_undo());
    }
}
