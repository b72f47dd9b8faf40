//! Pointer drag state machine.
//!
//! One gesture at a time: a press picks a state from the hit-test, moves
//! update the store or view live, and the release decides whether the gesture
//! produced an undoable change.

use meshgrad_engine::coords::Vec2;
use meshgrad_engine::input::Modifiers;

use crate::hit::{hit_test, HitTarget};
use crate::point::{Point, PointId, Shape, MIN_RADIUS};
use crate::store::PointStore;
use crate::view::View;

/// Hit radii and click tolerance. Hit radii are canvas units, so handles keep
/// their size in the document regardless of zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    pub focus_handle_radius: f32,
    pub radius_handle_radius: f32,
    pub body_radius: f32,
    pub boundary_band: f32,
    /// Screen units a press may travel and still count as a click.
    pub click_threshold: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            focus_handle_radius: 12.0,
            radius_handle_radius: 8.0,
            body_radius: 14.0,
            boundary_band: 10.0,
            click_threshold: 3.0,
        }
    }
}

/// Active gesture.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning,
    MovingPoint(PointId),
    ResizingRadius(PointId),
    RedirectingFocus(PointId),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        *self == InteractionState::Idle
    }
}

/// What a pointer release asks the owner to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Nothing,
    /// The store changed in an undoable way.
    Commit,
}

#[derive(Debug, Clone)]
struct Press {
    screen: Vec2,
    modifiers: Modifiers,
    /// The dragged point as it was at press time.
    before: Option<Point>,
}

#[derive(Debug, Default)]
pub struct Interaction {
    state: InteractionState,
    press: Option<Press>,
    last_screen: Vec2,
    grab: Vec2,
    moved_past_threshold: bool,
    pan_just_ended: bool,
}

impl Interaction {
    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn pan_just_ended(&self) -> bool {
        self.pan_just_ended
    }

    /// Abandons any gesture without committing. A dragged point is put
    /// back where it was at press time; a pending click is dropped.
    pub fn cancel(&mut self, store: &mut PointStore) {
        self.state = InteractionState::Idle;
        let Some(press) = self.press.take() else {
            return;
        };
        if let Some(before) = press.before
            && let Some(point) = store.get_mut(before.id)
            && *point != before
        {
            *point = before;
            store.mark_changed();
        }
    }

    pub fn pointer_down(
        &mut self,
        store: &mut PointStore,
        view: &View,
        cfg: &InteractionConfig,
        screen: Vec2,
        modifiers: Modifiers,
        pan: bool,
    ) {
        if !self.state.is_idle() {
            log::trace!("pointer down ignored during {:?}", self.state);
            return;
        }
        self.pan_just_ended = false;
        self.moved_past_threshold = false;
        self.last_screen = screen;
        self.press = Some(Press { screen, modifiers, before: None });

        if pan {
            self.state = InteractionState::Panning;
            return;
        }

        let canvas = view.to_canvas(screen);
        let target = hit_test(store.points(), store.selected(), canvas, cfg);
        let before = target.point().and_then(|id| store.get(id)).cloned();

        self.state = match target {
            HitTarget::FocusHandle(id) => InteractionState::RedirectingFocus(id),
            HitTarget::RadiusHandle(id) => InteractionState::ResizingRadius(id),
            HitTarget::Body(id) => {
                if let Some(p) = &before {
                    self.grab = canvas - p.center();
                }
                // The id comes from the hit-test, so selection cannot fail.
                let _ = store.select(Some(id));
                InteractionState::MovingPoint(id)
            }
            HitTarget::Empty => InteractionState::Idle,
        };
        if let Some(press) = &mut self.press {
            press.before = before;
        }
    }

    pub fn pointer_move(&mut self, store: &mut PointStore, view: &mut View, cfg: &InteractionConfig, screen: Vec2) {
        if let Some(press) = &self.press
            && press.screen.distance(screen) > cfg.click_threshold
        {
            self.moved_past_threshold = true;
        }

        let canvas = view.to_canvas(screen);
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Panning => {
                view.pan_by_screen(screen - self.last_screen);
            }
            InteractionState::MovingPoint(id) => {
                let grab = self.grab;
                edit_point(store, id, |p| p.set_center(canvas - grab));
            }
            InteractionState::ResizingRadius(id) => {
                edit_point(store, id, |p| {
                    p.radius = p.center().distance(canvas).max(MIN_RADIUS);
                    if p.image.is_some() && p.shape == Shape::Square {
                        p.width = Some(p.radius * 2.0);
                        p.height = Some(p.radius * 2.0);
                    }
                });
            }
            InteractionState::RedirectingFocus(id) => {
                edit_point(store, id, |p| p.set_focus(canvas - p.center()));
            }
        }
        self.last_screen = screen;
    }

    pub fn pointer_up(&mut self, store: &mut PointStore, view: &View, _cfg: &InteractionConfig, screen: Vec2) -> Outcome {
        let state = std::mem::take(&mut self.state);
        let Some(press) = self.press.take() else {
            return Outcome::Nothing;
        };

        match state {
            InteractionState::Panning => {
                self.pan_just_ended = true;
                Outcome::Nothing
            }
            InteractionState::MovingPoint(id)
            | InteractionState::ResizingRadius(id)
            | InteractionState::RedirectingFocus(id) => {
                let changed = match (&press.before, store.get(id)) {
                    (Some(before), Some(now)) => before != now,
                    _ => false,
                };
                if changed { Outcome::Commit } else { Outcome::Nothing }
            }
            InteractionState::Idle => {
                if self.moved_past_threshold {
                    return Outcome::Nothing;
                }
                // Empty-canvas click.
                let _ = store.select(None);
                if press.modifiers.any() {
                    return Outcome::Nothing;
                }
                let at = view.to_canvas(screen);
                store.create(at.x, at.y);
                Outcome::Commit
            }
        }
    }
}

fn edit_point(store: &mut PointStore, id: PointId, edit: impl FnOnce(&mut Point)) {
    let Some(point) = store.get_mut(id) else {
        return;
    };
    let before = point.clone();
    edit(point);
    point.clamp();
    if *point != before {
        store.mark_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageKey;

    struct Rig {
        store: PointStore,
        view: View,
        cfg: InteractionConfig,
        fsm: Interaction,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                store: PointStore::new(),
                view: View::default(),
                cfg: InteractionConfig::default(),
                fsm: Interaction::default(),
            }
        }

        fn down(&mut self, x: f32, y: f32) {
            self.fsm.pointer_down(&mut self.store, &self.view, &self.cfg, Vec2::new(x, y), Modifiers::default(), false);
        }

        fn drag(&mut self, x: f32, y: f32) {
            self.fsm.pointer_move(&mut self.store, &mut self.view, &self.cfg, Vec2::new(x, y));
        }

        fn up(&mut self, x: f32, y: f32) -> Outcome {
            self.fsm.pointer_up(&mut self.store, &self.view, &self.cfg, Vec2::new(x, y))
        }
    }

    // ── clicks ────────────────────────────────────────────────────────────

    #[test]
    fn click_on_empty_canvas_creates_a_point() {
        let mut rig = Rig::new();
        rig.down(100.0, 100.0);
        rig.drag(102.0, 101.0);
        assert_eq!(rig.up(102.0, 101.0), Outcome::Commit);
        assert_eq!(rig.store.len(), 1);
        assert_eq!(rig.store.points()[0].center(), Vec2::new(102.0, 101.0));
    }

    #[test]
    fn long_drag_on_empty_canvas_is_not_a_click() {
        let mut rig = Rig::new();
        rig.down(0.0, 0.0);
        rig.drag(10.0, 0.0);
        assert_eq!(rig.up(10.0, 0.0), Outcome::Nothing);
        assert!(rig.store.is_empty());
    }

    #[test]
    fn modifier_click_only_clears_selection() {
        let mut rig = Rig::new();
        rig.store.create(0.0, 0.0);
        let ctrl = Modifiers { ctrl: true, ..Default::default() };
        rig.fsm.pointer_down(&mut rig.store, &rig.view, &rig.cfg, Vec2::new(500.0, 500.0), ctrl, false);
        assert_eq!(rig.up(500.0, 500.0), Outcome::Nothing);
        assert_eq!(rig.store.selected(), None);
        assert_eq!(rig.store.len(), 1);
    }

    #[test]
    fn click_position_respects_the_view() {
        let mut rig = Rig::new();
        rig.view = View::new(Vec2::new(10.0, 0.0), 2.0);
        rig.down(100.0, 50.0);
        rig.up(100.0, 50.0);
        assert_eq!(rig.store.points()[0].center(), Vec2::new(40.0, 25.0));
    }

    #[test]
    fn click_right_after_a_pan_creates_a_point() {
        let mut rig = Rig::new();
        rig.fsm.pointer_down(&mut rig.store, &rig.view, &rig.cfg, Vec2::zero(), Modifiers::default(), true);
        rig.drag(40.0, 0.0);
        rig.up(40.0, 0.0);
        rig.down(100.0, 100.0);
        assert_eq!(rig.up(100.0, 100.0), Outcome::Commit);
        assert_eq!(rig.store.len(), 1);
    }

    // ── cancel ────────────────────────────────────────────────────────────

    #[test]
    fn cancel_drops_a_pending_click() {
        let mut rig = Rig::new();
        rig.down(100.0, 100.0);
        rig.fsm.cancel(&mut rig.store);
        assert_eq!(rig.fsm.state(), InteractionState::Idle);
        assert_eq!(rig.up(100.0, 100.0), Outcome::Nothing);
        assert!(rig.store.is_empty());
    }

    #[test]
    fn cancel_puts_a_dragged_point_back() {
        let mut rig = Rig::new();
        let id = rig.store.create(100.0, 100.0);
        let before = rig.store.get(id).unwrap().clone();
        rig.down(100.0, 100.0);
        rig.drag(200.0, 150.0);
        assert_ne!(rig.store.get(id), Some(&before));
        rig.fsm.cancel(&mut rig.store);
        assert_eq!(rig.store.get(id), Some(&before));
        assert_eq!(rig.up(200.0, 150.0), Outcome::Nothing);
    }

    // ── drags ─────────────────────────────────────────────────────────────

    #[test]
    fn radius_drag_clamps_to_minimum() {
        let mut rig = Rig::new();
        let id = rig.store.create(100.0, 100.0);
        rig.down(250.0, 100.0);
        assert_eq!(rig.fsm.state(), InteractionState::ResizingRadius(id));
        rig.drag(120.0, 100.0);
        assert_eq!(rig.up(120.0, 100.0), Outcome::Commit);
        assert_eq!(rig.store.get(id).unwrap().radius, 20.0);
    }

    #[test]
    fn moving_keeps_the_grab_offset() {
        let mut rig = Rig::new();
        let id = rig.store.create(100.0, 100.0);
        rig.store.select(None).unwrap();
        rig.down(105.0, 100.0);
        assert_eq!(rig.store.selected(), Some(id));
        rig.drag(205.0, 150.0);
        assert_eq!(rig.up(205.0, 150.0), Outcome::Commit);
        assert_eq!(rig.store.get(id).unwrap().center(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn press_and_release_on_body_only_selects() {
        let mut rig = Rig::new();
        let id = rig.store.create(100.0, 100.0);
        rig.store.select(None).unwrap();
        rig.down(100.0, 100.0);
        assert_eq!(rig.up(100.0, 100.0), Outcome::Nothing);
        assert_eq!(rig.store.selected(), Some(id));
        assert_eq!(rig.store.len(), 1);
    }

    #[test]
    fn focus_drag_is_unbounded() {
        let mut rig = Rig::new();
        let id = rig.store.create(0.0, 0.0);
        rig.down(0.0, 0.0);
        // Center press hits the focus handle first: focus starts at the center.
        assert_eq!(rig.fsm.state(), InteractionState::RedirectingFocus(id));
        rig.drag(-900.0, 40.0);
        rig.up(-900.0, 40.0);
        assert_eq!(rig.store.get(id).unwrap().focus(), Vec2::new(-900.0, 40.0));
    }

    #[test]
    fn square_image_points_resize_their_box() {
        let mut rig = Rig::new();
        let id = rig.store.create(0.0, 0.0);
        if let Some(p) = rig.store.get_mut(id) {
            p.shape = Shape::Square;
            p.image = Some(ImageKey(1));
        }
        rig.down(150.0, 0.0);
        rig.drag(60.0, 0.0);
        rig.up(60.0, 0.0);
        let p = rig.store.get(id).unwrap();
        assert_eq!((p.width, p.height), (Some(120.0), Some(120.0)));
    }

    // ── panning ───────────────────────────────────────────────────────────

    #[test]
    fn pan_moves_view_and_suppresses_nothing_else() {
        let mut rig = Rig::new();
        rig.fsm.pointer_down(&mut rig.store, &rig.view, &rig.cfg, Vec2::zero(), Modifiers::default(), true);
        rig.drag(40.0, 20.0);
        assert_eq!(rig.up(40.0, 20.0), Outcome::Nothing);
        assert_eq!(rig.view.pan, Vec2::new(40.0, 20.0));
        assert!(rig.fsm.pan_just_ended());
        assert!(rig.store.is_empty());
        rig.down(0.0, 0.0);
        assert!(!rig.fsm.pan_just_ended());
    }

    #[test]
    fn second_press_during_drag_is_ignored() {
        let mut rig = Rig::new();
        let id = rig.store.create(0.0, 0.0);
        rig.down(150.0, 0.0);
        rig.down(400.0, 400.0);
        assert_eq!(rig.fsm.state(), InteractionState::ResizingRadius(id));
    }
}
