//! Studio-level shortcuts and pointer feedback. Canvas editing keys are
//! handled by the session.

use meshgrad_canvas::{HitTarget, InteractionState};
use meshgrad_engine::input::{Key, Modifiers};
use meshgrad_engine::window::CursorIcon;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shortcut {
    ExportPng,
    SaveDocument,
    OpenDocument,
    ResetView,
}

pub fn shortcut(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
    if !modifiers.command() {
        return None;
    }
    match key {
        Key::Char('s') if modifiers.shift => Some(Shortcut::SaveDocument),
        Key::Char('s') => Some(Shortcut::ExportPng),
        Key::Char('o') => Some(Shortcut::OpenDocument),
        Key::Char('0') => Some(Shortcut::ResetView),
        _ => None,
    }
}

pub fn cursor_for(state: InteractionState, hover: HitTarget) -> CursorIcon {
    match state {
        InteractionState::Panning => CursorIcon::Grabbing,
        InteractionState::MovingPoint(_) => CursorIcon::Move,
        InteractionState::ResizingRadius(_) => CursorIcon::EwResize,
        InteractionState::RedirectingFocus(_) => CursorIcon::Crosshair,
        InteractionState::Idle => match hover {
            HitTarget::FocusHandle(_) => CursorIcon::Crosshair,
            HitTarget::RadiusHandle(_) => CursorIcon::EwResize,
            HitTarget::Body(_) => CursorIcon::Grab,
            HitTarget::Empty => CursorIcon::Default,
        },
    }
}

/// Zoom factor for a wheel movement of `notches`.
pub fn wheel_zoom(step: f32, notches: f32) -> f32 {
    if !notches.is_finite() || step <= 0.0 {
        return 1.0;
    }
    step.powf(notches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgrad_canvas::PointId;

    fn cmd() -> Modifiers {
        Modifiers { ctrl: true, ..Default::default() }
    }

    #[test]
    fn shortcuts_need_the_command_modifier() {
        assert_eq!(shortcut(Key::Char('s'), Modifiers::default()), None);
        assert_eq!(shortcut(Key::Char('s'), cmd()), Some(Shortcut::ExportPng));
        let save = Modifiers { meta: true, shift: true, ..Default::default() };
        assert_eq!(shortcut(Key::Char('s'), save), Some(Shortcut::SaveDocument));
        assert_eq!(shortcut(Key::Char('0'), cmd()), Some(Shortcut::ResetView));
        assert_eq!(shortcut(Key::Char('z'), cmd()), None);
    }

    #[test]
    fn drags_override_hover_cursor() {
        let id = PointId(1);
        assert_eq!(cursor_for(InteractionState::Panning, HitTarget::Body(id)), CursorIcon::Grabbing);
        assert_eq!(cursor_for(InteractionState::Idle, HitTarget::RadiusHandle(id)), CursorIcon::EwResize);
        assert_eq!(cursor_for(InteractionState::Idle, HitTarget::Empty), CursorIcon::Default);
    }

    #[test]
    fn wheel_zoom_is_multiplicative() {
        assert_eq!(wheel_zoom(2.0, 1.0), 2.0);
        assert_eq!(wheel_zoom(2.0, -1.0), 0.5);
        assert_eq!(wheel_zoom(2.0, f32::NAN), 1.0);
    }
}
