use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime redraws a window when input arrived for it or when
/// [`App::needs_redraw`] says so. Between frames it wakes periodically and
/// calls [`App::on_idle`] so background work can be absorbed.
pub trait App {
    /// Called once per rendered frame per window. `ctx.input_frame` holds
    /// the events received since the previous frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    fn on_idle(&mut self) {}

    fn needs_redraw(&self) -> bool {
        true
    }
}
