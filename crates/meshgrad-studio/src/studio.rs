//! The studio app: routes window input into a canvas session and presents
//! the rendered layers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meshgrad_canvas::export;
use meshgrad_canvas::{Document, HitTarget, InteractionState, Pipeline, Session};
use meshgrad_engine::coords::Vec2;
use meshgrad_engine::core::{App, AppControl, FrameCtx};
use meshgrad_engine::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
};
use meshgrad_engine::render::Presenter;
use meshgrad_engine::window::CursorIcon;

use crate::config::StudioConfig;
use crate::shortcuts::{cursor_for, shortcut, wheel_zoom, Shortcut};

const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct Studio {
    config: StudioConfig,
    session: Session,
    pipeline: Pipeline,
    presenter: Presenter,

    pointer: Vec2,
    scale: f32,
    cursor: CursorIcon,
    title: String,
    rendered: bool,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Self {
        let session = Session::new(Default::default(), config.settings.clone());
        let mut pipeline = Pipeline::new();
        load_label_font(&mut pipeline, config.font_path.as_deref());
        Self {
            config,
            session,
            pipeline,
            presenter: Presenter::new(),
            pointer: Vec2::zero(),
            scale: 1.0,
            cursor: CursorIcon::Default,
            title: String::new(),
            rendered: false,
        }
    }

    // ── input ──────────────────────────────────────────────────────────────

    fn handle_event(&mut self, ev: &InputEvent, input: &InputState) {
        match ev {
            InputEvent::PointerMoved(m) => {
                self.pointer = Vec2::new(m.x, m.y);
                self.session.pointer_move(self.pointer);
            }
            InputEvent::PointerButton(b) => self.handle_button(b, input),
            InputEvent::MouseWheel { delta, .. } => {
                let notches = delta.notches_y(self.config.wheel_line_px);
                let factor = wheel_zoom(self.config.zoom_step, notches);
                if factor != 1.0 {
                    self.session.zoom_at(self.pointer, factor);
                }
            }
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => {
                match shortcut(*key, *modifiers) {
                    Some(action) => self.run_shortcut(action),
                    None => {
                        self.session.key_pressed(*key, *modifiers);
                    }
                }
            }
            InputEvent::FileDropped(path) => self.open_dropped(path),
            InputEvent::Focused(false) => {
                // Buttons released outside the window never reach us.
                self.session.cancel_gesture();
            }
            _ => {}
        }
    }

    fn handle_button(&mut self, b: &PointerButtonEvent, input: &InputState) {
        let pos = Vec2::new(b.x, b.y);
        self.pointer = pos;
        match (b.button, b.state) {
            (MouseButton::Left, MouseButtonState::Pressed) => {
                if input.key_down(Key::Space) {
                    self.session.pan_down(pos);
                } else {
                    self.session.pointer_down(pos, b.modifiers);
                }
            }
            (MouseButton::Middle, MouseButtonState::Pressed) => self.session.pan_down(pos),
            (MouseButton::Left | MouseButton::Middle, MouseButtonState::Released) => {
                self.session.pointer_up(pos);
            }
            _ => {}
        }
    }

    fn run_shortcut(&mut self, action: Shortcut) {
        let result = match action {
            Shortcut::ExportPng => self.export_png(),
            Shortcut::SaveDocument => self.save_document(),
            Shortcut::OpenDocument => {
                let path = self.config.document_path.clone();
                self.open_document(&path)
            }
            Shortcut::ResetView => {
                self.session.reset_view();
                Ok(())
            }
        };
        if let Err(err) = result {
            log::error!("{action:?} failed: {err:#}");
        }
    }

    // ── files ──────────────────────────────────────────────────────────────

    fn export_png(&mut self) -> Result<()> {
        let png = export::export_png(&mut self.pipeline, &self.session, self.scale)?;
        let path = &self.config.export_path;
        std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
        log::info!("exported {}", path.display());
        Ok(())
    }

    fn save_document(&self) -> Result<()> {
        let json = self.session.document().to_json()?;
        let path = &self.config.document_path;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved {}", path.display());
        Ok(())
    }

    fn open_document(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let doc = Document::from_json(&text)?;
        self.session.load_document(doc);
        Ok(())
    }

    /// JSON drops load a document; anything else is decoded as an image for
    /// the selected point, or for a new point at the view center.
    fn open_dropped(&mut self, path: &PathBuf) {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let result = if is_json {
            self.open_document(path)
        } else {
            self.import_image(path)
        };
        if let Err(err) = result {
            log::error!("dropped file {}: {err:#}", path.display());
        }
    }

    fn import_image(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let target = match self.session.selected() {
            Some(id) => id,
            None => {
                let center = self.session.surface().map(|vp| vp.center()).unwrap_or(self.pointer);
                self.session.create_point(self.session.view().to_canvas(center))
            }
        };
        let key = self.session.import_image(target, bytes)?;
        log::info!("decoding {} as image {}", path.display(), key.0);
        Ok(())
    }

    // ── frame ──────────────────────────────────────────────────────────────

    fn update_window(&mut self, ctx: &FrameCtx<'_, '_>) {
        let hover = match self.session.state() {
            InteractionState::Idle => self.session.hover(self.pointer),
            _ => HitTarget::Empty,
        };
        let cursor = cursor_for(self.session.state(), hover);
        if cursor != self.cursor {
            ctx.window.set_cursor(cursor);
            self.cursor = cursor;
        }

        let title = format!("{} · {} points", self.config.title, self.session.points().len());
        if title != self.title {
            ctx.window.set_title(&title);
            self.title = title;
        }
    }
}

impl App for Studio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.scale = ctx.window.scale_factor();
        self.session.attach_surface(ctx.window.viewport());

        for ev in &ctx.input_frame.events {
            self.handle_event(ev, ctx.input);
        }
        self.update_window(ctx);

        let Some(scene) = self.session.scene(self.scale) else {
            return AppControl::Continue;
        };
        let settings = self.session.settings();
        if self.session.is_dirty() || !self.rendered {
            self.pipeline.render(&scene, settings);
            self.rendered = true;
        }
        let clear = settings.background.to_color(1.0);

        let presenter = &mut self.presenter;
        let control = match self.pipeline.surfaces() {
            Some(surfaces) => ctx.render(clear, |rctx, target| {
                presenter.present(rctx, target, &surfaces.layers());
            }),
            None => ctx.render(clear, |_, _| {}),
        };
        self.session.mark_clean();
        control
    }

    fn on_idle(&mut self) {
        self.session.poll_images();
    }

    fn needs_redraw(&self) -> bool {
        self.session.is_dirty()
    }
}

fn load_label_font(pipeline: &mut Pipeline, configured: Option<&Path>) {
    let candidates = configured
        .into_iter()
        .map(Path::to_path_buf)
        .chain(FALLBACK_FONTS.iter().map(PathBuf::from));
    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else { continue };
        match pipeline.load_font(&bytes) {
            Ok(_) => {
                log::info!("label font {}", path.display());
                return;
            }
            Err(err) => log::warn!("font {}: {err}", path.display()),
        }
    }
    log::warn!("no label font found; labels are disabled");
}
