use std::fmt;

use fontdue::layout::{CoordinateSystem, GlyphPosition, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts.
///
/// Fonts are immutable after loading. Label layers look fonts up by
/// [`FontId`]; a missing id renders nothing.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font #{} ({} glyphs)", id.0, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Lays out a single line at `size` with the pen starting at the origin.
    ///
    /// Returns `None` for unknown fonts.
    pub(crate) fn layout_line(&self, text: &str, id: FontId, size: f32) -> Option<Vec<GlyphPosition<()>>> {
        let font = self.get(id)?;
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));
        Some(layout.glyphs().clone())
    }

    /// Size of a laid-out line in logical pixels.
    ///
    /// Width is the pen extent (advance after the last glyph), height is at
    /// least the line height so empty strings still occupy a row.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let (Some(font), Some(glyphs)) = (self.get(id), self.layout_line(text, id, size)) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let line_height = font
            .horizontal_line_metrics(size)
            .map_or(size * 1.2, |m| m.new_line_size);

        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(line_height, f32::max);
        Vec2::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_font_measures_as_empty_line() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("hello", FontId(3), 10.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 12.0).abs() < 1e-4);
        assert!(fonts.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(b"not a font").is_err());
    }
}
