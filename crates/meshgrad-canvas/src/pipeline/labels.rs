//! Edge labels on their own layer.

use meshgrad_engine::coords::{Vec2, Viewport};
use meshgrad_engine::scene::shapes::TextRotation;
use meshgrad_engine::scene::DrawList;
use meshgrad_engine::text::FontId;

use super::{LabelSettings, Z_LABELS};

/// Top and bottom run left to right; right reads top-down, left bottom-up.
pub(super) fn record(list: &mut DrawList, viewport: Viewport, settings: &LabelSettings, font: FontId) {
    if settings.size <= 0.0 {
        return;
    }
    let color = settings.color.to_color(1.0);
    for (text, center, rotation) in placements(viewport, settings) {
        if text.trim().is_empty() {
            continue;
        }
        list.push_text(Z_LABELS, text, font, settings.size, color, center, rotation);
    }
}

fn placements<'a>(viewport: Viewport, s: &'a LabelSettings) -> [(&'a str, Vec2, TextRotation); 4] {
    let (w, h) = (viewport.width, viewport.height);
    let inset = s.margin + s.size * 0.5;
    [
        (s.top.as_str(), Vec2::new(w * 0.5, inset), TextRotation::None),
        (s.right.as_str(), Vec2::new(w - inset, h * 0.5), TextRotation::Clockwise),
        (s.bottom.as_str(), Vec2::new(w * 0.5, h - inset), TextRotation::None),
        (s.left.as_str(), Vec2::new(inset, h * 0.5), TextRotation::CounterClockwise),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_hug_their_edges() {
        let s = LabelSettings { margin: 10.0, size: 20.0, ..Default::default() };
        let [top, right, bottom, left] = placements(Viewport::new(200.0, 100.0), &s);
        assert_eq!(top.1, Vec2::new(100.0, 20.0));
        assert_eq!(right.1, Vec2::new(180.0, 50.0));
        assert_eq!(right.2, TextRotation::Clockwise);
        assert_eq!(bottom.1, Vec2::new(100.0, 80.0));
        assert_eq!(left.2, TextRotation::CounterClockwise);
    }

    #[test]
    fn blank_labels_are_not_recorded() {
        let s = LabelSettings { top: "Top".into(), left: " ".into(), ..Default::default() };
        let mut list = DrawList::new();
        record(&mut list, Viewport::new(200.0, 100.0), &s, FontId::default());
        assert_eq!(list.len(), 1);
    }
}
