use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for one layer surface.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer, so a list that is
///   cleared and re-recorded every frame stops allocating once warmed
///
/// Shapes carry their own [`Outline`](crate::coords::Outline) clip.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in recording order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Records `cmd` on layer `z`.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem { key: SortKey::new(z, order), cmd });

        self.sorted_dirty = true;
    }

    /// Iterates items back-to-front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Outline, Vec2};
    use crate::paint::Color;

    fn dot(list: &mut DrawList, z: i32, x: f32) {
        list.push_solid_fill(ZIndex(z), Outline::circle(Vec2::new(x, 0.0), 1.0), Color::WHITE);
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Fill(f) => f.outline.center().x,
                _ => f32::NAN,
            })
            .collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_layer_then_insertion() {
        let mut list = DrawList::new();
        dot(&mut list, 2, 0.0);
        dot(&mut list, 1, 1.0);
        dot(&mut list, 2, 2.0);
        dot(&mut list, 1, 3.0);
        assert_eq!(xs(&mut list), vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        dot(&mut list, 0, 0.0);
        list.clear();
        assert!(list.is_empty());
        dot(&mut list, 0, 5.0);
        assert_eq!(list.items()[0].key.order, 0);
    }
}
