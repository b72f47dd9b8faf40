use core::cmp::Ordering;

/// Layer of a draw item. Higher layers paint over lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// The layer directly above this one.
    #[inline]
    pub const fn above(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Paint-order key: layer first, then recording order within the layer.
///
/// Two items with the same layer always paint in the order they were pushed,
/// which is what makes per-point passes deterministic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_dominates_recording_order() {
        let low_late = SortKey::new(ZIndex(0), 9);
        let high_early = SortKey::new(ZIndex(1), 0);
        assert!(low_late < high_early);
    }

    #[test]
    fn same_layer_keeps_recording_order() {
        assert!(SortKey::new(ZIndex(3), 1) < SortKey::new(ZIndex(3), 2));
        assert_eq!(ZIndex(3).above(), ZIndex(4));
    }
}
