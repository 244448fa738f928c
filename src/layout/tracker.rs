//! Scroll offset to (turn, section) resolution.
//!
//! [`resolve_section`] is a pure function over the turn store and the
//! registry. [`ScrollTracker`] adds the lookahead bias and coalesces bursts of
//! scroll events so resolution runs at most once per frame.

use crate::conversation::{SectionId, TurnStore};
use crate::state::Selection;

use super::registry::SectionRegistry;

/// Lines added to the scroll offset before resolving.
///
/// A section becomes active slightly before its top reaches the top of the
/// viewport. Must stay larger than the navigation header offset so that a
/// completed jump resolves to its own target.
pub const DEFAULT_LOOKAHEAD: usize = 2;

/// First `(turn, section)` whose extent contains `probe`.
///
/// Turns are tested in creation order and sections in their fixed order, so
/// the result is deterministic even if stale extents overlap.
pub fn resolve_section(
    turns: &TurnStore,
    registry: &SectionRegistry,
    probe: usize,
) -> Option<Selection> {
    for turn in turns {
        for section in SectionId::ALL {
            if registry
                .get(turn.id(), section)
                .is_some_and(|extent| extent.contains(probe))
            {
                return Some(Selection::new(turn.id().clone(), section));
            }
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTracker {
    lookahead: usize,
    pending: Option<usize>,
}

impl ScrollTracker {
    pub const fn new(lookahead: usize) -> Self {
        Self {
            lookahead,
            pending: None,
        }
    }

    pub const fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Record a scroll offset. Later offsets replace earlier unflushed ones.
    pub const fn queue(&mut self, offset: usize) {
        self.pending = Some(offset);
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop a queued offset without resolving it.
    pub const fn discard(&mut self) {
        self.pending = None;
    }

    /// Resolve the most recent queued offset, if any.
    ///
    /// Returns `None` when nothing was queued or when the offset lies outside
    /// every known extent; callers keep their previous selection in that case.
    pub fn flush(&mut self, turns: &TurnStore, registry: &SectionRegistry) -> Option<Selection> {
        let offset = self.pending.take()?;
        self.resolve(offset, turns, registry)
    }

    /// Resolve a raw scroll offset with the lookahead bias applied.
    pub fn resolve(
        &self,
        offset: usize,
        turns: &TurnStore,
        registry: &SectionRegistry,
    ) -> Option<Selection> {
        resolve_section(turns, registry, offset.saturating_add(self.lookahead))
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Turn, TurnContent, TurnId};
    use crate::layout::SectionExtent;

    fn turn(id: &str) -> Turn {
        Turn::new(TurnId::from(id), "q", TurnContent::default())
    }

    /// Two turns, each section 10 lines tall, laid out back to back from line 5.
    fn fixture() -> (TurnStore, SectionRegistry) {
        let mut store = TurnStore::new(turn("turn-1"));
        store.append(turn("turn-2"));
        let mut registry = SectionRegistry::new();
        let mut top = 5;
        for t in &store {
            for section in SectionId::ALL {
                registry.register(t.id(), section, SectionExtent::new(top, 10));
                top += 10;
            }
        }
        (store, registry)
    }

    fn sel(turn: &str, section: SectionId) -> Selection {
        Selection::new(TurnId::from(turn), section)
    }

    #[test]
    fn test_resolve_inside_section() {
        let (store, registry) = fixture();
        assert_eq!(
            resolve_section(&store, &registry, 27),
            Some(sel("turn-1", SectionId::Evidence))
        );
        assert_eq!(
            resolve_section(&store, &registry, 45),
            Some(sel("turn-2", SectionId::AiOverview))
        );
    }

    #[test]
    fn test_resolve_outside_every_extent_is_none() {
        let (store, registry) = fixture();
        assert_eq!(resolve_section(&store, &registry, 0), None);
        assert_eq!(resolve_section(&store, &registry, 85), None);
    }

    #[test]
    fn test_overlap_prefers_creation_then_section_order() {
        let mut store = TurnStore::new(turn("turn-1"));
        store.append(turn("turn-2"));
        let mut registry = SectionRegistry::new();
        let a = TurnId::from("turn-1");
        let b = TurnId::from("turn-2");
        registry.register(&b, SectionId::AiOverview, SectionExtent::new(0, 20));
        registry.register(&a, SectionId::FollowUp, SectionExtent::new(0, 20));
        registry.register(&a, SectionId::Evidence, SectionExtent::new(0, 20));
        assert_eq!(
            resolve_section(&store, &registry, 5),
            Some(sel("turn-1", SectionId::Evidence))
        );
    }

    #[test]
    fn test_tracker_applies_lookahead() {
        let (store, registry) = fixture();
        let tracker = ScrollTracker::new(2);
        // Raw offset 13 is still in the overview, but 13 + 2 reaches visualizations.
        assert_eq!(
            tracker.resolve(13, &store, &registry),
            Some(sel("turn-1", SectionId::Visualizations))
        );
    }

    #[test]
    fn test_flush_coalesces_to_latest_offset() {
        let (store, registry) = fixture();
        let mut tracker = ScrollTracker::new(0);
        tracker.queue(6);
        tracker.queue(16);
        tracker.queue(36);
        assert_eq!(
            tracker.flush(&store, &registry),
            Some(sel("turn-1", SectionId::FollowUp))
        );
        assert!(!tracker.is_pending());
        assert_eq!(tracker.flush(&store, &registry), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn build(heights: &[usize]) -> (TurnStore, SectionRegistry, Vec<(Selection, SectionExtent)>) {
            let turn_count = heights.len().div_ceil(SectionId::ALL.len()).max(1);
            let mut store = TurnStore::new(turn("turn-1"));
            for i in 2..=turn_count {
                store.append(turn(&format!("turn-{i}")));
            }
            let mut registry = SectionRegistry::new();
            let mut placed = Vec::new();
            let mut top = 0;
            let keys = store
                .iter()
                .flat_map(|t| SectionId::ALL.map(|s| (t.id().clone(), s)))
                .take(heights.len());
            for ((turn_id, section), height) in keys.zip(heights) {
                let extent = SectionExtent::new(top, *height);
                registry.register(&turn_id, section, extent);
                placed.push((Selection::new(turn_id, section), extent));
                top += height;
            }
            (store, registry, placed)
        }

        proptest! {
            #[test]
            fn offset_inside_one_extent_selects_it(
                heights in prop::collection::vec(1..30usize, 1..12),
                pick in any::<prop::sample::Index>(),
                within in 0..30usize,
            ) {
                let (store, registry, placed) = build(&heights);
                let (expected, extent) = &placed[pick.index(placed.len())];
                let probe = extent.top + within % extent.height;
                prop_assert_eq!(resolve_section(&store, &registry, probe), Some(expected.clone()));
            }

            #[test]
            fn offset_past_every_extent_selects_nothing(
                heights in prop::collection::vec(1..30usize, 1..12),
                beyond in 0..1000usize,
            ) {
                let (store, registry, placed) = build(&heights);
                let end = placed.last().map_or(0, |(_, e)| e.bottom());
                prop_assert_eq!(resolve_section(&store, &registry, end + beyond), None);
            }
        }
    }
}
