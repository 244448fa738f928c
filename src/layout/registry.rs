//! Measured vertical extents of every (turn, section) pair.
//!
//! Extents are a best-effort cache of the last layout pass. Between a content
//! change and the next measurement they may be stale, so readers must not
//! treat them as authoritative.

use std::collections::HashMap;

use crate::conversation::{SectionId, TurnId};

/// Line span of a section in the scrollable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionExtent {
    pub top: usize,
    pub height: usize,
}

impl SectionExtent {
    pub const fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    /// First line past the section.
    pub const fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// Half-open containment: `top <= line < top + height`.
    pub const fn contains(&self, line: usize) -> bool {
        self.top <= line && line < self.bottom()
    }
}

type TurnExtents = [Option<SectionExtent>; SectionId::ALL.len()];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    extents: HashMap<TurnId, TurnExtents>,
    generation: u64,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an extent, overwriting any previous one for the same key.
    pub fn register(&mut self, turn: &TurnId, section: SectionId, extent: SectionExtent) {
        let slots = self.extents.entry(turn.clone()).or_default();
        slots[section.index()] = Some(extent);
        self.generation += 1;
    }

    pub fn get(&self, turn: &TurnId, section: SectionId) -> Option<SectionExtent> {
        self.extents.get(turn)?[section.index()]
    }

    /// Snapshot of every known extent, ordered by top line.
    pub fn all(&self) -> Vec<(TurnId, SectionId, SectionExtent)> {
        let mut all: Vec<_> = self
            .extents
            .iter()
            .flat_map(|(turn, slots)| {
                SectionId::ALL.into_iter().filter_map(move |section| {
                    slots[section.index()].map(|extent| (turn.clone(), section, extent))
                })
            })
            .collect();
        all.sort_by_key(|(_, section, extent)| (extent.top, *section));
        all
    }

    /// Drop all extents of an unmounted turn.
    pub fn forget_turn(&mut self, turn: &TurnId) -> bool {
        let removed = self.extents.remove(turn).is_some();
        if removed {
            self.generation += 1;
        }
        removed
    }

    /// Number of registered (turn, section) extents.
    pub fn len(&self) -> usize {
        self.extents
            .values()
            .map(|slots| slots.iter().flatten().count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Incremented by every mutation; useful to tell whether a remeasure happened.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_containment_is_half_open() {
        let extent = SectionExtent::new(10, 5);
        assert!(!extent.contains(9));
        assert!(extent.contains(10));
        assert!(extent.contains(14));
        assert!(!extent.contains(15));
    }

    #[test]
    fn test_zero_height_extent_contains_nothing() {
        let extent = SectionExtent::new(3, 0);
        assert!(!extent.contains(3));
    }

    #[test]
    fn test_register_overwrites_previous_extent() {
        let mut registry = SectionRegistry::new();
        let turn = TurnId::from("turn-1");
        registry.register(&turn, SectionId::Evidence, SectionExtent::new(0, 4));
        registry.register(&turn, SectionId::Evidence, SectionExtent::new(8, 2));
        assert_eq!(
            registry.get(&turn, SectionId::Evidence),
            Some(SectionExtent::new(8, 2))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_key_is_none() {
        let registry = SectionRegistry::new();
        assert_eq!(registry.get(&TurnId::from("turn-1"), SectionId::FollowUp), None);
    }

    #[test]
    fn test_all_is_ordered_by_top() {
        let mut registry = SectionRegistry::new();
        let a = TurnId::from("turn-1");
        let b = TurnId::from("turn-2");
        registry.register(&b, SectionId::AiOverview, SectionExtent::new(40, 10));
        registry.register(&a, SectionId::Visualizations, SectionExtent::new(10, 10));
        registry.register(&a, SectionId::AiOverview, SectionExtent::new(0, 10));
        let tops: Vec<_> = registry.all().iter().map(|(_, _, e)| e.top).collect();
        assert_eq!(tops, vec![0, 10, 40]);
    }

    #[test]
    fn test_forget_turn_removes_its_extents() {
        let mut registry = SectionRegistry::new();
        let turn = TurnId::from("turn-1");
        registry.register(&turn, SectionId::AiOverview, SectionExtent::new(0, 3));
        let generation = registry.generation();
        assert!(registry.forget_turn(&turn));
        assert!(registry.is_empty());
        assert!(registry.generation() > generation);
        assert!(!registry.forget_turn(&turn));
    }
}
