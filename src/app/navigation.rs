//! Discrete "jump to turn/section" commands with smooth scrolling.

use tracing::debug;

use crate::conversation::{SectionId, TurnId, TurnStore};
use crate::error::ViewError;
use crate::layout::SectionRegistry;
use crate::state::{Selection, SelectionSource, StateChange, ViewState};

/// Lines left visible above a jump target.
pub const DEFAULT_HEADER_OFFSET: usize = 1;

/// Duration of a smooth scroll.
pub const SCROLL_ANIMATION_MS: u64 = 180;

/// An in-flight smooth scroll between two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnimation {
    from: usize,
    to: usize,
    started_ms: u64,
    duration_ms: u64,
}

impl ScrollAnimation {
    pub const fn new(from: usize, to: usize, started_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            started_ms,
            duration_ms,
        }
    }

    pub const fn target(&self) -> usize {
        self.to
    }

    pub const fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration_ms
    }

    /// Offset at `now_ms`, eased out (fast start, gentle landing).
    pub fn offset_at(&self, now_ms: u64) -> usize {
        if self.is_finished(now_ms) {
            return self.to;
        }
        #[allow(clippy::cast_precision_loss)]
        let t = now_ms.saturating_sub(self.started_ms) as f64 / self.duration_ms as f64;
        let eased = 1.0 - (1.0 - t).powi(3);
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            let from = self.from as f64;
            let to = self.to as f64;
            (to - from).mul_add(eased, from).round() as usize
        }
    }
}

/// Issues jumps and owns the single in-flight scroll animation.
///
/// A new jump always replaces the previous animation; there is no separate
/// cancel handle beyond [`NavigationController::cancel`], which user scrolling
/// calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    header_offset: usize,
    duration_ms: u64,
    animation: Option<ScrollAnimation>,
}

impl NavigationController {
    pub const fn new(header_offset: usize, duration_ms: u64) -> Self {
        Self {
            header_offset,
            duration_ms,
            animation: None,
        }
    }

    pub const fn header_offset(&self) -> usize {
        self.header_offset
    }

    /// Select `(turn, section)` and start scrolling to it.
    ///
    /// The selection is updated before the extent lookup, so a read right
    /// after this call always yields the requested pair, whatever the outcome
    /// of the scroll. `section` defaults to the AI overview.
    ///
    /// Returns the target offset the viewport is now animating to.
    ///
    /// # Errors
    ///
    /// - [`ViewError::InvalidNavigationTarget`] if `turn` is not in the store;
    ///   nothing changes.
    /// - [`ViewError::MeasurementUnavailable`] if the target has no extent yet;
    ///   the selection has still been updated but no scroll was started.
    #[allow(clippy::too_many_arguments)]
    pub fn jump_to(
        &mut self,
        state: &mut ViewState,
        store: &TurnStore,
        registry: &SectionRegistry,
        turn: &TurnId,
        section: Option<SectionId>,
        current_offset: usize,
        max_offset: usize,
        now_ms: u64,
    ) -> Result<usize, ViewError> {
        if !store.contains(turn) {
            return Err(ViewError::InvalidNavigationTarget(turn.clone()));
        }
        let section = section.unwrap_or_default();
        state.apply(StateChange::Select(
            Selection::new(turn.clone(), section),
            SelectionSource::Jump,
        ));

        let Some(extent) = registry.get(turn, section) else {
            debug!(%turn, %section, "jump target not measured; selection only");
            return Err(ViewError::MeasurementUnavailable {
                turn: turn.clone(),
                section,
            });
        };

        let target = extent.top.saturating_sub(self.header_offset).min(max_offset);
        self.animation = Some(ScrollAnimation::new(
            current_offset,
            target,
            now_ms,
            self.duration_ms,
        ));
        debug!(%turn, %section, from = current_offset, to = target, "jump started");
        Ok(target)
    }

    /// Advance the animation. Returns the new offset while animating.
    pub fn step(&mut self, now_ms: u64) -> Option<usize> {
        let animation = self.animation?;
        let offset = animation.offset_at(now_ms);
        if animation.is_finished(now_ms) {
            self.animation = None;
        }
        Some(offset)
    }

    pub const fn cancel(&mut self) {
        self.animation = None;
    }

    pub const fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation_target(&self) -> Option<usize> {
        self.animation.map(|a| a.target())
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_OFFSET, SCROLL_ANIMATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Turn, TurnContent};
    use crate::layout::SectionExtent;

    fn setup() -> (TurnStore, SectionRegistry, ViewState) {
        let turn = Turn::new(TurnId::from("turn-1"), "q", TurnContent::default());
        let store = TurnStore::new(turn);
        let mut registry = SectionRegistry::new();
        registry.register(
            &TurnId::from("turn-1"),
            SectionId::Evidence,
            SectionExtent::new(40, 12),
        );
        let state = ViewState::new(Selection::new(TurnId::from("turn-1"), SectionId::AiOverview));
        (store, registry, state)
    }

    #[test]
    fn test_jump_selects_and_targets_extent_minus_header() {
        let (store, registry, mut state) = setup();
        let mut nav = NavigationController::new(1, 100);
        let target = nav
            .jump_to(
                &mut state,
                &store,
                &registry,
                &TurnId::from("turn-1"),
                Some(SectionId::Evidence),
                0,
                500,
                0,
            )
            .unwrap();
        assert_eq!(target, 39);
        assert_eq!(state.selection().section, SectionId::Evidence);
        assert!(nav.is_animating());
    }

    #[test]
    fn test_jump_without_extent_still_selects() {
        let (store, registry, mut state) = setup();
        let mut nav = NavigationController::default();
        let err = nav
            .jump_to(
                &mut state,
                &store,
                &registry,
                &TurnId::from("turn-1"),
                Some(SectionId::FollowUp),
                0,
                500,
                0,
            )
            .unwrap_err();
        assert!(matches!(err, ViewError::MeasurementUnavailable { .. }));
        assert_eq!(
            state.selection(),
            &Selection::new(TurnId::from("turn-1"), SectionId::FollowUp)
        );
        assert!(!nav.is_animating());
    }

    #[test]
    fn test_jump_to_unknown_turn_changes_nothing() {
        let (store, registry, mut state) = setup();
        let before = state.clone();
        let mut nav = NavigationController::default();
        let err = nav
            .jump_to(
                &mut state,
                &store,
                &registry,
                &TurnId::from("turn-7"),
                None,
                0,
                500,
                0,
            )
            .unwrap_err();
        assert_eq!(err, ViewError::InvalidNavigationTarget(TurnId::from("turn-7")));
        assert_eq!(state, before);
    }

    #[test]
    fn test_target_is_clamped_to_max_offset() {
        let (store, registry, mut state) = setup();
        let mut nav = NavigationController::default();
        let target = nav
            .jump_to(
                &mut state,
                &store,
                &registry,
                &TurnId::from("turn-1"),
                Some(SectionId::Evidence),
                0,
                20,
                0,
            )
            .unwrap();
        assert_eq!(target, 20);
    }

    #[test]
    fn test_second_jump_supersedes_first() {
        let (store, mut registry, mut state) = setup();
        registry.register(
            &TurnId::from("turn-1"),
            SectionId::AiOverview,
            SectionExtent::new(2, 10),
        );
        let mut nav = NavigationController::new(1, 100);
        let turn = TurnId::from("turn-1");
        nav.jump_to(&mut state, &store, &registry, &turn, Some(SectionId::Evidence), 0, 500, 0)
            .unwrap();
        nav.jump_to(&mut state, &store, &registry, &turn, None, 20, 500, 30)
            .unwrap();
        assert_eq!(nav.animation_target(), Some(1));
        assert_eq!(state.selection().section, SectionId::AiOverview);
    }

    #[test]
    fn test_animation_reaches_target_and_stops() {
        let mut nav = NavigationController::new(0, 100);
        nav.animation = Some(ScrollAnimation::new(0, 50, 1_000, 100));
        let mid = nav.step(1_050).unwrap();
        assert!(mid > 0 && mid < 50, "mid-animation offset {mid}");
        assert_eq!(nav.step(1_100), Some(50));
        assert!(!nav.is_animating());
        assert_eq!(nav.step(1_200), None);
    }

    #[test]
    fn test_animation_scrolls_upward() {
        let animation = ScrollAnimation::new(80, 10, 0, 100);
        let mid = animation.offset_at(50);
        assert!(mid < 80 && mid > 10);
        assert_eq!(animation.offset_at(100), 10);
    }
}
