//! The shared view state: active selection and the loading flag.
//!
//! Every writer (scroll tracking, navigation, follow-up dispatch) goes through
//! [`ViewState::apply`], so a reader never sees a turn id from one update paired
//! with a section id from another.

use tracing::debug;

use crate::conversation::{SectionId, TurnId, TurnStore};

/// The highlighted (turn, section) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub turn: TurnId,
    pub section: SectionId,
}

impl Selection {
    pub const fn new(turn: TurnId, section: SectionId) -> Self {
        Self { turn, section }
    }
}

/// Which writer produced a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Scroll,
    Jump,
    Repair,
    /// Re-resolved after the document was laid out again.
    Relayout,
}

impl SelectionSource {
    /// Whether the change follows a user scroll or jump.
    pub const fn is_navigation(self) -> bool {
        matches!(self, Self::Scroll | Self::Jump)
    }
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Select(Selection, SelectionSource),
    SetLoading(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    selection: Selection,
    loading: bool,
    selection_revision: u64,
    navigation_revision: u64,
}

impl ViewState {
    pub const fn new(selection: Selection) -> Self {
        Self {
            selection,
            loading: false,
            selection_revision: 0,
            navigation_revision: 0,
        }
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped every time the selection actually changes.
    pub const fn selection_revision(&self) -> u64 {
        self.selection_revision
    }

    /// Bumped only for selection changes made by scrolling or jumping.
    pub const fn navigation_revision(&self) -> u64 {
        self.navigation_revision
    }

    /// Apply one change. Returns true if anything observable changed.
    pub fn apply(&mut self, change: StateChange) -> bool {
        match change {
            StateChange::Select(selection, source) => {
                if selection == self.selection {
                    return false;
                }
                debug!(
                    turn = %selection.turn,
                    section = %selection.section,
                    ?source,
                    "selection changed"
                );
                self.selection = selection;
                self.selection_revision += 1;
                if source.is_navigation() {
                    self.navigation_revision += 1;
                }
                true
            }
            StateChange::SetLoading(loading) => {
                if loading == self.loading {
                    return false;
                }
                debug!(loading, "loading flag changed");
                self.loading = loading;
                true
            }
        }
    }

    /// Repoint a dangling selection at the first turn's overview.
    pub fn repair(&mut self, store: &TurnStore) -> bool {
        if store.contains(&self.selection.turn) {
            return false;
        }
        let fallback = Selection::new(store.first().id().clone(), SectionId::AiOverview);
        self.apply(StateChange::Select(fallback, SelectionSource::Repair))
    }
}
