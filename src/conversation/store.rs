//! Append-only, ordered collection of turns.

use super::turn::{Turn, TurnId};

/// Ordered turns of the session. Turns are only ever appended.
///
/// The store is never empty: it is created from a seed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnStore {
    turns: Vec<Turn>,
}

impl TurnStore {
    pub fn new(seed: Turn) -> Self {
        Self { turns: vec![seed] }
    }

    /// Append a turn at the end.
    ///
    /// Returns `false` (and stores nothing) if the id is already taken.
    pub fn append(&mut self, turn: Turn) -> bool {
        if self.contains(turn.id()) {
            return false;
        }
        self.turns.push(turn);
        true
    }

    pub fn get(&self, id: &TurnId) -> Option<&Turn> {
        self.turns.iter().find(|t| t.id() == id)
    }

    /// Creation-order position of a turn.
    pub fn position(&self, id: &TurnId) -> Option<usize> {
        self.turns.iter().position(|t| t.id() == id)
    }

    pub fn contains(&self, id: &TurnId) -> bool {
        self.position(id).is_some()
    }

    pub fn get_index(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn first(&self) -> &Turn {
        &self.turns[0]
    }

    pub fn last(&self) -> &Turn {
        &self.turns[self.turns.len() - 1]
    }

    /// Turns in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a TurnStore {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Hands out ids of the form `turn-N` from a monotonic counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnIdGenerator {
    next: u64,
}

impl TurnIdGenerator {
    pub const fn new(start: u64) -> Self {
        Self { next: start }
    }

    /// Next id not already present in `store`.
    pub fn next_id(&mut self, store: &TurnStore) -> TurnId {
        loop {
            let id = TurnId::new(format!("turn-{}", self.next));
            self.next += 1;
            if !store.contains(&id) {
                return id;
            }
        }
    }
}

impl Default for TurnIdGenerator {
    fn default() -> Self {
        Self::new(2)
    }
}
