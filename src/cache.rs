//! This module contains the [CandidateCache], which memoizes the still-legal
//! tokens of every cell visited during a fill attempt.
//!
//! The cache is what makes backtracking affordable: when the generator
//! returns to a previously visited cell, it finds the candidate list it left
//! behind, with every token that already led to a dead end removed, instead
//! of recomputing the list and retrying tokens that are known not to work.

use std::collections::HashMap;

/// An append-only cache mapping a cell coordinate `(column, row)` to the
/// list of tokens that are still legal for that cell. Entries are ordered by
/// visit time and can only be removed from the most recent end, which mirrors
/// the order in which the generator backtracks.
///
/// In normal operation every coordinate is inserted at most once per cache
/// lifetime; a fresh cache is constructed for every generation attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateCache {
    candidates: HashMap<(usize, usize), Vec<char>>,
    visits: Vec<(usize, usize)>
}

impl CandidateCache {

    /// Creates a new, empty candidate cache.
    pub fn new() -> CandidateCache {
        CandidateCache {
            candidates: HashMap::new(),
            visits: Vec::new()
        }
    }

    /// Returns the number of entries currently held by this cache.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Indicates whether this cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Indicates whether an entry for the cell at the given position is
    /// present.
    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.candidates.contains_key(&(column, row))
    }

    /// Gets a mutable reference to the candidate list of the cell at the
    /// given position, or `None` if that cell has no entry. The returned list
    /// is the one stored when the cell was first visited, minus every token
    /// consumed since, so tokens that already proved to lead to dead ends are
    /// not offered again.
    pub fn candidates_mut(&mut self, column: usize, row: usize)
            -> Option<&mut Vec<char>> {
        self.candidates.get_mut(&(column, row))
    }

    /// Inserts an entry holding the given candidate list for the cell at the
    /// given position. The new entry becomes the most recently visited one.
    pub fn insert(&mut self, column: usize, row: usize,
            candidates: Vec<char>) {
        self.visits.push((column, row));
        self.candidates.insert((column, row), candidates);
    }

    /// Removes and returns the most recently inserted entry, undoing the most
    /// recent visit. Returns `None` if the cache is empty.
    pub fn pop_most_recent(&mut self)
            -> Option<((usize, usize), Vec<char>)> {
        let coordinate = self.visits.pop()?;
        let candidates = self.candidates.remove(&coordinate)?;
        Some((coordinate, candidates))
    }
}
