use super::*;

use std::collections::{TryReserveError, VecDeque};

/// A pending node together with the scores the frontier orders it by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub node: NodeId,
    pub priority: i32,
    pub heuristic: i32,
}

impl FrontierEntry {
    pub fn new(id: NodeId, node: &SearchNode) -> Self {
        Self {
            node: id,
            priority: node.priority,
            heuristic: node.heuristic,
        }
    }

    /// Strictly ahead of `other` in `(priority, heuristic)` order, both descending.
    #[inline]
    fn outranks(&self, other: &FrontierEntry) -> bool {
        (self.priority, self.heuristic) > (other.priority, other.heuristic)
    }
}

/// Pending nodes, always taken from the front. The strategy decides where a
/// new entry goes in.
#[derive(Debug, Clone)]
pub struct Frontier {
    entries: VecDeque<FrontierEntry>,
    strategy: Strategy,
}

impl Frontier {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            entries: VecDeque::new(),
            strategy,
        }
    }

    pub fn push(&mut self, entry: FrontierEntry) -> Result<(), TryReserveError> {
        self.entries.try_reserve(1)?;
        match self.strategy {
            Strategy::DepthFirst => self.entries.push_front(entry),
            Strategy::BreadthFirst => self.entries.push_back(entry),
            Strategy::BestFirst | Strategy::AStar => self.insert_ordered(entry),
        }
        Ok(())
    }

    /// Inserts before the first entry that `entry` does not rank below. Equal
    /// scores therefore go in front of the entries already queued.
    fn insert_ordered(&mut self, entry: FrontierEntry) {
        match self.entries.iter().position(|queued| !queued.outranks(&entry)) {
            Some(idx) => self.entries.insert(idx, entry),
            None => self.entries.push_back(entry),
        }
    }

    pub fn pop_front(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter()
    }
}
