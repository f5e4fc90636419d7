//! Transposition table: a direct-mapped cache of previously searched
//! positions, keyed by Zobrist hash.

use crate::types::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Alpha, // upper bound: true score <= stored score
    Beta,  // lower bound: true score >= stored score
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    pub bound: Bound,
}

pub struct TranspositionTable {
    table: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// `size_mb`: desired size in megabytes. Rounded down to a power of two
    /// number of entries so indexing is a mask, not a modulo.
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let budget_entries = (size_mb * 1024 * 1024) / entry_size;
        let num_entries = budget_entries.next_power_of_two() / 2;
        let num_entries = num_entries.max(1024);
        TranspositionTable {
            table: vec![None; num_entries],
            mask: num_entries - 1,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        match self.table[self.index(key)] {
            Some(entry) if entry.key == key => Some(entry),
            _ => None,
        }
    }

    /// Depth-preferred replacement on a same-key hit; unconditional
    /// overwrite on an index collision between two different keys.
    pub fn store(&mut self, key: u64, best_move: Move, score: i32, depth: u32, bound: Bound) {
        let idx = self.index(key);
        let should_replace = match &self.table[idx] {
            Some(existing) if existing.key == key => depth >= existing.depth,
            _ => true,
        };
        if should_replace {
            self.table[idx] = Some(TTEntry {
                key,
                best_move,
                score,
                depth,
                bound,
            });
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.table {
            *slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TT_SIZE_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NO_MOVE;

    #[test]
    fn probe_misses_on_empty_table() {
        let tt = TranspositionTable::new(1);
        assert!(tt.probe(12345).is_none());
    }

    #[test]
    fn deeper_entry_replaces_shallower_same_key_entry() {
        let mut tt = TranspositionTable::new(1);
        tt.store(7, NO_MOVE, 10, 2, Bound::Exact);
        tt.store(7, NO_MOVE, 20, 5, Bound::Exact);
        let entry = tt.probe(7).unwrap();
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 20);
    }

    #[test]
    fn shallower_store_does_not_overwrite_deeper_same_key_entry() {
        let mut tt = TranspositionTable::new(1);
        tt.store(7, NO_MOVE, 20, 5, Bound::Exact);
        tt.store(7, NO_MOVE, 10, 2, Bound::Exact);
        let entry = tt.probe(7).unwrap();
        assert_eq!(entry.depth, 5);
    }
}
