use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::Keyboard;

/// Memoized month grids keyed by `(year, month)`.
///
/// Implementations must tolerate concurrent callers. `put` is insert-if-absent:
/// the first writer for a key wins and later writers leave the entry alone.
/// Entries never expire.
pub trait GridCache: Send + Sync {
    fn get(&self, year: i32, month: u32) -> Option<Keyboard>;

    /// Returns `true` when the grid was stored, `false` when the key was
    /// already present.
    fn put(&self, year: i32, month: u32, grid: Keyboard) -> bool;
}

#[derive(Default)]
pub struct InMemoryGridCache {
    grids: RwLock<HashMap<(i32, u32), Keyboard>>,
}

impl InMemoryGridCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.grids.read().map(|g| g.len()).unwrap_or_else(|e| e.into_inner().len())
    }
}

impl GridCache for InMemoryGridCache {
    fn get(&self, year: i32, month: u32) -> Option<Keyboard> {
        let grids = self.grids.read().unwrap_or_else(|e| e.into_inner());
        grids.get(&(year, month)).cloned()
    }

    fn put(&self, year: i32, month: u32, grid: Keyboard) -> bool {
        let mut grids = self.grids.write().unwrap_or_else(|e| e.into_inner());
        match grids.entry((year, month)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(grid);
                true
            }
        }
    }
}
