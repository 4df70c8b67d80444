//! Whole-table handle for hosts that serve many readers and reload data.
//!
//! Readers take an `Arc` snapshot and query it without holding any lock; a
//! reload swaps the whole reference in one step, so no reader can observe a
//! table that is partly old and partly new.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::query::ScoredTable;

const LOG_TARGET: &str = "cafe_scout::shared";

#[derive(Debug)]
pub struct SharedTable {
    current: RwLock<Arc<ScoredTable>>,
}

impl SharedTable {
    pub fn new(table: ScoredTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// The table in force right now.
    pub fn snapshot(&self) -> Arc<ScoredTable> {
        Arc::clone(&self.current.read())
    }

    /// Install a freshly built table and return the one it replaces.
    pub fn replace(&self, table: ScoredTable) -> Arc<ScoredTable> {
        let next = Arc::new(table);
        let units = next.total_units();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        log::info!(
            target: LOG_TARGET,
            "Swapped scored table: {} -> {} units",
            previous.total_units(),
            units
        );
        previous
    }
}
