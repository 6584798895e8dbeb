//! Lock-guarded handle for using one inventory from several threads.

use std::sync::{Arc, PoisonError, RwLock};

use partsbin_core::{PartId, ProductId};

use crate::part::Part;
use crate::product::Product;
use crate::store::Inventory;

/// Thread-safe handle to one [`Inventory`].
///
/// All mutations go through the write guard, so id allocation and
/// check-then-mutate sequences (delete guards, association checks) run under a
/// single writer. Reads take the read guard and hand back owned snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedInventory {
    inner: Arc<RwLock<Inventory>>,
}

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inventory)),
        }
    }

    /// Run `f` against a read guard.
    ///
    /// A poisoned lock is recovered: every store mutation either completes or
    /// returns before changing anything, so the data stays consistent.
    pub fn read<R>(&self, f: impl FnOnce(&Inventory) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` against the write guard.
    pub fn write<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn parts_snapshot(&self) -> Vec<Part> {
        self.read(|inv| inv.all_parts().to_vec())
    }

    pub fn products_snapshot(&self) -> Vec<Product> {
        self.read(|inv| inv.all_products().to_vec())
    }

    pub fn part(&self, id: PartId) -> Option<Part> {
        self.read(|inv| inv.lookup_part(id).cloned())
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.read(|inv| inv.lookup_product(id).cloned())
    }
}
