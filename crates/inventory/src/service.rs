//! Caller-facing API: raw form input in, validated records out.
//!
//! A UI (or the console binary) talks to the inventory only through
//! [`InventoryService`]. Every mutator validates the whole form before touching
//! the store, so a rejected call leaves no partial change behind.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use partsbin_core::{InventoryError, InventoryResult, PartId, ProductId};
use partsbin_events::Subscription;

use crate::events::InventoryEvent;
use crate::part::{Part, PartKind};
use crate::product::Product;
use crate::seed::seed_sample_data;
use crate::store::Inventory;
use crate::validation::{PartForm, ProductForm, validate_part_form, validate_product_form};

/// A part id reserved when the add-part form opens.
///
/// Retrying a failed save reuses the same id. Dropping the draft abandons the
/// id for good, leaving a gap in the sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct PartDraft {
    id: PartId,
}

impl PartDraft {
    pub fn id(&self) -> PartId {
        self.id
    }
}

/// A product id reserved when the add-product form opens, together with the
/// parts picked so far.
#[derive(Debug, PartialEq, Eq)]
pub struct ProductDraft {
    id: ProductId,
    parts: Vec<PartId>,
}

impl ProductDraft {
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn parts(&self) -> &[PartId] {
        &self.parts
    }

    pub fn add_part(&mut self, part_id: PartId) {
        self.parts.push(part_id);
    }

    /// Remove the most recently added reference to `part_id`.
    pub fn remove_part(&mut self, part_id: PartId) -> bool {
        match self.parts.iter().rposition(|p| *p == part_id) {
            Some(pos) => {
                self.parts.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// A failed draft commit. Hands the draft back so the caller can fix the form
/// and retry without allocating a new id.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct DraftRejected<D> {
    pub draft: D,
    pub error: InventoryError,
}

/// Handle for a deletion awaiting confirmation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteToken(Uuid);

impl core::fmt::Display for DeleteToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum PendingDelete {
    Part(PartId),
    Product(ProductId),
}

/// What a confirmed deletion removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deleted {
    Part(Part),
    Product(Product),
}

/// The inventory API consumed by the UI layer.
#[derive(Debug, Default)]
pub struct InventoryService {
    inventory: Inventory,
    pending: HashMap<DeleteToken, PendingDelete>,
}

impl InventoryService {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            pending: HashMap::new(),
        }
    }

    /// A service over a store preloaded with the sample data.
    pub fn with_sample_data() -> InventoryResult<Self> {
        let mut inventory = Inventory::new();
        seed_sample_data(&mut inventory)?;
        Ok(Self::new(inventory))
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn subscribe(&mut self) -> Subscription<InventoryEvent> {
        self.inventory.subscribe()
    }

    // ---------------------------------------------------------------------
    // Create
    // ---------------------------------------------------------------------

    /// Validate `form` and store a new part. The id is allocated only once the
    /// form is valid, so rejected calls consume nothing.
    pub fn create_part(&mut self, kind: PartKind, form: &PartForm) -> InventoryResult<Part> {
        let input = validate_part_form(kind, form)?;
        let id = self.inventory.allocate_part_id();
        let part = input.into_part(id);
        self.inventory.add_part(part.clone());
        Ok(part)
    }

    pub fn create_product(&mut self, form: &ProductForm) -> InventoryResult<Product> {
        let input = validate_product_form(form)?;
        let id = self.inventory.allocate_product_id();
        let product = input.into_product(id, Vec::new());
        self.inventory.add_product(product.clone())?;
        Ok(product)
    }

    /// Reserve a part id for an add-part form.
    pub fn begin_part(&mut self) -> PartDraft {
        let id = self.inventory.allocate_part_id();
        tracing::debug!(part_id = %id, "part id reserved");
        PartDraft { id }
    }

    /// Save a part under the draft's reserved id.
    pub fn commit_part(
        &mut self,
        draft: PartDraft,
        kind: PartKind,
        form: &PartForm,
    ) -> Result<Part, DraftRejected<PartDraft>> {
        let input = match validate_part_form(kind, form) {
            Ok(input) => input,
            Err(e) => {
                return Err(DraftRejected {
                    draft,
                    error: e.into(),
                });
            }
        };
        let part = input.into_part(draft.id);
        self.inventory.add_part(part.clone());
        Ok(part)
    }

    /// Reserve a product id for an add-product form.
    pub fn begin_product(&mut self) -> ProductDraft {
        let id = self.inventory.allocate_product_id();
        tracing::debug!(product_id = %id, "product id reserved");
        ProductDraft {
            id,
            parts: Vec::new(),
        }
    }

    /// Save a product, with the parts picked on the draft, under its reserved id.
    pub fn commit_product(
        &mut self,
        draft: ProductDraft,
        form: &ProductForm,
    ) -> Result<Product, DraftRejected<ProductDraft>> {
        let input = match validate_product_form(form) {
            Ok(input) => input,
            Err(e) => {
                return Err(DraftRejected {
                    draft,
                    error: e.into(),
                });
            }
        };
        let product = input.into_product(draft.id, draft.parts.clone());
        match self.inventory.add_product(product.clone()) {
            Ok(()) => Ok(product),
            Err(error) => Err(DraftRejected { draft, error }),
        }
    }

    // ---------------------------------------------------------------------
    // Read
    // ---------------------------------------------------------------------

    pub fn get_part(&self, id: PartId) -> InventoryResult<&Part> {
        self.inventory.part(id)
    }

    pub fn get_product(&self, id: ProductId) -> InventoryResult<&Product> {
        self.inventory.product(id)
    }

    /// Parts whose name contains `text`, ignoring case. Blank text lists all.
    pub fn find_parts(&self, text: &str) -> Vec<&Part> {
        self.inventory.lookup_parts_by_name(text)
    }

    pub fn find_products(&self, text: &str) -> Vec<&Product> {
        self.inventory.lookup_products_by_name(text)
    }

    /// The main-screen search box: id first, then name.
    pub fn search_parts(&self, text: &str) -> Vec<&Part> {
        self.inventory.search_parts(text)
    }

    pub fn search_products(&self, text: &str) -> Vec<&Product> {
        self.inventory.search_products(text)
    }

    pub fn all_parts(&self) -> &[Part] {
        self.inventory.all_parts()
    }

    pub fn all_products(&self) -> &[Product] {
        self.inventory.all_products()
    }

    pub fn associated_parts(&self, product_id: ProductId) -> InventoryResult<Vec<&Part>> {
        self.inventory.associated_parts(product_id)
    }

    // ---------------------------------------------------------------------
    // Update
    // ---------------------------------------------------------------------

    /// Replace a part's attributes. `kind` may differ from the stored kind.
    pub fn update_part(
        &mut self,
        id: PartId,
        kind: PartKind,
        form: &PartForm,
    ) -> InventoryResult<Part> {
        self.inventory.part(id)?;
        let input = validate_part_form(kind, form)?;
        self.inventory.update_part(id, input).cloned()
    }

    /// Replace a product's attributes and association list.
    pub fn update_product(
        &mut self,
        id: ProductId,
        form: &ProductForm,
        associated_parts: Vec<PartId>,
    ) -> InventoryResult<Product> {
        self.inventory.product(id)?;
        let input = validate_product_form(form)?;
        self.inventory
            .update_product(id, input, associated_parts)
            .cloned()
    }

    // ---------------------------------------------------------------------
    // Delete
    // ---------------------------------------------------------------------

    pub fn delete_part(&mut self, id: PartId) -> InventoryResult<Part> {
        let part = self.inventory.delete_part(id)?;
        self.forget(PendingDelete::Part(id));
        Ok(part)
    }

    /// Fails with `HasDependents` while the product has associated parts.
    pub fn delete_product(&mut self, id: ProductId) -> InventoryResult<Product> {
        let product = self.inventory.delete_product(id)?;
        self.forget(PendingDelete::Product(id));
        Ok(product)
    }

    /// First phase of a confirmed part deletion.
    ///
    /// Checks the part exists and is unused, then returns a token for
    /// [`InventoryService::confirm_delete`].
    pub fn request_delete_part(&mut self, id: PartId) -> InventoryResult<DeleteToken> {
        self.inventory.part(id)?;
        let users = self.inventory.products_using(id).len();
        if users > 0 {
            return Err(InventoryError::has_dependents(id, users));
        }
        Ok(self.park(PendingDelete::Part(id)))
    }

    pub fn request_delete_product(&mut self, id: ProductId) -> InventoryResult<DeleteToken> {
        let parts = self.inventory.product(id)?.associated_parts().len();
        if parts > 0 {
            return Err(InventoryError::has_dependents(id, parts));
        }
        Ok(self.park(PendingDelete::Product(id)))
    }

    /// At most one token is held per record: asking again hands back the
    /// token already issued.
    fn park(&mut self, pending: PendingDelete) -> DeleteToken {
        if let Some((token, _)) = self.pending.iter().find(|(_, p)| **p == pending) {
            return *token;
        }
        let token = DeleteToken(Uuid::now_v7());
        tracing::debug!(%token, ?pending, "delete awaiting confirmation");
        self.pending.insert(token, pending);
        token
    }

    /// Second phase: perform the deletion. The guards are checked again, since
    /// the store may have changed since the request. Tokens are single use.
    pub fn confirm_delete(&mut self, token: DeleteToken) -> InventoryResult<Deleted> {
        let pending = self
            .pending
            .remove(&token)
            .ok_or(InventoryError::UnknownDeleteToken)?;

        match pending {
            PendingDelete::Part(id) => self.delete_part(id).map(Deleted::Part),
            PendingDelete::Product(id) => self.delete_product(id).map(Deleted::Product),
        }
    }

    fn forget(&mut self, target: PendingDelete) {
        self.pending.retain(|_, pending| *pending != target);
    }

    /// Deletions requested but neither confirmed nor cancelled.
    pub fn pending_deletes(&self) -> usize {
        self.pending.len()
    }

    /// Drop a pending deletion without performing it.
    pub fn cancel_delete(&mut self, token: DeleteToken) -> InventoryResult<()> {
        self.pending
            .remove(&token)
            .map(|_| ())
            .ok_or(InventoryError::UnknownDeleteToken)
    }

    // ---------------------------------------------------------------------
    // Associations
    // ---------------------------------------------------------------------

    pub fn associate(&mut self, product_id: ProductId, part_id: PartId) -> InventoryResult<()> {
        self.inventory.associate(product_id, part_id)
    }

    pub fn disassociate(&mut self, product_id: ProductId, part_id: PartId) -> InventoryResult<()> {
        self.inventory.disassociate(product_id, part_id)
    }
}
