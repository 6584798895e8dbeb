//! The inventory store: every part and product, plus the id counters.
//!
//! Collections keep insertion order for display. Lookups, updates and deletes
//! locate records by id, never by position, so deletes leave the remaining
//! records addressable.

use std::sync::Arc;

use chrono::Utc;

use partsbin_core::{
    Entity, IdAllocator, InventoryError, InventoryResult, PartId, ProductId,
};
use partsbin_events::{EventBus, InMemoryEventBus, Subscription};

use crate::events::InventoryEvent;
use crate::part::{Part, PartInput};
use crate::product::{Product, ProductInput};

/// Case-insensitive substring match on the entity name. A blank query matches
/// everything.
fn name_matches<E: Entity>(entity: &E, needle: &str) -> bool {
    needle.is_empty() || entity.name().to_lowercase().contains(needle)
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// In-memory registry of parts and products.
///
/// Owned by the process entry point and passed by reference to callers; there
/// is no global instance. See [`crate::SharedInventory`] for multi-threaded use.
#[derive(Debug, Default)]
pub struct Inventory {
    parts: Vec<Part>,
    products: Vec<Product>,
    part_ids: IdAllocator<PartId>,
    product_ids: IdAllocator<ProductId>,
    bus: Option<Arc<InMemoryEventBus<InventoryEvent>>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish change notifications to `bus`.
    pub fn with_event_bus(mut self, bus: Arc<InMemoryEventBus<InventoryEvent>>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Subscribe to change notifications, creating the bus on first use.
    pub fn subscribe(&mut self) -> Subscription<InventoryEvent> {
        self.bus
            .get_or_insert_with(|| Arc::new(InMemoryEventBus::new()))
            .subscribe()
    }

    fn publish(&self, event: InventoryEvent) {
        let Some(bus) = &self.bus else {
            return;
        };
        if let Err(e) = bus.publish(event) {
            tracing::warn!(error = ?e, "failed to publish inventory change");
        }
    }

    // ---------------------------------------------------------------------
    // Id allocation
    // ---------------------------------------------------------------------

    /// Consume the next part id. Never reused, even if the creation it was
    /// meant for is abandoned.
    pub fn allocate_part_id(&mut self) -> PartId {
        self.part_ids.allocate()
    }

    pub fn allocate_product_id(&mut self) -> ProductId {
        self.product_ids.allocate()
    }

    pub fn next_part_id(&self) -> PartId {
        self.part_ids.peek()
    }

    pub fn next_product_id(&self) -> ProductId {
        self.product_ids.peek()
    }

    // ---------------------------------------------------------------------
    // Parts
    // ---------------------------------------------------------------------

    /// Append a part. The id must come from [`Inventory::allocate_part_id`].
    pub fn add_part(&mut self, part: Part) {
        let part_id = part.id();
        tracing::info!(%part_id, name = part.name(), kind = %part.kind(), "part added");
        self.parts.push(part);
        self.publish(InventoryEvent::PartAdded {
            part_id,
            occurred_at: Utc::now(),
        });
    }

    pub fn all_parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn lookup_part(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id() == id)
    }

    /// Like [`Inventory::lookup_part`], with a `NotFound` error.
    pub fn part(&self, id: PartId) -> InventoryResult<&Part> {
        self.lookup_part(id).ok_or_else(|| InventoryError::not_found(id))
    }

    pub fn lookup_parts_by_name(&self, query: &str) -> Vec<&Part> {
        let needle = normalize_query(query);
        self.parts.iter().filter(|p| name_matches(*p, &needle)).collect()
    }

    /// Search box semantics: an exact id hit if the text is an existing part
    /// id, otherwise a name search.
    pub fn search_parts(&self, text: &str) -> Vec<&Part> {
        if let Ok(id) = text.parse::<PartId>() {
            if let Some(part) = self.lookup_part(id) {
                return vec![part];
            }
        }
        self.lookup_parts_by_name(text)
    }

    /// Replace the attributes of the part with `id`, keeping its id and
    /// position.
    pub fn update_part(&mut self, id: PartId, input: PartInput) -> InventoryResult<&Part> {
        let pos = self
            .parts
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| InventoryError::not_found(id))?;

        self.parts[pos] = input.into_part(id);
        tracing::info!(part_id = %id, "part updated");
        self.publish(InventoryEvent::PartUpdated {
            part_id: id,
            occurred_at: Utc::now(),
        });
        Ok(&self.parts[pos])
    }

    /// Products whose association list references `part_id`.
    pub fn products_using(&self, part_id: PartId) -> Vec<&Product> {
        self.products.iter().filter(|p| p.references(part_id)).collect()
    }

    /// Remove a part.
    ///
    /// Fails with `HasDependents` while any product still references it, so
    /// association lists never point at a missing part.
    pub fn delete_part(&mut self, id: PartId) -> InventoryResult<Part> {
        let pos = self
            .parts
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| InventoryError::not_found(id))?;

        let users = self.products_using(id).len();
        if users > 0 {
            tracing::warn!(part_id = %id, products = users, "refusing to delete part in use");
            return Err(InventoryError::has_dependents(id, users));
        }

        let removed = self.parts.remove(pos);
        tracing::info!(part_id = %id, "part deleted");
        self.publish(InventoryEvent::PartDeleted {
            part_id: id,
            occurred_at: Utc::now(),
        });
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Products
    // ---------------------------------------------------------------------

    /// Append a product. The id must come from
    /// [`Inventory::allocate_product_id`]; every associated part must exist.
    pub fn add_product(&mut self, product: Product) -> InventoryResult<()> {
        self.ensure_parts_exist(product.associated_parts())?;

        let product_id = product.id();
        tracing::info!(
            %product_id,
            name = product.name(),
            parts = product.associated_parts().len(),
            "product added"
        );
        self.products.push(product);
        self.publish(InventoryEvent::ProductAdded {
            product_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn lookup_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn product(&self, id: ProductId) -> InventoryResult<&Product> {
        self.lookup_product(id).ok_or_else(|| InventoryError::not_found(id))
    }

    fn product_mut(&mut self, id: ProductId) -> InventoryResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| InventoryError::not_found(id))
    }

    pub fn lookup_products_by_name(&self, query: &str) -> Vec<&Product> {
        let needle = normalize_query(query);
        self.products.iter().filter(|p| name_matches(*p, &needle)).collect()
    }

    pub fn search_products(&self, text: &str) -> Vec<&Product> {
        if let Ok(id) = text.parse::<ProductId>() {
            if let Some(product) = self.lookup_product(id) {
                return vec![product];
            }
        }
        self.lookup_products_by_name(text)
    }

    /// Replace the attributes and association list of the product with `id`.
    ///
    /// Nothing changes unless the product and every listed part exist.
    pub fn update_product(
        &mut self,
        id: ProductId,
        input: ProductInput,
        associated_parts: Vec<PartId>,
    ) -> InventoryResult<&Product> {
        let pos = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| InventoryError::not_found(id))?;
        self.ensure_parts_exist(&associated_parts)?;

        self.products[pos] = input.into_product(id, associated_parts);
        tracing::info!(product_id = %id, "product updated");
        self.publish(InventoryEvent::ProductUpdated {
            product_id: id,
            occurred_at: Utc::now(),
        });
        Ok(&self.products[pos])
    }

    /// Remove a product. Fails with `HasDependents` while it has associated
    /// parts; the product is left untouched in that case.
    pub fn delete_product(&mut self, id: ProductId) -> InventoryResult<Product> {
        let pos = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| InventoryError::not_found(id))?;

        let parts = self.products[pos].associated_parts().len();
        if parts > 0 {
            tracing::warn!(product_id = %id, parts, "refusing to delete product with parts");
            return Err(InventoryError::has_dependents(id, parts));
        }

        let removed = self.products.remove(pos);
        tracing::info!(product_id = %id, "product deleted");
        self.publish(InventoryEvent::ProductDeleted {
            product_id: id,
            occurred_at: Utc::now(),
        });
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Associations
    // ---------------------------------------------------------------------

    fn ensure_parts_exist(&self, part_ids: &[PartId]) -> InventoryResult<()> {
        match part_ids.iter().find(|id| self.lookup_part(**id).is_none()) {
            Some(missing) => Err(InventoryError::not_found(*missing)),
            None => Ok(()),
        }
    }

    /// Append `part_id` to the product's association list (duplicates allowed).
    pub fn associate(&mut self, product_id: ProductId, part_id: PartId) -> InventoryResult<()> {
        self.part(part_id)?;
        self.product_mut(product_id)?.add_associated_part(part_id);

        tracing::info!(%product_id, %part_id, "part associated");
        self.publish(InventoryEvent::PartAssociated {
            product_id,
            part_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Remove one reference to `part_id` from the product's association list.
    pub fn disassociate(&mut self, product_id: ProductId, part_id: PartId) -> InventoryResult<()> {
        if !self.product_mut(product_id)?.remove_associated_part(part_id) {
            return Err(InventoryError::AssociationNotFound {
                product: product_id,
                part: part_id,
            });
        }

        tracing::info!(%product_id, %part_id, "part disassociated");
        self.publish(InventoryEvent::PartDisassociated {
            product_id,
            part_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// The product's associated parts, resolved to their current values, in
    /// association order.
    pub fn associated_parts(&self, product_id: ProductId) -> InventoryResult<Vec<&Part>> {
        let product = self.product(product_id)?;
        Ok(product
            .associated_parts()
            .iter()
            .filter_map(|id| self.lookup_part(*id))
            .collect())
    }
}
