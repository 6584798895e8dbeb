//! Change notifications published by the store after each mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use partsbin_core::{PartId, ProductId};
use partsbin_events::Event;

/// Notification published by the store after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryEvent {
    PartAdded {
        part_id: PartId,
        occurred_at: DateTime<Utc>,
    },
    PartUpdated {
        part_id: PartId,
        occurred_at: DateTime<Utc>,
    },
    PartDeleted {
        part_id: PartId,
        occurred_at: DateTime<Utc>,
    },
    ProductAdded {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductUpdated {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductDeleted {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    PartAssociated {
        product_id: ProductId,
        part_id: PartId,
        occurred_at: DateTime<Utc>,
    },
    PartDisassociated {
        product_id: ProductId,
        part_id: PartId,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::PartAdded { .. } => "inventory.part.added",
            InventoryEvent::PartUpdated { .. } => "inventory.part.updated",
            InventoryEvent::PartDeleted { .. } => "inventory.part.deleted",
            InventoryEvent::ProductAdded { .. } => "inventory.product.added",
            InventoryEvent::ProductUpdated { .. } => "inventory.product.updated",
            InventoryEvent::ProductDeleted { .. } => "inventory.product.deleted",
            InventoryEvent::PartAssociated { .. } => "inventory.product.part_associated",
            InventoryEvent::PartDisassociated { .. } => "inventory.product.part_disassociated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::PartAdded { occurred_at, .. }
            | InventoryEvent::PartUpdated { occurred_at, .. }
            | InventoryEvent::PartDeleted { occurred_at, .. }
            | InventoryEvent::ProductAdded { occurred_at, .. }
            | InventoryEvent::ProductUpdated { occurred_at, .. }
            | InventoryEvent::ProductDeleted { occurred_at, .. }
            | InventoryEvent::PartAssociated { occurred_at, .. }
            | InventoryEvent::PartDisassociated { occurred_at, .. } => *occurred_at,
        }
    }
}
