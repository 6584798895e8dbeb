//! Inventory domain: parts, products and the store that relates them.
//!
//! Pure in-memory logic (no IO, no HTTP, no storage). A UI drives it through
//! [`InventoryService`]; read paths may also go straight to [`Inventory`].

pub mod events;
pub mod part;
pub mod product;
pub mod seed;
pub mod service;
pub mod shared;
pub mod store;
pub mod validation;

pub use events::InventoryEvent;
pub use part::{Part, PartInput, PartKind, PartSource};
pub use product::{Product, ProductInput};
pub use seed::seed_sample_data;
pub use service::{DeleteToken, Deleted, DraftRejected, InventoryService, PartDraft, ProductDraft};
pub use shared::SharedInventory;
pub use store::Inventory;
pub use validation::{
    PartForm, ProductForm, check_range, validate_decimal, validate_integer, validate_part_form,
    validate_price, validate_product_form, validate_text,
};

pub use partsbin_core::{
    EntityRef, Field, InventoryError, InventoryResult, PartId, Problem, ProductId, StockLevels,
    ValidationError,
};
