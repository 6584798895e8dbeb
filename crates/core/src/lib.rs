//! `partsbin-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers and their allocator, the error taxonomy, and the
//! stock-level value object shared by parts and products.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{EntityRef, Field, InventoryError, InventoryResult, Problem, ValidationError};
pub use id::{IdAllocator, PartId, ProductId, FIRST_PART_ID, FIRST_PRODUCT_ID};
pub use value_object::{StockLevels, ValueObject, check_range};
