//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{PartId, ProductId};

/// Result type used across the inventory layer.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Form field a validation failure is scoped to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Price,
    Stock,
    Min,
    Max,
    MachineId,
    CompanyName,
    Kind,
}

impl Field {
    /// Label shown next to the input on the entry forms.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Price => "Price",
            Field::Stock => "Inv",
            Field::Min => "Min",
            Field::Max => "Max",
            Field::MachineId => "Machine ID",
            Field::CompanyName => "Company Name",
            Field::Kind => "Kind",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// What was wrong with a field value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    /// Empty or whitespace-only text.
    Blank,
    /// Not a base-10 integer.
    NotInteger,
    /// Not a decimal number.
    NotDecimal,
    /// A price or stock count below zero.
    Negative,
    /// `min > max`.
    MinExceedsMax,
    /// `stock` outside `[min, max]`.
    StockOutOfRange,
    /// Part kind other than in-house / outsourced.
    UnknownKind,
}

/// A field-scoped validation failure.
///
/// The message names the offending field and the expected shape, so callers can
/// surface it as-is (dialog, console, HTTP body).
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[error("{}", self.message())]
pub struct ValidationError {
    pub field: Field,
    pub problem: Problem,
}

impl ValidationError {
    pub fn new(field: Field, problem: Problem) -> Self {
        Self { field, problem }
    }

    pub fn blank(field: Field) -> Self {
        Self::new(field, Problem::Blank)
    }

    pub fn not_integer(field: Field) -> Self {
        Self::new(field, Problem::NotInteger)
    }

    pub fn not_decimal(field: Field) -> Self {
        Self::new(field, Problem::NotDecimal)
    }

    pub fn negative(field: Field) -> Self {
        Self::new(field, Problem::Negative)
    }

    /// User-facing text, worded the way the forms word it.
    pub fn message(&self) -> String {
        let field = self.field;
        match self.problem {
            Problem::Blank => format!("Please enter a valid string value for the {field} field."),
            Problem::NotInteger => {
                format!("Please enter a valid integer value for the {field} field.")
            }
            Problem::NotDecimal => {
                format!("Please enter a valid decimal value for the {field} field.")
            }
            Problem::Negative => format!("The {field} field must not be negative."),
            Problem::MinExceedsMax => "Min should be less than or equal to the Max.".to_string(),
            Problem::StockOutOfRange => "Inv should be between Min and Max values.".to_string(),
            Problem::UnknownKind => {
                format!("The {field} field must be one of: in-house, outsourced.")
            }
        }
    }
}

/// Reference to a stored record, used in error messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Part(PartId),
    Product(ProductId),
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntityRef::Part(id) => write!(f, "part {id}"),
            EntityRef::Product(id) => write!(f, "product {id}"),
        }
    }
}

impl From<PartId> for EntityRef {
    fn from(value: PartId) -> Self {
        EntityRef::Part(value)
    }
}

impl From<ProductId> for EntityRef {
    fn from(value: ProductId) -> Self {
        EntityRef::Product(value)
    }
}

/// Inventory-level error.
///
/// Every variant is recoverable at the call site.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with the requested id.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// The record is still referenced and cannot be deleted.
    ///
    /// For a product: it has associated parts. For a part: products use it.
    #[error("{owner} has {dependents} dependent association(s) and cannot be deleted")]
    HasDependents { owner: EntityRef, dependents: usize },

    /// `disassociate` found no matching entry in the product's list.
    #[error("part {part} is not associated with product {product}")]
    AssociationNotFound { product: ProductId, part: PartId },

    /// A delete confirmation referenced a token that is unknown or already used.
    #[error("unknown or expired delete token")]
    UnknownDeleteToken,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl InventoryError {
    pub fn not_found(entity: impl Into<EntityRef>) -> Self {
        Self::NotFound(entity.into())
    }

    pub fn has_dependents(owner: impl Into<EntityRef>, dependents: usize) -> Self {
        Self::HasDependents {
            owner: owner.into(),
            dependents,
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            InventoryError::Validation(e) => Some(e),
            _ => None,
        }
    }
}
