//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{Field, Problem, ValidationError};

/// Marker trait for value objects.
///
/// Value objects have **no identity**; two with the same attribute values are
/// equal. They are immutable: to "modify" one, build a new one.
///
/// - **Value Object**: `StockLevels { stock: 10, min: 1, max: 50 }`
/// - **Entity**: `Part { id: PartId(1), .. }`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Check the min/max/stock relationship shared by parts and products.
///
/// Fails with `MinExceedsMax` (field `Min`) when `min > max`, and with
/// `StockOutOfRange` (field `Stock`) when `stock` lies outside `[min, max]`.
pub fn check_range(min: i64, max: i64, stock: i64) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::new(Field::Min, Problem::MinExceedsMax));
    }
    if stock < min || stock > max {
        return Err(ValidationError::new(Field::Stock, Problem::StockOutOfRange));
    }
    Ok(())
}

/// On-hand quantity together with its allowed band.
///
/// Only constructible through [`StockLevels::new`], so a held value always
/// satisfies `0 <= stock` and `min <= stock <= max`. Deserialization goes
/// through the same check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStockLevels")]
pub struct StockLevels {
    stock: i64,
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawStockLevels {
    stock: i64,
    min: i64,
    max: i64,
}

impl TryFrom<RawStockLevels> for StockLevels {
    type Error = ValidationError;

    fn try_from(raw: RawStockLevels) -> Result<Self, Self::Error> {
        StockLevels::new(raw.stock, raw.min, raw.max)
    }
}

impl StockLevels {
    pub fn new(stock: i64, min: i64, max: i64) -> Result<Self, ValidationError> {
        if stock < 0 {
            return Err(ValidationError::negative(Field::Stock));
        }
        check_range(min, max, stock)?;
        Ok(Self { stock, min, max })
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl ValueObject for StockLevels {}
