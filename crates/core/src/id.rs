//! Strongly-typed identifiers and their allocator.
//!
//! Part and product ids live in separate, visually distinct ranges: parts count
//! up from 1, products from 1000.

use core::marker::PhantomData;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// First id handed out to a part.
pub const FIRST_PART_ID: u32 = 1;

/// First id handed out to a product.
pub const FIRST_PRODUCT_ID: u32 = 1000;

/// Identifier of a part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(u32);

/// Identifier of a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

macro_rules! impl_numeric_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw id. Prefer ids handed out by an [`IdAllocator`].
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = InventoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| InventoryError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_numeric_id!(PartId, "PartId");
impl_numeric_id!(ProductId, "ProductId");

/// Monotonic id counter for one entity kind.
///
/// `allocate` hands out the current value and advances. A value is consumed even
/// if the creation it was reserved for never completes; ids are never reused.
#[derive(Debug, Clone)]
pub struct IdAllocator<I> {
    next: u32,
    _kind: PhantomData<fn() -> I>,
}

impl<I: From<u32>> IdAllocator<I> {
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: first,
            _kind: PhantomData,
        }
    }

    /// Consume and return the next id.
    pub fn allocate(&mut self) -> I {
        let id = self.next;
        self.next += 1;
        I::from(id)
    }

    /// The id the next `allocate` call will return.
    pub fn peek(&self) -> I {
        I::from(self.next)
    }
}

impl Default for IdAllocator<PartId> {
    fn default() -> Self {
        Self::starting_at(FIRST_PART_ID)
    }
}

impl Default for IdAllocator<ProductId> {
    fn default() -> Self {
        Self::starting_at(FIRST_PRODUCT_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn part_and_product_ranges_start_apart() {
        let mut parts = IdAllocator::<PartId>::default();
        let mut products = IdAllocator::<ProductId>::default();

        assert_eq!(parts.allocate(), PartId::new(1));
        assert_eq!(parts.allocate(), PartId::new(2));
        assert_eq!(products.allocate(), ProductId::new(1000));
        assert_eq!(products.allocate(), ProductId::new(1001));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut parts = IdAllocator::<PartId>::default();
        assert_eq!(parts.peek(), PartId::new(1));
        assert_eq!(parts.peek(), PartId::new(1));
        assert_eq!(parts.allocate(), PartId::new(1));
        assert_eq!(parts.peek(), PartId::new(2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(" 42 ".parse::<PartId>().unwrap(), PartId::new(42));
        match "brakes".parse::<ProductId>() {
            Err(InventoryError::InvalidId(msg)) => assert!(msg.starts_with("ProductId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ProductId::new(1002)).unwrap();
        assert_eq!(json, "1002");
    }

    proptest! {
        /// Property: ids are strictly increasing and never repeat.
        #[test]
        fn allocation_is_strictly_increasing(count in 1usize..200) {
            let mut parts = IdAllocator::<PartId>::default();
            let ids: Vec<PartId> = (0..count).map(|_| parts.allocate()).collect();

            prop_assert_eq!(ids[0], PartId::new(FIRST_PART_ID));
            for pair in ids.windows(2) {
                prop_assert!(pair[0] < pair[1]);
                prop_assert_eq!(pair[1].get(), pair[0].get() + 1);
            }
        }
    }
}
