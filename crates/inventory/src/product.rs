//! Products and their ordered list of part references.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use partsbin_core::{Entity, Field, PartId, ProductId, StockLevels, ValidationError};

/// Validated attributes of a product, everything except its id and parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    name: String,
    price: Decimal,
    levels: StockLevels,
}

impl ProductInput {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        levels: StockLevels,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::blank(Field::Name));
        }
        if price < Decimal::ZERO {
            return Err(ValidationError::negative(Field::Price));
        }
        Ok(Self {
            name,
            price,
            levels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_product(self, id: ProductId, associated_parts: Vec<PartId>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            levels: self.levels,
            associated_parts,
        }
    }
}

/// A sellable product built from parts.
///
/// `associated_parts` is an ordered multiset of part *references*: the same
/// part may appear more than once, and the product never owns the parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    #[serde(flatten)]
    levels: StockLevels,
    associated_parts: Vec<PartId>,
}

/// Wire shape of a [`Product`]; converted through [`ProductInput::new`].
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    price: Decimal,
    #[serde(flatten)]
    levels: StockLevels,
    #[serde(default)]
    associated_parts: Vec<PartId>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let input = ProductInput::new(record.name, record.price, record.levels)?;
        Ok(input.into_product(record.id, record.associated_parts))
    }
}

impl Product {
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.levels.stock()
    }

    pub fn min(&self) -> i64 {
        self.levels.min()
    }

    pub fn max(&self) -> i64 {
        self.levels.max()
    }

    pub fn levels(&self) -> StockLevels {
        self.levels
    }

    pub fn associated_parts(&self) -> &[PartId] {
        &self.associated_parts
    }

    pub fn has_associated_parts(&self) -> bool {
        !self.associated_parts.is_empty()
    }

    /// Whether `part_id` appears at least once in the association list.
    pub fn references(&self, part_id: PartId) -> bool {
        self.associated_parts.contains(&part_id)
    }

    /// Append a part reference. Duplicates are kept.
    pub fn add_associated_part(&mut self, part_id: PartId) {
        self.associated_parts.push(part_id);
    }

    /// Remove the most recently added entry referencing `part_id`, so an add
    /// followed by a remove leaves the list exactly as it was.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_associated_part(&mut self, part_id: PartId) -> bool {
        match self.associated_parts.iter().rposition(|p| *p == part_id) {
            Some(pos) => {
                self.associated_parts.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn giant_bike() -> Product {
        ProductInput::new(
            "Giant Bike",
            Decimal::new(29999, 2),
            StockLevels::new(5, 1, 10).unwrap(),
        )
        .unwrap()
        .into_product(ProductId::new(1000), Vec::new())
    }

    #[test]
    fn new_product_has_no_parts() {
        let product = giant_bike();
        assert!(!product.has_associated_parts());
        assert!(product.associated_parts().is_empty());
        assert_eq!(product.stock(), 5);
    }

    #[test]
    fn associations_keep_order_and_duplicates() {
        let mut product = giant_bike();
        product.add_associated_part(PartId::new(1));
        product.add_associated_part(PartId::new(2));
        product.add_associated_part(PartId::new(1));

        assert_eq!(
            product.associated_parts(),
            &[PartId::new(1), PartId::new(2), PartId::new(1)]
        );
        assert!(product.references(PartId::new(2)));
    }

    #[test]
    fn remove_takes_one_match_only() {
        let mut product = giant_bike();
        product.add_associated_part(PartId::new(1));
        product.add_associated_part(PartId::new(2));
        product.add_associated_part(PartId::new(1));

        assert!(product.remove_associated_part(PartId::new(1)));
        assert_eq!(product.associated_parts(), &[PartId::new(1), PartId::new(2)]);
    }

    #[test]
    fn remove_missing_part_reports_false() {
        let mut product = giant_bike();
        product.add_associated_part(PartId::new(1));
        assert!(!product.remove_associated_part(PartId::new(9)));
        assert_eq!(product.associated_parts(), &[PartId::new(1)]);
    }

    #[test]
    fn input_rejects_blank_name() {
        let err = ProductInput::new(" ", Decimal::ONE, StockLevels::new(1, 1, 1).unwrap())
            .unwrap_err();
        assert_eq!(err, ValidationError::blank(Field::Name));
    }

    #[test]
    fn deserializing_validates_like_the_constructor() {
        let mut product = giant_bike();
        product.add_associated_part(PartId::new(1));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(serde_json::from_value::<Product>(json).unwrap(), product);

        let out_of_range = r#"{"id":1000,"name":"Giant Bike","price":"299.99",
            "stock":11,"min":1,"max":10,"associated_parts":[]}"#;
        let err = serde_json::from_str::<Product>(out_of_range).unwrap_err();
        assert!(err.to_string().contains("Inv should be between Min and Max values."));

        let blank_name = r#"{"id":1000,"name":" ","price":"1","stock":1,"min":1,"max":1}"#;
        assert!(serde_json::from_str::<Product>(blank_name).is_err());
    }

    proptest! {
        /// Property: add followed by remove of the same part restores the list.
        #[test]
        fn add_then_remove_round_trips(
            existing in proptest::collection::vec(1u32..20, 0..10),
            added in 1u32..20,
        ) {
            let mut product = giant_bike();
            for raw in &existing {
                product.add_associated_part(PartId::new(*raw));
            }
            let before = product.associated_parts().to_vec();

            product.add_associated_part(PartId::new(added));
            prop_assert!(product.remove_associated_part(PartId::new(added)));

            prop_assert_eq!(product.associated_parts(), before.as_slice());
        }
    }
}
