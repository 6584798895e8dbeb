//! Field validation for the part and product forms.
//!
//! Pure functions: they never render or block, they return a
//! [`ValidationError`] naming the field and the expected shape and leave
//! surfacing it to the caller.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use partsbin_core::{Field, StockLevels, ValidationError};

use crate::part::{Part, PartInput, PartKind, PartSource};
use crate::product::{Product, ProductInput};

pub use partsbin_core::check_range;

/// Non-blank text, trimmed.
pub fn validate_text(field: Field, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::blank(field));
    }
    Ok(trimmed.to_string())
}

/// A base-10 integer. Surrounding whitespace is ignored.
pub fn validate_integer(field: Field, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::not_integer(field))
}

/// A decimal number, in plain (`14.99`) or scientific (`1.5e2`) notation.
pub fn validate_decimal(field: Field, raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::not_decimal(field))
}

/// A decimal price, zero or more.
pub fn validate_price(raw: &str) -> Result<Decimal, ValidationError> {
    let price = validate_decimal(Field::Price, raw)?;
    if price < Decimal::ZERO {
        return Err(ValidationError::negative(Field::Price));
    }
    Ok(price)
}

/// Raw text of the part form, exactly as typed.
///
/// `detail` holds the machine id for in-house parts and the company name for
/// outsourced ones; the form swaps the label when the kind changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub min: String,
    pub max: String,
    pub detail: String,
}

impl PartForm {
    /// Prefill the form from a stored part (the modify screen).
    pub fn from_part(part: &Part) -> Self {
        let detail = match part.source() {
            PartSource::InHouse { machine_id } => machine_id.to_string(),
            PartSource::Outsourced { company_name } => company_name.clone(),
        };
        Self {
            name: part.name().to_string(),
            price: part.price().to_string(),
            stock: part.stock().to_string(),
            min: part.min().to_string(),
            max: part.max().to_string(),
            detail,
        }
    }
}

/// Raw text of the product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub min: String,
    pub max: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            price: product.price().to_string(),
            stock: product.stock().to_string(),
            min: product.min().to_string(),
            max: product.max().to_string(),
        }
    }
}

/// Name, stock, price, min, max, then their relationship; first failure wins.
fn validate_common(
    name: &str,
    price: &str,
    stock: &str,
    min: &str,
    max: &str,
) -> Result<(String, Decimal, StockLevels), ValidationError> {
    let name = validate_text(Field::Name, name)?;
    let stock = validate_integer(Field::Stock, stock)?;
    let price = validate_price(price)?;
    let min = validate_integer(Field::Min, min)?;
    let max = validate_integer(Field::Max, max)?;
    let levels = StockLevels::new(stock, min, max)?;
    Ok((name, price, levels))
}

/// Validate every field of a part form for the given kind.
pub fn validate_part_form(kind: PartKind, form: &PartForm) -> Result<PartInput, ValidationError> {
    let (name, price, levels) =
        validate_common(&form.name, &form.price, &form.stock, &form.min, &form.max)?;

    let field = kind.detail_field();
    let source = match kind {
        PartKind::InHouse => PartSource::InHouse {
            machine_id: validate_integer(field, &form.detail)?,
        },
        PartKind::Outsourced => PartSource::Outsourced {
            company_name: validate_text(field, &form.detail)?,
        },
    };

    PartInput::new(name, price, levels, source)
}

/// Validate every field of a product form.
pub fn validate_product_form(form: &ProductForm) -> Result<ProductInput, ValidationError> {
    let (name, price, levels) =
        validate_common(&form.name, &form.price, &form.stock, &form.min, &form.max)?;
    ProductInput::new(name, price, levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsbin_core::{PartId, Problem};
    use proptest::prelude::*;

    fn brakes_form() -> PartForm {
        PartForm {
            name: "Brakes".into(),
            price: "14.99".into(),
            stock: "10".into(),
            min: "1".into(),
            max: "50".into(),
            detail: "111".into(),
        }
    }

    #[test]
    fn text_rejects_blank() {
        assert_eq!(validate_text(Field::Name, "  Wheel ").unwrap(), "Wheel");
        assert_eq!(
            validate_text(Field::Name, " \t ").unwrap_err(),
            ValidationError::blank(Field::Name)
        );
        assert!(validate_text(Field::Name, "").is_err());
    }

    #[test]
    fn integer_requires_base_ten() {
        assert_eq!(validate_integer(Field::Stock, "42").unwrap(), 42);
        assert_eq!(validate_integer(Field::Stock, " -3 ").unwrap(), -3);
        for bad in ["", "4.5", "ten", "0x10", "1e3"] {
            assert_eq!(
                validate_integer(Field::Stock, bad).unwrap_err(),
                ValidationError::not_integer(Field::Stock),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn decimal_accepts_plain_and_scientific() {
        assert_eq!(validate_decimal(Field::Price, "14.99").unwrap(), Decimal::new(1499, 2));
        assert_eq!(validate_decimal(Field::Price, "3").unwrap(), Decimal::new(3, 0));
        assert_eq!(validate_decimal(Field::Price, "1.5e2").unwrap(), Decimal::new(150, 0));
        for bad in ["", "abc", "NaN", "1.2.3"] {
            assert_eq!(
                validate_decimal(Field::Price, bad).unwrap_err(),
                ValidationError::not_decimal(Field::Price)
            );
        }
    }

    #[test]
    fn price_must_not_be_negative() {
        assert_eq!(
            validate_price("-0.01").unwrap_err(),
            ValidationError::negative(Field::Price)
        );
        assert_eq!(validate_price("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn part_form_in_house() {
        let input = validate_part_form(PartKind::InHouse, &brakes_form()).unwrap();
        let part = input.into_part(PartId::new(1));
        assert_eq!(part.name(), "Brakes");
        assert_eq!(part.machine_id(), Some(111));
        assert_eq!((part.stock(), part.min(), part.max()), (10, 1, 50));
    }

    #[test]
    fn part_form_outsourced_uses_detail_as_company() {
        let form = PartForm {
            detail: "Huffy".into(),
            ..brakes_form()
        };
        let part = validate_part_form(PartKind::Outsourced, &form)
            .unwrap()
            .into_part(PartId::new(4));
        assert_eq!(part.company_name(), Some("Huffy"));
    }

    #[test]
    fn machine_id_must_be_integer() {
        let form = PartForm {
            detail: "Huffy".into(),
            ..brakes_form()
        };
        let err = validate_part_form(PartKind::InHouse, &form).unwrap_err();
        assert_eq!(err, ValidationError::not_integer(Field::MachineId));
    }

    #[test]
    fn blank_company_is_rejected() {
        let form = PartForm {
            detail: "   ".into(),
            ..brakes_form()
        };
        let err = validate_part_form(PartKind::Outsourced, &form).unwrap_err();
        assert_eq!(err, ValidationError::blank(Field::CompanyName));
    }

    #[test]
    fn first_failing_field_in_form_order_is_reported() {
        let form = PartForm {
            name: String::new(),
            stock: "x".into(),
            ..brakes_form()
        };
        let err = validate_part_form(PartKind::InHouse, &form).unwrap_err();
        assert_eq!(err.field, Field::Name);

        let form = PartForm {
            stock: "x".into(),
            price: "y".into(),
            ..brakes_form()
        };
        let err = validate_part_form(PartKind::InHouse, &form).unwrap_err();
        assert_eq!(err.field, Field::Stock);
    }

    #[test]
    fn range_checked_after_fields() {
        let form = PartForm {
            min: "20".into(),
            max: "10".into(),
            stock: "15".into(),
            ..brakes_form()
        };
        let err = validate_part_form(PartKind::InHouse, &form).unwrap_err();
        assert_eq!(err.problem, Problem::MinExceedsMax);

        let form = PartForm {
            stock: "60".into(),
            ..brakes_form()
        };
        let err = validate_part_form(PartKind::InHouse, &form).unwrap_err();
        assert_eq!(err.problem, Problem::StockOutOfRange);
    }

    #[test]
    fn product_form_round_trips_through_prefill() {
        let form = ProductForm {
            name: "Giant Bike".into(),
            price: "299.99".into(),
            stock: "5".into(),
            min: "1".into(),
            max: "10".into(),
        };
        let product = validate_product_form(&form)
            .unwrap()
            .into_product(partsbin_core::ProductId::new(1000), Vec::new());
        assert_eq!(ProductForm::from_product(&product), form);
    }

    #[test]
    fn part_prefill_matches_typed_form() {
        let part = validate_part_form(PartKind::InHouse, &brakes_form())
            .unwrap()
            .into_part(PartId::new(1));
        assert_eq!(PartForm::from_part(&part), brakes_form());
    }

    proptest! {
        /// Property: any i64 rendered in base 10 validates back to itself.
        #[test]
        fn integer_accepts_rendered_values(n in any::<i64>()) {
            prop_assert_eq!(validate_integer(Field::Min, &n.to_string()).unwrap(), n);
        }

        /// Property: strings without a digit never validate as integers.
        #[test]
        fn integer_rejects_digitless_text(s in "[a-zA-Z .,_]{0,12}") {
            prop_assert!(validate_integer(Field::Max, &s).is_err());
        }
    }
}
