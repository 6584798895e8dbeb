//! Sample bicycle-shop data loaded at startup.

use rust_decimal::Decimal;

use partsbin_core::{InventoryResult, PartId, StockLevels};

use crate::part::{PartInput, PartSource};
use crate::product::ProductInput;
use crate::store::Inventory;

fn add_part(
    inventory: &mut Inventory,
    name: &str,
    cents: i64,
    (stock, min, max): (i64, i64, i64),
    source: PartSource,
) -> InventoryResult<PartId> {
    let input = PartInput::new(
        name,
        Decimal::new(cents, 2),
        StockLevels::new(stock, min, max)?,
        source,
    )?;
    let id = inventory.allocate_part_id();
    inventory.add_part(input.into_part(id));
    Ok(id)
}

fn add_product(
    inventory: &mut Inventory,
    name: &str,
    cents: i64,
    (stock, min, max): (i64, i64, i64),
    parts: Vec<PartId>,
) -> InventoryResult<()> {
    let input = ProductInput::new(
        name,
        Decimal::new(cents, 2),
        StockLevels::new(stock, min, max)?,
    )?;
    let id = inventory.allocate_product_id();
    inventory.add_product(input.into_product(id, parts))
}

/// Load four parts and three products into `inventory`, allocating ids from
/// its counters (parts 1-4 and products 1000-1002 on an empty store).
pub fn seed_sample_data(inventory: &mut Inventory) -> InventoryResult<()> {
    let in_house = |machine_id| PartSource::InHouse { machine_id };
    let brakes = add_part(inventory, "Brakes", 1499, (10, 1, 50), in_house(111))?;
    let wheel = add_part(inventory, "Wheel", 1099, (16, 1, 50), in_house(112))?;
    let seat = add_part(inventory, "Seat", 1499, (10, 1, 50), in_house(113))?;
    let handle_bars = add_part(
        inventory,
        "Handle Bars",
        1099,
        (15, 1, 35),
        PartSource::Outsourced {
            company_name: "Huffy".to_string(),
        },
    )?;

    add_product(inventory, "Giant Bike", 29999, (5, 1, 10), vec![brakes, wheel, seat])?;
    add_product(inventory, "Tricycle", 9999, (3, 1, 10), vec![brakes, wheel, seat])?;
    add_product(
        inventory,
        "Mountain Bike",
        39999,
        (4, 1, 10),
        vec![brakes, wheel, seat, handle_bars],
    )?;

    tracing::debug!(
        parts = inventory.all_parts().len(),
        products = inventory.all_products().len(),
        "sample data loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsbin_core::ProductId;

    #[test]
    fn seeds_parts_and_products_with_expected_ids() {
        let mut inv = Inventory::new();
        seed_sample_data(&mut inv).unwrap();

        let part_ids: Vec<u32> = inv.all_parts().iter().map(|p| p.id().get()).collect();
        assert_eq!(part_ids, vec![1, 2, 3, 4]);

        let product_ids: Vec<u32> = inv.all_products().iter().map(|p| p.id().get()).collect();
        assert_eq!(product_ids, vec![1000, 1001, 1002]);

        assert_eq!(inv.next_part_id(), PartId::new(5));
        assert_eq!(inv.next_product_id(), ProductId::new(1003));
    }

    #[test]
    fn mountain_bike_uses_all_four_parts() {
        let mut inv = Inventory::new();
        seed_sample_data(&mut inv).unwrap();

        let parts = inv.associated_parts(ProductId::new(1002)).unwrap();
        let names: Vec<&str> = parts.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Brakes", "Wheel", "Seat", "Handle Bars"]);
        assert_eq!(parts[3].company_name(), Some("Huffy"));
    }
}
