//! End-to-end behaviour through the service API, the way a UI drives it.

use partsbin_inventory::{
    Field, InventoryError, InventoryService, PartForm, PartId, PartKind, ProductForm, ProductId,
};
use proptest::prelude::*;

fn part_form(name: &str, price: &str, stock: &str, min: &str, max: &str, detail: &str) -> PartForm {
    PartForm {
        name: name.into(),
        price: price.into(),
        stock: stock.into(),
        min: min.into(),
        max: max.into(),
        detail: detail.into(),
    }
}

fn product_form(name: &str, price: &str, stock: &str, min: &str, max: &str) -> ProductForm {
    ProductForm {
        name: name.into(),
        price: price.into(),
        stock: stock.into(),
        min: min.into(),
        max: max.into(),
    }
}

#[test]
fn product_delete_blocked_until_parts_removed() {
    let mut svc = InventoryService::default();

    let brakes = svc
        .create_part(
            PartKind::InHouse,
            &part_form("Brakes", "14.99", "10", "1", "50", "111"),
        )
        .unwrap();
    assert_eq!(brakes.id(), PartId::new(1));
    assert_eq!(brakes.machine_id(), Some(111));

    let bike = svc
        .create_product(&product_form("Giant Bike", "299.99", "5", "1", "10"))
        .unwrap();
    assert_eq!(bike.id(), ProductId::new(1000));

    svc.associate(ProductId::new(1000), PartId::new(1)).unwrap();
    let parts = svc.associated_parts(ProductId::new(1000)).unwrap();
    assert_eq!(parts, vec![&brakes]);
    assert_eq!(
        svc.get_product(ProductId::new(1000)).unwrap().associated_parts(),
        &[PartId::new(1)]
    );

    let err = svc.delete_product(ProductId::new(1000)).unwrap_err();
    assert!(matches!(err, InventoryError::HasDependents { .. }));
    assert_eq!(
        svc.get_product(ProductId::new(1000)).unwrap().associated_parts(),
        &[PartId::new(1)]
    );

    svc.disassociate(ProductId::new(1000), PartId::new(1)).unwrap();
    let removed = svc.delete_product(ProductId::new(1000)).unwrap();
    assert_eq!(removed.name(), "Giant Bike");
    assert!(matches!(
        svc.get_product(ProductId::new(1000)),
        Err(InventoryError::NotFound(_))
    ));
}

#[test]
fn find_parts_matches_case_insensitive_substrings() {
    let mut svc = InventoryService::default();
    for (name, machine) in [("Brakes", "111"), ("Wheel", "112")] {
        svc.create_part(
            PartKind::InHouse,
            &part_form(name, "10.99", "5", "1", "10", machine),
        )
        .unwrap();
    }

    let hits: Vec<&str> = svc.find_parts("BRA").iter().map(|p| p.name()).collect();
    assert_eq!(hits, vec!["Brakes"]);
    assert!(svc.find_parts("seat").is_empty());
}

#[test]
fn validation_errors_name_the_field() {
    let mut svc = InventoryService::default();

    let err = svc
        .create_part(
            PartKind::InHouse,
            &part_form("Brakes", "cheap", "10", "1", "50", "111"),
        )
        .unwrap_err();
    let v = err.as_validation().copied().unwrap();
    assert_eq!(v.field, Field::Price);
    assert_eq!(
        err.to_string(),
        "Please enter a valid decimal value for the Price field."
    );

    let err = svc
        .create_product(&product_form("Giant Bike", "299.99", "5", "20", "10"))
        .unwrap_err();
    assert_eq!(err.as_validation().map(|v| v.field), Some(Field::Min));
    assert!(svc.all_products().is_empty());
}

#[test]
fn sample_data_respects_guards() {
    let mut svc = InventoryService::with_sample_data().unwrap();

    // Every sample product uses parts; every part is used by some product.
    for product in svc.all_products().to_vec() {
        assert!(matches!(
            svc.delete_product(product.id()),
            Err(InventoryError::HasDependents { .. })
        ));
    }
    for part in svc.all_parts().to_vec() {
        assert!(matches!(
            svc.delete_part(part.id()),
            Err(InventoryError::HasDependents { .. })
        ));
    }

    let next = svc
        .create_part(
            PartKind::Outsourced,
            &part_form("Bell", "4.50", "20", "5", "40", "Acme"),
        )
        .unwrap();
    assert_eq!(next.id(), PartId::new(5));
    svc.delete_part(next.id()).unwrap();
}

proptest! {
    /// Property: ids handed out by creations (including abandoned drafts) are
    /// strictly increasing from 1 and never reused.
    #[test]
    fn part_ids_strictly_increase_across_failures(
        steps in proptest::collection::vec(0u8..3, 1..40)
    ) {
        let mut svc = InventoryService::default();
        let mut seen: Vec<PartId> = Vec::new();

        for step in steps {
            let id = match step {
                // valid create
                0 => svc
                    .create_part(PartKind::InHouse, &part_form("Gear", "1", "1", "1", "1", "9"))
                    .unwrap()
                    .id(),
                // draft opened then abandoned
                1 => svc.begin_part().id(),
                // draft rejected once, retried successfully
                _ => {
                    let draft = svc.begin_part();
                    let blank = part_form("", "1", "1", "1", "1", "9");
                    let rejected = svc.commit_part(draft, PartKind::InHouse, &blank).unwrap_err();
                    svc.commit_part(
                        rejected.draft,
                        PartKind::InHouse,
                        &part_form("Gear", "1", "1", "1", "1", "9"),
                    )
                    .unwrap()
                    .id()
                }
            };
            seen.push(id);
        }

        prop_assert_eq!(seen[0], PartId::new(1));
        for pair in seen.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Property: product ids start at 1000 and strictly increase.
    #[test]
    fn product_ids_strictly_increase(count in 1usize..30) {
        let mut svc = InventoryService::default();
        let ids: Vec<ProductId> = (0..count)
            .map(|_| svc.create_product(&product_form("Bike", "1", "1", "1", "1")).unwrap().id())
            .collect();

        prop_assert_eq!(ids[0], ProductId::new(1000));
        for pair in ids.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Property: a blank or whitespace query lists the whole collection.
    #[test]
    fn blank_find_lists_everything(
        names in proptest::collection::vec("[A-Za-z]{1,10}", 0..10),
        blank in "[ \t]{0,4}",
    ) {
        let mut svc = InventoryService::default();
        for name in &names {
            svc.create_part(PartKind::Outsourced, &part_form(name, "2", "3", "1", "5", "Acme"))
                .unwrap();
        }

        let all: Vec<PartId> = svc.all_parts().iter().map(|p| p.id()).collect();
        let found: Vec<PartId> = svc.find_parts(&blank).iter().map(|p| p.id()).collect();
        prop_assert_eq!(found, all);
    }
}
