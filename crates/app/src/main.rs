use std::io;

use anyhow::Context;
use partsbin_app::{config::AppConfig, console};
use partsbin_inventory::InventoryService;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    partsbin_observability::init_with(config.log_format);
    config.log_warnings();

    let mut service = if config.seed_sample_data {
        InventoryService::with_sample_data().context("failed to load sample data")?
    } else {
        InventoryService::default()
    };

    tracing::info!(
        parts = service.all_parts().len(),
        products = service.all_products().len(),
        "inventory ready"
    );

    console::run(&mut service, io::stdin().lock(), io::stdout().lock())
}
