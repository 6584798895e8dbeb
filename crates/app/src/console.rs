//! Line-oriented console over the inventory service.
//!
//! One command per line; listings are printed as JSON. Field lists use `;` as
//! separator so names may contain spaces: `add-part in-house Brakes;14.99;10;1;50;111`.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::json;

use partsbin_core::{PartId, ProductId};
use partsbin_inventory::{InventoryService, PartForm, PartKind, ProductForm};

pub const HELP: &str = "\
commands:
  parts [text]                          list parts (id or name search)
  products [text]                       list products (id or name search)
  part <id>                             show one part
  product <id>                          show one product and its parts
  add-part <kind> name;price;inv;min;max;machine-id|company
  add-product name;price;inv;min;max
  update-part <id> <kind> name;price;inv;min;max;machine-id|company
  update-product <id> name;price;inv;min;max
  associate <product-id> <part-id>
  disassociate <product-id> <part-id>
  delete-part <id>
  delete-product <id>
  help
  quit";

fn fields<const N: usize>(raw: &str) -> anyhow::Result<[String; N]> {
    let parts: Vec<String> = raw.split(';').map(str::to_string).collect();
    match <[String; N]>::try_from(parts) {
        Ok(fields) => Ok(fields),
        Err(got) => bail!("expected {N} fields separated by ';', got {}", got.len()),
    }
}

fn part_form(raw: &str) -> anyhow::Result<PartForm> {
    let [name, price, stock, min, max, detail] = fields::<6>(raw)?;
    Ok(PartForm {
        name,
        price,
        stock,
        min,
        max,
        detail,
    })
}

fn product_form(raw: &str) -> anyhow::Result<ProductForm> {
    let [name, price, stock, min, max] = fields::<5>(raw)?;
    Ok(ProductForm {
        name,
        price,
        stock,
        min,
        max,
    })
}

/// Split off the first whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to render output")
}

fn two_ids(rest: &str) -> anyhow::Result<(ProductId, PartId)> {
    let (product, rest) = next_word(rest);
    let (part, _) = next_word(rest);
    Ok((product.parse()?, part.parse()?))
}

/// Run one command line and return the text to print.
pub fn execute(service: &mut InventoryService, line: &str) -> anyhow::Result<String> {
    let (command, rest) = next_word(line.trim());

    match command {
        "" => Ok(String::new()),
        "help" => Ok(HELP.to_string()),
        "parts" => {
            let hits = service.search_parts(rest);
            if hits.is_empty() {
                return Ok(format!("no part matches {rest:?}"));
            }
            pretty(&hits)
        }
        "products" => {
            let hits = service.search_products(rest);
            if hits.is_empty() {
                return Ok(format!("no product matches {rest:?}"));
            }
            pretty(&hits)
        }
        "part" => {
            let id: PartId = rest.parse()?;
            pretty(service.get_part(id)?)
        }
        "product" => {
            let id: ProductId = rest.parse()?;
            let product = service.get_product(id)?;
            let parts = service.associated_parts(id)?;
            pretty(&json!({ "product": product, "parts": parts }))
        }
        "add-part" => {
            let (kind, raw) = next_word(rest);
            let kind: PartKind = kind.parse()?;
            let part = service.create_part(kind, &part_form(raw)?)?;
            Ok(format!("added part {} ({})", part.id(), part.name()))
        }
        "add-product" => {
            let product = service.create_product(&product_form(rest)?)?;
            Ok(format!("added product {} ({})", product.id(), product.name()))
        }
        "update-part" => {
            let (id, rest) = next_word(rest);
            let (kind, raw) = next_word(rest);
            let id: PartId = id.parse()?;
            let kind: PartKind = kind.parse()?;
            let part = service.update_part(id, kind, &part_form(raw)?)?;
            Ok(format!("updated part {}", part.id()))
        }
        "update-product" => {
            let (id, raw) = next_word(rest);
            let id: ProductId = id.parse()?;
            let parts = service.get_product(id)?.associated_parts().to_vec();
            let product = service.update_product(id, &product_form(raw)?, parts)?;
            Ok(format!("updated product {}", product.id()))
        }
        "associate" => {
            let (product, part) = two_ids(rest)?;
            service.associate(product, part)?;
            Ok(format!("part {part} added to product {product}"))
        }
        "disassociate" => {
            let (product, part) = two_ids(rest)?;
            service.disassociate(product, part)?;
            Ok(format!("part {part} removed from product {product}"))
        }
        "delete-part" => {
            let removed = service.delete_part(rest.parse()?)?;
            Ok(format!("deleted part {}", removed.id()))
        }
        "delete-product" => {
            let removed = service.delete_product(rest.parse()?)?;
            Ok(format!("deleted product {}", removed.id()))
        }
        other => bail!("unknown command {other:?}; try `help`"),
    }
}

/// Read commands until EOF or `quit`. Command errors are printed and the
/// session continues; only IO failures end it early.
pub fn run<R: BufRead, W: Write>(
    service: &mut InventoryService,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        match execute(service, &line) {
            Ok(text) if text.is_empty() => {}
            Ok(text) => writeln!(output, "{text}")?,
            Err(e) => {
                tracing::debug!(command = line.trim(), error = %e, "command failed");
                writeln!(output, "error: {e}")?;
            }
        }
    }
    output.flush()?;
    Ok(())
}
