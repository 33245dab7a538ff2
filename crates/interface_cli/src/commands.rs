//! Command execution
//!
//! Every command writes JSON to `out`: a single document for lookups, one
//! line per variant for `inventory`. A request that fails on the backend
//! turns into an error after its (empty) output has been written.

use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use core_kernel::HealthCheckable;
use domain_commerce::{Order, Variant};
use infra_inventory::{Connector, SessionClient};

use crate::cli::Command;

/// Runs one command against the client
pub fn run<C: Connector, W: Write>(
    client: &mut SessionClient<C>,
    command: &Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Health => {
            let result = client.health_check();
            write_json(out, &result)?;
            if !result.is_healthy() {
                bail!("inventory backend is {:?}", result.status);
            }
            Ok(())
        }
        Command::Carriers => {
            let carriers = client.carriers();
            write_json(out, &carriers)?;
            check_request(client, "carrier list")
        }
        Command::LocationGroups => {
            let groups = client.location_groups();
            write_json(out, &groups)?;
            check_request(client, "location group list")
        }
        Command::Part { sku, location_group } => {
            let part = client.part(sku, location_group.as_deref());
            write_json(out, &part)?;
            check_request(client, "part lookup")
        }
        Command::Inventory { variants } => {
            let variants: Vec<Variant> = read_json(variants)?;
            let mut reported = 0usize;
            for (variant, available) in client.all_available_inventory(variants) {
                write_json(out, &inventory_line(&variant, available))?;
                reported += 1;
            }
            info!(variants = reported, "Reported available inventory");
            Ok(())
        }
        Command::Shipments { order } => {
            let order: Order = read_json(order)?;
            let shipments = client.order_shipments(&order);
            write_json(out, &shipments)?;
            check_request(client, "shipment lookup")
        }
    }
}

fn inventory_line(variant: &Variant, available: Option<Decimal>) -> serde_json::Value {
    json!({
        "sku": variant.sku.trim(),
        "variant_id": variant.id,
        "available": available,
    })
}

fn check_request<C: Connector>(client: &SessionClient<C>, what: &str) -> Result<()> {
    match client.last_error() {
        Some(error) => Err(anyhow!("{} failed: {}", what, error)),
        None => Ok(()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
