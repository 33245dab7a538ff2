//! Command tests for interface_cli against the scripted backend

use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::path::PathBuf;

use infra_inventory::connection::mock::MockReply;
use infra_inventory::wire::SHIPPED_STATUS;
use infra_inventory::{InventoryError, Operation, SessionConfig};
use interface_cli::{run, Command};

use test_utils::{CatalogFixtures, OrderFixtures, TestClientBuilder, WireFixtures};

fn write_input(name: &str, value: &impl serde::Serialize) -> PathBuf {
    let path = std::env::temp_dir().join(format!("inventory-sync-{}-{}.json", std::process::id(), name));
    std::fs::write(&path, serde_json::to_vec(value).unwrap()).unwrap();
    path
}

fn output_lines(out: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_carriers_prints_json_list() {
    let (backend, mut client) = TestClientBuilder::new().build();
    backend.respond(Operation::GetCarrierList, MockReply::payload(vec!["UPS", "DHL"]));
    let mut out = Vec::new();

    run(&mut client, &Command::Carriers, &mut out).unwrap();

    assert_eq!(output_lines(&out), vec![json!(["UPS", "DHL"])]);
}

#[test]
fn test_failed_request_is_an_error() {
    let (backend, mut client) = TestClientBuilder::new().build();
    backend.respond(
        Operation::GetLocationGroupList,
        MockReply::Fail(InventoryError::status(2010, "forbidden")),
    );
    let mut out = Vec::new();

    let result = run(&mut client, &Command::LocationGroups, &mut out);

    assert!(result.is_err());
    assert_eq!(output_lines(&out), vec![json!([])]);
}

#[test]
fn test_part_passes_location_group() {
    let (backend, mut client) = TestClientBuilder::new().build();
    backend.respond(Operation::GetPart, MockReply::payload(WireFixtures::part("P-100")));
    let mut out = Vec::new();
    let command = Command::Part {
        sku: "P-100".to_string(),
        location_group: Some("Overflow".to_string()),
    };

    run(&mut client, &command, &mut out).unwrap();

    assert_eq!(backend.calls()[0].params["location_group"], json!("Overflow"));
    assert_eq!(output_lines(&out)[0]["num"], json!("P-100"));
}

#[test]
fn test_health_unconfigured_fails() {
    let (_backend, mut client) = TestClientBuilder::new()
        .with_config(SessionConfig::default())
        .build();
    let mut out = Vec::new();

    let result = run(&mut client, &Command::Health, &mut out);

    assert!(result.is_err());
    assert_eq!(output_lines(&out)[0]["status"], json!("unknown"));
}

#[test]
fn test_inventory_prints_one_line_per_eligible_variant() {
    let (backend, mut client) = TestClientBuilder::new().build();
    backend
        .respond_always(
            Operation::GetProduct,
            MockReply::payload(WireFixtures::product("ANY", "P-1")),
        )
        .respond_always(
            Operation::GetInventoryQuantity,
            MockReply::payload(WireFixtures::inventory("P-1", dec!(4))),
        );
    let path = write_input("variants", &CatalogFixtures::mixed_variants());
    let mut out = Vec::new();

    run(&mut client, &Command::Inventory { variants: path }, &mut out).unwrap();

    let lines = output_lines(&out);
    let skus: Vec<&str> = lines.iter().filter_map(|line| line["sku"].as_str()).collect();
    assert_eq!(skus, CatalogFixtures::mixed_eligible_skus());
    assert!(lines.iter().all(|line| !line["available"].is_null()));
}

#[test]
fn test_inventory_missing_file_is_an_error() {
    let (backend, mut client) = TestClientBuilder::new().build();
    let command = Command::Inventory {
        variants: PathBuf::from("/nonexistent/variants.json"),
    };

    assert!(run(&mut client, &command, &mut Vec::new()).is_err());
    assert!(backend.calls().is_empty());
}

#[test]
fn test_shipments_prints_shipped_detail() {
    let so = OrderFixtures::SO_NUMBER;
    let (backend, mut client) = TestClientBuilder::new().build();
    backend
        .respond(
            Operation::GetShipList,
            MockReply::payload(vec![
                WireFixtures::ship_result(7, so, SHIPPED_STATUS),
                WireFixtures::ship_result(8, so, "Packed"),
            ]),
        )
        .respond(Operation::GetShipment, MockReply::payload(WireFixtures::shipment(7, so)));
    let path = write_input("order", &OrderFixtures::standard_order());
    let mut out = Vec::new();

    run(&mut client, &Command::Shipments { order: path }, &mut out).unwrap();

    let shipments = &output_lines(&out)[0];
    assert_eq!(shipments.as_array().map(Vec::len), Some(1));
    assert_eq!(shipments[0]["id"], json!(7));
}
