//! Remote operations supported by the inventory backend
//!
//! The backend exposes a named-operation RPC interface. Each operation the
//! client may invoke has one request type here, and each request type fixes
//! the shape of its reply through [`RemoteOperation::Output`]. Operations that
//! are not listed cannot be sent.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire::{
    Customer, InventoryQuantity, LightPart, Part, Product, SalesOrder, ShipResult, Shipment,
};

/// Page size used when listing shipments for an order
pub const SHIP_LIST_RECORD_COUNT: u32 = 50;

/// Every operation name the client can put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Login,
    GetCustomer,
    GetCarrierList,
    GetLocationGroupList,
    GetPart,
    GetProduct,
    GetLightPartList,
    GetInventoryQuantity,
    SaveCustomer,
    SaveSalesOrder,
    GetShipList,
    GetShipment,
}

impl Operation {
    /// Wire name of the operation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::GetCustomer => "get_customer",
            Operation::GetCarrierList => "get_carrier_list",
            Operation::GetLocationGroupList => "get_location_group_list",
            Operation::GetPart => "get_part",
            Operation::GetProduct => "get_product",
            Operation::GetLightPartList => "get_light_part_list",
            Operation::GetInventoryQuantity => "get_inventory_quantity",
            Operation::SaveCustomer => "save_customer",
            Operation::SaveSalesOrder => "save_sales_order",
            Operation::GetShipList => "get_ship_list",
            Operation::GetShipment => "get_shipment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request the session client can execute
///
/// The serialized form of the implementing type is the operation's parameter
/// mapping, so every implementor must serialize to a JSON object.
pub trait RemoteOperation: Serialize {
    /// Operation name sent to the backend
    const OPERATION: Operation;

    /// Payload the backend returns on success
    type Output: DeserializeOwned;
}

macro_rules! remote_operation {
    ($request:ty => $operation:ident, $output:ty) => {
        impl RemoteOperation for $request {
            const OPERATION: Operation = Operation::$operation;
            type Output = $output;
        }
    };
}

/// Looks up a customer by exact name
#[derive(Debug, Clone, Serialize)]
pub struct GetCustomer {
    pub name: String,
}

/// Lists carrier names
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCarrierList {}

/// Lists location group names
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetLocationGroupList {}

/// Fetches a part, scoped to a location group
#[derive(Debug, Clone, Serialize)]
pub struct GetPart {
    pub part_num: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_group: Option<String>,
}

/// Fetches a product by its number (the storefront SKU)
#[derive(Debug, Clone, Serialize)]
pub struct GetProduct {
    pub product_num: String,
}

/// Lists every part in summary form
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetLightPartList {}

/// Fetches stock levels for a part
#[derive(Debug, Clone, Serialize)]
pub struct GetInventoryQuantity {
    pub part_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_group: Option<String>,
}

/// Creates or updates a customer; the backend replies without a payload
#[derive(Debug, Clone, Serialize)]
pub struct SaveCustomer {
    pub customer: Customer,
}

/// Creates a sales order, optionally issuing it for fulfilment
#[derive(Debug, Clone, Serialize)]
pub struct SaveSalesOrder {
    pub issue: bool,
    pub sales_order: SalesOrder,
}

/// Lists shipments for a sales order number
#[derive(Debug, Clone, Serialize)]
pub struct GetShipList {
    pub order_number: String,
    pub record_count: u32,
}

/// Fetches full shipment detail
#[derive(Debug, Clone, Serialize)]
pub struct GetShipment {
    pub shipment_id: i64,
}

remote_operation!(GetCustomer => GetCustomer, Customer);
remote_operation!(GetCarrierList => GetCarrierList, Vec<String>);
remote_operation!(GetLocationGroupList => GetLocationGroupList, Vec<String>);
remote_operation!(GetPart => GetPart, Part);
remote_operation!(GetProduct => GetProduct, Product);
remote_operation!(GetLightPartList => GetLightPartList, Vec<LightPart>);
remote_operation!(GetInventoryQuantity => GetInventoryQuantity, InventoryQuantity);
remote_operation!(SaveCustomer => SaveCustomer, IgnoredAny);
remote_operation!(SaveSalesOrder => SaveSalesOrder, SalesOrder);
remote_operation!(GetShipList => GetShipList, Vec<ShipResult>);
remote_operation!(GetShipment => GetShipment, Shipment);
