//! Order synchronisation: customers, sales orders and shipments

use tracing::{debug, warn};

use core_kernel::OperationMetadata;
use domain_commerce::Order;

use crate::client::SessionClient;
use crate::connection::Connector;
use crate::protocol::{GetShipList, GetShipment, SaveCustomer, SaveSalesOrder, SHIP_LIST_RECORD_COUNT};
use crate::wire::{SalesOrder, Shipment};

impl<C: Connector> SessionClient<C> {
    /// Creates or updates the backend customer for an order
    ///
    /// The backend returns no payload for this call, so success can only be
    /// told from failure through [`SessionClient::has_error`].
    pub fn create_customer(&mut self, order: &Order) {
        let customer = self.customer_adapter.adapt(order);
        let metadata = OperationMetadata::for_order(order.id);
        self.execute(&SaveCustomer { customer }, Some(&metadata));
    }

    /// Submits an order to the backend as a sales order
    ///
    /// When the adapted order names a customer that the backend does not
    /// know, the customer is created first; if that fails the sales order is
    /// not submitted. `issue` asks the backend to release the order for
    /// fulfilment immediately.
    pub fn create_sales_order(&mut self, order: &Order, issue: bool) -> Option<SalesOrder> {
        let mut sales_order = self.sales_order_adapter.adapt(order);
        if sales_order.location_group.is_none() {
            sales_order.location_group = self.config.location_group.clone();
        }

        if let Some(name) = sales_order.customer_name().map(str::to_string) {
            if self.customer(&name).is_none() {
                debug!(customer = %name, order_id = %order.id, "Customer missing, creating it");
                self.create_customer(order);
                if self.has_error() {
                    warn!(customer = %name, order_id = %order.id, "Customer creation failed, sales order not submitted");
                    return None;
                }
            }
        }

        let metadata = OperationMetadata::for_order(order.id);
        self.execute(&SaveSalesOrder { issue, sales_order }, Some(&metadata))
    }

    /// Shipped shipments for an order, in ship-list order
    ///
    /// Lists shipments for the order's sales order number and fetches full
    /// detail for each entry that matches the number and has status
    /// "Shipped". Entries whose detail cannot be fetched are left out.
    pub fn order_shipments(&mut self, order: &Order) -> Vec<Shipment> {
        let Some(so_number) = order.so_number().map(str::to_string) else {
            debug!(order_id = %order.id, "Order has no sales order number, no shipments to fetch");
            return Vec::new();
        };

        let metadata = OperationMetadata::for_order(order.id);
        let Some(ship_results) = self.execute(
            &GetShipList {
                order_number: so_number.clone(),
                record_count: SHIP_LIST_RECORD_COUNT,
            },
            Some(&metadata),
        ) else {
            return Vec::new();
        };

        ship_results
            .into_iter()
            .filter(|result| result.is_shipped_for(&so_number))
            .filter_map(|result| {
                let shipment = self.execute(
                    &GetShipment {
                        shipment_id: result.ship_id,
                    },
                    Some(&metadata),
                );
                if shipment.is_none() {
                    debug!(ship_id = result.ship_id, "No detail returned for shipment");
                }
                shipment
            })
            .collect()
    }
}
