use crate::builder::OrderBuilder;
use crate::error::OrderError;
use crate::models::{CustomerRef, FlightOrder};
use skyorder_catalog::SharedFlight;
use skyorder_core::NoFlyList;
use skyorder_shared::Masked;
use std::sync::Arc;
use uuid::Uuid;

/// A customer and the orders they have placed (append-only)
#[derive(Debug)]
pub struct Customer {
    name: String,
    email: Masked<String>,
    orders: Vec<FlightOrder>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Masked::new(email.into()),
            orders: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Masked<String> {
        &self.email
    }

    pub fn orders(&self) -> &[FlightOrder] {
        &self.orders
    }

    pub fn order_mut(&mut self, order_id: Uuid) -> Option<&mut FlightOrder> {
        self.orders.iter_mut().find(|order| order.id() == order_id)
    }

    /// Book `passenger_names` on `flights` and keep the resulting order.
    ///
    /// Returns the stored order so it can be settled right away. Nothing is
    /// recorded if the booking is rejected.
    pub fn create_order<I, S>(
        &mut self,
        no_fly_list: &Arc<NoFlyList>,
        passenger_names: I,
        flights: Vec<SharedFlight>,
        price: i64,
    ) -> Result<&mut FlightOrder, OrderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OrderBuilder::new(Arc::clone(no_fly_list))
            .customer(self)
            .passengers(passenger_names)
            .flights(flights)
            .price(price)
            .build()
    }

    pub(crate) fn record_order(&mut self, order: FlightOrder) -> &mut FlightOrder {
        let index = self.orders.len();
        self.orders.push(order);
        &mut self.orders[index]
    }

    pub(crate) fn snapshot(&self) -> CustomerRef {
        CustomerRef {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
