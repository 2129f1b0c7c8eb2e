use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyorder_catalog::{lock_flight, Passenger, SharedFlight};
use skyorder_core::PaymentMethod;
use skyorder_shared::Masked;
use uuid::Uuid;

/// Settlement status. `Closed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Closed,
}

/// Snapshot of the customer who placed an order
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerRef {
    pub name: String,
    pub email: Masked<String>,
}

/// Price, membership and settlement state shared by every kind of order.
///
/// There are no setters: price and passengers are fixed when the builder
/// creates the order, and the status only moves from `Open` to `Closed`.
#[derive(Debug, Clone)]
pub struct Order {
    id: Uuid,
    customer: CustomerRef,
    passengers: Vec<Passenger>,
    price: i64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub(crate) fn new(customer: CustomerRef, passengers: Vec<Passenger>, price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer,
            passengers,
            price,
            status: OrderStatus::Open,
            created_at: Utc::now(),
            closed_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer(&self) -> &CustomerRef {
        &self.customer
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Open -> Closed. No-op on a closed order.
    pub(crate) fn close(&mut self) {
        if self.status == OrderStatus::Open {
            self.status = OrderStatus::Closed;
            self.closed_at = Some(Utc::now());
        }
    }
}

/// An order for seats on one or more scheduled flights.
///
/// The flights are shared handles into the flight catalog; the order never
/// owns them.
#[derive(Debug, Clone)]
pub struct FlightOrder {
    order: Order,
    flights: Vec<SharedFlight>,
    payment_method: Option<PaymentMethod>,
}

impl FlightOrder {
    pub(crate) fn new(order: Order, flights: Vec<SharedFlight>) -> Self {
        Self {
            order,
            flights,
            payment_method: None,
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn id(&self) -> Uuid {
        self.order.id()
    }

    pub fn customer(&self) -> &CustomerRef {
        self.order.customer()
    }

    pub fn passengers(&self) -> &[Passenger] {
        self.order.passengers()
    }

    pub fn price(&self) -> i64 {
        self.order.price()
    }

    pub fn status(&self) -> OrderStatus {
        self.order.status()
    }

    pub fn is_closed(&self) -> bool {
        self.order.is_closed()
    }

    pub fn scheduled_flights(&self) -> &[SharedFlight] {
        &self.flights
    }

    /// How the order was settled; `None` while it is open
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub(crate) fn close_with(&mut self, method: PaymentMethod) {
        self.order.close();
        self.payment_method = Some(method);
    }

    /// Serializable view of the order
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            id: self.order.id,
            customer_name: self.order.customer.name.clone(),
            passengers: self.order.passengers.iter().map(|p| p.name().to_string()).collect(),
            flight_numbers: self.flights.iter().map(|f| lock_flight(f).number()).collect(),
            price: self.order.price,
            status: self.order.status,
            payment_method: self.payment_method,
            created_at: self.order.created_at,
            closed_at: self.order.closed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    pub id: Uuid,
    pub customer_name: String,
    pub passengers: Vec<String>,
    pub flight_numbers: Vec<u32>,
    pub price: i64,
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_ref() -> CustomerRef {
        CustomerRef {
            name: "Alice".to_string(),
            email: Masked::new("alice@example.com".to_string()),
        }
    }

    #[test]
    fn test_new_order_is_open() {
        let order = Order::new(customer_ref(), vec![Passenger::new("Alice")], 300);

        assert_eq!(order.status(), OrderStatus::Open);
        assert!(!order.is_closed());
        assert!(order.closed_at().is_none());
        assert_eq!(order.price(), 300);
    }

    #[test]
    fn test_close_is_one_way() {
        let mut order = Order::new(customer_ref(), vec![], 0);

        order.close();
        let closed_at = order.closed_at();
        assert!(order.is_closed());
        assert!(closed_at.is_some());

        order.close();
        assert_eq!(order.closed_at(), closed_at);
    }

    #[test]
    fn test_summary_serialization() {
        let mut order = FlightOrder::new(Order::new(customer_ref(), vec![Passenger::new("Bob")], 450), vec![]);
        order.close_with(PaymentMethod::CreditCard);

        let json = serde_json::to_value(order.summary()).unwrap();

        assert_eq!(json["customer_name"], "Alice");
        assert_eq!(json["passengers"], serde_json::json!(["Bob"]));
        assert_eq!(json["status"], "CLOSED");
        assert_eq!(json["payment_method"], "CREDIT_CARD");
        assert_eq!(json["price"], 450);
    }

    #[test]
    fn test_customer_ref_debug_masks_email() {
        let debug = format!("{:?}", customer_ref());
        assert!(!debug.contains("alice@example.com"));
    }
}
