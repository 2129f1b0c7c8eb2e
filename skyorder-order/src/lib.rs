pub mod builder;
pub mod customer;
pub mod error;
pub mod models;
pub mod settlement;

pub use builder::OrderBuilder;
pub use customer::Customer;
pub use error::{OrderError, Violation};
pub use models::{CustomerRef, FlightOrder, Order, OrderStatus, OrderSummary};
pub use settlement::Settlement;
