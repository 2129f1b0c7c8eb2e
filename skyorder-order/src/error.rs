use skyorder_catalog::CapacityError;
use skyorder_core::PaymentMethod;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] Violation),

    #[error("Payment failed for order {order_id}: {method} declined {amount}")]
    PaymentFailed {
        order_id: Uuid,
        method: PaymentMethod,
        amount: i64,
    },
}

/// The booking rule an order request broke, and the entity that broke it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("no customer given")]
    MissingCustomer,

    #[error("no passengers given")]
    NoPassengers,

    #[error("no flights given")]
    NoFlights,

    #[error("price must not be negative, got {0}")]
    NegativePrice(i64),

    #[error("flight {0} listed more than once")]
    DuplicateFlight(u32),

    #[error("customer '{0}' is on the no-fly list")]
    NoFlyCustomer(String),

    #[error("passenger '{0}' is on the no-fly list")]
    NoFlyPassenger(String),

    #[error("flight {flight} has {available} seats left, {requested} requested")]
    InsufficientCapacity {
        flight: u32,
        requested: u32,
        available: u32,
    },

    #[error("flight {flight} has no capacity information for aircraft '{aircraft}'")]
    CapacityUnknown {
        flight: u32,
        aircraft: String,
    },
}

impl From<CapacityError> for Violation {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::Unknown { flight, aircraft } => Violation::CapacityUnknown { flight, aircraft },
            CapacityError::Exceeded { flight, requested, available } => Violation::InsufficientCapacity {
                flight,
                requested,
                available,
            },
        }
    }
}

impl From<CapacityError> for OrderError {
    fn from(err: CapacityError) -> Self {
        OrderError::InvalidOrder(err.into())
    }
}
