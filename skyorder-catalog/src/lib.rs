pub mod aircraft;
pub mod airport;
pub mod flight;
pub mod passenger;

pub use aircraft::{Aircraft, AircraftError};
pub use airport::Airport;
pub use flight::{lock_flight, CapacityError, Flight, ScheduledFlight, SharedFlight};
pub use passenger::Passenger;
