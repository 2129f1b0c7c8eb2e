use crate::aircraft::Aircraft;
use crate::airport::Airport;
use crate::passenger::Passenger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default fare for a scheduled flight, in minor currency units
pub const DEFAULT_PRICE: i64 = 100;

/// A scheduled flight shared between the flight catalog and the orders booked on it.
///
/// Order construction locks every flight of the order for the whole
/// validate-and-enroll step, so capacity checks and enrollment are atomic
/// with respect to other builders.
pub type SharedFlight = Arc<Mutex<ScheduledFlight>>;

/// Lock a shared flight.
///
/// A poisoned lock is recovered: occupancy only changes after a full
/// validation pass, so a panicking holder cannot leave a half-enrolled group.
pub fn lock_flight(flight: &SharedFlight) -> MutexGuard<'_, ScheduledFlight> {
    flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Route and equipment of a flight, independent of its schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flight {
    pub number: u32,
    pub departure: Airport,
    pub arrival: Airport,
    pub aircraft: Aircraft,
}

impl Flight {
    pub fn new(number: u32, departure: Airport, arrival: Airport, aircraft: Aircraft) -> Self {
        Self {
            number,
            departure,
            arrival,
            aircraft,
        }
    }
}

/// A dated departure of a flight together with its seat occupancy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledFlight {
    flight: Flight,
    departure_time: DateTime<Utc>,
    current_price: i64,
    passengers: Vec<Passenger>,
}

impl ScheduledFlight {
    pub fn new(
        number: u32,
        departure: Airport,
        arrival: Airport,
        aircraft: Aircraft,
        departure_time: DateTime<Utc>,
    ) -> Self {
        Self::with_price(number, departure, arrival, aircraft, departure_time, DEFAULT_PRICE)
    }

    pub fn with_price(
        number: u32,
        departure: Airport,
        arrival: Airport,
        aircraft: Aircraft,
        departure_time: DateTime<Utc>,
        current_price: i64,
    ) -> Self {
        Self {
            flight: Flight::new(number, departure, arrival, aircraft),
            departure_time,
            current_price,
            passengers: Vec::new(),
        }
    }

    /// Wrap into the handle shared by the catalog and orders
    pub fn into_shared(self) -> SharedFlight {
        Arc::new(Mutex::new(self))
    }

    pub fn number(&self) -> u32 {
        self.flight.number
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn departure(&self) -> &Airport {
        &self.flight.departure
    }

    pub fn arrival(&self) -> &Airport {
        &self.flight.arrival
    }

    pub fn aircraft(&self) -> &Aircraft {
        &self.flight.aircraft
    }

    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    pub fn current_price(&self) -> i64 {
        self.current_price
    }

    pub fn set_current_price(&mut self, current_price: i64) {
        self.current_price = current_price;
    }

    /// Maximum number of passengers the assigned aircraft can carry
    pub fn capacity(&self) -> Result<u32, CapacityError> {
        self.flight.aircraft.passenger_capacity().ok_or_else(|| self.unknown_capacity())
    }

    pub fn crew_capacity(&self) -> Result<u32, CapacityError> {
        self.flight.aircraft.crew_capacity().ok_or_else(|| self.unknown_capacity())
    }

    /// Seats still free: capacity minus enrolled passengers
    pub fn available_capacity(&self) -> Result<u32, CapacityError> {
        let capacity = self.capacity()?;
        Ok(capacity.saturating_sub(self.enrolled_count()))
    }

    pub fn enrolled_count(&self) -> u32 {
        self.passengers.len() as u32
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Enroll passengers on this flight.
    ///
    /// Fails without enrolling anyone if the group does not fit. Order
    /// construction validates every flight of an order before calling this,
    /// so within a build it only fails if capacity data is missing.
    pub fn add_passengers(&mut self, passengers: &[Passenger]) -> Result<(), CapacityError> {
        let available = self.available_capacity()?;
        let requested = passengers.len() as u32;

        if available < requested {
            return Err(CapacityError::Exceeded {
                flight: self.number(),
                requested,
                available,
            });
        }

        self.passengers.extend_from_slice(passengers);
        tracing::debug!(
            "Flight {} enrolled {} passengers ({} seats left)",
            self.number(),
            requested,
            available - requested
        );
        Ok(())
    }

    fn unknown_capacity(&self) -> CapacityError {
        CapacityError::Unknown {
            flight: self.number(),
            aircraft: self.flight.aircraft.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("Flight {flight}: aircraft '{aircraft}' has no capacity information")]
    Unknown {
        flight: u32,
        aircraft: String,
    },

    #[error("Flight {flight} over capacity: requested {requested}, available {available}")]
    Exceeded {
        flight: u32,
        requested: u32,
        available: u32,
    },
}
