use crate::customer::Customer;
use crate::error::{OrderError, Violation};
use crate::models::{FlightOrder, Order};
use skyorder_catalog::{lock_flight, Passenger, ScheduledFlight, SharedFlight};
use skyorder_core::NoFlyList;
use std::sync::{Arc, MutexGuard};

/// Validates a booking request and turns it into an open `FlightOrder`.
///
/// Inputs are collected fluently; nothing is checked or mutated until
/// [`OrderBuilder::build`], which runs every rule, enrolls the passengers and
/// records the order on the customer as one step.
pub struct OrderBuilder<'a> {
    no_fly_list: Arc<NoFlyList>,
    customer: Option<&'a mut Customer>,
    passenger_names: Vec<String>,
    flights: Vec<SharedFlight>,
    price: i64,
}

impl<'a> OrderBuilder<'a> {
    pub fn new(no_fly_list: Arc<NoFlyList>) -> Self {
        Self {
            no_fly_list,
            customer: None,
            passenger_names: Vec::new(),
            flights: Vec::new(),
            price: 0,
        }
    }

    pub fn customer(mut self, customer: &'a mut Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn passengers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passenger_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn flights(mut self, flights: Vec<SharedFlight>) -> Self {
        self.flights = flights;
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    /// Validate and construct the order, appending it to the customer's
    /// order list.
    ///
    /// Rules, first failure wins:
    /// 1. the customer is not on the no-fly list
    /// 2. no passenger is on the no-fly list
    /// 3. every flight has at least one free seat per passenger
    ///
    /// All flights of the order stay locked from the capacity check until the
    /// passengers are enrolled, so a concurrent build cannot claim the same
    /// seats. On failure no flight is touched and the customer records nothing.
    pub fn build(mut self) -> Result<&'a mut FlightOrder, OrderError> {
        self.screen().inspect_err(|violation| {
            tracing::warn!("Order rejected: {}", violation);
        })?;
        let customer = self.customer.take().ok_or(Violation::MissingCustomer)?;

        let passengers: Vec<Passenger> = self.passenger_names.iter().map(|name| Passenger::new(name.as_str())).collect();

        {
            let mut guards = self.lock_flights();

            Self::check_capacity(&guards, passengers.len() as u32).inspect_err(|violation| {
                tracing::warn!("Order for customer {} rejected: {}", customer.name(), violation);
            })?;

            for (_, flight) in guards.iter_mut() {
                flight.add_passengers(&passengers)?;
            }
        }

        let order = Order::new(customer.snapshot(), passengers, self.price);
        tracing::info!(
            "Order {} placed by {}: {} passengers on {} flights for {}",
            order.id(),
            customer.name(),
            order.passengers().len(),
            self.flights.len(),
            order.price()
        );

        Ok(customer.record_order(FlightOrder::new(order, self.flights)))
    }

    /// Request shape and no-fly rules; needs no flight locks
    fn screen(&self) -> Result<(), Violation> {
        let customer = self.customer.as_deref().ok_or(Violation::MissingCustomer)?;

        if self.passenger_names.is_empty() {
            return Err(Violation::NoPassengers);
        }
        if self.flights.is_empty() {
            return Err(Violation::NoFlights);
        }
        if self.price < 0 {
            return Err(Violation::NegativePrice(self.price));
        }
        for (i, flight) in self.flights.iter().enumerate() {
            if self.flights[..i].iter().any(|earlier| Arc::ptr_eq(earlier, flight)) {
                return Err(Violation::DuplicateFlight(lock_flight(flight).number()));
            }
        }

        if self.no_fly_list.contains(customer.name()) {
            return Err(Violation::NoFlyCustomer(customer.name().to_string()));
        }
        if let Some(name) = self.no_fly_list.first_listed(&self.passenger_names) {
            return Err(Violation::NoFlyPassenger(name.to_string()));
        }

        Ok(())
    }

    /// Lock every flight, acquiring in address order so that builders with
    /// overlapping flight sets cannot deadlock. The guards come back in the
    /// order the flights were given.
    fn lock_flights(&self) -> Vec<(usize, MutexGuard<'_, ScheduledFlight>)> {
        let mut by_address: Vec<(usize, &SharedFlight)> = self.flights.iter().enumerate().collect();
        by_address.sort_by_key(|(_, flight)| Arc::as_ptr(flight) as usize);

        let mut guards: Vec<(usize, MutexGuard<'_, ScheduledFlight>)> = by_address
            .into_iter()
            .map(|(index, flight)| (index, lock_flight(flight)))
            .collect();
        guards.sort_by_key(|(index, _)| *index);
        guards
    }

    fn check_capacity(
        guards: &[(usize, MutexGuard<'_, ScheduledFlight>)],
        requested: u32,
    ) -> Result<(), Violation> {
        for (_, flight) in guards {
            let available = flight.available_capacity()?;
            tracing::debug!("Flight {}: {} seats available, {} requested", flight.number(), available, requested);

            if available < requested {
                return Err(Violation::InsufficientCapacity {
                    flight: flight.number(),
                    requested,
                    available,
                });
            }
        }
        Ok(())
    }
}
