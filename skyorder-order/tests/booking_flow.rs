use chrono::{Duration, Utc};
use skyorder_catalog::{lock_flight, Aircraft, Airport, ScheduledFlight, SharedFlight};
use skyorder_core::{Config, CreditCard, PaymentMethod, PaymentStrategy};
use skyorder_order::{Customer, OrderBuilder, OrderError, OrderStatus, Settlement, Violation};
use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyorder_order=debug,skyorder_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn drone_flight(number: u32) -> SharedFlight {
    ScheduledFlight::new(
        number,
        Airport::new("Berlin Airport", "BER", "Berlin, Berlin"),
        Airport::new("Frankfurt Airport", "FRA", "Frankfurt, Hesse"),
        Aircraft::from_type("PassengerDrone", "HypaHype").unwrap(),
        Utc::now() + Duration::days(2),
    )
    .into_shared()
}

#[test]
fn test_alice_books_and_pays() {
    init_tracing();
    let config = Config::default();
    let no_fly = Arc::new(config.no_fly_list());
    let flight = drone_flight(419);

    let mut alice = Customer::new("Alice", "alice@example.com");
    let order = alice
        .create_order(&no_fly, ["Alice", "Bob"], vec![flight.clone()], 180)
        .unwrap();

    {
        let flight = lock_flight(&flight);
        assert_eq!(flight.enrolled_count(), 2);
        assert_eq!(flight.available_capacity(), Ok(2));
    }

    let mut card = CreditCard::checked_at(
        "4111111111111111",
        Utc::now() + Duration::days(90),
        "123",
        &config.card_policy(),
        Utc::now(),
    );
    let outcome = order.process_order(&mut card).unwrap();

    assert_eq!(outcome, Settlement::Charged { method: PaymentMethod::CreditCard, amount: 180 });
    assert_eq!(card.balance(), 100_000 - 180);
    assert_eq!(alice.orders()[0].status(), OrderStatus::Closed);

    let summary = alice.orders()[0].summary();
    assert_eq!(summary.flight_numbers, vec![419]);
    assert_eq!(summary.passengers, vec!["Alice", "Bob"]);
}

#[test]
fn test_peter_is_refused() {
    init_tracing();
    let no_fly = Arc::new(Config::default().no_fly_list());
    let flight = drone_flight(420);

    let mut peter = Customer::new("Peter", "peter@example.com");
    let result = peter.create_order(&no_fly, ["Alice"], vec![flight.clone()], 100);

    assert!(matches!(
        result,
        Err(OrderError::InvalidOrder(Violation::NoFlyCustomer(ref name))) if name == "Peter"
    ));
    assert_eq!(lock_flight(&flight).enrolled_count(), 0);
    assert!(peter.orders().is_empty());
}

#[test]
fn test_configured_tables_drive_validation_and_payment() {
    init_tracing();
    let toml = r#"
        [business_rules]
        no_fly_list = ["Mallory"]

        [wallet.accounts]
        hunter2 = "trudy@example.com"
    "#;
    let config = Config::from_toml_str(toml, HashMap::new()).unwrap();
    let no_fly = Arc::new(config.no_fly_list());
    let registry = Arc::new(config.wallet_registry());
    let flight = drone_flight(421);

    // Peter is only barred by the built-in list
    let mut peter = Customer::new("Peter", "peter@example.com");
    let order = peter.create_order(&no_fly, ["Peter"], vec![flight.clone()], 90).unwrap();

    let declined = order.process_order_with_wallet(registry.clone(), "john@amazon.eu", "qwerty");
    assert!(matches!(declined, Err(OrderError::PaymentFailed { amount: 90, .. })));

    let settled = order.process_order_with_wallet(registry, "trudy@example.com", "hunter2");
    assert!(settled.is_ok());

    let result = peter.create_order(&no_fly, ["Mallory"], vec![flight.clone()], 90);
    assert!(matches!(result, Err(OrderError::InvalidOrder(Violation::NoFlyPassenger(_)))));
    assert_eq!(lock_flight(&flight).enrolled_count(), 1);
}

#[test]
fn test_multi_leg_booking_is_all_or_nothing() {
    init_tracing();
    let no_fly = Arc::new(Config::default().no_fly_list());
    let first_leg = drone_flight(10);
    let second_leg = drone_flight(11);

    let mut bob = Customer::new("Bob", "bob@example.com");
    bob.create_order(&no_fly, ["Carol", "Dave", "Eve"], vec![second_leg.clone()], 300).unwrap();

    let result = bob.create_order(&no_fly, ["Bob", "Frank"], vec![first_leg.clone(), second_leg.clone()], 400);

    assert!(matches!(
        result,
        Err(OrderError::InvalidOrder(Violation::InsufficientCapacity { flight: 11, requested: 2, available: 1 }))
    ));
    assert_eq!(lock_flight(&first_leg).enrolled_count(), 0);
    assert_eq!(lock_flight(&second_leg).enrolled_count(), 3);
    assert_eq!(bob.orders().len(), 1);
}

#[test]
fn test_concurrent_builders_cannot_overbook() {
    init_tracing();
    let no_fly = Arc::new(Config::default().no_fly_list());
    let contested = drone_flight(500);
    let builders = 8;
    let barrier = Arc::new(Barrier::new(builders));

    let handles: Vec<_> = (0..builders)
        .map(|i| {
            let no_fly = Arc::clone(&no_fly);
            let contested = Arc::clone(&contested);
            let barrier = Arc::clone(&barrier);
            // Each builder also books a private leg so lock sets overlap partially
            let private_leg = drone_flight(600 + i as u32);

            thread::spawn(move || {
                let mut customer = Customer::new(format!("Customer {}", i), format!("c{}@example.com", i));
                barrier.wait();
                let placed = OrderBuilder::new(no_fly)
                    .customer(&mut customer)
                    .passengers([format!("Guest {}a", i), format!("Guest {}b", i), format!("Guest {}c", i)])
                    .flights(vec![private_leg, contested])
                    .price(100)
                    .build()
                    .is_ok();
                assert_eq!(customer.orders().len(), usize::from(placed));
                placed
            })
        })
        .collect();

    let successes = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

    // Four seats, three per booking: exactly one builder wins
    assert_eq!(successes, 1);
    assert_eq!(lock_flight(&contested).enrolled_count(), 3);
}

#[test]
fn test_settlement_after_close_never_charges() {
    init_tracing();
    let no_fly = Arc::new(Config::default().no_fly_list());
    let mut alice = Customer::new("Alice", "alice@example.com");
    let order = alice.create_order(&no_fly, ["Alice"], vec![drone_flight(7)], 500).unwrap();
    let order_id = order.id();

    let expiry = Utc::now() + Duration::days(30);
    order.process_order_with_credit_card("4111111111111111", expiry, "123").unwrap();

    let mut second_card = CreditCard::new("5500000000000004", expiry, "456");
    let order = alice.order_mut(order_id).unwrap();
    assert_eq!(order.process_order(&mut second_card), Ok(Settlement::AlreadyClosed));
    assert_eq!(second_card.balance(), 100_000);
    assert!(second_card.pay(0));
    assert_eq!(order.price(), 500);
}
