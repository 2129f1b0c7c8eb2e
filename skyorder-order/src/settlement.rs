use crate::error::OrderError;
use crate::models::FlightOrder;
use chrono::{DateTime, Utc};
use skyorder_core::{CreditCard, PaymentMethod, PaymentStrategy, Wallet, WalletRegistry};
use std::sync::Arc;

/// Outcome of a successful settlement call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The strategy was charged and the order closed
    Charged { method: PaymentMethod, amount: i64 },
    /// The order was already closed; nothing was charged
    AlreadyClosed,
}

impl FlightOrder {
    /// Charge the order's price with `strategy` and close the order.
    ///
    /// Settling a closed order succeeds without touching the strategy. A
    /// declined charge leaves the order open, so it can be retried with the
    /// same or another strategy.
    pub fn process_order(&mut self, strategy: &mut dyn PaymentStrategy) -> Result<Settlement, OrderError> {
        if self.is_closed() {
            tracing::debug!("Order {} is already closed", self.id());
            return Ok(Settlement::AlreadyClosed);
        }

        let amount = self.price();
        let method = strategy.method();

        if !strategy.pay(amount) {
            tracing::warn!("Payment for order {} declined ({})", self.id(), method);
            return Err(OrderError::PaymentFailed {
                order_id: self.id(),
                method,
                amount,
            });
        }

        self.close_with(method);
        tracing::info!("Order {} closed: {} paid by {}", self.id(), amount, method);
        Ok(Settlement::Charged { method, amount })
    }

    /// Settle with a card built from raw details
    pub fn process_order_with_credit_card(
        &mut self,
        number: impl Into<String>,
        expiry: DateTime<Utc>,
        cvv: impl Into<String>,
    ) -> Result<Settlement, OrderError> {
        let mut card = CreditCard::new(number, expiry, cvv);
        self.process_order(&mut card)
    }

    /// Settle with wallet credentials checked against `registry`
    pub fn process_order_with_wallet(
        &mut self,
        registry: Arc<WalletRegistry>,
        email: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Settlement, OrderError> {
        let mut wallet = Wallet::new(registry, email, credential);
        self.process_order(&mut wallet)
    }
}
