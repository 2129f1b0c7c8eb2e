use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyorder_shared::Masked;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Balance a freshly issued card starts with, in minor currency units
pub const DEFAULT_CARD_BALANCE: i64 = 100_000;

/// Verification code that marks a card as unusable
pub const INVALID_CVV: &str = "000";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    Wallet,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::CreditCard => f.write_str("CREDIT_CARD"),
            PaymentMethod::Wallet => f.write_str("WALLET"),
        }
    }
}

/// Capability to settle a charge.
///
/// A declined charge is reported as `false`, not as an error, so the caller
/// can retry the same order with another strategy.
pub trait PaymentStrategy {
    /// Charge `amount` (minor currency units)
    fn pay(&mut self, amount: i64) -> bool;

    fn method(&self) -> PaymentMethod;
}

/// Issuing rules applied when a card is constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPolicy {
    pub opening_balance: i64,
    pub invalid_cvv: String,
}

impl Default for CardPolicy {
    fn default() -> Self {
        Self {
            opening_balance: DEFAULT_CARD_BALANCE,
            invalid_cvv: INVALID_CVV.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreditCard {
    number: Masked<String>,
    expiry: DateTime<Utc>,
    cvv: Masked<String>,
    balance: i64,
    valid: bool,
}

impl CreditCard {
    /// Card checked against the default policy at the current time
    pub fn new(number: impl Into<String>, expiry: DateTime<Utc>, cvv: impl Into<String>) -> Self {
        Self::checked_at(number, expiry, cvv, &CardPolicy::default(), Utc::now())
    }

    /// Card whose validity is decided against `policy` as of `now`.
    ///
    /// Valid means: non-empty number, expiry strictly after `now`, and a
    /// verification code other than the policy's sentinel.
    pub fn checked_at(
        number: impl Into<String>,
        expiry: DateTime<Utc>,
        cvv: impl Into<String>,
        policy: &CardPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        let number: String = number.into();
        let cvv: String = cvv.into();
        let valid = !number.is_empty() && expiry > now && cvv != policy.invalid_cvv;

        Self {
            number: Masked::new(number),
            expiry,
            cvv: Masked::new(cvv),
            balance: policy.opening_balance,
            valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    pub fn cvv(&self) -> &Masked<String> {
        &self.cvv
    }

    /// Masked card number with the last four digits visible
    pub fn number_hint(&self) -> String {
        self.number.hint(4)
    }
}

impl PaymentStrategy for CreditCard {
    fn pay(&mut self, amount: i64) -> bool {
        if !self.valid {
            tracing::warn!("Card {} declined: card is not valid", self.number_hint());
            return false;
        }

        if amount < 0 {
            tracing::warn!("Card {} declined: negative amount {}", self.number_hint(), amount);
            return false;
        }

        if self.balance < amount {
            tracing::warn!(
                "Card {} declined: insufficient funds for {} (balance {})",
                self.number_hint(),
                amount,
                self.balance
            );
            return false;
        }

        self.balance -= amount;
        tracing::info!("Paid {} using credit card {}", amount, self.number_hint());
        true
    }

    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }
}

/// Read-only lookup of wallet credentials, credential -> account email
#[derive(Clone, Default)]
pub struct WalletRegistry {
    accounts: HashMap<String, String>,
}

impl WalletRegistry {
    pub fn new(accounts: HashMap<String, String>) -> Self {
        Self { accounts }
    }

    /// Accounts every installation starts with
    pub fn builtin() -> Self {
        [("amanda1985", "amanda@ya.com"), ("qwerty", "john@amazon.eu")]
            .into_iter()
            .collect()
    }

    /// True only if `credential` is registered and maps exactly to `email`
    pub fn verify(&self, email: &str, credential: &str) -> bool {
        self.accounts.get(credential).is_some_and(|registered| registered == email)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WalletRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// Keys are secrets; only the size is printed.
impl fmt::Debug for WalletRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRegistry").field("accounts", &self.accounts.len()).finish()
    }
}

/// Wallet payment: credential verification only, no balance tracking
#[derive(Debug, Clone)]
pub struct Wallet {
    registry: Arc<WalletRegistry>,
    email: Masked<String>,
    credential: Masked<String>,
}

impl Wallet {
    pub fn new(registry: Arc<WalletRegistry>, email: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            registry,
            email: Masked::new(email.into()),
            credential: Masked::new(credential.into()),
        }
    }
}

impl PaymentStrategy for Wallet {
    fn pay(&mut self, amount: i64) -> bool {
        if amount < 0 {
            tracing::warn!("Wallet payment of {} declined: negative amount", amount);
            return false;
        }

        if self.registry.verify(self.email.expose(), self.credential.expose()) {
            tracing::info!("Paid {} using wallet", amount);
            true
        } else {
            tracing::warn!("Wallet payment of {} declined: invalid credentials", amount);
            false
        }
    }

    fn method(&self) -> PaymentMethod {
        PaymentMethod::Wallet
    }
}
