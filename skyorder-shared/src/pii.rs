use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for credentials and contact data.
///
/// `Debug` and `Display` never print the wrapped value, so card numbers, wallet
/// passwords and customer emails can flow through `tracing` fields safely.
/// Serialization writes the real value; keep `Masked` fields out of anything that
/// is serialized for logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the real value. Call sites should be limited to the code that
    /// actually verifies the secret.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Masked<String> {
    /// Last `n` characters in clear, the rest starred (e.g. `************4242`).
    pub fn hint(&self, n: usize) -> String {
        let len = self.0.chars().count();
        let shown = n.min(len);
        let tail: String = self.0.chars().skip(len - shown).collect();
        format!("{}{}", "*".repeat(len - shown), tail)
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
