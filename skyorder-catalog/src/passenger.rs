use serde::{Deserialize, Serialize};
use std::fmt;

/// A traveller enrolled on a scheduled flight.
///
/// Passengers carry no identity beyond their name; two passengers with the
/// same name are equal, which is what no-fly screening relies on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Passenger {
    name: String,
}

impl Passenger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Passenger {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Passenger {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
