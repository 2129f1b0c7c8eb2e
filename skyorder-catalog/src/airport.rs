use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub name: String,
    pub code: String, // IATA, e.g. "FRA"
    pub location: String,
}

impl Airport {
    pub fn new(name: impl Into<String>, code: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
