use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-wing passenger aircraft models
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaneModel {
    A380,
    A350,
    Embraer190,
    AntonovAn2,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HelicopterModel {
    H1,
    H2,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneModel {
    HypaHype,
}

/// Aircraft assigned to a flight.
///
/// Only the passenger-carrying variants expose capacity data. `Unspecified`
/// covers anything else (freighters, ferry aircraft, ...) and makes every
/// capacity query on its flights fail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aircraft {
    PassengerPlane { model: PlaneModel },
    Helicopter { model: HelicopterModel },
    PassengerDrone { model: DroneModel },
    Unspecified { description: String },
}

impl Aircraft {
    /// Build an aircraft from its type and model names, e.g. `("PassengerPlane", "A380")`.
    pub fn from_type(aircraft_type: &str, model: &str) -> Result<Self, AircraftError> {
        match aircraft_type {
            "PassengerPlane" => Ok(Aircraft::PassengerPlane { model: model.parse()? }),
            "Helicopter" => Ok(Aircraft::Helicopter { model: model.parse()? }),
            "PassengerDrone" => Ok(Aircraft::PassengerDrone { model: model.parse()? }),
            other => Err(AircraftError::UnknownType(other.to_string())),
        }
    }

    pub fn unspecified(description: impl Into<String>) -> Self {
        Aircraft::Unspecified { description: description.into() }
    }

    /// Maximum number of passengers, if this aircraft type defines one
    pub fn passenger_capacity(&self) -> Option<u32> {
        match self {
            Aircraft::PassengerPlane { model } => Some(match model {
                PlaneModel::A380 => 500,
                PlaneModel::A350 => 320,
                PlaneModel::Embraer190 => 25,
                PlaneModel::AntonovAn2 => 15,
            }),
            Aircraft::Helicopter { model } => Some(match model {
                HelicopterModel::H1 => 4,
                HelicopterModel::H2 => 6,
            }),
            Aircraft::PassengerDrone { model: DroneModel::HypaHype } => Some(4),
            Aircraft::Unspecified { .. } => None,
        }
    }

    pub fn crew_capacity(&self) -> Option<u32> {
        match self {
            Aircraft::PassengerPlane { model } => Some(match model {
                PlaneModel::A380 => 42,
                PlaneModel::A350 => 40,
                PlaneModel::Embraer190 => 5,
                PlaneModel::AntonovAn2 => 3,
            }),
            Aircraft::Helicopter { .. } => Some(2),
            // Drones fly without crew
            Aircraft::PassengerDrone { .. } => Some(0),
            Aircraft::Unspecified { .. } => None,
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            Aircraft::PassengerPlane { model } => model.as_str(),
            Aircraft::Helicopter { model } => model.as_str(),
            Aircraft::PassengerDrone { model } => model.as_str(),
            Aircraft::Unspecified { description } => description,
        }
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

impl PlaneModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaneModel::A380 => "A380",
            PlaneModel::A350 => "A350",
            PlaneModel::Embraer190 => "Embraer 190",
            PlaneModel::AntonovAn2 => "Antonov AN2",
        }
    }
}

impl FromStr for PlaneModel {
    type Err = AircraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A380" => Ok(PlaneModel::A380),
            "A350" => Ok(PlaneModel::A350),
            "Embraer 190" => Ok(PlaneModel::Embraer190),
            "Antonov AN2" => Ok(PlaneModel::AntonovAn2),
            other => Err(AircraftError::UnknownModel(other.to_string())),
        }
    }
}

impl HelicopterModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HelicopterModel::H1 => "H1",
            HelicopterModel::H2 => "H2",
        }
    }
}

impl FromStr for HelicopterModel {
    type Err = AircraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H1" => Ok(HelicopterModel::H1),
            "H2" => Ok(HelicopterModel::H2),
            other => Err(AircraftError::UnknownModel(other.to_string())),
        }
    }
}

impl DroneModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroneModel::HypaHype => "HypaHype",
        }
    }
}

impl FromStr for DroneModel {
    type Err = AircraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HypaHype" => Ok(DroneModel::HypaHype),
            other => Err(AircraftError::UnknownModel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AircraftError {
    #[error("Aircraft type '{0}' is not recognized")]
    UnknownType(String),

    #[error("Model type '{0}' is not recognized")]
    UnknownModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_builds_known_models() {
        let plane = Aircraft::from_type("PassengerPlane", "A380").unwrap();
        assert_eq!(plane.passenger_capacity(), Some(500));
        assert_eq!(plane.crew_capacity(), Some(42));

        let drone = Aircraft::from_type("PassengerDrone", "HypaHype").unwrap();
        assert_eq!(drone.passenger_capacity(), Some(4));
        assert_eq!(drone.crew_capacity(), Some(0));

        let heli = Aircraft::from_type("Helicopter", "H2").unwrap();
        assert_eq!(heli.passenger_capacity(), Some(6));
    }

    #[test]
    fn test_factory_rejects_unknown_names() {
        assert_eq!(
            Aircraft::from_type("Zeppelin", "LZ 129"),
            Err(AircraftError::UnknownType("Zeppelin".to_string()))
        );
        assert_eq!(
            Aircraft::from_type("PassengerDrone", "Quadcopter"),
            Err(AircraftError::UnknownModel("Quadcopter".to_string()))
        );
    }

    #[test]
    fn test_unspecified_aircraft_has_no_capacity() {
        let freighter = Aircraft::unspecified("Cargo Lifter");
        assert_eq!(freighter.passenger_capacity(), None);
        assert_eq!(freighter.crew_capacity(), None);
        assert_eq!(freighter.to_string(), "Cargo Lifter");
    }

    #[test]
    fn test_aircraft_serialization() {
        let plane = Aircraft::from_type("PassengerPlane", "Embraer 190").unwrap();
        let json = serde_json::to_value(&plane).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "PASSENGER_PLANE", "model": "EMBRAER190" }));
    }
}
