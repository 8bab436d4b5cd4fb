use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A unit moves `available -> booked` at most once; cancellation is not
/// modeled, so there is no back-transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnitStatus {
    Available,
    Booked,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Booked => "booked",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "available" => Some(UnitStatus::Available),
            "booked" => Some(UnitStatus::Booked),
            _ => None,
        }
    }
}

impl Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
