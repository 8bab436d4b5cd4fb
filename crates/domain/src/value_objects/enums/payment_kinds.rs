use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Which payment family a row belongs to. Decided at write time, never
/// inferred afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentKind {
    Property,
    Apartment,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Property => "property",
            PaymentKind::Apartment => "apartment",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "property" => Some(PaymentKind::Property),
            "apartment" => Some(PaymentKind::Apartment),
            _ => None,
        }
    }
}

impl Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
