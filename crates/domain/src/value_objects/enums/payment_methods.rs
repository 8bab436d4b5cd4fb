use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Upi => "upi",
        }
    }

    /// `card` is the legacy spelling older clients still send; it is
    /// normalized to `credit_card` before anything is persisted.
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "credit_card" | "card" => Some(PaymentMethod::CreditCard),
            "upi" => Some(PaymentMethod::Upi),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_legacy_card_alias() {
        assert_eq!(
            PaymentMethod::from_str("card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(
            PaymentMethod::from_str("credit_card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(PaymentMethod::from_str("upi"), Some(PaymentMethod::Upi));
        assert_eq!(PaymentMethod::from_str("cash"), None);
    }

    #[test]
    fn stored_spelling_is_canonical() {
        assert_eq!(
            PaymentMethod::from_str("card").unwrap().to_string(),
            "credit_card"
        );
    }
}
