use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::enums::payment_methods::PaymentMethod;

/// Payment details are a sum type: only the fields of the chosen method
/// exist on the record, instead of a flat object with the unused variant
/// nulled out by convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PaymentDetails {
    CreditCard {
        card_holder: String,
        card_number: String,
        expiry_date: String,
        cvv: String,
    },
    Upi {
        upi_id: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentDetailsError {
    #[error("All credit card details are required")]
    IncompleteCard,
    #[error("Card number must be at least 16 digits")]
    CardNumberTooShort,
    #[error("Expiry date must be in MM/YY format")]
    BadExpiryDate,
    #[error("CVV must be at least 3 digits")]
    CvvTooShort,
    #[error("UPI ID is required for UPI payments")]
    MissingUpiId,
    #[error("UPI ID must contain an @ separator")]
    BadUpiId,
    #[error("Payment details do not match the {0} payment method")]
    MethodMismatch(PaymentMethod),
}

impl PaymentDetails {
    /// Format-only checks: this records payment intent, it does not talk
    /// to a gateway, so there is no Luhn or issuer validation.
    pub fn validate(&self, method: PaymentMethod) -> Result<(), PaymentDetailsError> {
        match (method, self) {
            (
                PaymentMethod::CreditCard,
                PaymentDetails::CreditCard {
                    card_holder,
                    card_number,
                    expiry_date,
                    cvv,
                },
            ) => {
                if card_holder.trim().is_empty()
                    || card_number.trim().is_empty()
                    || expiry_date.trim().is_empty()
                    || cvv.trim().is_empty()
                {
                    return Err(PaymentDetailsError::IncompleteCard);
                }
                if card_number.trim().len() < 16 {
                    return Err(PaymentDetailsError::CardNumberTooShort);
                }
                if !expiry_date.contains('/') {
                    return Err(PaymentDetailsError::BadExpiryDate);
                }
                if cvv.trim().len() < 3 {
                    return Err(PaymentDetailsError::CvvTooShort);
                }
                Ok(())
            }
            (PaymentMethod::Upi, PaymentDetails::Upi { upi_id }) => {
                if upi_id.trim().is_empty() {
                    return Err(PaymentDetailsError::MissingUpiId);
                }
                if !upi_id.contains('@') {
                    return Err(PaymentDetailsError::BadUpiId);
                }
                Ok(())
            }
            (method, _) => Err(PaymentDetailsError::MethodMismatch(method)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_details() -> PaymentDetails {
        PaymentDetails::CreditCard {
            card_holder: "Asha Rao".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn accepts_complete_card_details() {
        assert_eq!(card_details().validate(PaymentMethod::CreditCard), Ok(()));
    }

    #[test]
    fn rejects_short_card_number() {
        let details = PaymentDetails::CreditCard {
            card_holder: "Asha Rao".to_string(),
            card_number: "4111".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: "123".to_string(),
        };
        assert_eq!(
            details.validate(PaymentMethod::CreditCard),
            Err(PaymentDetailsError::CardNumberTooShort)
        );
    }

    #[test]
    fn rejects_blank_card_fields() {
        let details = PaymentDetails::CreditCard {
            card_holder: "".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: "123".to_string(),
        };
        assert_eq!(
            details.validate(PaymentMethod::CreditCard),
            Err(PaymentDetailsError::IncompleteCard)
        );
    }

    #[test]
    fn accepts_upi_id_with_separator() {
        let details = PaymentDetails::Upi {
            upi_id: "name@bank".to_string(),
        };
        assert_eq!(details.validate(PaymentMethod::Upi), Ok(()));
    }

    #[test]
    fn rejects_upi_id_without_separator() {
        let details = PaymentDetails::Upi {
            upi_id: "nameBank".to_string(),
        };
        assert_eq!(
            details.validate(PaymentMethod::Upi),
            Err(PaymentDetailsError::BadUpiId)
        );
    }

    #[test]
    fn rejects_details_for_the_wrong_method() {
        let details = PaymentDetails::Upi {
            upi_id: "name@bank".to_string(),
        };
        assert_eq!(
            details.validate(PaymentMethod::CreditCard),
            Err(PaymentDetailsError::MethodMismatch(
                PaymentMethod::CreditCard
            ))
        );
    }

    #[test]
    fn deserializes_each_variant_from_flat_objects() {
        let card: PaymentDetails = serde_json::from_str(
            r#"{"card_holder":"Asha Rao","card_number":"4111111111111111","expiry_date":"09/27","cvv":"123"}"#,
        )
        .unwrap();
        assert_eq!(card, card_details());

        let upi: PaymentDetails = serde_json::from_str(r#"{"upi_id":"name@bank"}"#).unwrap();
        assert_eq!(
            upi,
            PaymentDetails::Upi {
                upi_id: "name@bank".to_string()
            }
        );
    }
}
