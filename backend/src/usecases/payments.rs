use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use domain::{
    entities::payments::InsertPaymentEntity,
    repositories::{payments::PaymentRepository, properties::PropertyRepository},
    value_objects::{
        enums::{payment_kinds::PaymentKind, payment_methods::PaymentMethod},
        payment_details::PaymentDetailsError,
        payments::{CreatePaymentModel, PaymentHistoryModel, PaymentModel, PaymentSummary},
    },
};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Amount paid must be greater than zero")]
    InvalidAmount,
    #[error("Payment status is required")]
    MissingStatus,
    #[error("Only credit card and UPI payments are accepted")]
    InvalidMethod,
    #[error("{0}")]
    InvalidDetails(#[from] PaymentDetailsError),
    #[error("No payment found")]
    NotFound,
    #[error("Server error while processing payment")]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::InvalidAmount
            | PaymentError::MissingStatus
            | PaymentError::InvalidMethod
            | PaymentError::InvalidDetails(_) => StatusCode::BAD_REQUEST,
            PaymentError::NotFound => StatusCode::NOT_FOUND,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

pub(crate) fn percentage_of(total_paid: i64, full_price: i64) -> i64 {
    if full_price > 0 {
        ((total_paid as f64 / full_price as f64) * 100.0).round() as i64
    } else {
        0
    }
}

pub struct PaymentUseCase<P, Pr>
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    payment_repo: Arc<P>,
    property_repo: Arc<Pr>,
}

impl<P, Pr> PaymentUseCase<P, Pr>
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    pub fn new(payment_repo: Arc<P>, property_repo: Arc<Pr>) -> Self {
        Self {
            payment_repo,
            property_repo,
        }
    }

    /// Records a standalone property payment (deposit or installment).
    pub async fn create_payment(&self, model: CreatePaymentModel) -> PaymentResult<i32> {
        info!(
            user_id = model.user_id,
            property_id = model.property_id,
            "payments: payment creation requested"
        );

        if model.amount_paid <= 0 {
            let err = PaymentError::InvalidAmount;
            warn!(
                user_id = model.user_id,
                amount_paid = model.amount_paid,
                status = err.status_code().as_u16(),
                "payments: non-positive amount"
            );
            return Err(err);
        }

        if model.status.trim().is_empty() {
            let err = PaymentError::MissingStatus;
            warn!(
                user_id = model.user_id,
                status = err.status_code().as_u16(),
                "payments: missing status marker"
            );
            return Err(err);
        }

        let method = PaymentMethod::from_str(&model.payment_method).ok_or_else(|| {
            let err = PaymentError::InvalidMethod;
            warn!(
                user_id = model.user_id,
                payment_method = %model.payment_method,
                status = err.status_code().as_u16(),
                "payments: unsupported payment method"
            );
            err
        })?;

        model.payment_details.validate(method).map_err(|err| {
            warn!(
                user_id = model.user_id,
                payment_method = %method,
                error = %err,
                "payments: payment details rejected"
            );
            PaymentError::InvalidDetails(err)
        })?;

        let payment_details = serde_json::to_value(&model.payment_details)
            .map_err(|err| PaymentError::Internal(err.into()))?;

        let insert_payment = InsertPaymentEntity {
            user_id: model.user_id,
            property_id: model.property_id,
            kind: PaymentKind::Property.to_string(),
            total_price: model.total_price,
            amount_paid: model.amount_paid,
            payment_method: method.to_string(),
            payment_details,
            status: model.status.clone(),
            payment_date: Utc::now(),
            invoice_number: model.invoice_number.clone(),
        };

        let payment_id = self
            .payment_repo
            .create_payment(insert_payment)
            .await
            .map_err(|err| {
                error!(
                    user_id = model.user_id,
                    property_id = model.property_id,
                    db_error = ?err,
                    "payments: failed to persist payment"
                );
                PaymentError::Internal(err)
            })?;

        info!(payment_id, "payments: payment recorded");

        Ok(payment_id)
    }

    /// Deposit progress for one user+property pair. The absence of any
    /// payment row is `NotFound`, which is a different outcome than a
    /// summary with zero paid.
    pub async fn get_payment_summary(
        &self,
        user_id: i32,
        property_id: i32,
    ) -> PaymentResult<PaymentSummary> {
        let payments = self
            .payment_repo
            .find_by_user_and_property(user_id, property_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    property_id,
                    db_error = ?err,
                    "payments: failed to load payments for summary"
                );
                PaymentError::Internal(err)
            })?;

        if payments.is_empty() {
            let err = PaymentError::NotFound;
            info!(
                user_id,
                property_id,
                status = err.status_code().as_u16(),
                "payments: no payments for pair"
            );
            return Err(err);
        }

        let total_paid: i64 = payments.iter().map(|payment| payment.amount_paid).sum();

        let full_property_price = match self
            .property_repo
            .find_by_id(property_id)
            .await
            .map_err(|err| {
                error!(
                    property_id,
                    db_error = ?err,
                    "payments: failed to load property for summary"
                );
                PaymentError::Internal(err)
            })? {
            Some(property) => property.price,
            None => {
                // Rows come most-recent-first; the latest payment carries
                // the best-known full price for a delisted property.
                warn!(
                    property_id,
                    "payments: property row missing, using recorded total price"
                );
                payments[0].total_price.unwrap_or(0)
            }
        };

        let deposit_amount = full_property_price / 10;

        // Overpayment is not clamped; pending may go negative and the
        // percentage above 100.
        Ok(PaymentSummary {
            full_property_price,
            deposit_amount,
            total_paid,
            pending_amount: deposit_amount - total_paid,
            percentage_paid: percentage_of(total_paid, full_property_price),
        })
    }

    pub async fn get_user_payment_history(&self, user_id: i32) -> PaymentResult<Vec<PaymentModel>> {
        let payments = self
            .payment_repo
            .find_property_payments_for_user(user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    db_error = ?err,
                    "payments: failed to load payment history"
                );
                PaymentError::Internal(err)
            })?;

        Ok(payments.into_iter().map(PaymentModel::from).collect())
    }

    /// Both payment families merged, most recent first.
    pub async fn get_all_user_payments(
        &self,
        user_id: i32,
    ) -> PaymentResult<Vec<PaymentHistoryModel>> {
        let mut history = self
            .payment_repo
            .find_property_history_for_user(user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    db_error = ?err,
                    "payments: failed to load property payment history"
                );
                PaymentError::Internal(err)
            })?;

        let apartment_history = self
            .payment_repo
            .find_apartment_history_for_user(user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    db_error = ?err,
                    "payments: failed to load apartment payment history"
                );
                PaymentError::Internal(err)
            })?;

        history.extend(apartment_history);
        // Dates are second-granularity so ties are possible; the ordering
        // within a tie does not matter.
        history.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));

        info!(
            user_id,
            total = history.len(),
            "payments: merged payment history loaded"
        );

        Ok(history)
    }

    pub async fn get_all_payments(&self) -> PaymentResult<Vec<PaymentModel>> {
        let payments = self.payment_repo.find_all().await.map_err(|err| {
            error!(db_error = ?err, "payments: failed to load all payments");
            PaymentError::Internal(err)
        })?;

        Ok(payments.into_iter().map(PaymentModel::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::{
        entities::{payments::PaymentEntity, properties::PropertyEntity},
        repositories::{payments::MockPaymentRepository, properties::MockPropertyRepository},
        value_objects::payment_details::PaymentDetails,
    };
    use mockall::predicate::eq;
    use serde_json::json;

    fn sample_payment(id: i32, amount_paid: i64) -> PaymentEntity {
        PaymentEntity {
            id,
            user_id: 1,
            property_id: 9,
            kind: "property".to_string(),
            total_price: Some(1_000_000),
            amount_paid,
            payment_method: "upi".to_string(),
            payment_details: json!({ "upi_id": "name@bank" }),
            status: "completed".to_string(),
            payment_date: Utc::now(),
            invoice_number: None,
        }
    }

    fn sample_property(price: i64) -> PropertyEntity {
        PropertyEntity {
            id: 9,
            name: "Sunset Villa".to_string(),
            location: "Pune".to_string(),
            price,
            created_at: Utc::now(),
        }
    }

    fn history_row(id: i32, kind: &str, payment_date: chrono::DateTime<Utc>) -> PaymentHistoryModel {
        PaymentHistoryModel {
            id,
            user_id: 1,
            property_id: 9,
            kind: kind.to_string(),
            total_price: None,
            amount_paid: 1000,
            payment_method: "upi".to_string(),
            status: "completed".to_string(),
            payment_date,
            invoice_number: None,
            property_name: None,
            location: None,
            price: None,
            booking_id: None,
            unit_number: None,
        }
    }

    #[tokio::test]
    async fn summary_applies_ten_percent_deposit_policy() {
        let mut payment_repo = MockPaymentRepository::new();
        let mut property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_user_and_property()
            .with(eq(1), eq(9))
            .returning(|_, _| {
                Box::pin(async {
                    Ok(vec![sample_payment(1, 150_000), sample_payment(2, 50_000)])
                })
            });

        property_repo
            .expect_find_by_id()
            .with(eq(9))
            .returning(|_| Box::pin(async { Ok(Some(sample_property(2_000_000))) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let summary = usecase.get_payment_summary(1, 9).await.unwrap();

        assert_eq!(summary.full_property_price, 2_000_000);
        assert_eq!(summary.deposit_amount, 200_000);
        assert_eq!(summary.total_paid, 200_000);
        assert_eq!(summary.pending_amount, 0);
        assert_eq!(summary.percentage_paid, 10);
    }

    #[tokio::test]
    async fn summary_rounds_the_percentage() {
        let mut payment_repo = MockPaymentRepository::new();
        let mut property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_user_and_property()
            .returning(|_, _| Box::pin(async { Ok(vec![sample_payment(1, 1_000_000)]) }));

        property_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(Some(sample_property(3_000_000))) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let summary = usecase.get_payment_summary(1, 9).await.unwrap();

        assert_eq!(summary.percentage_paid, 33);
    }

    #[tokio::test]
    async fn summary_is_not_found_without_any_payment() {
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_user_and_property()
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let err = usecase.get_payment_summary(1, 9).await.unwrap_err();

        assert!(matches!(err, PaymentError::NotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn summary_survives_a_delisted_property() {
        let mut payment_repo = MockPaymentRepository::new();
        let mut property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_user_and_property()
            .returning(|_, _| Box::pin(async { Ok(vec![sample_payment(1, 100_000)]) }));

        property_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let summary = usecase.get_payment_summary(1, 9).await.unwrap();

        assert_eq!(summary.full_property_price, 1_000_000);
        assert_eq!(summary.deposit_amount, 100_000);
        assert_eq!(summary.pending_amount, 0);
    }

    #[tokio::test]
    async fn merged_history_is_sorted_most_recent_first() {
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        let now = Utc::now();
        let oldest = history_row(1, "property", now - Duration::hours(3));
        let newest = history_row(2, "property", now);
        let middle = history_row(3, "apartment", now - Duration::hours(1));

        let property_rows = vec![oldest.clone(), newest.clone()];
        let apartment_rows = vec![middle.clone()];

        payment_repo
            .expect_find_property_history_for_user()
            .with(eq(1))
            .returning(move |_| {
                let rows = property_rows.clone();
                Box::pin(async move { Ok(rows) })
            });
        payment_repo
            .expect_find_apartment_history_for_user()
            .with(eq(1))
            .returning(move |_| {
                let rows = apartment_rows.clone();
                Box::pin(async move { Ok(rows) })
            });

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let history = usecase.get_all_user_payments(1).await.unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, newest.id);
        assert_eq!(history[1].id, middle.id);
        assert_eq!(history[2].id, oldest.id);
    }

    #[tokio::test]
    async fn create_payment_normalizes_the_card_alias() {
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_create_payment()
            .withf(|payment| {
                payment.payment_method == "credit_card"
                    && payment.kind == "property"
                    && payment.invoice_number.as_deref() == Some("INV-9-1")
            })
            .returning(|_| Box::pin(async { Ok(21) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let payment_id = usecase
            .create_payment(CreatePaymentModel {
                user_id: 1,
                property_id: 9,
                total_price: Some(2_000_000),
                amount_paid: 200_000,
                payment_method: "card".to_string(),
                payment_details: PaymentDetails::CreditCard {
                    card_holder: "Asha Rao".to_string(),
                    card_number: "4111111111111111".to_string(),
                    expiry_date: "09/27".to_string(),
                    cvv: "123".to_string(),
                },
                status: "completed".to_string(),
                invoice_number: Some("INV-9-1".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(payment_id, 21);
    }

    #[tokio::test]
    async fn create_payment_rejects_unknown_methods_before_any_write() {
        let payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let err = usecase
            .create_payment(CreatePaymentModel {
                user_id: 1,
                property_id: 9,
                total_price: None,
                amount_paid: 1000,
                payment_method: "cash".to_string(),
                payment_details: PaymentDetails::Upi {
                    upi_id: "name@bank".to_string(),
                },
                status: "completed".to_string(),
                invoice_number: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidMethod));
    }

    #[tokio::test]
    async fn create_payment_requires_a_status_marker() {
        let payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(property_repo));
        let err = usecase
            .create_payment(CreatePaymentModel {
                user_id: 1,
                property_id: 9,
                total_price: None,
                amount_paid: 1000,
                payment_method: "upi".to_string(),
                payment_details: PaymentDetails::Upi {
                    upi_id: "name@bank".to_string(),
                },
                status: "  ".to_string(),
                invoice_number: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::MissingStatus));
    }
}
