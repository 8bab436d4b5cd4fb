use std::sync::Arc;

use anyhow::anyhow;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::usecases::payments::{PaymentUseCase, percentage_of};
use domain::{
    repositories::{
        invoices::InvoiceRepository, payments::PaymentRepository, properties::PropertyRepository,
    },
    value_objects::{
        enums::payment_kinds::PaymentKind,
        invoices::{InvoiceModel, UnitDetails},
        payments::PaymentSummary,
    },
};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Payment not found")]
    NotFound,
    #[error("Server error while generating invoice")]
    Internal(#[from] anyhow::Error),
}

impl InvoiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceError::NotFound => StatusCode::NOT_FOUND,
            InvoiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type InvoiceResult<T> = std::result::Result<T, InvoiceError>;

pub struct InvoiceUseCase<I, P, Pr>
where
    I: InvoiceRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    invoice_repo: Arc<I>,
    payment_repo: Arc<P>,
    summary: Arc<PaymentUseCase<P, Pr>>,
}

impl<I, P, Pr> InvoiceUseCase<I, P, Pr>
where
    I: InvoiceRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    pub fn new(invoice_repo: Arc<I>, payment_repo: Arc<P>, summary: Arc<PaymentUseCase<P, Pr>>) -> Self {
        Self {
            invoice_repo,
            payment_repo,
            summary,
        }
    }

    pub async fn generate_invoice(&self, payment_id: i32) -> InvoiceResult<InvoiceModel> {
        info!(payment_id, "invoices: generating invoice");

        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await
            .map_err(|err| {
                error!(payment_id, db_error = ?err, "invoices: failed to load payment");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = InvoiceError::NotFound;
                warn!(
                    payment_id,
                    status = err.status_code().as_u16(),
                    "invoices: unknown payment id"
                );
                err
            })?;

        let kind = PaymentKind::from_str(&payment.kind)
            .ok_or_else(|| InvoiceError::Internal(anyhow!("unknown payment kind: {}", payment.kind)))?;

        match kind {
            PaymentKind::Property => self.property_invoice(payment_id).await,
            PaymentKind::Apartment => self.apartment_invoice(payment_id).await,
        }
    }

    async fn property_invoice(&self, payment_id: i32) -> InvoiceResult<InvoiceModel> {
        let (payment, property, buyer) = self
            .invoice_repo
            .find_property_invoice_row(payment_id)
            .await
            .map_err(|err| {
                error!(payment_id, db_error = ?err, "invoices: property join failed");
                InvoiceError::Internal(err)
            })?
            .ok_or(InvoiceError::NotFound)?;

        let summary = match self
            .summary
            .get_payment_summary(payment.user_id, payment.property_id)
            .await
        {
            Ok(summary) => summary,
            Err(err) => {
                // An invoice is worth more than summary precision:
                // approximate the figures from the payment row itself
                // rather than failing the whole request.
                warn!(
                    payment_id,
                    error = %err,
                    "invoices: summary unavailable, deriving figures from the payment row"
                );
                let price = property.as_ref().map(|p| p.price).unwrap_or(0);
                PaymentSummary {
                    full_property_price: price,
                    deposit_amount: payment.total_price.unwrap_or(0),
                    total_paid: payment.amount_paid,
                    pending_amount: price - payment.amount_paid,
                    percentage_paid: percentage_of(payment.amount_paid, price),
                }
            }
        };

        Ok(InvoiceModel {
            payment_id: payment.id,
            payment_kind: payment.kind.clone(),
            user_id: payment.user_id,
            property_id: payment.property_id,
            booking_id: None,
            property_name: property.as_ref().map(|p| p.name.clone()),
            location: property.as_ref().map(|p| p.location.clone()),
            user_name: buyer
                .as_ref()
                .map(|u| format!("{} {}", u.first_name, u.last_name)),
            email: buyer.as_ref().map(|u| u.email.clone()),
            amount_paid: payment.amount_paid,
            payment_method: payment.payment_method.clone(),
            status: payment.status.clone(),
            payment_date: payment.payment_date,
            invoice_number: payment.invoice_number.clone(),
            full_property_price: summary.full_property_price,
            deposit_amount: summary.deposit_amount,
            total_paid: summary.total_paid,
            pending_amount: summary.pending_amount,
            percentage_paid: summary.percentage_paid,
            unit_details: None,
        })
    }

    async fn apartment_invoice(&self, payment_id: i32) -> InvoiceResult<InvoiceModel> {
        let (payment, booking, apartment, booked_unit, buyer) = self
            .invoice_repo
            .find_apartment_invoice_row(payment_id)
            .await
            .map_err(|err| {
                error!(payment_id, db_error = ?err, "invoices: apartment join failed");
                InvoiceError::Internal(err)
            })?
            .ok_or(InvoiceError::NotFound)?;

        // Bookings are paid in full at booking time.
        let full_property_price = payment.total_price.unwrap_or(payment.amount_paid);

        Ok(InvoiceModel {
            payment_id: payment.id,
            payment_kind: payment.kind.clone(),
            user_id: payment.user_id,
            property_id: payment.property_id,
            booking_id: Some(booking.id),
            property_name: apartment.as_ref().map(|a| a.name.clone()),
            location: apartment.as_ref().map(|a| a.location.clone()),
            user_name: buyer
                .as_ref()
                .map(|u| format!("{} {}", u.first_name, u.last_name)),
            email: buyer.as_ref().map(|u| u.email.clone()),
            amount_paid: payment.amount_paid,
            payment_method: payment.payment_method.clone(),
            status: payment.status.clone(),
            payment_date: payment.payment_date,
            invoice_number: payment.invoice_number.clone(),
            full_property_price,
            deposit_amount: payment.amount_paid,
            total_paid: payment.amount_paid,
            pending_amount: 0,
            percentage_paid: 100,
            unit_details: booked_unit.map(|unit| UnitDetails {
                unit_number: unit.unit_number,
                floor_number: unit.floor_number,
                bedrooms: unit.bedrooms,
                bathrooms: unit.bathrooms,
                area: unit.area,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::{
            apartment_bookings::ApartmentBookingEntity, apartment_units::ApartmentUnitEntity,
            apartments::ApartmentEntity, payments::PaymentEntity, properties::PropertyEntity,
            users::UserEntity,
        },
        repositories::{
            invoices::MockInvoiceRepository, payments::MockPaymentRepository,
            properties::MockPropertyRepository,
        },
    };
    use mockall::predicate::eq;
    use serde_json::json;

    fn sample_payment(id: i32, kind: &str, amount_paid: i64) -> PaymentEntity {
        PaymentEntity {
            id,
            user_id: 1,
            property_id: 9,
            kind: kind.to_string(),
            total_price: Some(200_000),
            amount_paid,
            payment_method: "upi".to_string(),
            payment_details: json!({ "upi_id": "name@bank" }),
            status: "completed".to_string(),
            payment_date: Utc::now(),
            invoice_number: Some("APT-9-1700000000".to_string()),
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

    fn sample_user() -> UserEntity {
        UserEntity {
            id: 1,
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    fn sample_booking(unit_id: i32) -> ApartmentBookingEntity {
        ApartmentBookingEntity {
            id: 5,
            user_id: 1,
            apartment_id: 9,
            unit_id,
            payment_id: 31,
            booking_date: Utc::now(),
            amount: 800_000,
            status: "confirmed".to_string(),
            notes: None,
        }
    }

    fn sample_apartment() -> ApartmentEntity {
        ApartmentEntity {
            id: 9,
            name: "Lakeside Towers".to_string(),
            location: "Pune".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn sample_unit(id: i32) -> ApartmentUnitEntity {
        ApartmentUnitEntity {
            id,
            apartment_id: 9,
            unit_number: "B-401".to_string(),
            floor_number: 4,
            price: 800_000,
            bedrooms: 2,
            bathrooms: 2,
            area: 1100,
            status: "booked".to_string(),
        }
    }

    fn usecase(
        invoice_repo: MockInvoiceRepository,
        payment_repo: MockPaymentRepository,
        property_repo: MockPropertyRepository,
    ) -> InvoiceUseCase<MockInvoiceRepository, MockPaymentRepository, MockPropertyRepository> {
        let payment_repo = Arc::new(payment_repo);
        let summary = Arc::new(PaymentUseCase::new(
            Arc::clone(&payment_repo),
            Arc::new(property_repo),
        ));
        InvoiceUseCase::new(Arc::new(invoice_repo), payment_repo, summary)
    }

    #[tokio::test]
    async fn apartment_invoice_is_always_fully_paid() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_id()
            .with(eq(31))
            .returning(|_| {
                Box::pin(async { Ok(Some(sample_payment(31, "apartment", 800_000))) })
            });

        invoice_repo
            .expect_find_apartment_invoice_row()
            .with(eq(31))
            .returning(|_| {
                Box::pin(async {
                    Ok(Some((
                        sample_payment(31, "apartment", 800_000),
                        sample_booking(42),
                        Some(sample_apartment()),
                        Some(sample_unit(42)),
                        Some(sample_user()),
                    )))
                })
            });

        let invoice = usecase(invoice_repo, payment_repo, property_repo)
            .generate_invoice(31)
            .await
            .unwrap();

        assert_eq!(invoice.payment_kind, "apartment");
        assert_eq!(invoice.percentage_paid, 100);
        assert_eq!(invoice.pending_amount, 0);
        assert_eq!(invoice.total_paid, 800_000);
        assert_eq!(invoice.booking_id, Some(5));
        assert_eq!(
            invoice.unit_details.as_ref().map(|u| u.unit_number.as_str()),
            Some("B-401")
        );
        assert_eq!(invoice.user_name.as_deref(), Some("Asha Rao"));
    }

    #[tokio::test]
    async fn demo_booking_invoice_has_no_unit_details() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(Some(sample_payment(31, "apartment", 500))) }));

        invoice_repo
            .expect_find_apartment_invoice_row()
            .returning(|_| {
                Box::pin(async {
                    Ok(Some((
                        sample_payment(31, "apartment", 500),
                        sample_booking(7),
                        Some(sample_apartment()),
                        None,
                        Some(sample_user()),
                    )))
                })
            });

        let invoice = usecase(invoice_repo, payment_repo, property_repo)
            .generate_invoice(31)
            .await
            .unwrap();

        assert_eq!(invoice.unit_details, None);
        assert_eq!(invoice.percentage_paid, 100);
    }

    #[tokio::test]
    async fn property_invoice_figures_match_the_aggregator() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut payment_repo = MockPaymentRepository::new();
        let mut property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(Some(sample_payment(17, "property", 150_000))) }));

        invoice_repo
            .expect_find_property_invoice_row()
            .with(eq(17))
            .returning(|_| {
                Box::pin(async {
                    Ok(Some((
                        sample_payment(17, "property", 150_000),
                        Some(sample_property(2_000_000)),
                        Some(sample_user()),
                    )))
                })
            });

        payment_repo
            .expect_find_by_user_and_property()
            .with(eq(1), eq(9))
            .returning(|_, _| {
                Box::pin(async {
                    Ok(vec![
                        sample_payment(17, "property", 150_000),
                        sample_payment(12, "property", 50_000),
                    ])
                })
            });

        property_repo
            .expect_find_by_id()
            .with(eq(9))
            .returning(|_| Box::pin(async { Ok(Some(sample_property(2_000_000))) }));

        let usecase = usecase(invoice_repo, payment_repo, property_repo);
        let invoice = usecase.generate_invoice(17).await.unwrap();
        let summary = usecase.summary.get_payment_summary(1, 9).await.unwrap();

        assert_eq!(invoice.percentage_paid, summary.percentage_paid);
        assert_eq!(invoice.total_paid, summary.total_paid);
        assert_eq!(invoice.pending_amount, summary.pending_amount);
        assert_eq!(invoice.deposit_amount, 200_000);
        assert_eq!(invoice.percentage_paid, 10);
    }

    #[tokio::test]
    async fn property_invoice_degrades_when_the_summary_path_errors() {
        let mut invoice_repo = MockInvoiceRepository::new();
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(Some(sample_payment(17, "property", 150_000))) }));

        invoice_repo
            .expect_find_property_invoice_row()
            .returning(|_| {
                Box::pin(async {
                    Ok(Some((
                        sample_payment(17, "property", 150_000),
                        Some(sample_property(2_000_000)),
                        Some(sample_user()),
                    )))
                })
            });

        payment_repo
            .expect_find_by_user_and_property()
            .returning(|_, _| Box::pin(async { Err(anyhow!("connection reset")) }));

        let invoice = usecase(invoice_repo, payment_repo, property_repo)
            .generate_invoice(17)
            .await
            .unwrap();

        assert_eq!(invoice.full_property_price, 2_000_000);
        assert_eq!(invoice.deposit_amount, 200_000);
        assert_eq!(invoice.total_paid, 150_000);
        assert_eq!(invoice.pending_amount, 1_850_000);
        assert_eq!(invoice.percentage_paid, 8);
    }

    #[tokio::test]
    async fn unknown_payment_id_is_not_found() {
        let invoice_repo = MockInvoiceRepository::new();
        let mut payment_repo = MockPaymentRepository::new();
        let property_repo = MockPropertyRepository::new();

        payment_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = usecase(invoice_repo, payment_repo, property_repo)
            .generate_invoice(404)
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::NotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }
}
