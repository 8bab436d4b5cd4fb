use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use domain::{
    repositories::{
        apartment_bookings::ApartmentBookingRepository, apartments::ApartmentRepository,
    },
    value_objects::{
        apartments::{ApartmentModel, ApartmentUnitModel},
        bookings::BookedApartmentModel,
    },
};

#[derive(Debug, Error)]
pub enum ApartmentError {
    #[error("Apartment not found")]
    NotFound,
    #[error("Server error while fetching apartments")]
    Internal(#[from] anyhow::Error),
}

impl ApartmentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ApartmentError::NotFound => StatusCode::NOT_FOUND,
            ApartmentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ApartmentResult<T> = std::result::Result<T, ApartmentError>;

pub struct ApartmentUseCase<A, B>
where
    A: ApartmentRepository + Send + Sync + 'static,
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    apartment_repo: Arc<A>,
    booking_repo: Arc<B>,
}

impl<A, B> ApartmentUseCase<A, B>
where
    A: ApartmentRepository + Send + Sync + 'static,
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    pub fn new(apartment_repo: Arc<A>, booking_repo: Arc<B>) -> Self {
        Self {
            apartment_repo,
            booking_repo,
        }
    }

    pub async fn list_apartments(&self) -> ApartmentResult<Vec<ApartmentModel>> {
        let apartments = self.apartment_repo.list_apartments().await.map_err(|err| {
            error!(db_error = ?err, "apartments: failed to list apartments");
            ApartmentError::Internal(err)
        })?;

        Ok(apartments.into_iter().map(ApartmentModel::from).collect())
    }

    pub async fn get_apartment(&self, apartment_id: i32) -> ApartmentResult<ApartmentModel> {
        let apartment = self
            .apartment_repo
            .find_by_id(apartment_id)
            .await
            .map_err(|err| {
                error!(apartment_id, db_error = ?err, "apartments: failed to load apartment");
                ApartmentError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = ApartmentError::NotFound;
                warn!(
                    apartment_id,
                    status = err.status_code().as_u16(),
                    "apartments: unknown apartment id"
                );
                err
            })?;

        Ok(ApartmentModel::from(apartment))
    }

    pub async fn list_units(&self, apartment_id: i32) -> ApartmentResult<Vec<ApartmentUnitModel>> {
        let units = self
            .apartment_repo
            .list_units(apartment_id)
            .await
            .map_err(|err| {
                error!(apartment_id, db_error = ?err, "apartments: failed to list units");
                ApartmentError::Internal(err)
            })?;

        info!(apartment_id, unit_count = units.len(), "apartments: units loaded");

        Ok(units.into_iter().map(ApartmentUnitModel::from).collect())
    }

    /// Empty list is a successful outcome, not an error.
    pub async fn list_user_bookings(
        &self,
        user_id: i32,
    ) -> ApartmentResult<Vec<BookedApartmentModel>> {
        let bookings = self
            .booking_repo
            .list_user_bookings(user_id)
            .await
            .map_err(|err| {
                error!(user_id, db_error = ?err, "apartments: failed to list bookings");
                ApartmentError::Internal(err)
            })?;

        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::apartments::ApartmentEntity,
        repositories::{
            apartment_bookings::MockApartmentBookingRepository, apartments::MockApartmentRepository,
        },
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn unknown_apartment_is_not_found() {
        let mut apartment_repo = MockApartmentRepository::new();
        let booking_repo = MockApartmentBookingRepository::new();

        apartment_repo
            .expect_find_by_id()
            .with(eq(404))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = ApartmentUseCase::new(Arc::new(apartment_repo), Arc::new(booking_repo));
        let err = usecase.get_apartment(404).await.unwrap_err();

        assert!(matches!(err, ApartmentError::NotFound));
    }

    #[tokio::test]
    async fn lists_apartments_as_models() {
        let mut apartment_repo = MockApartmentRepository::new();
        let booking_repo = MockApartmentBookingRepository::new();

        apartment_repo.expect_list_apartments().returning(|| {
            Box::pin(async {
                Ok(vec![ApartmentEntity {
                    id: 9,
                    name: "Lakeside Towers".to_string(),
                    location: "Pune".to_string(),
                    description: Some("Two towers by the lake".to_string()),
                    created_at: Utc::now(),
                }])
            })
        });

        let usecase = ApartmentUseCase::new(Arc::new(apartment_repo), Arc::new(booking_repo));
        let apartments = usecase.list_apartments().await.unwrap();

        assert_eq!(apartments.len(), 1);
        assert_eq!(apartments[0].name, "Lakeside Towers");
    }

    #[tokio::test]
    async fn empty_booking_list_is_success() {
        let apartment_repo = MockApartmentRepository::new();
        let mut booking_repo = MockApartmentBookingRepository::new();

        booking_repo
            .expect_list_user_bookings()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = ApartmentUseCase::new(Arc::new(apartment_repo), Arc::new(booking_repo));
        let bookings = usecase.list_user_bookings(1).await.unwrap();

        assert!(bookings.is_empty());
    }
}
