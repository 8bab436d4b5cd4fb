use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use crate::axum_http::error_responses::error_response;
use crate::usecases::{apartments::ApartmentUseCase, bookings::BookingUseCase};
use domain::{
    repositories::{
        apartment_bookings::ApartmentBookingRepository, apartments::ApartmentRepository,
    },
    value_objects::bookings::BookApartmentModel,
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{apartment_bookings::ApartmentBookingPostgres, apartments::ApartmentPostgres},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let apartment_repository = Arc::new(ApartmentPostgres::new(Arc::clone(&db_pool)));
    let booking_repository = Arc::new(ApartmentBookingPostgres::new(Arc::clone(&db_pool)));

    let apartment_usecase = Arc::new(ApartmentUseCase::new(
        apartment_repository,
        Arc::clone(&booking_repository),
    ));
    let booking_usecase = Arc::new(BookingUseCase::new(booking_repository));

    let apartment_routes = Router::new()
        .route("/", get(list_apartments))
        .route("/units", get(list_units))
        .route("/bookings/:user_id", get(user_bookings))
        .route("/:id", get(get_apartment))
        .with_state(apartment_usecase);

    let booking_routes = Router::new()
        .route("/book", post(book_apartment))
        .with_state(booking_usecase);

    apartment_routes.merge(booking_routes)
}

#[derive(Debug, Deserialize)]
pub struct ListUnitsQuery {
    pub apartment_id: i32,
}

pub async fn list_apartments<A, B>(
    State(apartment_usecase): State<Arc<ApartmentUseCase<A, B>>>,
) -> impl IntoResponse
where
    A: ApartmentRepository + Send + Sync + 'static,
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    match apartment_usecase.list_apartments().await {
        Ok(apartments) => (StatusCode::OK, Json(apartments)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn get_apartment<A, B>(
    State(apartment_usecase): State<Arc<ApartmentUseCase<A, B>>>,
    Path(id): Path<i32>,
) -> impl IntoResponse
where
    A: ApartmentRepository + Send + Sync + 'static,
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    match apartment_usecase.get_apartment(id).await {
        Ok(apartment) => (StatusCode::OK, Json(apartment)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_units<A, B>(
    State(apartment_usecase): State<Arc<ApartmentUseCase<A, B>>>,
    Query(query): Query<ListUnitsQuery>,
) -> impl IntoResponse
where
    A: ApartmentRepository + Send + Sync + 'static,
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    match apartment_usecase.list_units(query.apartment_id).await {
        Ok(units) => (StatusCode::OK, Json(units)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn user_bookings<A, B>(
    State(apartment_usecase): State<Arc<ApartmentUseCase<A, B>>>,
    Path(user_id): Path<i32>,
) -> impl IntoResponse
where
    A: ApartmentRepository + Send + Sync + 'static,
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    match apartment_usecase.list_user_bookings(user_id).await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn book_apartment<B>(
    State(booking_usecase): State<Arc<BookingUseCase<B>>>,
    Json(book_apartment_model): Json<BookApartmentModel>,
) -> impl IntoResponse
where
    B: ApartmentBookingRepository + Send + Sync + 'static,
{
    match booking_usecase.book_apartment(book_apartment_model).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
