use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::axum_http::error_responses::error_response;
use crate::usecases::{invoices::InvoiceUseCase, payments::PaymentUseCase};
use domain::{
    repositories::{
        invoices::InvoiceRepository, payments::PaymentRepository, properties::PropertyRepository,
    },
    value_objects::payments::CreatePaymentModel,
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        invoices::InvoicePostgres, payments::PaymentPostgres, properties::PropertyPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_repository = Arc::new(PaymentPostgres::new(Arc::clone(&db_pool)));
    let property_repository = Arc::new(PropertyPostgres::new(Arc::clone(&db_pool)));
    let invoice_repository = Arc::new(InvoicePostgres::new(Arc::clone(&db_pool)));

    let payment_usecase = Arc::new(PaymentUseCase::new(
        Arc::clone(&payment_repository),
        property_repository,
    ));
    let invoice_usecase = Arc::new(InvoiceUseCase::new(
        invoice_repository,
        payment_repository,
        Arc::clone(&payment_usecase),
    ));

    let payment_routes = Router::new()
        .route("/", post(create_payment))
        .route("/check", get(check_payment))
        .route("/user/:user_id", get(user_payment_history))
        .route("/user-all/:user_id", get(all_user_payments))
        .route("/all", get(list_all_payments))
        .with_state(payment_usecase);

    let invoice_routes = Router::new()
        .route("/invoice/:payment_id", get(generate_invoice))
        .with_state(invoice_usecase);

    payment_routes.merge(invoice_routes)
}

#[derive(Debug, Deserialize)]
pub struct CheckPaymentQuery {
    pub user_id: i32,
    pub property_id: i32,
}

pub async fn create_payment<P, Pr>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, Pr>>>,
    Json(create_payment_model): Json<CreatePaymentModel>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    let status = create_payment_model.status.clone();

    match payment_usecase.create_payment(create_payment_model).await {
        Ok(payment_id) => (
            StatusCode::OK,
            Json(json!({ "payment_id": payment_id, "status": status })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn check_payment<P, Pr>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, Pr>>>,
    Query(query): Query<CheckPaymentQuery>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    match payment_usecase
        .get_payment_summary(query.user_id, query.property_id)
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn user_payment_history<P, Pr>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, Pr>>>,
    Path(user_id): Path<i32>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    match payment_usecase.get_user_payment_history(user_id).await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn all_user_payments<P, Pr>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, Pr>>>,
    Path(user_id): Path<i32>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    match payment_usecase.get_all_user_payments(user_id).await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_all_payments<P, Pr>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, Pr>>>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    match payment_usecase.get_all_payments().await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn generate_invoice<I, P, Pr>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, P, Pr>>>,
    Path(payment_id): Path<i32>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    Pr: PropertyRepository + Send + Sync + 'static,
{
    match invoice_usecase.generate_invoice(payment_id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
