use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::rest::auth::Authenticated;
use crate::api::rest::extract::{ApiJson, ApiPath};
use crate::engine::lifecycle::{AdminStatus, CreateOrder, DriverResponse};
use crate::error::AppError;
use crate::models::actor::Actor;
use crate::models::order::{Order, PaymentStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/open", get(open_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/assign", post(assign_driver))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/orders/:id/confirm", post(confirm_order))
        .route("/orders/:id/pickup", post(pickup_order))
        .route("/orders/:id/deliver", post(deliver_order))
        .route("/orders/:id/respond", post(respond_to_assignment))
        .route("/orders/:id/payment", patch(update_payment))
        .route("/orders/:id/status", patch(override_status))
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub driver_id: Uuid,
}

#[derive(Deserialize, Default)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct RespondRequest {
    pub action: DriverResponse,
}

#[derive(Deserialize)]
pub struct PaymentRequest {
    pub payment_status: PaymentStatus,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiJson(payload): ApiJson<CreateOrder>,
) -> Result<Json<Order>, AppError> {
    let order = state.coordinator.create_order(actor, payload).await?;
    Ok(Json(order))
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.coordinator.list_orders(actor).await?))
}

async fn open_orders(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.coordinator.open_orders(actor).await?))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.coordinator.get_order(actor, id).await?))
}

async fn assign_driver(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AssignRequest>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .coordinator
        .assign_driver(actor, id, payload.driver_id)
        .await?;
    Ok(Json(order))
}

async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    payload: Option<ApiJson<CancelRequest>>,
) -> Result<Json<Order>, AppError> {
    let reason = payload.map(|ApiJson(body)| body).unwrap_or_default().reason;
    let order = match actor {
        Actor::Customer(_) => state.coordinator.customer_cancel(actor, id, reason).await?,
        Actor::Driver(_) => state.coordinator.driver_cancel(actor, id, reason).await?,
        Actor::Operator(_) => {
            return Err(AppError::Forbidden(
                "operators cancel through PATCH /orders/:id/status".to_string(),
            ));
        }
    };
    Ok(Json(order))
}

async fn confirm_order(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.coordinator.driver_confirm(actor, id).await?))
}

async fn pickup_order(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.coordinator.driver_pickup(actor, id).await?))
}

async fn deliver_order(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.coordinator.driver_deliver(actor, id).await?))
}

async fn respond_to_assignment(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<RespondRequest>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .coordinator
        .driver_respond(actor, id, payload.action)
        .await?;
    Ok(Json(order))
}

async fn update_payment(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<PaymentRequest>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .coordinator
        .update_payment_status(actor, id, payload.payment_status)
        .await?;
    Ok(Json(order))
}

async fn override_status(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<StatusRequest>,
) -> Result<Json<Order>, AppError> {
    let status: AdminStatus = payload.status.parse()?;
    let order = state.coordinator.admin_set_status(actor, id, status).await?;
    Ok(Json(order))
}
