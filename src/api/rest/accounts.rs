use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::rest::extract::ApiJson;
use crate::error::AppError;
use crate::models::actor::Actor;
use crate::models::product::Product;
use crate::state::AppState;

/// Enrolment and catalog seeding for the in-memory adapters.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", post(enroll_customer))
        .route("/products", post(add_product))
}

#[derive(Serialize)]
pub struct EnrolledCustomer {
    pub customer_id: Uuid,
    pub token: String,
}

#[derive(Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub weight_kg: f64,
    pub vendor_id: Option<Uuid>,
}

async fn enroll_customer(State(state): State<Arc<AppState>>) -> Json<EnrolledCustomer> {
    let customer_id = Uuid::new_v4();
    let token = state.directory.enroll(Actor::Customer(customer_id));
    Json(EnrolledCustomer { customer_id, token })
}

async fn add_product(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<AddProductRequest>,
) -> Result<Json<Product>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if !payload.weight_kg.is_finite() || payload.weight_kg <= 0.0 {
        return Err(AppError::Validation("weight_kg must be > 0".to_string()));
    }

    let product = Product {
        id: Uuid::new_v4(),
        name: payload.name.trim().to_string(),
        weight_kg: payload.weight_kg,
        vendor_id: payload.vendor_id,
    };
    state.catalog.add(product.clone());
    Ok(Json(product))
}
