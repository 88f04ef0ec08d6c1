use std::sync::Arc;

use axum::extract::State;
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::auth::Authenticated;
use crate::api::rest::extract::{ApiJson, ApiPath};
use crate::error::AppError;
use crate::models::actor::Actor;
use crate::models::driver::{Availability, Driver, DriverLocation, GeoPoint};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", post(register_driver).get(list_drivers))
        .route("/drivers/:id/price", patch(set_price))
        .route("/drivers/:id/location", patch(update_location))
        .route("/drivers/:id/availability", patch(update_availability))
}

#[derive(Deserialize)]
pub struct RegisterDriverRequest {
    pub name: String,
    pub company_id: Option<Uuid>,
    pub price_per_kg: Option<f64>,
}

#[derive(Serialize)]
pub struct RegisteredDriver {
    pub driver: Driver,
    pub token: String,
}

#[derive(Deserialize)]
pub struct PriceRequest {
    pub price_per_kg: f64,
}

#[derive(Deserialize)]
pub struct LocationRequest {
    pub location: GeoPoint,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub availability: Availability,
}

async fn register_driver(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterDriverRequest>,
) -> Result<Json<RegisteredDriver>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let mut driver = Driver::new(payload.name.trim().to_string(), payload.company_id);
    if let Some(price) = payload.price_per_kg {
        driver.price_per_kg = Some(valid_price(price)?);
    }

    let driver = state.drivers.insert(driver).await?;
    let token = state.directory.enroll(Actor::Driver(driver.id));
    info!(driver_id = %driver.id, "driver registered");

    Ok(Json(RegisteredDriver { driver, token }))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Driver>>, AppError> {
    Ok(Json(state.drivers.list().await?))
}

async fn set_price(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<PriceRequest>,
) -> Result<Json<Driver>, AppError> {
    require_self(actor, id)?;
    let price = valid_price(payload.price_per_kg)?;
    let driver = state.drivers.set_price_per_kg(id, price).await?;
    info!(driver_id = %id, price_per_kg = price, "driver price updated");
    Ok(Json(driver))
}

async fn update_location(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<LocationRequest>,
) -> Result<Json<Driver>, AppError> {
    require_self(actor, id)?;
    let GeoPoint { lat, lng } = payload.location;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::Validation(format!(
            "location out of range: ({lat}, {lng})"
        )));
    }

    let location = DriverLocation {
        lat,
        lng,
        recorded_at: Utc::now(),
    };
    Ok(Json(state.drivers.set_location(id, location).await?))
}

async fn update_availability(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AvailabilityRequest>,
) -> Result<Json<Driver>, AppError> {
    require_self(actor, id)?;
    let driver = match payload.availability {
        Availability::Available => state.tracker.set_available(id).await?,
        Availability::Unavailable => state.tracker.set_unavailable(id).await?,
        Availability::Busy => {
            return Err(AppError::Validation(
                "busy is set by order assignment, not by the driver".to_string(),
            ));
        }
    };
    Ok(Json(driver))
}

fn require_self(actor: Actor, driver_id: Uuid) -> Result<(), AppError> {
    if actor != Actor::Driver(driver_id) {
        return Err(AppError::Forbidden(format!(
            "{actor} may not update driver {driver_id}"
        )));
    }
    Ok(())
}

fn valid_price(price: f64) -> Result<f64, AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::Validation(format!(
            "price_per_kg must be > 0, got {price}"
        )));
    }
    Ok(price)
}
