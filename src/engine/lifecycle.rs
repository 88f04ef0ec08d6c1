//! Order lifecycle coordinator.
//!
//! ```text
//! pending -> assigned -> confirmed -> picked_up -> delivered
//!    \          \            \            \
//!     +----------+------------+------------+--> cancelled
//! ```
//!
//! A rejected assignment returns the order to `pending` with no driver. Every
//! write goes through [`OrderStore::compare_and_swap`] guarded on the state the
//! order was loaded in, so a transition computed from a stale read never lands.
//! Notifications are sent only after the write has returned.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::engine::availability::AvailabilityTracker;
use crate::engine::fanout::{Fanout, OrderEvent};
use crate::engine::pricing::{self, PricingError};
use crate::error::AppError;
use crate::models::actor::Actor;
use crate::models::driver::Driver;
use crate::models::order::{DeliveryType, Order, OrderStatus, PaymentStatus};
use crate::observability::metrics::Metrics;
use crate::store::{DriverStore, OrderStore, StoreError, WriteGuard};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub product_id: Option<Uuid>,
    pub quantity: u32,
    /// Overrides the product weight; required when there is no product.
    pub weight_kg: Option<f64>,
    pub delivery_address: String,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub payment_method: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub driver_surcharge: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DriverResponse {
    Accept,
    Reject,
}

/// Legacy status vocabulary accepted by the administrative override.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    Pending,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl FromStr for AdminStatus {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "pending" => Ok(AdminStatus::Pending),
            "out_for_delivery" => Ok(AdminStatus::OutForDelivery),
            "delivered" => Ok(AdminStatus::Delivered),
            "cancelled" => Ok(AdminStatus::Cancelled),
            other => Err(AppError::Validation(format!(
                "unknown status: {other}, expected pending/out_for_delivery/delivered/cancelled"
            ))),
        }
    }
}

impl AdminStatus {
    pub fn canonical(self) -> OrderStatus {
        match self {
            AdminStatus::Pending => OrderStatus::Pending,
            AdminStatus::OutForDelivery => OrderStatus::PickedUp,
            AdminStatus::Delivered => OrderStatus::Delivered,
            AdminStatus::Cancelled => OrderStatus::Cancelled,
        }
    }
}

pub struct OrderCoordinator {
    orders: Arc<dyn OrderStore>,
    drivers: Arc<dyn DriverStore>,
    catalog: Arc<dyn Catalog>,
    tracker: AvailabilityTracker,
    fanout: Fanout,
    metrics: Metrics,
    store_timeout: Duration,
}

impl OrderCoordinator {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        drivers: Arc<dyn DriverStore>,
        catalog: Arc<dyn Catalog>,
        tracker: AvailabilityTracker,
        fanout: Fanout,
        metrics: Metrics,
        store_timeout: Duration,
    ) -> Self {
        Self {
            orders,
            drivers,
            catalog,
            tracker,
            fanout,
            metrics,
            store_timeout,
        }
    }

    pub async fn create_order(&self, actor: Actor, request: CreateOrder) -> Result<Order, AppError> {
        self.observe("create_order", self.create_order_inner(actor, request))
            .await
    }

    pub async fn assign_driver(
        &self,
        actor: Actor,
        order_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Order, AppError> {
        self.observe("assign_driver", self.assign_driver_inner(actor, order_id, driver_id))
            .await
    }

    pub async fn customer_cancel(
        &self,
        actor: Actor,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        self.observe("customer_cancel", self.customer_cancel_inner(actor, order_id, reason))
            .await
    }

    pub async fn driver_confirm(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        self.observe("driver_confirm", self.driver_confirm_inner(actor, order_id))
            .await
    }

    pub async fn driver_pickup(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        self.observe("driver_pickup", self.driver_pickup_inner(actor, order_id))
            .await
    }

    pub async fn driver_deliver(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        self.observe("driver_deliver", self.driver_deliver_inner(actor, order_id))
            .await
    }

    pub async fn driver_cancel(
        &self,
        actor: Actor,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        self.observe("driver_cancel", self.driver_cancel_inner(actor, order_id, reason))
            .await
    }

    pub async fn driver_respond(
        &self,
        actor: Actor,
        order_id: Uuid,
        response: DriverResponse,
    ) -> Result<Order, AppError> {
        self.observe("driver_respond", self.driver_respond_inner(actor, order_id, response))
            .await
    }

    pub async fn update_payment_status(
        &self,
        actor: Actor,
        order_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<Order, AppError> {
        self.observe(
            "update_payment_status",
            self.update_payment_status_inner(actor, order_id, payment_status),
        )
        .await
    }

    /// Administrative override, operators only. The legal-transition table is
    /// bypassed; only driver-less deliveries are refused.
    pub async fn admin_set_status(
        &self,
        actor: Actor,
        order_id: Uuid,
        status: AdminStatus,
    ) -> Result<Order, AppError> {
        self.observe("admin_set_status", self.admin_set_status_inner(actor, order_id, status))
            .await
    }

    pub async fn get_order(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        let order = self.load(order_id).await?;
        let visible = match actor {
            Actor::Customer(id) => id == order.customer_id,
            Actor::Driver(id) => {
                order.is_assigned_to(id)
                    || (order.status == OrderStatus::Pending && order.assigned_driver.is_none())
            }
            Actor::Operator(_) => true,
        };
        if !visible {
            return Err(AppError::Forbidden(format!(
                "{actor} may not view order {order_id}"
            )));
        }
        Ok(order)
    }

    pub async fn list_orders(&self, actor: Actor) -> Result<Vec<Order>, AppError> {
        match actor {
            Actor::Customer(id) => self.bounded(self.orders.list_for_customer(id)).await,
            Actor::Driver(id) => self.bounded(self.orders.list_for_driver(id)).await,
            Actor::Operator(_) => Err(AppError::Forbidden(
                "operators look orders up by id".to_string(),
            )),
        }
    }

    /// Pending orders nobody has taken yet. Drivers only.
    pub async fn open_orders(&self, actor: Actor) -> Result<Vec<Order>, AppError> {
        require_driver(actor)?;
        self.bounded(self.orders.list_open()).await
    }

    pub async fn order_count(&self) -> Result<usize, AppError> {
        self.bounded(self.orders.count()).await
    }

    pub async fn driver_count(&self) -> Result<usize, AppError> {
        self.bounded(self.drivers.list())
            .await
            .map(|drivers| drivers.len())
    }

    async fn create_order_inner(&self, actor: Actor, request: CreateOrder) -> Result<Order, AppError> {
        let Actor::Customer(customer_id) = actor else {
            return Err(AppError::Forbidden("only customers can place orders".to_string()));
        };

        let delivery_address = required_text("delivery_address", &request.delivery_address)?;
        let payment_method = required_text("payment_method", &request.payment_method)?;
        if request.quantity == 0 {
            return Err(AppError::Validation("quantity must be > 0".to_string()));
        }
        if !request.driver_surcharge.is_finite() || request.driver_surcharge < 0.0 {
            return Err(AppError::Validation(
                "driver_surcharge must be a finite number >= 0".to_string(),
            ));
        }

        let (weight_kg, vendor_id) = match request.product_id {
            Some(product_id) => {
                let product = self
                    .bounded(async {
                        self.catalog
                            .get_product(product_id)
                            .await
                            .ok_or_else(|| StoreError::NotFound(format!("product {product_id}")))
                    })
                    .await?;
                (request.weight_kg.unwrap_or(product.weight_kg), product.vendor_id)
            }
            None => {
                let weight = request.weight_kg.ok_or_else(|| {
                    AppError::Validation("weight_kg is required for custom orders".to_string())
                })?;
                (weight, None)
            }
        };
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(AppError::Validation(format!(
                "weight_kg must be > 0, got {weight_kg}"
            )));
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            customer_id,
            product_id: request.product_id,
            vendor_id,
            quantity: request.quantity,
            weight_kg,
            unit_price: None,
            total_price: 0.0,
            driver_surcharge: request.driver_surcharge,
            delivery_address,
            delivery_type: request.delivery_type,
            scheduled_time: request.scheduled_time,
            payment_method,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            assigned_driver: None,
            notes: request.notes.trim().to_string(),
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            delivered_at: None,
        };

        let order = self.bounded(self.orders.insert(order)).await?;
        info!(order_id = %order.id, customer_id = %customer_id, "order created");
        self.fanout.emit(&OrderEvent::OrderCreated, &order).await;
        Ok(order)
    }

    async fn assign_driver_inner(
        &self,
        actor: Actor,
        order_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Order, AppError> {
        let order = self.load(order_id).await?;

        let entitled = match actor {
            Actor::Customer(id) => id == order.customer_id,
            Actor::Driver(id) => id == driver_id,
            Actor::Operator(_) => false,
        };
        if !entitled {
            return Err(AppError::Forbidden(format!(
                "{actor} may not assign a driver to order {order_id}"
            )));
        }
        if order.assigned_driver.is_some() {
            return Err(AppError::AlreadyAssigned(order_id));
        }
        if order.status != OrderStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "cannot assign a driver to a {} order",
                order.status
            )));
        }

        let driver = self.load_driver(driver_id).await?;
        let next = bind_driver(&order, &driver, OrderStatus::Assigned)?;
        let order = self.commit("assign_driver", &order, next).await?;

        info!(
            order_id = %order.id,
            driver_id = %driver_id,
            total_price = order.total_price,
            "driver assigned"
        );
        self.mark_busy(driver_id).await;
        self.fanout.emit(&OrderEvent::DriverAssigned, &order).await;
        Ok(order)
    }

    async fn customer_cancel_inner(
        &self,
        actor: Actor,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        let order = self.load(order_id).await?;
        if actor != Actor::Customer(order.customer_id) {
            return Err(AppError::Forbidden(format!(
                "{actor} may not cancel order {order_id}"
            )));
        }
        if order.status != OrderStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "customers can only cancel pending orders; order is {}",
                order.status
            )));
        }

        let mut next = order.clone();
        next.status = OrderStatus::Cancelled;
        next.cancellation_reason = normalize_reason(reason);
        next.updated_at = Utc::now();

        let order = self.commit("customer_cancel", &order, next).await?;
        info!(order_id = %order.id, "order cancelled by customer");
        self.fanout
            .emit(&OrderEvent::Cancelled { by: actor }, &order)
            .await;
        Ok(order)
    }

    async fn driver_confirm_inner(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        let driver_id = require_driver(actor)?;
        let order = self.load(order_id).await?;

        if order.status != OrderStatus::Pending {
            let (previous, order) = self
                .advance(actor, order_id, &[OrderStatus::Assigned], OrderStatus::Confirmed, |_| {})
                .await?;
            self.announce_status(&previous, &order).await;
            return Ok(order);
        }

        // Confirming an open order claims it.
        if order.assigned_driver.is_some() {
            return Err(AppError::AlreadyAssigned(order_id));
        }
        let driver = self.load_driver(driver_id).await?;
        let next = bind_driver(&order, &driver, OrderStatus::Confirmed)?;
        let confirmed = self.commit("driver_confirm", &order, next).await?;

        info!(order_id = %order_id, driver_id = %driver_id, "open order claimed and confirmed");
        self.mark_busy(driver_id).await;
        self.fanout
            .emit(&OrderEvent::DriverAssigned, &confirmed)
            .await;
        self.announce_status(&order, &confirmed).await;
        Ok(confirmed)
    }

    async fn driver_pickup_inner(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        let (previous, order) = self
            .advance(actor, order_id, &[OrderStatus::Confirmed], OrderStatus::PickedUp, |_| {})
            .await?;
        self.announce_status(&previous, &order).await;
        Ok(order)
    }

    async fn driver_deliver_inner(&self, actor: Actor, order_id: Uuid) -> Result<Order, AppError> {
        let (previous, order) = self
            .advance(
                actor,
                order_id,
                &[OrderStatus::PickedUp],
                OrderStatus::Delivered,
                |order| order.delivered_at = Some(Utc::now()),
            )
            .await?;
        self.release_driver(actor.id()).await;
        self.announce_status(&previous, &order).await;
        Ok(order)
    }

    async fn driver_cancel_inner(
        &self,
        actor: Actor,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        let reason = normalize_reason(reason);
        let (_, order) = self
            .advance(
                actor,
                order_id,
                &[
                    OrderStatus::Pending,
                    OrderStatus::Assigned,
                    OrderStatus::Confirmed,
                    OrderStatus::PickedUp,
                ],
                OrderStatus::Cancelled,
                |order| order.cancellation_reason = reason,
            )
            .await?;
        self.release_driver(actor.id()).await;
        self.fanout
            .emit(&OrderEvent::Cancelled { by: actor }, &order)
            .await;
        Ok(order)
    }

    async fn driver_respond_inner(
        &self,
        actor: Actor,
        order_id: Uuid,
        response: DriverResponse,
    ) -> Result<Order, AppError> {
        let (previous, order) = match response {
            DriverResponse::Accept => {
                self.advance(actor, order_id, &[OrderStatus::Assigned], OrderStatus::Confirmed, |_| {})
                    .await?
            }
            DriverResponse::Reject => {
                let rejected = self
                    .advance(
                        actor,
                        order_id,
                        &[OrderStatus::Assigned],
                        OrderStatus::Pending,
                        Order::clear_assignment,
                    )
                    .await?;
                info!(order_id = %order_id, driver_id = %actor.id(), "assignment rejected");
                self.release_driver(actor.id()).await;
                rejected
            }
        };
        self.announce_status(&previous, &order).await;
        Ok(order)
    }

    async fn update_payment_status_inner(
        &self,
        actor: Actor,
        order_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<Order, AppError> {
        let order = self.load(order_id).await?;
        let entitled = match actor {
            Actor::Customer(id) => id == order.customer_id,
            Actor::Driver(id) => order.is_assigned_to(id),
            Actor::Operator(_) => false,
        };
        if !entitled {
            return Err(AppError::Forbidden(format!(
                "{actor} may not update payment for order {order_id}"
            )));
        }

        let mut next = order.clone();
        next.payment_status = payment_status;
        next.updated_at = Utc::now();

        let order = self.commit("update_payment_status", &order, next).await?;
        info!(order_id = %order.id, payment_status = %payment_status, "payment status updated");
        self.fanout
            .emit(&OrderEvent::PaymentStatusChanged, &order)
            .await;
        Ok(order)
    }

    async fn admin_set_status_inner(
        &self,
        actor: Actor,
        order_id: Uuid,
        status: AdminStatus,
    ) -> Result<Order, AppError> {
        if !matches!(actor, Actor::Operator(_)) {
            return Err(AppError::Forbidden(format!(
                "{actor} may not override order status"
            )));
        }
        let order = self.load(order_id).await?;
        let target = status.canonical();
        if order.status == target {
            return Ok(order);
        }
        if matches!(target, OrderStatus::PickedUp | OrderStatus::Delivered)
            && order.assigned_driver.is_none()
        {
            return Err(AppError::InvalidTransition(format!(
                "order {order_id} has no driver and cannot be marked {target}"
            )));
        }

        let now = Utc::now();
        let mut next = order.clone();
        next.status = target;
        next.updated_at = now;
        match target {
            OrderStatus::Pending => {
                next.clear_assignment();
                next.delivered_at = None;
                next.cancellation_reason = None;
            }
            OrderStatus::Delivered => next.delivered_at = Some(now),
            OrderStatus::Cancelled => {
                if next.cancellation_reason.is_none() {
                    next.cancellation_reason = Some("administrative override".to_string());
                }
            }
            _ => {}
        }

        let updated = self.commit("admin_set_status", &order, next).await?;
        warn!(
            order_id = %order_id,
            actor = %actor,
            from = %order.status,
            to = %target,
            "administrative status override"
        );

        if let Some(driver_id) = order.assigned_driver {
            if target.is_terminal() || target == OrderStatus::Pending {
                self.release_driver(driver_id).await;
            }
        }

        if target == OrderStatus::Cancelled {
            self.fanout
                .emit(&OrderEvent::Cancelled { by: actor }, &updated)
                .await;
        } else {
            self.announce_status(&order, &updated).await;
        }
        Ok(updated)
    }

    /// Moves an order owned by the acting driver from one of `from` to `to`.
    /// Returns the order as loaded and as written.
    async fn advance(
        &self,
        actor: Actor,
        order_id: Uuid,
        from: &[OrderStatus],
        to: OrderStatus,
        mutate: impl FnOnce(&mut Order),
    ) -> Result<(Order, Order), AppError> {
        let driver_id = require_driver(actor)?;
        let order = self.load(order_id).await?;

        if !from.contains(&order.status) {
            return Err(AppError::InvalidTransition(format!(
                "cannot move order from {} to {to}",
                order.status
            )));
        }
        if !order.is_assigned_to(driver_id) {
            return Err(AppError::Forbidden(format!(
                "order {order_id} is not assigned to driver {driver_id}"
            )));
        }

        let mut next = order.clone();
        next.status = to;
        next.updated_at = Utc::now();
        mutate(&mut next);

        let written = self.commit(to.as_str(), &order, next).await?;
        info!(
            order_id = %order_id,
            driver_id = %driver_id,
            from = %order.status,
            to = %to,
            "order transitioned"
        );
        Ok((order, written))
    }

    async fn commit(&self, operation: &str, observed: &Order, next: Order) -> Result<Order, AppError> {
        let guard = WriteGuard::observed(observed);
        match self.bounded(self.orders.compare_and_swap(guard, next)).await {
            Err(AppError::Conflict(msg)) => {
                warn!(order_id = %observed.id, operation, "lost guarded write: {msg}");
                Err(AppError::Conflict(msg))
            }
            other => other,
        }
    }

    async fn load(&self, order_id: Uuid) -> Result<Order, AppError> {
        self.bounded(self.orders.get(order_id)).await
    }

    async fn load_driver(&self, driver_id: Uuid) -> Result<Driver, AppError> {
        self.bounded(self.drivers.get(driver_id)).await
    }

    async fn announce_status(&self, previous: &Order, current: &Order) {
        self.fanout
            .emit(
                &OrderEvent::StatusChanged {
                    from: previous.status,
                    to: current.status,
                },
                current,
            )
            .await;
    }

    // Availability bookkeeping runs after the order write has committed; a
    // failure here is logged and does not undo the transition.
    async fn mark_busy(&self, driver_id: Uuid) {
        if let Err(err) = self.bounded(self.tracker.set_busy(driver_id)).await {
            error!(driver_id = %driver_id, error = %err, "failed to mark driver busy");
        }
    }

    async fn release_driver(&self, driver_id: Uuid) {
        if let Err(err) = self.bounded(self.tracker.release(driver_id)).await {
            error!(driver_id = %driver_id, error = %err, "failed to release driver");
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::Unavailable(format!(
                "store did not respond within {}ms",
                self.store_timeout.as_millis()
            ))),
        }
    }

    async fn observe<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        let start = Instant::now();
        let result = fut.await;

        self.metrics
            .transition_latency_seconds
            .with_label_values(&[operation])
            .observe(start.elapsed().as_secs_f64());
        let outcome = match &result {
            Ok(_) => "success",
            Err(err) => err.code(),
        };
        self.metrics
            .transitions_total
            .with_label_values(&[operation, outcome])
            .inc();

        result
    }
}

/// Prices `order` at the driver's rate and binds the driver to it.
fn bind_driver(order: &Order, driver: &Driver, status: OrderStatus) -> Result<Order, AppError> {
    let unit_price = driver
        .valid_price()
        .ok_or(PricingError::DriverNotPriced(driver.id))?;
    let total = pricing::price(
        unit_price,
        order.weight_kg,
        order.quantity,
        order.driver_surcharge,
    )?;

    let mut next = order.clone();
    next.status = status;
    next.assigned_driver = Some(driver.id);
    next.unit_price = Some(unit_price);
    next.total_price = total;
    next.updated_at = Utc::now();
    Ok(next)
}

fn require_driver(actor: Actor) -> Result<Uuid, AppError> {
    match actor {
        Actor::Driver(id) => Ok(id),
        Actor::Customer(_) | Actor::Operator(_) => Err(AppError::Forbidden(
            "only drivers can perform this action".to_string(),
        )),
    }
}

fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn normalize_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|reason| reason.trim().to_string())
        .filter(|reason| !reason.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{normalize_reason, required_text, AdminStatus};
    use crate::error::AppError;
    use crate::models::order::OrderStatus;

    #[test]
    fn legacy_vocabulary_maps_onto_canonical_states() {
        assert_eq!(AdminStatus::Pending.canonical(), OrderStatus::Pending);
        assert_eq!(AdminStatus::OutForDelivery.canonical(), OrderStatus::PickedUp);
        assert_eq!(AdminStatus::Delivered.canonical(), OrderStatus::Delivered);
        assert_eq!(AdminStatus::Cancelled.canonical(), OrderStatus::Cancelled);
    }

    #[test]
    fn unknown_legacy_status_is_a_validation_error() {
        assert_eq!(
            "out_for_delivery".parse::<AdminStatus>().unwrap(),
            AdminStatus::OutForDelivery
        );
        let err = "assigned".parse::<AdminStatus>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        assert!(required_text("delivery_address", "   ").is_err());
        assert_eq!(required_text("payment_method", " cash ").unwrap(), "cash");
    }

    #[test]
    fn blank_reasons_are_dropped() {
        assert_eq!(normalize_reason(Some("  ".to_string())), None);
        assert_eq!(
            normalize_reason(Some(" out of gas ".to_string())),
            Some("out of gas".to_string())
        );
    }
}
