use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::actor::Actor;
use crate::models::notification::NotificationKind;
use crate::models::order::{Order, OrderStatus};
use crate::notify::Notifier;
use crate::observability::metrics::Metrics;

/// Something that happened to an order after a committed write.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    OrderCreated,
    DriverAssigned,
    StatusChanged { from: OrderStatus, to: OrderStatus },
    Cancelled { by: Actor },
    PaymentStatusChanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub text: String,
    pub order_id: Option<Uuid>,
}

/// Maps an event on `order` to the messages its parties should receive.
pub fn recipients(event: &OrderEvent, order: &Order) -> Vec<Delivery> {
    let short = order.short_id();
    let to_customer = |kind, text: String| Delivery {
        recipient_id: order.customer_id,
        kind,
        text,
        order_id: Some(order.id),
    };

    match event {
        OrderEvent::OrderCreated => vec![to_customer(
            NotificationKind::OrderStatus,
            format!(
                "Your order {short} for {} x {} kg has been placed and is waiting for a driver.",
                order.quantity, order.weight_kg
            ),
        )],
        OrderEvent::DriverAssigned => {
            let mut deliveries = vec![to_customer(
                NotificationKind::DriverAssigned,
                format!(
                    "A driver has been assigned to order {short}. Total: {:.2}.",
                    order.total_price
                ),
            )];
            if let Some(driver_id) = order.assigned_driver {
                deliveries.push(Delivery {
                    recipient_id: driver_id,
                    kind: NotificationKind::NewOrder,
                    text: format!(
                        "New order {short}: {} x {} kg to {}.",
                        order.quantity, order.weight_kg, order.delivery_address
                    ),
                    order_id: Some(order.id),
                });
            }
            deliveries
        }
        OrderEvent::StatusChanged { from, to } => {
            let text = match (from, to) {
                (OrderStatus::Assigned, OrderStatus::Pending) => format!(
                    "The driver declined order {short}. We are looking for another driver."
                ),
                (_, OrderStatus::Confirmed) => {
                    format!("Your driver has confirmed order {short}.")
                }
                (_, OrderStatus::PickedUp) => {
                    format!("Order {short} has been picked up and is on its way.")
                }
                (_, OrderStatus::Delivered) => format!("Order {short} has been delivered."),
                (_, to) => format!("Order {short} is now {to}."),
            };
            vec![to_customer(NotificationKind::OrderStatus, text)]
        }
        OrderEvent::Cancelled { by } => {
            let mut text = format!("Order {short} was cancelled by the {}.", by.kind());
            if let Some(reason) = order.cancellation_reason.as_deref() {
                text.push_str(&format!(" Reason: {reason}"));
            }

            let mut deliveries = vec![to_customer(NotificationKind::OrderCancelled, text.clone())];
            if let Some(driver_id) = order.assigned_driver {
                deliveries.push(Delivery {
                    recipient_id: driver_id,
                    kind: NotificationKind::OrderCancelled,
                    text,
                    order_id: Some(order.id),
                });
            }
            deliveries
        }
        OrderEvent::PaymentStatusChanged => vec![to_customer(
            NotificationKind::PaymentStatus,
            format!(
                "Payment for order {short} is now {}.",
                order.payment_status
            ),
        )],
    }
}

/// Sends event messages through the notifier. Delivery is best effort.
#[derive(Clone)]
pub struct Fanout {
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
    metrics: Metrics,
}

impl Fanout {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration, metrics: Metrics) -> Self {
        Self {
            notifier,
            timeout,
            metrics,
        }
    }

    /// Returns how many deliveries the notifier accepted.
    pub async fn emit(&self, event: &OrderEvent, order: &Order) -> usize {
        let deliveries = recipients(event, order);
        debug!(order_id = %order.id, ?event, count = deliveries.len(), "fanning out");
        self.dispatch(deliveries).await
    }

    async fn dispatch(&self, deliveries: Vec<Delivery>) -> usize {
        let sends = deliveries.iter().map(|delivery| async move {
            let send = self.notifier.send(
                delivery.recipient_id,
                delivery.kind,
                &delivery.text,
                delivery.order_id,
            );

            match tokio::time::timeout(self.timeout, send).await {
                Ok(Ok(())) => {
                    self.metrics
                        .notifications_total
                        .with_label_values(&["sent"])
                        .inc();
                    true
                }
                Ok(Err(err)) => {
                    self.metrics
                        .notifications_total
                        .with_label_values(&["failed"])
                        .inc();
                    warn!(
                        recipient_id = %delivery.recipient_id,
                        kind = ?delivery.kind,
                        error = %err,
                        "notification delivery failed"
                    );
                    false
                }
                Err(_) => {
                    self.metrics
                        .notifications_total
                        .with_label_values(&["timeout"])
                        .inc();
                    warn!(
                        recipient_id = %delivery.recipient_id,
                        kind = ?delivery.kind,
                        "notification delivery timed out"
                    );
                    false
                }
            }
        });

        join_all(sends)
            .await
            .into_iter()
            .filter(|delivered| *delivered)
            .count()
    }
}
