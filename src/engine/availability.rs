use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::driver::{Availability, Driver};
use crate::observability::metrics::Metrics;
use crate::store::{DriverStore, OrderStore, StoreError};

/// Tracks whether drivers are free for new work.
///
/// Being busy does not block assignment; the flag is informational for the
/// customer-facing driver list. A driver is released only once none of its
/// orders remain active.
#[derive(Clone)]
pub struct AvailabilityTracker {
    drivers: Arc<dyn DriverStore>,
    orders: Arc<dyn OrderStore>,
    metrics: Metrics,
}

impl AvailabilityTracker {
    pub fn new(drivers: Arc<dyn DriverStore>, orders: Arc<dyn OrderStore>, metrics: Metrics) -> Self {
        Self {
            drivers,
            orders,
            metrics,
        }
    }

    pub async fn is_available(&self, driver_id: Uuid) -> Result<bool, StoreError> {
        let driver = self.drivers.get(driver_id).await?;
        Ok(driver.availability == Availability::Available)
    }

    pub async fn set_busy(&self, driver_id: Uuid) -> Result<Driver, StoreError> {
        let driver = self
            .drivers
            .set_availability(driver_id, Availability::Busy)
            .await?;
        self.refresh_gauge().await;
        debug!(driver_id = %driver_id, "driver marked busy");
        Ok(driver)
    }

    /// Driver-initiated: going on shift.
    pub async fn set_available(&self, driver_id: Uuid) -> Result<Driver, StoreError> {
        let driver = self.set_flag(driver_id, Availability::Available).await?;
        self.refresh_gauge().await;
        Ok(driver)
    }

    /// Driver-initiated: going off shift. Current orders stay bound.
    pub async fn set_unavailable(&self, driver_id: Uuid) -> Result<Driver, StoreError> {
        let driver = self.set_flag(driver_id, Availability::Unavailable).await?;
        self.refresh_gauge().await;
        Ok(driver)
    }

    /// Called after an order leaves the driver's hands. Returns true when the
    /// driver was flipped back to available.
    pub async fn release(&self, driver_id: Uuid) -> Result<bool, StoreError> {
        let remaining = self.orders.active_for_driver(driver_id).await?;
        if !remaining.is_empty() {
            debug!(
                driver_id = %driver_id,
                active_orders = remaining.len(),
                "driver still has active orders; staying busy"
            );
            return Ok(false);
        }

        let released = self
            .drivers
            .transition_availability(driver_id, Availability::Busy, Availability::Available)
            .await?;
        if !released {
            return Ok(false);
        }

        // An assignment may have committed between the read above and the flip.
        // Its own set_busy can land before the flip, so look again and undo.
        if !self.orders.active_for_driver(driver_id).await?.is_empty() {
            self.drivers
                .transition_availability(driver_id, Availability::Available, Availability::Busy)
                .await?;
            debug!(driver_id = %driver_id, "order assigned during release; staying busy");
            return Ok(false);
        }

        self.refresh_gauge().await;
        info!(driver_id = %driver_id, "driver released");
        Ok(true)
    }

    // A busy driver going on shift keeps its busy flag until released.
    async fn set_flag(&self, driver_id: Uuid, target: Availability) -> Result<Driver, StoreError> {
        let driver = self.drivers.get(driver_id).await?;
        if driver.availability == Availability::Busy && target == Availability::Available {
            return Ok(driver);
        }
        self.drivers.set_availability(driver_id, target).await
    }

    async fn refresh_gauge(&self) {
        let busy = self.drivers.count_with(Availability::Busy).await;
        self.metrics.busy_drivers.set(busy as i64);
    }
}
