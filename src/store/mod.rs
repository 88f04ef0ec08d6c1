//! Persistence seams for orders and drivers.
//!
//! Orders are only ever rewritten through [`OrderStore::compare_and_swap`], which
//! applies a new snapshot only if the stored record still matches the
//! [`WriteGuard`] captured when it was loaded. A document store backs this with a
//! conditional update filtered on `status` and `assigned_driver`.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::driver::{Availability, Driver, DriverLocation};
use crate::models::order::{Order, OrderStatus};

pub use memory::{MemoryDriverStore, MemoryOrderStore};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("order {order_id} changed concurrently: expected {expected}, found {actual}")]
    Conflict {
        order_id: Uuid,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("{0}")]
    Unavailable(String),
}

/// State an order must still be in for a guarded write to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteGuard {
    pub status: OrderStatus,
    pub assigned_driver: Option<Uuid>,
}

impl WriteGuard {
    pub fn observed(order: &Order) -> Self {
        Self {
            status: order.status,
            assigned_driver: order.assigned_driver,
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        order.status == self.status && order.assigned_driver == self.assigned_driver
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> Result<Order, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Order, StoreError>;

    /// Replaces the stored order with `next` if it still matches `guard`.
    async fn compare_and_swap(&self, guard: WriteGuard, next: Order) -> Result<Order, StoreError>;

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, StoreError>;

    async fn list_for_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, StoreError>;

    /// Pending orders with no driver, oldest first.
    async fn list_open(&self) -> Result<Vec<Order>, StoreError>;

    /// Non-terminal orders currently bound to the driver.
    async fn active_for_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

#[async_trait]
pub trait DriverStore: Send + Sync {
    async fn insert(&self, driver: Driver) -> Result<Driver, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Driver, StoreError>;

    async fn list(&self) -> Result<Vec<Driver>, StoreError>;

    async fn set_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> Result<Driver, StoreError>;

    /// Moves a driver from `from` to `to`; leaves it untouched otherwise.
    /// Returns whether the change was applied.
    async fn transition_availability(
        &self,
        id: Uuid,
        from: Availability,
        to: Availability,
    ) -> Result<bool, StoreError>;

    async fn set_price_per_kg(&self, id: Uuid, price_per_kg: f64) -> Result<Driver, StoreError>;

    async fn set_location(&self, id: Uuid, location: DriverLocation) -> Result<Driver, StoreError>;

    async fn count_with(&self, availability: Availability) -> usize;
}
