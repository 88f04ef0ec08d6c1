use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::driver::{Availability, Driver, DriverLocation};
use crate::models::order::{Order, OrderStatus};
use crate::store::{DriverStore, OrderStore, StoreError, WriteGuard};

/// In-process order store. Each `DashMap` shard lock covers the check and the
/// replace of a guarded write, so concurrent swaps on one order serialize.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: DashMap<Uuid, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&Order) -> bool) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|order| order.created_at);
        orders
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<Order, StoreError> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Order, StoreError> {
        self.orders
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("order {id}")))
    }

    async fn compare_and_swap(&self, guard: WriteGuard, next: Order) -> Result<Order, StoreError> {
        let mut current = self
            .orders
            .get_mut(&next.id)
            .ok_or_else(|| StoreError::NotFound(format!("order {}", next.id)))?;

        if !guard.matches(current.value()) {
            return Err(StoreError::Conflict {
                order_id: next.id,
                expected: guard.status,
                actual: current.status,
            });
        }

        *current = next;
        Ok(current.clone())
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self.collect_where(|order| order.customer_id == customer_id))
    }

    async fn list_for_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self.collect_where(|order| order.is_assigned_to(driver_id)))
    }

    async fn list_open(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.collect_where(|order| {
            order.status == OrderStatus::Pending && order.assigned_driver.is_none()
        }))
    }

    async fn active_for_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self.collect_where(|order| order.is_assigned_to(driver_id) && !order.status.is_terminal()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.orders.len())
    }
}

#[derive(Default)]
pub struct MemoryDriverStore {
    drivers: DashMap<Uuid, Driver>,
}

impl MemoryDriverStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, id: Uuid, apply: impl FnOnce(&mut Driver)) -> Result<Driver, StoreError> {
        let mut driver = self
            .drivers
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("driver {id}")))?;

        apply(driver.value_mut());
        driver.updated_at = Utc::now();
        Ok(driver.clone())
    }
}

#[async_trait]
impl DriverStore for MemoryDriverStore {
    async fn insert(&self, driver: Driver) -> Result<Driver, StoreError> {
        self.drivers.insert(driver.id, driver.clone());
        Ok(driver)
    }

    async fn get(&self, id: Uuid) -> Result<Driver, StoreError> {
        self.drivers
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("driver {id}")))
    }

    async fn list(&self) -> Result<Vec<Driver>, StoreError> {
        let mut drivers: Vec<Driver> = self
            .drivers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(drivers)
    }

    async fn set_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> Result<Driver, StoreError> {
        self.update(id, |driver| driver.availability = availability)
    }

    async fn transition_availability(
        &self,
        id: Uuid,
        from: Availability,
        to: Availability,
    ) -> Result<bool, StoreError> {
        let mut driver = self
            .drivers
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("driver {id}")))?;

        if driver.availability != from {
            return Ok(false);
        }

        driver.availability = to;
        driver.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_price_per_kg(&self, id: Uuid, price_per_kg: f64) -> Result<Driver, StoreError> {
        self.update(id, |driver| driver.price_per_kg = Some(price_per_kg))
    }

    async fn set_location(&self, id: Uuid, location: DriverLocation) -> Result<Driver, StoreError> {
        self.update(id, |driver| driver.location = Some(location))
    }

    async fn count_with(&self, availability: Availability) -> usize {
        self.drivers
            .iter()
            .filter(|entry| entry.value().availability == availability)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::MemoryOrderStore;
    use crate::models::order::{DeliveryType, Order, OrderStatus, PaymentStatus};
    use crate::store::{OrderStore, StoreError, WriteGuard};

    fn order() -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_id: Uuid::from_u128(1),
            product_id: None,
            vendor_id: None,
            quantity: 1,
            weight_kg: 9.0,
            unit_price: None,
            total_price: 0.0,
            driver_surcharge: 0.0,
            delivery_address: "12 Samora Machel Ave".to_string(),
            delivery_type: DeliveryType::HomeDelivery,
            scheduled_time: None,
            payment_method: "cash".to_string(),
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            assigned_driver: None,
            notes: String::new(),
            cancellation_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            delivered_at: None,
        }
    }

    #[tokio::test]
    async fn swap_applies_when_guard_matches() {
        let store = MemoryOrderStore::new();
        let stored = store.insert(order()).await.unwrap();

        let mut next = stored.clone();
        next.status = OrderStatus::Assigned;
        next.assigned_driver = Some(Uuid::from_u128(7));

        let written = store
            .compare_and_swap(WriteGuard::observed(&stored), next)
            .await
            .unwrap();
        assert_eq!(written.status, OrderStatus::Assigned);
        assert_eq!(store.get(stored.id).await.unwrap().assigned_driver, Some(Uuid::from_u128(7)));
    }

    #[tokio::test]
    async fn stale_guard_is_rejected_and_record_untouched() {
        let store = MemoryOrderStore::new();
        let stored = store.insert(order()).await.unwrap();
        let guard = WriteGuard::observed(&stored);

        let mut first = stored.clone();
        first.status = OrderStatus::Assigned;
        first.assigned_driver = Some(Uuid::from_u128(7));
        store.compare_and_swap(guard, first).await.unwrap();

        let mut second = stored.clone();
        second.status = OrderStatus::Assigned;
        second.assigned_driver = Some(Uuid::from_u128(8));
        let err = store.compare_and_swap(guard, second).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict { actual: OrderStatus::Assigned, .. }));
        assert_eq!(store.get(stored.id).await.unwrap().assigned_driver, Some(Uuid::from_u128(7)));
    }

    #[tokio::test]
    async fn open_pool_excludes_assigned_and_terminal_orders() {
        let store = MemoryOrderStore::new();
        let open = store.insert(order()).await.unwrap();

        let mut taken = order();
        taken.status = OrderStatus::Assigned;
        taken.assigned_driver = Some(Uuid::from_u128(7));
        store.insert(taken).await.unwrap();

        let mut cancelled = order();
        cancelled.status = OrderStatus::Cancelled;
        store.insert(cancelled).await.unwrap();

        let pool = store.list_open().await.unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, open.id);

        let active = store.active_for_driver(Uuid::from_u128(7)).await.unwrap();
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let store = MemoryOrderStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
