use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::catalog::MemoryCatalog;
use crate::config::Config;
use crate::directory::TokenDirectory;
use crate::engine::availability::AvailabilityTracker;
use crate::engine::fanout::Fanout;
use crate::engine::lifecycle::OrderCoordinator;
use crate::models::actor::Actor;
use crate::notify::InboxNotifier;
use crate::observability::metrics::Metrics;
use crate::store::{DriverStore, MemoryDriverStore, MemoryOrderStore, OrderStore};

pub struct AppState {
    pub coordinator: OrderCoordinator,
    pub drivers: Arc<dyn DriverStore>,
    pub tracker: AvailabilityTracker,
    pub catalog: Arc<MemoryCatalog>,
    pub directory: Arc<TokenDirectory>,
    pub inbox: Arc<InboxNotifier>,
    pub metrics: Metrics,
}

impl AppState {
    /// Wires the coordinator against the in-memory adapters.
    pub fn new(config: &Config) -> Self {
        let metrics = Metrics::new();
        let orders: Arc<dyn OrderStore> = Arc::new(MemoryOrderStore::new());
        let drivers: Arc<dyn DriverStore> = Arc::new(MemoryDriverStore::new());
        let catalog = Arc::new(MemoryCatalog::new());
        let inbox = Arc::new(InboxNotifier::new(config.event_buffer_size));

        let tracker = AvailabilityTracker::new(drivers.clone(), orders.clone(), metrics.clone());
        let fanout = Fanout::new(inbox.clone(), config.notify_timeout, metrics.clone());
        let coordinator = OrderCoordinator::new(
            orders,
            drivers.clone(),
            catalog.clone(),
            tracker.clone(),
            fanout,
            metrics.clone(),
            config.store_timeout,
        );

        let directory = Arc::new(TokenDirectory::new());
        if let Some(token) = &config.operator_token {
            let operator_id = Uuid::new_v4();
            directory.enroll_with(token, Actor::Operator(operator_id));
            info!(operator_id = %operator_id, "operator credential enrolled");
        }

        Self {
            coordinator,
            drivers,
            tracker,
            catalog,
            directory,
            inbox,
            metrics,
        }
    }
}
