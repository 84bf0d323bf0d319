use std::sync::Arc;

use product::domain::response::product::ProductResponse;
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use tokio::sync::{Mutex, broadcast};

use crate::di::DependenciesInject;

/// Capacity of the product-change fan-out. Lagging sockets miss intermediate
/// snapshots, never the latest one.
const PRODUCT_EVENTS_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub product_events: broadcast::Sender<Vec<ProductResponse>>,
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(pool, &mut registry);
        let (product_events, _) = broadcast::channel(PRODUCT_EVENTS_CAPACITY);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            product_events,
        }
    }
}
