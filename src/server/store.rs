//! order store: loads orders from the JSON file and caches them in memory
//! with a time-based expiry

use crate::server::model::order::Order;
use log::{debug, error};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub(crate) struct OrderStore {
    orders_path: PathBuf,
    daily_order_threshold_cents: i64,
    cache_ttl: Duration,
    /// single cache slot; fresh reads take the read lock, a reload holds the
    /// write lock so concurrent callers on an expired slot cannot trigger
    /// duplicate loads
    slot: RwLock<Option<CacheEntry>>,
}

struct CacheEntry {
    orders: Arc<Vec<Order>>,
    loaded_at: Instant,
}

impl OrderStore {
    pub fn new(orders_path: PathBuf, daily_order_threshold_cents: i64, cache_ttl: Duration) -> Self {
        Self {
            orders_path,
            daily_order_threshold_cents,
            cache_ttl,
            slot: RwLock::new(None),
        }
    }

    /// Get the cached collection, reloading it first if missing or expired.
    /// Fresh reads share the read lock and proceed concurrently; waiters
    /// blocked on an in-flight reload re-check freshness after acquiring the
    /// write lock instead of loading again.
    pub async fn orders(&self) -> Arc<Vec<Order>> {
        {
            let slot = self.slot.read().await;
            if let Some(entry) = slot.as_ref() {
                if entry.loaded_at.elapsed() < self.cache_ttl {
                    return entry.orders.clone();
                }
            }
        }

        let mut slot = self.slot.write().await;
        // another caller may have filled the slot while we waited
        if let Some(entry) = slot.as_ref() {
            if entry.loaded_at.elapsed() < self.cache_ttl {
                return entry.orders.clone();
            }
        }

        let orders = Arc::new(self.load().await);
        *slot = Some(CacheEntry {
            orders: orders.clone(),
            loaded_at: Instant::now(),
        });
        orders
    }

    /// Read and deserialize the order file, deriving needs_review per order.
    /// Fails soft: any I/O or parse error logs and yields an empty
    /// collection, the service stays up.
    async fn load(&self) -> Vec<Order> {
        let started = Instant::now();
        let json = match tokio::fs::read_to_string(&self.orders_path).await {
            Ok(json) => json,
            Err(e) => {
                error!("failed to read orders from {}, {}", self.orders_path.display(), e);
                return vec![];
            }
        };
        let mut orders = match serde_json::from_str::<Vec<Order>>(&json) {
            Ok(orders) => orders,
            Err(e) => {
                error!("failed to parse orders from {}, {}", self.orders_path.display(), e);
                return vec![];
            }
        };

        // review rule is strict: a total equal to the threshold passes
        for order in orders.iter_mut() {
            order.needs_review = order.total_cents > self.daily_order_threshold_cents;
        }

        debug!(
            "cached {} orders in {} ms",
            orders.len(),
            started.elapsed().as_millis()
        );
        orders
    }
}
