use std::net::SocketAddrV4;
use std::path::PathBuf;
use std::time::Duration;

/// Server configs
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    /// path of the JSON file the order store loads from
    pub orders_path: PathBuf,
    /// orders above this total get flagged for review
    pub daily_order_threshold_cents: i64,
    /// how long a loaded order collection stays fresh
    pub cache_ttl: Duration,
}

impl ServerConfig {
    pub fn new(
        addr: SocketAddrV4,
        orders_path: PathBuf,
        daily_order_threshold_cents: i64,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            addr,
            orders_path,
            daily_order_threshold_cents,
            cache_ttl,
        }
    }
}
