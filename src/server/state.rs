use crate::server::store::OrderStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub(crate) struct AppState {
    store: Arc<OrderStore>,
    /// cancelled on shutdown, checked at query entry
    cancel: CancellationToken,
}

impl AppState {
    pub fn new(store: Arc<OrderStore>, cancel: CancellationToken) -> Self {
        Self { store, cancel }
    }

    pub fn get_store(&self) -> Arc<OrderStore> {
        self.store.clone()
    }

    pub fn get_cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}
