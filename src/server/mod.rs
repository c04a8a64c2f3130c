//! main file for the server

pub mod model;
mod controller;
mod query;
mod state;
mod store;

use crate::server::controller::orders::get_orders;
use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;
use crate::server::store::OrderStore;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Run the server
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let store = Arc::new(OrderStore::new(
        config.orders_path,
        config.daily_order_threshold_cents,
        config.cache_ttl,
    ));
    // warm the cache so the first request does no file I/O
    info!("loaded {} orders at startup", store.orders().await.len());

    let cancel = CancellationToken::new();
    let state = AppState::new(store, cancel.clone());

    let result = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .service(get_orders)
    })
    .bind(config.addr)?
    .run()
    .await;

    // in-flight queries observe this at entry and abort
    cancel.cancel();
    result
}
