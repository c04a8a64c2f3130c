use serde::Deserialize;

pub(crate) mod config;
pub(crate) mod order;

/// raw wire parameters of GET /v1/orders, defaults applied at the boundary
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetOrdersParams {
    pub pharmacy_id: Option<String>,
    /// comma-separated status names
    pub status: Option<String>,
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
