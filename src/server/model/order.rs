use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// lifecycle state of a pharmacy order, serialized by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(format!("Invalid OrderStatus: {s}")),
        }
    }
}

/// a single pharmacy order, immutable after load
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Order {
    pub id: String,
    pub pharmacy_id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    /// derived at load time, any value in the source file is overwritten
    #[serde(default)]
    pub needs_review: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetOrdersResponse {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub items: Vec<Order>,
}
