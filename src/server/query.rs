//! query engine: validation, filtering, sorting and pagination over the
//! cached order collection

use crate::server::controller::error::QueryError;
use crate::server::model::order::{GetOrdersResponse, Order, OrderStatus};
use chrono::{DateTime, Utc};
use log::debug;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

pub(crate) const MAX_PAGE_SIZE: i64 = 100;

/// validated engine input, assembled at the HTTP boundary
#[derive(Debug)]
pub(crate) struct OrderQuery {
    pub pharmacy_id: Option<String>,
    /// match-any, empty means no status filtering
    pub status: Vec<OrderStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub sort: String,
    pub dir: String,
    pub page: i64,
    pub page_size: i64,
}

/// Run one query against the cached collection. Checks cancellation once at
/// entry, validates fail-fast, then filters, sorts and pages. Cannot fail
/// past validation.
pub(crate) fn execute(
    orders: &[Order],
    query: &OrderQuery,
    correlation_id: &str,
    cancel: &CancellationToken,
) -> Result<GetOrdersResponse, QueryError> {
    let started = Instant::now();

    if cancel.is_cancelled() {
        return Err(QueryError::Cancelled);
    }

    validate(query)?;

    // filters are each a no-op when unset, applied in a fixed order
    let mut matches = orders
        .iter()
        .filter(|o| match &query.pharmacy_id {
            Some(id) => o.pharmacy_id.eq_ignore_ascii_case(id),
            None => true,
        })
        .filter(|o| query.status.is_empty() || query.status.contains(&o.status))
        .filter(|o| query.from.is_none_or(|from| o.created_at >= from))
        .filter(|o| query.to.is_none_or(|to| o.created_at <= to))
        .collect::<Vec<_>>();

    // stable sort, ties keep natural collection order
    match (query.sort.as_str(), query.dir.as_str()) {
        ("createdAt", "desc") => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ("createdAt", "asc") => matches.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ("totalCents", "desc") => matches.sort_by(|a, b| b.total_cents.cmp(&a.total_cents)),
        ("totalCents", "asc") => matches.sort_by(|a, b| a.total_cents.cmp(&b.total_cents)),
        // unreachable after validation, kept as the newest-first default
        _ => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    // overshooting the filtered set yields an empty page, not an error;
    // the skip product saturates so huge pages cannot overflow
    let skip: usize = (query.page - 1)
        .saturating_mul(query.page_size)
        .try_into()
        .unwrap_or(usize::MAX);
    let items = matches
        .into_iter()
        .skip(skip)
        .take(query.page_size as usize)
        .cloned()
        .collect::<Vec<Order>>();

    debug!(
        "execute: {} orders in {} ms, query={:?}, correlation_id={}",
        items.len(),
        started.elapsed().as_millis(),
        query,
        correlation_id,
    );

    // total intentionally reports the returned page length, not the filtered
    // match count; existing clients depend on this
    Ok(GetOrdersResponse {
        page: query.page,
        page_size: query.page_size,
        total: items.len() as i64,
        items,
    })
}

/// first violated rule wins, checked as: page, pageSize, sort, dir
fn validate(query: &OrderQuery) -> Result<(), QueryError> {
    if query.page <= 0 {
        return Err(QueryError::InvalidPage { page: query.page });
    }
    if query.page_size <= 0 || query.page_size > MAX_PAGE_SIZE {
        return Err(QueryError::InvalidPageSize {
            page_size: query.page_size,
            max: MAX_PAGE_SIZE,
        });
    }
    if query.sort != "createdAt" && query.sort != "totalCents" {
        return Err(QueryError::InvalidSort {
            sort: query.sort.clone(),
        });
    }
    if query.dir != "desc" && query.dir != "asc" {
        return Err(QueryError::InvalidDir {
            dir: query.dir.clone(),
        });
    }
    Ok(())
}
