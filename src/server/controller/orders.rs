use crate::server::controller::error::QueryError;
use crate::server::model::order::OrderStatus;
use crate::server::model::GetOrdersParams;
use crate::server::query::{self, OrderQuery};
use crate::server::state::AppState;
use actix_web::{get, web, HttpRequest, Responder};
use anyhow::Context;

const DEFAULT_SORT: &str = "createdAt";
const DEFAULT_DIR: &str = "desc";
const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 20;

const CORRELATION_ID_HEADER: &str = "x-correlation-id";

#[get("/v1/orders")]
/// list orders with filtering, sorting and pagination
async fn get_orders(req: HttpRequest, data: web::Data<AppState>) -> Result<impl Responder, QueryError> {
    let maybe_params = web::Query::<GetOrdersParams>::from_query(req.query_string())
        .context("failed to parse query string");
    if maybe_params.is_err() {
        return Err(QueryError::BadRequest);
    }
    let query = to_query(maybe_params.unwrap().into_inner())?;

    let correlation_id = correlation_id(&req);
    let orders = data.get_store().orders().await;
    let page = query::execute(&orders, &query, &correlation_id, data.get_cancel_token())?;

    Ok(web::Json(page))
}

/// apply system defaults and parse the status list; validation proper
/// happens in the engine
fn to_query(params: GetOrdersParams) -> Result<OrderQuery, QueryError> {
    let status = match params.status {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<OrderStatus>().map_err(|_| QueryError::InvalidStatus {
                    status: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![],
    };

    Ok(OrderQuery {
        pharmacy_id: params.pharmacy_id,
        status,
        from: params.from,
        to: params.to,
        sort: params.sort.unwrap_or(DEFAULT_SORT.to_string()),
        dir: params.dir.unwrap_or(DEFAULT_DIR.to_string()),
        page: params.page.unwrap_or(DEFAULT_PAGE),
        page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    })
}

fn correlation_id(req: &HttpRequest) -> String {
    req.headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:016x}", rand::random::<u64>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::store::OrderStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const SAMPLE: &str = r#"[
        {"id": "o-1", "pharmacyId": "PHX1", "status": "Pending", "totalCents": 1000, "createdAt": "2024-03-01T12:00:00Z"},
        {"id": "o-2", "pharmacyId": "PHX2", "status": "Shipped", "totalCents": 2500, "createdAt": "2024-03-02T12:00:00Z"},
        {"id": "o-3", "pharmacyId": "PHX1", "status": "Processing", "totalCents": 1800, "createdAt": "2024-03-03T12:00:00Z"}
    ]"#;

    fn write_sample(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        path
    }

    fn state(path: PathBuf) -> AppState {
        let store = Arc::new(OrderStore::new(path, 2000, Duration::from_secs(3600)));
        AppState::new(store, CancellationToken::new())
    }

    #[actix_web::test]
    async fn returns_sorted_page_with_review_flags() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(write_sample("controller_e2e.json"))))
                .service(get_orders),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v1/orders?sort=totalCents&dir=desc&page=1&pageSize=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["page"], 1);
        assert_eq!(body["pageSize"], 2);
        assert_eq!(body["total"], 2);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items[0]["totalCents"], 2500);
        assert_eq!(items[1]["totalCents"], 1800);
        // threshold 2000, strict comparison: only the 2500 order is flagged
        assert_eq!(items[0]["needsReview"], true);
        assert_eq!(items[1]["needsReview"], false);
        assert_eq!(items[0]["status"], "Shipped");
    }

    #[actix_web::test]
    async fn filters_by_pharmacy_and_status() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(write_sample("controller_filters.json"))))
                .service(get_orders),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v1/orders?pharmacyId=phx1&status=Pending,Processing")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|o| o["pharmacyId"] == "PHX1"));
    }

    #[actix_web::test]
    async fn rejects_invalid_page_with_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(write_sample("controller_badpage.json"))))
                .service(get_orders),
        )
        .await;

        let req = test::TestRequest::get().uri("/v1/orders?page=0").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rejects_unknown_status_name() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(write_sample("controller_badstatus.json"))))
                .service(get_orders),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v1/orders?status=Teleported")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn defaults_are_created_at_desc_first_page() {
        let params = GetOrdersParams {
            pharmacy_id: None,
            status: None,
            from: None,
            to: None,
            sort: None,
            dir: None,
            page: None,
            page_size: None,
        };
        let query = to_query(params).unwrap();
        assert_eq!(query.sort, "createdAt");
        assert_eq!(query.dir, "desc");
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
    }
}
