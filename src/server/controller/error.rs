use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{error, HttpResponse};
use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub(crate) enum QueryError {
    #[display("Invalid Page {page}. Page must be greater than 0.")]
    InvalidPage { page: i64 },
    #[display("Invalid PageSize {page_size}. PageSize must be between 1 and {max}.")]
    InvalidPageSize { page_size: i64, max: i64 },
    #[display("Invalid Sort '{sort}'. Sort must be either 'createdAt' or 'totalCents'.")]
    InvalidSort { sort: String },
    #[display("Invalid Dir '{dir}'. Dir must be either 'desc' or 'asc'.")]
    InvalidDir { dir: String },
    #[display("Invalid Status '{status}'. Status must be one of 'Pending', 'Processing', 'Shipped' or 'Cancelled'.")]
    InvalidStatus { status: String },
    #[display("invalid request")]
    BadRequest,
    #[display("request was cancelled")]
    Cancelled,
}

impl error::ResponseError for QueryError {
    fn status_code(&self) -> StatusCode {
        match *self {
            QueryError::InvalidPage { .. }
            | QueryError::InvalidPageSize { .. }
            | QueryError::InvalidSort { .. }
            | QueryError::InvalidDir { .. }
            | QueryError::InvalidStatus { .. }
            | QueryError::BadRequest => StatusCode::BAD_REQUEST,
            QueryError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}
