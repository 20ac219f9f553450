mod health;
mod url;

pub use health::{ErrorResponse, HealthResponse};
pub use url::{
    BatchCreateRequest, BatchCreateResponse, BatchItem, CreateUrlRequest, CreateUrlResponse,
    ListUrlsResponse, UrlResponse,
};
