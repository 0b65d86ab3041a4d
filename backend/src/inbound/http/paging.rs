//! Page-number pagination glue between `pagination` and actix handlers.

use actix_web::{HttpRequest, web};
use pagination::{Page, PageRequest, PageSlice};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::inbound::http::validation::page_request;

/// `page` and `limit` query parameters shared by paginated endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page, 1 to 100.
    pub limit: Option<u32>,
}

impl PageQuery {
    pub(crate) fn request(&self) -> Result<PageRequest, Error> {
        page_request(self.page, self.limit)
    }
}

/// Wrap `slice` in the `{count, next, previous, results}` envelope with
/// links built from the request URL.
pub(crate) fn page_json<T>(
    req: &HttpRequest,
    slice: PageSlice<T>,
    request: PageRequest,
) -> web::Json<Page<T>> {
    web::Json(Page::from_slice(slice, request, &req.full_url()))
}
