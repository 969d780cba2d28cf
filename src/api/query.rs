//! Query parameter structs and the paginated response envelope

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Helper to deserialize a positive number from the query string.
///
/// Missing, empty, non-numeric and zero values all become `None` so the
/// caller falls back to its default instead of rejecting the request.
fn deserialize_positive<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1))
}

/// Page/limit parameters for paginated gateway endpoints
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct PageParams {
    #[serde(default, deserialize_with = "deserialize_positive")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_positive")]
    pub limit: Option<usize>,
}

impl PageParams {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: Some(page).filter(|p| *p >= 1),
            limit: Some(limit).filter(|l| *l >= 1),
        }
    }

    /// 1-based page number (default 1)
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    /// Items per page (default 10, capped at 100)
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT)
    }
}

/// `?limit=` for the document service list endpoints
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct ListParams {
    #[serde(default, deserialize_with = "deserialize_positive")]
    pub limit: Option<usize>,
}

impl ListParams {
    /// Validated limit (default 100, capped at 1000)
    pub fn validated_limit(&self) -> i64 {
        self.limit
            .map_or(DEFAULT_LIST_LIMIT, |l| l.min(MAX_LIST_LIMIT as usize) as i64)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
    pub has_searched: bool,
    /// Endpoint-specific fields serialized next to `data`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Page<T> {
    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Replace the page items, keeping the pagination metadata
    pub fn map_data<U>(self, data: Vec<U>) -> Page<U> {
        Page {
            data,
            pagination: self.pagination,
            has_searched: self.has_searched,
            extra: self.extra,
        }
    }
}

/// Slice one page out of `items`
pub fn paginate<T>(mut items: Vec<T>, params: &PageParams) -> Page<T> {
    let page = params.page();
    let limit = params.limit();
    let total = items.len();

    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    let data: Vec<T> = items.drain(start..end).collect();

    Page {
        data,
        pagination: PageInfo {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
            has_next_page: page.saturating_mul(limit) < total,
            has_prev_page: page > 1,
        },
        has_searched: true,
        extra: Map::new(),
    }
}
