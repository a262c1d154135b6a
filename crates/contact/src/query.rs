use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{Priority, Result, Status};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(EnumString, Display, VariantArray, Default, Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    Email,
    Subject,
    Status,
    Priority,
}

#[derive(EnumString, Display, VariantArray, Default, Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Raw query string of the listing endpoint. Everything arrives as text so
/// bad values surface as [`crate::Error::InvalidArgument`] instead of a
/// framework rejection.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

fn parse_opt<T: FromStr>(value: Option<String>, name: &str) -> Result<Option<T>> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    match T::from_str(value.trim()) {
        Ok(v) => Ok(Some(v)),
        Err(_) => crate::invalid!("Invalid {name} value: {value}"),
    }
}

impl TryFrom<ListParams> for ListQuery {
    type Error = crate::Error;

    fn try_from(params: ListParams) -> Result<Self> {
        let page = parse_opt::<u32>(params.page, "page")?.unwrap_or(1);
        let limit = parse_opt::<u32>(params.limit, "limit")?.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            crate::invalid!("page must be at least 1");
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            crate::invalid!("limit must be between 1 and {MAX_LIMIT}");
        }

        Ok(Self {
            status: parse_opt(params.status, "status")?,
            priority: parse_opt(params.priority, "priority")?,
            page,
            limit,
            sort_by: parse_opt(params.sort_by, "sortBy")?.unwrap_or_default(),
            sort_order: parse_opt(params.sort_order, "sortOrder")?.unwrap_or_default(),
        })
    }
}

impl ListQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_contacts: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = u64::from(limit.max(1));

        Self {
            current_page: page,
            total_pages: total.div_ceil(limit),
            total_contacts: total,
            has_next_page: u64::from(page) * limit < total,
            has_prev_page: page > 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub contacts: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            contacts: self.contacts.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
