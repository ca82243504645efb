//! List query parsing
//!
//! Turns raw query-string parameters into an equality filter, pagination
//! window, and the cache key that identifies the resulting list payload.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Chapter;

/// Key prefix shared by every cached list payload
pub const CHAPTER_CACHE_NAMESPACE: &str = "chapters";

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Raw query parameters of the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, rename = "class")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_weak_chapter: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Raw query parameters of the yearly stats endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "class")]
    pub class_name: Option<String>,
}

impl StatsQuery {
    pub fn into_filter(self) -> ChapterFilter {
        ChapterFilter {
            subject: non_empty(self.subject),
            class_name: non_empty(self.class_name),
            ..ChapterFilter::default()
        }
    }
}

/// Equality filter over chapter fields. Unset fields match everything.
///
/// Field order is part of the cache key format and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFilter {
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_weak_chapter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl ChapterFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, chapter: &Chapter) -> bool {
        fn eq(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().map_or(true, |e| e == actual)
        }

        eq(&self.class_name, &chapter.class_name)
            && eq(&self.unit, &chapter.unit)
            && eq(&self.status, chapter.status.as_str())
            && self
                .is_weak_chapter
                .map_or(true, |weak| weak == chapter.is_weak_chapter)
            && eq(&self.subject, &chapter.subject)
    }
}

/// One-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Values that are missing, non-numeric, or zero fall back to defaults
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        fn positive(raw: Option<&str>, default: u64) -> u64 {
            raw.and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(default)
        }

        Self {
            page: positive(page, DEFAULT_PAGE),
            limit: positive(limit, DEFAULT_LIMIT),
        }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn meta(&self, total: u64) -> PaginationMeta {
        PaginationMeta {
            total,
            page: self.page,
            limit: self.limit,
            pages: total.div_ceil(self.limit),
        }
    }
}

/// Pagination block of the list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

/// A parsed list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub filter: ChapterFilter,
    pub year: Option<String>,
    pub pagination: Pagination,
}

impl ListRequest {
    /// Cache key: `chapters:<filter-json>:<page>:<limit>[:year=<year>]`
    pub fn cache_key(&self) -> Result<String> {
        let filter = serde_json::to_string(&self.filter)?;
        let mut key = format!(
            "{}:{}:{}:{}",
            CHAPTER_CACHE_NAMESPACE, filter, self.pagination.page, self.pagination.limit
        );
        if let Some(year) = &self.year {
            key.push_str(":year=");
            key.push_str(year);
        }
        Ok(key)
    }
}

impl From<ListQuery> for ListRequest {
    fn from(query: ListQuery) -> Self {
        let pagination = Pagination::parse(query.page.as_deref(), query.limit.as_deref());
        let filter = ChapterFilter {
            class_name: non_empty(query.class_name),
            unit: non_empty(query.unit),
            status: non_empty(query.status),
            is_weak_chapter: non_empty(query.is_weak_chapter).map(|raw| raw == "true"),
            subject: non_empty(query.subject),
        };

        Self {
            filter,
            year: non_empty(query.year),
            pagination,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
