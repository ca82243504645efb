//! Chapterboard Core - Core types and definitions for the Chapterboard API
//!
//! This crate provides the fundamental types shared by every other crate:
//! - Chapter records and their enumerations
//! - Validation of incoming chapter documents
//! - List query parsing (filters, pagination) and cache-key derivation
//! - Year-wise question count aggregation
//! - Error types

pub mod error;
pub mod model;
pub mod query;
pub mod stats;
pub mod validation;

// Re-export commonly used types
pub use error::{CoreError, FieldIssue, ValidationError};
pub use model::{
    timestamp_now, Chapter, ChapterId, ChapterStatus, YearWiseQuestionCount, TRACKED_YEARS,
};
pub use query::{
    ChapterFilter, ListQuery, ListRequest, Pagination, PaginationMeta, StatsQuery,
    CHAPTER_CACHE_NAMESPACE,
};
pub use stats::{page_year_total, yearly_totals};
pub use validation::NewChapter;
