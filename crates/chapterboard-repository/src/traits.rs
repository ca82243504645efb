//! Core trait definition for chapter record stores
//!
//! [`ChapterRepository`] is the only seam between the request pipeline and
//! persistence. Every backend must provide:
//!
//! - Equality-filtered queries ordered by creation time, newest first
//! - Counting with the same filter semantics
//! - Lookup by identity
//! - Single and bulk inserts, plus a full wipe for re-imports

use async_trait::async_trait;
use chapterboard_core::{Chapter, ChapterFilter, ChapterId, NewChapter};

use crate::RepositoryResult;

/// Skip/limit window applied after ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindWindow {
    pub skip: u64,
    /// `None` returns every remaining match
    pub limit: Option<u64>,
}

impl FindWindow {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }
}

/// Chapter record store
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`; handlers share one instance
/// behind an `Arc`.
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    /// Chapters matching `filter`, newest `createdAt` first, windowed by `window`.
    ///
    /// Chapters sharing a `createdAt` (a batch from `insert_many`) come back in
    /// reverse insertion order, so the last chapter written is listed first.
    async fn find(&self, filter: &ChapterFilter, window: FindWindow)
        -> RepositoryResult<Vec<Chapter>>;

    /// Number of chapters matching `filter`
    async fn count(&self, filter: &ChapterFilter) -> RepositoryResult<u64>;

    /// Load a chapter by identity
    async fn find_by_id(&self, id: &ChapterId) -> RepositoryResult<Option<Chapter>>;

    /// Persist one validated chapter; the store assigns identity and timestamps
    async fn insert(&self, chapter: NewChapter) -> RepositoryResult<Chapter>;

    /// Persist a batch; either every chapter is stored or none is
    async fn insert_many(&self, chapters: Vec<NewChapter>) -> RepositoryResult<Vec<Chapter>>;

    /// Remove every chapter, returning how many were removed
    async fn delete_all(&self) -> RepositoryResult<u64>;

    /// Every chapter matching `filter`, unpaginated
    async fn find_all(&self, filter: &ChapterFilter) -> RepositoryResult<Vec<Chapter>> {
        self.find(filter, FindWindow::all()).await
    }
}
