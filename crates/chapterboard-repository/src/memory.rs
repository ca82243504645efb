//! In-memory chapter repository
//!
//! Simple memory-based storage for testing and development.

use async_trait::async_trait;
use chapterboard_core::{timestamp_now, Chapter, ChapterFilter, ChapterId, NewChapter};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::traits::{ChapterRepository, FindWindow};
use crate::RepositoryResult;

/// Operation counters, useful for asserting whether a request reached the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryStats {
    pub finds: u64,
    pub counts: u64,
    pub lookups: u64,
    pub inserts: u64,
}

#[derive(Default)]
struct Counters {
    finds: AtomicU64,
    counts: AtomicU64,
    lookups: AtomicU64,
    inserts: AtomicU64,
}

/// In-memory chapter repository
///
/// Chapters are kept in insertion order. This is suitable for testing and
/// development, but not for production as data is lost when the process
/// restarts.
pub struct MemoryRepository {
    chapters: RwLock<Vec<Chapter>>,
    counters: Counters,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            chapters: RwLock::new(Vec::new()),
            counters: Counters::default(),
        }
    }

    /// Create a repository holding already-persisted chapters
    pub fn with_chapters(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters: RwLock::new(chapters),
            counters: Counters::default(),
        }
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            finds: self.counters.finds.load(Ordering::Relaxed),
            counts: self.counters.counts.load(Ordering::Relaxed),
            lookups: self.counters.lookups.load(Ordering::Relaxed),
            inserts: self.counters.inserts.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChapterRepository for MemoryRepository {
    async fn find(
        &self,
        filter: &ChapterFilter,
        window: FindWindow,
    ) -> RepositoryResult<Vec<Chapter>> {
        self.counters.finds.fetch_add(1, Ordering::Relaxed);
        let chapters = self.chapters.read().await;

        // Later inserts win ties on createdAt, so walk newest first before the stable sort
        let mut matched: Vec<&Chapter> = chapters.iter().rev().filter(|c| filter.matches(c)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = window
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self, filter: &ChapterFilter) -> RepositoryResult<u64> {
        self.counters.counts.fetch_add(1, Ordering::Relaxed);
        let chapters = self.chapters.read().await;
        Ok(chapters.iter().filter(|c| filter.matches(c)).count() as u64)
    }

    async fn find_by_id(&self, id: &ChapterId) -> RepositoryResult<Option<Chapter>> {
        self.counters.lookups.fetch_add(1, Ordering::Relaxed);
        let chapters = self.chapters.read().await;
        Ok(chapters.iter().find(|c| &c.id == id).cloned())
    }

    async fn insert(&self, chapter: NewChapter) -> RepositoryResult<Chapter> {
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
        let chapter = chapter.into_chapter(ChapterId::new(), timestamp_now());
        self.chapters.write().await.push(chapter.clone());
        Ok(chapter)
    }

    async fn insert_many(&self, chapters: Vec<NewChapter>) -> RepositoryResult<Vec<Chapter>> {
        self.counters
            .inserts
            .fetch_add(chapters.len() as u64, Ordering::Relaxed);
        let now = timestamp_now();
        let stored: Vec<Chapter> = chapters
            .into_iter()
            .map(|c| c.into_chapter(ChapterId::new(), now))
            .collect();

        self.chapters.write().await.extend(stored.iter().cloned());
        tracing::debug!("Inserted {} chapters", stored.len());
        Ok(stored)
    }

    async fn delete_all(&self) -> RepositoryResult<u64> {
        let mut chapters = self.chapters.write().await;
        let removed = chapters.len() as u64;
        chapters.clear();
        tracing::debug!("Removed {} chapters", removed);
        Ok(removed)
    }
}
