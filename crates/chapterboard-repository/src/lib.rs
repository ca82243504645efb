//! Record store layer for Chapterboard
//!
//! This crate provides a unified interface for querying and persisting
//! chapter records against different storage backends.
//!
//! # Features
//!
//! - **Memory Repository**: In-process store for development and tests
//! - **PostgreSQL Repository**: Database-backed storage (feature `postgres`)
//! - **Async API**: Non-blocking I/O operations with Tokio
//!
//! # Quick Start
//!
//! ```no_run
//! use chapterboard_core::{ChapterFilter, NewChapter};
//! use chapterboard_repository::{ChapterRepository, MemoryRepository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = MemoryRepository::new();
//!
//!     let doc = serde_json::json!({
//!         "subject": "Physics",
//!         "chapter": "Kinematics",
//!         "class": "Class 11",
//!         "unit": "Mechanics 1",
//!         "yearWiseQuestionCount": {"2023": 5},
//!         "status": "Completed"
//!     });
//!     let chapter = repo.insert(NewChapter::from_json(&doc)?).await?;
//!
//!     let all = repo.find_all(&ChapterFilter::default()).await?;
//!     assert_eq!(all[0].id, chapter.id);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │        Request Pipeline                │
//! └──────────────┬─────────────────────────┘
//!                │ ChapterRepository trait
//!       ┌────────┴────────┐
//!       ↓                 ↓
//! ┌──────────────┐  ┌──────────────────┐
//! │ Memory       │  │  PostgreSQL      │
//! │ Repository   │  │  Repository      │
//! └──────────────┘  └──────────────────┘
//! ```

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Repositories
pub use memory::{MemoryRepository, RepositoryStats};
pub use traits::*;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;
