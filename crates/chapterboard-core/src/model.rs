//! Chapter record types
//!
//! A [`Chapter`] is one academic chapter's tracked metadata: where it sits in
//! the syllabus, how many exam questions it drew each year, and the
//! student's progress on it.

use chrono::{DateTime, SubsecRound, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Years tracked in [`YearWiseQuestionCount`], oldest first
pub const TRACKED_YEARS: &[&str] = &["2019", "2020", "2021", "2022", "2023", "2024", "2025"];

/// Current time at millisecond precision, the resolution stores keep
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Store-assigned chapter identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(Uuid);

impl ChapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ChapterId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| CoreError::InvalidValue(format!("invalid chapter id `{}`: {}", s, e)))
    }
}

/// Study progress of a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChapterStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ChapterStatus {
    pub const ALL: [ChapterStatus; 3] = [
        ChapterStatus::NotStarted,
        ChapterStatus::InProgress,
        ChapterStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::NotStarted => "Not Started",
            ChapterStatus::InProgress => "In Progress",
            ChapterStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChapterStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChapterStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidValue(format!("`{}` is not a valid status", s)))
    }
}

/// Question counts per tracked year. Unset years count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearWiseQuestionCount {
    counts: [u32; TRACKED_YEARS.len()],
}

impl YearWiseQuestionCount {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(year: &str) -> Option<usize> {
        TRACKED_YEARS.iter().position(|y| *y == year)
    }

    /// Count for `year`, or `None` when the year is not tracked
    pub fn get(&self, year: &str) -> Option<u32> {
        Self::index_of(year).map(|i| self.counts[i])
    }

    /// Set the count for a tracked year. Returns `false` for untracked years.
    pub fn set(&mut self, year: &str, count: u32) -> bool {
        match Self::index_of(year) {
            Some(i) => {
                self.counts[i] = count;
                true
            }
            None => false,
        }
    }

    pub fn with(mut self, year: &str, count: u32) -> Self {
        self.set(year, count);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        TRACKED_YEARS.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| u64::from(*c)).sum()
    }
}

impl Serialize for YearWiseQuestionCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRACKED_YEARS.len()))?;
        for (year, count) in self.iter() {
            map.serialize_entry(year, &count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for YearWiseQuestionCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        let mut counts = Self::default();
        for (year, count) in raw {
            // untracked years are dropped
            counts.set(&year, count);
        }
        Ok(counts)
    }
}

/// A persisted chapter record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(rename = "_id")]
    pub id: ChapterId,
    pub subject: String,
    pub chapter: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub unit: String,
    pub year_wise_question_count: YearWiseQuestionCount,
    pub question_solved: u32,
    pub status: ChapterStatus,
    pub is_weak_chapter: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
