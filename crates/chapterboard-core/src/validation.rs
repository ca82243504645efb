//! Validation of incoming chapter documents
//!
//! Uploaded and imported documents arrive as loosely typed JSON. Each one is
//! checked field by field; every problem is collected so a rejected document
//! reports all of them at once.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{FieldIssue, ValidationError};
use crate::model::{Chapter, ChapterId, ChapterStatus, YearWiseQuestionCount, TRACKED_YEARS};

/// A validated chapter that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewChapter {
    pub subject: String,
    pub chapter: String,
    pub class_name: String,
    pub unit: String,
    pub year_wise_question_count: YearWiseQuestionCount,
    pub question_solved: u32,
    pub status: ChapterStatus,
    pub is_weak_chapter: bool,
}

impl NewChapter {
    /// Validate a raw JSON document
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or_else(ValidationError::not_an_object)?;
        let mut issues = Vec::new();

        let subject = required_text(obj, "subject", &mut issues);
        let chapter = required_text(obj, "chapter", &mut issues);
        let class_name = required_text(obj, "class", &mut issues);
        let unit = required_text(obj, "unit", &mut issues);
        let year_wise_question_count = year_counts(obj, &mut issues);
        let question_solved = optional_count(obj, "questionSolved", &mut issues);
        let status = status(obj, &mut issues);
        let is_weak_chapter = optional_flag(obj, "isWeakChapter", &mut issues);

        match (subject, chapter, class_name, unit, year_wise_question_count, status) {
            (Some(subject), Some(chapter), Some(class_name), Some(unit), Some(counts), Some(status))
                if issues.is_empty() =>
            {
                Ok(Self {
                    subject,
                    chapter,
                    class_name,
                    unit,
                    year_wise_question_count: counts,
                    question_solved,
                    status,
                    is_weak_chapter,
                })
            }
            _ => Err(ValidationError::new(issues)),
        }
    }

    /// Attach store-assigned identity and timestamps
    pub fn into_chapter(self, id: ChapterId, now: DateTime<Utc>) -> Chapter {
        Chapter {
            id,
            subject: self.subject,
            chapter: self.chapter,
            class_name: self.class_name,
            unit: self.unit,
            year_wise_question_count: self.year_wise_question_count,
            question_solved: self.question_solved,
            status: self.status,
            is_weak_chapter: self.is_weak_chapter,
            created_at: now,
            updated_at: now,
        }
    }
}

fn missing(obj: &Map<String, Value>, field: &str) -> bool {
    matches!(obj.get(field), None | Some(Value::Null))
}

fn required_text(
    obj: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    let text = match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        // numbers and booleans are stored as their text form
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(_) => {
            issues.push(FieldIssue::new(field, "expected a string"));
            return None;
        }
    };

    match text {
        Some(s) if !s.is_empty() => Some(s),
        _ => {
            issues.push(FieldIssue::new(field, format!("`{}` is required", field)));
            None
        }
    }
}

fn non_negative_int(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).ok()
            } else {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn optional_count(obj: &Map<String, Value>, field: &str, issues: &mut Vec<FieldIssue>) -> u32 {
    if missing(obj, field) {
        return 0;
    }
    obj.get(field).and_then(non_negative_int).unwrap_or_else(|| {
        issues.push(FieldIssue::new(field, "must be a non-negative integer"));
        0
    })
}

fn optional_flag(obj: &Map<String, Value>, field: &str, issues: &mut Vec<FieldIssue>) -> bool {
    match obj.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s == "true" => true,
        Some(Value::String(s)) if s == "false" => false,
        Some(Value::Number(n)) if n.as_u64() == Some(1) => true,
        Some(Value::Number(n)) if n.as_u64() == Some(0) => false,
        Some(_) => {
            issues.push(FieldIssue::new(field, "must be a boolean"));
            false
        }
    }
}

fn year_counts(
    obj: &Map<String, Value>,
    issues: &mut Vec<FieldIssue>,
) -> Option<YearWiseQuestionCount> {
    const FIELD: &str = "yearWiseQuestionCount";

    let raw = match obj.get(FIELD) {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new(FIELD, format!("`{}` is required", FIELD)));
            return None;
        }
        Some(Value::Object(raw)) => raw,
        Some(_) => {
            issues.push(FieldIssue::new(FIELD, "expected an object keyed by year"));
            return None;
        }
    };

    let mut counts = YearWiseQuestionCount::new();
    let mut valid = true;
    for year in TRACKED_YEARS {
        match raw.get(*year) {
            None | Some(Value::Null) => {}
            Some(value) => match non_negative_int(value) {
                Some(count) => {
                    counts.set(year, count);
                }
                None => {
                    issues.push(FieldIssue::new(
                        format!("{}.{}", FIELD, year),
                        "must be a non-negative integer",
                    ));
                    valid = false;
                }
            },
        }
    }

    valid.then_some(counts)
}

fn status(obj: &Map<String, Value>, issues: &mut Vec<FieldIssue>) -> Option<ChapterStatus> {
    match obj.get("status") {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new("status", "`status` is required"));
            None
        }
        Some(Value::String(s)) => match s.parse::<ChapterStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                issues.push(FieldIssue::new(
                    "status",
                    format!("`{}` is not a valid enum value", s),
                ));
                None
            }
        },
        Some(_) => {
            issues.push(FieldIssue::new("status", "expected a string"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kinematics() -> Value {
        json!({
            "subject": "Physics",
            "chapter": "Kinematics",
            "class": "11",
            "unit": "Mechanics",
            "yearWiseQuestionCount": {"2023": 5},
            "status": "Completed"
        })
    }

    #[test]
    fn test_valid_document_applies_defaults() {
        let chapter = NewChapter::from_json(&kinematics()).unwrap();

        assert_eq!(chapter.subject, "Physics");
        assert_eq!(chapter.class_name, "11");
        assert_eq!(chapter.year_wise_question_count.get("2023"), Some(5));
        assert_eq!(chapter.year_wise_question_count.get("2019"), Some(0));
        assert_eq!(chapter.question_solved, 0);
        assert_eq!(chapter.status, ChapterStatus::Completed);
        assert!(!chapter.is_weak_chapter);
    }

    #[test]
    fn test_missing_status_is_rejected() {
        let mut doc = kinematics();
        doc.as_object_mut().unwrap().remove("status");

        let err = NewChapter::from_json(&doc).unwrap_err();
        assert!(err.has_field("status"));
        assert_eq!(err.issues.len(), 1);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut doc = kinematics();
        doc["status"] = json!("Done");

        let err = NewChapter::from_json(&doc).unwrap_err();
        assert!(err.to_string().contains("`Done` is not a valid enum value"));
    }

    #[test]
    fn test_all_issues_reported_together() {
        let doc = json!({"chapter": "", "status": "Completed"});
        let err = NewChapter::from_json(&doc).unwrap_err();

        for field in ["subject", "chapter", "class", "unit", "yearWiseQuestionCount"] {
            assert!(err.has_field(field), "expected issue for {}", field);
        }
    }

    #[test]
    fn test_numeric_text_fields_are_cast() {
        let mut doc = kinematics();
        doc["class"] = json!(12);

        let chapter = NewChapter::from_json(&doc).unwrap();
        assert_eq!(chapter.class_name, "12");
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let mut doc = kinematics();
        doc["yearWiseQuestionCount"] = json!({"2021": -3});
        doc["questionSolved"] = json!(-1);

        let err = NewChapter::from_json(&doc).unwrap_err();
        assert!(err.has_field("yearWiseQuestionCount.2021"));
        assert!(err.has_field("questionSolved"));
    }

    #[test]
    fn test_untracked_years_are_dropped() {
        let mut doc = kinematics();
        doc["yearWiseQuestionCount"] = json!({"2018": 4, "2024": "7"});

        let chapter = NewChapter::from_json(&doc).unwrap();
        assert_eq!(chapter.year_wise_question_count.get("2024"), Some(7));
        assert_eq!(chapter.year_wise_question_count.total(), 7);
    }

    #[test]
    fn test_weak_flag_accepts_text() {
        let mut doc = kinematics();
        doc["isWeakChapter"] = json!("true");
        assert!(NewChapter::from_json(&doc).unwrap().is_weak_chapter);

        doc["isWeakChapter"] = json!("maybe");
        assert!(NewChapter::from_json(&doc).unwrap_err().has_field("isWeakChapter"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = NewChapter::from_json(&json!([1, 2])).unwrap_err();
        assert!(err.has_field("document"));
    }

    #[test]
    fn test_into_chapter_sets_timestamps() {
        let now = Utc::now();
        let id = ChapterId::new();
        let chapter = NewChapter::from_json(&kinematics())
            .unwrap()
            .into_chapter(id, now);

        assert_eq!(chapter.id, id);
        assert_eq!(chapter.created_at, now);
        assert_eq!(chapter.updated_at, now);
    }
}
