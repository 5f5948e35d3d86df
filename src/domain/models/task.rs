use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::domain::errors::{ValidationError, ValidationIssue};

/// Effort assumed when `estimated_hours` is missing or unusable
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// Importance assumed when `importance` is missing or non-numeric
pub const DEFAULT_IMPORTANCE: u8 = 5;

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 10;

/// A normalized task ready for graph construction and scoring.
///
/// Tasks are produced from loosely-typed client records by
/// [`normalize_batch`]; numeric fields are coerced to documented defaults
/// instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within a batch
    pub id: String,
    pub title: String,
    /// Deadline; `None` means no deadline pressure
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: f64,
    /// 1 (trivial) to 10 (critical)
    pub importance: u8,
    /// IDs that must be completed first, first occurrence order
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a task with default effort, importance and no deadline
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: u8) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Normalize a raw client record.
    ///
    /// Collects every problem in the record rather than stopping at the
    /// first one, so a client can fix a form in a single round trip.
    pub fn from_value(index: usize, raw: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let issue = |message: &str| ValidationIssue {
            index,
            message: message.to_string(),
        };

        let Some(record) = raw.as_object() else {
            return Err(vec![issue("task must be a JSON object")]);
        };

        let mut issues = Vec::new();

        let id = record.get("id").and_then(identifier);
        if id.is_none() {
            issues.push(issue("missing id"));
        }

        let title = record.get("title").and_then(identifier);
        if title.is_none() {
            issues.push(issue("missing title"));
        }

        let due_date = match parse_due_date(record.get("due_date")) {
            Ok(date) => date,
            Err(message) => {
                issues.push(issue(message));
                None
            }
        };

        match (id, title) {
            (Some(id), Some(title)) if issues.is_empty() => Ok(Self {
                id,
                title,
                due_date,
                estimated_hours: coerce_hours(record.get("estimated_hours")),
                importance: coerce_importance(record.get("importance")),
                dependencies: coerce_dependencies(record.get("dependencies")),
            }),
            _ => Err(issues),
        }
    }
}

/// Normalize a batch of raw records into tasks.
///
/// Fails with every issue found across the batch, including duplicate IDs.
/// No partial result is returned.
pub fn normalize_batch(raw: &[Value]) -> Result<Vec<Task>, ValidationError> {
    let mut tasks = Vec::with_capacity(raw.len());
    let mut issues = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, record) in raw.iter().enumerate() {
        match Task::from_value(index, record) {
            Ok(task) => {
                if let Some(first) = seen.get(&task.id) {
                    issues.push(ValidationIssue {
                        index,
                        message: format!("duplicate id \"{}\" (first seen at task[{first}])", task.id),
                    });
                } else {
                    seen.insert(task.id.clone(), index);
                    tasks.push(task);
                }
            }
            Err(mut record_issues) => issues.append(&mut record_issues),
        }
    }

    if issues.is_empty() {
        Ok(tasks)
    } else {
        Err(ValidationError { issues })
    }
}

/// Text of an id-like field: trimmed non-empty strings, or numbers rendered
/// as strings.
pub fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_due_date(value: Option<&Value>) -> Result<Option<NaiveDate>, &'static str> {
    const INVALID: &str = "invalid due_date, use YYYY-MM-DD";

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
                .map(Some)
                .map_err(|_| INVALID)
        }
        Some(_) => Err(INVALID),
    }
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_hours(value: Option<&Value>) -> f64 {
    as_number(value)
        .filter(|h| *h > 0.0)
        .unwrap_or(DEFAULT_ESTIMATED_HOURS)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_importance(value: Option<&Value>) -> u8 {
    as_number(value).map_or(DEFAULT_IMPORTANCE, |n| {
        n.round()
            .clamp(f64::from(MIN_IMPORTANCE), f64::from(MAX_IMPORTANCE)) as u8
    })
}

fn coerce_dependencies(value: Option<&Value>) -> Vec<String> {
    let candidates: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(identifier).collect(),
        Some(single @ Value::String(_)) => identifier(single).into_iter().collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|dep| seen.insert(dep.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record_is_normalized() {
        let raw = json!({
            "id": "7",
            "title": "  Write report ",
            "due_date": "2025-03-14",
            "estimated_hours": 3.5,
            "importance": 8,
            "dependencies": ["1", "2"]
        });

        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.title, "Write report");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(task.estimated_hours, 3.5);
        assert_eq!(task.importance, 8);
        assert_eq!(task.dependencies, vec!["1", "2"]);
    }

    #[test]
    fn test_missing_numeric_fields_use_defaults() {
        let task = Task::from_value(0, &json!({"id": "a", "title": "A"})).unwrap();
        assert_eq!(task.estimated_hours, DEFAULT_ESTIMATED_HOURS);
        assert_eq!(task.importance, DEFAULT_IMPORTANCE);
        assert!(task.due_date.is_none());
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_non_numeric_fields_are_coerced() {
        let raw = json!({
            "id": 3,
            "title": "Numeric id",
            "estimated_hours": "abc",
            "importance": "",
            "due_date": "",
            "dependencies": null
        });

        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.id, "3");
        assert_eq!(task.estimated_hours, DEFAULT_ESTIMATED_HOURS);
        assert_eq!(task.importance, DEFAULT_IMPORTANCE);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_numeric_title_becomes_text() {
        let task = Task::from_value(0, &json!({"id": "a", "title": 42})).unwrap();
        assert_eq!(task.title, "42");

        let issues = Task::from_value(0, &json!({"id": "b", "title": ["x"]})).unwrap_err();
        assert_eq!(issues[0].message, "missing title");
    }

    #[test]
    fn test_numeric_strings_and_out_of_range_values() {
        let raw = json!({
            "id": "x",
            "title": "X",
            "estimated_hours": "2.5",
            "importance": 11
        });
        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.estimated_hours, 2.5);
        assert_eq!(task.importance, MAX_IMPORTANCE);

        let raw = json!({"id": "y", "title": "Y", "estimated_hours": 0, "importance": 0});
        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.estimated_hours, DEFAULT_ESTIMATED_HOURS);
        assert_eq!(task.importance, MIN_IMPORTANCE);
    }

    #[test]
    fn test_rfc3339_due_date_uses_date_part() {
        let raw = json!({"id": "a", "title": "A", "due_date": "2025-06-01T17:30:00Z"});
        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 6, 1));
    }

    #[test]
    fn test_invalid_due_date_is_rejected() {
        let raw = json!({"id": "a", "title": "A", "due_date": "next tuesday"});
        let issues = Task::from_value(4, &raw).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].index, 4);
        assert!(issues[0].message.contains("due_date"));
    }

    #[test]
    fn test_missing_id_and_title_reported_together() {
        let issues = Task::from_value(0, &json!({"title": "   "})).unwrap_err();
        let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["missing id", "missing title"]);
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        let issues = Task::from_value(0, &json!("task")).unwrap_err();
        assert_eq!(issues[0].message, "task must be a JSON object");
    }

    #[test]
    fn test_dependencies_are_deduplicated_in_order() {
        let raw = json!({
            "id": "a",
            "title": "A",
            "dependencies": ["c", "b", "c", 4, {"nested": true}]
        });
        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.dependencies, vec!["c", "b", "4"]);

        let raw = json!({"id": "a", "title": "A", "dependencies": "b"});
        let task = Task::from_value(0, &raw).unwrap();
        assert_eq!(task.dependencies, vec!["b"]);
    }

    #[test]
    fn test_normalize_batch_rejects_duplicate_ids() {
        let raw = vec![
            json!({"id": "1", "title": "A"}),
            json!({"id": "2", "title": "B"}),
            json!({"id": "1", "title": "C"}),
        ];

        let err = normalize_batch(&raw).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].index, 2);
        assert!(err.issues[0].message.contains("duplicate id \"1\""));
    }

    #[test]
    fn test_normalize_batch_collects_issues_across_records() {
        let raw = vec![json!({"id": "1"}), json!({"title": "B"})];
        let err = normalize_batch(&raw).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.issues[0].index, 0);
        assert_eq!(err.issues[1].index, 1);
    }

    #[test]
    fn test_normalize_batch_preserves_insertion_order() {
        let raw = vec![
            json!({"id": "b", "title": "B"}),
            json!({"id": "a", "title": "A"}),
        ];
        let tasks = normalize_batch(&raw).unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
