use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ModelError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier assigned by the document store. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        TaskId(value)
    }
}

/// Identifier of the user owning a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        UserId(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Normal,
    Important,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Normal, Status::Important, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Important => "important",
            Status::Completed => "completed",
        }
    }

    /// Human readable label shown next to a task.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Normal => "Normal",
            Status::Important => "Important",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Status::ALL
            .iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

/// Task is the only record kept by the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    #[serde(rename = "userId", default)]
    pub user_id: UserId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "wire_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
}

impl Task {
    pub fn draft(&self) -> TaskDraft {
        TaskDraft::from(self)
    }
}

/// The user editable part of a task, sent as the body of create and update
/// calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    #[serde(default, with = "wire_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            date: task.date,
            status: task.status,
        }
    }
}

/// Parses a task date as entered by a user or stored remotely.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. A timestamp contributes its
/// UTC calendar date, which is how the store keeps dates picked as plain days.
/// Blank input means "no date".
pub fn parse_task_date(input: &str) -> Result<Option<NaiveDate>, ModelError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(input)
        .map(|ts| Some(ts.with_timezone(&Utc).date_naive()))
        .map_err(|_| ModelError::InvalidDate(input.to_string()))
}

pub fn format_task_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

mod wire_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&super::format_task_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_task_date(&raw).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_store_record() {
        let task: Task = serde_json::from_value(json!({
            "_id": "6650a1",
            "userId": "u-1",
            "title": "water plants",
            "description": "balcony too",
            "date": "2024-05-03",
            "status": "important",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(task.id, TaskId::from("6650a1"));
        assert_eq!(task.user_id, UserId::from("u-1"));
        assert_eq!(task.date, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(task.status, Status::Important);
    }

    #[test]
    fn test_decode_timestamp_and_missing_fields() {
        let task: Task = serde_json::from_value(json!({
            "_id": "a",
            "title": "t",
            "date": "2024-05-03T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(task.date, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(task.status, Status::Normal, "missing status reads as normal");
        assert_eq!(task.description, "");

        let undated: Task =
            serde_json::from_value(json!({"_id": "b", "date": "", "status": "completed"}))
                .unwrap();
        assert_eq!(undated.date, None);

        let null_date: Task = serde_json::from_value(json!({"_id": "c", "date": null})).unwrap();
        assert_eq!(null_date.date, None);
    }

    #[test]
    fn test_reject_unknown_status_and_bad_date() {
        let res = serde_json::from_value::<Task>(json!({"_id": "a", "status": "urgent"}));
        assert!(res.is_err(), "status outside the three values is rejected");

        let res = serde_json::from_value::<Task>(json!({"_id": "a", "date": "03/05/2024"}));
        assert!(res.is_err(), "unparseable date is rejected");
    }

    #[test]
    fn test_draft_wire_shape() {
        let draft = TaskDraft::new("pay rent")
            .with_description("before friday")
            .with_date(NaiveDate::from_ymd_opt(2024, 6, 1))
            .with_status(Status::Important);

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "title": "pay rent",
                "description": "before friday",
                "date": "2024-06-01",
                "status": "important"
            })
        );

        let empty = serde_json::to_value(TaskDraft::default()).unwrap();
        assert_eq!(empty["date"], serde_json::Value::Null);
        assert_eq!(empty["status"], "normal");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Completed".parse::<Status>(), Ok(Status::Completed));
        assert_eq!(" normal ".parse::<Status>(), Ok(Status::Normal));
        assert_eq!(
            "done".parse::<Status>(),
            Err(ModelError::UnknownStatus("done".to_string()))
        );
    }

    #[test]
    fn test_parse_task_date() {
        assert_eq!(parse_task_date("  "), Ok(None));
        assert_eq!(
            parse_task_date("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29))
        );
        assert_eq!(
            parse_task_date("2023-02-29"),
            Err(ModelError::InvalidDate("2023-02-29".to_string()))
        );
        assert_eq!(
            parse_task_date("2024-05-03T23:30:00-02:00"),
            Ok(NaiveDate::from_ymd_opt(2024, 5, 4)),
            "timestamps contribute their UTC calendar date"
        );
    }
}
