//! Entities and request models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task lifecycle state, numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Paused,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Paused,
        Self::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Paused => "Paused",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("unknown task status {value}"))
    }
}

/// Task priority, numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskPriority {
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 5] = [
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Urgent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> u8 {
        priority as u8
    }
}

impl TryFrom<u8> for TaskPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("unknown task priority {value}"))
    }
}

/// Server-side ordering for the paged task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrderBy {
    IdAsc,
    IdDesc,
    NameAsc,
    NameDesc,
    DueDateAsc,
    DueDateDesc,
    PriorityAsc,
    PriorityDesc,
}

impl TaskOrderBy {
    /// Wire value for the `ordering` query parameter.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Map the table's sort state onto an ordering the backend
    /// understands. Unsorted state and unsupported columns map to no
    /// ordering at all.
    pub fn from_sort(column: &str, ascending: Option<bool>) -> Option<Self> {
        let ascending = ascending?;
        match (column, ascending) {
            ("id", true) => Some(Self::IdAsc),
            ("id", false) => Some(Self::IdDesc),
            ("name", true) => Some(Self::NameAsc),
            ("name", false) => Some(Self::NameDesc),
            ("dueDate", true) => Some(Self::DueDateAsc),
            ("dueDate", false) => Some(Self::DueDateDesc),
            ("priority", true) => Some(Self::PriorityAsc),
            ("priority", false) => Some(Self::PriorityDesc),
            _ => None,
        }
    }
}

/// Optional filters for the paged task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, with = "iso_date")]
    pub due_date: Option<NaiveDate>,
    pub category_id: i64,
}

/// Payload for creating or updating a task; `id` is `None` on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(with = "iso_date")]
    pub due_date: Option<NaiveDate>,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// Dates travel as `YYYY-MM-DD`; the backend sometimes appends a time
/// component, so deserialization only reads the date prefix.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => {
                let prefix = s.split('T').next().unwrap_or(&s);
                NaiveDate::parse_from_str(prefix, FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn order_by_covers_only_sortable_columns() {
        assert_eq!(
            TaskOrderBy::from_sort("id", Some(false)),
            Some(TaskOrderBy::IdDesc)
        );
        assert_eq!(
            TaskOrderBy::from_sort("dueDate", Some(true)),
            Some(TaskOrderBy::DueDateAsc)
        );
        assert_eq!(TaskOrderBy::from_sort("status", Some(true)), None);
        assert_eq!(TaskOrderBy::from_sort("id", None), None);
        assert_eq!(TaskOrderBy::from_sort("", Some(true)), None);
    }

    #[test]
    fn task_decodes_from_wire_json() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Ship it",
                "description": null,
                "status": 1,
                "priority": 3,
                "dueDate": "2024-12-31T00:00:00",
                "categoryId": 2
            }"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(
            task.due_date,
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<Task, _> = serde_json::from_str(
            r#"{"id":1,"name":"x","status":9,"priority":0,"categoryId":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn payload_serializes_date_as_plain_iso() {
        let payload = TaskPayload {
            id: None,
            name: "x".to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 2),
            category_id: 1,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dueDate"], "2025-01-02");
        assert!(json.get("id").is_none());
    }
}
