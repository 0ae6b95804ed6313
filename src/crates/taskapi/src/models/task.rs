//! Task record model

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, TaskApiError};

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Current time at the precision every store can hold.
///
/// Stores keep microseconds, so stamping at that precision makes a record
/// read back from a store equal to the one returned when it was written.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Task priority enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum TaskPriority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl TaskPriority {
    /// All priorities in ascending order
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = TaskApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "0" => Ok(Self::Low),
            "medium" | "1" => Ok(Self::Medium),
            "high" | "2" => Ok(Self::High),
            "critical" | "3" => Ok(Self::Critical),
            other => Err(TaskApiError::Validation(format!(
                "Unknown priority '{}'. Expected one of: low, medium, high, critical",
                other
            ))),
        }
    }
}

impl TryFrom<i64> for TaskPriority {
    type Error = TaskApiError;

    fn try_from(n: i64) -> Result<Self> {
        match n {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Critical),
            _ => Err(TaskApiError::Store(format!("Invalid stored priority: {}", n))),
        }
    }
}

/// Task status enumeration
///
/// Any status may move to any other; only entering `Completed` has a side
/// effect (the one-time `completed_at` stamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending = 0,
    /// Being worked on
    InProgress = 1,
    /// Done
    Completed = 2,
    /// Abandoned
    Cancelled = 3,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskApiError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "pending" | "0" => Ok(Self::Pending),
            "inprogress" | "1" => Ok(Self::InProgress),
            "completed" | "2" => Ok(Self::Completed),
            "cancelled" | "3" => Ok(Self::Cancelled),
            _ => Err(TaskApiError::Validation(format!(
                "Unknown status '{}'. Expected one of: pending, in_progress, completed, cancelled",
                s.trim()
            ))),
        }
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = TaskApiError;

    fn try_from(n: i64) -> Result<Self> {
        match n {
            0 => Ok(Self::Pending),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Cancelled),
            _ => Err(TaskApiError::Store(format!("Invalid stored status: {}", n))),
        }
    }
}

/// A unit of trackable work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Unique task identifier, assigned at creation
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Task priority
    pub priority: TaskPriority,

    /// Current workflow status
    pub status: TaskStatus,

    /// Creation timestamp, never changes
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,

    /// Set the first time the task entered `Completed`, never cleared
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Create a new pending task with a fresh identifier
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            status: TaskStatus::Pending,
            created_at: now(),
            updated_at: None,
            completed_at: None,
        }
    }

    /// Builder: Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: Set priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the task has ever been completed
    pub fn was_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Check title and description limits
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to `Medium` when absent
    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder: Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: Set priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Check title and description limits
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())
    }

    /// Build the pending record this input describes
    pub fn into_record(self) -> TaskRecord {
        let mut record = TaskRecord::new(self.title);
        record.description = self.description;
        record.priority = self.priority.unwrap_or_default();
        record
    }
}

/// Partial update merged onto a freshly fetched record
///
/// Absent fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,

    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Check if any field would change
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.priority.is_some()
            || self.status.is_some()
    }

    /// Merge onto `record`, returning the desired final state
    pub fn apply_to(self, mut record: TaskRecord) -> TaskRecord {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(description) = self.description {
            record.description = Some(description);
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        record
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskApiError::Validation("Title must not be empty".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(TaskApiError::Validation(format!(
            "Title is {} characters, maximum is {}",
            len, MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(description) = description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(TaskApiError::Validation(format!(
                "Description is {} characters, maximum is {}",
                len, MAX_DESCRIPTION_LEN
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let task = TaskRecord::new("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.updated_at.is_none());
        assert!(task.completed_at.is_none());
        assert!(!task.was_completed());
    }

    #[test]
    fn test_new_task_priority_defaults_to_medium() {
        let record = NewTask::new("Write docs").into_record();
        assert_eq!(record.priority, TaskPriority::Medium);

        let record = NewTask::new("Fix outage")
            .with_priority(TaskPriority::Critical)
            .with_description("Prod is down")
            .into_record();
        assert_eq!(record.priority, TaskPriority::Critical);
        assert_eq!(record.description.as_deref(), Some("Prod is down"));
    }

    #[test]
    fn test_now_has_microsecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("low".parse::<TaskPriority>().unwrap(), TaskPriority::Low);
        assert_eq!("High".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert_eq!(" CRITICAL ".parse::<TaskPriority>().unwrap(), TaskPriority::Critical);
        assert_eq!("1".parse::<TaskPriority>().unwrap(), TaskPriority::Medium);
        assert!("urgent".parse::<TaskPriority>().unwrap_err().is_validation());
    }

    #[test]
    fn test_status_parsing_accepts_common_spellings() {
        for spelling in ["in_progress", "in-progress", "InProgress", "in progress"] {
            assert_eq!(spelling.parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        }
        assert_eq!("Cancelled".parse::<TaskStatus>().unwrap(), TaskStatus::Cancelled);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_stored_ordinals() {
        assert_eq!(TaskPriority::Critical as i64, 3);
        assert_eq!(TaskStatus::Completed as i64, 2);
        assert_eq!(TaskPriority::try_from(0).unwrap(), TaskPriority::Low);
        assert_eq!(TaskStatus::try_from(3).unwrap(), TaskStatus::Cancelled);
        assert!(TaskPriority::try_from(9).unwrap_err().is_store_failure());
        assert!(TaskStatus::try_from(-1).unwrap_err().is_store_failure());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::High < TaskPriority::Critical);
    }

    #[test]
    fn test_validation_limits() {
        assert!(NewTask::new("ok").validate().is_ok());
        assert!(NewTask::new("").validate().is_err());
        assert!(NewTask::new("   ").validate().is_err());
        assert!(NewTask::new("x".repeat(MAX_TITLE_LEN)).validate().is_ok());
        assert!(NewTask::new("x".repeat(MAX_TITLE_LEN + 1)).validate().is_err());

        let long_description = NewTask::new("ok").with_description("d".repeat(MAX_DESCRIPTION_LEN + 1));
        assert!(long_description.validate().is_err());

        // Limits count characters, not bytes
        assert!(NewTask::new("é".repeat(MAX_TITLE_LEN)).validate().is_ok());
    }

    #[test]
    fn test_changes_apply_only_present_fields() {
        let original = TaskRecord::new("Original")
            .with_description("keep me")
            .with_priority(TaskPriority::Low);

        let changes = TaskChanges {
            title: Some("Renamed".to_string()),
            status: Some(TaskStatus::InProgress),
            ..TaskChanges::default()
        };
        assert!(changes.has_updates());

        let updated = changes.apply_to(original.clone());
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description.as_deref(), Some("keep me"));
        assert_eq!(updated.priority, TaskPriority::Low);
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_empty_changes() {
        assert!(!TaskChanges::default().has_updates());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let task = TaskRecord::new("Serialize me").with_priority(TaskPriority::High);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["title"], "Serialize me");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("createdAt").is_some());
        assert!(json["completedAt"].is_null());
    }

    #[test]
    fn test_changes_deserialize_partial_body() {
        let changes: TaskChanges = serde_json::from_str(r#"{"status":"Completed"}"#).unwrap();
        assert_eq!(changes.status, Some(TaskStatus::Completed));
        assert!(changes.title.is_none());
        assert!(changes.priority.is_none());
    }
}
