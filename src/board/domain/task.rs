//! Task aggregate and related value objects.

use super::{BoardDomainError, ColumnId, MemberId, ParsePriorityError, ProjectId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative, finite number of hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hours(f64);

impl Hours {
    /// Creates a validated hour value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidHours`] for negative, infinite or
    /// NaN values.
    pub fn new(value: f64) -> Result<Self, BoardDomainError> {
        if !value.is_finite() || value.is_sign_negative() {
            return Err(BoardDomainError::InvalidHours(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Hours {
    type Error = BoardDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hours> for f64 {
    fn from(value: Hours) -> Self {
        value.0
    }
}

/// Field defaults applied to newly created tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDefaults {
    /// Priority used when the caller does not supply one.
    pub priority: Priority,
    /// Estimate used when the caller does not supply one.
    pub estimated_hours: f64,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            priority: Priority::Medium,
            estimated_hours: 8.0,
        }
    }
}

/// Caller-supplied fields for a new task.
///
/// Only the title and creator are required; everything else falls back to
/// [`TaskDefaults`] or stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    title: String,
    created_by: MemberId,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assigned_to: Option<MemberId>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    estimated_hours: Option<f64>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    tags: Vec<String>,
}

impl NewTask {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: MemberId) -> Self {
        Self {
            title: title.into(),
            created_by,
            description: None,
            assigned_to: None,
            priority: None,
            estimated_hours: None,
            due_date: None,
            tags: Vec::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, member: MemberId) -> Self {
        self.assigned_to = Some(member);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the hour estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the ordered tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Returns the requested assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&MemberId> {
        self.assigned_to.as_ref()
    }
}

/// Partial update for an existing task.
///
/// `None` leaves a field untouched. Nested options clear the field when set
/// to `Some(None)`. The status cannot be patched; moves go through the
/// transition rules instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement or cleared assignee.
    pub assigned_to: Option<Option<MemberId>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement estimate.
    pub estimated_hours: Option<f64>,
    /// Externally reported actual hours, or a cleared report.
    pub actual_hours: Option<Option<f64>>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Returns the assignee this patch would set, if any.
    #[must_use]
    pub fn new_assignee(&self) -> Option<&MemberId> {
        self.assigned_to.as_ref().and_then(Option::as_ref)
    }
}

/// Task aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    project_id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<MemberId>,
    created_by: MemberId,
    status: ColumnId,
    priority: Priority,
    estimated_hours: Hours,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual_hours: Option<Hours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    tags: Vec<String>,
}

impl Task {
    /// Creates a task inside `status` from caller-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is blank
    /// and [`BoardDomainError::InvalidHours`] for an invalid estimate.
    pub fn create(
        project_id: ProjectId,
        status: ColumnId,
        fields: NewTask,
        defaults: &TaskDefaults,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let title = TaskTitle::new(fields.title)?;
        let estimated_hours =
            Hours::new(fields.estimated_hours.unwrap_or(defaults.estimated_hours))?;

        Ok(Self {
            id: TaskId::new(),
            title,
            description: fields.description,
            project_id,
            assigned_to: fields.assigned_to,
            created_by: fields.created_by,
            status,
            priority: fields.priority.unwrap_or(defaults.priority),
            estimated_hours,
            actual_hours: None,
            due_date: fields.due_date,
            created_at: clock.utc(),
            tags: fields.tags,
        })
    }

    /// Produces a sibling copy placed in the entry column.
    ///
    /// The copy receives a fresh identifier and creation timestamp and has no
    /// reported actual hours; every other field is carried over.
    #[must_use]
    pub fn duplicate(&self, entry_column: ColumnId, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            status: entry_column,
            created_at: clock.utc(),
            actual_hours: None,
            ..self.clone()
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&MemberId> {
        self.assigned_to.as_ref()
    }

    /// Returns the member who created the task.
    #[must_use]
    pub const fn created_by(&self) -> &MemberId {
        &self.created_by
    }

    /// Returns the column the task currently occupies.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the hour estimate.
    #[must_use]
    pub const fn estimated_hours(&self) -> Hours {
        self.estimated_hours
    }

    /// Returns externally reported actual hours, if any.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<Hours> {
        self.actual_hours
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the ordered tag list.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Applies a partial update.
    ///
    /// Validation happens before any field is written, so a rejected patch
    /// leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] or
    /// [`BoardDomainError::InvalidHours`] when a replacement value is invalid.
    pub fn apply_patch(&mut self, patch: TaskPatch) -> Result<(), BoardDomainError> {
        let title = patch.title.map(TaskTitle::new).transpose()?;
        let estimated_hours = patch.estimated_hours.map(Hours::new).transpose()?;
        let actual_hours = patch
            .actual_hours
            .map(|reported| reported.map(Hours::new).transpose())
            .transpose()?;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = patch.description {
            self.description = value;
        }
        if let Some(value) = patch.assigned_to {
            self.assigned_to = value;
        }
        if let Some(value) = patch.priority {
            self.priority = value;
        }
        if let Some(value) = estimated_hours {
            self.estimated_hours = value;
        }
        if let Some(value) = actual_hours {
            self.actual_hours = value;
        }
        if let Some(value) = patch.due_date {
            self.due_date = value;
        }
        if let Some(value) = patch.tags {
            self.tags = value;
        }
        Ok(())
    }

    /// Rewrites the status. Transition rules are enforced by callers.
    pub(crate) fn set_status(&mut self, status: ColumnId) {
        self.status = status;
    }
}
