//! Wire records: the JSON shapes persisted in the record store.
//!
//! Records use camelCase keys, RFC 3339 UTC timestamps, and `null` for
//! absent optionals. Decoding validates every record at the boundary and
//! rejects anything that would break a domain invariant; the only lenient
//! field is a task's `dueDate`, which degrades to "no due date" when it
//! cannot be parsed so that sorting stays total.

use crate::board::{
    domain::{
        Activity, ActivityId, ActivityKind, BoardDomainError, Category, CategoryId, NewCategory,
        NewUser, PersistedTaskData, Subtask, SubtaskId, Task, TaskId, TaskPriority, TaskStatus,
        User, UserId, UserRole,
    },
    ports::Collection,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Errors returned while encoding or decoding wire records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The JSON value does not have the expected shape.
    #[error("malformed {collection} record: {source}")]
    Shape {
        /// Collection the record belongs to.
        collection: Collection,
        /// Underlying failure.
        source: serde_json::Error,
    },

    /// The record is well-formed but violates a domain rule.
    #[error("invalid {collection} record: {source}")]
    Invalid {
        /// Collection the record belongs to.
        collection: Collection,
        /// Violated rule.
        source: BoardDomainError,
    },
}

/// A domain value with a persisted JSON representation.
pub trait BoardRecord: Sized {
    /// Collection the record is stored under.
    const COLLECTION: Collection;

    /// Returns the identifier used for duplicate detection.
    fn record_id(&self) -> &str;

    /// Encodes the value as its wire record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Shape`] when serialization fails.
    fn encode(&self) -> Result<Value, RecordError>;

    /// Decodes and validates a wire record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the value is malformed or invalid.
    fn decode(value: Value) -> Result<Self, RecordError>;
}

/// Records decoded from one collection plus the number rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCollection<R> {
    /// Accepted records, in stored order.
    pub records: Vec<R>,
    /// Records rejected as malformed, invalid, or duplicate.
    pub skipped: usize,
}

/// Decodes every record of a collection independently.
///
/// Malformed or invalid records, and records repeating an identifier seen
/// earlier in the sequence, are skipped and logged.
#[must_use]
pub fn decode_collection<R: BoardRecord>(values: Vec<Value>) -> DecodedCollection<R> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0;

    for (position, value) in values.into_iter().enumerate() {
        match R::decode(value) {
            Ok(record) if seen.insert(record.record_id().to_owned()) => records.push(record),
            Ok(record) => {
                skipped += 1;
                tracing::warn!(
                    collection = %R::COLLECTION,
                    position,
                    id = record.record_id(),
                    "skipping record with duplicate identifier"
                );
            }
            Err(err) => {
                skipped += 1;
                tracing::warn!(
                    collection = %R::COLLECTION,
                    position,
                    error = %err,
                    "skipping malformed record"
                );
            }
        }
    }

    DecodedCollection { records, skipped }
}

/// Encodes every value of a collection, preserving order.
///
/// # Errors
///
/// Returns the first [`RecordError`] encountered.
pub fn encode_collection<'a, R: BoardRecord + 'a>(
    values: impl IntoIterator<Item = &'a R>,
) -> Result<Vec<Value>, RecordError> {
    values.into_iter().map(BoardRecord::encode).collect()
}

fn to_value<T: Serialize>(collection: Collection, record: &T) -> Result<Value, RecordError> {
    serde_json::to_value(record).map_err(|source| RecordError::Shape { collection, source })
}

fn from_value<T: DeserializeOwned>(
    collection: Collection,
    value: Value,
) -> Result<T, RecordError> {
    serde_json::from_value(value).map_err(|source| RecordError::Shape { collection, source })
}

fn invalid(collection: Collection) -> impl Fn(BoardDomainError) -> RecordError {
    move |source| RecordError::Invalid { collection, source }
}

/// Parses a nullable foreign key; blank strings mean "no reference".
fn optional_id<T>(
    raw: Option<String>,
    parse: impl Fn(String) -> Result<T, BoardDomainError>,
) -> Result<Option<T>, BoardDomainError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(parse)
        .transpose()
}

/// Formats a timestamp the way the wire format stores it.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses a stored due date.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates (midnight UTC), and
/// `YYYY-MM-DDTHH:MM` local-style timestamps (read as UTC). Anything else is
/// treated as no due date.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    tracing::warn!(due_date = trimmed, "ignoring unparseable due date");
    None
}

/// Wire shape of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Assigned client identifier, if any.
    #[serde(default)]
    pub assigned_client_id: Option<String>,
    /// Creating user identifier, if known.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Due date, if any.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Completion timestamp, if completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Category identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            priority: task.priority(),
            assigned_client_id: task.assigned_client_id().map(ToString::to_string),
            created_by: task.created_by().map(ToString::to_string),
            created_at: task.created_at(),
            due_date: task.due_date().map(format_timestamp),
            completed_at: task.completed_at(),
            category_id: task.category_id().map(ToString::to_string),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = BoardDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let data = PersistedTaskData {
            id: TaskId::parse(record.id)?,
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            assigned_client_id: optional_id(record.assigned_client_id, UserId::parse)?,
            created_by: optional_id(record.created_by, UserId::parse)?,
            category_id: optional_id(record.category_id, CategoryId::parse)?,
            created_at: record.created_at,
            due_date: record.due_date.as_deref().and_then(parse_due_date),
            completed_at: record.completed_at,
        };
        Self::from_persisted(data)
    }
}

impl BoardRecord for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn record_id(&self) -> &str {
        self.id().as_str()
    }

    fn encode(&self) -> Result<Value, RecordError> {
        to_value(Self::COLLECTION, &TaskRecord::from(self))
    }

    fn decode(value: Value) -> Result<Self, RecordError> {
        let record: TaskRecord = from_value(Self::COLLECTION, value)?;
        Self::try_from(record).map_err(invalid(Self::COLLECTION))
    }
}

/// Wire shape of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl BoardRecord for User {
    const COLLECTION: Collection = Collection::Users;

    fn record_id(&self) -> &str {
        self.id().as_str()
    }

    fn encode(&self) -> Result<Value, RecordError> {
        let record = UserRecord {
            id: self.id().to_string(),
            name: self.name().to_owned(),
            email: self.email().to_owned(),
            role: self.role(),
            created_at: self.created_at(),
        };
        to_value(Self::COLLECTION, &record)
    }

    fn decode(value: Value) -> Result<Self, RecordError> {
        let record: UserRecord = from_value(Self::COLLECTION, value)?;
        let build = || -> Result<Self, BoardDomainError> {
            let id = UserId::parse(record.id)?;
            let new_user = NewUser::new(record.name, record.email, record.role)?;
            Ok(Self::from_persisted(id, new_user, record.created_at))
        };
        build().map_err(invalid(Self::COLLECTION))
    }
}

/// Wire shape of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// Category identifier.
    pub id: String,
    /// Name.
    pub name: String,
    /// Display colour.
    #[serde(default)]
    pub color: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl BoardRecord for Category {
    const COLLECTION: Collection = Collection::Categories;

    fn record_id(&self) -> &str {
        self.id().as_str()
    }

    fn encode(&self) -> Result<Value, RecordError> {
        let record = CategoryRecord {
            id: self.id().to_string(),
            name: self.name().to_owned(),
            color: Some(self.color().to_owned()),
            description: self.description().to_owned(),
            created_at: self.created_at(),
        };
        to_value(Self::COLLECTION, &record)
    }

    fn decode(value: Value) -> Result<Self, RecordError> {
        let record: CategoryRecord = from_value(Self::COLLECTION, value)?;
        let build = || -> Result<Self, BoardDomainError> {
            let id = CategoryId::parse(record.id)?;
            let mut new_category =
                NewCategory::new(record.name)?.with_description(record.description);
            if let Some(color) = record.color.filter(|color| !color.trim().is_empty()) {
                new_category = new_category.with_color(color);
            }
            Ok(Self::from_persisted(id, new_category, record.created_at))
        };
        build().map_err(invalid(Self::COLLECTION))
    }
}

/// Wire shape of a subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskRecord {
    /// Subtask identifier.
    pub id: String,
    /// Parent task identifier.
    pub parent_task_id: String,
    /// Title.
    pub title: String,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, if completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl BoardRecord for Subtask {
    const COLLECTION: Collection = Collection::Subtasks;

    fn record_id(&self) -> &str {
        self.id().as_str()
    }

    fn encode(&self) -> Result<Value, RecordError> {
        let record = SubtaskRecord {
            id: self.id().to_string(),
            parent_task_id: self.parent_task_id().to_string(),
            title: self.title().to_owned(),
            completed: self.is_completed(),
            created_at: self.created_at(),
            completed_at: self.completed_at(),
        };
        to_value(Self::COLLECTION, &record)
    }

    fn decode(value: Value) -> Result<Self, RecordError> {
        let record: SubtaskRecord = from_value(Self::COLLECTION, value)?;
        let build = || -> Result<Self, BoardDomainError> {
            Self::from_persisted(
                SubtaskId::parse(record.id)?,
                TaskId::parse(record.parent_task_id)?,
                record.title,
                record.completed,
                record.created_at,
                record.completed_at,
            )
        };
        build().map_err(invalid(Self::COLLECTION))
    }
}

/// Wire shape of an activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Activity identifier.
    pub id: String,
    /// Task the activity concerns.
    pub task_id: String,
    /// Acting user, if known.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Kind of change.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Human-readable summary.
    #[serde(default)]
    pub message: String,
    /// When the activity happened.
    pub created_at: DateTime<Utc>,
}

impl BoardRecord for Activity {
    const COLLECTION: Collection = Collection::Activities;

    fn record_id(&self) -> &str {
        self.id().as_str()
    }

    fn encode(&self) -> Result<Value, RecordError> {
        let record = ActivityRecord {
            id: self.id().to_string(),
            task_id: self.task_id().to_string(),
            user_id: self.user_id().map(ToString::to_string),
            kind: self.kind(),
            message: self.message().to_owned(),
            created_at: self.created_at(),
        };
        to_value(Self::COLLECTION, &record)
    }

    fn decode(value: Value) -> Result<Self, RecordError> {
        let record: ActivityRecord = from_value(Self::COLLECTION, value)?;
        let build = || -> Result<Self, BoardDomainError> {
            Ok(Self::from_persisted(
                ActivityId::parse(record.id)?,
                TaskId::parse(record.task_id)?,
                optional_id(record.user_id, UserId::parse)?,
                record.kind,
                record.message,
                record.created_at,
            ))
        };
        build().map_err(invalid(Self::COLLECTION))
    }
}

/// Wire shape of the persisted sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Signed-in user.
    pub user_id: UserId,
    /// When the sign-in happened.
    pub signed_in_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Encodes the session as its wire record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Shape`] when serialization fails.
    pub fn encode(&self) -> Result<Value, RecordError> {
        to_value(Collection::Session, self)
    }

    /// Decodes a stored session record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Shape`] when the value is malformed.
    pub fn decode(value: Value) -> Result<Self, RecordError> {
        from_value(Collection::Session, value)
    }
}
