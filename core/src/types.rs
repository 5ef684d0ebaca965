//! Wire and storage types for todo records.
//!
//! # Design
//! Request payloads default every field so that an absent `title` decodes to
//! an empty string and is rejected by validation with a readable message
//! instead of a generic decode error. Unknown fields are ignored, which is
//! how a client-supplied `completed` on create is dropped. An explicit
//! `null` reads the same as an absent field.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Server-assigned identifier of a todo record.
///
/// Serializes as the hyphenated UUID string in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id as received in a URL path. Surrounding whitespace is
    /// ignored.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TodoId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TodoId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A todo record as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /todo/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// Request payload for `PUT /todo/{id}`. Both fields are written; an absent
/// `completed` is written as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A todo record as it is stored in the `todo` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// The mutable fields of a record, as applied by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
    pub completed: bool,
}

/// Counts reported by the store for an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Response body of `GET /todo/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub data: Vec<Todo>,
}

/// Response body of a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub todo_id: TodoId,
}

/// Response body of a successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Updated {
    pub message: String,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Response body of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted {
    pub message: String,
    pub deleted_count: u64,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_serializes_as_hyphenated_string() {
        let id = TodoId::from(Uuid::nil());
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn todo_id_parse_trims_whitespace() {
        let id = TodoId::parse("  67e55044-10b1-426f-9247-bb680e5fe0c8 \n").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn todo_id_parse_canonicalizes_simple_form() {
        let id: TodoId = "67E5504410B1426F9247BB680E5FE0C8".parse().unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn todo_id_parse_rejects_garbage() {
        assert_eq!(TodoId::parse("not-a-uuid"), Err(ValidationError::InvalidId));
        assert_eq!(TodoId::parse(""), Err(ValidationError::InvalidId));
        // 24-hex object ids belong to a different scheme
        assert_eq!(
            TodoId::parse("507f1f77bcf86cd799439011"),
            Err(ValidationError::InvalidId)
        );
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TodoId::generate(), TodoId::generate());
    }

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: TodoId::from(Uuid::nil()),
            title: "Test".to_string(),
            completed: false,
            created_at: "2024-03-01T12:30:45.123Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-03-01T12:30:45.123Z");
    }

    #[test]
    fn create_todo_missing_title_decodes_empty() {
        let input: CreateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_empty());
    }

    #[test]
    fn create_todo_ignores_completed() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"Done","completed":true}"#).unwrap();
        assert_eq!(input.title, "Done");
    }

    #[test]
    fn update_todo_defaults_completed_to_false() {
        let input: UpdateTodo = serde_json::from_str(r#"{"title":"New title"}"#).unwrap();
        assert_eq!(input.title, "New title");
        assert!(!input.completed);
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert!(input.title.is_empty());

        let input: UpdateTodo =
            serde_json::from_str(r#"{"title":"x","completed":null}"#).unwrap();
        assert_eq!(input.title, "x");
        assert!(!input.completed);
    }

    #[test]
    fn wrong_field_type_still_fails() {
        assert!(serde_json::from_str::<UpdateTodo>(r#"{"title":"x","completed":"yes"}"#).is_err());
    }

    #[test]
    fn error_body_omits_missing_detail() {
        let body = ErrorBody {
            message: "title is required".to_string(),
            code: "title_required".to_string(),
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["code"], "title_required");
    }
}
