//! Conversion between wire payloads and stored documents.

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::error::{CodecError, ValidationError};
use crate::types::{CreateTodo, Todo, TodoChanges, TodoDocument, TodoId, UpdateTodo};

/// Build the document inserted by a create.
///
/// `completed` always starts out false. `now` is truncated to whole
/// milliseconds, the precision of a BSON datetime, so the record read back
/// from the store equals the one written.
pub fn new_record(
    input: CreateTodo,
    id: TodoId,
    now: DateTime<Utc>,
) -> Result<TodoDocument, ValidationError> {
    Ok(TodoDocument {
        id: id.to_string(),
        title: require_title(input.title)?,
        completed: false,
        created_at: now.trunc_subsecs(3),
    })
}

/// Build the field changes applied by an update.
pub fn changes(input: UpdateTodo) -> Result<TodoChanges, ValidationError> {
    Ok(TodoChanges {
        title: require_title(input.title)?,
        completed: input.completed,
    })
}

fn require_title(title: String) -> Result<String, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(title)
}

impl TryFrom<TodoDocument> for Todo {
    type Error = CodecError;

    fn try_from(doc: TodoDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&doc.id).map_err(|_| CodecError::MalformedId(doc.id.clone()))?;
        Ok(Todo {
            id: TodoId::from(id),
            title: doc.title,
            completed: doc.completed,
            created_at: doc.created_at,
        })
    }
}

impl From<Todo> for TodoDocument {
    fn from(todo: Todo) -> Self {
        TodoDocument {
            id: todo.id.to_string(),
            title: todo.title,
            completed: todo.completed,
            created_at: todo.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::Bson;
    use chrono::{TimeZone, Timelike};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap() + chrono::Duration::nanoseconds(123_456_789)
    }

    #[test]
    fn new_record_forces_completed_false() {
        let id = TodoId::generate();
        let doc = new_record(
            CreateTodo {
                title: "buy milk".to_string(),
            },
            id,
            now(),
        )
        .unwrap();
        assert_eq!(doc.id, id.to_string());
        assert_eq!(doc.title, "buy milk");
        assert!(!doc.completed);
    }

    #[test]
    fn new_record_truncates_to_milliseconds() {
        let doc = new_record(
            CreateTodo {
                title: "t".to_string(),
            },
            TodoId::generate(),
            now(),
        )
        .unwrap();
        assert_eq!(doc.created_at.nanosecond(), 123_000_000);
    }

    #[test]
    fn new_record_requires_title() {
        let err = new_record(CreateTodo::default(), TodoId::generate(), now()).unwrap_err();
        assert_eq!(err, ValidationError::TitleRequired);
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn whitespace_title_is_not_empty() {
        let result = new_record(
            CreateTodo {
                title: " ".to_string(),
            },
            TodoId::generate(),
            now(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn changes_require_title() {
        let err = changes(UpdateTodo {
            title: String::new(),
            completed: true,
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::TitleRequired);
    }

    #[test]
    fn changes_carry_both_fields() {
        let c = changes(UpdateTodo {
            title: "walk dog".to_string(),
            completed: true,
        })
        .unwrap();
        assert_eq!(
            c,
            TodoChanges {
                title: "walk dog".to_string(),
                completed: true
            }
        );
    }

    #[test]
    fn document_converts_to_todo() {
        let id = TodoId::generate();
        let doc = TodoDocument {
            id: id.to_string(),
            title: "read".to_string(),
            completed: true,
            created_at: now().trunc_subsecs(3),
        };
        let todo = Todo::try_from(doc.clone()).unwrap();
        assert_eq!(todo.id, id);
        assert_eq!(todo.title, "read");
        assert!(todo.completed);
        assert_eq!(TodoDocument::from(todo), doc);
    }

    #[test]
    fn malformed_stored_id_is_rejected() {
        let doc = TodoDocument {
            id: "507f1f77bcf86cd799439011".to_string(),
            title: "legacy".to_string(),
            completed: false,
            created_at: now(),
        };
        assert_eq!(
            Todo::try_from(doc),
            Err(CodecError::MalformedId("507f1f77bcf86cd799439011".to_string()))
        );
    }

    #[test]
    fn json_round_trip_keeps_timestamp() {
        let doc = new_record(
            CreateTodo {
                title: "precise".to_string(),
            },
            TodoId::generate(),
            now(),
        )
        .unwrap();
        let todo = Todo::try_from(doc).unwrap();
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
    }

    #[test]
    fn document_bson_layout() {
        let doc = new_record(
            CreateTodo {
                title: "layout".to_string(),
            },
            TodoId::generate(),
            now(),
        )
        .unwrap();
        let bson_doc = bson::to_document(&doc).unwrap();
        assert_eq!(bson_doc.get_str("_id").unwrap(), doc.id);
        assert_eq!(bson_doc.get_str("title").unwrap(), "layout");
        assert!(!bson_doc.get_bool("completed").unwrap());
        assert!(matches!(bson_doc.get("created_at"), Some(Bson::DateTime(_))));

        let back: TodoDocument = bson::from_document(bson_doc).unwrap();
        assert_eq!(back, doc);
    }
}
