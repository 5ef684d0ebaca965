use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use todo_core::{
    codec, CreateTodo, Created, Deleted, Todo, TodoId, TodoList, UpdateTodo, Updated,
};
use tracing::info;

use crate::{error::ApiError, AppState};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

pub(crate) async fn home() -> Html<&'static str> {
    Html(INDEX_TEMPLATE)
}

pub(crate) async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, ApiError> {
    let records = state.store.find_all().await.map_err(ApiError::List)?;
    let data = records
        .into_iter()
        .map(Todo::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::List(e.into()))?;
    Ok(Json(TodoList { data }))
}

pub(crate) async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let input: CreateTodo = decode(&body)?;
    let id = TodoId::generate();
    let record = codec::new_record(input, id, Utc::now())?;

    state.store.insert_one(record).await.map_err(ApiError::Insert)?;
    info!(todo_id = %id, "todo created");

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "new record created successfully".to_string(),
            todo_id: id,
        }),
    ))
}

/// Not-found is reported as success with `matched_count == 0`.
pub(crate) async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Updated>), ApiError> {
    let id = TodoId::parse(&raw_id)?;
    let input: UpdateTodo = decode(&body)?;
    let changes = codec::changes(input)?;

    let outcome = state
        .store
        .update_fields(&id, &changes)
        .await
        .map_err(ApiError::Update)?;
    info!(
        todo_id = %id,
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        "todo updated"
    );

    Ok((
        StatusCode::CREATED,
        Json(Updated {
            message: "selected record updated successfully".to_string(),
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
        }),
    ))
}

pub(crate) async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let id = TodoId::parse(&raw_id)?;
    let deleted_count = state
        .store
        .delete_by_id(&id)
        .await
        .map_err(ApiError::Delete)?;
    info!(todo_id = %id, deleted = deleted_count, "todo deleted");

    Ok(Json(Deleted {
        message: "selected record has been deleted successfully".to_string(),
        deleted_count,
    }))
}

/// Bodies are read as JSON whatever `Content-Type` the client sent.
fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
