//! Persistence for todo records.
//!
//! # Design
//! Handlers only see the `TodoStore` trait, shared as `Arc<dyn TodoStore>`
//! inside the router state. `MongoStore` is the production backend;
//! `MemoryStore` keeps records in process and backs the tests.
//!
//! A missing record is not an error at this layer: updates and deletes
//! report their matched/deleted counts and let the caller decide.

mod memory;
mod mongo;

use async_trait::async_trait;
use thiserror::Error;
use todo_core::{CodecError, TodoChanges, TodoDocument, TodoId, UpdateOutcome};

pub use memory::MemoryStore;
pub use mongo::{MongoStore, StoreSettings};

/// Failure of a single store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A record with this id already exists.
    #[error("duplicate key {0}")]
    Duplicate(String),

    /// The backend could not serve the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Record-level operations over the todo collection.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every record, oldest first.
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError>;

    async fn insert_one(&self, record: TodoDocument) -> Result<(), StoreError>;

    /// Overwrite `title` and `completed` on the record with the given id.
    async fn update_fields(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Remove the record with the given id, returning how many were removed.
    async fn delete_by_id(&self, id: &TodoId) -> Result<u64, StoreError>;
}
