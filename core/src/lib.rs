//! Domain core for the todo service.
//!
//! # Overview
//! Holds everything about a todo record that does not touch the network or
//! the database: the identifier scheme, the JSON wire types, the storage
//! document, and the codec that converts between them.
//!
//! # Design
//! - `TodoId` is a random v4 UUID. Its string form (lowercase, hyphenated) is
//!   what appears in URL paths, JSON bodies and the stored `_id`.
//! - Wire types (`Todo`, `CreateTodo`, ...) and the storage type
//!   (`TodoDocument`) are separate so the BSON layout never leaks into the
//!   HTTP contract.
//! - Validation lives in the codec and runs before any store access.

pub mod codec;
pub mod error;
pub mod types;

pub use error::{CodecError, ValidationError};
pub use types::{
    Created, CreateTodo, Deleted, ErrorBody, Todo, TodoChanges, TodoDocument, TodoId, TodoList,
    UpdateTodo, Updated, UpdateOutcome,
};
