use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::{TodoChanges, TodoDocument, TodoId, UpdateOutcome};

use super::{StoreError, TodoStore};

type Records = Arc<RwLock<HashMap<String, TodoDocument>>>;

/// In-process store keyed by the string form of the id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        let records = self.records.read().await;
        let mut all: Vec<TodoDocument> = records.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn insert_one(&self, record: TodoDocument) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update_fields(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id.to_string()) else {
            return Ok(UpdateOutcome::default());
        };
        let modified = record.title != changes.title || record.completed != changes.completed;
        record.title = changes.title.clone();
        record.completed = changes.completed;
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.remove(&id.to_string()).map_or(0, |_| 1))
    }
}
