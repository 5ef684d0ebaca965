use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use todo_core::{TodoChanges, TodoDocument, TodoId, UpdateOutcome};
use tracing::debug;

use super::{StoreError, TodoStore};

/// Where and how to reach the MongoDB deployment.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Bounds both the initial TCP connect and server selection.
    pub connect_timeout: Duration,
}

/// `TodoStore` backed by one MongoDB collection.
///
/// The driver's `Client` owns a connection pool and is safe to share between
/// concurrent requests. Building the store does not contact the server; call
/// [`MongoStore::ping`] to check reachability.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Build a client for `settings.uri`. Fails only on an invalid URI.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(settings.uri.as_str()).await?;
        options.connect_timeout = Some(settings.connect_timeout);
        options.server_selection_timeout = Some(settings.connect_timeout);
        options
            .app_name
            .get_or_insert_with(|| env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let database = client.database(&settings.database);
        let collection = database.collection(&settings.collection);
        Ok(Self {
            database,
            collection,
        })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;
        let records: Vec<TodoDocument> = cursor.try_collect().await?;
        debug!(count = records.len(), "fetched todo records");
        Ok(records)
    }

    async fn insert_one(&self, record: TodoDocument) -> Result<(), StoreError> {
        self.collection.insert_one(record).await?;
        Ok(())
    }

    async fn update_fields(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string() },
                doc! {
                    "$set": {
                        "title": changes.title.as_str(),
                        "completed": changes.completed,
                    }
                },
            )
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(result.deleted_count)
    }
}
