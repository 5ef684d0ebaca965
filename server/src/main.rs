use std::sync::Arc;

use tokio::net::TcpListener;
use todo_server::{
    config::StoreKind, telemetry, Config, MemoryStore, MongoStore, TodoStore,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    telemetry::init_logging(config.log_format);

    let store: Arc<dyn TodoStore> = match config.store_kind {
        StoreKind::Mongo => {
            let store = MongoStore::connect(&config.store).await?;
            // An unreachable server is not fatal; requests fail until it is back.
            match store.ping().await {
                Ok(()) => info!(uri = %config.store.uri, "connected to store"),
                Err(e) => error!(uri = %config.store.uri, error = %e, "store unreachable at startup"),
            }
            Arc::new(store)
        }
        StoreKind::Memory => {
            warn!("using in-memory store, records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    todo_server::run(listener, todo_server::app(store, config.request_timeout)).await?;
    Ok(())
}
