use crate::{connection::Store, MemoryConnection};
use async_trait::async_trait;
use parking_lot::RwLock;
use query_connector::{Connection, Connector};
use std::sync::Arc;

/// In-memory connector. Connections share one store, so writes of one connection are visible to
/// every other connection of the same connector.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    store: Arc<RwLock<Store>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn get_connection(&self) -> query_connector::Result<Box<dyn Connection + Send + Sync>> {
        let conn = MemoryConnection::new(Arc::clone(&self.store));
        Ok(Box::new(conn) as Box<dyn Connection + Send + Sync>)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
