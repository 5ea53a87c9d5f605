use async_trait::async_trait;
use prisma_value::PrismaValue;
use query_structure::{Filter, Model, WriteArgs};

#[async_trait]
pub trait Connector {
    /// Returns a connection to a data source.
    async fn get_connection(&self) -> crate::Result<Box<dyn Connection + Send + Sync>>;

    /// Returns the data source name, used for logging.
    fn name(&self) -> &'static str;
}

/// Marker trait required by the query core executor to abstract connections into something
/// that is capable of writing to or reading from the data source.
pub trait Connection: ReadOperations + WriteOperations + Send + Sync {}

/// A single record, rendered as an object in the field order of its model.
pub type Record = PrismaValue;

#[async_trait]
pub trait ReadOperations {
    /// Gets multiple records from the database.
    /// - `model` specifies the model to query.
    /// - `filter` restricts the records returned, `Filter::Empty` returns all of them.
    async fn get_many_records(&mut self, model: &Model, filter: &Filter) -> crate::Result<Vec<Record>>;
}

#[async_trait]
pub trait WriteOperations {
    /// Insert a single record to the database. Returns the created record.
    async fn create_record(&mut self, model: &Model, args: WriteArgs) -> crate::Result<Record>;

    /// Update records in the `Model` with the given `WriteArgs` filtered by the
    /// `Filter`. Returns the number of records matching the filter, whether the
    /// update changed them or not.
    async fn update_records(&mut self, model: &Model, filter: Filter, args: WriteArgs) -> crate::Result<usize>;
}
