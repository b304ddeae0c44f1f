use crate::models::{OperationOutcome, Record, RecordId};
use async_trait::async_trait;

/// CRUD contract of the persistence service, one store per record type.
///
/// Every call answers with an [`OperationOutcome`]; failures are reported
/// through `success == false` plus a message, never through panics.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Inserts the record under a freshly assigned id and returns that id.
    async fn add(&self, record: R) -> OperationOutcome<RecordId>;

    async fn get(&self, id: RecordId) -> OperationOutcome<R>;

    /// All records, ordered by id.
    async fn list(&self) -> OperationOutcome<Vec<R>>;

    /// Replaces the record with the same id.
    async fn update(&self, record: R) -> OperationOutcome<()>;

    async fn delete(&self, id: RecordId) -> OperationOutcome<()>;
}
