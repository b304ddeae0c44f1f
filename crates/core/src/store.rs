use ahon_api::{OperationOutcome, Record, RecordId, RecordStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local record store. Ids start at 1 and are never reused.
pub struct InMemoryRecordStore<R: Record> {
    records: DashMap<RecordId, R>,
    next_id: AtomicU64,
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<R: Record> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`; their ids are reassigned in order.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&self, mut record: R) -> RecordId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        record.set_id(id);
        self.records.insert(id, record);
        id
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    async fn add(&self, record: R) -> OperationOutcome<RecordId> {
        let id = self.insert(record);
        OperationOutcome::ok(format!("Added {} {}", R::KIND, id), id)
    }

    async fn get(&self, id: RecordId) -> OperationOutcome<R> {
        match self.records.get(&id) {
            Some(record) => OperationOutcome::ok(format!("Found {} {}", R::KIND, id), record.clone()),
            None => OperationOutcome::failed(format!("No {} with id {}", R::KIND, id)),
        }
    }

    async fn list(&self) -> OperationOutcome<Vec<R>> {
        let mut records: Vec<R> = self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id());
        OperationOutcome::ok(format!("Loaded {} {} records", records.len(), R::KIND), records)
    }

    async fn update(&self, record: R) -> OperationOutcome<()> {
        let id = record.id();
        match self.records.get_mut(&id) {
            Some(mut existing) => {
                *existing = record;
                OperationOutcome::ok_empty(format!("Updated {} {}", R::KIND, id))
            }
            None => OperationOutcome::failed(format!("No {} with id {}", R::KIND, id)),
        }
    }

    async fn delete(&self, id: RecordId) -> OperationOutcome<()> {
        match self.records.remove(&id) {
            Some(_) => OperationOutcome::ok_empty(format!("Deleted {} {}", R::KIND, id)),
            None => OperationOutcome::failed(format!("No {} with id {}", R::KIND, id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahon_api::Supplier;

    fn supplier(name: &str) -> Supplier {
        Supplier {
            id: 0,
            name: name.to_string(),
            contact_email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    #[tokio::test]
    async fn add_assigns_increasing_ids() {
        let store = InMemoryRecordStore::new();
        let first = store.add(supplier("Iron Works")).await;
        let second = store.add(supplier("Protein Co")).await;

        assert!(first.success);
        assert_eq!(first.payload, Some(1));
        assert_eq!(second.payload, Some(2));
        assert_eq!(store.get(2).await.payload.unwrap().name, "Protein Co");
    }

    #[tokio::test]
    async fn missing_records_fail_with_message() {
        let store: InMemoryRecordStore<Supplier> = InMemoryRecordStore::new();

        let outcome = store.get(9).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "No supplier with id 9");
        assert!(outcome.payload.is_none());

        let mut ghost = supplier("Ghost");
        ghost.id = 9;
        assert!(!store.update(ghost).await.success);
        assert!(!store.delete(9).await.success);
    }

    #[tokio::test]
    async fn update_and_delete_existing() {
        let store = InMemoryRecordStore::with_records([supplier("A"), supplier("B")]);

        let mut changed = store.get(1).await.payload.unwrap();
        changed.phone = "555-0199".to_string();
        assert!(store.update(changed).await.success);
        assert_eq!(store.get(1).await.payload.unwrap().phone, "555-0199");

        assert!(store.delete(2).await.success);
        let listed = store.list().await.payload.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "A");

        // ids are never reused
        assert_eq!(store.add(supplier("C")).await.payload, Some(3));
    }
}
