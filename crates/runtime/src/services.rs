use crate::seed;
use ahon_api::{Notifier, Record, RecordStore};
use ahon_core::{InMemoryRecordStore, ServiceCollection, TracingNotifier};
use std::sync::Arc;

/// Register the notifier and one seeded store per record type.
pub fn register_services(services: &mut ServiceCollection) {
    services.add_trait_singleton::<dyn Notifier>(Arc::new(TracingNotifier));
    add_store(services, seed::members());
    add_store(services, seed::employees());
    add_store(services, seed::products());
    add_store(services, seed::suppliers());
    add_store(services, seed::purchase_orders());
    add_store(services, seed::training_sessions());
}

fn add_store<R: Record>(services: &mut ServiceCollection, records: Vec<R>) {
    let store: Arc<dyn RecordStore<R>> = Arc::new(InMemoryRecordStore::with_records(records));
    services.add_trait_singleton::<dyn RecordStore<R>>(store);
}
