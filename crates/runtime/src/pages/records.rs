use super::lock;
use ahon_api::{
    BoxError, CancellationToken, NavigationParameters, Notifier, Page, PageError, PageResult,
    ParameterSink, Record, RecordStore, ToastLevel,
};
use ahon_core::ServiceRegistry;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Searchable list of one record type.
///
/// Accepts a `search` parameter; rows are loaded from the record store on
/// initialize and dropped on dispose.
pub struct RecordListPage<R: Record> {
    store: Arc<dyn RecordStore<R>>,
    notifier: Arc<dyn Notifier>,
    search: Mutex<Option<String>>,
    rows: Mutex<Vec<R>>,
}

impl<R: Record> RecordListPage<R> {
    pub fn new(store: Arc<dyn RecordStore<R>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            search: Mutex::new(None),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn from_registry(registry: &ServiceRegistry) -> Result<Self, BoxError> {
        Ok(Self::new(
            registry.resolve::<dyn RecordStore<R>>()?,
            registry.resolve::<dyn Notifier>()?,
        ))
    }

    pub fn search(&self) -> Option<String> {
        lock(&self.search).clone()
    }

    pub fn rows(&self) -> Vec<R> {
        lock(&self.rows).clone()
    }
}

impl<R: Record> ParameterSink for RecordListPage<R> {
    fn set_parameters(&self, parameters: NavigationParameters) {
        *lock(&self.search) = parameters
            .get_str("search")
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_string);
    }
}

#[async_trait]
impl<R: Record> Page for RecordListPage<R> {
    fn parameters(&self) -> Option<&dyn ParameterSink> {
        Some(self)
    }

    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        let records = self
            .store
            .list()
            .await
            .into_result()
            .map_err(PageError::Service)?
            .unwrap_or_default();

        let search = self.search();
        let rows: Vec<R> = match &search {
            Some(needle) => records.into_iter().filter(|r| r.matches(needle)).collect(),
            None => records,
        };
        tracing::debug!("Showing {} {} rows", rows.len(), R::KIND);

        if let (true, Some(needle)) = (rows.is_empty(), &search) {
            self.notifier.notify(
                ToastLevel::Info,
                "No results",
                &format!("No {} matches '{}'", R::KIND, needle),
            );
        }

        *lock(&self.rows) = rows;
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        lock(&self.rows).clear();
        Ok(())
    }
}
