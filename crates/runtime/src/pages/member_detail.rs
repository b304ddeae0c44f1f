use super::lock;
use ahon_api::{
    BoxError, CancellationToken, Member, NavigationParameters, Notifier, Page, PageError,
    PageResult, ParameterSink, RecordId, RecordStore, ToastLevel,
};
use ahon_core::ServiceRegistry;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Detail view of one member, opened with an `id` parameter.
///
/// Edits are kept as a pending copy and written back to the store when the
/// user leaves the page.
pub struct MemberDetailPage {
    store: Arc<dyn RecordStore<Member>>,
    notifier: Arc<dyn Notifier>,
    parameters: Mutex<NavigationParameters>,
    member: Mutex<Option<Member>>,
    pending: Mutex<Option<Member>>,
}

impl MemberDetailPage {
    pub fn new(store: Arc<dyn RecordStore<Member>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            parameters: Mutex::new(NavigationParameters::new()),
            member: Mutex::new(None),
            pending: Mutex::new(None),
        }
    }

    pub fn from_registry(registry: &ServiceRegistry) -> Result<Self, BoxError> {
        Ok(Self::new(registry.resolve()?, registry.resolve()?))
    }

    /// The member as currently shown, including unsaved edits.
    pub fn member(&self) -> Option<Member> {
        lock(&self.pending)
            .clone()
            .or_else(|| lock(&self.member).clone())
    }

    /// Apply an edit to the loaded member. Returns `false` if nothing is loaded.
    pub fn edit(&self, change: impl FnOnce(&mut Member)) -> bool {
        let Some(mut draft) = self.member() else {
            return false;
        };
        change(&mut draft);
        *lock(&self.pending) = Some(draft);
        true
    }

    pub fn has_pending_changes(&self) -> bool {
        lock(&self.pending).is_some()
    }

    fn requested_id(&self) -> PageResult<RecordId> {
        let parameters = lock(&self.parameters);
        let value = parameters
            .get("id")
            .ok_or_else(|| PageError::MissingParameter("id".to_string()))?;
        parameters
            .get_i64("id")
            .and_then(|id| RecordId::try_from(id).ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| PageError::InvalidParameter {
                key: "id".to_string(),
                reason: format!("expected a positive integer, got {value}"),
            })
    }
}

impl ParameterSink for MemberDetailPage {
    fn set_parameters(&self, parameters: NavigationParameters) {
        *lock(&self.parameters) = parameters;
    }
}

#[async_trait]
impl Page for MemberDetailPage {
    fn parameters(&self) -> Option<&dyn ParameterSink> {
        Some(self)
    }

    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        let id = self.requested_id()?;
        match self.store.get(id).await.into_result() {
            Ok(member) => {
                *lock(&self.member) = member;
                Ok(())
            }
            Err(message) => {
                self.notifier
                    .notify(ToastLevel::Error, "Member not found", &message);
                Err(PageError::Service(message))
            }
        }
    }

    async fn on_navigating_from(&self, _cancel: &CancellationToken) -> PageResult<()> {
        let Some(draft) = lock(&self.pending).take() else {
            return Ok(());
        };
        let label = format!("{} {}", draft.first_name, draft.last_name);
        let outcome = self.store.update(draft.clone()).await;
        if !outcome.success {
            self.notifier
                .notify(ToastLevel::Error, "Save failed", &outcome.message);
            return Err(PageError::Service(outcome.message));
        }
        *lock(&self.member) = Some(draft);
        self.notifier
            .notify(ToastLevel::Success, "Saved", &format!("Saved {label}"));
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        lock(&self.member).take();
        lock(&self.pending).take();
        Ok(())
    }
}
