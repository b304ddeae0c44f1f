//! Page navigation.
//!
//! The navigator owns the current page and drives every transition:
//!
//! 1. look up the route of the target page type
//! 2. resolve a new instance through the service registry
//! 3. tear the previous page down (`on_navigating_from`, then `dispose`)
//! 4. hand over parameters, then `initialize`
//! 5. make the page current and notify the single listener
//!
//! Transitions are serialized: concurrent callers queue behind the running
//! transition, while a call issued from inside a transition's own hooks is
//! rejected with `ReentrantNavigation`. Teardown failures are logged and never
//! block leaving a page.

mod listener;

pub use listener::ListenerHandle;

use crate::config::{InitializePolicy, NavigatorConfig};
use crate::registry::ServiceRegistry;
use ahon_api::{
    AsAny, CancellationToken, NavigationError, NavigationEvent, NavigationListener,
    NavigationParameters, NavigationResult, Page, PageResult, Route,
};
use listener::ListenerSlot;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tracing::Instrument;

tokio::task_local! {
    /// Navigators with a transition (or shutdown) running on the current
    /// task, outermost first.
    static IN_TRANSITION: Vec<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    Idle,
    Active { route: Route },
}

#[derive(Clone)]
struct ActivePage {
    page: Arc<dyn Page>,
    route: Route,
}

pub struct Navigator {
    registry: Arc<ServiceRegistry>,
    config: NavigatorConfig,
    span: tracing::Span,
    /// Held for the full duration of a transition.
    transition: Mutex<()>,
    active: RwLock<Option<ActivePage>>,
    listener: ListenerSlot,
    route_tx: watch::Sender<Option<Route>>,
}

impl Navigator {
    pub fn new(registry: Arc<ServiceRegistry>, config: NavigatorConfig) -> Self {
        let span = tracing::info_span!("navigator", name = %config.name);
        let (route_tx, _) = watch::channel(None);
        Self {
            registry,
            config,
            span,
            transition: Mutex::new(()),
            active: RwLock::new(None),
            listener: ListenerSlot::new(),
            route_tx,
        }
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Register the one listener of this navigator.
    ///
    /// Fails with `ListenerAlreadyRegistered` on every call after the first;
    /// the original listener stays attached.
    pub fn subscribe<L>(&self, listener: L) -> NavigationResult<ListenerHandle>
    where
        L: NavigationListener + 'static,
    {
        self.listener.register(Arc::new(listener))
    }

    pub fn state(&self) -> NavigatorState {
        match self.read_active().as_ref() {
            Some(active) => NavigatorState::Active {
                route: active.route,
            },
            None => NavigatorState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.read_active().is_none()
    }

    /// The current page and its route.
    pub fn current(&self) -> Option<NavigationEvent> {
        self.read_active()
            .as_ref()
            .map(|active| NavigationEvent::new(active.page.clone(), active.route))
    }

    /// The current page as its concrete type, if it is a `P`.
    pub fn current_page<P: Page>(&self) -> Option<Arc<P>> {
        let page = self.read_active().as_ref()?.page.clone();
        AsAny::into_any_arc(page).downcast::<P>().ok()
    }

    pub fn current_route(&self) -> Option<Route> {
        *self.route_tx.borrow()
    }

    /// Observe route changes. `None` while no page is current.
    pub fn watch_route(&self) -> watch::Receiver<Option<Route>> {
        self.route_tx.subscribe()
    }

    /// Navigate to a fresh instance of `P`.
    ///
    /// Returns the new page once it is current and the listener was notified.
    /// Errors raised before teardown (`InvalidPageType`, `PageResolution`,
    /// `Cancelled` on an already cancelled token) leave the previous page
    /// current and untouched.
    pub async fn navigate_to<P: Page>(
        &self,
        parameters: Option<NavigationParameters>,
        cancel: &CancellationToken,
    ) -> NavigationResult<Arc<P>> {
        if self.in_transition() {
            return Err(NavigationError::ReentrantNavigation {
                type_name: std::any::type_name::<P>(),
            });
        }

        let _transition = self.transition.lock().await;
        IN_TRANSITION
            .scope(self.enter_transition(), self.transition_to::<P>(parameters, cancel))
            .instrument(self.span.clone())
            .await
    }

    /// Tear down the current page and return to idle.
    pub async fn shutdown(&self, cancel: &CancellationToken) {
        if self.in_transition() {
            tracing::warn!("Shutdown requested from inside a transition, ignoring");
            return;
        }

        let _transition = self.transition.lock().await;
        IN_TRANSITION
            .scope(self.enter_transition(), async {
                if let Some(active) = self.take_active() {
                    self.route_tx.send_replace(None);
                    self.teardown(active, cancel).await;
                    tracing::info!("Navigator shut down");
                }
            })
            .instrument(self.span.clone())
            .await
    }

    fn identity(&self) -> usize {
        self as *const Self as usize
    }

    /// True when this navigator's own transition is running on the current
    /// task. Transitions of other navigators do not count.
    fn in_transition(&self) -> bool {
        let id = self.identity();
        IN_TRANSITION
            .try_with(|ids| ids.contains(&id))
            .unwrap_or(false)
    }

    fn enter_transition(&self) -> Vec<usize> {
        let mut ids = IN_TRANSITION.try_with(Clone::clone).unwrap_or_default();
        ids.push(self.identity());
        ids
    }

    async fn transition_to<P: Page>(
        &self,
        parameters: Option<NavigationParameters>,
        cancel: &CancellationToken,
    ) -> NavigationResult<Arc<P>> {
        let type_name = std::any::type_name::<P>();
        let route = self
            .registry
            .route_of::<P>()
            .ok_or(NavigationError::InvalidPageType { type_name })?;

        if cancel.is_cancelled() {
            return Err(NavigationError::Cancelled { route });
        }

        let page = self
            .registry
            .resolve::<P>()
            .map_err(|source| NavigationError::PageResolution { type_name, source })?;
        tracing::debug!(route = %route, page = type_name, "Navigating");

        if let Some(previous) = self.take_active() {
            self.route_tx.send_replace(None);
            self.teardown(previous, cancel).await;
        }

        let erased: Arc<dyn Page> = page.clone();
        if let Some(parameters) = parameters {
            match erased.parameters() {
                Some(sink) => sink.set_parameters(parameters),
                None => tracing::debug!(
                    "{} takes no parameters, dropping {} entries",
                    route,
                    parameters.len()
                ),
            }
        }

        let initialized = tokio::select! {
            biased;
            result = erased.initialize(cancel) => Some(result),
            _ = cancel.cancelled() => None,
        };

        let candidate = ActivePage {
            page: erased,
            route,
        };
        match initialized {
            Some(Ok(())) => {}
            Some(Err(source)) => {
                tracing::warn!("Page {} failed to initialize: {}", route, source);
                self.teardown(candidate, cancel).await;
                return Err(NavigationError::Initialization { route, source });
            }
            None => match self.config.initialize_policy {
                InitializePolicy::BestEffort => {
                    tracing::warn!("Initialization of {} cancelled, keeping page", route);
                }
                InitializePolicy::Atomic => {
                    tracing::info!("Initialization of {} cancelled, reverting to idle", route);
                    self.teardown(candidate, cancel).await;
                    return Err(NavigationError::Cancelled { route });
                }
            },
        }

        let event = NavigationEvent::new(candidate.page.clone(), route);
        *self.write_active() = Some(candidate);
        self.route_tx.send_replace(Some(route));
        tracing::info!(route = %route, page = type_name, "Navigated");

        self.listener.notify(&event);
        Ok(page)
    }

    /// Two-phase teardown. Failures and timeouts are logged, never returned.
    async fn teardown(&self, active: ActivePage, cancel: &CancellationToken) {
        let timeout = self.config.teardown_timeout();
        let route = active.route;

        let leaving = tokio::time::timeout(timeout, active.page.on_navigating_from(cancel)).await;
        log_teardown_phase("on_navigating_from", route, timeout, leaving);

        let disposed = tokio::time::timeout(timeout, active.page.dispose(cancel)).await;
        log_teardown_phase("dispose", route, timeout, disposed);

        tracing::debug!("Tore down {}", route);
    }

    fn take_active(&self) -> Option<ActivePage> {
        self.write_active().take()
    }

    fn read_active(&self) -> RwLockReadGuard<'_, Option<ActivePage>> {
        self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_active(&self) -> RwLockWriteGuard<'_, Option<ActivePage>> {
        self.active.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_teardown_phase(
    phase: &str,
    route: Route,
    timeout: Duration,
    outcome: Result<PageResult<()>, tokio::time::error::Elapsed>,
) {
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("{} failed for {}: {}", phase, route, e),
        Err(_) => tracing::warn!("{} timed out for {} after {:?}", phase, route, timeout),
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        let active = self
            .active
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(active) = active.as_ref() {
            tracing::warn!(
                "Navigator dropped while {} is current; call shutdown to dispose it",
                active.route
            );
        }
    }
}
