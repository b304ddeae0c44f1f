#![allow(dead_code)]

use ahon_api::{
    CancellationToken, NavigationError, NavigationEvent, NavigationParameters, Page, PageError,
    PageResult, ParameterSink, Route,
};
use ahon_core::{Lifetime, Navigator, NavigatorConfig, ServiceCollection};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;

pub const ROUTE_A: Route = Route::new("/a");
pub const ROUTE_B: Route = Route::new("/b");

/// Shared journal of lifecycle calls, in call order.
#[derive(Default)]
pub struct Probe {
    entries: Mutex<Vec<String>>,
    init_delay: Mutex<Duration>,
}

impl Probe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_init_delay(delay: Duration) -> Arc<Self> {
        let probe = Self::default();
        *probe.init_delay.lock().unwrap() = delay;
        Arc::new(probe)
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    async fn pause(&self) {
        let delay = *self.init_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Plain page: initialize and teardown only.
pub struct PageA {
    probe: Arc<Probe>,
    initialized: AtomicBool,
}

impl PageA {
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Page for PageA {
    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("a:init");
        self.probe.pause().await;
        self.initialized.store(true, Ordering::SeqCst);
        self.probe.record("a:ready");
        Ok(())
    }

    async fn on_navigating_from(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("a:leaving");
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("a:dispose");
        Ok(())
    }
}

/// Page accepting parameters.
pub struct PageB {
    probe: Arc<Probe>,
    received: Mutex<Vec<NavigationParameters>>,
}

impl PageB {
    pub fn received(&self) -> Vec<NavigationParameters> {
        self.received.lock().unwrap().clone()
    }
}

impl ParameterSink for PageB {
    fn set_parameters(&self, parameters: NavigationParameters) {
        self.probe.record("b:params");
        self.received.lock().unwrap().push(parameters);
    }
}

#[async_trait]
impl Page for PageB {
    fn parameters(&self) -> Option<&dyn ParameterSink> {
        Some(self)
    }

    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("b:init");
        self.probe.pause().await;
        self.probe.record("b:ready");
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("b:dispose");
        Ok(())
    }
}

/// Registered as a service but without route metadata.
pub struct Unrouted;

#[async_trait]
impl Page for Unrouted {}

/// Routed page whose construction always fails.
pub struct BrokenPage;

#[async_trait]
impl Page for BrokenPage {}

/// Both teardown phases fail.
pub struct StubbornPage {
    probe: Arc<Probe>,
}

#[async_trait]
impl Page for StubbornPage {
    async fn on_navigating_from(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("stubborn:leaving");
        Err(PageError::Failed("unsaved edits".to_string()))
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("stubborn:dispose");
        Err(PageError::Service("connection reset".to_string()))
    }
}

/// Never finishes its pre-teardown hook.
pub struct HangingPage {
    probe: Arc<Probe>,
}

#[async_trait]
impl Page for HangingPage {
    async fn on_navigating_from(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("hanging:leaving");
        std::future::pending::<PageResult<()>>().await
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("hanging:dispose");
        Ok(())
    }
}

/// Never finishes initializing.
pub struct SlowPage {
    probe: Arc<Probe>,
}

#[async_trait]
impl Page for SlowPage {
    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("slow:init");
        std::future::pending::<PageResult<()>>().await
    }

    async fn on_navigating_from(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("slow:leaving");
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("slow:dispose");
        Ok(())
    }
}

pub struct FailingInitPage {
    probe: Arc<Probe>,
}

#[async_trait]
impl Page for FailingInitPage {
    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        Err(PageError::MissingParameter("id".to_string()))
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("failing:dispose");
        Ok(())
    }
}

/// Back-reference from pages to the navigator that drives them.
#[derive(Default)]
pub struct NavigatorSlot(OnceLock<Weak<Navigator>>);

impl NavigatorSlot {
    pub fn get(&self) -> Option<Arc<Navigator>> {
        self.0.get().and_then(Weak::upgrade)
    }

    pub fn set(&self, navigator: &Arc<Navigator>) {
        let _ = self.0.set(Arc::downgrade(navigator));
    }
}

/// Tries to navigate away while it is still initializing.
pub struct ReentrantPage {
    probe: Arc<Probe>,
    slot: Arc<NavigatorSlot>,
}

#[async_trait]
impl Page for ReentrantPage {
    async fn initialize(&self, cancel: &CancellationToken) -> PageResult<()> {
        let Some(navigator) = self.slot.get() else {
            return Err(PageError::Failed("navigator not wired".to_string()));
        };
        match navigator.navigate_to::<PageA>(None, cancel).await {
            Err(NavigationError::ReentrantNavigation { .. }) => {
                self.probe.record("reentrant:rejected")
            }
            Err(other) => self.probe.record(format!("reentrant:other {other}")),
            Ok(_) => self.probe.record("reentrant:accepted"),
        }
        Ok(())
    }
}

/// Tries to navigate elsewhere while being torn down.
pub struct LeavingPage {
    probe: Arc<Probe>,
    slot: Arc<NavigatorSlot>,
}

#[async_trait]
impl Page for LeavingPage {
    async fn on_navigating_from(&self, cancel: &CancellationToken) -> PageResult<()> {
        let Some(navigator) = self.slot.get() else {
            return Err(PageError::Failed("navigator not wired".to_string()));
        };
        match navigator.navigate_to::<PageB>(None, cancel).await {
            Err(NavigationError::ReentrantNavigation { .. }) => {
                self.probe.record("leaving:rejected")
            }
            Err(other) => self.probe.record(format!("leaving:other {other}")),
            Ok(_) => self.probe.record("leaving:accepted"),
        }
        Ok(())
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        self.probe.record("leaving:dispose");
        Ok(())
    }
}

/// A second navigator, driven by `HostPage` from inside its own hooks.
#[derive(Default)]
pub struct InnerNavigator(OnceLock<Arc<Navigator>>);

impl InnerNavigator {
    pub fn get(&self) -> Option<Arc<Navigator>> {
        self.0.get().cloned()
    }

    pub fn set(&self, navigator: Arc<Navigator>) {
        let _ = self.0.set(navigator);
    }
}

/// Opens a page on the inner navigator when initialized and shuts the inner
/// navigator down when disposed.
pub struct HostPage {
    probe: Arc<Probe>,
    inner: Arc<InnerNavigator>,
}

#[async_trait]
impl Page for HostPage {
    async fn initialize(&self, cancel: &CancellationToken) -> PageResult<()> {
        let Some(inner) = self.inner.get() else {
            return Err(PageError::Failed("inner navigator not wired".to_string()));
        };
        match inner.navigate_to::<PageA>(None, cancel).await {
            Ok(_) => self.probe.record("host:inner-opened"),
            Err(e) => self.probe.record(format!("host:inner-failed {e}")),
        }
        Ok(())
    }

    async fn dispose(&self, cancel: &CancellationToken) -> PageResult<()> {
        if let Some(inner) = self.inner.get() {
            inner.shutdown(cancel).await;
        }
        self.probe.record("host:dispose");
        Ok(())
    }
}

pub fn services(probe: &Arc<Probe>) -> ServiceCollection {
    let mut services = ServiceCollection::new();
    services
        .add_trait_singleton::<Probe>(probe.clone())
        .add_singleton(NavigatorSlot::default())
        .add_page::<PageA, _>(ROUTE_A, Lifetime::Transient, |registry| {
            Ok(PageA {
                probe: registry.resolve::<Probe>()?,
                initialized: AtomicBool::new(false),
            })
        })
        .add_page::<PageB, _>(ROUTE_B, Lifetime::Transient, |registry| {
            Ok(PageB {
                probe: registry.resolve::<Probe>()?,
                received: Mutex::new(Vec::new()),
            })
        })
        .add_transient_factory::<Unrouted, _>(|_| Ok(Unrouted))
        .add_page::<BrokenPage, _>(Route::new("/broken"), Lifetime::Transient, |_| {
            Err("database offline".into())
        })
        .add_page::<StubbornPage, _>(Route::new("/stubborn"), Lifetime::Transient, |registry| {
            Ok(StubbornPage {
                probe: registry.resolve::<Probe>()?,
            })
        })
        .add_page::<HangingPage, _>(Route::new("/hanging"), Lifetime::Transient, |registry| {
            Ok(HangingPage {
                probe: registry.resolve::<Probe>()?,
            })
        })
        .add_page::<SlowPage, _>(Route::new("/slow"), Lifetime::Transient, |registry| {
            Ok(SlowPage {
                probe: registry.resolve::<Probe>()?,
            })
        })
        .add_page::<FailingInitPage, _>(Route::new("/failing"), Lifetime::Transient, |registry| {
            Ok(FailingInitPage {
                probe: registry.resolve::<Probe>()?,
            })
        })
        .add_page::<ReentrantPage, _>(Route::new("/reentrant"), Lifetime::Transient, |registry| {
            Ok(ReentrantPage {
                probe: registry.resolve::<Probe>()?,
                slot: registry.resolve::<NavigatorSlot>()?,
            })
        })
        .add_page::<LeavingPage, _>(Route::new("/leaving"), Lifetime::Transient, |registry| {
            Ok(LeavingPage {
                probe: registry.resolve::<Probe>()?,
                slot: registry.resolve::<NavigatorSlot>()?,
            })
        })
        .add_singleton(InnerNavigator::default())
        .add_page::<HostPage, _>(Route::new("/host"), Lifetime::Transient, |registry| {
            Ok(HostPage {
                probe: registry.resolve::<Probe>()?,
                inner: registry.resolve::<InnerNavigator>()?,
            })
        });
    services
}

pub fn navigator_with(probe: &Arc<Probe>, config: NavigatorConfig) -> Arc<Navigator> {
    let registry = Arc::new(services(probe).build());
    let navigator = Arc::new(Navigator::new(registry.clone(), config));
    if let Ok(slot) = registry.resolve::<NavigatorSlot>() {
        slot.set(&navigator);
    }
    navigator
}

pub fn navigator(probe: &Arc<Probe>) -> Arc<Navigator> {
    navigator_with(probe, NavigatorConfig::default())
}

/// Subscribe a listener that keeps every event it receives.
pub fn record_events(navigator: &Navigator) -> Arc<Mutex<Vec<NavigationEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    navigator
        .subscribe(move |event: &NavigationEvent| sink.lock().unwrap().push(event.clone()))
        .unwrap();
    events
}
