use crate::error::PageResult;
use crate::params::NavigationParameters;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Type-erasure helper so pages held as `dyn Page` can be downcast again.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A unit of navigable application logic.
///
/// The navigator drives the lifecycle; pages stay passive:
///
/// 1. `parameters()` sink receives the caller's parameters (if any)
/// 2. `initialize` runs once before the page becomes current
/// 3. `on_navigating_from` is the best-effort pre-teardown hook
/// 4. `dispose` releases resources, exactly once
///
/// Every hook has a no-op default, so a minimal page only implements what it
/// needs. Hooks that never suspend behave like plain synchronous callbacks.
#[async_trait]
pub trait Page: AsAny {
    /// Parameter capability. Pages that accept navigation parameters return
    /// `Some(self)`; parameters sent to other pages are dropped.
    fn parameters(&self) -> Option<&dyn ParameterSink> {
        None
    }

    async fn initialize(&self, _cancel: &CancellationToken) -> PageResult<()> {
        Ok(())
    }

    /// Runs before `dispose` when the page stops being current. Use it to
    /// flush pending edits. Errors are logged by the navigator, never raised.
    async fn on_navigating_from(&self, _cancel: &CancellationToken) -> PageResult<()> {
        Ok(())
    }

    /// Final teardown. Errors are logged by the navigator, never raised.
    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Capability for pages that take navigation parameters.
pub trait ParameterSink: Send + Sync {
    /// Called at most once, before `initialize`, with exactly the mapping the
    /// caller supplied.
    fn set_parameters(&self, parameters: NavigationParameters);
}
