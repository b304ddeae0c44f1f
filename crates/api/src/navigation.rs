use crate::lifecycle::{AsAny, Page};
use crate::route::Route;
use std::fmt;
use std::sync::Arc;

/// Announces that `page` is now the current page.
#[derive(Clone)]
pub struct NavigationEvent {
    pub page: Arc<dyn Page>,
    pub route: Route,
}

impl NavigationEvent {
    pub fn new(page: Arc<dyn Page>, route: Route) -> Self {
        Self { page, route }
    }

    /// Borrow the page as its concrete type.
    pub fn page_as<P: Page>(&self) -> Option<&P> {
        AsAny::as_any(&*self.page).downcast_ref::<P>()
    }

    /// True when the event carries exactly this page instance.
    pub fn is_page<P: Page>(&self, page: &Arc<P>) -> bool {
        self.page_as::<P>()
            .is_some_and(|current| std::ptr::eq(current, Arc::as_ptr(page)))
    }
}

impl fmt::Debug for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationEvent")
            .field("route", &self.route)
            .field("page", &self.page.type_name())
            .finish()
    }
}

/// The single subscriber of a navigator, normally the hosting shell.
pub trait NavigationListener: Send + Sync {
    fn on_navigated(&self, event: &NavigationEvent);
}

impl<F> NavigationListener for F
where
    F: Fn(&NavigationEvent) + Send + Sync,
{
    fn on_navigated(&self, event: &NavigationEvent) {
        self(event)
    }
}
