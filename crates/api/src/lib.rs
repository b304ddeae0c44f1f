pub mod error;
pub mod lifecycle;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod params;
pub mod route;
pub mod store;

// Re-export commonly used types
pub use error::{
    BoxError, NavigationError, NavigationResult, PageError, PageResult, RegistryError,
    RegistryResult,
};
pub use lifecycle::{AsAny, Page, ParameterSink};
pub use models::*;
pub use navigation::{NavigationEvent, NavigationListener};
pub use notify::{Notifier, ToastLevel};
pub use params::NavigationParameters;
pub use route::Route;
pub use store::RecordStore;

pub use tokio_util::sync::CancellationToken;
