pub mod config;
pub mod error;
pub mod logging;
pub mod navigator;
pub mod notifier;
pub mod registry;
pub mod store;

pub use config::{InitializePolicy, LoggingConfig, NavigatorConfig, ShellConfig};
pub use error::{ConfigError, Result};
pub use navigator::{ListenerHandle, Navigator, NavigatorState};
pub use notifier::TracingNotifier;
pub use registry::{Lifetime, PageRoute, ServiceCollection, ServiceRegistry};
pub use store::InMemoryRecordStore;
