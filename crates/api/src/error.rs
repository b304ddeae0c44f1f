use crate::route::Route;

/// Boxed error used at factory and collaborator boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service registry failures.
///
/// All of these indicate a wiring bug rather than a runtime condition and are
/// meant to be surfaced immediately.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No registration for type {type_name}")]
    UnregisteredType { type_name: &'static str },
    #[error("Failed to construct {type_name}: {source}")]
    Construction {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("Circular dependency detected while resolving {type_name}")]
    CircularDependency { type_name: &'static str },
    #[error("Registered instance for {type_name} has an unexpected type")]
    TypeMismatch { type_name: &'static str },
}

/// Errors raised by a page's own lifecycle hooks.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),
    #[error("Invalid parameter {key}: {reason}")]
    InvalidParameter { key: String, reason: String },
    #[error("Service error: {0}")]
    Service(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Page type {type_name} has no route metadata")]
    InvalidPageType { type_name: &'static str },
    #[error("Failed to resolve page {type_name}: {source}")]
    PageResolution {
        type_name: &'static str,
        #[source]
        source: RegistryError,
    },
    #[error("A navigation listener is already registered")]
    ListenerAlreadyRegistered,
    #[error("Navigation to {type_name} requested from inside a running transition")]
    ReentrantNavigation { type_name: &'static str },
    #[error("Navigation to {route} was cancelled")]
    Cancelled { route: Route },
    #[error("Page {route} failed to initialize: {source}")]
    Initialization {
        route: Route,
        #[source]
        source: PageError,
    },
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
pub type PageResult<T> = std::result::Result<T, PageError>;
pub type NavigationResult<T> = std::result::Result<T, NavigationError>;
