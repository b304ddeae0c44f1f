use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Toast/notification surface of the hosting shell.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: ToastLevel, title: &str, message: &str);
}
