use ahon_api::{Notifier, ToastLevel};

/// Notifier for headless shells: every toast becomes a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: ToastLevel, title: &str, message: &str) {
        match level {
            ToastLevel::Info | ToastLevel::Success => {
                tracing::info!(target: "ahon::toast", "{}: {}", title, message)
            }
            ToastLevel::Warning => tracing::warn!(target: "ahon::toast", "{}: {}", title, message),
            ToastLevel::Error => tracing::error!(target: "ahon::toast", "{}: {}", title, message),
        }
    }
}
