use super::lock;
use ahon_api::{CancellationToken, NavigationParameters, Page, PageResult, ParameterSink};
use async_trait::async_trait;
use std::sync::Mutex;

/// Entry page. Only remembers the `username` it was opened with; credentials
/// are checked elsewhere.
#[derive(Default)]
pub struct LoginPage {
    username: Mutex<Option<String>>,
}

impl LoginPage {
    pub fn username(&self) -> Option<String> {
        lock(&self.username).clone()
    }
}

impl ParameterSink for LoginPage {
    fn set_parameters(&self, parameters: NavigationParameters) {
        *lock(&self.username) = parameters.get_str("username").map(str::to_string);
    }
}

#[async_trait]
impl Page for LoginPage {
    fn parameters(&self) -> Option<&dyn ParameterSink> {
        Some(self)
    }

    async fn dispose(&self, _cancel: &CancellationToken) -> PageResult<()> {
        lock(&self.username).take();
        Ok(())
    }
}
