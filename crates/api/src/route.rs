use std::fmt;

/// Stable label attached to a page type at registration time.
///
/// Routes are carried in navigation notifications for display; pages are
/// never looked up by route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route(&'static str);

impl Route {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        self.0
    }
}
