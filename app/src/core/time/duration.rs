use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    delegate: chrono::Duration,
}

impl Duration {
    pub(super) fn new(delegate: chrono::Duration) -> Self {
        Self { delegate }
    }

    pub(super) fn delegate(&self) -> chrono::Duration {
        self.delegate
    }

    pub fn millis(millis: i64) -> Self {
        Self::new(chrono::Duration::milliseconds(millis))
    }

    pub fn seconds(seconds: i64) -> Self {
        Self::new(chrono::Duration::seconds(seconds))
    }

    pub fn minutes(minutes: i64) -> Self {
        Self::new(chrono::Duration::minutes(minutes))
    }

    pub fn as_secs(&self) -> i64 {
        self.delegate.num_seconds()
    }

    pub fn as_millis(&self) -> i64 {
        self.delegate.num_milliseconds()
    }

    pub fn into_std(self) -> std::time::Duration {
        self.delegate.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate)
    }
}
