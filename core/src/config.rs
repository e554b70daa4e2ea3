//! Controller configuration.

use serde::{Deserialize, Serialize};

/// Collection endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// What a failed load does to the loading flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Clear the loading flag and record the error. A later load may retry.
    #[default]
    Reset,

    /// Leave the loading flag set and the list untouched. Further loads are
    /// ignored for the lifetime of the controller.
    KeepLoading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub base_url: String,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl ControllerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
