//! Settings for a `TodoStore`: the controller config plus HTTP timeouts.

use std::time::Duration;

use todo_core::ControllerConfig;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub controller: ControllerConfig,
    /// Upper bound on one fetch, connect through body.
    pub request_timeout: Duration,
}

impl RuntimeConfig {
    pub fn new(controller: ControllerConfig) -> Self {
        Self {
            controller,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
