use std::time::Duration;

use crate::client::ActionClient;
use crate::transport::ActionTransport;

/// Assembles an [`ActionClient`] together with its wait policy.
///
/// Deadlines are opt-in. An unset deadline preserves the indefinite wait of
/// the underlying protocol.
pub struct ClientBuilder<T> {
    transport: T,
    endpoint_timeout: Option<Duration>,
    result_timeout: Option<Duration>,
}

impl<T> ClientBuilder<T>
where
    T: ActionTransport,
{
    pub(crate) fn new(transport: T) -> Self {
        Self {
            transport,
            endpoint_timeout: None,
            result_timeout: None,
        }
    }

    /// Upper bound on the endpoint readiness wait.
    pub fn endpoint_timeout(mut self, limit: Duration) -> Self {
        self.endpoint_timeout = Some(limit);
        self
    }

    /// Upper bound on the terminal result wait of an accepted goal.
    pub fn result_timeout(mut self, limit: Duration) -> Self {
        self.result_timeout = Some(limit);
        self
    }

    pub fn build(self) -> ActionClient<T> {
        ActionClient::from_parts(self.transport, self.endpoint_timeout, self.result_timeout)
    }
}
