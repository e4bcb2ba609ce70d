use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::builder::ClientBuilder;
use crate::error::{Error, Result, Stage};
use crate::pending::Pending;
use crate::transport::ActionTransport;

/// Phases one invocation passes through. `Rejected` and `Completed` are
/// terminal; nothing runs after either is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    AwaitingEndpoint,
    GoalDispatched,
    Rejected,
    Executing,
    Completed,
}

/// Terminal outcome of one invocation. Rejection is an ordinary ending, not
/// an error, and callers can branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome<R> {
    Completed(R),
    Rejected,
}

impl<R> InvocationOutcome<R> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, InvocationOutcome::Rejected)
    }

    pub fn into_completed(self) -> Option<R> {
        match self {
            InvocationOutcome::Completed(result) => Some(result),
            InvocationOutcome::Rejected => None,
        }
    }
}

/// Drives exactly one goal from submission to its terminal outcome.
///
/// The client owns its transport association for its whole life and shuts it
/// down exactly once, after a terminal phase. One instance, one goal:
/// [`ActionClient::invoke`] consumes the client.
pub struct ActionClient<T> {
    transport: T,
    endpoint_timeout: Option<Duration>,
    result_timeout: Option<Duration>,
    phase: watch::Sender<Phase>,
}

impl<T> ActionClient<T>
where
    T: ActionTransport,
{
    /// A client with no deadlines: both waits suspend indefinitely.
    pub fn new(transport: T) -> Self {
        ClientBuilder::new(transport).build()
    }

    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder::new(transport)
    }

    pub(crate) fn from_parts(
        transport: T,
        endpoint_timeout: Option<Duration>,
        result_timeout: Option<Duration>,
    ) -> Self {
        let (phase, _) = watch::channel(Phase::Init);
        Self {
            transport,
            endpoint_timeout,
            result_timeout,
            phase,
        }
    }

    /// Phase the invocation currently occupies.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Watch handle for observing transitions while `invoke` is in flight.
    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    fn transition(&self, next: Phase) {
        self.phase.send_replace(next);
    }

    /// Submits `goal` and drives the invocation to its terminal outcome.
    ///
    /// Suspends until the endpoint is ready, dispatches the goal, then awaits
    /// the accept/reject decision. A rejected goal ends the invocation
    /// cleanly with [`InvocationOutcome::Rejected`]. An accepted goal waits
    /// for the terminal result. Acceptance always resolves strictly before
    /// the result is claimed, and the transport is shut down exactly once,
    /// never on an error path.
    pub async fn invoke(mut self, goal: T::Goal) -> Result<InvocationOutcome<T::Result>> {
        self.transition(Phase::AwaitingEndpoint);
        info!("waiting for endpoint");
        settle(
            self.transport.wait_for_endpoint(),
            self.endpoint_timeout,
            Stage::Endpoint,
        )
        .await?;

        let acceptance = self.transport.send_goal(goal);
        self.transition(Phase::GoalDispatched);
        info!("goal dispatched");

        let handle = settle(acceptance, None, Stage::Acceptance).await?;
        if !handle.is_accepted() {
            self.transition(Phase::Rejected);
            info!("goal rejected");
            self.transport.shutdown();
            return Ok(InvocationOutcome::Rejected);
        }

        info!(goal = handle.id().raw(), "goal accepted");
        self.transition(Phase::Executing);
        let result = self.transport.request_result(handle);

        let result = settle(result, self.result_timeout, Stage::Result).await?;
        self.transition(Phase::Completed);
        info!("result received");
        self.transport.shutdown();
        Ok(InvocationOutcome::Completed(result))
    }
}

/// Awaits `pending`, honoring an optional deadline. An absent limit keeps the
/// wait unbounded.
async fn settle<V>(pending: Pending<V>, limit: Option<Duration>, stage: Stage) -> Result<V> {
    match limit {
        Some(limit) => match tokio::time::timeout(limit, pending.resolved()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(Error::NotificationLost { stage }),
            Err(_) => Err(Error::DeadlineExceeded { stage, limit }),
        },
        None => pending
            .resolved()
            .await
            .map_err(|_| Error::NotificationLost { stage }),
    }
}
