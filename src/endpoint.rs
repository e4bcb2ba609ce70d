use std::collections::HashMap;
use std::future::poll_fn;
use std::pin::Pin;
use std::task::Poll;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::pending::{Completer, Pending, pair};
use crate::transport::{ActionTransport, EndpointAddress, GoalHandle, GoalId};

/// Accept-or-decline decision an endpoint takes on every submitted goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

type PinnedGoalTask<R> = Pin<Box<dyn Future<Output = (GoalId, R)> + Send + 'static>>;

/// What an in-process endpoint does with the goals it is offered.
pub trait EndpointBehavior {
    type Goal;
    type Result: Send + 'static;

    /// Decides whether the goal is admissible before any work starts.
    fn review(&mut self, goal: &Self::Goal) -> Verdict;

    /// Produces the unit of work for an accepted goal. Execution begins at
    /// acceptance, not when the result is first claimed.
    fn execute(&mut self, goal: Self::Goal) -> impl Future<Output = Self::Result> + Send + 'static;

    /// Observes every terminal result before it is handed back.
    fn on_result(&mut self, _result: &Self::Result) {}
}

enum Request<G, R> {
    Ready(Completer<()>),
    Goal(G, Completer<GoalHandle>),
    Result(GoalId, Completer<R>),
    Shutdown,
}

/// Transport half of an in-process endpoint pair. Each request travels over
/// a bounded channel to the serve loop, which completes the returned pending
/// operation.
pub struct LocalTransport<G, R> {
    requests: mpsc::Sender<Request<G, R>>,
}

impl<G, R> LocalTransport<G, R> {
    fn enqueue<V>(&self, request: impl FnOnce(Completer<V>) -> Request<G, R>) -> Pending<V> {
        let (completer, pending) = pair();
        // a refused send drops the completer, which surfaces to the caller
        // as a lost notification rather than a hang
        let _ = self.requests.try_send(request(completer));
        pending
    }
}

impl<G, R> ActionTransport for LocalTransport<G, R>
where
    R: Send + 'static,
{
    type Goal = G;
    type Result = R;

    fn wait_for_endpoint(&mut self) -> Pending<()> {
        self.enqueue(Request::Ready)
    }

    fn send_goal(&mut self, goal: G) -> Pending<GoalHandle> {
        self.enqueue(|done| Request::Goal(goal, done))
    }

    fn request_result(&mut self, handle: GoalHandle) -> Pending<R> {
        self.enqueue(|done| Request::Result(handle.id(), done))
    }

    fn shutdown(&mut self) {
        let _ = self.requests.try_send(Request::Shutdown);
    }
}

/// In-process endpoint serving one [`LocalTransport`].
///
/// Readiness coincides with [`LocalEndpoint::serve`] running: requests sent
/// earlier sit in the channel until the loop starts, which is exactly how an
/// absent endpoint behaves from the client's side.
pub struct LocalEndpoint<B: EndpointBehavior> {
    behavior: B,
    address: EndpointAddress,
    requests: mpsc::Receiver<Request<B::Goal, B::Result>>,
    next_goal: u64,
}

impl<B> LocalEndpoint<B>
where
    B: EndpointBehavior,
{
    pub fn new(
        address: EndpointAddress,
        behavior: B,
        queue: usize,
    ) -> (Self, LocalTransport<B::Goal, B::Result>) {
        let (sender, receiver) = mpsc::channel(queue);
        (
            Self {
                behavior,
                address,
                requests: receiver,
                next_goal: 0,
            },
            LocalTransport { requests: sender },
        )
    }

    fn next_goal(&mut self) -> GoalId {
        self.next_goal += 1;
        GoalId::new(self.next_goal)
    }

    /// Serves requests until the transport shuts the association down.
    ///
    /// Accepted goals execute concurrently inside the loop; results finishing
    /// before they are claimed are parked until the claim arrives.
    pub async fn serve(mut self) {
        let mut executing: FuturesUnordered<PinnedGoalTask<B::Result>> = FuturesUnordered::new();
        let mut finished: HashMap<GoalId, B::Result> = HashMap::new();
        let mut claims: HashMap<GoalId, Completer<B::Result>> = HashMap::new();

        loop {
            let next_finished = poll_fn(|cx| {
                if executing.is_empty() {
                    Poll::Pending
                } else {
                    executing.poll_next_unpin(cx)
                }
            });

            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(Request::Ready(done)) => {
                        let _ = done.complete(());
                    }
                    Some(Request::Goal(goal, done)) => {
                        let handle = match self.behavior.review(&goal) {
                            Verdict::Accept => {
                                let id = self.next_goal();
                                trace!(endpoint = %self.address, goal = id.raw(), "goal accepted");
                                let task = self.behavior.execute(goal);
                                executing.push(Box::pin(async move { (id, task.await) }));
                                GoalHandle::accepted(id)
                            }
                            Verdict::Reject => {
                                let id = self.next_goal();
                                trace!(endpoint = %self.address, goal = id.raw(), "goal rejected");
                                GoalHandle::rejected(id)
                            }
                        };
                        let _ = done.complete(handle);
                    }
                    Some(Request::Result(id, done)) => {
                        match finished.remove(&id) {
                            Some(result) => {
                                let _ = done.complete(result);
                            }
                            None => {
                                claims.insert(id, done);
                            }
                        }
                    }
                    Some(Request::Shutdown) => {
                        trace!(endpoint = %self.address, "association shut down");
                        break;
                    }
                    None => {
                        warn!(endpoint = %self.address, "transport dropped without shutdown");
                        break;
                    }
                },
                Some((id, result)) = next_finished => {
                    self.behavior.on_result(&result);
                    match claims.remove(&id) {
                        Some(done) => {
                            let _ = done.complete(result);
                        }
                        None => {
                            finished.insert(id, result);
                        }
                    }
                }
            }
        }
    }
}
