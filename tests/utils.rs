use std::sync::{Arc, Mutex};

use mandatum::pending::{Completer, Pending, pair};
use mandatum::{ActionTransport, GoalHandle, GoalId, RotationGoal};

pub const STANDARD_QUEUE_SIZE: usize = 16;

/// Transport interactions in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    WaitForEndpoint,
    SendGoal,
    RequestResult,
    Shutdown,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Transport whose notifications are scripted up front.
///
/// Waits the script leaves open park their completer here, so they stay
/// pending instead of resolving as lost. Calls the script forbids panic.
pub struct ScriptedTransport {
    calls: CallLog,
    endpoint: Option<Pending<()>>,
    acceptance: Option<Pending<GoalHandle>>,
    result: Option<Pending<String>>,
    parked_endpoint: Option<Completer<()>>,
    parked_result: Option<Completer<String>>,
}

impl ScriptedTransport {
    fn empty() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            endpoint: None,
            acceptance: None,
            result: None,
            parked_endpoint: None,
            parked_result: None,
        }
    }

    /// Ready endpoint, accepted goal, result delivered immediately.
    pub fn accepting(result: &str) -> Self {
        let mut transport = Self::empty();
        transport.endpoint = Some(Pending::ready(()));
        transport.acceptance = Some(Pending::ready(GoalHandle::accepted(GoalId::new(1))));
        transport.result = Some(Pending::ready(result.to_owned()));
        transport
    }

    /// Ready endpoint, goal rejected.
    pub fn rejecting() -> Self {
        let mut transport = Self::empty();
        transport.endpoint = Some(Pending::ready(()));
        transport.acceptance = Some(Pending::ready(GoalHandle::rejected(GoalId::new(1))));
        transport
    }

    /// The endpoint never becomes ready.
    pub fn unreachable() -> Self {
        let mut transport = Self::empty();
        let (completer, pending) = pair();
        transport.parked_endpoint = Some(completer);
        transport.endpoint = Some(pending);
        transport
    }

    /// Accepted goal whose result never arrives.
    pub fn silent_after_accept() -> Self {
        let mut transport = Self::empty();
        transport.endpoint = Some(Pending::ready(()));
        transport.acceptance = Some(Pending::ready(GoalHandle::accepted(GoalId::new(1))));
        let (completer, pending) = pair();
        transport.parked_result = Some(completer);
        transport.result = Some(pending);
        transport
    }

    /// The acceptance notification is dropped mid-flight.
    pub fn dropped_acceptance() -> Self {
        let mut transport = Self::empty();
        transport.endpoint = Some(Pending::ready(()));
        let (completer, pending) = pair();
        drop(completer);
        transport.acceptance = Some(pending);
        transport
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ActionTransport for ScriptedTransport {
    type Goal = RotationGoal;
    type Result = String;

    fn wait_for_endpoint(&mut self) -> Pending<()> {
        self.record(Call::WaitForEndpoint);
        self.endpoint
            .take()
            .expect("endpoint waited on more than once")
    }

    fn send_goal(&mut self, _goal: RotationGoal) -> Pending<GoalHandle> {
        self.record(Call::SendGoal);
        self.acceptance
            .take()
            .expect("goal sent while the script forbids it")
    }

    fn request_result(&mut self, handle: GoalHandle) -> Pending<String> {
        assert!(handle.is_accepted(), "result requested for a rejected goal");
        self.record(Call::RequestResult);
        self.result
            .take()
            .expect("result requested while the script forbids it")
    }

    fn shutdown(&mut self) {
        self.record(Call::Shutdown);
    }
}

/// Quarter turn at the reference speed.
pub fn quarter_turn() -> RotationGoal {
    RotationGoal::new(std::f64::consts::FRAC_PI_2, 0.15)
}
