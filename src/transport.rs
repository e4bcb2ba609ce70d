use std::fmt;

use crate::pending::Pending;

/// Qualified location of an action endpoint: a namespace plus the action it
/// serves. Always passed explicitly, never read from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAddress {
    namespace: String,
    action: String,
}

impl EndpointAddress {
    pub fn new(namespace: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            action: action.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.action)
    }
}

/// Identity the remote side assigns to a submitted goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoalId(u64);

impl GoalId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Resolution of a goal submission: either the capability to claim the
/// eventual result, or a plain refusal that carries no further capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalHandle {
    id: GoalId,
    accepted: bool,
}

impl GoalHandle {
    pub fn accepted(id: GoalId) -> Self {
        Self { id, accepted: true }
    }

    pub fn rejected(id: GoalId) -> Self {
        Self {
            id,
            accepted: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn id(&self) -> GoalId {
        self.id
    }
}

/// Asynchronous notification contract the invocation client consumes.
///
/// Every method hands back a [`Pending`] that the transport completes at most
/// once; the transport never calls back into the client.
pub trait ActionTransport {
    type Goal;
    type Result: Send + 'static;

    /// Resolves once the endpoint is reachable. There is no inherent
    /// deadline; the caller decides whether to bound the wait.
    fn wait_for_endpoint(&mut self) -> Pending<()>;

    /// Submits the goal payload. Resolves when the remote side has decided
    /// to accept or reject it.
    fn send_goal(&mut self, goal: Self::Goal) -> Pending<GoalHandle>;

    /// Claims the terminal result of an accepted goal. Must only be called
    /// with a handle whose submission was accepted.
    fn request_result(&mut self, handle: GoalHandle) -> Pending<Self::Result>;

    /// Tears down the association. No notification completes afterwards.
    fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_namespace_qualified() {
        let addr = EndpointAddress::new("turtle1", "rotate_angle");
        assert_eq!(addr.to_string(), "turtle1/rotate_angle");
        assert_eq!(addr.namespace(), "turtle1");
        assert_eq!(addr.action(), "rotate_angle");
    }

    #[test]
    fn rejected_handle_keeps_its_identity() {
        let handle = GoalHandle::rejected(GoalId::new(3));
        assert!(!handle.is_accepted());
        assert_eq!(handle.id(), GoalId::new(3));
    }
}
