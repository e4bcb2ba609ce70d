//! Client for invoking long-running remote actions over a two-phase
//! acknowledgement: a submitted goal is first accepted or rejected, and an
//! accepted goal later yields exactly one terminal result.

pub mod builder;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod pending;
pub mod rotate;
pub mod transport;

pub use builder::ClientBuilder;
pub use client::{ActionClient, InvocationOutcome, Phase};
pub use endpoint::{EndpointBehavior, LocalEndpoint, LocalTransport, Verdict};
pub use error::{Error, Result, Stage};
pub use pending::{Completer, LostNotification, Pending};
pub use rotate::RotationGoal;
pub use transport::{ActionTransport, EndpointAddress, GoalHandle, GoalId};
