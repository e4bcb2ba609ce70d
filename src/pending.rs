use tokio::sync::oneshot;

/// Creates a linked completer/pending pair for one asynchronous value.
pub fn pair<T>() -> (Completer<T>, Pending<T>) {
    let (sender, receiver) = oneshot::channel();
    (Completer { sender }, Pending { receiver })
}

/// Producing half of a pending operation, held by the transport.
///
/// Completing consumes the completer, so a value is delivered at most once.
pub struct Completer<T> {
    sender: oneshot::Sender<T>,
}

impl<T> Completer<T> {
    /// Delivers the value. Returns it back if the pending half is gone.
    pub fn complete(self, value: T) -> Result<(), T> {
        self.sender.send(value)
    }
}

/// A single asynchronous value that is not available yet.
pub struct Pending<T> {
    receiver: oneshot::Receiver<T>,
}

impl<T> Pending<T> {
    /// A pending operation that already holds its value.
    pub fn ready(value: T) -> Self {
        let (completer, pending) = pair();
        // the receiving half is alive right here, the send cannot fail
        let _ = completer.complete(value);
        pending
    }

    /// Waits for the value. Consuming `self` ties whatever runs next to a
    /// single resolution.
    pub async fn resolved(self) -> Result<T, LostNotification> {
        self.receiver.await.map_err(|_| LostNotification)
    }
}

/// The completing half was dropped before a value was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LostNotification;
