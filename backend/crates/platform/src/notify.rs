//! Notification Gateway
//!
//! Transactional messages (registration confirmation, password change) are
//! best-effort. The triggering operation commits first, then hands the message
//! to [`dispatch`], which delivers it on its own task under a deadline. A
//! failure or timeout is logged there and goes no further.
//!
//! Concrete transports implement [`Notifier`]. [`LogNotifier`] is the local
//! default: it logs the envelope and reports success.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

/// One outbound message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The transport refused the message
    #[error("delivery rejected: {0}")]
    Rejected(String),

    /// The transport did not answer in time
    #[error("delivery timed out after {0:?}")]
    TimedOut(Duration),

    /// Connection or protocol failure
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Delivery contract
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Logs the envelope instead of delivering it.
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Notification logged (no transport configured)"
        );
        Ok(())
    }
}

/// Deliver `notification` on a spawned task, bounded by `timeout`.
///
/// Returns immediately. The handle is only useful to tests and shutdown
/// code; request paths drop it.
pub fn dispatch<N>(notifier: Arc<N>, notification: Notification, timeout: Duration) -> JoinHandle<()>
where
    N: Notifier + Sync + 'static,
{
    tokio::spawn(async move {
        let delivery = Notifier::send(notifier.as_ref(), &notification);
        let outcome = match tokio::time::timeout(timeout, delivery).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::TimedOut(timeout)),
        };

        match outcome {
            Ok(()) => tracing::debug!(
                to = %notification.to,
                subject = %notification.subject,
                "Notification delivered"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                to = %notification.to,
                subject = %notification.subject,
                "Notification failed, not retried"
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<Notification>>);

    impl Notifier for Recording {
        async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.0.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    struct Failing;

    impl Notifier for Failing {
        async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected("mailbox full".to_string()))
        }
    }

    struct Hanging;

    impl Notifier for Hanging {
        async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn message() -> Notification {
        Notification::new("bob@x.com", "Welcome", "Hello bob")
    }

    #[tokio::test]
    async fn test_dispatch_delivers() {
        let notifier = Arc::new(Recording::default());
        dispatch(notifier.clone(), message(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(notifier.0.lock().unwrap().as_slice(), &[message()]);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failure() {
        let handle = dispatch(Arc::new(Failing), message(), Duration::from_secs(1));
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_bounds_slow_transport() {
        let started = std::time::Instant::now();
        let handle = dispatch(Arc::new(Hanging), message(), Duration::from_millis(20));
        assert!(handle.await.is_ok());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_log_notifier_succeeds() {
        assert!(Notifier::send(&LogNotifier, &message()).await.is_ok());
    }
}
