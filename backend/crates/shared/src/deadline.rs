//! Deadlines for collaborator calls
//!
//! Store calls may suspend on I/O; none may hold a request forever.

use std::future::Future;
use std::time::Duration;

use crate::error::persistence::PersistenceError;

/// Run a store call under `limit`. An elapsed deadline becomes
/// [`PersistenceError::Timeout`]; the inner future is dropped.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, PersistenceError>
where
    F: Future<Output = Result<T, PersistenceError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(PersistenceError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_result_through() {
        let value = bounded(Duration::from_secs(1), async { Ok::<_, PersistenceError>(7) }).await;
        assert_eq!(value.unwrap(), 7);

        let err = bounded(Duration::from_secs(1), async {
            Err::<(), _>(PersistenceError::duplicate("users_user_name_key"))
        })
        .await;
        assert!(matches!(err, Err(PersistenceError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_elapsed_deadline_is_timeout() {
        let result = bounded(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, PersistenceError>(())
        })
        .await;
        assert!(matches!(result, Err(PersistenceError::Timeout(_))));
    }
}
