//! Control flow for time-bounded query execution.

use std::future::Future;

use tokio::time::{self, Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, QueryError, Result, TimeoutError};

/// A single-use execution scope bounding one remote call.
///
/// A scope pairs the call deadline with a cancellation signal that the
/// channel observes through [`ScopeSignal`]. Scopes are acquired fresh per
/// call and never reused. Release is idempotent and also runs on drop, so no
/// exit path can leak an armed scope.
#[derive(Debug)]
pub struct QueryScope {
    timeout: Duration,
    deadline: Instant,
    token: CancellationToken,
}

impl QueryScope {
    /// Acquire a fresh scope with a deadline of now + `timeout`.
    pub fn acquire(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: Instant::now() + timeout,
            token: CancellationToken::new(),
        }
    }

    /// The instant at which the scope expires.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// The cancellation signal handed to the channel call.
    pub fn signal(&self) -> ScopeSignal {
        ScopeSignal {
            token: self.token.clone(),
        }
    }

    /// Release the scope, aborting the remote call if one is still in
    /// flight. Safe to invoke any number of times.
    pub fn release(&self) {
        self.token.cancel();
    }

    /// Whether the scope has been released.
    pub fn is_released(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive one channel call to completion under this scope.
    ///
    /// The scope is released on every path out of this function: response
    /// received, channel error, or elapsed deadline.
    pub(crate) async fn enter<T, E>(
        self,
        fut: impl Future<Output = std::result::Result<T, E>>,
    ) -> Result<T>
    where
        E: std::fmt::Display,
    {
        let outcome = time::timeout_at(self.deadline, fut).await;
        self.release();
        match outcome {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => {
                Err(Error::Query(QueryError::NoResponse(err.to_string())))
            }
            Err(_) => Err(Error::Timeout(TimeoutError {
                timeout: self.timeout,
            })),
        }
    }
}

impl Drop for QueryScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// The observing half of a [`QueryScope`], passed to channel calls.
///
/// Channel implementations should abandon in-flight work once the signal
/// fires; the owning scope fires it when its deadline elapses or it is
/// released early.
#[derive(Clone, Debug)]
pub struct ScopeSignal {
    token: CancellationToken,
}

impl ScopeSignal {
    /// Completes when the owning scope is released.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Whether the owning scope has been released.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let scope = QueryScope::acquire(Duration::from_secs(5));
        let signal = scope.signal();
        scope.release();
        scope.release();
        assert!(scope.is_released());
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_drop_releases() {
        let scope = QueryScope::acquire(Duration::from_secs(5));
        let signal = scope.signal();
        drop(scope);
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_enter_releases_on_success() {
        let scope = QueryScope::acquire(Duration::from_secs(5));
        let signal = scope.signal();
        let res = scope
            .enter(async { Ok::<_, std::io::Error>(42_u8) })
            .await
            .unwrap();
        assert_eq!(res, 42);
        assert!(signal.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_times_out() {
        let scope = QueryScope::acquire(Duration::from_secs(1));
        let signal = scope.signal();
        let res: Result<u8> = scope
            .enter(async {
                time::sleep(Duration::from_secs(60)).await;
                Ok::<_, std::io::Error>(0)
            })
            .await;
        assert_matches!(
            res,
            Err(Error::Timeout(TimeoutError { timeout }))
                if timeout == Duration::from_secs(1)
        );
        assert!(signal.is_cancelled());
    }
}
