//! Poll-until-ready: block until a remote resource reaches a target state
//! or a timeout elapses.
//!
//! The probe runs before the first sleep, so a resource that is already in
//! its target state succeeds immediately even with a zero timeout. Elapsed
//! time is accumulated from the nominal sleep intervals rather than a
//! wall-clock delta, so actual wall time can exceed the timeout by up to one
//! query's latency per iteration.

use crate::error::{OpsError, Result};
use std::future::Future;
use std::time::Duration;

/// One observation of a polled resource.
#[derive(Debug, PartialEq)]
pub enum Probe<T> {
    Ready(T),
    /// Not there yet; carries the observed status for logging and for the
    /// timeout error message.
    Pending(String),
}

#[derive(Debug, Clone, Copy)]
pub struct WaitOpts {
    pub timeout: Duration,
    pub interval: Duration,
    /// Interval multiplier applied after each unsuccessful check.
    /// 1.0 keeps the classic fixed-interval poll.
    pub backoff: f64,
    /// Ceiling for the interval once backoff is in play.
    pub max_interval: Duration,
}

impl Default for WaitOpts {
    fn default() -> Self {
        WaitOpts {
            timeout: Duration::from_secs(300),
            interval: Duration::from_secs(5),
            backoff: 1.0,
            max_interval: Duration::from_secs(60),
        }
    }
}

impl WaitOpts {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        WaitOpts {
            timeout,
            interval,
            ..Default::default()
        }
    }

    pub fn with_backoff(mut self, multiplier: f64) -> Self {
        self.backoff = multiplier;
        self
    }
}

fn next_interval(current: Duration, opts: &WaitOpts) -> Duration {
    if opts.backoff > 1.0 {
        current.mul_f64(opts.backoff).min(opts.max_interval)
    } else {
        current
    }
}

/// Poll `probe` until it reports `Ready` or the accumulated interval time
/// reaches `opts.timeout`.
///
/// `what` names the awaited condition for log lines and the timeout error,
/// e.g. `"table 'events' to be ACTIVE"`.
pub async fn until_ready<T, F, Fut>(what: &str, opts: WaitOpts, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe<T>>>,
{
    let mut elapsed = Duration::ZERO;
    let mut interval = opts.interval;
    let mut last = String::from("unknown");

    loop {
        match probe().await? {
            Probe::Ready(value) => {
                tracing::debug!(what, elapsed_secs = elapsed.as_secs(), "ready");
                return Ok(value);
            }
            Probe::Pending(status) => {
                tracing::debug!(what, %status, elapsed_secs = elapsed.as_secs(), "not ready yet");
                last = status;
            }
        }

        if elapsed >= opts.timeout {
            return Err(OpsError::PollTimeout {
                what: what.to_string(),
                waited: elapsed,
                last,
            });
        }

        tokio::time::sleep(interval).await;
        elapsed += interval;
        interval = next_interval(interval, &opts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn already_ready_succeeds_with_zero_timeout() {
        let opts = WaitOpts::new(Duration::ZERO, Duration::from_secs(5));
        let polls = Cell::new(0u32);
        let result = until_ready("status ACTIVE", opts, || {
            polls.set(polls.get() + 1);
            async { Ok(Probe::Ready("ACTIVE")) }
        })
        .await;
        assert_eq!(result.unwrap(), "ACTIVE");
        assert_eq!(polls.get(), 1, "no re-poll after a ready first check");
    }

    #[tokio::test]
    async fn never_ready_times_out_instead_of_crashing() {
        let opts = WaitOpts::new(Duration::from_millis(10), Duration::from_millis(3));
        let result: Result<()> = until_ready("stream to be ACTIVE", opts, || async {
            Ok(Probe::Pending("CREATING".into()))
        })
        .await;
        match result {
            Err(OpsError::PollTimeout { what, last, .. }) => {
                assert_eq!(what, "stream to be ACTIVE");
                assert_eq!(last, "CREATING");
            }
            other => panic!("expected PollTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn becomes_ready_after_a_few_polls() {
        let opts = WaitOpts::new(Duration::from_secs(1), Duration::from_millis(1));
        let polls = Cell::new(0u32);
        let result = until_ready("node to be Ready", opts, || {
            polls.set(polls.get() + 1);
            let n = polls.get();
            async move {
                if n >= 3 {
                    Ok(Probe::Ready(n))
                } else {
                    Ok(Probe::Pending("NotReady".into()))
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn probe_errors_are_fatal_not_retried() {
        let opts = WaitOpts::default();
        let result: Result<()> = until_ready("anything", opts, || async {
            Err(OpsError::remote("describe", "AccessDenied"))
        })
        .await;
        assert!(matches!(result, Err(OpsError::Remote { .. })));
    }

    #[test]
    fn fixed_interval_by_default() {
        let opts = WaitOpts::default();
        let i = Duration::from_secs(5);
        assert_eq!(next_interval(i, &opts), i);
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let opts = WaitOpts {
            interval: Duration::from_secs(5),
            backoff: 2.0,
            max_interval: Duration::from_secs(15),
            ..Default::default()
        };
        let second = next_interval(opts.interval, &opts);
        assert_eq!(second, Duration::from_secs(10));
        let third = next_interval(second, &opts);
        assert_eq!(third, Duration::from_secs(15), "capped at max_interval");
        assert_eq!(next_interval(third, &opts), Duration::from_secs(15));
    }
}
