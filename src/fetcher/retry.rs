//! Attempt loop with exponential backoff.
//!
//! Every failure is retried: transport errors, timeouts, error statuses and
//! undecodable bodies all go through the same policy, and only the message
//! differs. The wait after failed attempt `i` is
//! [`FetchOptions::delay_for_attempt(i)`](crate::FetchOptions::delay_for_attempt).

use std::future::Future;

use tracing::{debug, warn};

use crate::telemetry;
use crate::types::FetchOptions;
use crate::{HuginnError, Result};

/// Run `f` up to `options.max_attempts()` times, sleeping between failures.
///
/// `f` receives the 0-based attempt index. Returns the first success, or
/// the error of the final attempt.
pub(crate) async fn with_backoff<F, Fut, T>(
    options: &FetchOptions,
    identity: &str,
    mut f: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = options.max_attempts();
    let mut last_err = None;
    for attempt in 0..max_attempts {
        metrics::counter!(telemetry::ATTEMPTS_TOTAL).increment(1);
        debug!(identity, attempt = attempt + 1, max_attempts, "sending request");
        match f(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt + 1 < max_attempts {
                    let delay = options.delay_for_attempt(attempt);
                    metrics::counter!(telemetry::RETRIES_TOTAL, "reason" => failure_reason(&e))
                        .increment(1);
                    warn!(
                        identity,
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after failed attempt"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
        }
    }
    // max_attempts is at least 1, so the loop ran.
    Err(last_err.unwrap_or(HuginnError::Http("no attempt was made".to_string())))
}

/// Metric label for an attempt failure.
pub(crate) fn failure_reason(err: &HuginnError) -> &'static str {
    match err {
        HuginnError::Timeout => "timeout",
        HuginnError::Status { .. } => "status",
        HuginnError::Decode(_) => "decode",
        _ => "transport",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;

    fn options(max_retries: u32) -> FetchOptions {
        FetchOptions::new().max_retries(max_retries)
    }

    #[tokio::test(start_paused = true)]
    async fn waits_double_between_attempts() {
        let start = Instant::now();
        let seen = Mutex::new(Vec::new());

        let result: Result<()> = with_backoff(&options(3), "id", |attempt| {
            seen.lock().unwrap().push((attempt, start.elapsed()));
            async { Err(HuginnError::Timeout) }
        })
        .await;

        assert!(matches!(result, Err(HuginnError::Timeout)));
        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen,
            vec![
                (0, Duration::ZERO),
                (1, Duration::from_millis(500)),
                (2, Duration::from_millis(1500)),
                (3, Duration::from_millis(3500)),
            ]
        );
        // No wait after the final attempt.
        assert_eq!(start.elapsed(), Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_first_success() {
        let calls = Mutex::new(0u32);
        let result = with_backoff(&options(5), "id", |attempt| {
            *calls.lock().unwrap() += 1;
            async move {
                if attempt < 1 {
                    Err(HuginnError::status(502))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let start = Instant::now();
        let calls = Mutex::new(0u32);
        let result: Result<()> = with_backoff(&options(0), "id", |_| {
            *calls.lock().unwrap() += 1;
            async { Err(HuginnError::Http("refused".into())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_last_error() {
        let result: Result<()> = with_backoff(&options(1), "id", |attempt| async move {
            if attempt == 0 {
                Err(HuginnError::Timeout)
            } else {
                Err(HuginnError::status(503))
            }
        })
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP 503: Service Unavailable"
        );
    }

    #[test]
    fn reasons() {
        assert_eq!(failure_reason(&HuginnError::Timeout), "timeout");
        assert_eq!(failure_reason(&HuginnError::status(404)), "status");
        assert_eq!(failure_reason(&HuginnError::Decode("x".into())), "decode");
        assert_eq!(failure_reason(&HuginnError::Http("x".into())), "transport");
    }
}
