use std::{fmt::Display, future::Future, time::Duration};

use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum Backoff {
    /// Same wait after every failure.
    Constant { interval: Duration, max_tries: u32 },
    /// `base`, then doubling after every failure.
    Exponential { base: Duration, max_tries: u32 },
}

impl Backoff {
    pub fn max_tries(&self) -> u32 {
        match self {
            Backoff::Constant { max_tries, .. } => *max_tries,
            Backoff::Exponential { max_tries, .. } => *max_tries,
        }
    }

    /// Wait before the next try, after `attempt` (1-based) has failed.
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Constant { interval, .. } => *interval,
            Backoff::Exponential { base, .. } => {
                *base * 2u32.saturating_pow(attempt.saturating_sub(1))
            }
        }
    }
}

/// Why a single try failed.
#[derive(Debug)]
pub enum Attempt<E> {
    Retry(E),
    Stop(E),
}

pub async fn retry<T, E, F, Fut>(backoff: &Backoff, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Attempt<E>>>,
    E: Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(Attempt::Stop(error)) => return Err(error),
            Err(Attempt::Retry(error)) if attempt >= backoff.max_tries() => return Err(error),
            Err(Attempt::Retry(error)) => {
                let delay = backoff.delay(attempt);
                debug!(
                    "Attempt {} failed: {}, retrying in {:?}",
                    attempt, error, delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    const NO_WAIT: Duration = Duration::ZERO;

    #[test]
    fn exponential_delays_double() {
        let backoff = Backoff::Exponential {
            base: Duration::from_secs(1),
            max_tries: 5,
        };

        let delays: Vec<u64> = (1..5).map(|n| backoff.delay(n).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8]);
    }

    #[test]
    fn constant_delays_repeat() {
        let backoff = Backoff::Constant {
            interval: Duration::from_secs(10),
            max_tries: 2,
        };

        assert_eq!(backoff.delay(1), Duration::from_secs(10));
        assert_eq!(backoff.delay(7), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn gives_up_after_max_tries() {
        let tries = &AtomicU32::new(0);
        let backoff = Backoff::Exponential {
            base: NO_WAIT,
            max_tries: 5,
        };

        let result: Result<(), String> = retry(&backoff, move || async move {
            tries.fetch_add(1, Ordering::SeqCst);
            Err(Attempt::Retry("throttled".to_string()))
        })
        .await;

        assert_eq!(result, Err("throttled".to_string()));
        assert_eq!(tries.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn stops_immediately() {
        let tries = &AtomicU32::new(0);
        let backoff = Backoff::Constant {
            interval: NO_WAIT,
            max_tries: 2,
        };

        let result: Result<(), String> = retry(&backoff, move || async move {
            tries.fetch_add(1, Ordering::SeqCst);
            Err(Attempt::Stop("missing".to_string()))
        })
        .await;

        assert_eq!(result, Err("missing".to_string()));
        assert_eq!(tries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_after_a_failure() {
        let tries = &AtomicU32::new(0);
        let backoff = Backoff::Constant {
            interval: NO_WAIT,
            max_tries: 2,
        };

        let result = retry(&backoff, move || async move {
            match tries.fetch_add(1, Ordering::SeqCst) {
                0 => Err(Attempt::Retry("flaky".to_string())),
                n => Ok(n),
            }
        })
        .await;

        assert_eq!(result, Ok(1));
    }
}
