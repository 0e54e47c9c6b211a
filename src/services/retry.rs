use crate::models::error::AppError;
use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use std::future::Future;

/// Retries an async read with exponential backoff for rate-limited requests.
///
/// # Arguments
///
/// * `operation` - A closure that returns a Future resolving to `Result<T, AppError>`
/// * `max_attempts` - Maximum number of retry attempts
///
/// # Behavior
///
/// - Initial delay: 100ms
/// - Backoff multiplier: 5x (100ms → 500ms → 2500ms → ...)
/// - Only retries on `AppError::RateLimited`
/// - All other errors immediately propagate
///
/// Never wrap station creation in this: the endpoint is not idempotent.
pub async fn retry_with_backoff<F, Fut, T>(
    mut operation: F,
    max_attempts: u32,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut delay_ms = 100;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(AppError::RateLimited) if attempt < max_attempts => {
                gloo::console::warn!(&format!(
                    "Rate limited, retrying in {}ms (attempt {}/{})",
                    delay_ms, attempt, max_attempts
                ));
                TimeoutFuture::new(delay_ms).await;
                delay_ms *= 5;
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::RateLimited)
}

/// Resolves to `AppError::Timeout` if `operation` has not settled within `timeout_ms`.
///
/// The pending request is dropped on expiry, which aborts it in the browser.
pub async fn with_timeout<Fut, T>(operation: Fut, timeout_ms: u32) -> Result<T, AppError>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    with_deadline(operation, TimeoutFuture::new(timeout_ms), timeout_ms).await
}

/// Races `operation` against `deadline`; a deadline that fires first yields
/// `AppError::Timeout(timeout_ms)`.
pub async fn with_deadline<Fut, D, T>(
    operation: Fut,
    deadline: D,
    timeout_ms: u32,
) -> Result<T, AppError>
where
    Fut: Future<Output = Result<T, AppError>>,
    D: Future<Output = ()>,
{
    let operation = std::pin::pin!(operation);
    let deadline = std::pin::pin!(deadline);
    match select(operation, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(AppError::Timeout(timeout_ms)),
    }
}
