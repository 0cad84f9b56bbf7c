//! The generic adapter between a raw form submission and a typed,
//! validated business operation.

use std::future::Future;

use crate::errors::AppError;
use crate::schema::Schema;

use super::types::{ActionResult, FormData, Outcome};

/// Validate `form` against `schema`, run `handler` on the typed input,
/// and normalize the outcome into an [`ActionResult`].
///
/// Validation failures short-circuit: the handler is never invoked and
/// nothing is logged (they are expected, low-severity input mistakes).
/// A handler failure produces exactly one structured log entry and the
/// error's user-safe message; raw error text never leaves this function.
pub async fn run_action<S, F, Fut, T>(
    name: &str,
    schema: &S,
    form: &FormData,
    handler: F,
) -> ActionResult<T>
where
    S: Schema,
    F: FnOnce(S::Output) -> Fut,
    Fut: Future<Output = Result<Outcome<T>, AppError>>,
{
    let input = match schema.validate(form) {
        Ok(input) => input,
        Err(err) => return ActionResult::err(err.first_message()),
    };

    match handler(input).await {
        Ok(outcome) => ActionResult::ok(outcome.data, outcome.message),
        Err(err) => {
            tracing::error!(
                action = name,
                severity = ?err.severity(),
                detail = %err.serialize(),
                "action handler failed"
            );
            ActionResult::err(err.user_message())
        }
    }
}

/// Variant for flows that must resolve to a redirect URL (OAuth start).
/// Adds logging around the handler but rethrows on failure so the caller
/// can propagate it to a page-level redirect mechanism.
pub async fn run_redirect_action<F, Fut>(name: &str, handler: F) -> Result<String, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, AppError>>,
{
    match handler().await {
        Ok(url) => {
            tracing::debug!(action = name, "redirect action resolved");
            Ok(url)
        }
        Err(err) => {
            tracing::error!(
                action = name,
                severity = ?err.severity(),
                detail = %err.serialize(),
                "redirect action failed"
            );
            Err(err)
        }
    }
}
