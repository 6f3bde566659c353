// handlers/mod.rs - Two security tiers
//
// Public (no session required) → Protected (session required, see middleware::require_login)
pub mod protected;
pub mod public;

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::forms::{FieldErrors, FormError};

/// Turn a failed form submission into a response: field errors re-render the page,
/// storage failures become an [`ApiError`].
pub(crate) fn rejected<R>(err: FormError, rerender: impl FnOnce(FieldErrors) -> R) -> Result<Response, ApiError>
where
    R: IntoResponse,
{
    match err {
        FormError::Invalid(errors) => {
            tracing::debug!("Form rejected: {:?}", errors);
            Ok(rerender(errors).into_response())
        }
        FormError::Store(e) => Err(e.into()),
    }
}
