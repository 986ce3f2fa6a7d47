//! Helpers shared by the user and company services.

use std::fmt::Display;

use tracing::error;

use super::Error;

/// Log an unexpected fault once and replace it with a stable client error.
///
/// Store diagnostics stay in the log; the returned [`Error`] carries only the
/// fixed message built by `into`.
pub(crate) fn logged<E, F>(operation: &'static str, into: F) -> impl FnOnce(E) -> Error
where
    E: Display,
    F: FnOnce() -> Error,
{
    move |cause| {
        error!(operation, error = %cause, "record operation failed");
        into()
    }
}
