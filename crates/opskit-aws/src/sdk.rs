//! Shared SDK error translation.

// Every aws-sdk-* crate re-exports the same smithy types; s3's re-export
// works for all of them.
pub(crate) use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use opskit_core::OpsError;

/// Translate an SDK failure into the flat remote-call-failed bucket,
/// keeping the service's error code and message verbatim.
pub(crate) fn remote_failure<E, R>(action: &str, err: &SdkError<E, R>) -> OpsError
where
    E: ProvideErrorMetadata,
{
    let message = match err.as_service_error() {
        Some(service) => format!(
            "{}: {}",
            service.code().unwrap_or("UnknownError"),
            service.message().unwrap_or("no detail provided")
        ),
        None => format!("request never reached the service ({err})"),
    };
    OpsError::Remote {
        action: action.to_string(),
        message,
    }
}

/// The error code, when the failure came from the service at all.
pub(crate) fn error_code<E, R>(err: &SdkError<E, R>) -> Option<&str>
where
    E: ProvideErrorMetadata,
{
    err.as_service_error().and_then(|e| e.code())
}
