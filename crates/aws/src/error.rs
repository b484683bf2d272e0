//! SDK error conversion
//!
//! Turns SDK errors into `s3c_core::Error`, keeping the service's own
//! message intact.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use s3c_core::Error;

/// Convert an SDK error for a request on `target`.
///
/// Missing buckets/objects and permission failures get their own variants.
/// Every variant carries the full error chain as the service reported it.
pub(crate) fn map_sdk_error<E, R>(err: SdkError<E, R>, target: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err
        .as_service_error()
        .and_then(ProvideErrorMetadata::code)
        .map(str::to_string);
    let message = DisplayErrorContext(&err).to_string();
    tracing::debug!(target_object = target, code = ?code, "request failed: {message}");

    match code.as_deref() {
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => Error::NotFound(message),
        Some("AccessDenied") => Error::AccessDenied(message),
        _ => Error::Service(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::GetObjectError;

    fn service_error(code: &str, message: &str) -> SdkError<GetObjectError, ()> {
        let meta = ErrorMetadata::builder().code(code).message(message).build();
        SdkError::service_error(GetObjectError::generic(meta), ())
    }

    #[test]
    fn test_missing_key_keeps_service_message() {
        let err = map_sdk_error(
            service_error("NoSuchKey", "The specified key does not exist."),
            "b/k",
        );
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.is_remote());
        assert!(
            err.to_string().contains("The specified key does not exist."),
            "{err}"
        );
    }

    #[test]
    fn test_access_denied_keeps_service_message() {
        let err = map_sdk_error(service_error("AccessDenied", "Access Denied"), "b/k");
        assert!(matches!(err, Error::AccessDenied(_)));
        assert!(err.to_string().contains("Access Denied"), "{err}");
    }

    #[test]
    fn test_other_codes_are_service_errors() {
        let err = map_sdk_error(
            service_error("SlowDown", "Please reduce your request rate."),
            "b/k",
        );
        assert!(matches!(err, Error::Service(_)));
        assert!(
            err.to_string().contains("Please reduce your request rate."),
            "{err}"
        );
    }
}
