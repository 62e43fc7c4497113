/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of walkthrough errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input validation issues
    InputInvalid,

    /// I/O errors
    IOError,

    /// Resource not found (e.g. bucket, key)
    NotFound,

    /// The request conflicts with the current state of the resource
    /// (e.g. bucket name already taken, bucket not empty)
    Conflict,

    /// The caller is not allowed to perform the operation
    AccessDenied,

    /// The storage service rejected or failed the request
    ServiceError,

    /// child operation failed (e.g. deleting a single object version as part of emptying a bucket)
    ChildOperationFailed,
}

impl Error {
    /// Creates a new walkthrough [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::IOError => write!(f, "I/O error"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::Conflict => write!(f, "resource conflict"),
            ErrorKind::AccessDenied => write!(f, "access denied"),
            ErrorKind::ServiceError => write!(f, "service error"),
            ErrorKind::ChildOperationFailed => write!(f, "child operation failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<aws_smithy_types::byte_stream::error::Error> for Error {
    fn from(value: aws_smithy_types::byte_stream::error::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn not_found<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::NotFound, err)
}

pub(crate) fn conflict<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Conflict, err)
}

pub(crate) fn service_error<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ServiceError, err)
}

pub(crate) fn child_operation_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ChildOperationFailed, err)
}

/// Map an S3 error code onto an [`ErrorKind`].
pub(crate) fn kind_for_code(code: Option<&str>) -> ErrorKind {
    match code {
        Some("NotFound" | "NoSuchKey" | "NoSuchBucket" | "NoSuchVersion") => ErrorKind::NotFound,
        Some("BucketAlreadyExists" | "BucketAlreadyOwnedByYou" | "BucketNotEmpty") => {
            ErrorKind::Conflict
        }
        Some("AccessDenied" | "AllAccessDisabled" | "InvalidAccessKeyId") => {
            ErrorKind::AccessDenied
        }
        Some("InvalidBucketName" | "InvalidArgument" | "InvalidLocationConstraint") => {
            ErrorKind::InputInvalid
        }
        _ => ErrorKind::ServiceError,
    }
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = kind_for_code(value.code());
        Error::new(kind, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{kind_for_code, Error, ErrorKind};

    #[test]
    fn test_error_codes_are_classified() {
        assert_eq!(ErrorKind::NotFound, kind_for_code(Some("NoSuchBucket")));
        assert_eq!(ErrorKind::NotFound, kind_for_code(Some("NotFound")));
        assert_eq!(
            ErrorKind::Conflict,
            kind_for_code(Some("BucketAlreadyOwnedByYou"))
        );
        assert_eq!(ErrorKind::Conflict, kind_for_code(Some("BucketNotEmpty")));
        assert_eq!(ErrorKind::AccessDenied, kind_for_code(Some("AccessDenied")));
        assert_eq!(
            ErrorKind::InputInvalid,
            kind_for_code(Some("InvalidBucketName"))
        );
        assert_eq!(ErrorKind::ServiceError, kind_for_code(Some("SlowDown")));
        assert_eq!(ErrorKind::ServiceError, kind_for_code(None));
    }

    #[test]
    fn test_io_error_source_is_kept() {
        let err: Error = std::io::Error::other("disk full").into();
        assert_eq!(&ErrorKind::IOError, err.kind());
        let source = std::error::Error::source(&err).expect("source set");
        assert_eq!("disk full", source.to_string());
    }
}
