// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The error type reported by the provisioning steps.

use google_cloud_gax::error::Error as ClientError;
use google_cloud_gax::error::rpc::Code;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The error returned by the provisioning steps and the service traits.
///
/// Each error has a [kind][ErrorKind] and a source. The kind is what the
/// provisioner uses to decide how to report a step, for example, creating a
/// resource that already exists is not a failure. The source keeps the full
/// details from the client library, and is included in the `Display` output.
///
/// # Example
/// ```
/// use sports_data_lake::{Error, ErrorKind};
/// let error = Error::new(ErrorKind::AlreadyExists, "bucket my-bucket");
/// assert!(error.is_already_exists());
/// assert_eq!(error.to_string(), "the resource already exists: bucket my-bucket");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {source}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    source: BoxError,
}

impl Error {
    /// Creates a new error of the given kind.
    pub fn new<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// Creates an error for data that cannot be encoded or decoded.
    pub fn serialization<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Serialization, source)
    }

    /// Creates an error for a failure to reach the service.
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Transport, source)
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The resource the request tried to create already exists.
    ///
    /// All the provisioning steps treat this as an idempotent success.
    pub fn is_already_exists(&self) -> bool {
        self.kind == ErrorKind::AlreadyExists
    }

    /// The resource does not exist, or is not visible yet.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Classifies the errors reported by the Google Cloud client libraries.
///
/// The service status code is preferred. Some errors are generated before they
/// reach the service, e.g. by a load balancer, and only have an HTTP status
/// code.
impl From<ClientError> for Error {
    fn from(value: ClientError) -> Self {
        let kind = classify(&value);
        Self::new(kind, value)
    }
}

fn classify(error: &ClientError) -> ErrorKind {
    if let Some(kind) = error.status().and_then(|s| from_code(s.code)) {
        return kind;
    }
    if let Some(code) = error.http_status_code() {
        // The service answered, even if the status code has no specific kind.
        return from_http_status(code).unwrap_or(ErrorKind::Service);
    }
    if error.is_timeout() {
        return ErrorKind::Timeout;
    }
    if error.is_authentication() {
        return ErrorKind::Authentication;
    }
    if error.is_serialization() || error.is_deserialization() {
        return ErrorKind::Serialization;
    }
    if error.is_transport() || error.is_io() {
        return ErrorKind::Transport;
    }
    ErrorKind::Service
}

fn from_code(code: Code) -> Option<ErrorKind> {
    let kind = match code {
        Code::AlreadyExists => ErrorKind::AlreadyExists,
        Code::NotFound => ErrorKind::NotFound,
        Code::PermissionDenied => ErrorKind::PermissionDenied,
        Code::Unauthenticated => ErrorKind::Authentication,
        Code::Unavailable => ErrorKind::Unavailable,
        Code::DeadlineExceeded => ErrorKind::Timeout,
        _ => return None,
    };
    Some(kind)
}

fn from_http_status(code: u16) -> Option<ErrorKind> {
    let kind = match code {
        401 => ErrorKind::Authentication,
        403 => ErrorKind::PermissionDenied,
        404 => ErrorKind::NotFound,
        // Cloud Storage and BigQuery report duplicate names as conflicts.
        409 => ErrorKind::AlreadyExists,
        503 => ErrorKind::Unavailable,
        _ => return None,
    };
    Some(kind)
}

/// The kinds of errors reported by the provisioning steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The resource already exists. Re-running the provisioner reports this
    /// for every creation step.
    AlreadyExists,
    /// The resource was not found.
    NotFound,
    /// The credentials are valid but lack the necessary permissions.
    PermissionDenied,
    /// The credentials are missing, invalid, or expired.
    Authentication,
    /// The service is temporarily unavailable.
    Unavailable,
    /// The request did not complete before its deadline.
    Timeout,
    /// The request or response could not be encoded or decoded.
    Serialization,
    /// The service rejected the request for some other reason.
    Service,
    /// The request could not reach the service.
    Transport,
}

impl ErrorKind {
    /// A short description of the error kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "the resource already exists",
            Self::NotFound => "the resource was not found",
            Self::PermissionDenied => "permission denied",
            Self::Authentication => "authentication failed",
            Self::Unavailable => "the service is unavailable",
            Self::Timeout => "the request timed out",
            Self::Serialization => "cannot serialize the data",
            Self::Service => "the service rejected the request",
            Self::Transport => "cannot reach the service",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
