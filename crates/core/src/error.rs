use thiserror::Error;

use crate::content::ContentType;
use crate::method::HttpMethod;

/// Errors raised while validating or delivering a notification.
///
/// Validation errors are produced before any network traffic. Status errors
/// carry the code and reason phrase of a response of 300 or above. Transport
/// failures (refused connections, timeouts, DNS errors) have no variant; the
/// dispatcher reports them as an unsuccessful result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// No target URL was supplied.
    #[error("notification URL is required")]
    MissingUrl,

    /// The target URL is not an absolute `http`/`https` URL.
    #[error("notification URL is invalid: {0}")]
    InvalidUrl(String),

    /// No HTTP method was supplied.
    #[error("HTTP method is required")]
    MissingMethod,

    /// The HTTP method is not one of the supported methods.
    #[error(
        "HTTP method `{0}` is not supported; supported methods: {supported}",
        supported = HttpMethod::supported_list()
    )]
    UnsupportedMethod(String),

    /// No content type was supplied.
    #[error("content type is required")]
    MissingContentType,

    /// The content type is not one of the supported types.
    #[error(
        "content type `{0}` is not supported; supported content types: {supported}",
        supported = ContentType::supported_list()
    )]
    UnsupportedContentType(String),

    /// The notification body is empty.
    #[error("notification body is required")]
    MissingBody,

    /// The body was declared as JSON but does not parse.
    #[error("notification body is not valid JSON: {0}")]
    InvalidJson(String),

    /// The body was declared as XML but is not a well-formed document.
    #[error("notification body is not well-formed XML: {0}")]
    InvalidXml(String),

    /// The endpoint answered with a 3xx status.
    #[error("endpoint responded with redirection: {status} {text}")]
    Redirection { status: u16, text: String },

    /// The endpoint answered with a 4xx status.
    #[error("endpoint responded with client error: {status} {text}")]
    ClientError { status: u16, text: String },

    /// The endpoint answered with a 5xx status.
    #[error("endpoint responded with server error: {status} {text}")]
    ServerError { status: u16, text: String },

    /// The underlying HTTP client could not be built with the requested
    /// configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Field-less discriminant of a [`NotificationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingUrl,
    InvalidUrl,
    MissingMethod,
    UnsupportedMethod,
    MissingContentType,
    UnsupportedContentType,
    MissingBody,
    InvalidJson,
    InvalidXml,
    Redirection,
    ClientError,
    ServerError,
    HttpClient,
}

impl NotificationError {
    /// Returns the kind of this error without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingUrl => ErrorKind::MissingUrl,
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::MissingMethod => ErrorKind::MissingMethod,
            Self::UnsupportedMethod(_) => ErrorKind::UnsupportedMethod,
            Self::MissingContentType => ErrorKind::MissingContentType,
            Self::UnsupportedContentType(_) => ErrorKind::UnsupportedContentType,
            Self::MissingBody => ErrorKind::MissingBody,
            Self::InvalidJson(_) => ErrorKind::InvalidJson,
            Self::InvalidXml(_) => ErrorKind::InvalidXml,
            Self::Redirection { .. } => ErrorKind::Redirection,
            Self::ClientError { .. } => ErrorKind::ClientError,
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::HttpClient(_) => ErrorKind::HttpClient,
        }
    }

    /// Returns `true` if the error was raised before any request was sent
    /// because the caller's input was rejected.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingUrl
                | Self::InvalidUrl(_)
                | Self::MissingMethod
                | Self::UnsupportedMethod(_)
                | Self::MissingContentType
                | Self::UnsupportedContentType(_)
                | Self::MissingBody
                | Self::InvalidJson(_)
                | Self::InvalidXml(_)
        )
    }

    /// Returns `true` if the endpoint was reached and answered with a
    /// non-success status.
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            Self::Redirection { .. } | Self::ClientError { .. } | Self::ServerError { .. }
        )
    }

    /// The HTTP status code carried by a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Redirection { status, .. }
            | Self::ClientError { status, .. }
            | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
