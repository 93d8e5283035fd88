use crate::error::NotificationError;

/// Outcome of a delivered (or undeliverable) notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResult {
    /// Whether the endpoint accepted the notification.
    pub success: bool,

    /// HTTP status code, absent when no response was received.
    pub status_code: Option<u16>,

    /// Reason phrase for `status_code`, when one is known.
    pub status_text: Option<String>,
}

impl NotificationResult {
    /// The endpoint answered with an accepted status.
    #[must_use]
    pub fn delivered(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code: Some(status_code),
            status_text: Some(status_text.into()),
        }
    }

    /// No response was received (refused connection, timeout, DNS failure).
    #[must_use]
    pub fn undelivered() -> Self {
        Self {
            success: false,
            status_code: None,
            status_text: None,
        }
    }
}

/// Map an HTTP response status onto the notification outcome.
///
/// Anything below 300 is accepted. 3xx, 4xx and 5xx become
/// [`NotificationError::Redirection`], [`NotificationError::ClientError`] and
/// [`NotificationError::ServerError`]. Non-standard codes of 600 and above
/// are reported as server errors.
pub fn classify_status(
    status: u16,
    text: &str,
) -> Result<NotificationResult, NotificationError> {
    let text = text.to_owned();
    match status {
        0..=299 => Ok(NotificationResult::delivered(status, text)),
        300..=399 => Err(NotificationError::Redirection { status, text }),
        400..=499 => Err(NotificationError::ClientError { status, text }),
        _ => Err(NotificationError::ServerError { status, text }),
    }
}
