use std::fmt;
use std::str::FromStr;

use crate::error::NotificationError;

/// HTTP method used to deliver a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Post,
    Put,
}

impl HttpMethod {
    /// Every supported method, in the order they are reported to callers.
    pub const ALL: [Self; 2] = [Self::Post, Self::Put];

    /// Returns the method name as an uppercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    /// Comma-separated list of supported method names.
    pub fn supported_list() -> String {
        Self::ALL
            .into_iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = NotificationError;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(NotificationError::MissingMethod);
        }
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| NotificationError::UnsupportedMethod(raw.to_owned()))
    }
}
