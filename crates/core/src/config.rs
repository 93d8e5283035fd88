use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Connection establishment timeout used when none (or zero) is configured.
pub const DEFAULT_CONNECTION_TIMEOUT_MS: u64 = 10_000;

/// Socket read timeout used when none (or zero) is configured.
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 60_000;

/// Reported attempt budget used when none (or zero) is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Configuration for a notification dispatcher.
///
/// Zero values are never an error: [`DispatcherConfig::normalized`] replaces
/// them with the documented defaults, and every constructor in this crate
/// and in the dispatcher goes through it.
///
/// # Example
///
/// ```toml
/// connection_timeout_ms = 5000
/// socket_timeout_ms = 30000
/// follow_redirects = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Upper bound for establishing the TCP/TLS connection, in milliseconds.
    #[serde(deserialize_with = "clamp_negative")]
    pub connection_timeout_ms: u64,

    /// Upper bound for each read from the socket, in milliseconds.
    #[serde(deserialize_with = "clamp_negative")]
    pub socket_timeout_ms: u64,

    /// Attempt budget. Recorded and reported only; every notification is
    /// sent exactly once.
    pub max_attempts: u32,

    /// Whether 3xx responses are followed. When `false` (the default) a
    /// redirect is reported as [`NotificationError::Redirection`].
    ///
    /// [`NotificationError::Redirection`]: crate::NotificationError::Redirection
    pub follow_redirects: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            connection_timeout_ms: DEFAULT_CONNECTION_TIMEOUT_MS,
            socket_timeout_ms: DEFAULT_SOCKET_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            follow_redirects: false,
        }
    }
}

impl DispatcherConfig {
    /// Create a configuration from optional timeouts, in milliseconds.
    ///
    /// Absent or zero values fall back to [`DEFAULT_CONNECTION_TIMEOUT_MS`]
    /// and [`DEFAULT_SOCKET_TIMEOUT_MS`].
    pub fn new(connection_timeout_ms: Option<u64>, socket_timeout_ms: Option<u64>) -> Self {
        Self {
            connection_timeout_ms: connection_timeout_ms.unwrap_or(0),
            socket_timeout_ms: socket_timeout_ms.unwrap_or(0),
            ..Self::default()
        }
        .normalized()
    }

    /// Parse a configuration from a TOML document. Missing keys take their
    /// defaults and zero values are normalized.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(raw).map(Self::normalized)
    }

    /// Replace every zero value with its default.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            connection_timeout_ms: positive_or(
                self.connection_timeout_ms,
                DEFAULT_CONNECTION_TIMEOUT_MS,
            ),
            socket_timeout_ms: positive_or(self.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS),
            max_attempts: if self.max_attempts == 0 {
                DEFAULT_MAX_ATTEMPTS
            } else {
                self.max_attempts
            },
            follow_redirects: self.follow_redirects,
        }
    }

    /// Set the connection timeout in milliseconds (zero selects the default).
    #[must_use]
    pub fn with_connection_timeout_ms(mut self, ms: u64) -> Self {
        self.connection_timeout_ms = positive_or(ms, DEFAULT_CONNECTION_TIMEOUT_MS);
        self
    }

    /// Set the socket timeout in milliseconds (zero selects the default).
    #[must_use]
    pub fn with_socket_timeout_ms(mut self, ms: u64) -> Self {
        self.socket_timeout_ms = positive_or(ms, DEFAULT_SOCKET_TIMEOUT_MS);
        self
    }

    /// Set the reported attempt budget (zero selects the default).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = if attempts == 0 {
            DEFAULT_MAX_ATTEMPTS
        } else {
            attempts
        };
        self
    }

    /// Follow 3xx responses instead of reporting them.
    #[must_use]
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Connection timeout as a [`Duration`].
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    /// Socket timeout as a [`Duration`].
    pub fn socket_timeout(&self) -> Duration {
        Duration::from_millis(self.socket_timeout_ms)
    }
}

/// Negative timeouts read from a file are treated like zero, which
/// [`DispatcherConfig::normalized`] then replaces with the default.
fn clamp_negative<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u64::try_from(raw).unwrap_or(0))
}

fn positive_or(value: u64, default: u64) -> u64 {
    if value == 0 { default } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DispatcherConfig::default();
        assert_eq!(config.connection_timeout_ms, 10_000);
        assert_eq!(config.socket_timeout_ms, 60_000);
        assert_eq!(config.max_attempts, 5);
        assert!(!config.follow_redirects);
    }

    #[test]
    fn absent_or_zero_timeouts_fall_back_to_defaults() {
        let config = DispatcherConfig::new(None, None);
        assert_eq!(config.connection_timeout_ms, DEFAULT_CONNECTION_TIMEOUT_MS);
        assert_eq!(config.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS);

        let config = DispatcherConfig::new(Some(0), Some(0));
        assert_eq!(config.connection_timeout_ms, DEFAULT_CONNECTION_TIMEOUT_MS);
        assert_eq!(config.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS);
    }

    #[test]
    fn positive_timeouts_are_kept() {
        let config = DispatcherConfig::new(Some(1), Some(3000));
        assert_eq!(config.connection_timeout_ms, 1);
        assert_eq!(config.socket_timeout_ms, 3000);
        assert_eq!(config.connection_timeout(), Duration::from_millis(1));
        assert_eq!(config.socket_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn builder_methods() {
        let config = DispatcherConfig::default()
            .with_connection_timeout_ms(2500)
            .with_socket_timeout_ms(0)
            .with_max_attempts(3)
            .with_follow_redirects(true);

        assert_eq!(config.connection_timeout_ms, 2500);
        assert_eq!(config.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS);
        assert_eq!(config.max_attempts, 3);
        assert!(config.follow_redirects);

        assert_eq!(
            DispatcherConfig::default().with_max_attempts(0).max_attempts,
            DEFAULT_MAX_ATTEMPTS
        );
    }

    #[test]
    fn normalized_replaces_zeroes() {
        let config = DispatcherConfig {
            connection_timeout_ms: 0,
            socket_timeout_ms: 42,
            max_attempts: 0,
            follow_redirects: true,
        }
        .normalized();
        assert_eq!(config.connection_timeout_ms, DEFAULT_CONNECTION_TIMEOUT_MS);
        assert_eq!(config.socket_timeout_ms, 42);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(config.follow_redirects);
    }

    #[test]
    fn from_toml_applies_defaults_and_normalizes() {
        let config = DispatcherConfig::from_toml_str(
            r"
            connection_timeout_ms = 2500
            socket_timeout_ms = 0
            ",
        )
        .unwrap();
        assert_eq!(config.connection_timeout_ms, 2500);
        assert_eq!(config.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(!config.follow_redirects);

        let empty = DispatcherConfig::from_toml_str("").unwrap();
        assert_eq!(empty, DispatcherConfig::default());
    }

    #[test]
    fn from_toml_treats_negative_timeouts_as_unset() {
        let config = DispatcherConfig::from_toml_str(
            r"
            connection_timeout_ms = -1
            socket_timeout_ms = -60000
            ",
        )
        .unwrap();
        assert_eq!(config.connection_timeout_ms, DEFAULT_CONNECTION_TIMEOUT_MS);
        assert_eq!(config.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS);
    }

    #[test]
    fn from_toml_rejects_non_numeric_timeouts() {
        assert!(DispatcherConfig::from_toml_str("socket_timeout_ms = \"fast\"").is_err());
    }
}
