//! Core types for the Herald outbound notification dispatcher.
//!
//! A notification is a single HTTP `POST` or `PUT` carrying a JSON, plain
//! text, or XML body to a target URL. This crate owns everything about a
//! notification that does not touch the network:
//!
//! - the closed [`HttpMethod`] and [`ContentType`] enumerations,
//! - body well-formedness checks ([`is_valid_json`], [`is_valid_xml`]),
//! - [`NotificationRequest`], which can only be built from valid input,
//! - response status classification ([`classify_status`]),
//! - the [`NotificationError`] taxonomy and [`DispatcherConfig`].
//!
//! ```rust
//! use herald_core::{ContentType, HttpMethod, NotificationRequest};
//!
//! let request = NotificationRequest::parse(
//!     "https://hooks.example.com/deploy",
//!     "POST",
//!     "application/json",
//!     r#"{"status":"ok"}"#,
//! )
//! .unwrap();
//! assert_eq!(request.method(), HttpMethod::Post);
//! assert_eq!(request.content_type(), ContentType::Json);
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod method;
pub mod outcome;
pub mod request;

pub use config::{
    DEFAULT_CONNECTION_TIMEOUT_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_SOCKET_TIMEOUT_MS,
    DispatcherConfig,
};
pub use content::{ContentType, is_valid_json, is_valid_xml};
pub use error::{ErrorKind, NotificationError};
pub use method::HttpMethod;
pub use outcome::{NotificationResult, classify_status};
pub use request::NotificationRequest;
