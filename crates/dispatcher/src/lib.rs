//! Outbound HTTP notification dispatcher.
//!
//! [`NotificationDispatcher`] validates a notification (URL, method, content
//! type, body), sends it as a single `POST` or `PUT`, and classifies the
//! response. Bad input and non-2xx responses come back as a
//! [`NotificationError`]; an unreachable endpoint comes back as `Ok(false)`.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use herald_dispatcher::NotificationDispatcher;
//!
//! # async fn run() -> Result<(), herald_dispatcher::NotificationError> {
//! // Defaults: 10 s to connect, 60 s per socket read.
//! let dispatcher = NotificationDispatcher::new(None, None)?;
//!
//! let delivered = dispatcher
//!     .send(
//!         "https://hooks.example.com/deploy",
//!         "POST",
//!         "application/json",
//!         r#"{"service":"api","status":"deployed"}"#,
//!     )
//!     .await?;
//!
//! if !delivered {
//!     // The endpoint could not be reached; the input itself was fine.
//! }
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
pub use herald_core::{
    ContentType, DispatcherConfig, ErrorKind, HttpMethod, NotificationError, NotificationRequest,
    NotificationResult,
};
