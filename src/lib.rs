//! # frontdesk-client
//!
//! Async client for the Frontdesk hotel property-management backend.
//!
//! The crate is the authenticated request gateway that the admin UI screens
//! (dashboard, bookings, rooms, guests, reports) call instead of talking to
//! the REST backend directly. It owns the credential lifecycle and the
//! channel-to-route mapping so that callers only ever see logical operations
//! and typed errors.
//!
//! ## Key Features
//!
//! - **Unified client**: [`ApiClient`] is the single entry point for all
//!   backend interactions.
//! - **Channel dispatch**: logical channel names (`"booking:update"`) are
//!   mapped onto HTTP verb + path templates with path-parameter substitution.
//! - **Credential lifecycle**: bearer token attachment, one transparent
//!   refresh-and-retry cycle on `401`, fail-closed credential clearing.
//! - **Envelope normalization**: the backend's `{success, message, data,
//!   errors}` wrapper is normalized across inconsistent key casing.
//! - **Durable sessions**: credentials and the last-known account survive a
//!   restart via a pluggable [`session::SessionStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frontdesk_client::ApiClientBuilder;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> frontdesk_client::Result<()> {
//!     let client = ApiClientBuilder::new()
//!         .base_url("https://pms.example.com/api")
//!         .build()
//!         .await?;
//!
//!     client.login("admin", "secret").await?;
//!
//!     let booking = client
//!         .dispatch(
//!             "booking:update",
//!             Some(json!({ "bookingId": "BK-1", "status": "Confirmed" })),
//!         )
//!         .await?;
//!     println!("{booking}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The gateway: call state machine, auth surface, dispatch |
//! | [`channel`] | Static channel table and path-template resolution |
//! | [`envelope`] | Response-envelope normalization |
//! | [`session`] | Credential store with best-effort durable persistence |
//! | [`transport`] | Single HTTP exchange with a deadline |
//! | [`types`] | Request descriptors and account records |

pub mod channel;
pub mod client;
pub mod envelope;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use channel::ChannelRoute;
pub use client::{ApiClient, ApiClientBuilder};
pub use envelope::Envelope;
pub use session::{CredentialPair, SessionState, SessionStore};
pub use types::{
    account::{Account, LoginResponse},
    request::{Method, RequestDescriptor},
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
