//! The gateway: orchestrates transport, credential store, and envelope
//! normalization behind a small call surface.

mod auth;
mod builder;
mod call;
mod core;
mod dispatch;

pub use builder::ApiClientBuilder;
pub use core::ApiClient;
