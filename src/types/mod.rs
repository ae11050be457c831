//! Core type definitions shared across the gateway.

pub mod account;
pub mod request;

pub use account::{Account, LoginResponse};
pub use request::{Method, RequestDescriptor};
