//! Backend API integration
//!
//! One authenticated-request wrapper plus the wire types for every endpoint
//! the client consumes. Services never touch `reqwest` directly.

pub mod client;
pub mod types;

pub use client::ApiClient;
