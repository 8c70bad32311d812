//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Requests arrive as the JSON DTOs defined in the `shared` crate, are mapped
//! onto domain commands, and domain results are mapped back to DTOs. Domain
//! errors are translated to status codes in one place ([`rest::error`]).

pub mod rest;

pub use rest::*;
