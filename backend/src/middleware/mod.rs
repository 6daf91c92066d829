//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! trace identifiers. Basic authentication lives with the HTTP adapter in
//! `inbound::http::basic_auth`.

pub mod trace;

pub use trace::Trace;
