//! Networking: REST calls to the points backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The wire schema lives in `panels::api`; this module only moves bytes.

pub mod api;
