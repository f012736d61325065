//! Integration test crate for Reciclo marketplace components.
//!
//! This crate exists solely to run integration tests that span the token
//! ledger and the marketplace. It has no public API - all functionality is
//! in the test modules.

#![forbid(unsafe_code)]
