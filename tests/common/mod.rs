//! Common test utilities for integration tests.
//!
//! - `logger`: structured per-test logging
//! - `mocks`: wiremock responders for RPC, explorer and price endpoints

#![allow(dead_code)]

pub mod logger;
pub mod mocks;
