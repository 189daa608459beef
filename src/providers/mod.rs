//! Upstream adapters.
//!
//! Each submodule talks to one kind of upstream and returns plain integers
//! or decimals; response field names never leave the submodule.

pub mod bitcoin;
pub mod evm;
pub mod pricing;
pub mod rpc;
pub mod solana;
