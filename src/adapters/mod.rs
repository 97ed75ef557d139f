//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits with concrete external dependencies and
//! exposes the gateway operations over HTTP.
//!
//! Adapter categories:
//! - `http`: axum router delegating to the gateway operations
//! - `node`: Tezos node RPC + indexer REST implementation of the chain
//!   client port, including operation signing and injection

pub mod http;
pub mod node;
