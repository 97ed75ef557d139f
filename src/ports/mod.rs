//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) the gateway operations require from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ChainClient`: reads against a resolved (chain, network) node
//! - `Wallet`: operation signing and submission for one account

pub mod chain_client;
