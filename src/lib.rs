//! Tezos Gateway Adapter — Library Root
//!
//! Re-exports all modules for integration tests and the service binary.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod usecases;
