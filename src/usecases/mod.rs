//! Use Cases Layer - Gateway Operations
//!
//! The five wallet-centric operations the gateway serves for one resolved
//! (chain, network) pair, plus the registry resolution they share. Each
//! operation takes a chain client and a plain request record and returns a
//! plain response record or a gateway fault.
//!
//! Operations:
//! - `account`: account nonce lookup
//! - `balances`: concurrent native/token balance aggregation
//! - `allowances`: concurrent spender-allowance aggregation
//! - `poll`: transaction lifecycle classification
//! - `approve`: standard-specific token approval submission

pub mod account;
pub mod allowances;
pub mod approve;
pub mod balances;
pub mod poll;
pub mod tokens;
