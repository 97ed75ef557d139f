//! Transaction-effect normalization.
//!
//! Chain-native operation contents are reshaped into the gateway's standard
//! [`CustomTransaction`] record so callers consume one transaction shape
//! across chain families. Tezos has no fee-market fields, so both
//! `maxFeePerGas` and `maxPriorityFeePerGas` are always null here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw contents of one chain operation, as the node/indexer reports them.
///
/// Numeric fields stay in their chain-native string form; the normalizer
/// parses what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationContent {
    /// Sending account.
    pub source: String,
    /// Receiving account or contract.
    pub destination: String,
    /// Per-account operation counter.
    pub counter: String,
    /// Gas budget of the operation.
    pub gas_limit: String,
    /// Storage budget of the operation.
    pub storage_limit: String,
    /// Transferred amount in raw chain units.
    pub amount: String,
    /// Entrypoint parameters, when the operation carries any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// The gateway's chain-agnostic transaction-effect record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTransaction {
    /// Operation hash.
    pub hash: String,
    /// Destination account or contract.
    pub to: String,
    /// Source account.
    pub from: String,
    /// Operation counter.
    pub nonce: u64,
    /// Sum of the gas and storage budgets, as a decimal string.
    pub gas_limit: String,
    /// Always null: this chain family has no fee market.
    pub max_fee_per_gas: Option<String>,
    /// Always null: this chain family has no fee market.
    pub max_priority_fee_per_gas: Option<String>,
    /// Raw amount string in chain units, NOT decimal-scaled.
    pub value: String,
    /// Chain identifier the operation was included on.
    pub chain_id: String,
    /// JSON serialization of the entrypoint parameters, if any.
    pub data: Option<String>,
}

/// Failure while normalizing a chain operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("operation field {field} is not a valid integer: {value}")]
    Field { field: &'static str, value: String },
}

fn parse_field(field: &'static str, value: &str) -> Result<u128, NormalizeError> {
    value.parse::<u128>().map_err(|_| NormalizeError::Field {
        field,
        value: value.to_string(),
    })
}

/// Normalize one operation's contents into a [`CustomTransaction`].
///
/// `gas_limit` becomes the integer sum of the operation's gas and storage
/// budgets. `value` is passed through unscaled: callers reading it must
/// treat it as the chain-native integer string, unlike the decimal-scaled
/// amounts reported elsewhere by the gateway.
pub fn normalize_transaction(
    content: &OperationContent,
    hash: &str,
    chain_id: &str,
) -> Result<CustomTransaction, NormalizeError> {
    let gas = parse_field("gas_limit", &content.gas_limit)?;
    let storage = parse_field("storage_limit", &content.storage_limit)?;
    let counter = parse_field("counter", &content.counter)?;
    let nonce = u64::try_from(counter).map_err(|_| NormalizeError::Field {
        field: "counter",
        value: content.counter.clone(),
    })?;

    Ok(CustomTransaction {
        hash: hash.to_string(),
        to: content.destination.clone(),
        from: content.source.clone(),
        nonce,
        gas_limit: (gas + storage).to_string(),
        max_fee_per_gas: None,
        max_priority_fee_per_gas: None,
        value: content.amount.clone(),
        chain_id: chain_id.to_string(),
        data: content.parameters.as_ref().map(Value::to_string),
    })
}

/// Lifecycle state of a polled transaction.
///
/// Serialized as the gateway's numeric status codes. The order of the
/// mempool variants is the order the classifier checks partitions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// Present in the applied partition, or found on the finalized chain.
    Applied,
    /// Present in the branch_delayed partition.
    BranchDelayed,
    /// Present in the branch_refused partition.
    BranchRefused,
    /// Present in the refused partition.
    Refused,
    /// Present in the unprocessed partition.
    Unprocessed,
    /// Absent from the mempool and from the finalized chain.
    Unknown,
}

impl TxStatus {
    /// Numeric wire code for this status.
    pub fn code(self) -> i8 {
        match self {
            Self::Applied => 1,
            Self::BranchDelayed => 2,
            Self::BranchRefused => 3,
            Self::Refused => 4,
            Self::Unprocessed => 5,
            Self::Unknown => -1,
        }
    }
}

impl Serialize for TxStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.code())
    }
}

impl<'de> Deserialize<'de> for TxStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i8::deserialize(deserializer)? {
            1 => Ok(Self::Applied),
            2 => Ok(Self::BranchDelayed),
            3 => Ok(Self::BranchRefused),
            4 => Ok(Self::Refused),
            5 => Ok(Self::Unprocessed),
            -1 => Ok(Self::Unknown),
            other => Err(serde::de::Error::custom(format!(
                "unknown transaction status code {other}"
            ))),
        }
    }
}
