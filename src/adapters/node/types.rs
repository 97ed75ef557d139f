//! Wire shapes of the node RPC and indexer REST responses.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::transaction::OperationContent;
use crate::ports::chain_client::PendingOperation;

/// Subset of `/chains/main/blocks/head/header`.
#[derive(Debug, Deserialize)]
pub(crate) struct BlockHeaderDto {
    pub hash: String,
    pub level: u64,
}

/// `/chains/main/mempool/pending_operations`, all five partitions.
///
/// Newer nodes report the first partition as `validated`; the gateway keeps
/// the classic name.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MempoolDto {
    #[serde(default, alias = "validated")]
    pub applied: Vec<MempoolOpDto>,
    #[serde(default)]
    pub branch_delayed: Vec<MempoolOpDto>,
    #[serde(default)]
    pub branch_refused: Vec<MempoolOpDto>,
    #[serde(default)]
    pub refused: Vec<MempoolOpDto>,
    #[serde(default)]
    pub unprocessed: Vec<MempoolOpDto>,
}

/// One pending operation. Depending on the node's RPC version this arrives
/// either as an object carrying its hash or as a `[hash, operation]` pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MempoolOpDto {
    Detailed {
        hash: String,
        #[serde(default)]
        contents: Value,
    },
    Pair(String, Value),
}

impl MempoolOpDto {
    pub(crate) fn into_pending(self) -> PendingOperation {
        match self {
            Self::Detailed { hash, contents } => PendingOperation { hash, contents },
            Self::Pair(hash, operation) => {
                let contents = operation
                    .get("contents")
                    .cloned()
                    .unwrap_or(operation);
                PendingOperation { hash, contents }
            }
        }
    }
}

/// One entry of the indexer's token-balances listing.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenBalanceDto {
    #[serde(default)]
    pub balance: Option<String>,
}

/// Account reference as the indexer embeds it.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountRefDto {
    #[serde(default)]
    pub address: String,
}

/// One transaction operation from the indexer's by-hash lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IndexerTransactionDto {
    #[serde(default)]
    pub counter: u64,
    #[serde(default)]
    pub gas_limit: u64,
    #[serde(default)]
    pub storage_limit: u64,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub sender: Option<AccountRefDto>,
    #[serde(default)]
    pub target: Option<AccountRefDto>,
    #[serde(default)]
    pub parameter: Option<Value>,
}

impl IndexerTransactionDto {
    pub(crate) fn into_content(self) -> OperationContent {
        OperationContent {
            source: self.sender.map(|a| a.address).unwrap_or_default(),
            destination: self.target.map(|a| a.address).unwrap_or_default(),
            counter: self.counter.to_string(),
            gas_limit: self.gas_limit.to_string(),
            storage_limit: self.storage_limit.to_string(),
            amount: self.amount.to_string(),
            parameters: self.parameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mempool_object_shape() {
        let dto: MempoolDto = serde_json::from_value(json!({
            "applied": [
                {"hash": "oo1", "branch": "BL1", "contents": [{"kind": "transaction"}]}
            ],
            "refused": [],
            "branch_refused": [],
            "branch_delayed": [],
            "unprocessed": []
        }))
        .unwrap();
        let pending = dto.applied.into_iter().next().unwrap().into_pending();
        assert_eq!(pending.hash, "oo1");
        assert_eq!(pending.contents[0]["kind"], "transaction");
    }

    #[test]
    fn test_mempool_pair_shape() {
        let dto: MempoolDto = serde_json::from_value(json!({
            "applied": [],
            "refused": [
                ["oo2", {"branch": "BL1", "contents": [{"kind": "transaction"}]}]
            ]
        }))
        .unwrap();
        let pending = dto.refused.into_iter().next().unwrap().into_pending();
        assert_eq!(pending.hash, "oo2");
        assert_eq!(pending.contents[0]["kind"], "transaction");
    }

    #[test]
    fn test_validated_alias_maps_to_applied() {
        let dto: MempoolDto = serde_json::from_value(json!({
            "validated": [{"hash": "oo3", "contents": []}]
        }))
        .unwrap();
        assert_eq!(dto.applied.len(), 1);
    }

    #[test]
    fn test_indexer_transaction_to_content() {
        let dto: IndexerTransactionDto = serde_json::from_value(json!({
            "counter": 4182,
            "gasLimit": 10100,
            "storageLimit": 257,
            "amount": 0,
            "sender": {"address": "tz1source"},
            "target": {"address": "KT1dest"},
            "parameter": {"entrypoint": "approve"}
        }))
        .unwrap();
        let content = dto.into_content();
        assert_eq!(content.source, "tz1source");
        assert_eq!(content.destination, "KT1dest");
        assert_eq!(content.counter, "4182");
        assert_eq!(content.gas_limit, "10100");
        assert_eq!(content.storage_limit, "257");
        assert!(content.parameters.is_some());
    }
}
