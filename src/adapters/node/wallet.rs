//! Wallet Adapter - Operation Signing and Injection
//!
//! Loads ed25519 key material from the environment variable a signer entry
//! names, translates the gateway's semantic call parameters to Micheline,
//! lets the node forge the operation, signs the watermarked Blake2b-256
//! digest, injects, and polls the indexer until the operation is confirmed.

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::config::{SignerConfig, SubmitConfig};
use crate::ports::chain_client::{ApprovalCall, SubmittedOperation, Wallet};

use super::types::{BlockHeaderDto, IndexerTransactionDto};
use super::{get_json, post_json};

type Blake2b256 = Blake2b<U32>;

/// Base58check prefix of an ed25519 seed secret key (`edsk...`, 54 chars).
const EDSK_SEED_PREFIX: [u8; 4] = [13, 15, 58, 7];

/// Watermark prepended to generic operation bytes before hashing.
const OPERATION_WATERMARK: u8 = 0x03;

/// A loaded signing wallet bound to one source account.
pub struct NodeWallet {
    http: reqwest::Client,
    node_url: String,
    indexer_url: String,
    source: String,
    key: SigningKey,
    submit: SubmitConfig,
}

impl NodeWallet {
    /// Load the wallet for a configured signer. Fails when the environment
    /// variable is unset or does not hold a valid ed25519 seed key.
    pub fn load(
        http: reqwest::Client,
        node_url: String,
        indexer_url: String,
        signer: &SignerConfig,
        submit: SubmitConfig,
    ) -> anyhow::Result<Self> {
        let encoded = std::env::var(&signer.secret_key_env).map_err(|_| {
            anyhow!(
                "environment variable {} holds no secret key",
                signer.secret_key_env
            )
        })?;
        let key = decode_secret_key(&encoded)?;

        Ok(Self {
            http,
            node_url,
            indexer_url,
            source: signer.address.clone(),
            key,
            submit,
        })
    }

    fn sign_forged(&self, forged_hex: &str) -> anyhow::Result<Vec<u8>> {
        let bytes = hex::decode(forged_hex).context("node returned non-hex forged bytes")?;
        let mut hasher = Blake2b256::new();
        hasher.update([OPERATION_WATERMARK]);
        hasher.update(&bytes);
        let digest = hasher.finalize();

        let signature = self.key.sign(digest.as_slice());
        let mut signed = bytes;
        signed.extend_from_slice(&signature.to_bytes());
        Ok(signed)
    }

    /// Poll the indexer until the injected operation shows up, returning the
    /// contents the chain recorded for it.
    async fn await_inclusion(&self, hash: &str) -> anyhow::Result<SubmittedOperation> {
        let url = format!("{}/v1/operations/transactions/{hash}", self.indexer_url);
        for attempt in 1..=self.submit.confirm_attempts {
            sleep(Duration::from_millis(self.submit.confirm_interval_ms)).await;

            let operations: Vec<IndexerTransactionDto> =
                get_json(&self.http, url.clone()).await.unwrap_or_default();
            if operations.is_empty() {
                debug!(hash, attempt, "operation not yet confirmed");
                continue;
            }

            let counter = operations.first().map_or(0, |op| op.counter);
            let results = operations.into_iter().map(|op| op.into_content()).collect();
            return Ok(SubmittedOperation {
                hash: hash.to_string(),
                counter,
                results,
            });
        }
        bail!(
            "operation {hash} was not confirmed after {} polls",
            self.submit.confirm_attempts
        )
    }
}

#[async_trait]
impl Wallet for NodeWallet {
    async fn submit_call(&self, call: &ApprovalCall) -> anyhow::Result<SubmittedOperation> {
        let header: BlockHeaderDto = get_json(
            &self.http,
            format!("{}/chains/main/blocks/head/header", self.node_url),
        )
        .await?;
        let counter: String = get_json(
            &self.http,
            format!(
                "{}/chains/main/blocks/head/context/contracts/{}/counter",
                self.node_url, self.source
            ),
        )
        .await?;
        let counter: u64 = counter
            .parse::<u64>()
            .map(|current| current + 1)
            .with_context(|| format!("node returned a non-numeric counter for {}", self.source))?;

        let parameters = to_micheline(&call.entrypoint, &call.parameters)?;
        let content = json!({
            "kind": "transaction",
            "source": self.source,
            "fee": self.submit.fee_mutez.to_string(),
            "counter": counter.to_string(),
            "gas_limit": self.submit.gas_limit.to_string(),
            "storage_limit": self.submit.storage_limit.to_string(),
            "amount": "0",
            "destination": call.contract,
            "parameters": {
                "entrypoint": call.entrypoint,
                "value": parameters,
            },
        });

        let forged: String = post_json(
            &self.http,
            format!(
                "{}/chains/main/blocks/head/helpers/forge/operations",
                self.node_url
            ),
            &json!({ "branch": header.hash, "contents": [content] }),
        )
        .await?;

        let signed = self.sign_forged(&forged)?;
        let hash: String = post_json(
            &self.http,
            format!("{}/injection/operation?chain=main", self.node_url),
            &Value::String(hex::encode(signed)),
        )
        .await?;

        info!(
            hash = %hash,
            contract = %call.contract,
            entrypoint = %call.entrypoint,
            counter,
            "operation injected"
        );

        self.await_inclusion(&hash).await
    }
}

fn decode_secret_key(encoded: &str) -> anyhow::Result<SigningKey> {
    let raw = bs58::decode(encoded.trim())
        .with_check(None)
        .into_vec()
        .context("secret key is not valid base58check")?;
    anyhow::ensure!(
        raw.len() == 36 && raw[..4] == EDSK_SEED_PREFIX,
        "secret key is not an ed25519 seed key (edsk...)"
    );
    let seed: [u8; 32] = raw[4..]
        .try_into()
        .map_err(|_| anyhow!("secret key seed has the wrong length"))?;
    Ok(SigningKey::from_bytes(&seed))
}

/// Translate the gateway's semantic call parameters into Micheline.
///
/// Only the two approval entrypoints exist in this gateway; anything else
/// is a programming error upstream.
fn to_micheline(entrypoint: &str, parameters: &Value) -> anyhow::Result<Value> {
    match entrypoint {
        "approve" => {
            let spender = parameters["spender"]
                .as_str()
                .context("approve parameters lack a spender")?;
            let value = parameters["value"]
                .as_str()
                .context("approve parameters lack a value")?;
            Ok(json!({
                "prim": "Pair",
                "args": [{ "string": spender }, { "int": value }],
            }))
        }
        "update_operators" => {
            let updates = parameters
                .as_array()
                .context("update_operators parameters must be a list")?;
            let mut encoded = Vec::with_capacity(updates.len());
            for update in updates {
                let (variant, grant) = if let Some(grant) = update.get("add_operator") {
                    ("Left", grant)
                } else if let Some(grant) = update.get("remove_operator") {
                    ("Right", grant)
                } else {
                    bail!("operator update is neither add_operator nor remove_operator");
                };
                encoded.push(operator_micheline(variant, grant)?);
            }
            Ok(Value::Array(encoded))
        }
        other => bail!("unsupported entrypoint {other}"),
    }
}

fn operator_micheline(variant: &str, grant: &Value) -> anyhow::Result<Value> {
    let owner = grant["owner"]
        .as_str()
        .context("operator update lacks an owner")?;
    let operator = grant["operator"]
        .as_str()
        .context("operator update lacks an operator")?;
    let token_id = grant["token_id"]
        .as_u64()
        .context("operator update lacks a token_id")?;
    Ok(json!({
        "prim": variant,
        "args": [{
            "prim": "Pair",
            "args": [
                { "string": owner },
                {
                    "prim": "Pair",
                    "args": [{ "string": operator }, { "int": token_id.to_string() }],
                },
            ],
        }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_key_roundtrip() {
        let mut raw = EDSK_SEED_PREFIX.to_vec();
        raw.extend_from_slice(&[7u8; 32]);
        let encoded = bs58::encode(raw).with_check().into_string();

        let key = decode_secret_key(&encoded).unwrap();
        assert_eq!(key.to_bytes(), [7u8; 32]);
    }

    #[test]
    fn test_decode_rejects_wrong_prefix() {
        let mut raw = vec![1, 2, 3, 4];
        raw.extend_from_slice(&[7u8; 32]);
        let encoded = bs58::encode(raw).with_check().into_string();
        assert!(decode_secret_key(&encoded).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_secret_key("not-a-key").is_err());
    }

    #[test]
    fn test_approve_micheline_shape() {
        let params = json!({ "spender": "tz1spender", "value": "1500000" });
        let micheline = to_micheline("approve", &params).unwrap();
        assert_eq!(micheline["prim"], "Pair");
        assert_eq!(micheline["args"][0]["string"], "tz1spender");
        assert_eq!(micheline["args"][1]["int"], "1500000");
    }

    #[test]
    fn test_add_operator_micheline_shape() {
        let params = json!([
            { "add_operator": { "owner": "tz1owner", "operator": "tz1spender", "token_id": 0 } }
        ]);
        let micheline = to_micheline("update_operators", &params).unwrap();
        let update = &micheline[0];
        assert_eq!(update["prim"], "Left");
        assert_eq!(update["args"][0]["args"][0]["string"], "tz1owner");
        assert_eq!(update["args"][0]["args"][1]["args"][0]["string"], "tz1spender");
        assert_eq!(update["args"][0]["args"][1]["args"][1]["int"], "0");
    }

    #[test]
    fn test_unknown_entrypoint_rejected() {
        assert!(to_micheline("transfer", &json!({})).is_err());
    }
}
