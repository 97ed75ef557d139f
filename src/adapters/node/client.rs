//! Chain Client Adapter - Node RPC + Indexer Reads
//!
//! Implements the chain-client port for one configured (chain, network)
//! pair. The client owns the token registry and the signer table; it is
//! constructed once in `main` and passed down explicitly, never held as a
//! global.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::{GatewayConfig, SignerConfig, SubmitConfig};
use crate::domain::token::{NativeToken, TokenInfo, TokenStandard};
use crate::ports::chain_client::{ChainClient, MempoolSnapshot, Wallet};

use super::types::{BlockHeaderDto, MempoolDto, TokenBalanceDto};
use super::wallet::NodeWallet;
use super::get_json;

/// Chain client over a Tezos node RPC and an indexer REST API.
pub struct RpcChainClient {
    http: reqwest::Client,
    node_url: String,
    indexer_url: String,
    network: String,
    native: NativeToken,
    registry: BTreeMap<String, TokenInfo>,
    signers: HashMap<String, SignerConfig>,
    submit: SubmitConfig,
}

impl RpcChainClient {
    /// Build a client from validated gateway configuration.
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.server.request_timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;

        let registry = config
            .tokens
            .iter()
            .map(|token| (token.symbol.clone(), token.clone()))
            .collect();
        let signers = config
            .signers
            .iter()
            .map(|signer| (signer.address.clone(), signer.clone()))
            .collect();

        Ok(Self {
            http,
            node_url: config.network.node_url.trim_end_matches('/').to_string(),
            indexer_url: config.network.indexer_url.trim_end_matches('/').to_string(),
            network: config.network.name.clone(),
            native: NativeToken {
                symbol: config.network.native_symbol.clone(),
                decimals: config.network.native_decimals,
            },
            registry,
            signers,
            submit: config.submit.clone(),
        })
    }

    fn node_path(&self, path: &str) -> String {
        format!("{}{}", self.node_url, path)
    }

    fn indexer_path(&self, path: &str) -> String {
        format!("{}{}", self.indexer_url, path)
    }

    /// Raw token balance from the indexer's token-balances listing. An
    /// account with no entry simply holds zero.
    async fn indexer_token_balance(
        &self,
        token: &TokenInfo,
        token_id: u64,
        owner: &str,
    ) -> anyhow::Result<BigUint> {
        let url = self.indexer_path(&format!(
            "/v1/tokens/balances?account={owner}&token.contract={}&token.tokenId={token_id}&limit=1",
            token.address
        ));
        let entries: Vec<TokenBalanceDto> = get_json(&self.http, url).await?;
        let Some(balance) = entries.into_iter().find_map(|entry| entry.balance) else {
            return Ok(BigUint::zero());
        };
        balance
            .parse::<BigUint>()
            .with_context(|| format!("indexer returned a non-numeric balance for {}", token.symbol))
    }

    /// Whether `operator` is an active operator of `owner` for the asset id,
    /// per the contract's operators big map.
    async fn is_operator(
        &self,
        token: &TokenInfo,
        token_id: u64,
        owner: &str,
        operator: &str,
    ) -> anyhow::Result<bool> {
        let url = self.indexer_path(&format!(
            "/v1/contracts/{}/bigmaps/operators/keys?active=true&key.owner={owner}&key.operator={operator}&key.token_id={token_id}&limit=1",
            token.address
        ));
        let entries: Vec<Value> = get_json(&self.http, url).await?;
        Ok(!entries.is_empty())
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    fn network(&self) -> &str {
        &self.network
    }

    fn native_token(&self) -> &NativeToken {
        &self.native
    }

    fn token_info(&self, symbol: &str) -> Option<TokenInfo> {
        self.registry.get(symbol).cloned()
    }

    async fn chain_id(&self) -> anyhow::Result<String> {
        get_json(&self.http, self.node_path("/chains/main/chain_id")).await
    }

    async fn head_level(&self) -> anyhow::Result<u64> {
        let header: BlockHeaderDto =
            get_json(&self.http, self.node_path("/chains/main/blocks/head/header")).await?;
        Ok(header.level)
    }

    async fn account_counter(&self, address: &str) -> anyhow::Result<u64> {
        let counter: String = get_json(
            &self.http,
            self.node_path(&format!(
                "/chains/main/blocks/head/context/contracts/{address}/counter"
            )),
        )
        .await?;
        counter
            .parse::<u64>()
            .with_context(|| format!("node returned a non-numeric counter for {address}"))
    }

    async fn native_balance(&self, address: &str) -> anyhow::Result<BigUint> {
        let balance: String = get_json(
            &self.http,
            self.node_path(&format!(
                "/chains/main/blocks/head/context/contracts/{address}/balance"
            )),
        )
        .await?;
        balance
            .parse::<BigUint>()
            .with_context(|| format!("node returned a non-numeric balance for {address}"))
    }

    async fn token_balance(&self, token: &TokenInfo, owner: &str) -> anyhow::Result<BigUint> {
        let token_id = token
            .token_id
            .ok_or_else(|| anyhow!("token {} has no asset id", token.symbol))?;
        self.indexer_token_balance(token, token_id, owner).await
    }

    async fn token_allowance(
        &self,
        token: &TokenInfo,
        owner: &str,
        spender: &str,
    ) -> anyhow::Result<BigUint> {
        match token.standard {
            // The allowance aggregator answers fa1.2 without a chain query.
            TokenStandard::Fa12 => Err(anyhow!(
                "token {} has no queryable allowance",
                token.symbol
            )),
            TokenStandard::Fa2 => {
                let token_id = token
                    .token_id
                    .ok_or_else(|| anyhow!("token {} has no asset id", token.symbol))?;
                if self.is_operator(token, token_id, owner, spender).await? {
                    // Operator rights are unbounded; what the spender can
                    // actually move is the owner's balance.
                    self.indexer_token_balance(token, token_id, owner).await
                } else {
                    Ok(BigUint::zero())
                }
            }
        }
    }

    async fn mempool_snapshot(&self) -> anyhow::Result<MempoolSnapshot> {
        let mempool: MempoolDto = get_json(
            &self.http,
            self.node_path("/chains/main/mempool/pending_operations"),
        )
        .await?;
        Ok(MempoolSnapshot {
            applied: mempool.applied.into_iter().map(|op| op.into_pending()).collect(),
            branch_delayed: mempool
                .branch_delayed
                .into_iter()
                .map(|op| op.into_pending())
                .collect(),
            branch_refused: mempool
                .branch_refused
                .into_iter()
                .map(|op| op.into_pending())
                .collect(),
            refused: mempool.refused.into_iter().map(|op| op.into_pending()).collect(),
            unprocessed: mempool
                .unprocessed
                .into_iter()
                .map(|op| op.into_pending())
                .collect(),
        })
    }

    async fn find_transaction(&self, hash: &str) -> anyhow::Result<Option<Value>> {
        let url = self.indexer_path(&format!("/v1/operations/transactions/{hash}"));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        anyhow::ensure!(
            response.status().is_success(),
            "GET {url} returned {}",
            response.status()
        );
        let operations: Vec<Value> = response
            .json()
            .await
            .with_context(|| format!("GET {url} returned an unexpected body"))?;
        if operations.is_empty() {
            debug!(hash, "transaction unknown to the finalized chain");
            return Ok(None);
        }
        Ok(Some(Value::Array(operations)))
    }

    async fn wallet(&self, address: &str) -> anyhow::Result<Box<dyn Wallet>> {
        let signer = self
            .signers
            .get(address)
            .ok_or_else(|| anyhow!("no signer configured for {address}"))?;
        let wallet = NodeWallet::load(
            self.http.clone(),
            self.node_url.clone(),
            self.indexer_url.clone(),
            signer,
            self.submit.clone(),
        )?;
        Ok(Box::new(wallet))
    }
}
