//! Utilities for the deploy scripts.

use std::str::FromStr;

use alloy::{
    node_bindings::{Anvil, AnvilInstance},
    primitives::B256,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{
    backend::RpcBackend,
    constants::{ANVIL_COMMAND, ANVIL_GAS_LIMIT_FLAG},
    errors::ScriptError,
    networks::{Endpoint, ForkConfig, NetworkConfig, SignerSource},
};

/// A connection to the network the contracts are deployed to.
///
/// Holds on to the fork node, if one was spawned, which is killed when
/// the connection is dropped.
pub struct Connection {
    /// The backend deployments are sent through
    backend: RpcBackend,
    /// The local fork node
    _fork: Option<AnvilInstance>,
}

impl Connection {
    /// The backend deployments are sent through
    pub fn backend(&self) -> &RpcBackend {
        &self.backend
    }
}

/// Sets up the signing client for the given network, spawning a local
/// fork node first if the network is a fork
pub async fn setup_client(
    config: &NetworkConfig,
    confirmations: u64,
) -> Result<Connection, ScriptError> {
    let (url, signer, fork) = match &config.endpoint {
        Endpoint::Remote(url) => {
            let url = Url::parse(url).map_err(|e| ScriptError::NetworkConfig(e.to_string()))?;
            let SignerSource::PrivateKey(key) = &config.signer else {
                return Err(ScriptError::NetworkConfig(format!(
                    "{} requires a private key",
                    config.network
                )));
            };
            (url, parse_signer(key)?, None)
        }
        Endpoint::Fork(fork_config) => {
            let fork = spawn_fork(fork_config)?;
            let signer = match &config.signer {
                SignerSource::PrivateKey(key) => parse_signer(key)?,
                SignerSource::ForkDevAccount => fork_dev_signer(&fork)?,
            };
            (fork.endpoint_url(), signer, Some(fork))
        }
    };

    let deployer = signer.address();
    let provider = DynProvider::new(ProviderBuilder::new().wallet(signer).connect_http(url));

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!(
        "Connected to {} (chain ID {chain_id}) as {deployer:#x}",
        config.network
    );

    Ok(Connection {
        backend: RpcBackend::new(provider, deployer, confirmations),
        _fork: fork,
    })
}

/// Parses a hex-encoded private key, with or without the `0x` prefix
pub fn parse_signer(key: &str) -> Result<PrivateKeySigner, ScriptError> {
    let key = key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    PrivateKeySigner::from_str(key)
        .map_err(|e| ScriptError::ClientInitialization(format!("invalid private key: {e}")))
}

/// Spawns a local `anvil` node forking the configured chain
pub fn spawn_fork(config: &ForkConfig) -> Result<AnvilInstance, ScriptError> {
    let mut anvil = Anvil::at(ANVIL_COMMAND).fork(config.fork_url.clone());
    if let Some(block_number) = config.block_number {
        anvil = anvil.fork_block_number(block_number);
    }
    if let Some(gas_limit) = config.block_gas_limit {
        anvil = anvil.arg(ANVIL_GAS_LIMIT_FLAG).arg(gas_limit.to_string());
    }

    let fork = anvil
        .try_spawn()
        .map_err(|e| ScriptError::ForkNode(e.to_string()))?;
    info!(
        "Forked {} at block {} on {}",
        redact_api_key(&config.fork_url),
        config
            .block_number
            .map_or_else(|| "latest".to_string(), |n| n.to_string()),
        fork.endpoint()
    );

    Ok(fork)
}

/// The signer of the fork node's first development account
fn fork_dev_signer(fork: &AnvilInstance) -> Result<PrivateKeySigner, ScriptError> {
    info!("Deploying from the fork's first development account");
    let key = fork.keys().first().ok_or_else(|| {
        ScriptError::ForkNode("fork node has no development accounts".to_string())
    })?;

    PrivateKeySigner::from_bytes(&B256::from_slice(&key.to_bytes()))
        .map_err(|e| ScriptError::ForkNode(format!("invalid development key: {e}")))
}

/// Strips the trailing path segment from a provider URL, which carries its API key
pub fn redact_api_key(url: &str) -> String {
    match url.rsplit_once('/') {
        Some((base, key)) if !key.is_empty() => format!("{base}/<redacted>"),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    /// The first default account of a Hardhat / Anvil node
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_parse_signer() {
        let expected = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(parse_signer(DEV_KEY).unwrap().address(), expected);
        assert_eq!(parse_signer(&format!("0x{DEV_KEY}")).unwrap().address(), expected);

        assert!(matches!(
            parse_signer("0x1234"),
            Err(ScriptError::ClientInitialization(_))
        ));
    }

    #[test]
    fn test_redact_api_key() {
        assert_eq!(
            redact_api_key("https://eth-kovan.alchemyapi.io/v2/secret"),
            "https://eth-kovan.alchemyapi.io/v2/<redacted>"
        );
        assert_eq!(redact_api_key("http://127.0.0.1:8545/"), "http://127.0.0.1:8545/");
    }
}
