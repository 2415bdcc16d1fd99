//! Named network profiles and their resolution into connection configs

use std::fmt::{self, Display};

use clap::ValueEnum;

use crate::{
    constants::{
        ALCHEMY_ID_ENV_VAR, ALCHEMY_KOVAN_URL_PREFIX, HARDHAT_BLOCK_GAS_LIMIT,
        HARDHAT_FORK_BLOCK_NUMBER, INFURA_ID_ENV_VAR, INFURA_POLYGON_URL_PREFIX,
        PRIVATE_KEY_ENV_VAR,
    },
    errors::ScriptError,
};

/// The networks the contracts can be deployed to
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// A local fork of Kovan
    Hardhat,
    /// The Kovan testnet
    Kovan,
    /// Polygon mainnet
    Polygon,
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Hardhat => write!(f, "hardhat"),
            Network::Kovan => write!(f, "kovan"),
            Network::Polygon => write!(f, "polygon"),
        }
    }
}

/// The credentials and overrides a network profile is resolved against
#[derive(Clone, Debug, Default)]
pub struct NetworkEnv {
    /// The Alchemy API key
    pub alchemy_id: Option<String>,
    /// The Infura project ID
    pub infura_id: Option<String>,
    /// The deployer's private key
    pub private_key: Option<String>,
    /// Replaces the profile's endpoint. For a fork, this is the URL forked from.
    pub rpc_url: Option<String>,
}

/// A local node forking a remote chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForkConfig {
    /// The RPC URL of the forked chain
    pub fork_url: String,
    /// The block to fork at, the latest block if unset
    pub block_number: Option<u64>,
    /// The block gas limit of the local node
    pub block_gas_limit: Option<u64>,
}

/// Where transactions are sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// A remote JSON-RPC node
    Remote(String),
    /// A local fork node spawned for the run
    Fork(ForkConfig),
}

/// Who signs transactions
#[derive(Clone, PartialEq, Eq)]
pub enum SignerSource {
    /// A hex-encoded private key
    PrivateKey(String),
    /// The first development account of the fork node
    ForkDevAccount,
}

impl fmt::Debug for SignerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerSource::PrivateKey(_) => write!(f, "PrivateKey(<redacted>)"),
            SignerSource::ForkDevAccount => write!(f, "ForkDevAccount"),
        }
    }
}

/// A network profile resolved against its credentials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    /// The profile this config was resolved from
    pub network: Network,
    /// Where transactions are sent
    pub endpoint: Endpoint,
    /// Who signs transactions
    pub signer: SignerSource,
}

impl Network {
    /// Resolves the profile's endpoint and signer from the given credentials
    pub fn resolve(self, env: &NetworkEnv) -> Result<NetworkConfig, ScriptError> {
        let (endpoint, signer) = match self {
            Network::Hardhat => {
                let fork_url = match &env.rpc_url {
                    Some(url) => url.clone(),
                    None => alchemy_kovan_url(env)?,
                };
                let fork = ForkConfig {
                    fork_url,
                    block_number: Some(HARDHAT_FORK_BLOCK_NUMBER),
                    block_gas_limit: Some(HARDHAT_BLOCK_GAS_LIMIT),
                };

                // The fork always signs with its own development accounts
                (Endpoint::Fork(fork), SignerSource::ForkDevAccount)
            }
            Network::Kovan => {
                let url = match &env.rpc_url {
                    Some(url) => url.clone(),
                    None => alchemy_kovan_url(env)?,
                };
                (Endpoint::Remote(url), SignerSource::PrivateKey(private_key(env)?))
            }
            Network::Polygon => {
                let url = match &env.rpc_url {
                    Some(url) => url.clone(),
                    None => {
                        let infura_id = required(&env.infura_id, INFURA_ID_ENV_VAR)?;
                        format!("{INFURA_POLYGON_URL_PREFIX}{infura_id}")
                    }
                };
                (Endpoint::Remote(url), SignerSource::PrivateKey(private_key(env)?))
            }
        };

        Ok(NetworkConfig {
            network: self,
            endpoint,
            signer,
        })
    }
}

/// The Alchemy Kovan endpoint for the configured API key
fn alchemy_kovan_url(env: &NetworkEnv) -> Result<String, ScriptError> {
    let alchemy_id = required(&env.alchemy_id, ALCHEMY_ID_ENV_VAR)?;
    Ok(format!("{ALCHEMY_KOVAN_URL_PREFIX}{alchemy_id}"))
}

/// The configured private key
fn private_key(env: &NetworkEnv) -> Result<String, ScriptError> {
    required(&env.private_key, PRIVATE_KEY_ENV_VAR).map(str::to_string)
}

/// Unwraps a configured value, treating an empty string as unset
fn required<'a>(value: &'a Option<String>, env_var: &str) -> Result<&'a str, ScriptError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScriptError::MissingEnv(env_var.to_string()))
}
