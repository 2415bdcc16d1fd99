//! Definitions of CLI arguments and commands for deploy scripts

use std::path::{Path, PathBuf};

use alloy::primitives::{hex, Address};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    backend::DeployBackend,
    commands::{deploy_aave_executor, deploy_dango, AaveExecutorDeployConfig, DangoDeployConfig},
    constants::{
        DEFAULT_AAVE_ADDRESS_PROVIDER, DEFAULT_AAVE_DATA_PROVIDER,
        DEFAULT_AAVE_INCENTIVES_CONTROLLER, DEFAULT_AAVE_LENDING_POOL, DEFAULT_ACCESS_GRANTEE,
        DEFAULT_ARTIFACTS_DIR, DEFAULT_NUM_CONFIRMATIONS, MAX_NUM_CONFIRMATIONS,
    },
    errors::ScriptError,
    networks::{Network, NetworkConfig, NetworkEnv},
    predictor::parse_address,
    types::DeploymentRecord,
};

/// Deploy the Dango contracts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The network profile to deploy to
    #[arg(short, long, env = "DEPLOY_NETWORK", value_enum, default_value_t = Network::Hardhat)]
    pub network: Network,

    /// Overrides the profile's RPC URL. For the local fork, the URL forked from.
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Alchemy API key
    #[arg(long, env = "ALCHEMY_ID", hide_env_values = true)]
    pub alchemy_id: Option<String>,

    /// Infura project ID
    #[arg(long, env = "INFURA_ID", hide_env_values = true)]
    pub infura_id: Option<String>,

    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Block explorer API key. Verification is disabled, the constructor
    /// arguments needed to verify manually are logged instead.
    #[arg(long, env = "ETHERSCAN", hide_env_values = true)]
    pub etherscan_key: Option<String>,

    /// Directory holding the contract compilation artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Number of confirmations to wait for on each transaction
    #[arg(
        long,
        env = "DEPLOY_CONFIRMATIONS",
        default_value_t = DEFAULT_NUM_CONFIRMATIONS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_NUM_CONFIRMATIONS)
    )]
    pub confirmations: u64,

    /// The deploy script to run, `dango` if unset
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Resolves the selected network profile against the given credentials
    pub fn network_config(&self) -> Result<NetworkConfig, ScriptError> {
        self.network.resolve(&NetworkEnv {
            alchemy_id: self.alchemy_id.clone(),
            infura_id: self.infura_id.clone(),
            private_key: self.priv_key.clone(),
            rpc_url: self.rpc_url.clone(),
        })
    }

    /// The deploy script to run
    pub fn command(&self) -> Result<Command, ScriptError> {
        match &self.command {
            Some(command) => Ok(command.clone()),
            None => DefaultCommand::try_parse_from(["dango"])
                .map(|default| Command::Dango(default.args))
                .map_err(|e| ScriptError::NetworkConfig(e.to_string())),
        }
    }
}

/// Parses the `dango` script's arguments from their defaults and the environment
#[derive(Parser)]
struct DefaultCommand {
    /// The `dango` script's arguments
    #[command(flatten)]
    args: DangoArgs,
}

/// The deploy scripts
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Deploy the `DangoReceiver` and `DangoExecutor`
    Dango(DangoArgs),
    /// Deploy the `AaveExecutor`
    AaveExecutor(AaveExecutorArgs),
}

impl Command {
    /// Runs the deploy script, printing the deployed addresses
    pub async fn run(
        self,
        backend: impl DeployBackend,
        artifacts_dir: &Path,
        log_verification_args: bool,
    ) -> Result<(), ScriptError> {
        let records = match self {
            Command::Dango(args) => {
                let config = DangoDeployConfig {
                    artifacts_dir: artifacts_dir.to_path_buf(),
                    aave_address_provider: args.aave_address_provider,
                    aave_data_provider: args.aave_data_provider,
                    access_grantee: args.access_grantee,
                };
                deploy_dango(&config, backend).await?
            }
            Command::AaveExecutor(args) => {
                let config = AaveExecutorDeployConfig {
                    artifacts_dir: artifacts_dir.to_path_buf(),
                    lending_pool: args.lending_pool,
                    data_provider: args.data_provider,
                    incentives_controller: args.incentives_controller,
                };
                deploy_aave_executor(&config, backend).await?
            }
        };

        report(&records, log_verification_args);
        Ok(())
    }
}

/// Prints the deployed addresses to stdout
fn report(records: &[DeploymentRecord], log_verification_args: bool) {
    for record in records {
        println!("{record}");
        if log_verification_args {
            info!(
                "Verify {} at {:#x} with constructor arguments {}",
                record.contract,
                record.address,
                hex::encode(&record.constructor_args)
            );
        }
    }
}

/// Deploy the `DangoReceiver`, then the `DangoExecutor` it forwards to
#[derive(Args, Clone, Debug)]
pub struct DangoArgs {
    /// Aave `LendingPoolAddressesProvider` address in hex
    #[arg(
        long,
        env = "AAVE_ADDRESS_PROVIDER",
        default_value = DEFAULT_AAVE_ADDRESS_PROVIDER,
        value_parser = parse_address
    )]
    pub aave_address_provider: Address,

    /// Aave `ProtocolDataProvider` address in hex
    #[arg(
        long,
        env = "AAVE_DATA_PROVIDER",
        default_value = DEFAULT_AAVE_DATA_PROVIDER,
        value_parser = parse_address
    )]
    pub aave_data_provider: Address,

    /// Address granted access to the `DangoReceiver` once deployed
    #[arg(
        long,
        env = "ACCESS_GRANTEE",
        default_value = DEFAULT_ACCESS_GRANTEE,
        value_parser = parse_address
    )]
    pub access_grantee: Address,
}

/// Deploy the standalone `AaveExecutor`
#[derive(Args, Clone, Debug)]
pub struct AaveExecutorArgs {
    /// Aave `LendingPool` address in hex
    #[arg(
        long,
        env = "AAVE_LENDING_POOL",
        default_value = DEFAULT_AAVE_LENDING_POOL,
        value_parser = parse_address
    )]
    pub lending_pool: Address,

    /// Aave `ProtocolDataProvider` address in hex
    #[arg(
        long,
        env = "AAVE_DATA_PROVIDER",
        default_value = DEFAULT_AAVE_DATA_PROVIDER,
        value_parser = parse_address
    )]
    pub data_provider: Address,

    /// Aave incentives controller address in hex
    #[arg(
        long,
        env = "AAVE_INCENTIVES_CONTROLLER",
        default_value = DEFAULT_AAVE_INCENTIVES_CONTROLLER,
        value_parser = parse_address
    )]
    pub incentives_controller: Address,
}
