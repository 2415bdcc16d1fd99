//! Implementations of the deploy scripts

use std::path::PathBuf;

use alloy::primitives::Address;
use tracing::info;

use crate::{
    artifacts::load_artifact,
    backend::DeployBackend,
    errors::ScriptError,
    predictor::predict_nth_deployment,
    sequencer::Sequencer,
    solidity::{
        aave_executor_constructor_args, add_access_calldata, dango_executor_constructor_args,
        dango_receiver_constructor_args,
    },
    types::{DangoContract, DeploymentRecord},
};

/// The inputs of the Dango receiver / executor deployment
#[derive(Clone, Debug)]
pub struct DangoDeployConfig {
    /// The directory holding the compilation artifacts
    pub artifacts_dir: PathBuf,
    /// The Aave `LendingPoolAddressesProvider`
    pub aave_address_provider: Address,
    /// The Aave `ProtocolDataProvider`
    pub aave_data_provider: Address,
    /// The account granted access to the receiver once deployed
    pub access_grantee: Address,
}

/// The inputs of the `AaveExecutor` deployment
#[derive(Clone, Debug)]
pub struct AaveExecutorDeployConfig {
    /// The directory holding the compilation artifacts
    pub artifacts_dir: PathBuf,
    /// The Aave `LendingPool`
    pub lending_pool: Address,
    /// The Aave `ProtocolDataProvider`
    pub data_provider: Address,
    /// The Aave incentives controller
    pub incentives_controller: Address,
}

/// Deploys the `DangoReceiver` and the `DangoExecutor` it forwards to.
///
/// The receiver's constructor takes the executor's address, so the executor's
/// address is predicted from the deployer's nonce before either is deployed.
pub async fn deploy_dango<B: DeployBackend>(
    config: &DangoDeployConfig,
    backend: B,
) -> Result<Vec<DeploymentRecord>, ScriptError> {
    let receiver_artifact = load_artifact(&config.artifacts_dir, DangoContract::DangoReceiver)?;
    let executor_artifact = load_artifact(&config.artifacts_dir, DangoContract::DangoExecutor)?;

    let mut sequencer = Sequencer::new(backend);
    let deployer = sequencer.backend().deployer();
    let nonce = sequencer.backend().transaction_count().await?;

    // The receiver is created at `nonce`, the executor by the transaction after it
    let executor_address = predict_nth_deployment(deployer, nonce, 1)?;
    info!("Deployer {deployer:#x} at nonce {nonce}, executor expected at {executor_address:#x}");

    let receiver = sequencer
        .deploy(
            &receiver_artifact,
            dango_receiver_constructor_args(
                config.aave_address_provider,
                executor_address,
                config.aave_data_provider,
            ),
        )
        .await?;

    sequencer
        .deploy_at(
            &executor_artifact,
            dango_executor_constructor_args(
                receiver.address,
                config.aave_address_provider,
                config.aave_data_provider,
            ),
            executor_address,
        )
        .await?;

    sequencer
        .call(
            receiver.address,
            add_access_calldata(config.access_grantee),
            "DangoReceiver.addAccess",
        )
        .await?;

    Ok(sequencer.into_records())
}

/// Deploys the standalone `AaveExecutor`
pub async fn deploy_aave_executor<B: DeployBackend>(
    config: &AaveExecutorDeployConfig,
    backend: B,
) -> Result<Vec<DeploymentRecord>, ScriptError> {
    let artifact = load_artifact(&config.artifacts_dir, DangoContract::AaveExecutor)?;

    let mut sequencer = Sequencer::new(backend);
    sequencer
        .deploy(
            &artifact,
            aave_executor_constructor_args(
                config.lending_pool,
                config.data_provider,
                config.incentives_controller,
            ),
        )
        .await?;

    Ok(sequencer.into_records())
}
