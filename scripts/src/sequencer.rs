//! Strictly sequential deployment of contracts

use alloy::primitives::{Address, Bytes, TxHash};
use tracing::{info, warn};

use crate::{
    backend::DeployBackend,
    errors::ScriptError,
    types::{ContractArtifact, DeploymentRecord},
};

/// Deploys contracts one at a time, each only after the previous
/// transaction has been confirmed.
///
/// Nothing is rolled back on failure: contracts deployed before the failing
/// step stay on-chain and remain in [`Sequencer::records`].
pub struct Sequencer<B> {
    /// The backend transactions are sent through
    backend: B,
    /// The contracts deployed so far, in deployment order
    records: Vec<DeploymentRecord>,
}

impl<B: DeployBackend> Sequencer<B> {
    /// Creates a sequencer with no deployments
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
        }
    }

    /// The backend transactions are sent through
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The contracts deployed so far
    pub fn records(&self) -> &[DeploymentRecord] {
        &self.records
    }

    /// Consumes the sequencer, returning the contracts it deployed
    pub fn into_records(self) -> Vec<DeploymentRecord> {
        self.records
    }

    /// Deploys a contract and waits for the creation transaction to be confirmed
    pub async fn deploy(
        &mut self,
        artifact: &ContractArtifact,
        constructor_args: Bytes,
    ) -> Result<DeploymentRecord, ScriptError> {
        let contract = artifact.contract;
        info!("Deploying {contract}");

        let tx_hash = self
            .backend
            .send_creation(artifact.init_code(&constructor_args))
            .await?;
        let confirmation = self.backend.wait_for_confirmation(tx_hash).await?;

        if !confirmation.success {
            return Err(ScriptError::ContractDeployment(format!(
                "{contract} creation {tx_hash:#x} reverted"
            )));
        }
        let address = confirmation.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "{contract} creation {tx_hash:#x} has no contract address"
            ))
        })?;

        info!("{contract} deployed at {address:#x}");
        let record = DeploymentRecord {
            contract,
            address,
            constructor_args,
            tx_hash,
        };
        self.records.push(record.clone());

        Ok(record)
    }

    /// Deploys a contract whose address was predicted ahead of time and
    /// already handed to another contract
    pub async fn deploy_at(
        &mut self,
        artifact: &ContractArtifact,
        constructor_args: Bytes,
        expected: Address,
    ) -> Result<DeploymentRecord, ScriptError> {
        let record = self.deploy(artifact, constructor_args).await?;
        if record.address != expected {
            warn!(
                "{} landed at {:#x}, references to {:#x} are dangling",
                record.contract, record.address, expected
            );
            return Err(ScriptError::PredictionMismatch(format!(
                "{} deployed at {:#x}, expected {expected:#x}",
                record.contract, record.address
            )));
        }

        Ok(record)
    }

    /// Calls a deployed contract and waits for the call to be confirmed
    pub async fn call(
        &self,
        to: Address,
        calldata: Bytes,
        description: &str,
    ) -> Result<TxHash, ScriptError> {
        info!("Calling {description} on {to:#x}");

        let tx_hash = self.backend.send_call(to, calldata).await?;
        let confirmation = self.backend.wait_for_confirmation(tx_hash).await?;
        if !confirmation.success {
            return Err(ScriptError::ContractInteraction(format!(
                "{description} {tx_hash:#x} reverted"
            )));
        }

        Ok(tx_hash)
    }
}
