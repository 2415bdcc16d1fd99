//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::primitives::{Address, Bytes, TxHash};

/// The contracts deployed by the scripts
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DangoContract {
    /// The flash loan receiver
    DangoReceiver,
    /// The executor wired into the receiver
    DangoExecutor,
    /// The standalone Aave executor
    AaveExecutor,
}

impl DangoContract {
    /// The Solidity contract name, as it appears in the compilation artifacts
    pub fn artifact_name(&self) -> &'static str {
        match self {
            DangoContract::DangoReceiver => "DangoReceiver",
            DangoContract::DangoExecutor => "DangoExecutor",
            DangoContract::AaveExecutor => "AaveExecutor",
        }
    }
}

impl Display for DangoContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.artifact_name())
    }
}

/// The creation bytecode of a contract, read from its compilation artifact
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    /// The contract the bytecode belongs to
    pub contract: DangoContract,
    /// The creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// The init code for a creation transaction with the given
    /// ABI-encoded constructor arguments
    pub fn init_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + constructor_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(constructor_args);
        code.into()
    }
}

/// A contract deployed during a run of the scripts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRecord {
    /// The deployed contract
    pub contract: DangoContract,
    /// The address at which the contract was deployed
    pub address: Address,
    /// The ABI-encoded constructor arguments
    pub constructor_args: Bytes,
    /// The hash of the creation transaction
    pub tx_hash: TxHash,
}

impl Display for DeploymentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#x}", self.contract, self.address)
    }
}

/// The outcome of a confirmed transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Confirmation {
    /// The transaction hash
    pub tx_hash: TxHash,
    /// Whether the transaction executed successfully
    pub success: bool,
    /// The address of the created contract, if any
    pub contract_address: Option<Address>,
}
