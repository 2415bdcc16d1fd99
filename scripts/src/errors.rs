//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error initializing the RPC client or the signer
    ClientInitialization(String),
    /// Error resolving a network profile into a connection config
    NetworkConfig(String),
    /// A required environment variable was not set
    MissingEnv(String),
    /// Error parsing an account address
    AddressParsing(String),
    /// Error loading a contract's compilation artifact
    ArtifactLoading(String),
    /// Error fetching the nonce of the deployer
    NonceFetching(String),
    /// A nonce offset ran past the largest representable nonce
    NonceOverflow(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A contract was not deployed at the address it was predicted to have
    PredictionMismatch(String),
    /// Error spawning the local fork node
    ForkNode(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::NetworkConfig(s) => write!(f, "invalid network configuration: {}", s),
            ScriptError::MissingEnv(s) => {
                write!(f, "missing required environment variable: {}", s)
            }
            ScriptError::AddressParsing(s) => write!(f, "error parsing address: {}", s),
            ScriptError::ArtifactLoading(s) => write!(f, "error loading artifact: {}", s),
            ScriptError::NonceFetching(s) => write!(f, "error fetching nonce: {}", s),
            ScriptError::NonceOverflow(s) => write!(f, "nonce overflow: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::PredictionMismatch(s) => {
                write!(f, "contract address prediction mismatch: {}", s)
            }
            ScriptError::ForkNode(s) => write!(f, "error running fork node: {}", s),
        }
    }
}

impl Error for ScriptError {}
