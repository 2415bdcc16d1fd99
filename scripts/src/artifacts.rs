//! Loading of contract creation bytecode from compilation artifacts

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::primitives::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{JSON_EXTENSION, SOLIDITY_EXTENSION},
    errors::ScriptError,
    types::{ContractArtifact, DangoContract},
};

/// The subset of a compilation artifact read by the scripts
#[derive(Deserialize)]
struct ArtifactFile {
    /// The creation bytecode
    bytecode: ArtifactBytecode,
}

/// Hardhat stores the bytecode as a hex string, Foundry nests it under `object`
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// `"bytecode": "0x..."`
    Hex(String),
    /// `"bytecode": { "object": "0x...", ... }`
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl ArtifactBytecode {
    /// The hex-encoded bytecode
    fn hex(&self) -> &str {
        match self {
            ArtifactBytecode::Hex(hex) => hex,
            ArtifactBytecode::Object { object } => object,
        }
    }
}

/// The path of a contract's artifact, following the
/// `<artifacts_dir>/<Name>.sol/<Name>.json` layout
pub fn artifact_path(artifacts_dir: &Path, contract: DangoContract) -> PathBuf {
    let name = contract.artifact_name();
    artifacts_dir
        .join(format!("{name}.{SOLIDITY_EXTENSION}"))
        .join(format!("{name}.{JSON_EXTENSION}"))
}

/// Reads the creation bytecode of the given contract from the artifacts directory
pub fn load_artifact(
    artifacts_dir: &Path,
    contract: DangoContract,
) -> Result<ContractArtifact, ScriptError> {
    let path = artifact_path(artifacts_dir, contract);
    debug!("Loading {} artifact from {}", contract, path.display());

    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {e}", path.display())))?;
    parse_artifact(contract, &contents)
}

/// Parses the creation bytecode out of a JSON compilation artifact
pub fn parse_artifact(
    contract: DangoContract,
    contents: &str,
) -> Result<ContractArtifact, ScriptError> {
    let artifact: ArtifactFile = serde_json::from_str(contents)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{contract}: {e}")))?;

    let bytecode = Bytes::from_str(artifact.bytecode.hex())
        .map_err(|e| ScriptError::ArtifactLoading(format!("{contract} bytecode: {e}")))?;

    // Interfaces and abstract contracts compile to empty bytecode
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactLoading(format!(
            "{contract} has no creation bytecode"
        )));
    }

    Ok(ContractArtifact { contract, bytecode })
}
