//! Prediction of the address a contract will receive when deployed with `CREATE`

use std::str::FromStr;

use alloy::{
    primitives::{keccak256, Address},
    rlp::{Encodable, Header},
};

use crate::{
    constants::{NUM_BYTES_ADDRESS, NUM_BYTES_HASH},
    errors::ScriptError,
};

/// Computes the address of the contract created by `deployer` at `nonce`.
///
/// This is the rightmost 20 bytes of the keccak-256 digest of the RLP-encoded
/// list `[deployer, nonce]`.
pub fn predict_create_address(deployer: Address, nonce: u64) -> Address {
    let payload_length = deployer.length() + nonce.length();
    let mut encoded = Vec::with_capacity(payload_length + 1);
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut encoded);
    deployer.encode(&mut encoded);
    nonce.encode(&mut encoded);

    let digest = keccak256(&encoded);
    Address::from_slice(&digest[NUM_BYTES_HASH - NUM_BYTES_ADDRESS..])
}

/// Parses the deployer address from hex, then predicts as in [`predict_create_address`]
pub fn predict_create_address_from_hex(deployer: &str, nonce: u64) -> Result<Address, ScriptError> {
    let deployer = parse_address(deployer)?;
    Ok(predict_create_address(deployer, nonce))
}

/// Predicts the address of the contract `offset` transactions after the
/// deployer's current nonce. An offset of zero is the deployer's next transaction.
pub fn predict_nth_deployment(
    deployer: Address,
    current_nonce: u64,
    offset: u64,
) -> Result<Address, ScriptError> {
    let nonce = current_nonce.checked_add(offset).ok_or_else(|| {
        ScriptError::NonceOverflow(format!("nonce {current_nonce} + {offset} overflows"))
    })?;

    Ok(predict_create_address(deployer, nonce))
}

/// Parses a hex-encoded account address, with or without the `0x` prefix
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address.trim())
        .map_err(|e| ScriptError::AddressParsing(format!("`{address}`: {e}")))
}
