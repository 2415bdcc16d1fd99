//! Scripts for deploying and wiring the Dango smart contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod networks;
pub mod predictor;
pub mod sequencer;
mod solidity;
#[cfg(test)]
mod test_utils;
pub mod types;
pub mod utils;
