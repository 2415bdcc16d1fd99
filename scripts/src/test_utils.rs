//! An in-memory [`DeployBackend`] for tests

use std::{collections::HashMap, fs, path::Path, sync::Mutex};

use alloy::primitives::{address, keccak256, Address, Bytes, TxHash};

use crate::{
    artifacts::artifact_path,
    backend::DeployBackend,
    errors::ScriptError,
    types::{Confirmation, DangoContract},
};

/// The deployer account of the mock backend
pub(crate) const MOCK_DEPLOYER: Address = address!("e0468E2A40877F0FB0839895b4eCC81A19C6Cd4d");

/// A transaction observed by the mock backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BackendEvent {
    /// A creation transaction was submitted
    Created {
        /// The nonce the transaction was sent with
        nonce: u64,
        /// The init code of the creation
        init_code: Bytes,
    },
    /// A contract call was submitted
    Called {
        /// The nonce the transaction was sent with
        nonce: u64,
        /// The called contract
        to: Address,
        /// The calldata
        calldata: Bytes,
    },
    /// The transaction with the given nonce was confirmed
    Confirmed {
        /// The nonce of the confirmed transaction
        nonce: u64,
    },
}

/// A submitted, unconfirmed transaction
struct PendingTx {
    /// The nonce the transaction was sent with
    nonce: u64,
    /// Whether the transaction creates a contract
    creation: bool,
    /// Whether the transaction will execute successfully
    success: bool,
}

/// The mutable state of the mock chain
#[derive(Default)]
struct MockState {
    /// The deployer's next nonce
    nonce: u64,
    /// The number of creations submitted so far
    creations: usize,
    /// The number of confirmations handed out so far
    confirmations: usize,
    /// Everything the backend was asked to do, in order
    events: Vec<BackendEvent>,
    /// Submitted transactions awaiting confirmation
    pending: HashMap<TxHash, PendingTx>,
}

/// A mock chain holding a single deployer account.
///
/// Contracts land at their `CREATE` address, and failures can be injected
/// per creation index.
pub(crate) struct MockBackend {
    /// The state of the chain
    state: Mutex<MockState>,
    /// The creation index at which submission fails
    fail_creation_at: Option<usize>,
    /// The creation index at which execution reverts
    revert_creation_at: Option<usize>,
    /// Whether contract calls revert
    revert_calls: bool,
    /// After this many confirmations, another transaction from the
    /// deployer sneaks in and consumes a nonce
    foreign_tx_after: Option<usize>,
}

impl MockBackend {
    /// A mock chain on which the deployer has already sent `nonce` transactions
    pub(crate) fn new(nonce: u64) -> Self {
        Self {
            state: Mutex::new(MockState {
                nonce,
                ..Default::default()
            }),
            fail_creation_at: None,
            revert_creation_at: None,
            revert_calls: false,
            foreign_tx_after: None,
        }
    }

    /// Fail submission of the `index`th creation
    pub(crate) fn fail_creation(mut self, index: usize) -> Self {
        self.fail_creation_at = Some(index);
        self
    }

    /// Revert execution of the `index`th creation
    pub(crate) fn revert_creation(mut self, index: usize) -> Self {
        self.revert_creation_at = Some(index);
        self
    }

    /// Revert every contract call
    pub(crate) fn revert_calls(mut self) -> Self {
        self.revert_calls = true;
        self
    }

    /// Consume a nonce out-of-band after `confirmations` confirmations
    pub(crate) fn foreign_tx_after(mut self, confirmations: usize) -> Self {
        self.foreign_tx_after = Some(confirmations);
        self
    }

    /// Everything the backend was asked to do, in order
    pub(crate) fn events(&self) -> Vec<BackendEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Records a submitted transaction, consuming a nonce
    fn submit(
        &self,
        event: impl FnOnce(u64) -> BackendEvent,
        creation: bool,
        success: bool,
    ) -> TxHash {
        let mut state = self.state.lock().unwrap();
        let nonce = state.nonce;
        state.nonce += 1;

        let tx_hash = keccak256(nonce.to_be_bytes());
        state.events.push(event(nonce));
        state.pending.insert(
            tx_hash,
            PendingTx {
                nonce,
                creation,
                success,
            },
        );

        tx_hash
    }
}

impl DeployBackend for MockBackend {
    fn deployer(&self) -> Address {
        MOCK_DEPLOYER
    }

    async fn transaction_count(&self) -> Result<u64, ScriptError> {
        Ok(self.state.lock().unwrap().nonce)
    }

    async fn send_creation(&self, init_code: Bytes) -> Result<TxHash, ScriptError> {
        let index = {
            let mut state = self.state.lock().unwrap();
            state.creations += 1;
            state.creations - 1
        };
        if self.fail_creation_at == Some(index) {
            return Err(ScriptError::ContractDeployment(
                "simulated submission failure".to_string(),
            ));
        }

        let success = self.revert_creation_at != Some(index);
        Ok(self.submit(|nonce| BackendEvent::Created { nonce, init_code }, true, success))
    }

    async fn send_call(&self, to: Address, calldata: Bytes) -> Result<TxHash, ScriptError> {
        let success = !self.revert_calls;
        Ok(self.submit(
            |nonce| BackendEvent::Called {
                nonce,
                to,
                calldata,
            },
            false,
            success,
        ))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ScriptError> {
        let mut state = self.state.lock().unwrap();
        let pending = state.pending.remove(&tx_hash).ok_or_else(|| {
            ScriptError::ContractInteraction(format!("unknown transaction {tx_hash:#x}"))
        })?;

        state.events.push(BackendEvent::Confirmed {
            nonce: pending.nonce,
        });
        state.confirmations += 1;
        if self.foreign_tx_after == Some(state.confirmations) {
            state.nonce += 1;
        }

        let contract_address =
            (pending.creation && pending.success).then(|| MOCK_DEPLOYER.create(pending.nonce));
        Ok(Confirmation {
            tx_hash,
            success: pending.success,
            contract_address,
        })
    }
}

/// Writes a Hardhat-layout artifact with the given bytecode for `contract`
pub(crate) fn write_artifact(dir: &Path, contract: DangoContract, bytecode: &str) {
    let path = artifact_path(dir, contract);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        path,
        format!(r#"{{"contractName":"{contract}","abi":[],"bytecode":"{bytecode}"}}"#),
    )
    .unwrap();
}
