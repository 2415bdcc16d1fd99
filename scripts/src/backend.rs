//! The chain operations the deploy scripts rely on, and their JSON-RPC implementation

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use tracing::debug;

use crate::{
    constants::{RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_INTERVAL_MS},
    errors::ScriptError,
    types::Confirmation,
};

/// The operations a deployment needs from the network.
///
/// Submitting a transaction and waiting for its confirmation are separate
/// steps so that callers control when a transaction counts as landed.
#[allow(async_fn_in_trait)]
pub trait DeployBackend {
    /// The address transactions are sent from
    fn deployer(&self) -> Address;

    /// The number of transactions the deployer has sent so far,
    /// i.e. the nonce of its next transaction
    async fn transaction_count(&self) -> Result<u64, ScriptError>;

    /// Submits a contract creation transaction with the given init code
    async fn send_creation(&self, init_code: Bytes) -> Result<TxHash, ScriptError>;

    /// Submits a call to the given contract
    async fn send_call(&self, to: Address, calldata: Bytes) -> Result<TxHash, ScriptError>;

    /// Blocks until the given transaction is confirmed
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ScriptError>;
}

impl<T: DeployBackend> DeployBackend for &T {
    fn deployer(&self) -> Address {
        (**self).deployer()
    }

    async fn transaction_count(&self) -> Result<u64, ScriptError> {
        (**self).transaction_count().await
    }

    async fn send_creation(&self, init_code: Bytes) -> Result<TxHash, ScriptError> {
        (**self).send_creation(init_code).await
    }

    async fn send_call(&self, to: Address, calldata: Bytes) -> Result<TxHash, ScriptError> {
        (**self).send_call(to, calldata).await
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ScriptError> {
        (**self).wait_for_confirmation(tx_hash).await
    }
}

/// A [`DeployBackend`] talking to a JSON-RPC node through a signing provider
#[derive(Clone)]
pub struct RpcBackend {
    /// The signing provider
    provider: DynProvider,
    /// The address of the signer attached to the provider
    deployer: Address,
    /// The number of blocks a transaction must be buried under, itself included
    confirmations: u64,
    /// The interval between receipt polls
    poll_interval: Duration,
}

impl RpcBackend {
    /// Wraps a signing provider whose default sender is `deployer`
    pub fn new(provider: DynProvider, deployer: Address, confirmations: u64) -> Self {
        Self {
            provider,
            deployer,
            confirmations: confirmations.max(1),
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        }
    }

    /// Sends a transaction request and returns its hash
    async fn send(&self, tx: TransactionRequest) -> Result<TxHash, String> {
        let pending = self
            .provider
            .send_transaction(tx.with_from(self.deployer))
            .await
            .map_err(|e| e.to_string())?;

        Ok(*pending.tx_hash())
    }

    /// Waits until the chain head is `confirmations - 1` blocks past `mined_in`
    async fn wait_for_depth(&self, mined_in: u64) -> Result<(), ScriptError> {
        let target = confirmation_target(mined_in, self.confirmations);
        loop {
            let head = self
                .provider
                .get_block_number()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
            if head >= target {
                return Ok(());
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// The block the chain head must reach for a transaction mined in `mined_in`
/// to have `confirmations` confirmations
fn confirmation_target(mined_in: u64, confirmations: u64) -> u64 {
    mined_in.saturating_add(confirmations.saturating_sub(1))
}

impl DeployBackend for RpcBackend {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn transaction_count(&self) -> Result<u64, ScriptError> {
        // Count pending transactions, as the provider's nonce filler does
        self.provider
            .get_transaction_count(self.deployer)
            .pending()
            .await
            .map_err(|e| ScriptError::NonceFetching(e.to_string()))
    }

    async fn send_creation(&self, init_code: Bytes) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default().with_deploy_code(init_code);
        self.send(tx).await.map_err(ScriptError::ContractDeployment)
    }

    async fn send_call(&self, to: Address, calldata: Bytes) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default().with_to(to).with_input(calldata);
        self.send(tx).await.map_err(ScriptError::ContractInteraction)
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ScriptError> {
        // Poll for the receipt rather than watching the pending transaction,
        // some nodes drop the subscription on long waits
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

            if let Some(receipt) = receipt {
                if let Some(block) = receipt.block_number {
                    self.wait_for_depth(block).await?;
                }

                debug!("Transaction {tx_hash:#x} confirmed");
                return Ok(Confirmation {
                    tx_hash,
                    success: receipt.status(),
                    contract_address: receipt.contract_address,
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }

        Err(ScriptError::ContractInteraction(format!(
            "no receipt for {tx_hash:#x} after {RECEIPT_POLL_ATTEMPTS} attempts"
        )))
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        node_bindings::{Anvil, AnvilInstance},
        primitives::{bytes, B256},
        providers::ProviderBuilder,
        signers::local::PrivateKeySigner,
    };

    use super::*;

    /// Init code creating a contract with empty runtime code
    const EMPTY_INIT_CODE: Bytes = bytes!("00");

    /// Init code that reverts: `PUSH1 0 PUSH1 0 REVERT`
    const REVERTING_INIT_CODE: Bytes = bytes!("60006000fd");

    /// An `RpcBackend` signing with the node's first development account
    fn rpc_backend(anvil: &AnvilInstance, confirmations: u64) -> RpcBackend {
        let key = &anvil.keys()[0];
        let signer = PrivateKeySigner::from_bytes(&B256::from_slice(&key.to_bytes())).unwrap();
        let deployer = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(anvil.endpoint_url());

        RpcBackend {
            poll_interval: Duration::from_millis(50),
            ..RpcBackend::new(DynProvider::new(provider), deployer, confirmations)
        }
    }

    #[test]
    fn test_confirmation_target() {
        assert_eq!(confirmation_target(10, 1), 10);
        assert_eq!(confirmation_target(10, 3), 12);
        assert_eq!(confirmation_target(10, 0), 10);
        assert_eq!(confirmation_target(10, u64::MAX), u64::MAX);
        assert_eq!(confirmation_target(u64::MAX, 2), u64::MAX);
    }

    #[tokio::test]
    #[ignore = "requires the anvil binary"]
    async fn test_creation_lands_at_create_address() {
        let anvil = Anvil::new().try_spawn().unwrap();
        let backend = rpc_backend(&anvil, 1);
        assert_eq!(backend.transaction_count().await.unwrap(), 0);

        let tx_hash = backend.send_creation(EMPTY_INIT_CODE).await.unwrap();
        let confirmation = backend.wait_for_confirmation(tx_hash).await.unwrap();

        assert_eq!(confirmation.tx_hash, tx_hash);
        assert!(confirmation.success);
        assert_eq!(confirmation.contract_address, Some(backend.deployer().create(0)));
        assert_eq!(backend.transaction_count().await.unwrap(), 1);
    }

    #[tokio::test]
    #[ignore = "requires the anvil binary"]
    async fn test_reverted_creation_is_unsuccessful() {
        let anvil = Anvil::new().try_spawn().unwrap();
        let backend = rpc_backend(&anvil, 1);

        // Gas estimation rejects reverting code, so the limit is set up front
        let tx = TransactionRequest::default()
            .with_from(backend.deployer())
            .with_deploy_code(REVERTING_INIT_CODE)
            .with_gas_limit(100_000);
        let pending = backend.provider.send_transaction(tx).await.unwrap();

        let confirmation = backend
            .wait_for_confirmation(*pending.tx_hash())
            .await
            .unwrap();
        assert!(!confirmation.success);
    }

    #[tokio::test]
    #[ignore = "requires the anvil binary"]
    async fn test_waits_for_confirmation_depth() {
        let anvil = Anvil::new().block_time(1).try_spawn().unwrap();
        let backend = rpc_backend(&anvil, 3);

        let tx_hash = backend.send_creation(EMPTY_INIT_CODE).await.unwrap();
        backend.wait_for_confirmation(tx_hash).await.unwrap();

        let receipt = backend
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .unwrap()
            .unwrap();
        let head = backend.provider.get_block_number().await.unwrap();
        assert!(head >= receipt.block_number.unwrap() + 2);
    }

    #[tokio::test]
    #[ignore = "requires the anvil binary"]
    async fn test_transaction_count_includes_pending() {
        let anvil = Anvil::new().arg("--no-mining").try_spawn().unwrap();
        let backend = rpc_backend(&anvil, 1);

        backend.send_creation(EMPTY_INIT_CODE).await.unwrap();

        // The creation sits in the mempool, the next transaction takes nonce 1
        let latest = backend
            .provider
            .get_transaction_count(backend.deployer())
            .await
            .unwrap();
        assert_eq!(latest, 0);
        assert_eq!(backend.transaction_count().await.unwrap(), 1);
    }
}
