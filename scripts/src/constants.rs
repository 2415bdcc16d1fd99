//! Constants used in the deploy scripts

// -------------
// | Addresses |
// -------------

/// The Aave `LendingPoolAddressesProvider` on Kovan
pub const DEFAULT_AAVE_ADDRESS_PROVIDER: &str = "0xd05e3E715d945B59290df0ae8eF85c1BdB684744";

/// The Aave `ProtocolDataProvider` on Kovan
pub const DEFAULT_AAVE_DATA_PROVIDER: &str = "0x7551b5D2763519d4e37e8B81929D336De671d46d";

/// The Aave `LendingPool` used by the `AaveExecutor`
pub const DEFAULT_AAVE_LENDING_POOL: &str = "0x8dff5e27ea6b7ac08ebfdf9eb090f32ee9a30fcf";

/// The Aave incentives controller used by the `AaveExecutor`
pub const DEFAULT_AAVE_INCENTIVES_CONTROLLER: &str = "0x357D51124f59836DeD84c8a1730D72B749d8BC23";

/// The 0x exchange proxy, granted access to the `DangoReceiver` after deployment
pub const DEFAULT_ACCESS_GRANTEE: &str = "0xdef1c0ded9bec7f1a1670819833240f027b25eff";

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

/// The number of bytes in a keccak-256 digest
pub const NUM_BYTES_HASH: usize = 32;

// ------------
// | Networks |
// ------------

/// The Alchemy endpoint for Kovan, without the API key
pub const ALCHEMY_KOVAN_URL_PREFIX: &str = "https://eth-kovan.alchemyapi.io/v2/";

/// The Infura endpoint for Polygon mainnet, without the project ID
pub const INFURA_POLYGON_URL_PREFIX: &str = "https://polygon-mainnet.infura.io/v3/";

/// The block at which the local fork of Kovan is pinned
pub const HARDHAT_FORK_BLOCK_NUMBER: u64 = 25_155_741;

/// The block gas limit of the local fork
pub const HARDHAT_BLOCK_GAS_LIMIT: u64 = 12_000_000;

/// The name of the environment variable holding the Alchemy API key
pub const ALCHEMY_ID_ENV_VAR: &str = "ALCHEMY_ID";

/// The name of the environment variable holding the Infura project ID
pub const INFURA_ID_ENV_VAR: &str = "INFURA_ID";

/// The name of the environment variable holding the deployer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// The name of the `anvil` executable used to run the local fork
pub const ANVIL_COMMAND: &str = "anvil";

/// The flag passed to `anvil` to set the block gas limit
pub const ANVIL_GAS_LIMIT_FLAG: &str = "--gas-limit";

// ----------------
// | Transactions |
// ----------------

/// The default number of confirmations to wait for on each transaction
pub const DEFAULT_NUM_CONFIRMATIONS: u64 = 1;

/// The largest number of confirmations a transaction may be made to wait for
pub const MAX_NUM_CONFIRMATIONS: u64 = 64;

/// The number of times to poll for a transaction receipt before giving up
pub const RECEIPT_POLL_ATTEMPTS: usize = 600;

/// The interval between receipt polls, in milliseconds
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 1_000;

// -------------
// | Artifacts |
// -------------

/// The default directory holding the contract compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";

/// The extension of a Solidity source file, used as the artifact subdirectory
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a JSON artifact file
pub const JSON_EXTENSION: &str = "json";
