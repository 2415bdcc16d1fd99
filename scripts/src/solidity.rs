//! Definitions of Solidity functions and constructors called during deployment

use alloy::{
    primitives::{Address, Bytes},
    sol,
    sol_types::{SolCall, SolValue},
};

sol! {
    function addAccess(address account) external;
}

/// ABI-encoded arguments of the `DangoReceiver` constructor
pub fn dango_receiver_constructor_args(
    aave_address_provider: Address,
    executor: Address,
    aave_data_provider: Address,
) -> Bytes {
    (aave_address_provider, executor, aave_data_provider)
        .abi_encode_params()
        .into()
}

/// ABI-encoded arguments of the `DangoExecutor` constructor
pub fn dango_executor_constructor_args(
    receiver: Address,
    aave_address_provider: Address,
    aave_data_provider: Address,
) -> Bytes {
    (receiver, aave_address_provider, aave_data_provider)
        .abi_encode_params()
        .into()
}

/// ABI-encoded arguments of the `AaveExecutor` constructor
pub fn aave_executor_constructor_args(
    lending_pool: Address,
    data_provider: Address,
    incentives_controller: Address,
) -> Bytes {
    (lending_pool, data_provider, incentives_controller)
        .abi_encode_params()
        .into()
}

/// Calldata for the `DangoReceiver`'s `addAccess` method
pub fn add_access_calldata(account: Address) -> Bytes {
    addAccessCall { account }.abi_encode().into()
}
