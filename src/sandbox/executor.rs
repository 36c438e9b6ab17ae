//! EVM sandbox executor: deploys a strategy's creation bytecode into an
//! in-memory revm instance and exposes its ABI surface (`afterInitialize`,
//! `afterSwap`, `getName`).
//!
//! Every call is gas-capped and deployment is wall-clock bounded so a
//! submitted strategy can't stall or resource-exhaust the harness.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use revm::{
    primitives::{AccountInfo, Address, Bytecode, Bytes, ExecutionResult, HaltReason, Output, TxKind, U256},
    Evm, InMemoryDB,
};

use crate::sandbox::error::SandboxError;
use crate::types::trade_info::{decode_fee_pair, encode_after_initialize, TradeInfo, SELECTOR_GET_NAME};
use crate::types::wad::Wad;

const GAS_LIMIT_INIT: u64 = 250_000;
const GAS_LIMIT_TRADE: u64 = 250_000;
const GAS_LIMIT_NAME: u64 = 50_000;
const GAS_LIMIT_DEPLOY: u64 = 10_000_000;
const DEPLOYMENT_TIMEOUT: Duration = Duration::from_secs(8);

const STRATEGY_ADDRESS: Address = Address::new([
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01,
]);

const CALLER_ADDRESS: Address = Address::new([
    0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x02,
]);

/// A deployed, callable strategy running in an isolated in-memory EVM.
pub struct SandboxExecutor {
    name: String,
    db: InMemoryDB,
    trade_calldata: [u8; 196],
}

impl SandboxExecutor {
    /// Deploy `bytecode` (the contract's creation code) and fetch its name.
    pub fn new(bytecode: Vec<u8>) -> Result<Self, SandboxError> {
        let db = deploy_with_timeout(&bytecode)?;

        let mut executor = Self {
            name: String::new(),
            db,
            trade_calldata: [0u8; 196],
        };
        executor.fetch_name()?;
        Ok(executor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn fetch_name(&mut self) -> Result<(), SandboxError> {
        let result = self.call(&SELECTOR_GET_NAME, GAS_LIMIT_NAME)?;

        if result.len() >= 64 {
            if let Some(offset) = u256_to_usize(&result[0..32]) {
                if offset + 32 <= result.len() {
                    if let Some(length) = u256_to_usize(&result[offset..offset + 32]) {
                        if offset + 32 + length <= result.len() {
                            if let Ok(name) = String::from_utf8(result[offset + 32..offset + 32 + length].to_vec()) {
                                self.name = name;
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Call `afterInitialize(initialX, initialY)`. Returns raw (bid_fee,
    /// ask_fee) in WAD, unclamped — clamping is the adapter's job.
    pub fn after_initialize(&mut self, initial_x: Wad, initial_y: Wad) -> Result<(Wad, Wad), SandboxError> {
        let calldata = encode_after_initialize(initial_x, initial_y);
        let result = self.call(&calldata, GAS_LIMIT_INIT)?;
        decode_fee_pair(&result).ok_or(SandboxError::InvalidReturnDataLength)
    }

    /// Call `afterSwap(trade)`. Returns raw (bid_fee, ask_fee) in WAD.
    pub fn after_swap(&mut self, trade: &TradeInfo) -> Result<(Wad, Wad), SandboxError> {
        trade.encode_calldata(&mut self.trade_calldata);
        let calldata = self.trade_calldata;
        let result = self.call(&calldata, GAS_LIMIT_TRADE)?;
        decode_fee_pair(&result).ok_or(SandboxError::InvalidReturnDataLength)
    }

    fn call(&mut self, calldata: &[u8], gas_limit: u64) -> Result<Vec<u8>, SandboxError> {
        let mut evm = Evm::builder()
            .with_db(&mut self.db)
            .modify_tx_env(|tx| {
                tx.caller = CALLER_ADDRESS;
                tx.transact_to = TxKind::Call(STRATEGY_ADDRESS);
                tx.data = Bytes::copy_from_slice(calldata);
                tx.value = U256::ZERO;
                tx.gas_limit = gas_limit;
            })
            .build();

        let result = evm
            .transact_commit()
            .map_err(|e| SandboxError::ExecutionFailed(format!("{:?}", e)))?;

        match result {
            ExecutionResult::Success { output, .. } => match output {
                Output::Call(data) => Ok(data.to_vec()),
                Output::Create(_, _) => Err(SandboxError::ExecutionFailed("unexpected Create output".into())),
            },
            ExecutionResult::Revert { output, .. } => Err(SandboxError::ExecutionFailed(format!("reverted: {:?}", output))),
            ExecutionResult::Halt { reason, .. } => {
                if matches!(reason, HaltReason::OutOfGas(_)) {
                    Err(SandboxError::OutOfGas)
                } else {
                    Err(SandboxError::ExecutionFailed(format!("halted: {:?}", reason)))
                }
            }
        }
    }
}

/// Deploy `bytecode` on a worker thread, bounding wall-clock deployment
/// time to `DEPLOYMENT_TIMEOUT`. A hung constructor (e.g. an infinite loop)
/// is surfaced as `SandboxError::DeploymentTimeout` instead of hanging the
/// caller; the worker thread itself is not forcibly terminated, matching
/// the detection (not prevention) guarantee the harness offers here.
fn deploy_with_timeout(bytecode: &[u8]) -> Result<InMemoryDB, SandboxError> {
    let (tx, rx) = mpsc::channel();
    let bytecode = bytecode.to_vec();

    thread::spawn(move || {
        let result = deploy(&bytecode);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(DEPLOYMENT_TIMEOUT) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::error!("strategy deployment exceeded wall-clock timeout");
            Err(SandboxError::DeploymentTimeout)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(SandboxError::DeploymentFailed("deployment worker panicked".into()))
        }
    }
}

fn deploy(bytecode: &[u8]) -> Result<InMemoryDB, SandboxError> {
    let mut db = InMemoryDB::default();

    let caller_info = AccountInfo {
        balance: U256::from(1_000_000_000_000_000_000_000u128),
        nonce: 0,
        code_hash: Default::default(),
        code: None,
    };
    db.insert_account_info(CALLER_ADDRESS, caller_info);

    let deployed_code = {
        let mut evm = Evm::builder()
            .with_db(&mut db)
            .modify_tx_env(|tx| {
                tx.caller = CALLER_ADDRESS;
                tx.transact_to = TxKind::Create;
                tx.data = Bytes::copy_from_slice(bytecode);
                tx.value = U256::ZERO;
                tx.gas_limit = GAS_LIMIT_DEPLOY;
            })
            .build();

        let result = evm
            .transact_commit()
            .map_err(|e| SandboxError::DeploymentFailed(format!("{:?}", e)))?;

        match result {
            ExecutionResult::Success { output, .. } => match output {
                Output::Create(code, _) => Ok(code),
                Output::Call(_) => Err(SandboxError::DeploymentFailed("expected Create output".into())),
            },
            ExecutionResult::Revert { output, .. } => Err(SandboxError::DeploymentFailed(format!("reverted: {:?}", output))),
            ExecutionResult::Halt { reason, .. } => Err(SandboxError::DeploymentFailed(format!("halted: {:?}", reason))),
        }
    }?;

    let code = Bytecode::new_raw(deployed_code);
    let account_info = AccountInfo {
        balance: U256::ZERO,
        nonce: 1,
        code_hash: code.hash_slow(),
        code: Some(code),
    };
    db.insert_account_info(STRATEGY_ADDRESS, account_info);

    tracing::info!("strategy deployed");
    Ok(db)
}

fn u256_to_usize(data: &[u8]) -> Option<usize> {
    if data.len() != 32 {
        return None;
    }
    if data[0..24].iter().any(|&b| b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[24..32]);
    Some(u64::from_be_bytes(bytes) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_rejects_empty_bytecode_as_no_create_output() {
        // Empty init code returns empty runtime code successfully in revm;
        // this test documents that such a "strategy" deploys but exposes
        // no callable selectors, which later calls will fail against.
        let result = deploy(&[]);
        assert!(result.is_ok());
    }
}
