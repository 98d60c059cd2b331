//! Nullable ledger — an in-store balance book that executes `bank/send`.

use grove_store::{KvStore, StoreError, TypedStore};
use grove_transactions::{Operation, OperationError, OperationHandler};
use grove_types::Address;
use serde::{Deserialize, Serialize};

pub const BANK_SEND_ROUTE: &str = "bank/send";

const BALANCE_PREFIX: &[u8] = b"nullbank/balance/";

/// Payload of a `bank/send` operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
}

/// Moves balances kept in the same store as the governance state, so a
/// discarded execution view discards the transfers too.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBank;

fn balance_key(address: &Address) -> Vec<u8> {
    let mut key = BALANCE_PREFIX.to_vec();
    key.extend_from_slice(address.as_bytes());
    key
}

impl NullBank {
    pub fn balance<S: KvStore + ?Sized>(store: &S, address: &Address) -> Result<u128, StoreError> {
        Ok(store.get_value(&balance_key(address))?.unwrap_or(0))
    }

    /// Credit `amount` to `address` out of thin air.
    pub fn fund<S: KvStore + ?Sized>(store: &mut S, address: &Address, amount: u128) -> Result<(), StoreError> {
        let balance = Self::balance(&*store, address)?.saturating_add(amount);
        store.put_value(&balance_key(address), &balance)
    }

    /// A `bank/send` operation signed by `from`.
    pub fn send(from: &Address, to: &Address, amount: u128) -> Operation {
        let request = SendRequest {
            from: from.clone(),
            to: to.clone(),
            amount,
        };
        Operation::new(BANK_SEND_ROUTE, vec![from.clone()], &request)
            .expect("send request always serializes")
    }
}

impl OperationHandler for NullBank {
    fn handle(&self, store: &mut dyn KvStore, operation: &Operation) -> Result<(), OperationError> {
        let request: SendRequest = operation.decode()?;
        if !operation.signers.contains(&request.from) {
            return Err(OperationError::Unauthorized(format!(
                "{} did not sign the transfer",
                request.from
            )));
        }
        let from_balance = Self::balance(&*store, &request.from)?;
        let remaining = from_balance.checked_sub(request.amount).ok_or_else(|| {
            OperationError::Rejected(format!(
                "insufficient funds: {} has {}, needs {}",
                request.from, from_balance, request.amount
            ))
        })?;
        store.put_value(&balance_key(&request.from), &remaining)?;
        Self::fund(store, &request.to, request.amount)?;
        Ok(())
    }
}
