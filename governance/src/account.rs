//! Group accounts: derived addresses controlled by a group through a
//! decision policy.

use grove_crypto::derive_group_account_address;
use grove_store::{next_sequence, KvStore, TypedStore};
use grove_types::{Address, GovernanceParams};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GovernanceError;
use crate::group::{check_address, check_metadata, ensure_admin, load_group};
use crate::keys;
use crate::policy::{DecisionPolicy, Policy};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAccount {
    pub address: Address,
    pub group_id: u64,
    pub admin: Address,
    pub metadata: Vec<u8>,
    /// Starts at 1; bumped by every admin, metadata or policy change.
    pub version: u64,
    /// Input to the address derivation; unique within the group.
    pub derivation_key: u64,
    pub decision_policy: DecisionPolicy,
}

pub(crate) fn load_account<S: KvStore + ?Sized>(
    store: &S,
    address: &Address,
) -> Result<GroupAccount, GovernanceError> {
    store
        .get_value(&keys::group_account(address))?
        .ok_or_else(|| GovernanceError::GroupAccountNotFound(address.to_string()))
}

fn save_account<S: KvStore + ?Sized>(store: &mut S, account: &GroupAccount) -> Result<(), GovernanceError> {
    store.put_value(&keys::group_account(&account.address), account)?;
    Ok(())
}

pub(crate) fn create_group_account<S: KvStore + ?Sized>(
    store: &mut S,
    params: &GovernanceParams,
    caller: &Address,
    group_id: u64,
    metadata: &[u8],
    decision_policy: DecisionPolicy,
) -> Result<Address, GovernanceError> {
    check_metadata(params, metadata)?;
    let group = load_group(store, group_id)?;
    ensure_admin(&group.admin, caller, || format!("group {group_id}"))?;
    decision_policy.validate(&group)?;

    // Derivation keys are never reused; an occupied address is skipped.
    let (derivation_key, address) = loop {
        let key = next_sequence(store, &keys::derivation_key_seq(group_id))?;
        let address = derive_group_account_address(group_id, key);
        if !store.contains(&keys::group_account(&address))? {
            break (key, address);
        }
    };

    let account = GroupAccount {
        address: address.clone(),
        group_id,
        admin: caller.clone(),
        metadata: metadata.to_vec(),
        version: 1,
        derivation_key,
        decision_policy,
    };
    save_account(store, &account)?;
    store.put(
        &keys::group_account_by_group(group_id, &address),
        address.as_bytes(),
    )?;
    store.put(
        &keys::group_account_by_admin(caller, &address),
        address.as_bytes(),
    )?;

    info!(group_id, account = %address, derivation_key, "group account created");
    Ok(address)
}

/// Load an account the caller administers.
fn load_admin_account<S: KvStore + ?Sized>(
    store: &S,
    caller: &Address,
    address: &Address,
) -> Result<GroupAccount, GovernanceError> {
    let account = load_account(store, address)?;
    ensure_admin(&account.admin, caller, || format!("group account {address}"))?;
    Ok(account)
}

pub(crate) fn update_group_account_admin<S: KvStore + ?Sized>(
    store: &mut S,
    caller: &Address,
    address: &Address,
    new_admin: &Address,
) -> Result<(), GovernanceError> {
    check_address(new_admin)?;
    let mut account = load_admin_account(store, caller, address)?;

    store.delete(&keys::group_account_by_admin(&account.admin, address))?;
    store.put(
        &keys::group_account_by_admin(new_admin, address),
        address.as_bytes(),
    )?;
    account.admin = new_admin.clone();
    account.version += 1;
    save_account(store, &account)?;

    info!(account = %address, new_admin = %new_admin, version = account.version, "group account admin updated");
    Ok(())
}

pub(crate) fn update_group_account_metadata<S: KvStore + ?Sized>(
    store: &mut S,
    params: &GovernanceParams,
    caller: &Address,
    address: &Address,
    metadata: &[u8],
) -> Result<(), GovernanceError> {
    check_metadata(params, metadata)?;
    let mut account = load_admin_account(store, caller, address)?;

    account.metadata = metadata.to_vec();
    account.version += 1;
    save_account(store, &account)?;

    info!(account = %address, version = account.version, "group account metadata updated");
    Ok(())
}

pub(crate) fn update_group_account_policy<S: KvStore + ?Sized>(
    store: &mut S,
    caller: &Address,
    address: &Address,
    decision_policy: DecisionPolicy,
) -> Result<(), GovernanceError> {
    let mut account = load_admin_account(store, caller, address)?;
    let group = load_group(store, account.group_id)?;
    decision_policy.validate(&group)?;

    account.decision_policy = decision_policy;
    account.version += 1;
    save_account(store, &account)?;

    info!(account = %address, version = account.version, "group account decision policy updated");
    Ok(())
}
