//! Read-only lookups.
//!
//! Lists come back in key order: groups and proposals by ascending id,
//! members and accounts by address bytes, votes by voter address or
//! proposal id.

use grove_store::{KvStore, StoreError, TypedStore};
use grove_types::Address;

use crate::account::{load_account, GroupAccount};
use crate::error::GovernanceError;
use crate::group::{load_group, load_members, Group, GroupMember};
use crate::keys;
use crate::proposal::{load_proposal, Proposal};
use crate::vote::Vote;

/// Index values hold the primary key: 8 big-endian bytes for ids.
fn index_id(value: &[u8]) -> Result<u64, GovernanceError> {
    let raw: [u8; 8] = value
        .try_into()
        .map_err(|_| StoreError::Corruption(format!("index entry of {} bytes", value.len())))?;
    Ok(u64::from_be_bytes(raw))
}

/// Index values hold the primary key: the address string for accounts.
fn index_address(value: &[u8]) -> Result<Address, GovernanceError> {
    let raw = std::str::from_utf8(value)
        .map_err(|e| StoreError::Corruption(format!("index address: {e}")))?;
    Address::parse(raw).map_err(|e| StoreError::Corruption(e.to_string()).into())
}

pub fn group_info<S: KvStore + ?Sized>(store: &S, group_id: u64) -> Result<Group, GovernanceError> {
    load_group(store, group_id)
}

pub fn group_members<S: KvStore + ?Sized>(store: &S, group_id: u64) -> Result<Vec<GroupMember>, GovernanceError> {
    load_group(store, group_id)?;
    Ok(load_members(store, group_id)?
        .into_iter()
        .map(|member| GroupMember { group_id, member })
        .collect())
}

pub fn groups_by_admin<S: KvStore + ?Sized>(store: &S, admin: &Address) -> Result<Vec<Group>, GovernanceError> {
    store
        .scan_prefix(&keys::group_by_admin_prefix(admin))?
        .iter()
        .map(|(_, value)| load_group(store, index_id(value)?))
        .collect()
}

pub fn group_account_info<S: KvStore + ?Sized>(
    store: &S,
    address: &Address,
) -> Result<GroupAccount, GovernanceError> {
    load_account(store, address)
}

pub fn group_accounts_by_group<S: KvStore + ?Sized>(
    store: &S,
    group_id: u64,
) -> Result<Vec<GroupAccount>, GovernanceError> {
    load_group(store, group_id)?;
    store
        .scan_prefix(&keys::group_account_by_group_prefix(group_id))?
        .iter()
        .map(|(_, value)| load_account(store, &index_address(value)?))
        .collect()
}

pub fn group_accounts_by_admin<S: KvStore + ?Sized>(
    store: &S,
    admin: &Address,
) -> Result<Vec<GroupAccount>, GovernanceError> {
    store
        .scan_prefix(&keys::group_account_by_admin_prefix(admin))?
        .iter()
        .map(|(_, value)| load_account(store, &index_address(value)?))
        .collect()
}

pub fn proposal<S: KvStore + ?Sized>(store: &S, proposal_id: u64) -> Result<Proposal, GovernanceError> {
    load_proposal(store, proposal_id)
}

pub fn proposals_by_group_account<S: KvStore + ?Sized>(
    store: &S,
    address: &Address,
) -> Result<Vec<Proposal>, GovernanceError> {
    load_account(store, address)?;
    store
        .scan_prefix(&keys::proposal_by_account_prefix(address))?
        .iter()
        .map(|(_, value)| load_proposal(store, index_id(value)?))
        .collect()
}

pub fn vote_by_proposal_voter<S: KvStore + ?Sized>(
    store: &S,
    proposal_id: u64,
    voter: &Address,
) -> Result<Vote, GovernanceError> {
    store
        .get_value(&keys::vote(proposal_id, voter))?
        .ok_or_else(|| GovernanceError::VoteNotFound {
            proposal_id,
            voter: voter.to_string(),
        })
}

pub fn votes_by_proposal<S: KvStore + ?Sized>(store: &S, proposal_id: u64) -> Result<Vec<Vote>, GovernanceError> {
    load_proposal(store, proposal_id)?;
    Ok(store.scan_values(&keys::vote_prefix(proposal_id))?)
}

pub fn votes_by_voter<S: KvStore + ?Sized>(store: &S, voter: &Address) -> Result<Vec<Vote>, GovernanceError> {
    store
        .scan_prefix(&keys::vote_by_voter_prefix(voter))?
        .iter()
        .map(|(_, value)| vote_by_proposal_voter(store, index_id(value)?, voter))
        .collect()
}
