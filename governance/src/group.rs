//! Groups and their weighted membership.

use std::collections::BTreeSet;

use grove_crypto::validate_address;
use grove_store::{next_sequence, KvStore, TypedStore};
use grove_types::{Address, GovernanceParams, Weight};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GovernanceError;
use crate::keys;

/// A set of weighted members under one admin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub admin: Address,
    pub metadata: Vec<u8>,
    /// Sum of every stored member weight.
    pub total_weight: Weight,
    /// Starts at 1; bumped by every admin, metadata or membership change.
    pub version: u64,
}

/// A member as stored, or as requested in a membership update where a zero
/// weight means removal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub address: Address,
    pub weight: Weight,
    pub metadata: Vec<u8>,
}

impl Member {
    pub fn new(address: Address, weight: Weight) -> Self {
        Self {
            address,
            weight,
            metadata: Vec::new(),
        }
    }
}

/// A member together with the group it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: u64,
    pub member: Member,
}

pub(crate) fn check_metadata(params: &GovernanceParams, metadata: &[u8]) -> Result<(), GovernanceError> {
    if !params.metadata_fits(metadata) {
        return Err(GovernanceError::MetadataTooLong {
            len: metadata.len(),
            max: params.max_metadata_len,
        });
    }
    Ok(())
}

pub(crate) fn check_address(address: &Address) -> Result<(), GovernanceError> {
    if !validate_address(address) {
        return Err(GovernanceError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

pub(crate) fn ensure_admin(
    admin: &Address,
    caller: &Address,
    target: impl FnOnce() -> String,
) -> Result<(), GovernanceError> {
    if admin != caller {
        return Err(GovernanceError::NotAdmin {
            caller: caller.to_string(),
            target: target(),
        });
    }
    Ok(())
}

/// Address, metadata and uniqueness checks shared by create and update.
fn check_member_batch(params: &GovernanceParams, members: &[Member]) -> Result<(), GovernanceError> {
    let mut seen = BTreeSet::new();
    for member in members {
        check_address(&member.address)?;
        check_metadata(params, &member.metadata)?;
        if !seen.insert(&member.address) {
            return Err(GovernanceError::DuplicateMember(member.address.to_string()));
        }
    }
    Ok(())
}

pub(crate) fn load_group<S: KvStore + ?Sized>(store: &S, id: u64) -> Result<Group, GovernanceError> {
    store
        .get_value(&keys::group(id))?
        .ok_or(GovernanceError::GroupNotFound(id))
}

fn save_group<S: KvStore + ?Sized>(store: &mut S, group: &Group) -> Result<(), GovernanceError> {
    store.put_value(&keys::group(group.id), group)?;
    Ok(())
}

pub(crate) fn load_member<S: KvStore + ?Sized>(
    store: &S,
    group_id: u64,
    address: &Address,
) -> Result<Option<Member>, GovernanceError> {
    Ok(store.get_value(&keys::group_member(group_id, address))?)
}

pub(crate) fn load_members<S: KvStore + ?Sized>(store: &S, group_id: u64) -> Result<Vec<Member>, GovernanceError> {
    Ok(store.scan_values(&keys::group_member_prefix(group_id))?)
}

pub(crate) fn create_group<S: KvStore + ?Sized>(
    store: &mut S,
    params: &GovernanceParams,
    admin: &Address,
    members: &[Member],
    metadata: &[u8],
) -> Result<u64, GovernanceError> {
    check_address(admin)?;
    check_metadata(params, metadata)?;
    check_member_batch(params, members)?;
    if let Some(member) = members.iter().find(|m| !m.weight.is_positive()) {
        return Err(GovernanceError::InvalidWeight {
            address: member.address.to_string(),
            reason: "weight must be positive".into(),
        });
    }
    let total_weight = Weight::checked_sum(members.iter().map(|m| m.weight))
        .map_err(|_| GovernanceError::WeightOverflow)?;

    let id = next_sequence(store, &keys::group_seq())?;
    let group = Group {
        id,
        admin: admin.clone(),
        metadata: metadata.to_vec(),
        total_weight,
        version: 1,
    };
    save_group(store, &group)?;
    store.put(&keys::group_by_admin(admin, id), &id.to_be_bytes())?;
    for member in members {
        store.put_value(&keys::group_member(id, &member.address), member)?;
    }

    info!(group_id = id, admin = %admin, members = members.len(), %total_weight, "group created");
    Ok(id)
}

pub(crate) fn update_group_admin<S: KvStore + ?Sized>(
    store: &mut S,
    caller: &Address,
    group_id: u64,
    new_admin: &Address,
) -> Result<(), GovernanceError> {
    check_address(new_admin)?;
    let mut group = load_group(store, group_id)?;
    ensure_admin(&group.admin, caller, || format!("group {group_id}"))?;

    store.delete(&keys::group_by_admin(&group.admin, group_id))?;
    store.put(&keys::group_by_admin(new_admin, group_id), &group_id.to_be_bytes())?;
    group.admin = new_admin.clone();
    group.version += 1;
    save_group(store, &group)?;

    info!(group_id, new_admin = %new_admin, version = group.version, "group admin updated");
    Ok(())
}

pub(crate) fn update_group_metadata<S: KvStore + ?Sized>(
    store: &mut S,
    params: &GovernanceParams,
    caller: &Address,
    group_id: u64,
    metadata: &[u8],
) -> Result<(), GovernanceError> {
    check_metadata(params, metadata)?;
    let mut group = load_group(store, group_id)?;
    ensure_admin(&group.admin, caller, || format!("group {group_id}"))?;

    group.metadata = metadata.to_vec();
    group.version += 1;
    save_group(store, &group)?;

    info!(group_id, version = group.version, "group metadata updated");
    Ok(())
}

/// Apply a membership batch: zero weights remove, others upsert. The total
/// weight is recomputed from the stored members afterwards.
pub(crate) fn update_group_members<S: KvStore + ?Sized>(
    store: &mut S,
    params: &GovernanceParams,
    caller: &Address,
    group_id: u64,
    updates: &[Member],
) -> Result<(), GovernanceError> {
    let mut group = load_group(store, group_id)?;
    ensure_admin(&group.admin, caller, || format!("group {group_id}"))?;
    check_member_batch(params, updates)?;

    for update in updates {
        let key = keys::group_member(group_id, &update.address);
        if update.weight.is_zero() {
            if !store.contains(&key)? {
                return Err(GovernanceError::MemberNotFound {
                    address: update.address.to_string(),
                    group_id,
                });
            }
            store.delete(&key)?;
        } else {
            store.put_value(&key, update)?;
        }
    }

    let members = load_members(store, group_id)?;
    group.total_weight = Weight::checked_sum(members.iter().map(|m| m.weight))
        .map_err(|_| GovernanceError::WeightOverflow)?;
    group.version += 1;
    save_group(store, &group)?;

    info!(
        group_id,
        updates = updates.len(),
        total_weight = %group.total_weight,
        version = group.version,
        "group members updated"
    );
    Ok(())
}
