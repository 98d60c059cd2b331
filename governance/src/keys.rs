//! Storage key layout.
//!
//! Every key starts with a one-byte table tag. Addresses inside keys are
//! length-prefixed so that a prefix scan for one address never matches a
//! longer address sharing its leading bytes. Ids are big-endian so scans
//! return them in ascending order.

use grove_types::Address;

const GROUP_SEQ: u8 = 0x00;
const GROUP: u8 = 0x01;
const GROUP_BY_ADMIN: u8 = 0x02;
const GROUP_MEMBER: u8 = 0x10;
const GROUP_ACCOUNT: u8 = 0x20;
const GROUP_ACCOUNT_BY_GROUP: u8 = 0x21;
const GROUP_ACCOUNT_BY_ADMIN: u8 = 0x22;
const DERIVATION_KEY_SEQ: u8 = 0x23;
const PROPOSAL_SEQ: u8 = 0x30;
const PROPOSAL: u8 = 0x31;
const PROPOSAL_BY_ACCOUNT: u8 = 0x32;
const VOTE: u8 = 0x40;
const VOTE_BY_VOTER: u8 = 0x41;

struct KeyBuilder(Vec<u8>);

impl KeyBuilder {
    fn new(table: u8) -> Self {
        Self(vec![table])
    }

    fn id(mut self, id: u64) -> Self {
        self.0.extend_from_slice(&id.to_be_bytes());
        self
    }

    fn address(mut self, address: &Address) -> Self {
        let bytes = address.as_bytes();
        // Address::MAX_LEN keeps this within one byte.
        self.0.push(bytes.len() as u8);
        self.0.extend_from_slice(bytes);
        self
    }

    fn build(self) -> Vec<u8> {
        self.0
    }
}

pub fn group_seq() -> Vec<u8> {
    KeyBuilder::new(GROUP_SEQ).build()
}

pub fn group(id: u64) -> Vec<u8> {
    KeyBuilder::new(GROUP).id(id).build()
}

pub fn group_by_admin(admin: &Address, group_id: u64) -> Vec<u8> {
    KeyBuilder::new(GROUP_BY_ADMIN).address(admin).id(group_id).build()
}

pub fn group_by_admin_prefix(admin: &Address) -> Vec<u8> {
    KeyBuilder::new(GROUP_BY_ADMIN).address(admin).build()
}

pub fn group_member(group_id: u64, member: &Address) -> Vec<u8> {
    KeyBuilder::new(GROUP_MEMBER).id(group_id).address(member).build()
}

pub fn group_member_prefix(group_id: u64) -> Vec<u8> {
    KeyBuilder::new(GROUP_MEMBER).id(group_id).build()
}

pub fn group_account(address: &Address) -> Vec<u8> {
    KeyBuilder::new(GROUP_ACCOUNT).address(address).build()
}

pub fn group_account_by_group(group_id: u64, address: &Address) -> Vec<u8> {
    KeyBuilder::new(GROUP_ACCOUNT_BY_GROUP).id(group_id).address(address).build()
}

pub fn group_account_by_group_prefix(group_id: u64) -> Vec<u8> {
    KeyBuilder::new(GROUP_ACCOUNT_BY_GROUP).id(group_id).build()
}

pub fn group_account_by_admin(admin: &Address, address: &Address) -> Vec<u8> {
    KeyBuilder::new(GROUP_ACCOUNT_BY_ADMIN).address(admin).address(address).build()
}

pub fn group_account_by_admin_prefix(admin: &Address) -> Vec<u8> {
    KeyBuilder::new(GROUP_ACCOUNT_BY_ADMIN).address(admin).build()
}

/// Per-group counter feeding group-account address derivation.
pub fn derivation_key_seq(group_id: u64) -> Vec<u8> {
    KeyBuilder::new(DERIVATION_KEY_SEQ).id(group_id).build()
}

pub fn proposal_seq() -> Vec<u8> {
    KeyBuilder::new(PROPOSAL_SEQ).build()
}

pub fn proposal(id: u64) -> Vec<u8> {
    KeyBuilder::new(PROPOSAL).id(id).build()
}

pub fn proposal_by_account(account: &Address, proposal_id: u64) -> Vec<u8> {
    KeyBuilder::new(PROPOSAL_BY_ACCOUNT).address(account).id(proposal_id).build()
}

pub fn proposal_by_account_prefix(account: &Address) -> Vec<u8> {
    KeyBuilder::new(PROPOSAL_BY_ACCOUNT).address(account).build()
}

pub fn vote(proposal_id: u64, voter: &Address) -> Vec<u8> {
    KeyBuilder::new(VOTE).id(proposal_id).address(voter).build()
}

pub fn vote_prefix(proposal_id: u64) -> Vec<u8> {
    KeyBuilder::new(VOTE).id(proposal_id).build()
}

pub fn vote_by_voter(voter: &Address, proposal_id: u64) -> Vec<u8> {
    KeyBuilder::new(VOTE_BY_VOTER).address(voter).id(proposal_id).build()
}

pub fn vote_by_voter_prefix(voter: &Address) -> Vec<u8> {
    KeyBuilder::new(VOTE_BY_VOTER).address(voter).build()
}
