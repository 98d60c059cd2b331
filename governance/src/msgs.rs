//! Command requests and responses.
//!
//! Each command is a plain request struct. [`Msg`] wraps them all so a
//! batch of commands can be read from JSON and fed to
//! [`crate::GovernanceEngine::handle`].

use grove_transactions::Operation;
use grove_types::Address;
use serde::{Deserialize, Serialize};

use crate::group::Member;
use crate::policy::DecisionPolicy;
use crate::proposal::ExecMode;
use crate::vote::Choice;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateGroup {
    pub admin: Address,
    pub members: Vec<Member>,
    #[serde(default)]
    pub metadata: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateGroupAdmin {
    pub admin: Address,
    pub group_id: u64,
    pub new_admin: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateGroupMetadata {
    pub admin: Address,
    pub group_id: u64,
    pub metadata: Vec<u8>,
}

/// A weight of zero removes the member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateGroupMembers {
    pub admin: Address,
    pub group_id: u64,
    pub member_updates: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateGroupAccount {
    pub admin: Address,
    pub group_id: u64,
    #[serde(default)]
    pub metadata: Vec<u8>,
    pub decision_policy: DecisionPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateGroupAccountAdmin {
    pub admin: Address,
    pub address: Address,
    pub new_admin: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateGroupAccountMetadata {
    pub admin: Address,
    pub address: Address,
    pub metadata: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateGroupAccountDecisionPolicy {
    pub admin: Address,
    pub address: Address,
    pub decision_policy: DecisionPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateProposal {
    /// The group account the proposal would act for.
    pub address: Address,
    pub proposers: Vec<Address>,
    #[serde(default)]
    pub metadata: Vec<u8>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub exec: ExecMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVote {
    pub proposal_id: u64,
    pub voter: Address,
    pub choice: Choice,
    #[serde(default)]
    pub metadata: Vec<u8>,
    #[serde(default)]
    pub exec: ExecMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgExec {
    pub proposal_id: u64,
    pub signer: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    CreateGroup(MsgCreateGroup),
    UpdateGroupAdmin(MsgUpdateGroupAdmin),
    UpdateGroupMetadata(MsgUpdateGroupMetadata),
    UpdateGroupMembers(MsgUpdateGroupMembers),
    CreateGroupAccount(MsgCreateGroupAccount),
    UpdateGroupAccountAdmin(MsgUpdateGroupAccountAdmin),
    UpdateGroupAccountMetadata(MsgUpdateGroupAccountMetadata),
    UpdateGroupAccountDecisionPolicy(MsgUpdateGroupAccountDecisionPolicy),
    CreateProposal(MsgCreateProposal),
    Vote(MsgVote),
    Exec(MsgExec),
}

impl Msg {
    /// Short command name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateGroup(_) => "create_group",
            Self::UpdateGroupAdmin(_) => "update_group_admin",
            Self::UpdateGroupMetadata(_) => "update_group_metadata",
            Self::UpdateGroupMembers(_) => "update_group_members",
            Self::CreateGroupAccount(_) => "create_group_account",
            Self::UpdateGroupAccountAdmin(_) => "update_group_account_admin",
            Self::UpdateGroupAccountMetadata(_) => "update_group_account_metadata",
            Self::UpdateGroupAccountDecisionPolicy(_) => "update_group_account_decision_policy",
            Self::CreateProposal(_) => "create_proposal",
            Self::Vote(_) => "vote",
            Self::Exec(_) => "exec",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsgResponse {
    GroupCreated { group_id: u64 },
    GroupAccountCreated { address: Address },
    ProposalCreated { proposal_id: u64 },
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_json_is_internally_tagged() {
        let json = r#"{
            "type": "exec",
            "proposal_id": 4,
            "signer": "grove_someone"
        }"#;
        let msg: Msg = serde_json::from_str(json).unwrap();
        assert_eq!(msg.name(), "exec");
        assert!(matches!(msg, Msg::Exec(MsgExec { proposal_id: 4, .. })));
    }

    #[test]
    fn test_vote_defaults() {
        let json = r#"{"type": "vote", "proposal_id": 1, "voter": "grove_v", "choice": "veto"}"#;
        let Msg::Vote(vote) = serde_json::from_str::<Msg>(json).unwrap() else {
            panic!("expected a vote");
        };
        assert_eq!(vote.choice, Choice::Veto);
        assert_eq!(vote.exec, ExecMode::Deferred);
        assert!(vote.metadata.is_empty());
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let json = r#"{"type": "vote", "proposal_id": 1, "voter": "grove_v", "choice": "maybe"}"#;
        assert!(serde_json::from_str::<Msg>(json).is_err());
    }
}
