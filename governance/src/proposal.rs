//! Proposals: batches of operations a group account may run once its
//! members approve them.

use std::collections::BTreeSet;

use grove_store::{next_sequence, CacheStore, KvStore, TypedStore};
use grove_transactions::Operation;
use grove_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::account::{load_account, GroupAccount};
use crate::engine::Context;
use crate::error::GovernanceError;
use crate::executor;
use crate::group::{check_metadata, load_group, load_member, Group};
use crate::keys;
use crate::msgs::MsgCreateProposal;
use crate::policy::Policy;
use crate::tally::{self, Tally};
use crate::vote::{self, Choice};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    Submitted,
    Closed,
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalResult {
    Unfinalized,
    Accepted,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutorResult {
    NotRun,
    Success,
    Failure,
}

/// Whether a command should also try to execute the proposal it touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    /// Leave execution to a later `Exec`.
    #[default]
    Deferred,
    /// Execute immediately if the proposal is accepted by this command.
    Try,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub group_account: Address,
    pub metadata: Vec<u8>,
    pub proposers: Vec<Address>,
    pub submitted_at: Timestamp,
    /// Group version when the proposal was submitted.
    pub group_version: u64,
    /// Group account version when the proposal was submitted.
    pub group_account_version: u64,
    pub operations: Vec<Operation>,
    /// Votes are accepted strictly before this instant.
    pub timeout: Timestamp,
    pub status: ProposalStatus,
    pub result: ProposalResult,
    pub executor_result: ExecutorResult,
    pub tally: Tally,
}

impl Proposal {
    pub fn is_accepted(&self) -> bool {
        self.status == ProposalStatus::Closed && self.result == ProposalResult::Accepted
    }

    pub(crate) fn close(&mut self, accepted: bool) {
        self.status = ProposalStatus::Closed;
        self.result = if accepted {
            ProposalResult::Accepted
        } else {
            ProposalResult::Rejected
        };
    }

    /// True when the group or account changed since submission.
    fn is_stale(&self, account: &GroupAccount, group: &Group) -> bool {
        self.group_version != group.version || self.group_account_version != account.version
    }
}

pub(crate) fn load_proposal<S: KvStore + ?Sized>(store: &S, id: u64) -> Result<Proposal, GovernanceError> {
    store
        .get_value(&keys::proposal(id))?
        .ok_or(GovernanceError::ProposalNotFound(id))
}

pub(crate) fn save_proposal<S: KvStore + ?Sized>(store: &mut S, proposal: &Proposal) -> Result<(), GovernanceError> {
    store.put_value(&keys::proposal(proposal.id), proposal)?;
    Ok(())
}

/// Load the account and group of a submitted proposal and make sure neither
/// changed since submission. A stale proposal is aborted and saved before
/// the error is returned.
pub(crate) fn load_fresh_context<S: KvStore + ?Sized>(
    store: &mut S,
    proposal: &mut Proposal,
) -> Result<(GroupAccount, Group), GovernanceError> {
    let account = load_account(store, &proposal.group_account)?;
    let group = load_group(store, account.group_id)?;
    if proposal.is_stale(&account, &group) {
        proposal.status = ProposalStatus::Aborted;
        save_proposal(store, proposal)?;
        info!(
            proposal_id = proposal.id,
            group_version = group.version,
            account_version = account.version,
            "proposal aborted: group or group account changed"
        );
        return Err(GovernanceError::ProposalAborted(proposal.id));
    }
    Ok((account, group))
}

fn check_proposers<S: KvStore + ?Sized>(
    store: &S,
    group: &Group,
    proposers: &[Address],
) -> Result<(), GovernanceError> {
    if proposers.is_empty() {
        return Err(GovernanceError::NoProposers);
    }
    let mut seen = BTreeSet::new();
    for proposer in proposers {
        if !seen.insert(proposer) {
            return Err(GovernanceError::DuplicateProposer(proposer.to_string()));
        }
        if load_member(store, group.id, proposer)?.is_none() {
            return Err(GovernanceError::NotMember {
                address: proposer.to_string(),
                group_id: group.id,
            });
        }
    }
    Ok(())
}

pub(crate) fn create_proposal<S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &Context<'_>,
    msg: &MsgCreateProposal,
) -> Result<u64, GovernanceError> {
    let account = load_account(store, &msg.address)?;
    let group = load_group(store, account.group_id)?;
    check_proposers(store, &group, &msg.proposers)?;
    if let Some(index) = msg
        .operations
        .iter()
        .position(|op| !op.is_signed_only_by(&account.address))
    {
        return Err(GovernanceError::ForeignSigner {
            index,
            account: account.address.to_string(),
        });
    }
    check_metadata(ctx.params, &msg.metadata)?;
    account.decision_policy.validate(&group)?;

    let id = next_sequence(store, &keys::proposal_seq())?;
    let mut proposal = Proposal {
        id,
        group_account: account.address.clone(),
        metadata: msg.metadata.clone(),
        proposers: msg.proposers.clone(),
        submitted_at: ctx.now,
        group_version: group.version,
        group_account_version: account.version,
        operations: msg.operations.clone(),
        timeout: account.decision_policy.timeout(ctx.now),
        status: ProposalStatus::Submitted,
        result: ProposalResult::Unfinalized,
        executor_result: ExecutorResult::NotRun,
        tally: Tally::default(),
    };
    store.put(&keys::proposal_by_account(&account.address, id), &id.to_be_bytes())?;
    info!(
        proposal_id = id,
        account = %account.address,
        operations = proposal.operations.len(),
        timeout = %proposal.timeout,
        "proposal submitted"
    );

    if msg.exec == ExecMode::Try {
        let mut attempt = proposal.clone();
        let mut nested = CacheStore::new(&mut *store);
        match vote_and_execute(&mut nested, ctx, &mut attempt, &account, &group) {
            Ok(()) => {
                nested.commit()?;
                proposal = attempt;
            }
            Err(err) => {
                drop(nested);
                warn!(proposal_id = id, error = %err, "immediate execution failed, proposal left open");
            }
        }
    }

    save_proposal(store, &proposal)?;
    Ok(id)
}

/// Yes from every proposer, then execution if that settles the proposal
/// as accepted.
fn vote_and_execute<S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &Context<'_>,
    proposal: &mut Proposal,
    account: &GroupAccount,
    group: &Group,
) -> Result<(), GovernanceError> {
    for proposer in proposal.proposers.clone() {
        vote::record_vote(store, ctx.now, proposal, group, &proposer, Choice::Yes, &[])?;
    }
    if tally::decide(proposal, account, group, ctx.now)? && proposal.is_accepted() {
        executor::execute(store, ctx.router, proposal)?;
    }
    Ok(())
}
