//! Weighted votes on proposals.

use grove_store::{KvStore, TypedStore};
use grove_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::Context;
use crate::error::GovernanceError;
use crate::executor;
use crate::group::{check_metadata, load_member, Group};
use crate::keys;
use crate::msgs::MsgVote;
use crate::proposal::{load_fresh_context, load_proposal, save_proposal, ExecMode, Proposal, ProposalStatus};
use crate::tally;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Yes,
    No,
    Abstain,
    Veto,
}

/// One member's immutable vote on one proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: u64,
    pub voter: Address,
    pub choice: Choice,
    pub metadata: Vec<u8>,
    pub submitted_at: Timestamp,
}

/// Record a vote and add the voter's current weight to the tally. The
/// caller saves the proposal.
pub(crate) fn record_vote<S: KvStore + ?Sized>(
    store: &mut S,
    now: Timestamp,
    proposal: &mut Proposal,
    group: &Group,
    voter: &Address,
    choice: Choice,
    metadata: &[u8],
) -> Result<(), GovernanceError> {
    let member = load_member(store, group.id, voter)?.ok_or_else(|| GovernanceError::NotMember {
        address: voter.to_string(),
        group_id: group.id,
    })?;
    let key = keys::vote(proposal.id, voter);
    if store.contains(&key)? {
        return Err(GovernanceError::AlreadyVoted {
            proposal_id: proposal.id,
            voter: voter.to_string(),
        });
    }

    let vote = Vote {
        proposal_id: proposal.id,
        voter: voter.clone(),
        choice,
        metadata: metadata.to_vec(),
        submitted_at: now,
    };
    store.put_value(&key, &vote)?;
    store.put(&keys::vote_by_voter(voter, proposal.id), &proposal.id.to_be_bytes())?;
    proposal.tally.add(choice, member.weight)?;

    debug!(proposal_id = proposal.id, voter = %voter, ?choice, weight = %member.weight, "vote recorded");
    Ok(())
}

pub(crate) fn cast_vote<S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &Context<'_>,
    msg: &MsgVote,
) -> Result<(), GovernanceError> {
    check_metadata(ctx.params, &msg.metadata)?;
    let mut proposal = load_proposal(store, msg.proposal_id)?;
    match proposal.status {
        ProposalStatus::Submitted => {}
        ProposalStatus::Closed => return Err(GovernanceError::ProposalClosed(proposal.id)),
        ProposalStatus::Aborted => return Err(GovernanceError::ProposalAborted(proposal.id)),
    }
    if ctx.now >= proposal.timeout {
        return Err(GovernanceError::VotingClosed {
            proposal_id: proposal.id,
            timeout: proposal.timeout,
        });
    }
    let (account, group) = load_fresh_context(store, &mut proposal)?;

    record_vote(
        store,
        ctx.now,
        &mut proposal,
        &group,
        &msg.voter,
        msg.choice,
        &msg.metadata,
    )?;
    let closed = tally::decide(&mut proposal, &account, &group, ctx.now)?;
    if closed && msg.exec == ExecMode::Try && proposal.is_accepted() {
        executor::execute(store, ctx.router, &mut proposal)?;
    }
    save_proposal(store, &proposal)?;
    Ok(())
}
