//! Execution of accepted proposals.
//!
//! Operations run in order against a buffered view of the store. The view
//! is committed only if every operation succeeds; otherwise it is dropped
//! and the proposal records a failure that a later `Exec` may retry.

use grove_store::{CacheStore, KvStore};
use grove_transactions::{OperationError, Router};
use grove_types::Address;
use tracing::{info, warn};

use crate::engine::Context;
use crate::error::GovernanceError;
use crate::proposal::{load_fresh_context, load_proposal, save_proposal, ExecutorResult, Proposal, ProposalStatus};
use crate::tally;

/// Run the operations of an accepted proposal and record the outcome on it.
/// Operation failures are not errors; only store failures are.
pub(crate) fn execute<S: KvStore + ?Sized>(
    store: &mut S,
    router: &Router,
    proposal: &mut Proposal,
) -> Result<(), GovernanceError> {
    let mut sandbox = CacheStore::new(store);
    match dispatch_all(&mut sandbox, router, proposal) {
        Ok(()) => {
            sandbox.commit()?;
            proposal.executor_result = ExecutorResult::Success;
            info!(proposal_id = proposal.id, operations = proposal.operations.len(), "proposal executed");
        }
        Err((index, err)) => {
            drop(sandbox);
            proposal.executor_result = ExecutorResult::Failure;
            warn!(proposal_id = proposal.id, operation = index, error = %err, "proposal execution failed, changes discarded");
        }
    }
    Ok(())
}

fn dispatch_all(
    store: &mut dyn KvStore,
    router: &Router,
    proposal: &Proposal,
) -> Result<(), (usize, OperationError)> {
    for (index, operation) in proposal.operations.iter().enumerate() {
        router
            .dispatch(store, operation)
            .map_err(|err| (index, err))?;
    }
    Ok(())
}

/// Bring a proposal to its final state and execute it if accepted.
///
/// Calling this on an open proposal before its outcome is known, on a
/// rejected proposal, or on one already executed successfully is a no-op.
pub(crate) fn exec_proposal<S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &Context<'_>,
    proposal_id: u64,
    signer: &Address,
) -> Result<(), GovernanceError> {
    let mut proposal = load_proposal(store, proposal_id)?;
    match proposal.status {
        ProposalStatus::Aborted => return Err(GovernanceError::ProposalAborted(proposal_id)),
        ProposalStatus::Submitted => {
            let (account, group) = load_fresh_context(store, &mut proposal)?;
            if !tally::decide(&mut proposal, &account, &group, ctx.now)? {
                return Ok(());
            }
        }
        ProposalStatus::Closed => {}
    }

    if proposal.is_accepted() && proposal.executor_result != ExecutorResult::Success {
        info!(proposal_id, signer = %signer, "executing proposal");
        execute(store, ctx.router, &mut proposal)?;
    }
    save_proposal(store, &proposal)?;
    Ok(())
}
