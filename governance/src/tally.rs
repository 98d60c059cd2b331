//! Running vote totals and the decision step that consumes them.

use grove_types::{Timestamp, Weight};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::account::GroupAccount;
use crate::error::GovernanceError;
use crate::group::Group;
use crate::policy::{Decision, Policy};
use crate::proposal::Proposal;
use crate::vote::Choice;

/// Weight cast for each choice on one proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: Weight,
    pub no: Weight,
    pub abstain: Weight,
    pub veto: Weight,
}

impl Tally {
    /// Add `weight` to the bucket for `choice`.
    pub fn add(&mut self, choice: Choice, weight: Weight) -> Result<(), GovernanceError> {
        let bucket = match choice {
            Choice::Yes => &mut self.yes,
            Choice::No => &mut self.no,
            Choice::Abstain => &mut self.abstain,
            Choice::Veto => &mut self.veto,
        };
        *bucket = bucket
            .checked_add(weight)
            .ok_or(GovernanceError::WeightOverflow)?;
        Ok(())
    }

    /// Weight cast across all choices.
    pub fn total(&self) -> Result<Weight, GovernanceError> {
        Weight::checked_sum([self.yes, self.no, self.abstain, self.veto])
            .map_err(|_| GovernanceError::WeightOverflow)
    }
}

/// Run the account's policy over the proposal's tally and close the
/// proposal if the outcome is final. Returns whether it closed.
pub(crate) fn decide(
    proposal: &mut Proposal,
    account: &GroupAccount,
    group: &Group,
    now: Timestamp,
) -> Result<bool, GovernanceError> {
    let voting_duration = proposal.submitted_at.elapsed_since(now);
    let outcome = account
        .decision_policy
        .allow(&proposal.tally, group.total_weight, voting_duration)?;
    if !outcome.is_final || outcome.decision == Decision::Undecided {
        return Ok(false);
    }
    proposal.close(outcome.decision == Decision::Accepted);
    info!(
        proposal_id = proposal.id,
        result = ?proposal.result,
        yes = %proposal.tally.yes,
        voting_duration,
        "proposal decided"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_per_choice() {
        let mut tally = Tally::default();
        tally.add(Choice::Yes, Weight::from_units(2)).unwrap();
        tally.add(Choice::Yes, Weight::from_units(1)).unwrap();
        tally.add(Choice::Veto, Weight::from_units(4)).unwrap();
        assert_eq!(tally.yes, Weight::from_units(3));
        assert_eq!(tally.veto, Weight::from_units(4));
        assert_eq!(tally.no, Weight::ZERO);
        assert_eq!(tally.total().unwrap(), Weight::from_units(7));
    }

    #[test]
    fn test_add_overflow_is_an_error() {
        let mut tally = Tally::default();
        tally.add(Choice::No, Weight::from_raw(u128::MAX)).unwrap();
        assert!(tally.add(Choice::No, Weight::from_raw(1)).is_err());
    }
}
