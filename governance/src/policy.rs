//! Decision policies.
//!
//! A policy turns a tally into a decision. The tally engine only talks to
//! the [`Policy`] trait; [`DecisionPolicy`] is the stored, tagged form that
//! dispatches to the concrete variant.
//!
//! | Variant | Accepts when | Rejects when |
//! |---|---|---|
//! | Threshold | yes ≥ threshold | yes + uncast < threshold, or voting period over |
//! | Percentage | yes ≥ percentage × total weight | same, against the derived threshold |

use grove_types::{Timestamp, Weight};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::group::Group;
use crate::tally::Tally;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Undecided,
    Accepted,
    Rejected,
}

/// The outcome of one policy evaluation. An undecided outcome is never final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub decision: Decision,
    pub is_final: bool,
}

impl PolicyOutcome {
    pub const PENDING: Self = Self {
        decision: Decision::Undecided,
        is_final: false,
    };

    pub const ACCEPTED: Self = Self {
        decision: Decision::Accepted,
        is_final: true,
    };

    pub const REJECTED: Self = Self {
        decision: Decision::Rejected,
        is_final: true,
    };
}

pub trait Policy {
    /// Evaluate `tally` against a group of `total_weight`, `voting_duration_secs`
    /// after submission.
    fn allow(
        &self,
        tally: &Tally,
        total_weight: Weight,
        voting_duration_secs: u64,
    ) -> Result<PolicyOutcome, GovernanceError>;

    /// When voting on a proposal submitted at `submitted_at` ends.
    fn timeout(&self, submitted_at: Timestamp) -> Timestamp;

    /// Check the policy can be satisfied by `group`.
    fn validate(&self, group: &Group) -> Result<(), GovernanceError>;
}

/// Fixed absolute yes-weight threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub threshold: Weight,
    pub voting_period_secs: u64,
}

/// Yes-weight threshold expressed as a fraction of the group's total weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentagePolicy {
    /// In (0, 1].
    pub percentage: Weight,
    pub voting_period_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPolicy {
    Threshold(ThresholdPolicy),
    Percentage(PercentagePolicy),
}

impl DecisionPolicy {
    pub fn threshold(threshold: Weight, voting_period_secs: u64) -> Self {
        Self::Threshold(ThresholdPolicy {
            threshold,
            voting_period_secs,
        })
    }

    pub fn percentage(percentage: Weight, voting_period_secs: u64) -> Self {
        Self::Percentage(PercentagePolicy {
            percentage,
            voting_period_secs,
        })
    }

    fn inner(&self) -> &dyn Policy {
        match self {
            Self::Threshold(p) => p,
            Self::Percentage(p) => p,
        }
    }
}

impl Policy for DecisionPolicy {
    fn allow(
        &self,
        tally: &Tally,
        total_weight: Weight,
        voting_duration_secs: u64,
    ) -> Result<PolicyOutcome, GovernanceError> {
        self.inner().allow(tally, total_weight, voting_duration_secs)
    }

    fn timeout(&self, submitted_at: Timestamp) -> Timestamp {
        self.inner().timeout(submitted_at)
    }

    fn validate(&self, group: &Group) -> Result<(), GovernanceError> {
        self.inner().validate(group)
    }
}

/// Shared rule for threshold-style policies.
fn threshold_outcome(
    threshold: Weight,
    voting_period_secs: u64,
    tally: &Tally,
    total_weight: Weight,
    voting_duration_secs: u64,
) -> Result<PolicyOutcome, GovernanceError> {
    if tally.yes >= threshold {
        return Ok(PolicyOutcome::ACCEPTED);
    }
    if voting_duration_secs >= voting_period_secs {
        return Ok(PolicyOutcome::REJECTED);
    }
    let undecided = total_weight.saturating_sub(tally.total()?);
    let reachable = tally
        .yes
        .checked_add(undecided)
        .ok_or(GovernanceError::WeightOverflow)?;
    if reachable < threshold {
        return Ok(PolicyOutcome::REJECTED);
    }
    Ok(PolicyOutcome::PENDING)
}

fn validate_voting_period(secs: u64) -> Result<(), GovernanceError> {
    if secs == 0 {
        return Err(GovernanceError::InvalidPolicy(
            "voting period must be positive".into(),
        ));
    }
    Ok(())
}

impl Policy for ThresholdPolicy {
    fn allow(
        &self,
        tally: &Tally,
        total_weight: Weight,
        voting_duration_secs: u64,
    ) -> Result<PolicyOutcome, GovernanceError> {
        threshold_outcome(
            self.threshold,
            self.voting_period_secs,
            tally,
            total_weight,
            voting_duration_secs,
        )
    }

    fn timeout(&self, submitted_at: Timestamp) -> Timestamp {
        submitted_at.saturating_add_secs(self.voting_period_secs)
    }

    fn validate(&self, group: &Group) -> Result<(), GovernanceError> {
        if !self.threshold.is_positive() {
            return Err(GovernanceError::InvalidPolicy(
                "threshold must be positive".into(),
            ));
        }
        if self.threshold > group.total_weight {
            return Err(GovernanceError::InvalidPolicy(format!(
                "threshold {} exceeds total weight {} of group {}",
                self.threshold, group.total_weight, group.id
            )));
        }
        validate_voting_period(self.voting_period_secs)
    }
}

impl PercentagePolicy {
    /// Absolute yes weight this policy needs from a group of `total_weight`,
    /// never less than one raw unit.
    pub fn effective_threshold(&self, total_weight: Weight) -> Result<Weight, GovernanceError> {
        let threshold = total_weight
            .checked_mul(self.percentage)
            .ok_or(GovernanceError::WeightOverflow)?;
        Ok(threshold.max(Weight::from_raw(1)))
    }
}

impl Policy for PercentagePolicy {
    fn allow(
        &self,
        tally: &Tally,
        total_weight: Weight,
        voting_duration_secs: u64,
    ) -> Result<PolicyOutcome, GovernanceError> {
        threshold_outcome(
            self.effective_threshold(total_weight)?,
            self.voting_period_secs,
            tally,
            total_weight,
            voting_duration_secs,
        )
    }

    fn timeout(&self, submitted_at: Timestamp) -> Timestamp {
        submitted_at.saturating_add_secs(self.voting_period_secs)
    }

    fn validate(&self, group: &Group) -> Result<(), GovernanceError> {
        if !self.percentage.is_positive() || self.percentage > Weight::from_units(1) {
            return Err(GovernanceError::InvalidPolicy(format!(
                "percentage {} must be in (0, 1]",
                self.percentage
            )));
        }
        if group.total_weight.is_zero() {
            return Err(GovernanceError::InvalidPolicy(format!(
                "group {} has no voting weight",
                group.id
            )));
        }
        self.effective_threshold(group.total_weight)?;
        validate_voting_period(self.voting_period_secs)
    }
}
