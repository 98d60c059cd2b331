//! Weighted group governance.
//!
//! A group of weighted members jointly controls group accounts. Each
//! account carries a decision policy. Members submit proposals holding
//! operations for the account to run, vote on them with their weight, and
//! once the policy declares an outcome final the proposal is executed
//! atomically or rejected.
//!
//! Lifecycle of a proposal:
//!
//! ```text
//! Submitted ──(policy final)──> Closed { Accepted | Rejected }
//!     │
//!     └──(group or account changed)──> Aborted
//! ```
//!
//! Closed and aborted proposals never change state again; an accepted
//! proposal whose execution failed may still be executed again.

pub mod account;
pub mod engine;
pub mod error;
pub mod executor;
pub mod group;
pub mod keys;
pub mod msgs;
pub mod policy;
pub mod proposal;
pub mod query;
pub mod tally;
pub mod vote;

pub use account::GroupAccount;
pub use engine::GovernanceEngine;
pub use error::{ErrorKind, GovernanceError};
pub use group::{Group, GroupMember, Member};
pub use msgs::*;
pub use policy::{Decision, DecisionPolicy, PercentagePolicy, Policy, PolicyOutcome, ThresholdPolicy};
pub use proposal::{ExecMode, ExecutorResult, Proposal, ProposalResult, ProposalStatus};
pub use tally::Tally;
pub use vote::{Choice, Vote};
