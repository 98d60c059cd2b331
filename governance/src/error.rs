use grove_store::StoreError;
use grove_types::Timestamp;
use thiserror::Error;

/// Broad class of a [`GovernanceError`], for callers that map failures onto
/// status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Unauthorized,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
    Internal,
}

#[derive(Debug, Error)]
pub enum GovernanceError {
    // ── Invalid arguments ───────────────────────────────────────────────
    #[error("metadata is {len} bytes, limit is {max}")]
    MetadataTooLong { len: usize, max: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid weight for member {address}: {reason}")]
    InvalidWeight { address: String, reason: String },

    #[error("member {0} listed more than once")]
    DuplicateMember(String),

    #[error("a proposal needs at least one proposer")]
    NoProposers,

    #[error("proposer {0} listed more than once")]
    DuplicateProposer(String),

    #[error("invalid decision policy: {0}")]
    InvalidPolicy(String),

    #[error("weight overflow")]
    WeightOverflow,

    // ── Authorization ───────────────────────────────────────────────────
    #[error("{caller} is not the admin of {target}")]
    NotAdmin { caller: String, target: String },

    #[error("{address} is not a member of group {group_id}")]
    NotMember { address: String, group_id: u64 },

    #[error("operation {index} must be signed solely by group account {account}")]
    ForeignSigner { index: usize, account: String },

    // ── Lookups ─────────────────────────────────────────────────────────
    #[error("group {0} not found")]
    GroupNotFound(u64),

    #[error("member {address} not found in group {group_id}")]
    MemberNotFound { address: String, group_id: u64 },

    #[error("group account {0} not found")]
    GroupAccountNotFound(String),

    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("no vote by {voter} on proposal {proposal_id}")]
    VoteNotFound { proposal_id: u64, voter: String },

    #[error("{voter} has already voted on proposal {proposal_id}")]
    AlreadyVoted { proposal_id: u64, voter: String },

    // ── Proposal state ──────────────────────────────────────────────────
    #[error("proposal {0} was aborted: its group or group account changed after submission")]
    ProposalAborted(u64),

    #[error("proposal {0} is already closed")]
    ProposalClosed(u64),

    #[error("voting on proposal {proposal_id} closed at {timeout}")]
    VotingClosed { proposal_id: u64, timeout: Timestamp },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        use GovernanceError::*;
        match self {
            MetadataTooLong { .. }
            | InvalidAddress(_)
            | InvalidWeight { .. }
            | DuplicateMember(_)
            | NoProposers
            | DuplicateProposer(_)
            | InvalidPolicy(_)
            | WeightOverflow => ErrorKind::InvalidArgument,
            NotAdmin { .. } | NotMember { .. } | ForeignSigner { .. } => ErrorKind::Unauthorized,
            GroupNotFound(_)
            | MemberNotFound { .. }
            | GroupAccountNotFound(_)
            | ProposalNotFound(_)
            | VoteNotFound { .. } => ErrorKind::NotFound,
            AlreadyVoted { .. } => ErrorKind::AlreadyExists,
            ProposalAborted(_) | ProposalClosed(_) | VotingClosed { .. } => {
                ErrorKind::FailedPrecondition
            }
            Store(_) => ErrorKind::Internal,
        }
    }

    /// Whether the writes made before this error must still be committed.
    /// Only the abort of a stale proposal qualifies.
    pub(crate) fn keeps_writes(&self) -> bool {
        matches!(self, GovernanceError::ProposalAborted(_))
    }
}
