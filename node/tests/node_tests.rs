//! Node tests on a real LMDB environment: commands survive a reopen, and so
//! do the effects of execution and aborts.

use std::sync::Arc;

use grove_governance::{
    Choice, DecisionPolicy, ErrorKind, ExecMode, ExecutorResult, Member, Msg, MsgCreateGroup,
    MsgCreateGroupAccount, MsgCreateProposal, MsgExec, MsgResponse, MsgUpdateGroupMetadata,
    MsgVote, ProposalStatus,
};
use grove_node::{GroveNode, NodeConfig, NodeError};
use grove_nullables::{null_address, NullBank, NullClock};
use grove_types::{Address, Weight};

fn config(dir: &tempfile::TempDir) -> NodeConfig {
    NodeConfig {
        data_dir: dir.path().join("data"),
        map_size_mb: 16,
        dev_bank: true,
        ..NodeConfig::default()
    }
}

fn open(dir: &tempfile::TempDir, clock: &Arc<NullClock>) -> GroveNode<Arc<NullClock>> {
    GroveNode::open_with_clock(config(dir), Arc::clone(clock)).expect("open node")
}

/// Creates group 1 with `alice` (weight 2) and `bob` (weight 1) and an
/// account needing a yes weight of 2. Returns the account address.
fn bootstrap(node: &mut GroveNode<Arc<NullClock>>) -> Address {
    let admin = null_address("admin");
    let created = node
        .apply(Msg::CreateGroup(MsgCreateGroup {
            admin: admin.clone(),
            members: vec![
                Member::new(null_address("alice"), Weight::from_units(2)),
                Member::new(null_address("bob"), Weight::from_units(1)),
            ],
            metadata: Vec::new(),
        }))
        .unwrap();
    assert_eq!(created, MsgResponse::GroupCreated { group_id: 1 });

    match node
        .apply(Msg::CreateGroupAccount(MsgCreateGroupAccount {
            admin,
            group_id: 1,
            metadata: Vec::new(),
            decision_policy: DecisionPolicy::threshold(Weight::from_units(2), 600),
        }))
        .unwrap()
    {
        MsgResponse::GroupAccountCreated { address } => address,
        other => panic!("unexpected response {other:?}"),
    }
}

fn propose_send(node: &mut GroveNode<Arc<NullClock>>, account: &Address, to: &Address, amount: u128) -> u64 {
    let response = node
        .apply(Msg::CreateProposal(MsgCreateProposal {
            address: account.clone(),
            proposers: vec![null_address("bob")],
            metadata: Vec::new(),
            operations: vec![NullBank::send(account, to, amount)],
            exec: ExecMode::Deferred,
        }))
        .unwrap();
    match response {
        MsgResponse::ProposalCreated { proposal_id } => proposal_id,
        other => panic!("unexpected response {other:?}"),
    }
}

fn vote(node: &mut GroveNode<Arc<NullClock>>, proposal_id: u64, voter: &str) -> Result<MsgResponse, NodeError> {
    node.apply(Msg::Vote(MsgVote {
        proposal_id,
        voter: null_address(voter),
        choice: Choice::Yes,
        metadata: Vec::new(),
        exec: ExecMode::Deferred,
    }))
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = NullClock::shared(10_000);
    let account = {
        let mut node = open(&dir, &clock);
        bootstrap(&mut node)
    };

    let node = open(&dir, &clock);
    let group = node.engine().group_info(1).unwrap();
    assert_eq!(group.total_weight, Weight::from_units(3));
    assert_eq!(node.engine().group_members(1).unwrap().len(), 2);
    assert_eq!(node.engine().group_account_info(&account).unwrap().group_id, 1);
}

#[test]
fn test_sequences_continue_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = NullClock::shared(10_000);
    {
        let mut node = open(&dir, &clock);
        bootstrap(&mut node);
    }
    let mut node = open(&dir, &clock);
    let response = node
        .apply(Msg::CreateGroup(MsgCreateGroup {
            admin: null_address("admin"),
            members: Vec::new(),
            metadata: Vec::new(),
        }))
        .unwrap();
    assert_eq!(response, MsgResponse::GroupCreated { group_id: 2 });
}

#[test]
fn test_executed_transfer_is_durable() {
    let dir = tempfile::tempdir().unwrap();
    let clock = NullClock::shared(10_000);
    let to = null_address("carol");
    {
        let mut node = open(&dir, &clock);
        let account = bootstrap(&mut node);
        NullBank::fund(node.engine_mut().store_mut(), &account, 50).unwrap();
        let id = propose_send(&mut node, &account, &to, 20);
        vote(&mut node, id, "alice").unwrap();
        node.apply(Msg::Exec(MsgExec {
            proposal_id: id,
            signer: null_address("bob"),
        }))
        .unwrap();
    }

    let node = open(&dir, &clock);
    assert_eq!(node.engine().proposal(1).unwrap().executor_result, ExecutorResult::Success);
    assert_eq!(NullBank::balance(node.engine().store(), &to).unwrap(), 20);
}

#[test]
fn test_abort_is_durable() {
    let dir = tempfile::tempdir().unwrap();
    let clock = NullClock::shared(10_000);
    {
        let mut node = open(&dir, &clock);
        let account = bootstrap(&mut node);
        let id = propose_send(&mut node, &account, &null_address("carol"), 1);
        node.apply(Msg::UpdateGroupMetadata(MsgUpdateGroupMetadata {
            admin: null_address("admin"),
            group_id: 1,
            metadata: b"renamed".to_vec(),
        }))
        .unwrap();

        let err = vote(&mut node, id, "alice").unwrap_err();
        match err {
            NodeError::Governance(err) => assert_eq!(err.kind(), ErrorKind::FailedPrecondition),
            other => panic!("unexpected error {other:?}"),
        }
    }

    let node = open(&dir, &clock);
    let proposal = node.engine().proposal(1).unwrap();
    assert_eq!(proposal.status, ProposalStatus::Aborted);
    assert!(node.engine().votes_by_proposal(1).unwrap().is_empty());
}

#[test]
fn test_without_dev_bank_operations_fail_to_execute() {
    let dir = tempfile::tempdir().unwrap();
    let clock = NullClock::shared(10_000);
    let config = NodeConfig {
        dev_bank: false,
        ..config(&dir)
    };
    let mut node = GroveNode::open_with_clock(config, Arc::clone(&clock)).unwrap();
    let account = bootstrap(&mut node);
    let id = propose_send(&mut node, &account, &null_address("carol"), 1);
    vote(&mut node, id, "alice").unwrap();
    node.apply(Msg::Exec(MsgExec {
        proposal_id: id,
        signer: null_address("alice"),
    }))
    .unwrap();
    assert_eq!(node.engine().proposal(id).unwrap().executor_result, ExecutorResult::Failure);
}
