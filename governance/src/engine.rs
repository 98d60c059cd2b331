//! The governance engine: command entry points and read-only queries over
//! one store.
//!
//! Every command runs as a unit of work on a [`CacheStore`] layered over the
//! engine's store. A successful command commits its writes in one batch; a
//! failed one leaves the store untouched, except that aborting a stale
//! proposal is persisted even though the command reports the abort.

use grove_store::{CacheStore, KvStore};
use grove_transactions::Router;
use grove_types::{Address, Clock, GovernanceParams, Timestamp};
use tracing::debug;

use crate::account::{self, GroupAccount};
use crate::error::GovernanceError;
use crate::executor;
use crate::group::{self, Group, GroupMember};
use crate::msgs::*;
use crate::proposal::{self, Proposal};
use crate::query;
use crate::vote::{self, Vote};

/// What a command sees besides the store.
pub(crate) struct Context<'a> {
    pub now: Timestamp,
    pub params: &'a GovernanceParams,
    pub router: &'a Router,
}

pub struct GovernanceEngine<S, C> {
    store: S,
    clock: C,
    router: Router,
    params: GovernanceParams,
}

impl<S: KvStore, C: Clock> GovernanceEngine<S, C> {
    pub fn new(store: S, clock: C, router: Router, params: GovernanceParams) -> Self {
        Self {
            store,
            clock,
            router,
            params,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access, outside any unit of work.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    fn transact<T, F>(&mut self, command: &'static str, f: F) -> Result<T, GovernanceError>
    where
        F: FnOnce(&mut CacheStore<'_, S>, &Context<'_>) -> Result<T, GovernanceError>,
    {
        let ctx = Context {
            now: self.clock.now(),
            params: &self.params,
            router: &self.router,
        };
        let mut cache = CacheStore::new(&mut self.store);
        match f(&mut cache, &ctx) {
            Ok(value) => {
                debug!(command, writes = cache.pending_len(), "command committed");
                cache.commit()?;
                Ok(value)
            }
            Err(err) if err.keeps_writes() => {
                cache.commit()?;
                debug!(command, error = %err, "command failed, abort persisted");
                Err(err)
            }
            Err(err) => {
                debug!(command, error = %err, "command failed, changes discarded");
                Err(err)
            }
        }
    }

    // ── Commands ────────────────────────────────────────────────────────

    pub fn create_group(&mut self, msg: MsgCreateGroup) -> Result<u64, GovernanceError> {
        self.transact("create_group", |store, ctx| {
            group::create_group(store, ctx.params, &msg.admin, &msg.members, &msg.metadata)
        })
    }

    pub fn update_group_admin(&mut self, msg: MsgUpdateGroupAdmin) -> Result<(), GovernanceError> {
        self.transact("update_group_admin", |store, _| {
            group::update_group_admin(store, &msg.admin, msg.group_id, &msg.new_admin)
        })
    }

    pub fn update_group_metadata(&mut self, msg: MsgUpdateGroupMetadata) -> Result<(), GovernanceError> {
        self.transact("update_group_metadata", |store, ctx| {
            group::update_group_metadata(store, ctx.params, &msg.admin, msg.group_id, &msg.metadata)
        })
    }

    pub fn update_group_members(&mut self, msg: MsgUpdateGroupMembers) -> Result<(), GovernanceError> {
        self.transact("update_group_members", |store, ctx| {
            group::update_group_members(store, ctx.params, &msg.admin, msg.group_id, &msg.member_updates)
        })
    }

    pub fn create_group_account(&mut self, msg: MsgCreateGroupAccount) -> Result<Address, GovernanceError> {
        self.transact("create_group_account", |store, ctx| {
            account::create_group_account(
                store,
                ctx.params,
                &msg.admin,
                msg.group_id,
                &msg.metadata,
                msg.decision_policy,
            )
        })
    }

    pub fn update_group_account_admin(&mut self, msg: MsgUpdateGroupAccountAdmin) -> Result<(), GovernanceError> {
        self.transact("update_group_account_admin", |store, _| {
            account::update_group_account_admin(store, &msg.admin, &msg.address, &msg.new_admin)
        })
    }

    pub fn update_group_account_metadata(
        &mut self,
        msg: MsgUpdateGroupAccountMetadata,
    ) -> Result<(), GovernanceError> {
        self.transact("update_group_account_metadata", |store, ctx| {
            account::update_group_account_metadata(store, ctx.params, &msg.admin, &msg.address, &msg.metadata)
        })
    }

    pub fn update_group_account_decision_policy(
        &mut self,
        msg: MsgUpdateGroupAccountDecisionPolicy,
    ) -> Result<(), GovernanceError> {
        self.transact("update_group_account_decision_policy", |store, _| {
            account::update_group_account_policy(store, &msg.admin, &msg.address, msg.decision_policy)
        })
    }

    pub fn create_proposal(&mut self, msg: MsgCreateProposal) -> Result<u64, GovernanceError> {
        self.transact("create_proposal", |store, ctx| {
            proposal::create_proposal(store, ctx, &msg)
        })
    }

    pub fn vote(&mut self, msg: MsgVote) -> Result<(), GovernanceError> {
        self.transact("vote", |store, ctx| vote::cast_vote(store, ctx, &msg))
    }

    pub fn exec(&mut self, msg: MsgExec) -> Result<(), GovernanceError> {
        self.transact("exec", |store, ctx| {
            executor::exec_proposal(store, ctx, msg.proposal_id, &msg.signer)
        })
    }

    /// Dispatch any command.
    pub fn handle(&mut self, msg: Msg) -> Result<MsgResponse, GovernanceError> {
        Ok(match msg {
            Msg::CreateGroup(m) => MsgResponse::GroupCreated {
                group_id: self.create_group(m)?,
            },
            Msg::UpdateGroupAdmin(m) => self.update_group_admin(m).map(|_| MsgResponse::Done)?,
            Msg::UpdateGroupMetadata(m) => self.update_group_metadata(m).map(|_| MsgResponse::Done)?,
            Msg::UpdateGroupMembers(m) => self.update_group_members(m).map(|_| MsgResponse::Done)?,
            Msg::CreateGroupAccount(m) => MsgResponse::GroupAccountCreated {
                address: self.create_group_account(m)?,
            },
            Msg::UpdateGroupAccountAdmin(m) => {
                self.update_group_account_admin(m).map(|_| MsgResponse::Done)?
            }
            Msg::UpdateGroupAccountMetadata(m) => {
                self.update_group_account_metadata(m).map(|_| MsgResponse::Done)?
            }
            Msg::UpdateGroupAccountDecisionPolicy(m) => self
                .update_group_account_decision_policy(m)
                .map(|_| MsgResponse::Done)?,
            Msg::CreateProposal(m) => MsgResponse::ProposalCreated {
                proposal_id: self.create_proposal(m)?,
            },
            Msg::Vote(m) => self.vote(m).map(|_| MsgResponse::Done)?,
            Msg::Exec(m) => self.exec(m).map(|_| MsgResponse::Done)?,
        })
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn group_info(&self, group_id: u64) -> Result<Group, GovernanceError> {
        query::group_info(&self.store, group_id)
    }

    pub fn group_members(&self, group_id: u64) -> Result<Vec<GroupMember>, GovernanceError> {
        query::group_members(&self.store, group_id)
    }

    pub fn groups_by_admin(&self, admin: &Address) -> Result<Vec<Group>, GovernanceError> {
        query::groups_by_admin(&self.store, admin)
    }

    pub fn group_account_info(&self, address: &Address) -> Result<GroupAccount, GovernanceError> {
        query::group_account_info(&self.store, address)
    }

    pub fn group_accounts_by_group(&self, group_id: u64) -> Result<Vec<GroupAccount>, GovernanceError> {
        query::group_accounts_by_group(&self.store, group_id)
    }

    pub fn group_accounts_by_admin(&self, admin: &Address) -> Result<Vec<GroupAccount>, GovernanceError> {
        query::group_accounts_by_admin(&self.store, admin)
    }

    pub fn proposal(&self, proposal_id: u64) -> Result<Proposal, GovernanceError> {
        query::proposal(&self.store, proposal_id)
    }

    pub fn proposals_by_group_account(&self, address: &Address) -> Result<Vec<Proposal>, GovernanceError> {
        query::proposals_by_group_account(&self.store, address)
    }

    pub fn vote_by_proposal_voter(&self, proposal_id: u64, voter: &Address) -> Result<Vote, GovernanceError> {
        query::vote_by_proposal_voter(&self.store, proposal_id, voter)
    }

    pub fn votes_by_proposal(&self, proposal_id: u64) -> Result<Vec<Vote>, GovernanceError> {
        query::votes_by_proposal(&self.store, proposal_id)
    }

    pub fn votes_by_voter(&self, voter: &Address) -> Result<Vec<Vote>, GovernanceError> {
        query::votes_by_voter(&self.store, voter)
    }
}
