//! The rating transaction engine.
//!
//! Rating content is the one multi-partition atomic transaction in the
//! ledger. One rating stages four writes:
//!
//! 1. rater's `user:coin`, minus the rating cost (originator: the event)
//! 2. content owner's `user:coin`, ±1 (originator: the event)
//! 3. rater's `user:cash`, plus the reward (originator: the event)
//! 4. the content's `content:coin`, ±1 tagged credit/debit
//!    (originator: the rater, **not** the event)
//!
//! The provenance asymmetry in (4) is load-bearing: a cascading undo of the
//! event reverts exactly the user-side effects, while the content-side entry
//! stays separately traceable to the acting user.
//!
//! The rater's new coin total is checked against the staged + committed
//! state before anything persists. `Staged → Committed` on success,
//! `Staged → Discarded` on an insufficient balance; no partial state is
//! ever observable.

use openledger_types::{
    AggregateBalance, BalanceKey, EventId, LedgerError, OriginatorType, Partition, Result,
    SubjectId, constants,
};
use tracing::{info, warn};

use crate::aggregate;
use crate::store::OperationStore;
use crate::writer::{RecordOptions, RecordRequest, record_operation_in};

/// Direction of a rating vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Positive rating: +1 to owner and content, tagged `credit`.
    Credit,
    /// Negative rating: −1 to owner and content, tagged `debit`.
    Debit,
}

impl TransactionType {
    /// Sign applied to the owner's and content's coin adjustment.
    #[must_use]
    pub fn sign(self) -> i64 {
        match self {
            Self::Credit => 1,
            Self::Debit => -1,
        }
    }

    fn content_tag(self) -> openledger_types::ContentTag {
        match self {
            Self::Credit => openledger_types::ContentTag::Credit,
            Self::Debit => openledger_types::ContentTag::Debit,
        }
    }
}

/// Economics of one rating. The defaults are the fixed system economics;
/// the type exists so tests and future policy changes have one seam.
#[derive(Debug, Clone, Copy)]
pub struct RatingPolicy {
    /// Coins debited from the rater per rating.
    pub coin_cost: i64,
    /// Cash credited to the rater per rating.
    pub cash_reward: i64,
    /// Magnitude of the owner/content coin adjustment.
    pub content_delta: i64,
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self {
            coin_cost: constants::RATING_COIN_COST,
            cash_reward: constants::RATING_CASH_REWARD,
            content_delta: constants::RATING_CONTENT_DELTA,
        }
    }
}

/// One rating call.
#[derive(Debug, Clone, Copy)]
pub struct RateRequest {
    /// The content being rated.
    pub content_id: SubjectId,
    /// The content's owner.
    pub content_owner_id: SubjectId,
    /// The acting user paying for the rating.
    pub rater_id: SubjectId,
    /// Vote direction.
    pub transaction_type: TransactionType,
    /// The triggering event; originator of the user-side writes.
    pub event_id: EventId,
}

/// Executes rating transactions against an [`OperationStore`].
#[derive(Debug, Default)]
pub struct RatingEngine {
    policy: RatingPolicy,
}

impl RatingEngine {
    /// Engine with the fixed default economics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom economics.
    #[must_use]
    pub fn with_policy(policy: RatingPolicy) -> Self {
        Self { policy }
    }

    /// Rate content as one atomic unit.
    ///
    /// On success all four writes are committed and the content's fresh
    /// aggregate is returned. If the rater's coin total would go negative,
    /// nothing persists.
    ///
    /// # Errors
    /// Returns [`LedgerError::InsufficientBalance`] carrying the minimum
    /// required amount when the rater cannot afford the rating.
    pub fn rate_content(
        &self,
        store: &mut OperationStore,
        request: &RateRequest,
    ) -> Result<AggregateBalance> {
        let delta = request.transaction_type.sign() * self.policy.content_delta;
        let event_origin = (OriginatorType::Event, request.event_id.0);

        let mut txn = store.begin();

        // User-side writes, attributed to the triggering event.
        record_operation_in(
            &mut txn,
            &RecordRequest {
                key: BalanceKey::UserCoin,
                recipient_id: request.rater_id,
                amount: -self.policy.coin_cost,
                originator_type: event_origin.0,
                originator_id: event_origin.1,
            },
            RecordOptions::default(),
        )?;
        record_operation_in(
            &mut txn,
            &RecordRequest {
                key: BalanceKey::UserCoin,
                recipient_id: request.content_owner_id,
                amount: delta,
                originator_type: event_origin.0,
                originator_id: event_origin.1,
            },
            RecordOptions::default(),
        )?;
        record_operation_in(
            &mut txn,
            &RecordRequest {
                key: BalanceKey::UserCash,
                recipient_id: request.rater_id,
                amount: self.policy.cash_reward,
                originator_type: event_origin.0,
                originator_id: event_origin.1,
            },
            RecordOptions::default(),
        )?;

        // Content-side write, attributed to the rater so it stays traceable
        // independently of the event.
        record_operation_in(
            &mut txn,
            &RecordRequest {
                key: BalanceKey::ContentCoin(request.transaction_type.content_tag()),
                recipient_id: request.content_id,
                amount: delta,
                originator_type: OriginatorType::User,
                originator_id: request.rater_id.0,
            },
            RecordOptions::default(),
        )?;

        // Invariant check against staged + committed state.
        let rater_total = aggregate::balance_of(&txn, Partition::UserCoin, request.rater_id);
        if rater_total < 0 {
            warn!(
                rater = %request.rater_id,
                balance = rater_total + self.policy.coin_cost,
                required = self.policy.coin_cost,
                "rating aborted: insufficient coin balance"
            );
            txn.discard();
            return Err(LedgerError::InsufficientBalance {
                required: self.policy.coin_cost,
                balance: rater_total + self.policy.coin_cost,
            });
        }

        let content_balance = aggregate::content_aggregate(&txn, request.content_id);
        txn.commit();
        info!(
            content = %request.content_id,
            rater = %request.rater_id,
            vote = ?request.transaction_type,
            total = content_balance.total,
            "rating committed"
        );
        Ok(content_balance)
    }
}
