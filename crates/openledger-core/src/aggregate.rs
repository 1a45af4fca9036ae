//! Live balance aggregation and provenance queries.
//!
//! Every function here recomputes from the operation history at call time.
//! Nothing is cached across calls: the sum over history is the authoritative
//! definition of a balance. All functions accept any [`LedgerView`], so the
//! same aggregation runs against the committed store and against a staged
//! transaction (which reads its own writes).

use openledger_types::{
    AggregateBalance, AggregateFn, BalanceKey, ContentTag, Operation, OperationTag, Partition,
    SubjectId,
};
use uuid::Uuid;

use crate::store::LedgerView;

/// Current total for one subject in one partition.
#[must_use]
pub fn balance_of(view: &impl LedgerView, partition: Partition, subject: SubjectId) -> i64 {
    view.operations(partition)
        .filter(|op| op.recipient_id == subject)
        .map(|op| op.amount)
        .sum()
}

/// Combined total for a set of subjects in one partition.
#[must_use]
pub fn balance_of_many(
    view: &impl LedgerView,
    partition: Partition,
    subjects: &[SubjectId],
) -> i64 {
    view.operations(partition)
        .filter(|op| subjects.contains(&op.recipient_id))
        .map(|op| op.amount)
        .sum()
}

/// A content subject's aggregate with credit/debit subtotals.
///
/// `credit` sums operations tagged `credit` or `initial`; `debit` sums
/// operations tagged `debit` (and is therefore non-positive). Raw-tagged
/// operations count toward the total only.
#[must_use]
pub fn content_aggregate(view: &impl LedgerView, content: SubjectId) -> AggregateBalance {
    let mut total = 0;
    let mut credit = 0;
    let mut debit = 0;
    for op in view.operations(Partition::ContentCoin) {
        if op.recipient_id != content {
            continue;
        }
        total += op.amount;
        match op.tag {
            Some(OperationTag::Credit | OperationTag::Initial) => credit += op.amount,
            Some(OperationTag::Debit) => debit += op.amount,
            _ => {}
        }
    }
    AggregateBalance::with_breakdown(total, credit, debit)
}

/// One subject's aggregate in any partition, using the partition's
/// aggregation function.
#[must_use]
pub fn aggregate_of(
    view: &impl LedgerView,
    partition: Partition,
    aggregate_fn: AggregateFn,
    subject: SubjectId,
) -> AggregateBalance {
    match aggregate_fn {
        AggregateFn::Total => AggregateBalance::total_only(balance_of(view, partition, subject)),
        AggregateFn::CreditDebit => content_aggregate(view, subject),
    }
}

/// An operation joined with the composite balance key of the partition it
/// was found in. This is what provenance queries return and what the
/// reversal engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginatedOperation {
    /// Reconstructed balance key (`user:coin`, `content:coin:credit`, ...).
    pub balance_key: BalanceKey,
    pub operation: Operation,
}

impl OriginatedOperation {
    /// The composite label, e.g. `"content:coin:credit"`.
    #[must_use]
    pub fn composite_key(&self) -> String {
        self.balance_key.to_string()
    }
}

/// Every side-effect of the given originators, across the user-coin,
/// user-cash, and content-coin partitions.
///
/// Each row carries its composite balance key so the caller can see which
/// ledger it came from (and hand it straight to the reversal engine).
#[must_use]
pub fn operations_by_originator(
    view: &impl LedgerView,
    originator_ids: &[Uuid],
) -> Vec<OriginatedOperation> {
    let mut results = Vec::new();
    for partition in [
        Partition::UserCoin,
        Partition::UserCash,
        Partition::ContentCoin,
    ] {
        for op in view.operations(partition) {
            if !originator_ids.contains(&op.originator_id) {
                continue;
            }
            results.push(OriginatedOperation {
                balance_key: composite_key_for(partition, op.tag.as_ref()),
                operation: op.clone(),
            });
        }
    }
    results
}

/// Rebuild the balance key an operation was recorded under from its
/// partition and stored tag.
fn composite_key_for(partition: Partition, tag: Option<&OperationTag>) -> BalanceKey {
    match (partition, tag) {
        (Partition::UserCoin, _) => BalanceKey::UserCoin,
        (Partition::UserCash, _) => BalanceKey::UserCash,
        (Partition::AdBudgetCash, _) => BalanceKey::AdBudget,
        (Partition::ContentCoin, Some(OperationTag::Credit)) => {
            BalanceKey::ContentCoin(ContentTag::Credit)
        }
        (Partition::ContentCoin, Some(OperationTag::Debit)) => {
            BalanceKey::ContentCoin(ContentTag::Debit)
        }
        (Partition::ContentCoin, Some(OperationTag::Initial)) => {
            BalanceKey::ContentCoin(ContentTag::Initial)
        }
        // Raw tags round-trip to the unrecognized key they came from.
        (Partition::ContentCoin, Some(OperationTag::Raw(raw))) => {
            BalanceKey::Unrecognized(raw.clone())
        }
        // Untagged or budget-tagged rows in the content partition cannot be
        // produced by the router; fall back to the raw partition label.
        (Partition::ContentCoin, _) => BalanceKey::Unrecognized(partition.to_string()),
    }
}
