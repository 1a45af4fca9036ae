//! Partition routing for balance-type keys.
//!
//! A closed dispatch table: every [`BalanceKey`] maps to exactly one
//! [`Partition`], the aggregation function used for that partition, and the
//! tag (if any) stored on its operations. Unknown keys do not fail — they
//! take an explicit fallback to the default content partition, with the raw
//! key passed through as the stored tag and a warning emitted, so a caller
//! typo stays visible in both logs and provenance queries.

use openledger_types::{AggregateFn, BalanceKey, OperationTag, Partition};
use tracing::warn;

/// Result of routing one balance-type key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Partition the operation is appended to.
    pub partition: Partition,
    /// Aggregation used to derive balances in that partition.
    pub aggregate_fn: AggregateFn,
    /// Tag stored on the operation. `Some` exactly when the partition is
    /// tagged.
    pub tag: Option<OperationTag>,
}

/// Resolve a balance-type key to its route. Pure, total, no storage access.
#[must_use]
pub fn route(key: &BalanceKey) -> Route {
    match key {
        BalanceKey::UserCoin => Route {
            partition: Partition::UserCoin,
            aggregate_fn: AggregateFn::Total,
            tag: None,
        },
        BalanceKey::UserCash => Route {
            partition: Partition::UserCash,
            aggregate_fn: AggregateFn::Total,
            tag: None,
        },
        BalanceKey::ContentCoin(tag) => Route {
            partition: Partition::ContentCoin,
            aggregate_fn: AggregateFn::CreditDebit,
            tag: Some(OperationTag::from(*tag)),
        },
        BalanceKey::AdBudget => Route {
            partition: Partition::AdBudgetCash,
            aggregate_fn: AggregateFn::Total,
            tag: Some(OperationTag::Budget),
        },
        // Deliberate permissiveness: unrecognized keys land in the content
        // partition carrying the raw key, instead of being rejected.
        BalanceKey::Unrecognized(raw) => {
            warn!(key = %raw, "unrecognized balance key, routing to default content partition");
            Route {
                partition: Partition::ContentCoin,
                aggregate_fn: AggregateFn::CreditDebit,
                tag: Some(OperationTag::Raw(raw.clone())),
            }
        }
    }
}
