//! Balance-key and partition model for the OpenLedger routing table.
//!
//! A [`BalanceKey`] names a (subject kind, currency) pair on the wire
//! (`user:coin`, `content:coin:credit`, ...). The router maps each key to
//! one of four fixed [`Partition`]s. The key set is closed: anything that
//! fails to parse becomes [`BalanceKey::Unrecognized`] and is routed — on
//! purpose, observably — to the default content partition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ContentTag
// ---------------------------------------------------------------------------

/// Sub-type of a `content:coin` balance key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTag {
    /// A positive rating on the content.
    Credit,
    /// A negative rating on the content.
    Debit,
    /// Coins granted when the content is first published.
    Initial,
}

impl ContentTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Initial => "initial",
        }
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BalanceKey
// ---------------------------------------------------------------------------

/// Wire-level balance-type key supplied by callers.
///
/// Parsing never fails: an unknown key yields [`BalanceKey::Unrecognized`]
/// carrying the raw string, which callers can match on and which the router
/// logs and passes through as the stored tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceKey {
    /// Primary currency of a user (`user:coin`).
    UserCoin,
    /// Secondary currency of a user (`user:cash`).
    UserCash,
    /// Content's own primary-currency ledger (`content:coin:<tag>`).
    ContentCoin(ContentTag),
    /// Advertising budget in secondary currency (`ad:budget`).
    AdBudget,
    /// Anything else. Kept verbatim so the typo stays visible downstream.
    Unrecognized(String),
}

impl BalanceKey {
    /// Parse a wire key. Unknown strings are preserved, not rejected.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "user:coin" => Self::UserCoin,
            "user:cash" => Self::UserCash,
            "content:coin:credit" => Self::ContentCoin(ContentTag::Credit),
            "content:coin:debit" => Self::ContentCoin(ContentTag::Debit),
            "content:coin:initial" => Self::ContentCoin(ContentTag::Initial),
            "ad:budget" => Self::AdBudget,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Whether this key parsed to a known routing entry.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl FromStr for BalanceKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for BalanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserCoin => f.write_str("user:coin"),
            Self::UserCash => f.write_str("user:cash"),
            Self::ContentCoin(tag) => write!(f, "content:coin:{tag}"),
            Self::AdBudget => f.write_str("ad:budget"),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// Physical ledger partition an operation is appended to. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Users' primary-currency operations.
    UserCoin,
    /// Users' secondary-currency operations.
    UserCash,
    /// Content items' primary-currency operations (tagged).
    ContentCoin,
    /// Advertising budgets' secondary-currency operations (tagged).
    AdBudgetCash,
}

impl Partition {
    /// All partitions, in provenance-union order.
    pub const ALL: [Self; 4] = [
        Self::UserCoin,
        Self::UserCash,
        Self::ContentCoin,
        Self::AdBudgetCash,
    ];

    /// Whether operations in this partition carry a sub-type tag.
    #[must_use]
    pub fn is_tagged(self) -> bool {
        matches!(self, Self::ContentCoin | Self::AdBudgetCash)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserCoin => "user_coin",
            Self::UserCash => "user_cash",
            Self::ContentCoin => "content_coin",
            Self::AdBudgetCash => "ad_budget_cash",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// AggregateFn
// ---------------------------------------------------------------------------

/// Identity of the aggregation used to derive a partition's balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFn {
    /// Plain sum of amounts.
    Total,
    /// Sum of amounts plus credit/debit subtotals split by tag.
    CreditDebit,
}

// ---------------------------------------------------------------------------
// AggregateBalance
// ---------------------------------------------------------------------------

/// A derived balance. Never stored — always recomputed from history.
///
/// `credit`/`debit` are populated only for partitions aggregated with
/// [`AggregateFn::CreditDebit`]. The debit subtotal is a literal sum of
/// debit-tagged amounts, so it is non-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBalance {
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<i64>,
}

impl AggregateBalance {
    /// A plain total with no credit/debit breakdown.
    #[must_use]
    pub fn total_only(total: i64) -> Self {
        Self {
            total,
            credit: None,
            debit: None,
        }
    }

    /// A content-style balance with credit/debit subtotals.
    #[must_use]
    pub fn with_breakdown(total: i64, credit: i64, debit: i64) -> Self {
        Self {
            total,
            credit: Some(credit),
            debit: Some(debit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_roundtrip_through_display() {
        let keys = [
            BalanceKey::UserCoin,
            BalanceKey::UserCash,
            BalanceKey::ContentCoin(ContentTag::Credit),
            BalanceKey::ContentCoin(ContentTag::Debit),
            BalanceKey::ContentCoin(ContentTag::Initial),
            BalanceKey::AdBudget,
        ];
        for key in keys {
            let parsed = BalanceKey::parse(&key.to_string());
            assert_eq!(parsed, key, "key {key} did not survive the roundtrip");
        }
    }

    #[test]
    fn unknown_key_is_preserved_not_rejected() {
        let key = BalanceKey::parse("user:tabcoin");
        assert_eq!(key, BalanceKey::Unrecognized("user:tabcoin".to_string()));
        assert!(!key.is_recognized());
        assert_eq!(key.to_string(), "user:tabcoin");
    }

    #[test]
    fn from_str_never_fails() {
        let key: BalanceKey = "".parse().unwrap();
        assert!(matches!(key, BalanceKey::Unrecognized(raw) if raw.is_empty()));
    }

    #[test]
    fn tagged_partitions() {
        assert!(Partition::ContentCoin.is_tagged());
        assert!(Partition::AdBudgetCash.is_tagged());
        assert!(!Partition::UserCoin.is_tagged());
        assert!(!Partition::UserCash.is_tagged());
    }

    #[test]
    fn aggregate_balance_serde_skips_empty_breakdown() {
        let plain = AggregateBalance::total_only(5);
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("credit"));

        let full = AggregateBalance::with_breakdown(1, 2, -1);
        let json = serde_json::to_string(&full).unwrap();
        let back: AggregateBalance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, full);
    }
}
