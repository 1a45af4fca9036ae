//! The immutable ledger operation record.
//!
//! An [`Operation`] is append-only: it is never updated or deleted after it
//! is written. Reversal appends a new operation with the negated amount;
//! balances are always derived by summing operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ContentTag, OperationId, SubjectId};

// ---------------------------------------------------------------------------
// OriginatorType
// ---------------------------------------------------------------------------

/// Kind of entity causally responsible for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginatorType {
    User,
    Content,
    Event,
    System,
}

impl std::fmt::Display for OriginatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Content => "content",
            Self::Event => "event",
            Self::System => "system",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// OperationTag
// ---------------------------------------------------------------------------

/// Sub-type tag stored on operations in tagged partitions.
///
/// `Raw` carries an unrecognized balance key passed through verbatim by the
/// router's default-partition fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationTag {
    Credit,
    Debit,
    Initial,
    Budget,
    Raw(String),
}

impl OperationTag {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Initial => "initial",
            Self::Budget => "budget",
            Self::Raw(raw) => raw,
        }
    }
}

impl From<ContentTag> for OperationTag {
    fn from(tag: ContentTag) -> Self {
        match tag {
            ContentTag::Credit => Self::Credit,
            ContentTag::Debit => Self::Debit,
            ContentTag::Initial => Self::Initial,
        }
    }
}

impl std::fmt::Display for OperationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// A single signed-amount ledger entry.
///
/// The partition an operation belongs to is carried by its storage location,
/// not by the record itself; provenance queries reattach it as a composite
/// balance-key label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Globally unique operation identifier.
    pub id: OperationId,
    /// The subject whose balance this operation moves.
    pub recipient_id: SubjectId,
    /// Signed amount. Debits are negative.
    pub amount: i64,
    /// Kind of the entity that caused this operation.
    pub originator_type: OriginatorType,
    /// Opaque id of that entity (user, content, or event id).
    pub originator_id: Uuid,
    /// Sub-type tag; present only in tagged partitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<OperationTag>,
    /// When this operation was recorded.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Op[{}] {:+} -> {} (by {} {})",
            self.id, self.amount, self.recipient_id, self.originator_type, self.originator_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_operation() -> Operation {
        Operation {
            id: OperationId::new(),
            recipient_id: SubjectId::new(),
            amount: -2,
            originator_type: OriginatorType::Event,
            originator_id: Uuid::now_v7(),
            tag: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn operation_display_shows_signed_amount() {
        let op = make_operation();
        let s = format!("{op}");
        assert!(s.contains("-2"));
        assert!(s.contains("event"));
    }

    #[test]
    fn operation_serde_roundtrip() {
        let op = Operation {
            tag: Some(OperationTag::Credit),
            ..make_operation()
        };
        let json = serde_json::to_string(&op).unwrap();
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }

    #[test]
    fn untagged_operation_serializes_without_tag_field() {
        let op = make_operation();
        let json = serde_json::to_string(&op).unwrap();
        assert!(!json.contains("\"tag\""));
    }

    #[test]
    fn raw_tag_preserves_original_key() {
        let tag = OperationTag::Raw("user:tabcoin".to_string());
        assert_eq!(tag.as_str(), "user:tabcoin");
    }

    #[test]
    fn content_tag_conversion() {
        assert_eq!(OperationTag::from(ContentTag::Credit), OperationTag::Credit);
        assert_eq!(OperationTag::from(ContentTag::Debit), OperationTag::Debit);
        assert_eq!(
            OperationTag::from(ContentTag::Initial),
            OperationTag::Initial
        );
    }
}
