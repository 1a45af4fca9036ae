//! The operation writer: exactly one append per call.
//!
//! `record_operation` opens and commits its own transaction;
//! `record_operation_in` stages into a caller-managed [`LedgerTransaction`]
//! so the write can participate in a larger atomic unit (a rating, a
//! cascading reversal, or a caller transaction that also touches other
//! state). With `with_balance` set, the recipient's aggregate is computed in
//! the same unit of work and reads the just-staged write.

use chrono::Utc;
use openledger_types::{
    AggregateBalance, BalanceKey, Operation, OperationId, OriginatorType, Result, SubjectId,
};
use tracing::debug;
use uuid::Uuid;

use crate::aggregate;
use crate::router::route;
use crate::store::{LedgerTransaction, OperationStore};

/// One requested ledger write.
#[derive(Debug, Clone)]
pub struct RecordRequest {
    /// Balance-type key; resolved to a partition by the router.
    pub key: BalanceKey,
    /// Subject whose balance the write moves.
    pub recipient_id: SubjectId,
    /// Signed amount.
    pub amount: i64,
    /// Kind of the causing entity.
    pub originator_type: OriginatorType,
    /// Opaque id of the causing entity.
    pub originator_id: Uuid,
}

/// Writer options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordOptions {
    /// Also compute the recipient's aggregate in the same unit of work.
    pub with_balance: bool,
}

/// A recorded operation, with the recipient's fresh aggregate if requested.
#[derive(Debug, Clone)]
pub struct RecordedOperation {
    pub operation: Operation,
    pub balance: Option<AggregateBalance>,
}

/// Append one operation in its own transaction.
pub fn record_operation(
    store: &mut OperationStore,
    request: &RecordRequest,
    options: RecordOptions,
) -> Result<RecordedOperation> {
    let mut txn = store.begin();
    let recorded = record_operation_in(&mut txn, request, options)?;
    txn.commit();
    Ok(recorded)
}

/// Stage one operation into an existing transaction.
pub fn record_operation_in(
    txn: &mut LedgerTransaction<'_>,
    request: &RecordRequest,
    options: RecordOptions,
) -> Result<RecordedOperation> {
    let routed = route(&request.key);
    let operation = Operation {
        id: OperationId::new(),
        recipient_id: request.recipient_id,
        amount: request.amount,
        originator_type: request.originator_type,
        originator_id: request.originator_id,
        tag: routed.tag,
        created_at: Utc::now(),
    };
    debug!(
        key = %request.key,
        partition = %routed.partition,
        op = %operation,
        "recording operation"
    );
    txn.stage(routed.partition, operation.clone());

    let balance = options.with_balance.then(|| {
        aggregate::aggregate_of(
            &*txn,
            routed.partition,
            routed.aggregate_fn,
            request.recipient_id,
        )
    });

    Ok(RecordedOperation { operation, balance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use openledger_types::{ContentTag, OperationTag, Partition};

    fn coin_request(recipient: SubjectId, amount: i64) -> RecordRequest {
        RecordRequest {
            key: BalanceKey::UserCoin,
            recipient_id: recipient,
            amount,
            originator_type: OriginatorType::System,
            originator_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn record_appends_exactly_one_operation() {
        let mut store = OperationStore::new();
        let user = SubjectId::new();
        let recorded =
            record_operation(&mut store, &coin_request(user, 5), RecordOptions::default()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(recorded.operation.amount, 5);
        assert!(recorded.operation.tag.is_none());
        assert!(recorded.balance.is_none());
    }

    #[test]
    fn with_balance_reads_own_write() {
        let mut store = OperationStore::new();
        let user = SubjectId::new();
        record_operation(&mut store, &coin_request(user, 5), RecordOptions::default()).unwrap();

        let recorded = record_operation(
            &mut store,
            &coin_request(user, -2),
            RecordOptions { with_balance: true },
        )
        .unwrap();
        assert_eq!(recorded.balance.unwrap().total, 3);
    }

    #[test]
    fn content_write_stores_tag_and_returns_breakdown() {
        let mut store = OperationStore::new();
        let content = SubjectId::new();
        let rater = SubjectId::new();
        let recorded = record_operation(
            &mut store,
            &RecordRequest {
                key: BalanceKey::ContentCoin(ContentTag::Credit),
                recipient_id: content,
                amount: 1,
                originator_type: OriginatorType::User,
                originator_id: rater.0,
            },
            RecordOptions { with_balance: true },
        )
        .unwrap();
        assert_eq!(recorded.operation.tag, Some(OperationTag::Credit));
        let balance = recorded.balance.unwrap();
        assert_eq!(balance.total, 1);
        assert_eq!(balance.credit, Some(1));
        assert_eq!(balance.debit, Some(0));
        assert_eq!(store.partition_ops(Partition::ContentCoin).len(), 1);
    }

    #[test]
    fn unknown_key_lands_in_content_partition_with_raw_tag() {
        let mut store = OperationStore::new();
        let recipient = SubjectId::new();
        let recorded = record_operation(
            &mut store,
            &RecordRequest {
                key: BalanceKey::parse("user:tabcoin"),
                recipient_id: recipient,
                amount: 3,
                originator_type: OriginatorType::System,
                originator_id: Uuid::now_v7(),
            },
            RecordOptions::default(),
        )
        .unwrap();
        assert_eq!(
            recorded.operation.tag,
            Some(OperationTag::Raw("user:tabcoin".to_string()))
        );
        assert_eq!(store.partition_ops(Partition::ContentCoin).len(), 1);
        assert!(store.partition_ops(Partition::UserCoin).is_empty());
    }

    #[test]
    fn staged_write_in_caller_transaction_is_atomic_with_it() {
        let mut store = OperationStore::new();
        let user = SubjectId::new();
        let mut txn = store.begin();
        record_operation_in(&mut txn, &coin_request(user, 5), RecordOptions::default()).unwrap();
        record_operation_in(&mut txn, &coin_request(user, -1), RecordOptions::default()).unwrap();
        drop(txn); // caller aborts
        assert!(store.is_empty());
    }
}
