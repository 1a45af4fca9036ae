//! Logical reversal of past operations.
//!
//! Undo never touches the original row: it appends a new operation with the
//! negated amount, under the same balance key and recipient, attributed to
//! the reversing event. Repeated calls append repeated inverses — the
//! ledger does not track which operations have already been undone, so
//! callers must.
//!
//! The `_in` variant exists for cascades: a moderation event is reversed by
//! looking up every operation it originated
//! ([`operations_by_originator`](crate::aggregate::operations_by_originator))
//! and undoing them all inside one caller-managed transaction.

use openledger_types::{EventId, Operation, OriginatorType, Result};

use crate::aggregate::OriginatedOperation;
use crate::store::{LedgerTransaction, OperationStore};
use crate::writer::{RecordOptions, RecordRequest, record_operation_in};

/// Append the inverse of `prior` in its own transaction.
pub fn undo_operation(
    store: &mut OperationStore,
    prior: &OriginatedOperation,
    reversing_event: EventId,
) -> Result<Operation> {
    let mut txn = store.begin();
    let inverse = undo_operation_in(&mut txn, prior, reversing_event)?;
    txn.commit();
    Ok(inverse)
}

/// Stage the inverse of `prior` into an existing transaction.
pub fn undo_operation_in(
    txn: &mut LedgerTransaction<'_>,
    prior: &OriginatedOperation,
    reversing_event: EventId,
) -> Result<Operation> {
    let request = RecordRequest {
        key: prior.balance_key.clone(),
        recipient_id: prior.operation.recipient_id,
        amount: -prior.operation.amount,
        originator_type: OriginatorType::Event,
        originator_id: reversing_event.0,
    };
    let recorded = record_operation_in(txn, &request, RecordOptions::default())?;
    Ok(recorded.operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{balance_of, operations_by_originator};
    use crate::writer::record_operation;
    use openledger_types::{BalanceKey, ContentTag, OperationTag, Partition, SubjectId};
    use uuid::Uuid;

    fn record(
        store: &mut OperationStore,
        key: BalanceKey,
        recipient: SubjectId,
        amount: i64,
    ) -> OriginatedOperation {
        let recorded = record_operation(
            store,
            &RecordRequest {
                key: key.clone(),
                recipient_id: recipient,
                amount,
                originator_type: OriginatorType::System,
                originator_id: Uuid::now_v7(),
            },
            RecordOptions::default(),
        )
        .unwrap();
        OriginatedOperation {
            balance_key: key,
            operation: recorded.operation,
        }
    }

    #[test]
    fn undo_appends_negated_inverse_without_touching_original() {
        let mut store = OperationStore::new();
        let user = SubjectId::new();
        let prior = record(&mut store, BalanceKey::UserCoin, user, 5);

        let event = EventId::new();
        let inverse = undo_operation(&mut store, &prior, event).unwrap();

        assert_eq!(inverse.amount, -5);
        assert_eq!(inverse.originator_type, OriginatorType::Event);
        assert_eq!(inverse.originator_id, event.0);
        assert_ne!(inverse.id, prior.operation.id);
        // Original row is still there, unchanged.
        let ops = store.partition_ops(Partition::UserCoin);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], prior.operation);
        assert_eq!(balance_of(&store, Partition::UserCoin, user), 0);
    }

    #[test]
    fn undo_is_a_pure_inverse_delta_not_a_rollback() {
        let mut store = OperationStore::new();
        let user = SubjectId::new();
        let prior = record(&mut store, BalanceKey::UserCoin, user, 5);
        // An unrelated write lands between the operation and its undo.
        record(&mut store, BalanceKey::UserCoin, user, 3);

        undo_operation(&mut store, &prior, EventId::new()).unwrap();
        assert_eq!(balance_of(&store, Partition::UserCoin, user), 3);
    }

    #[test]
    fn undo_of_content_operation_keeps_key_and_tag() {
        let mut store = OperationStore::new();
        let content = SubjectId::new();
        let prior = record(
            &mut store,
            BalanceKey::ContentCoin(ContentTag::Credit),
            content,
            1,
        );

        let inverse = undo_operation(&mut store, &prior, EventId::new()).unwrap();
        assert_eq!(inverse.amount, -1);
        assert_eq!(inverse.tag, Some(OperationTag::Credit));
        assert_eq!(store.partition_ops(Partition::ContentCoin).len(), 2);
    }

    #[test]
    fn undo_is_not_idempotent() {
        let mut store = OperationStore::new();
        let user = SubjectId::new();
        let prior = record(&mut store, BalanceKey::UserCoin, user, 4);

        undo_operation(&mut store, &prior, EventId::new()).unwrap();
        undo_operation(&mut store, &prior, EventId::new()).unwrap();
        assert_eq!(balance_of(&store, Partition::UserCoin, user), -4);
    }

    #[test]
    fn cascading_undo_in_one_transaction() {
        let mut store = OperationStore::new();
        let (a, b) = (SubjectId::new(), SubjectId::new());
        let p1 = record(&mut store, BalanceKey::UserCoin, a, 5);
        let p2 = record(&mut store, BalanceKey::UserCash, b, 2);

        let reversing = EventId::new();
        let mut txn = store.begin();
        undo_operation_in(&mut txn, &p1, reversing).unwrap();
        undo_operation_in(&mut txn, &p2, reversing).unwrap();
        txn.commit();

        assert_eq!(balance_of(&store, Partition::UserCoin, a), 0);
        assert_eq!(balance_of(&store, Partition::UserCash, b), 0);
        // Both inverses trace back to the reversing event.
        assert_eq!(operations_by_originator(&store, &[reversing.0]).len(), 2);
    }
}
