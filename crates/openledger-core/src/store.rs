//! Append-only operation storage and staged transactions.
//!
//! The [`OperationStore`] is the source of truth: one append-only history
//! per partition, nothing else. No running balance is kept anywhere —
//! readers derive balances by summing, so they always observe a value
//! consistent with some committed prefix of history.
//!
//! A [`LedgerTransaction`] is the staged-transaction value used by the
//! engines: writes accumulate in the transaction, reads overlay staged
//! writes onto committed state, and the whole group either commits or is
//! discarded. Staged writes are invisible to every other reader until
//! `commit`. All mutation goes through `&mut OperationStore`, which is what
//! serializes conflicting writers within a process; multi-writer
//! deployments put the store behind their own lock.

use openledger_types::{Operation, Partition};
use tracing::debug;

/// Read access over a ledger: the committed store, or a transaction that
/// also sees its own staged writes.
pub trait LedgerView {
    /// Operations of one partition, oldest first. For transactions this
    /// includes staged-but-uncommitted writes.
    fn operations(&self, partition: Partition) -> impl Iterator<Item = &Operation>;
}

/// Append-only operation history, one vector per partition.
#[derive(Debug, Default)]
pub struct OperationStore {
    user_coin: Vec<Operation>,
    user_cash: Vec<Operation>,
    content_coin: Vec<Operation>,
    ad_budget_cash: Vec<Operation>,
}

impl OperationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a staged transaction over this store.
    pub fn begin(&mut self) -> LedgerTransaction<'_> {
        LedgerTransaction {
            store: self,
            staged: Vec::new(),
        }
    }

    /// Committed operations of one partition, oldest first.
    #[must_use]
    pub fn partition_ops(&self, partition: Partition) -> &[Operation] {
        match partition {
            Partition::UserCoin => &self.user_coin,
            Partition::UserCash => &self.user_cash,
            Partition::ContentCoin => &self.content_coin,
            Partition::AdBudgetCash => &self.ad_budget_cash,
        }
    }

    /// Total number of committed operations across all partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        Partition::ALL
            .iter()
            .map(|p| self.partition_ops(*p).len())
            .sum()
    }

    /// Whether no operation has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn partition_ops_mut(&mut self, partition: Partition) -> &mut Vec<Operation> {
        match partition {
            Partition::UserCoin => &mut self.user_coin,
            Partition::UserCash => &mut self.user_cash,
            Partition::ContentCoin => &mut self.content_coin,
            Partition::AdBudgetCash => &mut self.ad_budget_cash,
        }
    }
}

impl LedgerView for OperationStore {
    fn operations(&self, partition: Partition) -> impl Iterator<Item = &Operation> {
        self.partition_ops(partition).iter()
    }
}

/// A staged, all-or-nothing group of operation writes.
///
/// `Staged → Committed` via [`commit`](Self::commit);
/// `Staged → Discarded` by dropping the value (or [`discard`](Self::discard)
/// to make the abort path explicit at the call site). No partially-applied
/// state is ever observable from the store.
#[derive(Debug)]
pub struct LedgerTransaction<'a> {
    store: &'a mut OperationStore,
    staged: Vec<(Partition, Operation)>,
}

impl LedgerTransaction<'_> {
    /// Stage one operation for the given partition.
    pub fn stage(&mut self, partition: Partition, operation: Operation) {
        debug!(%partition, op = %operation, "staged operation");
        self.staged.push((partition, operation));
    }

    /// Number of writes staged so far.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Append every staged write to the store, in staging order.
    pub fn commit(self) {
        debug!(count = self.staged.len(), "committing transaction");
        for (partition, operation) in self.staged {
            self.store.partition_ops_mut(partition).push(operation);
        }
    }

    /// Drop all staged writes without touching the store.
    pub fn discard(self) {
        debug!(count = self.staged.len(), "discarding transaction");
        // Dropping `self` is the whole job.
    }
}

impl LedgerView for LedgerTransaction<'_> {
    fn operations(&self, partition: Partition) -> impl Iterator<Item = &Operation> {
        self.store.partition_ops(partition).iter().chain(
            self.staged
                .iter()
                .filter(move |(p, _)| *p == partition)
                .map(|(_, op)| op),
        )
    }
}
