//! # openledger-core
//!
//! The OpenLedger engine: routing, storage, aggregation, and the two
//! transaction engines (rating and reversal).
//!
//! ## Architecture
//!
//! 1. **Router**: pure dispatch from a [`BalanceKey`](openledger_types::BalanceKey)
//!    to its partition, aggregation function, and stored tag
//! 2. **OperationStore**: append-only operation history per partition, with
//!    staged [`LedgerTransaction`]s that commit or discard as one unit
//! 3. **Writer**: appends exactly one operation, optionally returning the
//!    recipient's fresh aggregate in the same unit of work
//! 4. **Aggregate calculator**: live balance sums and cross-partition
//!    provenance queries — never cached
//! 5. **RatingEngine**: the fixed-shape four-write atomic rating transaction
//! 6. **Reversal**: appends the negated inverse of a prior operation
//!
//! ## Write Flow
//!
//! ```text
//! caller → RatingEngine / undo_operation / record_operation
//!        → route() → LedgerTransaction.stage() → commit-or-discard
//!        → OperationStore ← aggregate reads
//! ```
//!
//! Balances are derived purely from history; no running counter exists
//! anywhere in the engine.

pub mod aggregate;
pub mod rating;
pub mod reversal;
pub mod router;
pub mod store;
pub mod writer;

pub use aggregate::{
    OriginatedOperation, balance_of, balance_of_many, content_aggregate, operations_by_originator,
};
pub use rating::{RateRequest, RatingEngine, RatingPolicy, TransactionType};
pub use reversal::{undo_operation, undo_operation_in};
pub use router::{Route, route};
pub use store::{LedgerTransaction, LedgerView, OperationStore};
pub use writer::{
    RecordOptions, RecordRequest, RecordedOperation, record_operation, record_operation_in,
};
