//! # openledger-types
//!
//! Shared types, errors, and constants for the **OpenLedger** point ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OperationId`], [`SubjectId`], [`EventId`]
//! - **Operation model**: [`Operation`], [`OriginatorType`], [`OperationTag`]
//! - **Balance model**: [`BalanceKey`], [`ContentTag`], [`Partition`],
//!   [`AggregateFn`], [`AggregateBalance`]
//! - **Errors**: [`LedgerError`] with `OL_ERR_` prefix codes
//! - **Constants**: rating economics and system defaults

pub mod balance;
pub mod constants;
pub mod error;
pub mod ids;
pub mod operation;

// Re-export all primary types at crate root for ergonomic imports:
//   use openledger_types::{Operation, BalanceKey, Partition, ...};

pub use balance::*;
pub use error::*;
pub use ids::*;
pub use operation::*;

// Constants are accessed via `openledger_types::constants::FOO`
// (not re-exported to avoid name collisions).
