//! # fsm-contracts
//!
//! Constraint rules for ESFSM Stock.
//!
//! Contracts validate material lines, wizard batches and job completion
//! before a service is allowed to commit anything.

pub mod base;
pub mod materials;
pub mod batch;
pub mod completion;

pub use base::*;
pub use batch::{BatchContract, BatchLine, BatchOperation};
pub use completion::JobCompletionContract;
pub use materials::{MaterialQuantityContract, QUANTITY_FIELDS, TRACKED_QUANTITY_FIELDS};
