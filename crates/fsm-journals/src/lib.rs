//! # fsm-journals
//!
//! Audit notes for ESFSM Stock.
//!
//! Every material movement leaves a human-readable note on the job it
//! belongs to, next to the structured details of what moved.

pub mod journal;
pub mod journal_service;

pub use journal::{Journal, JournalType};
pub use journal_service::JournalBook;
