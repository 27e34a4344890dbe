//! Journal book
//!
//! Append-only store of notes, kept alongside the records they describe so a
//! rolled back transaction rolls back its notes too.

use fsm_core::traits::Id;
use tracing::debug;

use crate::journal::{Journal, JournalType};

#[derive(Debug, Clone, Default)]
pub struct JournalBook {
    entries: Vec<Journal>,
    next_id: Id,
}

impl JournalBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note and return its id
    pub fn post(&mut self, mut journal: Journal) -> Id {
        self.next_id += 1;
        journal.id = self.next_id;
        debug!(
            journable_type = journal.journable_type.as_str(),
            journable_id = journal.journable_id,
            "journal posted"
        );
        self.entries.push(journal);
        self.next_id
    }

    /// Notes of one record, oldest first
    pub fn history(&self, journable_type: JournalType, journable_id: Id) -> Vec<&Journal> {
        self.entries
            .iter()
            .filter(|j| j.belongs_to(journable_type, journable_id))
            .collect()
    }

    pub fn latest(&self, journable_type: JournalType, journable_id: Id) -> Option<&Journal> {
        self.entries
            .iter()
            .rev()
            .find(|j| j.belongs_to(journable_type, journable_id))
    }

    /// Drop the notes of a deleted record
    pub fn delete_for(&mut self, journable_type: JournalType, journable_id: Id) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|j| !j.belongs_to(journable_type, journable_id));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
