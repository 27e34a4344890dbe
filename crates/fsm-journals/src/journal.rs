//! Journal model

use chrono::{DateTime, Utc};
use fsm_core::traits::Id;
use serde::{Deserialize, Serialize};

/// Journal type (what kind of record this journal belongs to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    Job,
    MaterialLine,
    Picking,
    Vehicle,
}

impl JournalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Job => "esfsm.job",
            Self::MaterialLine => "esfsm.job.material",
            Self::Picking => "stock.picking",
            Self::Vehicle => "fleet.vehicle",
        }
    }
}

/// A note posted on a record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub id: Id,
    pub journable_type: JournalType,
    pub journable_id: Id,
    /// Human-readable message body
    pub body: String,
    /// Structured payload (moved lines, picking reference, ...)
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Journal {
    pub fn new(journable_type: JournalType, journable_id: Id, body: impl Into<String>) -> Self {
        Self {
            id: 0,
            journable_type,
            journable_id,
            body: body.into(),
            details: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn belongs_to(&self, journable_type: JournalType, journable_id: Id) -> bool {
        self.journable_type == journable_type && self.journable_id == journable_id
    }
}
