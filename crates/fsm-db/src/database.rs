//! The record store
//!
//! Single-threaded by construction: every operation takes `&mut Database`.
//! [`Database::transaction`] gives the all-or-nothing behavior of one
//! request: on error every table, note and sequence is restored.

use std::collections::BTreeMap;

use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_journals::JournalBook;
use fsm_models::{
    Company, Employee, Job, Lot, MaterialLine, Partner, Picking, PickingType, Product, Quant,
    StockLocation, Team, Uom, Vehicle, Warehouse,
};
use tracing::debug;

use crate::table::Table;

/// Fixed locations provided as data fixtures; any of them may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceLocations {
    /// Main stock location
    pub stock: Option<Id>,
    /// Customer / consumption location
    pub customers: Option<Id>,
    /// Parent of every vehicle location
    pub vehicles: Option<Id>,
    /// Pool for technicians without a vehicle
    pub field_technicians: Option<Id>,
}

#[derive(Debug, Clone, Default)]
pub struct Database {
    pub companies: Table<Company>,
    pub partners: Table<Partner>,
    pub uoms: Table<Uom>,
    pub products: Table<Product>,
    pub lots: Table<Lot>,
    pub locations: Table<StockLocation>,
    pub warehouses: Table<Warehouse>,
    pub quants: Table<Quant>,
    pub vehicles: Table<Vehicle>,
    pub teams: Table<Team>,
    pub employees: Table<Employee>,
    pub jobs: Table<Job>,
    pub materials: Table<MaterialLine>,
    pub picking_types: Table<PickingType>,
    pub pickings: Table<Picking>,
    pub journals: JournalBook,
    pub references: ReferenceLocations,
    picking_sequences: BTreeMap<String, u32>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` atomically: if it fails, the store is left exactly as before
    pub fn transaction<T, F>(&mut self, f: F) -> FsmResult<T>
    where
        F: FnOnce(&mut Database) -> FsmResult<T>,
    {
        let snapshot = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!(error = %err, "transaction rolled back");
                *self = snapshot;
                Err(err)
            }
        }
    }

    /// Next document name for a picking type, e.g. "WH/REV/00003"
    pub fn next_picking_name(&mut self, picking_type: Option<&PickingType>) -> String {
        let prefix = picking_type
            .map(|t| t.sequence_prefix.clone())
            .unwrap_or_else(|| "WH/TR".to_string());
        let counter = self.picking_sequences.entry(prefix.clone()).or_insert(0);
        *counter += 1;
        format!("{}/{:05}", prefix, counter)
    }

    /// Material lines of a job in display order `(sequence, id)`
    pub fn job_materials(&self, job_id: Id) -> Vec<&MaterialLine> {
        let mut lines = self.materials.search(|m| m.job_id == job_id);
        lines.sort_by_key(|m| m.order_key());
        lines
    }

    /// Transfers created for a job, oldest first
    pub fn job_pickings(&self, job_id: Id) -> Vec<&Picking> {
        self.pickings.search(|p| p.job_id == Some(job_id))
    }
}
