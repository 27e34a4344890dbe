//! Job services
//!
//! Material aggregates, stage transitions with the completion gate, cascade
//! delete and taking every planned material at once.

use fsm_contracts::{Contract, JobCompletionContract, NamedLine};
use fsm_core::config::StockConfig;
use fsm_core::error::FsmError;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::{Amount, OperationKind, Quantity};
use fsm_db::Database;
use fsm_journals::{Journal, JournalType};
use fsm_models::{Job, JobStage, Picking};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::base::WriteContext;
use crate::materials::{product_name, MaterialParams, UpdateMaterialService};
use crate::picking::{PickingService, TransferLine};

/// Material figures shown on a job
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobMaterialSummary {
    pub material_count: usize,
    /// Sum of line subtotals (used × unit price)
    pub material_total: Amount,
    pub has_materials_to_take: bool,
    pub has_materials_to_consume: bool,
    pub has_materials_to_return: bool,
    /// Quantity still out with the technician, over all lines
    pub outstanding_return_qty: Quantity,
}

pub struct JobService<'c> {
    config: &'c StockConfig,
}

impl<'c> JobService<'c> {
    pub fn new(config: &'c StockConfig) -> Self {
        Self { config }
    }

    pub fn summary(&self, db: &Database, job_id: Id) -> FsmResult<JobMaterialSummary> {
        db.jobs.find(job_id)?;
        let lines = db.job_materials(job_id);
        let outstanding = lines
            .iter()
            .any(|l| l.available_to_return_qty() > Decimal::ZERO);

        Ok(JobMaterialSummary {
            material_count: lines.len(),
            material_total: lines.iter().map(|l| l.price_subtotal()).sum(),
            has_materials_to_take: lines.iter().any(|l| l.planned_qty > l.taken_qty),
            has_materials_to_consume: outstanding,
            has_materials_to_return: outstanding,
            outstanding_return_qty: lines
                .iter()
                .map(|l| l.available_to_return_qty())
                .filter(|qty| *qty > Decimal::ZERO)
                .sum(),
        })
    }

    pub fn start(&self, db: &mut Database, job_id: Id) -> FsmResult<Job> {
        let job = db.jobs.find_mut(job_id)?;
        if job.stage != JobStage::Draft {
            return Err(FsmError::validation(format!(
                "Job {} cannot be started from stage {}.",
                job.name,
                job.stage.as_str()
            )));
        }
        job.stage = JobStage::InProgress;
        Ok(job.clone())
    }

    /// Mark the job done once no material is left to return or consume
    pub fn complete(&self, db: &mut Database, job_id: Id) -> FsmResult<Job> {
        let job = db.jobs.find(job_id)?.clone();
        let lines = db.job_materials(job_id);
        let named: Vec<NamedLine<'_>> = lines
            .iter()
            .map(|line| NamedLine::new(product_name(db, line.product_id), line))
            .collect();
        JobCompletionContract::new(&job).validate(&named[..])?;

        let stored = db.jobs.find_mut(job_id)?;
        stored.stage = JobStage::Done;
        let job = stored.clone();
        db.journals
            .post(Journal::new(JournalType::Job, job_id, format!("Работниот налог {} е завршен", job.name)));
        info!(job = %job.name, "job completed");
        Ok(job)
    }

    pub fn cancel(&self, db: &mut Database, job_id: Id) -> FsmResult<Job> {
        let job = db.jobs.find_mut(job_id)?;
        if job.stage == JobStage::Done {
            return Err(FsmError::validation(format!(
                "Job {} is done and cannot be cancelled.",
                job.name
            )));
        }
        job.stage = JobStage::Cancelled;
        Ok(job.clone())
    }

    /// Delete the job with its material lines and notes; transfers stay but
    /// lose the job link
    pub fn delete(&self, db: &mut Database, job_id: Id) -> FsmResult<Job> {
        db.transaction(|db| {
            let job = db.jobs.delete(job_id)?;

            let line_ids: Vec<Id> = db.job_materials(job_id).iter().map(|l| l.id).collect();
            for line_id in &line_ids {
                db.journals.delete_for(JournalType::MaterialLine, *line_id);
            }
            let removed = db.materials.delete_where(|l| l.job_id == job_id);
            db.journals.delete_for(JournalType::Job, job_id);

            let picking_ids: Vec<Id> = db.job_pickings(job_id).iter().map(|p| p.id).collect();
            for picking_id in picking_ids {
                db.pickings.find_mut(picking_id)?.job_id = None;
            }

            info!(job = %job.name, lines = removed, "job deleted");
            Ok(job)
        })
    }

    /// Issue everything still to take in one transfer; `None` when nothing is
    pub fn take_all_materials(&self, db: &mut Database, job_id: Id) -> FsmResult<Option<Picking>> {
        db.jobs.find(job_id)?;
        let pending: Vec<(Id, Quantity, TransferLine)> = db
            .job_materials(job_id)
            .into_iter()
            .filter(|l| l.planned_qty > l.taken_qty)
            .map(|l| {
                let transfer = TransferLine::new(l.product_id, l.product_uom_id, l.remaining_to_take())
                    .with_lot(l.lot_id);
                (l.id, l.planned_qty, transfer)
            })
            .collect();
        if pending.is_empty() {
            return Ok(None);
        }

        db.transaction(|db| {
            let transfers: Vec<TransferLine> = pending.iter().map(|(_, _, t)| *t).collect();
            let picking = PickingService::new(self.config).create_picking(
                db,
                job_id,
                OperationKind::Issue,
                &transfers,
            )?;
            let lines = UpdateMaterialService::new(WriteContext::from_wizard());
            for (line_id, planned, _) in &pending {
                lines.call(db, *line_id, &MaterialParams::new().taken(*planned))?;
            }
            Ok(Some(picking))
        })
    }
}
