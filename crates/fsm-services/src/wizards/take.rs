//! Take wizard: planned material leaves the warehouse for the technician

use fsm_contracts::BatchOperation;
use fsm_core::config::StockConfig;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::{OperationKind, Quantity};
use fsm_db::Database;
use fsm_models::MaterialLine;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::{check_batch, WizardOutcome};
use crate::base::WriteContext;
use crate::locations::LocationResolver;
use crate::materials::{MaterialParams, UpdateMaterialService};
use crate::picking::{PickingService, TransferLine};
use crate::result::ServiceResult;

/// Stock situation of a line at the warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Ok,
    Partial,
    NoStock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeMaterialLine {
    pub material_line_id: Id,
    pub product_id: Id,
    pub product_uom_id: Id,
    pub lot_id: Option<Id>,
    pub planned_qty: Quantity,
    pub already_taken_qty: Quantity,
    pub qty_to_take: Quantity,
    /// On hand at the warehouse stock location, in the line's lot when it
    /// has one
    pub available_qty: Quantity,
    pub status: StockStatus,
    /// Editable; suggested as min(to take, available)
    pub take_qty: Quantity,
}

impl TakeMaterialLine {
    fn new(line: &MaterialLine, available: Quantity) -> Self {
        let to_take = line.remaining_to_take();
        let (status, suggested) = if available <= Decimal::ZERO {
            (StockStatus::NoStock, Decimal::ZERO)
        } else if available < to_take {
            (StockStatus::Partial, available)
        } else {
            (StockStatus::Ok, to_take)
        };
        Self {
            material_line_id: line.id,
            product_id: line.product_id,
            product_uom_id: line.product_uom_id,
            lot_id: line.lot_id,
            planned_qty: line.planned_qty,
            already_taken_qty: line.taken_qty,
            qty_to_take: to_take,
            available_qty: available.max(Decimal::ZERO),
            status,
            take_qty: suggested,
        }
    }
}

pub struct TakeMaterialWizard<'c> {
    config: &'c StockConfig,
    pub job_id: Id,
    /// Warehouse stock the material is taken from
    pub source_location_id: Option<Id>,
    /// Where the job keeps its material
    pub dest_location_id: Option<Id>,
    pub lines: Vec<TakeMaterialLine>,
}

impl<'c> TakeMaterialWizard<'c> {
    /// Every line with `planned > taken`, sized to what the warehouse holds
    pub fn default_for(db: &Database, config: &'c StockConfig, job_id: Id) -> FsmResult<Self> {
        let job = db.jobs.find(job_id)?;
        let resolver = LocationResolver::new(db);
        let source = resolver.warehouse_stock(job.company_id);

        let lines = db
            .job_materials(job_id)
            .into_iter()
            .filter(|l| l.planned_qty > l.taken_qty)
            .map(|l| {
                let available = source
                    .map(|location| db.on_hand(l.product_id, location, l.lot_id))
                    .unwrap_or(Decimal::ZERO);
                TakeMaterialLine::new(l, available)
            })
            .collect();

        Ok(Self {
            config,
            job_id,
            source_location_id: source,
            dest_location_id: resolver.job_location(job),
            lines,
        })
    }

    pub fn set_qty(&mut self, material_line_id: Id, qty: Quantity) -> bool {
        match self.lines.iter_mut().find(|l| l.material_line_id == material_line_id) {
            Some(line) => {
                line.take_qty = qty;
                true
            }
            None => false,
        }
    }

    /// Issue the staged quantities and raise the taken quantities
    pub fn confirm(&self, db: &mut Database) -> ServiceResult<WizardOutcome> {
        self.execute(db).into()
    }

    fn execute(&self, db: &mut Database) -> FsmResult<WizardOutcome> {
        let staged: Vec<(Id, Quantity, Option<Quantity>)> = self
            .lines
            .iter()
            .map(|l| (l.product_id, l.take_qty, Some(l.available_qty)))
            .collect();
        check_batch(db, BatchOperation::Take, &staged)?;

        let moving: Vec<&TakeMaterialLine> = self
            .lines
            .iter()
            .filter(|l| l.take_qty > Decimal::ZERO)
            .collect();

        db.transaction(|db| {
            let transfers: Vec<TransferLine> = moving
                .iter()
                .map(|l| {
                    TransferLine::new(l.product_id, l.product_uom_id, l.take_qty).with_lot(l.lot_id)
                })
                .collect();
            let picking = PickingService::new(self.config).create_picking(
                db,
                self.job_id,
                OperationKind::Issue,
                &transfers,
            )?;

            let service = UpdateMaterialService::new(WriteContext::from_wizard());
            for staged in &moving {
                let taken = db.materials.find(staged.material_line_id)?.taken_qty;
                service.call(
                    db,
                    staged.material_line_id,
                    &MaterialParams::new().taken(taken + staged.take_qty),
                )?;
            }

            let outcome = WizardOutcome::new(db, self.job_id, &picking);
            info!(
                job_id = self.job_id,
                picking = %outcome.picking_name,
                lines = outcome.lines,
                "take wizard confirmed"
            );
            Ok(outcome)
        })
    }
}
