//! Add wizard: material not planned up front, issued on the spot

use fsm_contracts::BatchOperation;
use fsm_core::config::StockConfig;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::{OperationKind, Quantity};
use fsm_db::Database;
use fsm_models::NewMaterialLine;
use serde::Serialize;
use tracing::info;

use super::{check_batch, WizardOutcome};
use crate::base::WriteContext;
use crate::materials::{CreateMaterialService, MaterialParams, UpdateMaterialService};
use crate::picking::{PickingService, TransferLine};
use crate::result::ServiceResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddMaterialLine {
    pub product_id: Id,
    pub product_uom_id: Id,
    pub qty: Quantity,
    pub lot_id: Option<Id>,
}

pub struct AddMaterialWizard<'c> {
    config: &'c StockConfig,
    pub job_id: Id,
    pub lines: Vec<AddMaterialLine>,
}

impl<'c> AddMaterialWizard<'c> {
    pub fn new(db: &Database, config: &'c StockConfig, job_id: Id) -> FsmResult<Self> {
        db.jobs.find(job_id)?;
        Ok(Self {
            config,
            job_id,
            lines: Vec::new(),
        })
    }

    /// Stage a product in its own unit of measure with the default quantity
    pub fn add_line(&mut self, db: &Database, product_id: Id) -> FsmResult<&mut AddMaterialLine> {
        let product = db.products.find(product_id)?;
        self.lines.push(AddMaterialLine {
            product_id,
            product_uom_id: product.uom_id,
            qty: self.config.default_add_qty,
            lot_id: None,
        });
        let index = self.lines.len() - 1;
        Ok(&mut self.lines[index])
    }

    /// Issue the staged products; existing lines get more taken, other
    /// products get a new line planned and taken at the staged quantity
    pub fn confirm(&self, db: &mut Database) -> ServiceResult<WizardOutcome> {
        self.execute(db).into()
    }

    fn execute(&self, db: &mut Database) -> FsmResult<WizardOutcome> {
        let staged: Vec<(Id, Quantity, Option<Quantity>)> = self
            .lines
            .iter()
            .map(|l| (l.product_id, l.qty, None))
            .collect();
        check_batch(db, BatchOperation::Add, &staged)?;

        db.transaction(|db| {
            let transfers: Vec<TransferLine> = self
                .lines
                .iter()
                .map(|l| TransferLine::new(l.product_id, l.product_uom_id, l.qty).with_lot(l.lot_id))
                .collect();
            let picking = PickingService::new(self.config).create_picking(
                db,
                self.job_id,
                OperationKind::Issue,
                &transfers,
            )?;

            for line in &self.lines {
                let existing = db
                    .job_materials(self.job_id)
                    .into_iter()
                    .find(|m| m.product_id == line.product_id)
                    .map(|m| (m.id, m.taken_qty));
                match existing {
                    Some((material_id, taken)) => {
                        UpdateMaterialService::new(WriteContext::from_wizard()).call(
                            db,
                            material_id,
                            &MaterialParams::new().taken(taken + line.qty),
                        )?;
                    }
                    None => {
                        let mut params = NewMaterialLine::new(self.job_id, line.product_id)
                            .with_uom(line.product_uom_id)
                            .planned(line.qty)
                            .taken(line.qty);
                        params.lot_id = line.lot_id;
                        CreateMaterialService::new().call(db, &params)?;
                    }
                }
            }

            let outcome = WizardOutcome::new(db, self.job_id, &picking);
            info!(
                job_id = self.job_id,
                picking = %outcome.picking_name,
                lines = outcome.lines,
                "add wizard confirmed"
            );
            Ok(outcome)
        })
    }
}
