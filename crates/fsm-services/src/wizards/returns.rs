//! Return wizard: unused material goes back to the warehouse

use fsm_core::config::StockConfig;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::Quantity;
use fsm_db::Database;

use super::{set_settle_qty, settle, settle_lines, SettleLine, Settlement, WizardOutcome};
use crate::result::ServiceResult;

pub struct ReturnMaterialWizard<'c> {
    config: &'c StockConfig,
    pub job_id: Id,
    pub lines: Vec<SettleLine>,
}

impl<'c> ReturnMaterialWizard<'c> {
    /// Every line with something to return, defaulting to all of it
    pub fn default_for(db: &Database, config: &'c StockConfig, job_id: Id) -> FsmResult<Self> {
        Ok(Self {
            config,
            job_id,
            lines: settle_lines(db, job_id)?,
        })
    }

    pub fn set_qty(&mut self, material_line_id: Id, qty: Quantity) -> bool {
        set_settle_qty(&mut self.lines, material_line_id, qty)
    }

    pub fn confirm(&self, db: &mut Database) -> ServiceResult<WizardOutcome> {
        settle(db, self.config, self.job_id, Settlement::Return, &self.lines).into()
    }
}
