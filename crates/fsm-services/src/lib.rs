//! # fsm-services
//!
//! Material workflows for ESFSM Stock.
//!
//! Services follow the set attributes → validate → persist shape of
//! [`base`]; wizards stage a batch and confirm it in one transaction.
//!
//! # Example
//! ```ignore
//! let config = StockConfig::from_env()?;
//! let mut wizard = TakeMaterialWizard::default_for(&db, &config, job_id)?;
//! wizard.set_qty(line_id, dec!(5));
//! let result = wizard.confirm(&mut db);
//! ```

pub mod base;
pub mod result;
pub mod locations;
pub mod vehicles;
pub mod materials;
pub mod picking;
pub mod jobs;
pub mod wizards;

#[cfg(test)]
pub(crate) mod testing;

pub use base::{CreateService, UpdateService, WriteContext, WriteService};
pub use jobs::{JobMaterialSummary, JobService};
pub use locations::LocationResolver;
pub use materials::{CreateMaterialService, MaterialParams, TakeMaterialService, UpdateMaterialService};
pub use picking::{PickingService, TransferLine};
pub use result::ServiceResult;
pub use vehicles::{CreateVehicleService, UpdateVehicleService, VehicleParams};
pub use wizards::{
    AddMaterialWizard, ConsumeMaterialWizard, ReturnMaterialWizard, TakeMaterialWizard,
    WizardOutcome,
};
