//! Vehicle services
//!
//! Every vehicle gets its own internal stock location under the vehicles
//! pool, named after its plate (or its name when it has no plate). The
//! location follows later renames.

use fsm_contracts::ChangeTracker;
use fsm_core::config::StockConfig;
use fsm_core::error::ValidationErrors;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_db::Database;
use fsm_journals::{Journal, JournalType};
use fsm_models::{StockLocation, Vehicle};
use tracing::info;

use crate::base::{CreateService, UpdateService, WriteService};

/// Vehicle service params; `None` leaves the attribute untouched
#[derive(Debug, Clone, Default)]
pub struct VehicleParams {
    pub name: Option<String>,
    /// A blank plate clears it
    pub license_plate: Option<String>,
    pub company_id: Option<Id>,
}

impl VehicleParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_license_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = Some(plate.into());
        self
    }

    pub fn with_company(mut self, company_id: Id) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

fn apply_params(vehicle: &mut Vehicle, params: &VehicleParams) -> ChangeTracker {
    let mut changes = ChangeTracker::new();
    if let Some(name) = &params.name {
        if vehicle.name != *name {
            vehicle.name = name.clone();
            changes.mark_changed("name");
        }
    }
    if let Some(plate) = &params.license_plate {
        let plate = Some(plate.trim().to_string()).filter(|p| !p.is_empty());
        if vehicle.license_plate != plate {
            vehicle.license_plate = plate;
            changes.mark_changed("license_plate");
        }
    }
    if let Some(company_id) = params.company_id {
        if vehicle.company_id != Some(company_id) {
            vehicle.company_id = Some(company_id);
            changes.mark_changed("company_id");
        }
    }
    changes
}

fn validate_vehicle(vehicle: &Vehicle) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if vehicle.name.trim().is_empty() {
        errors.add("name", "can't be blank");
    }
    errors.into_result()
}

/// Service for registering vehicles
pub struct CreateVehicleService<'c> {
    config: &'c StockConfig,
}

impl<'c> CreateVehicleService<'c> {
    pub fn new(config: &'c StockConfig) -> Self {
        Self { config }
    }

    pub fn call(&self, db: &mut Database, params: &VehicleParams) -> FsmResult<Vehicle> {
        self.execute(db, params)
    }

    /// Parent of vehicle locations: the vehicles pool, else an internal
    /// location named like the reference stock
    fn parent_location(&self, db: &Database) -> Option<Id> {
        db.references.vehicles.or_else(|| {
            db.locations
                .first(|l| l.is_internal() && l.name == self.config.stock_location_name)
                .map(|l| l.id)
        })
    }
}

impl WriteService<Vehicle> for CreateVehicleService<'_> {
    type Params = VehicleParams;

    fn set_attributes(
        &self,
        _db: &Database,
        entity: &mut Vehicle,
        params: &VehicleParams,
    ) -> FsmResult<ChangeTracker> {
        Ok(apply_params(entity, params))
    }

    fn validate(&self, _db: &Database, entity: &Vehicle) -> Result<(), ValidationErrors> {
        validate_vehicle(entity)
    }

    fn persist(
        &self,
        db: &mut Database,
        entity: &mut Vehicle,
        _changes: &ChangeTracker,
    ) -> FsmResult<()> {
        let location = StockLocation::internal(
            self.config
                .vehicle_location_name(entity.location_identifier()),
        )
        .with_parent(self.parent_location(db))
        .with_company(entity.company_id);
        let location_id = db.locations.insert(location);

        entity.stock_location_id = Some(location_id);
        entity.id = db.vehicles.insert(entity.clone());

        info!(vehicle = %entity.name, location_id, "vehicle stock location provisioned");
        Ok(())
    }
}

impl CreateService<Vehicle> for CreateVehicleService<'_> {
    fn new_instance(&self, _db: &Database, _params: &VehicleParams) -> FsmResult<Vehicle> {
        Ok(Vehicle::new("", None))
    }
}

/// Service for editing vehicles; keeps the location name in step
pub struct UpdateVehicleService<'c> {
    config: &'c StockConfig,
}

impl<'c> UpdateVehicleService<'c> {
    pub fn new(config: &'c StockConfig) -> Self {
        Self { config }
    }

    pub fn call(&self, db: &mut Database, vehicle_id: Id, params: &VehicleParams) -> FsmResult<Vehicle> {
        self.execute(db, vehicle_id, params)
    }
}

impl WriteService<Vehicle> for UpdateVehicleService<'_> {
    type Params = VehicleParams;

    fn set_attributes(
        &self,
        _db: &Database,
        entity: &mut Vehicle,
        params: &VehicleParams,
    ) -> FsmResult<ChangeTracker> {
        Ok(apply_params(entity, params))
    }

    fn validate(&self, _db: &Database, entity: &Vehicle) -> Result<(), ValidationErrors> {
        validate_vehicle(entity)
    }

    fn persist(
        &self,
        db: &mut Database,
        entity: &mut Vehicle,
        changes: &ChangeTracker,
    ) -> FsmResult<()> {
        db.vehicles.update(entity.clone())?;

        let renamed = !changes.changed_among(&["name", "license_plate"]).is_empty();
        if let (true, Some(location_id)) = (renamed, entity.stock_location_id) {
            let new_name = self
                .config
                .vehicle_location_name(entity.location_identifier());
            let location = db.locations.find_mut(location_id)?;
            let old_name = std::mem::replace(&mut location.name, new_name.clone());
            db.journals.post(Journal::new(
                JournalType::Vehicle,
                entity.id,
                format!("Локацијата е преименувана од {} во {}", old_name, new_name),
            ));
            info!(vehicle = %entity.name, location_id, "vehicle stock location renamed");
        }
        Ok(())
    }
}

impl UpdateService<Vehicle> for UpdateVehicleService<'_> {
    fn load(&self, db: &Database, id: Id) -> FsmResult<Vehicle> {
        db.vehicles.find(id).cloned()
    }
}
