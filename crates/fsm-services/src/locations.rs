//! Stock location resolution
//!
//! A job keeps its material at one location, chosen by priority:
//!
//! 1. the location of the team's vehicle
//! 2. the location of the first assigned employee's vehicle
//! 3. the field technicians pool, when the job has assigned employees
//! 4. the stock location of the company's warehouse
//! 5. the reference stock location, then any internal location
//!
//! Resolution never fails; it yields `None` only on an empty store.

use fsm_core::traits::Id;
use fsm_db::Database;
use fsm_models::Job;
use tracing::debug;

pub struct LocationResolver<'a> {
    db: &'a Database,
}

impl<'a> LocationResolver<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Location of the vehicle, if it has been provisioned one
    pub fn vehicle_location(&self, vehicle_id: Option<Id>) -> Option<Id> {
        vehicle_id
            .and_then(|id| self.db.vehicles.find_optional(id))
            .and_then(|vehicle| vehicle.stock_location_id)
    }

    pub fn team_location(&self, team_id: Id) -> Option<Id> {
        let team = self.db.teams.find_optional(team_id)?;
        self.vehicle_location(team.vehicle_id)
    }

    pub fn employee_location(&self, employee_id: Id) -> Option<Id> {
        let employee = self.db.employees.find_optional(employee_id)?;
        self.vehicle_location(employee.vehicle_id)
    }

    /// Main stock location of the company, falling back to the reference stock
    pub fn warehouse_stock(&self, company_id: Id) -> Option<Id> {
        self.db
            .warehouses
            .first(|w| w.company_id == company_id)
            .map(|w| w.lot_stock_id)
            .or(self.db.references.stock)
    }

    pub fn customers(&self) -> Option<Id> {
        self.db.references.customers
    }

    /// Where the job's material is held
    pub fn job_location(&self, job: &Job) -> Option<Id> {
        if let Some(location) = job.team_id.and_then(|team| self.team_location(team)) {
            debug!(job = %job.name, location, "resolved team vehicle location");
            return Some(location);
        }

        if let Some(employee) = job.first_employee_id() {
            if let Some(location) = self.employee_location(employee) {
                debug!(job = %job.name, location, "resolved employee vehicle location");
                return Some(location);
            }
            if let Some(pool) = self.db.references.field_technicians {
                debug!(job = %job.name, location = pool, "resolved field technicians pool");
                return Some(pool);
            }
        }

        let fallback = self
            .warehouse_stock(job.company_id)
            .or_else(|| self.db.locations.first(|l| l.is_internal()).map(|l| l.id));
        debug!(job = %job.name, location = ?fallback, "resolved fallback location");
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use fsm_models::{Employee, StockLocation};

    #[test]
    fn test_team_vehicle_wins_over_employee_vehicle() {
        let mut fx = Fixture::new();
        let job = fx.job_with_team_and_employee();

        let resolver = LocationResolver::new(&fx.db);
        let job = fx.db.jobs.find(job).unwrap();
        assert_eq!(resolver.job_location(job), Some(fx.team_van_location()));
        assert_ne!(resolver.job_location(job), Some(fx.employee_van_location()));
    }

    #[test]
    fn test_employee_vehicle_without_team() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![fx.driver]);

        let resolver = LocationResolver::new(&fx.db);
        let job = fx.db.jobs.find(job).unwrap();
        assert_eq!(resolver.job_location(job), Some(fx.employee_van_location()));
    }

    #[test]
    fn test_employee_without_vehicle_uses_technicians_pool() {
        let mut fx = Fixture::new();
        let walker = fx.db.employees.insert(Employee::new("Петар"));
        let job = fx.job(None, vec![walker]);

        let resolver = LocationResolver::new(&fx.db);
        let job = fx.db.jobs.find(job).unwrap();
        assert_eq!(resolver.job_location(job), fx.db.references.field_technicians);
    }

    #[test]
    fn test_unstaffed_job_uses_warehouse_stock() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);

        let resolver = LocationResolver::new(&fx.db);
        let job = fx.db.jobs.find(job).unwrap();
        assert_eq!(resolver.job_location(job), Some(fx.warehouse.stock_location_id));
    }

    #[test]
    fn test_last_resort_is_any_internal_location() {
        let mut db = Database::new();
        let shelf = db.locations.insert(StockLocation::internal("Shelf"));
        let job = Job::new("JOB-1", 1);

        assert_eq!(LocationResolver::new(&db).job_location(&job), Some(shelf));
        assert_eq!(LocationResolver::new(&Database::new()).job_location(&job), None);
    }
}
