//! Picking service
//!
//! Turns a batch of material quantities into one validated transfer:
//!
//! | operation | from                 | to                                  |
//! |-----------|----------------------|-------------------------------------|
//! | issue     | warehouse stock      | job location                        |
//! | consume   | job location         | customers                           |
//! | return    | job location         | picking type default, else stock    |
//!
//! The transfer is confirmed, assigned and validated right away, quants are
//! booked, and a note summarizing it is posted on the job.

use chrono::Utc;
use fsm_core::config::StockConfig;
use fsm_core::error::FsmError;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_core::types::{OperationKind, Quantity};
use fsm_db::Database;
use fsm_journals::{Journal, JournalType};
use fsm_models::{Job, Picking, PickingType, StockMove};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::locations::LocationResolver;

/// One product quantity to move
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferLine {
    pub product_id: Id,
    pub product_uom_id: Id,
    pub qty: Quantity,
    pub lot_id: Option<Id>,
}

impl TransferLine {
    pub fn new(product_id: Id, product_uom_id: Id, qty: Quantity) -> Self {
        Self {
            product_id,
            product_uom_id,
            qty,
            lot_id: None,
        }
    }

    pub fn with_lot(mut self, lot_id: Option<Id>) -> Self {
        self.lot_id = lot_id;
        self
    }
}

pub struct PickingService<'c> {
    config: &'c StockConfig,
}

impl<'c> PickingService<'c> {
    pub fn new(config: &'c StockConfig) -> Self {
        Self { config }
    }

    /// Create and validate the transfer for `lines`; zero lines are skipped
    pub fn create_picking(
        &self,
        db: &mut Database,
        job_id: Id,
        operation: OperationKind,
        lines: &[TransferLine],
    ) -> FsmResult<Picking> {
        let job = db.jobs.find(job_id)?.clone();
        let lines: Vec<TransferLine> = lines
            .iter()
            .copied()
            .filter(|l| l.qty > Decimal::ZERO)
            .collect();
        if lines.is_empty() {
            return Err(FsmError::validation(format!(
                "No materials to transfer for job {}.",
                job.name
            )));
        }

        let picking_type = self.find_picking_type(db, job.company_id, operation).cloned();
        let (source, destination) = self.locations(db, &job, operation, picking_type.as_ref())?;
        let technician = self.technician_name(db, &job);

        let mut moves = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = db.products.find(line.product_id)?;
            moves.push(StockMove {
                name: format!("{} - {}", job.name, product.name),
                product_id: line.product_id,
                product_uom_id: line.product_uom_id,
                product_uom_qty: line.qty,
                quantity: Decimal::ZERO,
                lot_id: line.lot_id,
                location_id: source,
                location_dest_id: destination,
            });
        }

        let mut picking = Picking {
            name: db.next_picking_name(picking_type.as_ref()),
            picking_type_id: picking_type.as_ref().map(|t| t.id),
            location_id: source,
            location_dest_id: destination,
            job_id: Some(job.id),
            partner_id: match operation {
                OperationKind::Consume => job.partner_id,
                OperationKind::Issue | OperationKind::Return => None,
            },
            origin: format!(
                "{} - {} - {}",
                job.name,
                self.config.label(operation),
                technician
            ),
            moves,
            ..Default::default()
        };

        picking.confirm()?;
        picking.assign()?;
        picking.set_quantities_done();
        picking.validate(Utc::now())?;

        picking.id = db.pickings.insert(picking.clone());
        db.apply_done_moves(&picking)?;

        let note = self.audit_note(db, &job, operation, &technician, &picking, &lines);
        db.journals.post(
            Journal::new(JournalType::Job, job.id, note).with_details(json!({
                "picking_id": picking.id,
                "picking": picking.name,
                "operation": operation.as_str(),
                "lines": lines,
            })),
        );
        db.journals.post(
            Journal::new(
                JournalType::Picking,
                picking.id,
                format!(
                    "{} за работен налог {}: {} материјали",
                    self.config.label(operation),
                    job.name,
                    lines.len()
                ),
            )
            .with_details(json!({ "job_id": job.id, "technician": technician })),
        );

        info!(
            job = %job.name,
            picking = %picking.name,
            operation = operation.as_str(),
            lines = lines.len(),
            "picking validated"
        );
        Ok(picking)
    }

    /// Picking type named for the operation, else the first of its fallback code
    pub fn find_picking_type<'d>(
        &self,
        db: &'d Database,
        company_id: Id,
        operation: OperationKind,
    ) -> Option<&'d PickingType> {
        let name = self.config.picking_type_name(operation);
        let code = operation.fallback_code();
        db.picking_types
            .first(|t| t.company_id == company_id && t.name == name)
            .or_else(|| {
                db.picking_types
                    .first(|t| t.company_id == company_id && t.code == code)
            })
    }

    /// Material responsible, else first employee, else the unknown name
    pub fn technician_name(&self, db: &Database, job: &Job) -> String {
        job.material_responsible_id
            .or_else(|| job.first_employee_id())
            .and_then(|id| db.employees.find_optional(id))
            .map(|e| e.name.clone())
            .unwrap_or_else(|| self.config.unknown_technician.clone())
    }

    fn locations(
        &self,
        db: &Database,
        job: &Job,
        operation: OperationKind,
        picking_type: Option<&PickingType>,
    ) -> FsmResult<(Id, Id)> {
        let resolver = LocationResolver::new(db);
        let missing = |what: &str| {
            FsmError::validation(format!(
                "No {} location could be found for job {}.",
                what, job.name
            ))
        };
        let job_location = resolver.job_location(job).ok_or_else(|| missing("job"))?;

        match operation {
            OperationKind::Issue => {
                let stock = resolver
                    .warehouse_stock(job.company_id)
                    .ok_or_else(|| missing("warehouse stock"))?;
                Ok((stock, job_location))
            }
            OperationKind::Consume => {
                let customers = resolver.customers().ok_or_else(|| missing("customers"))?;
                Ok((job_location, customers))
            }
            OperationKind::Return => {
                let destination = picking_type
                    .and_then(|t| t.default_location_dest_id)
                    .or(db.references.stock)
                    .ok_or_else(|| missing("return destination"))?;
                Ok((job_location, destination))
            }
        }
    }

    fn audit_note(
        &self,
        db: &Database,
        job: &Job,
        operation: OperationKind,
        technician: &str,
        picking: &Picking,
        lines: &[TransferLine],
    ) -> String {
        let label = self.config.label(operation);
        match operation {
            OperationKind::Issue => {
                let materials: Vec<String> = lines
                    .iter()
                    .map(|line| {
                        let lot = line
                            .lot_id
                            .and_then(|id| db.lots.find_optional(id))
                            .map(|lot| format!(", лот {}", lot.name))
                            .unwrap_or_default();
                        format!(
                            "{} ({} {}{})",
                            db.products.name_of(line.product_id),
                            line.qty,
                            db.uoms.name_of(line.product_uom_id),
                            lot
                        )
                    })
                    .collect();
                format!(
                    "{} издаден на {}: {} - {}",
                    label,
                    technician,
                    materials.join(", "),
                    picking.name
                )
            }
            OperationKind::Consume => {
                let customer = job.partner_id.map_or("-", |id| db.partners.name_of(id));
                format!(
                    "{} од {} кон {}: {} материјали - {}",
                    label,
                    technician,
                    customer,
                    lines.len(),
                    picking.name
                )
            }
            OperationKind::Return => format!(
                "{} од {}: {} материјали - {}",
                label,
                technician,
                lines.len(),
                picking.name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use fsm_models::PickingState;
    use rust_decimal_macros::dec;

    #[test]
    fn test_issue_moves_stock_to_job_location() {
        let mut fx = Fixture::new();
        let job = fx.job_with_team_and_employee();
        let service = PickingService::new(&fx.config);

        let picking = service
            .create_picking(
                &mut fx.db,
                job,
                OperationKind::Issue,
                &[TransferLine::new(fx.cable, fx.meter, dec!(25))],
            )
            .unwrap();

        assert_eq!(picking.state, PickingState::Done);
        assert_eq!(picking.location_id, fx.warehouse.stock_location_id);
        assert_eq!(picking.location_dest_id, fx.team_van_location());
        assert_eq!(picking.picking_type_id, Some(fx.warehouse.issue_type_id));
        assert_eq!(picking.origin, "JOB-001 - Реверс - Марко");
        assert_eq!(picking.name, "WH/REV/00001");
        assert_eq!(picking.moves[0].name, "JOB-001 - Кабел UTP");
        assert_eq!(picking.moves[0].quantity, dec!(25));

        assert_eq!(fx.db.on_hand(fx.cable, fx.warehouse.stock_location_id, None), dec!(75));
        assert_eq!(fx.db.on_hand(fx.cable, fx.team_van_location(), None), dec!(25));
        assert_eq!(fx.db.job_pickings(job).len(), 1);

        let note = fx.db.journals.latest(JournalType::Job, job).unwrap();
        assert_eq!(
            note.body,
            "Реверс издаден на Марко: Кабел UTP (25 m) - WH/REV/00001"
        );
        assert_eq!(note.details["operation"], "issue");

        let picking_note = fx.db.journals.latest(JournalType::Picking, picking.id).unwrap();
        assert_eq!(picking_note.body, "Реверс за работен налог JOB-001: 1 материјали");
        assert_eq!(picking_note.details["job_id"], job);
    }

    #[test]
    fn test_consume_goes_to_customers_with_partner() {
        let mut fx = Fixture::new();
        let job = fx.job_with_team_and_employee();
        let service = PickingService::new(&fx.config);
        let line = TransferLine::new(fx.cable, fx.meter, dec!(4));
        service
            .create_picking(&mut fx.db, job, OperationKind::Issue, &[line])
            .unwrap();

        let picking = service
            .create_picking(&mut fx.db, job, OperationKind::Consume, &[line])
            .unwrap();

        assert_eq!(picking.location_dest_id, fx.db.references.customers.unwrap());
        assert_eq!(picking.partner_id, Some(fx.customer));
        assert_eq!(picking.picking_type_id, Some(fx.warehouse.consume_type_id));
        assert!(picking.origin.contains("Испратница"));
        assert_eq!(fx.db.on_hand(fx.cable, fx.team_van_location(), None), Decimal::ZERO);

        let note = fx.db.journals.latest(JournalType::Job, job).unwrap();
        assert_eq!(
            note.body,
            format!("Испратница од Марко кон Телеком АД: 1 материјали - {}", picking.name)
        );
    }

    #[test]
    fn test_return_uses_type_default_destination() {
        let mut fx = Fixture::new();
        let job = fx.job_with_team_and_employee();
        let service = PickingService::new(&fx.config);

        let picking = service
            .create_picking(
                &mut fx.db,
                job,
                OperationKind::Return,
                &[TransferLine::new(fx.cable, fx.meter, dec!(2))],
            )
            .unwrap();

        assert_eq!(picking.location_id, fx.team_van_location());
        assert_eq!(picking.location_dest_id, fx.warehouse.stock_location_id);
        assert!(picking.partner_id.is_none());
    }

    #[test]
    fn test_lot_is_kept_on_moves() {
        let mut fx = Fixture::new();
        let job = fx.job_with_team_and_employee();
        let service = PickingService::new(&fx.config);

        let picking = service
            .create_picking(
                &mut fx.db,
                job,
                OperationKind::Issue,
                &[TransferLine::new(fx.fiber, fx.meter, dec!(10)).with_lot(Some(fx.fiber_lot))],
            )
            .unwrap();

        assert_eq!(picking.moves[0].lot_id, Some(fx.fiber_lot));
        assert_eq!(
            fx.db.on_hand(fx.fiber, fx.team_van_location(), Some(fx.fiber_lot)),
            dec!(10)
        );
        let note = fx.db.journals.latest(JournalType::Job, job).unwrap();
        assert!(note.body.contains("лот LOT-2024-01"));
    }

    #[test]
    fn test_zero_lines_only_is_rejected() {
        let mut fx = Fixture::new();
        let job = fx.job_with_team_and_employee();
        let service = PickingService::new(&fx.config);

        let err = service
            .create_picking(
                &mut fx.db,
                job,
                OperationKind::Issue,
                &[TransferLine::new(fx.cable, fx.meter, Decimal::ZERO)],
            )
            .unwrap_err();
        assert_eq!(err.error_code(), "validation_failed");
        assert_eq!(fx.db.pickings.count(), 0);
    }

    #[test]
    fn test_picking_type_falls_back_to_code() {
        let fx = Fixture::new();
        let mut config = fx.config.clone();
        config.consume_picking_type = "Does not exist".into();
        let service = PickingService::new(&config);

        let found = service
            .find_picking_type(&fx.db, fx.company, OperationKind::Consume)
            .unwrap();
        assert_eq!(found.id, fx.warehouse.consume_type_id);
        assert!(service.find_picking_type(&fx.db, 99, OperationKind::Consume).is_none());
    }

    #[test]
    fn test_technician_name_priority() {
        let mut fx = Fixture::new();
        let config = fx.config.clone();
        let service = PickingService::new(&config);

        let staffed = fx.job(None, vec![fx.driver]);
        let job = fx.db.jobs.find(staffed).unwrap();
        assert_eq!(service.technician_name(&fx.db, job), "Марко");

        let unstaffed = fx.job(None, vec![]);
        let job = fx.db.jobs.find(unstaffed).unwrap();
        assert_eq!(service.technician_name(&fx.db, job), "Непознат");
    }
}
