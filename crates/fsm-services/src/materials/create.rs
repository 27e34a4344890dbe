//! Create Service for material lines

use fsm_contracts::{ChangeTracker, QUANTITY_FIELDS};
use fsm_core::error::ValidationErrors;
use fsm_core::result::FsmResult;
use fsm_db::Database;
use fsm_models::material::DEFAULT_SEQUENCE;
use fsm_models::{MaterialLine, NewMaterialLine};
use rust_decimal::Decimal;
use tracing::debug;

use super::check_line;
use crate::base::{CreateService, WriteService};

/// Service for adding a material line to a job
///
/// Unit of measure and unit price default to the product's.
///
/// # Example
/// ```ignore
/// let params = NewMaterialLine::new(job_id, cable_id).planned(dec!(20));
/// let line = CreateMaterialService::new().call(&mut db, &params)?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateMaterialService;

impl CreateMaterialService {
    pub fn new() -> Self {
        Self
    }

    pub fn call(&self, db: &mut Database, params: &NewMaterialLine) -> FsmResult<MaterialLine> {
        self.execute(db, params)
    }
}

impl WriteService<MaterialLine> for CreateMaterialService {
    type Params = NewMaterialLine;

    fn set_attributes(
        &self,
        _db: &Database,
        entity: &mut MaterialLine,
        params: &NewMaterialLine,
    ) -> FsmResult<ChangeTracker> {
        let mut changes = ChangeTracker::new();
        let values = [
            params.planned_qty,
            params.taken_qty,
            params.used_qty,
            params.returned_qty,
        ];
        for (field, value) in QUANTITY_FIELDS.iter().zip(values) {
            if value != Decimal::ZERO {
                changes.mark_changed(*field);
            }
        }
        entity.planned_qty = params.planned_qty;
        entity.taken_qty = params.taken_qty;
        entity.used_qty = params.used_qty;
        entity.returned_qty = params.returned_qty;
        Ok(changes)
    }

    fn validate(&self, db: &Database, entity: &MaterialLine) -> Result<(), ValidationErrors> {
        check_line(db, entity)
    }

    fn persist(
        &self,
        db: &mut Database,
        entity: &mut MaterialLine,
        _changes: &ChangeTracker,
    ) -> FsmResult<()> {
        entity.id = db.materials.insert(entity.clone());
        debug!(line = entity.id, job = entity.job_id, "material line created");
        Ok(())
    }
}

impl CreateService<MaterialLine> for CreateMaterialService {
    fn new_instance(&self, db: &Database, params: &NewMaterialLine) -> FsmResult<MaterialLine> {
        db.jobs.find(params.job_id)?;
        let product = db.products.find(params.product_id)?;

        Ok(MaterialLine {
            job_id: params.job_id,
            sequence: params.sequence.unwrap_or(DEFAULT_SEQUENCE),
            product_id: product.id,
            product_uom_id: params.product_uom_id.unwrap_or(product.uom_id),
            lot_id: params.lot_id,
            price_unit: params.price_unit.unwrap_or(product.standard_price),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use fsm_models::{Product, ProductKind};
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_from_product() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);

        let line = CreateMaterialService::new()
            .call(&mut fx.db, &NewMaterialLine::new(job, fx.cable).planned(dec!(20)))
            .unwrap();

        assert_eq!(line.product_uom_id, fx.meter);
        assert_eq!(line.price_unit, dec!(2.50));
        assert_eq!(line.sequence, 10);
        assert_eq!(fx.line(line.id).planned_qty, dec!(20));
    }

    #[test]
    fn test_explicit_uom_and_price_win() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);

        let line = CreateMaterialService::new()
            .call(
                &mut fx.db,
                &NewMaterialLine::new(job, fx.cable)
                    .with_uom(fx.unit)
                    .with_price(dec!(3)),
            )
            .unwrap();
        assert_eq!(line.product_uom_id, fx.unit);
        assert_eq!(line.price_unit, dec!(3));
    }

    #[test]
    fn test_used_above_taken_rejected() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);

        let err = CreateMaterialService::new()
            .call(
                &mut fx.db,
                &NewMaterialLine::new(job, fx.cable).taken(dec!(2)).used(dec!(3)),
            )
            .unwrap_err();

        let errors = err.validation_errors().unwrap();
        assert!(errors.full_messages()[0].contains("Кабел UTP"));
        assert_eq!(fx.db.materials.count(), 0);
    }

    #[test]
    fn test_service_product_rejected() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let install = fx.db.products.insert(
            Product::new("Инсталација", fx.unit, dec!(30)).with_kind(ProductKind::Service),
        );

        let err = CreateMaterialService::new()
            .call(&mut fx.db, &NewMaterialLine::new(job, install))
            .unwrap_err();
        assert!(err.validation_errors().unwrap().has_error("product_id"));
    }

    #[test]
    fn test_foreign_lot_rejected() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);

        let err = CreateMaterialService::new()
            .call(
                &mut fx.db,
                &NewMaterialLine::new(job, fx.cable).with_lot(fx.fiber_lot),
            )
            .unwrap_err();
        assert!(err.validation_errors().unwrap().has_error("lot_id"));
    }

    #[test]
    fn test_unknown_job() {
        let mut fx = Fixture::new();
        let err = CreateMaterialService::new()
            .call(&mut fx.db, &NewMaterialLine::new(404, fx.cable))
            .unwrap_err();
        assert_eq!(err.error_code(), "not_found");
    }
}
