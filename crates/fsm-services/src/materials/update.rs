//! Update Service for material lines

use fsm_contracts::{ChangeTracker, TRACKED_QUANTITY_FIELDS};
use fsm_core::error::ValidationErrors;
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_db::Database;
use fsm_journals::{Journal, JournalType};
use fsm_models::MaterialLine;
use tracing::{debug, warn};

use super::{check_line, MaterialParams};
use crate::base::{UpdateService, WriteContext, WriteService};

/// Service for editing a material line
///
/// Taken, used and returned quantities are meant to move through the
/// wizards, which pass [`WriteContext::from_wizard`]. Any other write to them
/// is applied but logged as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateMaterialService {
    context: WriteContext,
}

impl UpdateMaterialService {
    pub fn new(context: WriteContext) -> Self {
        Self { context }
    }

    pub fn call(&self, db: &mut Database, line_id: Id, params: &MaterialParams) -> FsmResult<MaterialLine> {
        self.execute(db, line_id, params)
    }
}

fn assign<T: PartialEq + Copy>(
    slot: &mut T,
    value: Option<T>,
    field: &str,
    changes: &mut ChangeTracker,
) {
    if let Some(value) = value {
        if *slot != value {
            *slot = value;
            changes.mark_changed(field);
        }
    }
}

impl WriteService<MaterialLine> for UpdateMaterialService {
    type Params = MaterialParams;

    fn set_attributes(
        &self,
        _db: &Database,
        entity: &mut MaterialLine,
        params: &MaterialParams,
    ) -> FsmResult<ChangeTracker> {
        let mut changes = ChangeTracker::new();
        assign(&mut entity.sequence, params.sequence, "sequence", &mut changes);
        assign(&mut entity.planned_qty, params.planned_qty, "planned_qty", &mut changes);
        assign(&mut entity.taken_qty, params.taken_qty, "taken_qty", &mut changes);
        assign(&mut entity.used_qty, params.used_qty, "used_qty", &mut changes);
        assign(&mut entity.returned_qty, params.returned_qty, "returned_qty", &mut changes);
        assign(&mut entity.price_unit, params.price_unit, "price_unit", &mut changes);
        if params.lot_id.is_some() && entity.lot_id != params.lot_id {
            entity.lot_id = params.lot_id;
            changes.mark_changed("lot_id");
        }
        Ok(changes)
    }

    fn validate(&self, db: &Database, entity: &MaterialLine) -> Result<(), ValidationErrors> {
        check_line(db, entity)
    }

    fn persist(
        &self,
        db: &mut Database,
        entity: &mut MaterialLine,
        changes: &ChangeTracker,
    ) -> FsmResult<()> {
        let direct = changes.changed_among(&TRACKED_QUANTITY_FIELDS);
        if !direct.is_empty() && !self.context.skip_auto_picking {
            warn!(
                line = entity.id,
                job = entity.job_id,
                fields = ?direct,
                "direct write to material quantities; use the material wizards"
            );
            let before = db.materials.find(entity.id)?;
            let edits: Vec<String> = direct
                .iter()
                .map(|field| {
                    let (label, old, new) = match field.as_str() {
                        "taken_qty" => ("превземено", before.taken_qty, entity.taken_qty),
                        "used_qty" => ("потрошено", before.used_qty, entity.used_qty),
                        _ => ("вратено", before.returned_qty, entity.returned_qty),
                    };
                    format!("{} {} → {}", label, old, new)
                })
                .collect();
            db.journals.post(Journal::new(
                JournalType::MaterialLine,
                entity.id,
                format!("Директна измена на количини без документ: {}", edits.join(", ")),
            ));
        }
        db.materials.update(entity.clone())?;
        debug!(line = entity.id, changed = ?changes.changed_attributes(), "material line updated");
        Ok(())
    }
}

impl UpdateService<MaterialLine> for UpdateMaterialService {
    fn load(&self, db: &Database, id: Id) -> FsmResult<MaterialLine> {
        db.materials.find(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_return_within_available() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let line = fx.material(job, fx.cable, [dec!(10), dec!(10), dec!(6), dec!(0)]);
        assert_eq!(fx.line(line).available_to_return_qty(), dec!(4));

        let service = UpdateMaterialService::new(WriteContext::from_wizard());
        let err = service
            .call(&mut fx.db, line, &MaterialParams::new().returned(dec!(5)))
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.has_error("returned_qty"));
        assert_eq!(fx.line(line).returned_qty, Decimal::ZERO);

        service
            .call(&mut fx.db, line, &MaterialParams::new().returned(dec!(4)))
            .unwrap();
        assert_eq!(fx.line(line).available_to_return_qty(), Decimal::ZERO);
    }

    #[test]
    fn test_used_cannot_exceed_taken() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let line = fx.material(job, fx.cable, [dec!(5), dec!(5), dec!(0), dec!(0)]);

        let err = UpdateMaterialService::new(WriteContext::from_wizard())
            .call(&mut fx.db, line, &MaterialParams::new().used(dec!(6)))
            .unwrap_err();
        assert!(err.validation_errors().unwrap().has_error("used_qty"));
    }

    #[test]
    fn test_direct_write_is_applied() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let line = fx.material(job, fx.cable, [dec!(5), dec!(0), dec!(0), dec!(0)]);

        let updated = UpdateMaterialService::new(WriteContext::new())
            .call(&mut fx.db, line, &MaterialParams::new().taken(dec!(2)))
            .unwrap();
        assert_eq!(updated.taken_qty, dec!(2));
        assert_eq!(fx.line(line).taken_qty, dec!(2));
        assert!(fx.db.pickings.count() == 0);

        let note = fx.db.journals.latest(JournalType::MaterialLine, line).unwrap();
        assert_eq!(note.body, "Директна измена на количини без документ: превземено 0 → 2");
    }

    #[test]
    fn test_wizard_write_leaves_no_note() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let line = fx.material(job, fx.cable, [dec!(5), dec!(0), dec!(0), dec!(0)]);

        UpdateMaterialService::new(WriteContext::from_wizard())
            .call(&mut fx.db, line, &MaterialParams::new().taken(dec!(2)))
            .unwrap();
        UpdateMaterialService::new(WriteContext::new())
            .call(&mut fx.db, line, &MaterialParams::new().with_price(dec!(3)))
            .unwrap();
        assert!(fx.db.journals.history(JournalType::MaterialLine, line).is_empty());
    }

    #[test]
    fn test_price_change_updates_subtotal() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let line = fx.material(job, fx.cable, [dec!(4), dec!(4), dec!(4), dec!(0)]);

        UpdateMaterialService::new(WriteContext::new())
            .call(&mut fx.db, line, &MaterialParams::new().with_price(dec!(3)))
            .unwrap();
        assert_eq!(fx.line(line).price_subtotal(), dec!(12));
    }

    #[test]
    fn test_negative_planned_rejected() {
        let mut fx = Fixture::new();
        let job = fx.job(None, vec![]);
        let line = fx.material(job, fx.cable, [dec!(4), dec!(0), dec!(0), dec!(0)]);

        let err = UpdateMaterialService::new(WriteContext::new())
            .call(&mut fx.db, line, &MaterialParams::new().planned(dec!(-1)))
            .unwrap_err();
        assert!(err.validation_errors().unwrap().has_error("planned_qty"));
    }
}
