//! Base service traits
//!
//! A write runs in three steps: set attributes (recording what changed),
//! validate through contracts, persist. Create and update services share
//! the steps and differ only in where the entity comes from.

use fsm_contracts::ChangeTracker;
use fsm_core::error::{FsmError, ValidationErrors};
use fsm_core::result::FsmResult;
use fsm_core::traits::Id;
use fsm_db::Database;

/// Context flags of a write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteContext {
    /// Set by the wizard path: the quantity change is already backed by a
    /// transfer, so no picking is expected and no warning is logged
    pub skip_auto_picking: bool,
}

impl WriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_wizard() -> Self {
        Self {
            skip_auto_picking: true,
        }
    }
}

/// Trait for services that modify entities
pub trait WriteService<T> {
    /// The input params type
    type Params;

    /// Apply params to the entity and report which attributes changed
    fn set_attributes(
        &self,
        db: &Database,
        entity: &mut T,
        params: &Self::Params,
    ) -> FsmResult<ChangeTracker>;

    fn validate(&self, db: &Database, entity: &T) -> Result<(), ValidationErrors>;

    fn persist(&self, db: &mut Database, entity: &mut T, changes: &ChangeTracker)
        -> FsmResult<()>;
}

/// Trait for create services
pub trait CreateService<T>: WriteService<T> {
    /// Create a new entity instance carrying the defaults
    fn new_instance(&self, db: &Database, params: &Self::Params) -> FsmResult<T>;

    fn execute(&self, db: &mut Database, params: &Self::Params) -> FsmResult<T>
    where
        T: Clone,
    {
        let mut entity = self.new_instance(db, params)?;
        let changes = self.set_attributes(db, &mut entity, params)?;
        self.validate(db, &entity).map_err(FsmError::Validation)?;
        self.persist(db, &mut entity, &changes)?;
        Ok(entity)
    }
}

/// Trait for update services
pub trait UpdateService<T>: WriteService<T> {
    fn load(&self, db: &Database, id: Id) -> FsmResult<T>;

    fn execute(&self, db: &mut Database, id: Id, params: &Self::Params) -> FsmResult<T>
    where
        T: Clone,
    {
        let mut entity = self.load(db, id)?;
        let changes = self.set_attributes(db, &mut entity, params)?;
        if changes.is_empty() {
            return Ok(entity);
        }
        self.validate(db, &entity).map_err(FsmError::Validation)?;
        self.persist(db, &mut entity, &changes)?;
        Ok(entity)
    }
}
