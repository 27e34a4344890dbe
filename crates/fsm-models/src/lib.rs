//! # fsm-models
//!
//! Record types for ESFSM Stock.
//!
//! The host ERP records this module reads (products, partners, locations,
//! employees, jobs) live next to the records it owns (material lines) and
//! the fields it adds to host records (vehicle location, team vehicle,
//! employee vehicle, picking job link).

pub use fsm_core::traits::{Entity, Id, Identifiable, Named};

macro_rules! impl_entity {
    ($ty:ty, $name:literal) => {
        impl fsm_core::traits::Identifiable for $ty {
            fn id(&self) -> fsm_core::traits::Id {
                self.id
            }
        }

        impl fsm_core::traits::Entity for $ty {
            const TYPE_NAME: &'static str = $name;

            fn set_id(&mut self, id: fsm_core::traits::Id) {
                self.id = id;
            }
        }
    };
}

pub mod product;
pub mod partner;
pub mod location;
pub mod fleet;
pub mod team;
pub mod employee;
pub mod job;
pub mod material;
pub mod picking;

pub use product::{Lot, Product, ProductKind, Uom};
pub use partner::{Company, Partner};
pub use location::{Quant, StockLocation, Warehouse};
pub use fleet::Vehicle;
pub use team::Team;
pub use employee::Employee;
pub use job::{Job, JobStage};
pub use material::{MaterialLine, NewMaterialLine};
pub use picking::{Picking, PickingState, PickingType, StockMove};
