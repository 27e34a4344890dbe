//! # fsm-db
//!
//! Record store for ESFSM Stock.
//!
//! Stands in for the host ERP's ORM: typed tables with sequential ids,
//! snapshot transactions, the fixed reference locations, and the on-hand
//! bookkeeping that validated transfers update.

pub mod table;
pub mod database;
pub mod fixtures;
pub mod stock;

pub use database::{Database, ReferenceLocations};
pub use fixtures::{install_reference_locations, install_warehouse, WarehouseSetup};
pub use table::Table;
