//! Reference data fixtures
//!
//! Installs the fixed locations the material workflow relies on, and a
//! warehouse with the three picking types used for issue, consumption and
//! return transfers.

use fsm_core::config::StockConfig;
use fsm_core::traits::Id;
use fsm_core::types::{LocationUsage, OperationKind, PickingTypeCode};
use fsm_models::{PickingType, StockLocation, Warehouse};
use tracing::info;

use crate::database::{Database, ReferenceLocations};

/// Create the stock, customers, vehicles and field technicians locations
pub fn install_reference_locations(db: &mut Database, config: &StockConfig) -> ReferenceLocations {
    let stock = db
        .locations
        .insert(StockLocation::internal(config.stock_location_name.clone()));
    let customers = db.locations.insert(StockLocation::new(
        config.customers_location_name.clone(),
        LocationUsage::Customer,
    ));
    let vehicles = db
        .locations
        .insert(StockLocation::internal(config.vehicles_location_name.clone()));
    let field_technicians = db.locations.insert(StockLocation::internal(
        config.field_technicians_location_name.clone(),
    ));

    db.references = ReferenceLocations {
        stock: Some(stock),
        customers: Some(customers),
        vehicles: Some(vehicles),
        field_technicians: Some(field_technicians),
    };
    info!(stock, customers, vehicles, field_technicians, "reference locations installed");
    db.references
}

/// Ids created by [`install_warehouse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarehouseSetup {
    pub warehouse_id: Id,
    pub stock_location_id: Id,
    pub issue_type_id: Id,
    pub consume_type_id: Id,
    pub return_type_id: Id,
}

impl WarehouseSetup {
    pub fn picking_type_id(&self, operation: OperationKind) -> Id {
        match operation {
            OperationKind::Issue => self.issue_type_id,
            OperationKind::Consume => self.consume_type_id,
            OperationKind::Return => self.return_type_id,
        }
    }
}

/// Create a company warehouse with its picking types.
///
/// The first warehouse adopts the reference stock location; later ones get
/// their own `<code>/<stock name>` location.
pub fn install_warehouse(
    db: &mut Database,
    config: &StockConfig,
    company_id: Id,
    code: &str,
) -> WarehouseSetup {
    let reference_stock = db
        .references
        .stock
        .filter(|stock| db.warehouses.first(|w| w.lot_stock_id == *stock).is_none());

    let stock_location_id = match reference_stock {
        Some(stock) => stock,
        None => db.locations.insert(
            StockLocation::internal(format!("{}/{}", code, config.stock_location_name))
                .with_company(Some(company_id)),
        ),
    };

    let warehouse_id = db
        .warehouses
        .insert(Warehouse::new(code, company_id, stock_location_id));

    let customers = db.references.customers;
    let issue_type_id = db.picking_types.insert(
        PickingType::new(
            config.picking_type_name(OperationKind::Issue),
            PickingTypeCode::Internal,
            company_id,
            format!("{}/REV", code),
        )
        .with_default_locations(Some(stock_location_id), None),
    );
    let consume_type_id = db.picking_types.insert(
        PickingType::new(
            config.picking_type_name(OperationKind::Consume),
            PickingTypeCode::Outgoing,
            company_id,
            format!("{}/OUT", code),
        )
        .with_default_locations(None, customers),
    );
    let return_type_id = db.picking_types.insert(
        PickingType::new(
            config.picking_type_name(OperationKind::Return),
            PickingTypeCode::Internal,
            company_id,
            format!("{}/RET", code),
        )
        .with_default_locations(None, Some(stock_location_id)),
    );

    info!(warehouse_id, company_id, code, "warehouse installed");
    WarehouseSetup {
        warehouse_id,
        stock_location_id,
        issue_type_id,
        consume_type_id,
        return_type_id,
    }
}
