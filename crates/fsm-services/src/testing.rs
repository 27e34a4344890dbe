//! Seeded store shared by the service tests

use fsm_core::config::StockConfig;
use fsm_core::traits::Id;
use fsm_core::types::{ProductTracking, Quantity};
use fsm_db::{install_reference_locations, install_warehouse, Database, WarehouseSetup};
use fsm_models::{Company, Employee, Job, Lot, MaterialLine, Partner, Product, Team, Uom, Vehicle};
use rust_decimal_macros::dec;

use crate::vehicles::{CreateVehicleService, VehicleParams};

pub(crate) struct Fixture {
    pub db: Database,
    pub config: StockConfig,
    pub company: Id,
    pub customer: Id,
    pub warehouse: WarehouseSetup,
    pub meter: Id,
    pub unit: Id,
    /// Кабел UTP, 2.50 per meter, 100 m in stock
    pub cable: Id,
    /// Конектор RJ45, 0.40 per unit, 50 in stock
    pub connector: Id,
    /// Lot-tracked fiber, 30 m of lot LOT-2024-01 in stock
    pub fiber: Id,
    pub fiber_lot: Id,
    /// Марко, drives his own van
    pub driver: Id,
    /// Ана, team member without a vehicle
    pub helper: Id,
    pub team: Id,
    pub team_van: Vehicle,
    pub employee_van: Vehicle,
}

impl Fixture {
    pub fn new() -> Self {
        fsm_core::telemetry::try_init_test_tracing();

        let mut db = Database::new();
        let config = StockConfig::default();
        install_reference_locations(&mut db, &config);

        let company = db.companies.insert(Company::new("Телеком Сервис", "MKD"));
        let warehouse = install_warehouse(&mut db, &config, company, "WH");
        let customer = db.partners.insert(Partner::new("Телеком АД"));

        let meter = db.uoms.insert(Uom::new("m"));
        let unit = db.uoms.insert(Uom::new("Units"));
        let cable = db.products.insert(Product::new("Кабел UTP", meter, dec!(2.50)));
        let connector = db
            .products
            .insert(Product::new("Конектор RJ45", unit, dec!(0.40)));
        let fiber = db.products.insert(
            Product::new("Оптички кабел", meter, dec!(5)).with_tracking(ProductTracking::Lot),
        );
        let fiber_lot = db.lots.insert(Lot::new("LOT-2024-01", fiber));

        let stock = warehouse.stock_location_id;
        db.adjust_quant(cable, stock, None, dec!(100)).unwrap();
        db.adjust_quant(connector, stock, None, dec!(50)).unwrap();
        db.adjust_quant(fiber, stock, Some(fiber_lot), dec!(30)).unwrap();

        let vehicles = CreateVehicleService::new(&config);
        let team_van = vehicles
            .call(
                &mut db,
                &VehicleParams::new()
                    .with_name("Ford Transit")
                    .with_license_plate("SK-1001-AA")
                    .with_company(company),
            )
            .unwrap();
        let employee_van = vehicles
            .call(
                &mut db,
                &VehicleParams::new()
                    .with_name("VW Caddy")
                    .with_license_plate("SK-2002-BB")
                    .with_company(company),
            )
            .unwrap();

        let driver = db
            .employees
            .insert(Employee::new("Марко").with_vehicle(employee_van.id));
        let helper = db.employees.insert(Employee::new("Ана"));
        let team = db.teams.insert(
            Team::new("Тим Север")
                .with_members(vec![helper])
                .with_vehicle(team_van.id),
        );

        Self {
            db,
            config,
            company,
            customer,
            warehouse,
            meter,
            unit,
            cable,
            connector,
            fiber,
            fiber_lot,
            driver,
            helper,
            team,
            team_van,
            employee_van,
        }
    }

    /// New job for the customer, named JOB-001, JOB-002, ...
    pub fn job(&mut self, team: Option<Id>, employees: Vec<Id>) -> Id {
        let name = format!("JOB-{:03}", self.db.jobs.count() + 1);
        let mut job = Job::new(name, self.company)
            .with_partner(self.customer)
            .with_employees(employees);
        if let Some(team) = team {
            job = job.with_team(team);
        }
        self.db.jobs.insert(job)
    }

    /// Job of the team, with Марко assigned: the two vans differ
    pub fn job_with_team_and_employee(&mut self) -> Id {
        self.job(Some(self.team), vec![self.driver])
    }

    pub fn team_van_location(&self) -> Id {
        self.team_van.stock_location_id.unwrap()
    }

    pub fn employee_van_location(&self) -> Id {
        self.employee_van.stock_location_id.unwrap()
    }

    /// Material line stored as-is, bypassing services
    pub fn material(
        &mut self,
        job_id: Id,
        product_id: Id,
        [planned, taken, used, returned]: [Quantity; 4],
    ) -> Id {
        let product = self.db.products.find(product_id).unwrap().clone();
        self.db.materials.insert(MaterialLine {
            job_id,
            sequence: 10,
            product_id,
            product_uom_id: product.uom_id,
            planned_qty: planned,
            taken_qty: taken,
            used_qty: used,
            returned_qty: returned,
            price_unit: product.standard_price,
            ..Default::default()
        })
    }

    pub fn line(&self, id: Id) -> &MaterialLine {
        self.db.materials.find(id).unwrap()
    }
}
