//! Integration tests for cs-output.

use std::collections::HashMap;

use tempfile::TempDir;

use crate::csv::CsvWriter;
use crate::row::{ActivityCategory, ActivityLogRow, MetricsRow, Severity, TransactionRow};
use crate::writer::OutputWriter;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn activity_row(phase: u64) -> ActivityLogRow {
    ActivityLogRow {
        phase,
        category: ActivityCategory::Hunger,
        severity: Severity::Warning,
        subject_id: 3,
        subject_name: "agent-3".to_string(),
        message: "died of starvation".to_string(),
    }
}

fn tx_row(phase: u64) -> TransactionRow {
    TransactionRow {
        phase,
        kind: "sale",
        from: "agent:1".to_string(),
        to: "org:0".to_string(),
        amount: 12.5,
        location: Some(2),
        good: Some("provisions".to_string()),
    }
}

#[test]
fn csv_files_created() {
    let dir = tmp();
    let _w = CsvWriter::new(dir.path()).unwrap();
    assert!(dir.path().join("activity_log.csv").exists());
    assert!(dir.path().join("transactions.csv").exists());
    assert!(dir.path().join("metrics.csv").exists());
}

#[test]
fn csv_headers_correct() {
    let dir = tmp();
    let mut w = CsvWriter::new(dir.path()).unwrap();
    w.finish().unwrap();

    let mut rdr = csv::Reader::from_path(dir.path().join("activity_log.csv")).unwrap();
    let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    assert_eq!(headers, ["phase", "category", "severity", "subject_id", "subject_name", "message"]);

    let mut rdr2 = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
    let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
    assert_eq!(
        headers2,
        ["phase", "retail_sales", "wholesale_sales", "wage_payments", "dividend_payments", "deaths", "immigrants"]
    );
}

#[test]
fn csv_activity_log_round_trip() {
    let dir = tmp();
    let mut w = CsvWriter::new(dir.path()).unwrap();
    w.write_activity_log(&[activity_row(0), activity_row(1)]).unwrap();
    w.finish().unwrap();

    let mut rdr = csv::Reader::from_path(dir.path().join("activity_log.csv")).unwrap();
    let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "hunger");
    assert_eq!(&rows[0][2], "warning");
    assert_eq!(&rows[0][4], "agent-3");
}

#[test]
fn csv_transaction_round_trip() {
    let dir = tmp();
    let mut w = CsvWriter::new(dir.path()).unwrap();
    w.write_transactions(&[tx_row(5)]).unwrap();
    w.finish().unwrap();

    let mut rdr = csv::Reader::from_path(dir.path().join("transactions.csv")).unwrap();
    let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "5");
    assert_eq!(&rows[0][1], "sale");
    assert_eq!(&rows[0][3], "org:0");
    assert_eq!(&rows[0][6], "provisions");
}

#[test]
fn csv_metrics_round_trip() {
    let dir = tmp();
    let mut w = CsvWriter::new(dir.path()).unwrap();
    let row = MetricsRow { phase: 2, retail_sales: 4, deaths: 1, ..Default::default() };
    w.write_metrics(&row).unwrap();
    w.finish().unwrap();

    let mut rdr = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
    let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[0][1], "4"); // retail_sales
    assert_eq!(&rows[0][5], "1"); // deaths
}

#[test]
fn csv_finish_idempotent() {
    let dir = tmp();
    let mut w = CsvWriter::new(dir.path()).unwrap();
    w.finish().unwrap();
    w.finish().unwrap();
}

#[test]
fn csv_empty_batch_ok() {
    let dir = tmp();
    let mut w = CsvWriter::new(dir.path()).unwrap();
    w.write_activity_log(&[]).unwrap();
    w.write_transactions(&[]).unwrap();
}

// ── Observer integration: a tiny real Sim wired to a CsvWriter ───────────────

#[test]
fn integration_csv_observer_records_death_and_transactions() {
    use cs_behavior::condition::Condition;
    use cs_behavior::definition::BehaviorDef;
    use cs_core::{Config, GridPoint, StringInterner, TagSet};
    use cs_sim::{SimBuilder, SimObserver};
    use cs_world::agent::{AgentLocation, AgentStatus, Employment, Needs, ShiftState, Stats};
    use cs_world::{Agent, Building, Location, Priority};

    use crate::observer::SimOutputObserver;

    let mut interner = StringInterner::new();
    let mut world = cs_world::World::new();
    let building = world.push_building(|id| Building { id, grid: GridPoint::new(0, 0), floors: 1, units_per_floor: 1, allowed_tags: TagSet::new() });
    let loc = world.push_location(|id| Location {
        id,
        building,
        floor: None,
        unit: None,
        tags: TagSet::new(),
        owner: None,
        for_sale: false,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 0,
        inventory: HashMap::new(),
        inventory_capacity: 0.0,
        residency: None,
    });
    world.push_agent(|id| Agent {
        id,
        name: "doomed".into(),
        age: 40.0,
        template: "default".into(),
        tags: TagSet::new(),
        stats: Stats::default(),
        needs: Needs { hunger: 99.0, fatigue: 0.0, leisure: 0.0 },
        wallet: 0.0,
        inventory: HashMap::new(),
        inventory_capacity: 10.0,
        employment: Employment::default(),
        location: Some(AgentLocation::At(loc)),
        residence: None,
        current_task: None,
        work_shift: ShiftState::default(),
        delivery_shift: ShiftState::default(),
        corpse_shift: ShiftState::default(),
        status: AgentStatus::Alive,
    });

    let idle = BehaviorDef {
        id: "idle".into(),
        conditions: Vec::new(),
        completion_conditions: vec![Condition::Never],
        priority: Priority::Idle,
        executor: "wander".into(),
        params: cs_world::Params::new(),
    };

    let mut cfg = Config::test_fixture();
    cfg.simulation.hunger_per_phase = 1.0;
    let mut sim = SimBuilder::new(cfg, world, interner)
        .behaviors(cs_behavior::BehaviorRegistry::from_defs(vec![idle]).unwrap())
        .seed(1)
        .build()
        .expect("fixture should satisfy invariants");

    let dir = tmp();
    let writer = CsvWriter::new(dir.path()).unwrap();
    let mut obs = SimOutputObserver::new(writer);
    sim.run_ticks(2, &mut obs);
    assert!(obs.take_error().is_none(), "no write errors expected");

    let mut rdr = csv::Reader::from_path(dir.path().join("activity_log.csv")).unwrap();
    let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert!(rows.iter().any(|r| &r[1] == "hunger"), "expected a death event in the activity log");
}
