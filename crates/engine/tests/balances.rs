use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{Engine, EngineError, Fuel, JourneyInput, LedgerItem, RefillInput};
use migration::MigratorTrait;

const EPSILON: f64 = 1e-9;

async fn engine_with_db() -> Engine {
    engine_and_db().await.0
}

async fn engine_and_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 12).unwrap()
}

async fn two_member_space(engine: &Engine) -> (Uuid, Uuid, Uuid, Uuid) {
    let space_id = engine.new_space("Commuters").await.unwrap();
    let car_id = engine
        .new_car(space_id, "Clio", Fuel::Petrol, 6.0)
        .await
        .unwrap();
    let b = engine.new_member(space_id, "B", false).await.unwrap();
    let c = engine.new_member(space_id, "C", false).await.unwrap();

    engine
        .new_journey(
            space_id,
            JourneyInput {
                date: date(),
                name: None,
                distance: 100,
                fuel_cost: 2.0,
                member_ids: vec![b, c],
                car_id,
            },
        )
        .await
        .unwrap();
    engine
        .new_refill(
            space_id,
            RefillInput {
                date: date(),
                cost: 20.0,
                fuel_cost: 1.95,
                member_id: b,
                car_id,
            },
        )
        .await
        .unwrap();

    (space_id, car_id, b, c)
}

#[tokio::test]
async fn journey_and_refill_scenario() {
    let engine = engine_with_db().await;
    let (space_id, _car_id, b, c) = two_member_space(&engine).await;

    let overview = engine.space_balances(space_id).await.unwrap();
    let balances = overview.balances;

    assert_eq!(overview.space.members.len(), 2);
    assert_close(balances.member(b).unwrap().balance, 14.0);
    assert_close(balances.member(c).unwrap().balance, -6.0);
    assert_close(balances.average.unwrap(), 4.0);
    assert_close(balances.member(b).unwrap().deviation.unwrap(), 10.0);
    assert_close(balances.member(c).unwrap().deviation.unwrap(), -10.0);
    assert!(balances.unattributed.is_empty());
}

#[tokio::test]
async fn guest_toggle_moves_member_out_of_average() {
    let engine = engine_with_db().await;
    let (space_id, _car_id, b, c) = two_member_space(&engine).await;

    engine.set_member_guest(space_id, b, true).await.unwrap();
    let balances = engine.space_balances(space_id).await.unwrap().balances;

    let guest = balances.member(b).unwrap();
    assert!(guest.is_guest);
    assert_close(guest.balance, 14.0);
    assert_eq!(guest.deviation, None);
    assert_close(balances.average.unwrap(), -6.0);
    assert_close(balances.member(c).unwrap().deviation.unwrap(), 0.0);

    engine.set_member_guest(space_id, c, true).await.unwrap();
    let balances = engine.space_balances(space_id).await.unwrap().balances;
    assert_eq!(balances.average, None);
}

#[tokio::test]
async fn deleting_entries_recomputes_balances() {
    let engine = engine_with_db().await;
    let (space_id, _car_id, b, c) = two_member_space(&engine).await;

    let ledger = engine.ledger(space_id).await.unwrap();
    for item in &ledger {
        if let LedgerItem::Journey(journey) = item {
            engine.delete_journey(space_id, journey.id).await.unwrap();
        }
    }

    let balances = engine.space_balances(space_id).await.unwrap().balances;
    assert_close(balances.member(b).unwrap().balance, 20.0);
    assert_close(balances.member(c).unwrap().balance, 0.0);
    assert_close(balances.average.unwrap(), 10.0);
}

#[tokio::test]
async fn empty_space_has_no_average() {
    let engine = engine_with_db().await;
    let space_id = engine.new_space("Empty").await.unwrap();

    let overview = engine.space_balances(space_id).await.unwrap();
    assert!(overview.balances.members.is_empty());
    assert_eq!(overview.balances.average, None);
}

#[tokio::test]
async fn unknown_space() {
    let engine = engine_with_db().await;
    assert_eq!(
        engine.space_balances(Uuid::new_v4()).await.unwrap_err(),
        EngineError::KeyNotFound("space not exists".to_string())
    );
}

#[tokio::test]
async fn duplicate_member_name_is_rejected() {
    let engine = engine_with_db().await;
    let space_id = engine.new_space("Commuters").await.unwrap();
    engine.new_member(space_id, "Bea", false).await.unwrap();

    assert_eq!(
        engine.new_member(space_id, " bea ", true).await.unwrap_err(),
        EngineError::ExistingKey("bea".to_string())
    );
}

#[tokio::test]
async fn delete_space_removes_everything() {
    let engine = engine_with_db().await;
    let (space_id, _car_id, _b, _c) = two_member_space(&engine).await;

    engine.delete_space(space_id).await.unwrap();
    assert!(matches!(
        engine.space(space_id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.ledger(space_id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn refill_without_fuel_cost_still_credits_payer() {
    let (engine, db) = engine_and_db().await;
    let (space_id, car_id, b, c) = two_member_space(&engine).await;

    let refill_id = Uuid::new_v4();
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO refills (id, space_id, car_id, member_id, date, cost, fuel_cost, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, NULL, ?)",
        vec![
            refill_id.into(),
            space_id.into(),
            car_id.into(),
            c.into(),
            date().into(),
            30.0_f64.into(),
            Utc::now().into(),
        ],
    ))
    .await
    .unwrap();

    let refill = engine.refill(space_id, refill_id).await.unwrap();
    assert_eq!(refill.fuel_cost, None);
    assert_eq!(refill.fuel_volume(), None);

    let balances = engine.space_balances(space_id).await.unwrap().balances;
    assert_close(balances.member(b).unwrap().balance, 14.0);
    assert_close(balances.member(c).unwrap().balance, 24.0);
    assert_close(balances.average.unwrap(), 19.0);
}

#[tokio::test]
async fn members_are_ordered_ignoring_case() {
    let engine = engine_with_db().await;
    let space_id = engine.new_space("Mixed").await.unwrap();
    let car_id = engine
        .new_car(space_id, "Clio", Fuel::Petrol, 6.0)
        .await
        .unwrap();
    let carl = engine.new_member(space_id, "Carl", false).await.unwrap();
    let ada = engine.new_member(space_id, "ada", false).await.unwrap();
    let bea = engine.new_member(space_id, "Bea", false).await.unwrap();

    let space = engine.space(space_id).await.unwrap();
    let names: Vec<&str> = space.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ada", "Bea", "Carl"]);

    let journey_id = engine
        .new_journey(
            space_id,
            JourneyInput {
                date: date(),
                name: None,
                distance: 10,
                fuel_cost: 1.5,
                member_ids: vec![carl, bea, ada],
                car_id,
            },
        )
        .await
        .unwrap();
    let journey = engine.journey(space_id, journey_id).await.unwrap();
    let names: Vec<&str> = journey.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ada", "Bea", "Carl"]);
}
