use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();
    server::app(engine)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|body| body.to_string())).await
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, value) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn balances_follow_the_ledger() {
    let app = test_app().await;

    let space = create(&app, "/spaces", json!({"name": "Commuters"})).await;
    let car = create(
        &app,
        &format!("/spaces/{space}/cars"),
        json!({"name": "Clio", "fuel": "petrol", "consumption": 6.0}),
    )
    .await;
    let b = create(&app, &format!("/spaces/{space}/members"), json!({"name": "B"})).await;
    let c = create(&app, &format!("/spaces/{space}/members"), json!({"name": "C"})).await;

    create(
        &app,
        &format!("/spaces/{space}/journeys"),
        json!({
            "date": "2024-04-12",
            "name": null,
            "distance": 100,
            "fuel_cost": 2.0,
            "member_ids": [b, c],
            "car_id": car,
        }),
    )
    .await;
    create(
        &app,
        &format!("/spaces/{space}/refills"),
        json!({
            "date": "2024-04-13",
            "cost": 20.0,
            "fuel_cost": 1.9,
            "member_id": b,
            "car_id": car,
        }),
    )
    .await;

    let (status, ledger) = send(&app, Method::GET, &format!("/spaces/{space}/ledger"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ledger[0]["type"], "refill");
    assert_eq!(ledger[1]["type"], "journey");

    let (status, balances) =
        send(&app, Method::GET, &format!("/spaces/{space}/balances"), None).await;
    assert_eq!(status, StatusCode::OK);
    let members = balances["members"].as_array().unwrap();
    assert_eq!(members[0]["name"], "B");
    assert!((members[0]["balance"].as_f64().unwrap() - 14.0).abs() < 1e-9);
    assert!((members[1]["deviation"].as_f64().unwrap() + 10.0).abs() < 1e-9);
    assert!((balances["average"].as_f64().unwrap() - 4.0).abs() < 1e-9);
    assert_eq!(balances["cars"][0]["name"], "Clio");
}

#[tokio::test]
async fn journey_update_returns_membership_changes() {
    let app = test_app().await;

    let space = create(&app, "/spaces", json!({"name": "Club"})).await;
    let car = create(
        &app,
        &format!("/spaces/{space}/cars"),
        json!({"name": "Panda", "fuel": "diesel", "consumption": 5.0}),
    )
    .await;
    let b = create(&app, &format!("/spaces/{space}/members"), json!({"name": "B"})).await;
    let c = create(&app, &format!("/spaces/{space}/members"), json!({"name": "C"})).await;
    let d = create(&app, &format!("/spaces/{space}/members"), json!({"name": "D"})).await;

    let journey = |members: Vec<&str>| {
        json!({
            "date": "2024-05-01",
            "name": "Market",
            "distance": 40,
            "fuel_cost": 1.8,
            "member_ids": members,
            "car_id": car,
        })
    };
    let journey_id = create(
        &app,
        &format!("/spaces/{space}/journeys"),
        journey(vec![b.as_str(), c.as_str()]),
    )
    .await;

    let (status, changes) = send(
        &app,
        Method::PUT,
        &format!("/spaces/{space}/journeys/{journey_id}"),
        Some(journey(vec![c.as_str(), d.as_str()])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(changes["removed"], json!([b]));
    assert_eq!(changes["added"], json!([d]));

    let (status, view) = send(
        &app,
        Method::GET,
        &format!("/spaces/{space}/journeys/{journey_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = view["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "D"]);
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let app = test_app().await;

    let space = create(&app, "/spaces", json!({"name": "Club"})).await;
    let car = create(
        &app,
        &format!("/spaces/{space}/cars"),
        json!({"name": "Panda", "fuel": "diesel", "consumption": 5.0}),
    )
    .await;
    let b = create(&app, &format!("/spaces/{space}/members"), json!({"name": "B"})).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/spaces/{space}/journeys"),
        Some(json!({
            "date": "2024-05-01",
            "name": null,
            "distance": 0,
            "fuel_cost": 1.8,
            "member_ids": [b],
            "car_id": car,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("distance"));

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/spaces/{space}/members"),
        Some(json!({"name": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let missing = "00000000-0000-4000-8000-000000000000";
    let (status, _) = send(&app, Method::GET, &format!("/spaces/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create(
        &app,
        &format!("/spaces/{space}/refills"),
        json!({
            "date": "2024-05-02",
            "cost": 30.0,
            "fuel_cost": 1.8,
            "member_id": b,
            "car_id": car,
        }),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/spaces/{space}/members/{b}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::GET, "/spaces/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn guest_flag_can_be_toggled() {
    let app = test_app().await;

    let space = create(&app, "/spaces", json!({"name": "Club"})).await;
    let b = create(&app, &format!("/spaces/{space}/members"), json!({"name": "B"})).await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/spaces/{space}/members/{b}"),
        Some(json!({"is_guest": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, view) = send(&app, Method::GET, &format!("/spaces/{space}"), None).await;
    assert_eq!(view["members"][0]["is_guest"], true);

    let (_, balances) = send(&app, Method::GET, &format!("/spaces/{space}/balances"), None).await;
    assert_eq!(balances["average"], Value::Null);
}

#[tokio::test]
async fn malformed_requests_are_bad_requests_with_json_error() {
    let app = test_app().await;
    let space = create(&app, "/spaces", json!({"name": "Club"})).await;

    let (status, body) = send(&app, Method::GET, "/spaces/not-a-uuid/ledger", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(
        &app,
        Method::POST,
        &format!("/spaces/{space}/members"),
        Some("{\"name\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/spaces/{space}/members"),
        Some(json!({"is_guest": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (_, view) = send(&app, Method::GET, &format!("/spaces/{space}"), None).await;
    assert!(view["members"].as_array().unwrap().is_empty());
}
