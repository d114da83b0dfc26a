//! API integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{app, temp_data_dir};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn press() -> Value {
    json!({
        "name": "Press A",
        "location": "Line 1",
        "department": "Machining",
        "model": "HX-200",
        "serialNumber": "PRS001",
        "installDate": "2020-01-15",
        "status": "Operational"
    })
}

fn job_for(equipment_id: &str) -> Value {
    json!({
        "equipment": equipment_id,
        "date": "2024-03-01",
        "type": "Repair",
        "technician": "Jo",
        "hoursSpent": 4,
        "description": "Replaced worn hydraulic seal",
        "partsReplaced": [{ "part": "Seal kit" }],
        "priority": "High",
        "completionStatus": "Complete"
    })
}

async fn create_press(app: &Router) -> String {
    let (status, body) = post(app, "/api/v1/submissions?formType=equipment", press()).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("No id in response").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app(temp_data_dir());

    let (status, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_submission_requires_form_type() {
    let app = app(temp_data_dir());

    let (status, body) = post(&app, "/api/v1/submissions", press()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Form type is required");
    assert_eq!(body["code"], 3);

    let (status, _) = post(&app, "/api/v1/submissions?formType=vehicles", press()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_equipment_submission_is_saved() {
    let dir = temp_data_dir();
    let app = app(dir.clone());

    let mut input = press();
    input["id"] = json!("client-chosen");
    let (status, body) = post(&app, "/api/v1/submissions?formType=equipment", input).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Data saved successfully");
    assert_ne!(body["id"], "client-chosen");
    assert_eq!(body["record"]["serialNumber"], "PRS001");

    let (status, list) = get(&app, "/api/v1/equipment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["id"], body["id"]);
    assert_eq!(list[0]["installDate"], "2020-01-15");

    let on_disk: Value =
        serde_json::from_slice(&std::fs::read(dir.join("equipmentData.json")).unwrap()).unwrap();
    assert_eq!(on_disk, list);
}

#[tokio::test]
async fn test_invalid_submission_reports_fields() {
    let dir = temp_data_dir();
    let app = app(dir.clone());

    let mut input = press();
    input["name"] = json!("AB");
    input["serialNumber"] = json!("PRS-001");
    let (status, body) = post(&app, "/api/v1/equipment", input).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["fields"]["name"][0],
        "Name must be at least 3 characters long"
    );
    assert_eq!(body["fields"]["serialNumber"][0], "Serial must be alphanumeric");
    assert!(!dir.join("equipmentData.json").exists());
}

#[tokio::test]
async fn test_maintenance_requires_existing_equipment() {
    let app = app(temp_data_dir());

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, body) = post(&app, "/api/v1/maintenance", job_for(&missing)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["equipment"][0], "Selected equipment does not exist");

    let id = create_press(&app).await;
    let (status, body) = post(&app, "/api/v1/maintenance", job_for(&id)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["partsReplaced"], json!(["Seal kit"]));
}

#[tokio::test]
async fn test_maintenance_table_groups_by_equipment_name() {
    let app = app(temp_data_dir());
    let id = create_press(&app).await;
    post(&app, "/api/v1/maintenance", job_for(&id)).await;

    let (status, view) = get(&app, "/api/v1/maintenance/table?group=true&sort=date&order=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["groupedBy"], "equipmentName");
    assert_eq!(view["groups"][0]["key"], "Press A");
    assert_eq!(view["groups"][0]["rows"][0]["equipmentName"], "Press A");
    assert_eq!(view["total"], 1);
}

#[tokio::test]
async fn test_table_filters_and_rejects_unknown_sort() {
    let app = app(temp_data_dir());
    create_press(&app).await;
    let mut lathe = press();
    lathe["name"] = json!("Lathe B");
    lathe["serialNumber"] = json!("LTH002");
    post(&app, "/api/v1/equipment", lathe).await;

    let (status, view) = get(&app, "/api/v1/equipment/table?filter.name=lathe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["total"], 2);
    assert_eq!(view["visible"], 1);
    assert_eq!(view["groups"][0]["rows"][0]["name"], "Lathe B");

    let (status, _) = get(&app, "/api/v1/equipment/table?sort=colour").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = app(temp_data_dir());

    let (status, empty) = get(&app, "/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["statusBreakdown"], json!([]));
    assert_eq!(empty["recentActivity"], json!([]));

    let id = create_press(&app).await;
    post(&app, "/api/v1/maintenance", job_for(&id)).await;

    let (_, summary) = get(&app, "/api/v1/dashboard").await;
    assert_eq!(
        summary["statusBreakdown"],
        json!([{ "label": "Operational", "value": 1 }])
    );
    assert_eq!(
        summary["hoursByDepartment"],
        json!([{ "department": "Machining", "hours": 4.0 }])
    );
    assert_eq!(summary["recentActivity"][0]["equipment"], "Press A");
}

#[tokio::test]
async fn test_malformed_collection_is_quarantined() {
    let dir = temp_data_dir();
    let app = app(dir.clone());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("equipmentData.json"), "[{\"name\": ").unwrap();

    let (status, body) = post(&app, "/api/v1/equipment", press()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 5);
    assert_eq!(
        std::fs::read_to_string(dir.join("equipmentData.json")).unwrap(),
        "[{\"name\": "
    );

    let (status, body) = post(&app, "/api/v1/collections/equipment/quarantine", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"], "equipment");

    create_press(&app).await;
    let (_, list) = get(&app, "/api/v1/equipment").await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_raw_collection_file_is_served() {
    let app = app(temp_data_dir());
    create_press(&app).await;

    let (status, body) = get(&app, "/data/equipmentData.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Press A");
}

#[tokio::test]
async fn test_unwritable_data_dir_reports_save_failed() {
    let file = temp_data_dir();
    std::fs::write(&file, "not a directory").unwrap();
    let app = app(file);

    let (status, body) = post(&app, "/api/v1/submissions?formType=equipment", press()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 4);
    assert_eq!(body["message"], "Save failed");
}
