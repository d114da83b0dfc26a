//! Client tests against a live server on an ephemeral port

use std::time::Duration;

use maintrack::{
    api,
    client::{FormDraft, MaintrackClient, SubmitError},
    models::RecordKind,
    AppState,
};

use super::{app, state, temp_data_dir};

async fn spawn_server() -> MaintrackClient {
    serve(app(temp_data_dir())).await
}

async fn serve(app: axum::Router) -> MaintrackClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    MaintrackClient::new(&format!("http://{}/api/v1", addr), Duration::from_secs(5))
        .expect("Failed to build client")
}

fn press_draft() -> FormDraft {
    let mut draft = FormDraft::new(RecordKind::Equipment);
    draft
        .set("name", "Press A")
        .set("location", "Line 1")
        .set("department", "Machining")
        .set("model", "HX-200")
        .set("serialNumber", "PRS001")
        .set("installDate", "2020-01-15")
        .set("status", "Operational");
    draft
}

#[tokio::test]
async fn test_saved_draft_is_cleared() {
    let client = spawn_server().await;
    let mut draft = press_draft();

    let saved = client.submit(&mut draft).await.expect("Submission failed");
    assert_eq!(saved.message, "Data saved successfully");
    assert!(draft.is_empty());

    let equipment = client.equipment().await.expect("Fetch failed");
    assert_eq!(equipment.len(), 1);
    assert_eq!(equipment[0].id, saved.id);
}

#[tokio::test]
async fn test_server_rejection_keeps_draft() {
    let client = spawn_server().await;

    let mut draft = FormDraft::new(RecordKind::Maintenance);
    draft
        .set("equipment", uuid::Uuid::new_v4().to_string())
        .set("date", "2024-03-01")
        .set("technician", "Jo")
        .set("hoursSpent", 2)
        .set("description", "Checked spindle alignment")
        .set("priority", "Low")
        .set("completionStatus", "Incomplete");

    match client.submit(&mut draft).await {
        Err(SubmitError::Validation(errors)) => assert!(errors.contains("equipment")),
        other => panic!("expected a rejected reference, got {:?}", other),
    }
    assert_eq!(draft.get("technician"), Some(&serde_json::Value::from("Jo")));
    assert!(client.maintenance().await.expect("Fetch failed").is_empty());
}

#[tokio::test]
async fn test_dashboard_reflects_submissions() {
    let client = spawn_server().await;
    let saved = client.submit(&mut press_draft()).await.expect("Submission failed");

    let mut job = FormDraft::new(RecordKind::Maintenance);
    job.set("equipment", saved.id.to_string())
        .set("date", "2024-03-01")
        .set("technician", "Jo")
        .set("hoursSpent", 4)
        .set("description", "Replaced worn hydraulic seal")
        .set("priority", "High")
        .set("completionStatus", "Complete");
    client.submit(&mut job).await.expect("Submission failed");

    let summary = client.dashboard().await.expect("Fetch failed");
    assert_eq!(summary.hours_by_department.len(), 1);
    assert_eq!(summary.hours_by_department[0].department, "Machining");
    assert_eq!(summary.hours_by_department[0].hours, 4.0);
    assert_eq!(summary.recent_activity[0].equipment, "Press A");
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let client = MaintrackClient::new("http://127.0.0.1:9/api/v1", Duration::from_secs(2))
        .expect("Failed to build client");
    let mut draft = press_draft();

    match client.submit(&mut draft).await {
        Err(SubmitError::Transport(_)) | Err(SubmitError::Timeout) => {}
        other => panic!("expected a transport failure, got {:?}", other),
    }
    assert!(!draft.is_empty());
}

#[tokio::test]
async fn test_busy_collection_is_a_timeout() {
    let state: AppState = state(temp_data_dir(), 20);
    let repository = state.services.repository.clone();
    let client = serve(api::router(state)).await;

    let held = repository.lock_for(RecordKind::Equipment).lock().await;
    let mut draft = press_draft();
    match client.submit(&mut draft).await {
        Err(SubmitError::Timeout) => {}
        other => panic!("expected a timeout, got {:?}", other),
    }
    assert!(!draft.is_empty());
    drop(held);

    client.submit(&mut draft).await.expect("Submission failed");
    assert!(draft.is_empty());
}
