//! End-to-end lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the async client
//! over real HTTP through `ReqwestTransport`. Checks that request building,
//! body encoding and envelope decoding agree with an actual server.

use jotform_core::{ApiError, ClientConfig, ErrorKind, FolderParameters, Jotform, ListQuery, Plan};
use serde_json::json;
use tokio::net::TcpListener;

async fn start_mock_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn connect() -> Jotform<jotform_core::ReqwestTransport> {
    let base_url = start_mock_server().await;
    Jotform::new(ClientConfig::new("integration-key").with_base_url(&base_url))
}

#[tokio::test(flavor = "multi_thread")]
async fn form_and_submission_lifecycle() {
    let jotform = connect().await;

    // Step 1: account is reachable and starts empty.
    let user = jotform.get_user().await.unwrap();
    assert_eq!(user["username"], mock_server::MOCK_USERNAME);
    let forms = jotform.get_forms(&ListQuery::new()).await.unwrap();
    assert_eq!(forms, json!([]));

    // Step 2: create a form through the form-encoded endpoint.
    let form = jotform
        .create_form(&json!({"properties": {"title": "Contact"}}))
        .await
        .unwrap();
    assert_eq!(form["title"], "Contact");
    let form_id = form["id"].as_str().unwrap().to_string();

    let fetched = jotform.get_form(&form_id).await.unwrap();
    assert_eq!(fetched["id"], form_id.as_str());

    // Step 3: submit with nested answers, then read them back.
    let created = jotform
        .create_form_submission(&form_id, &json!({"1": "hello", "3": {"first": "Ann"}}))
        .await
        .unwrap();
    let submission_id = created["submissionID"].as_str().unwrap().to_string();

    let submission = jotform.get_submission(&submission_id).await.unwrap();
    assert_eq!(submission["answers"], json!({"1": "hello", "3": {"first": "Ann"}}));

    // Step 4: edit, list, bulk create.
    jotform
        .edit_submission(&submission_id, &json!({"1": "edited"}))
        .await
        .unwrap();
    let submission = jotform.get_submission(&submission_id).await.unwrap();
    assert_eq!(submission["answers"]["1"], "edited");

    jotform
        .create_form_submissions(&form_id, &json!([{"1": "a"}, {"1": "b"}]))
        .await
        .unwrap();
    let listed = jotform
        .get_form_submissions(&form_id, &ListQuery::new())
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 3);

    // Step 5: delete the submission; a second lookup is a vendor error.
    jotform.delete_submission(&submission_id).await.unwrap();
    let err = jotform.get_submission(&submission_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Vendor);
    assert_eq!(err.message(), "Submission not found");

    // Step 6: delete the form.
    let deleted = jotform.delete_form(&form_id).await.unwrap();
    assert_eq!(deleted["status"], "DELETED");
}

#[tokio::test(flavor = "multi_thread")]
async fn webhooks_and_folders() {
    let jotform = connect().await;
    let form = jotform
        .create_forms(&json!({"properties": {"title": "Hooked"}}))
        .await
        .unwrap();
    let form_id = form["id"].as_str().unwrap().to_string();

    let hooks = jotform
        .create_form_webhook(&form_id, "https://example.com/hook")
        .await
        .unwrap();
    assert_eq!(hooks, json!({"0": "https://example.com/hook"}));
    let hooks = jotform.delete_form_webhook(&form_id, "0").await.unwrap();
    assert_eq!(hooks, json!({}));

    let folder = jotform
        .create_folder(&FolderParameters {
            name: "Work".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let folder_id = folder["id"].as_str().unwrap().to_string();

    let updated = jotform.add_form_to_folder(&folder_id, &form_id).await.unwrap();
    assert_eq!(updated["forms"], json!([form_id]));

    jotform.delete_folder(&folder_id).await.unwrap();
    let err = jotform.get_folder(&folder_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Vendor);
}

#[tokio::test(flavor = "multi_thread")]
async fn system_plan_is_public_data() {
    let jotform = connect().await;
    let plan = jotform.get_plan(Plan::Gold).await.unwrap();
    assert_eq!(plan["name"], "GOLD");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_route_surfaces_http_error_with_text() {
    let base_url = start_mock_server().await;
    // A base URL pointing below the API root makes every route miss.
    let jotform = Jotform::new(
        ClientConfig::new("integration-key").with_base_url(&format!("{base_url}/nowhere")),
    );

    let err = jotform.get_user().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.status(), Some(404));
    assert!(err.message().contains("404 Not Found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let jotform = Jotform::new(ClientConfig::new("k").with_base_url(&format!("http://{addr}")));
    let err = jotform.get_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Http);
}
